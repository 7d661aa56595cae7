use std::{convert::Infallible, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    core::HybridError,
    test_functions::{Ackley, Griewank, Rastrigin, Rosenbrock, Zakharov},
    traits::CostFunction,
    DVector, Float,
};

/// Default personal-best acceleration coefficient $`\varphi_1`$.
pub const DEFAULT_PHI1: Float = 2.05;
/// Default social-best acceleration coefficient $`\varphi_2`$.
pub const DEFAULT_PHI2: Float = 2.05;
/// Default swarm-confidence constant $`k`$.
pub const DEFAULT_K: Float = 1.0;

/// The closed set of benchmark objectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FunctionKind {
    /// See [`Rosenbrock`].
    #[default]
    Rosenbrock,
    /// See [`Ackley`].
    Ackley,
    /// See [`Rastrigin`].
    Rastrigin,
    /// See [`Zakharov`].
    Zakharov,
    /// See [`Griewank`].
    Griewank,
}

impl FunctionKind {
    /// Every function kind, in the order used by the experiment drivers.
    pub const ALL: [Self; 5] = [
        Self::Rosenbrock,
        Self::Ackley,
        Self::Rastrigin,
        Self::Griewank,
        Self::Zakharov,
    ];

    /// The short code of the function (`rok`, `ack`, `ras`, `zak`, `grk`).
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Rosenbrock => "rok",
            Self::Ackley => "ack",
            Self::Rastrigin => "ras",
            Self::Zakharov => "zak",
            Self::Griewank => "grk",
        }
    }

    /// The default initialization ranges for this function. Particles start in an off-center
    /// box so that the swarm has to travel toward the optimum.
    pub fn default_init_ranges(&self) -> InitRanges {
        let [p0, p1, v0, v1] = match self {
            Self::Rosenbrock => [15.0, 30.0, -2.0, 2.0],
            Self::Ackley => [16.0, 32.0, -2.0, 4.0],
            Self::Rastrigin => [2.56, 5.12, -2.0, 4.0],
            Self::Griewank => [300.0, 600.0, -10.0, 10.0],
            Self::Zakharov => [15.0, 30.0, -2.0, 4.0],
        };
        InitRanges {
            position: (p0, p1),
            velocity: (v0, v1),
        }
    }

    /// The location of the global minimum (where the function evaluates to `0`).
    pub fn optimum(&self, dimension: usize) -> DVector<Float> {
        match self {
            Self::Rosenbrock => DVector::from_element(dimension, 1.0),
            _ => DVector::zeros(dimension),
        }
    }
}

impl Display for FunctionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Rosenbrock => "Rosenbrock",
            Self::Ackley => "Ackley",
            Self::Rastrigin => "Rastrigin",
            Self::Zakharov => "Zakharov",
            Self::Griewank => "Griewank",
        };
        f.write_str(name)
    }
}

impl FromStr for FunctionKind {
    type Err = HybridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rok" | "rosenbrock" => Ok(Self::Rosenbrock),
            "ack" | "ackley" => Ok(Self::Ackley),
            "ras" | "rastrigin" => Ok(Self::Rastrigin),
            "zak" | "zakharov" => Ok(Self::Zakharov),
            "grk" | "griewank" => Ok(Self::Griewank),
            _ => Err(HybridError::UnknownFunction(s.to_string())),
        }
    }
}

/// The ranges used to draw initial positions and velocities, applied to every dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitRanges {
    /// `(min, max)` of the initial position components.
    pub position: (Float, Float),
    /// `(min, max)` of the initial velocity components.
    pub velocity: (Float, Float),
}

impl InitRanges {
    fn validate(&self) -> Result<(), HybridError> {
        for (name, (lower, upper)) in [("position", self.position), ("velocity", self.velocity)] {
            if !(lower.is_finite() && upper.is_finite() && lower < upper) {
                return Err(HybridError::InvalidRange { name, lower, upper });
            }
        }
        Ok(())
    }
}

/// A benchmark objective together with the PSO hyperparameters derived from it.
///
/// The constriction factor is computed once at construction,
/// ```math
/// \chi = \frac{2k}{\varphi - 2 + \sqrt{\varphi(\varphi - 4)}}, \quad \varphi = \varphi_1 + \varphi_2,
/// ```
/// and construction fails unless $`\varphi > 4`$. A [`Function`] is immutable and shared by
/// reference across every particle of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    kind: FunctionKind,
    dimension: usize,
    init_ranges: InitRanges,
    phi1: Float,
    phi2: Float,
    k: Float,
    constriction_factor: Float,
}

impl Function {
    /// Create a [`Function`] with the default initialization ranges and coefficients
    /// ($`\varphi_1 = \varphi_2 = 2.05`$, $`k = 1`$).
    ///
    /// # Errors
    ///
    /// Returns [`HybridError::ZeroSize`] if `dimension` is zero.
    pub fn new(kind: FunctionKind, dimension: usize) -> Result<Self, HybridError> {
        Self::with_parameters(
            kind,
            dimension,
            kind.default_init_ranges(),
            DEFAULT_PHI1,
            DEFAULT_PHI2,
            DEFAULT_K,
        )
    }

    /// Create a [`Function`] with explicit initialization ranges and coefficients.
    ///
    /// # Errors
    ///
    /// Returns a [`HybridError`] if `dimension` is zero, if a range is empty or not finite, if
    /// either coefficient is not strictly positive, or if $`\varphi_1 + \varphi_2 \le 4`$.
    pub fn with_parameters(
        kind: FunctionKind,
        dimension: usize,
        init_ranges: InitRanges,
        phi1: Float,
        phi2: Float,
        k: Float,
    ) -> Result<Self, HybridError> {
        if dimension == 0 {
            return Err(HybridError::ZeroSize { name: "dimension" });
        }
        init_ranges.validate()?;
        for (name, value) in [("phi1", phi1), ("phi2", phi2), ("k", k)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(HybridError::NonPositive { name, value });
            }
        }
        let phi = phi1 + phi2;
        if phi <= 4.0 {
            return Err(HybridError::ConstrictionUndefined { phi });
        }
        let constriction_factor = (2.0 * k) / (phi - 2.0 + Float::sqrt(phi * (phi - 4.0)));
        Ok(Self {
            kind,
            dimension,
            init_ranges,
            phi1,
            phi2,
            k,
            constriction_factor,
        })
    }

    /// Evaluate the objective at `x`.
    pub fn evaluate(&self, x: &DVector<Float>) -> Float {
        let n = self.dimension;
        let value = match self.kind {
            FunctionKind::Rosenbrock => Rosenbrock { n }.evaluate(x, &()),
            FunctionKind::Ackley => Ackley { n }.evaluate(x, &()),
            FunctionKind::Rastrigin => Rastrigin { n }.evaluate(x, &()),
            FunctionKind::Zakharov => Zakharov { n }.evaluate(x, &()),
            FunctionKind::Griewank => Griewank { n }.evaluate(x, &()),
        };
        match value {
            Ok(fx) => fx,
            Err(never) => match never {},
        }
    }

    /// The benchmark this function evaluates.
    pub const fn kind(&self) -> FunctionKind {
        self.kind
    }
    /// The dimension $`D`$ of the search space.
    pub const fn dimension(&self) -> usize {
        self.dimension
    }
    /// The initialization ranges for positions and velocities.
    pub const fn init_ranges(&self) -> InitRanges {
        self.init_ranges
    }
    /// The personal-best acceleration coefficient $`\varphi_1`$.
    pub const fn phi1(&self) -> Float {
        self.phi1
    }
    /// The social-best acceleration coefficient $`\varphi_2`$.
    pub const fn phi2(&self) -> Float {
        self.phi2
    }
    /// $`\varphi = \varphi_1 + \varphi_2`$.
    pub fn phi(&self) -> Float {
        self.phi1 + self.phi2
    }
    /// The swarm-confidence constant $`k`$.
    pub const fn k(&self) -> Float {
        self.k
    }
    /// The constriction factor $`\chi`$.
    pub const fn constriction_factor(&self) -> Float {
        self.constriction_factor
    }
}

impl CostFunction for Function {
    type Input = DVector<Float>;
    fn evaluate(&self, x: &DVector<Float>, _args: &()) -> Result<Float, Infallible> {
        Ok(Self::evaluate(self, x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_global_minima_are_zero() {
        for kind in FunctionKind::ALL {
            for dimension in [2, 5, 30] {
                let f = Function::new(kind, dimension).unwrap();
                let fx = f.evaluate(&kind.optimum(dimension));
                assert_relative_eq!(fx, 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_known_values() {
        let x = DVector::from_vec(vec![1.0, 2.0]);
        let rosenbrock = Function::new(FunctionKind::Rosenbrock, 2).unwrap();
        assert_relative_eq!(rosenbrock.evaluate(&x), 100.0);
        let rastrigin = Function::new(FunctionKind::Rastrigin, 2).unwrap();
        assert_relative_eq!(rastrigin.evaluate(&x), 5.0, epsilon = 1e-10);
        let zakharov = Function::new(FunctionKind::Zakharov, 2).unwrap();
        // 1 + 4 + 2.5^2 + 2.5^4
        assert_relative_eq!(zakharov.evaluate(&x), 50.3125);
        let griewank = Function::new(FunctionKind::Griewank, 2).unwrap();
        let expected = 5.0 / 4000.0 - Float::cos(1.0) * Float::cos(2.0 / Float::sqrt(2.0)) + 1.0;
        assert_relative_eq!(griewank.evaluate(&x), expected);
        let ackley = Function::new(FunctionKind::Ackley, 2).unwrap();
        assert!(ackley.evaluate(&x) > 0.0);
    }

    #[test]
    fn test_constriction_factor() {
        let f = Function::new(FunctionKind::Rastrigin, 2).unwrap();
        assert_relative_eq!(f.phi(), 4.1);
        assert_relative_eq!(f.constriction_factor(), 0.729_843_788_128_357, epsilon = 1e-12);
        let scaled = Function::with_parameters(
            FunctionKind::Rastrigin,
            2,
            FunctionKind::Rastrigin.default_init_ranges(),
            2.05,
            2.05,
            0.5,
        )
        .unwrap();
        assert_relative_eq!(
            scaled.constriction_factor(),
            0.5 * f.constriction_factor(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_constriction_requires_phi_above_four() {
        let ranges = FunctionKind::Ackley.default_init_ranges();
        let err = Function::with_parameters(FunctionKind::Ackley, 3, ranges, 2.0, 2.0, 1.0)
            .unwrap_err();
        assert_eq!(err, HybridError::ConstrictionUndefined { phi: 4.0 });
        let err = Function::with_parameters(FunctionKind::Ackley, 3, ranges, 1.0, 1.5, 1.0)
            .unwrap_err();
        assert!(matches!(err, HybridError::ConstrictionUndefined { .. }));
    }

    #[test]
    fn test_invalid_construction() {
        assert_eq!(
            Function::new(FunctionKind::Zakharov, 0).unwrap_err(),
            HybridError::ZeroSize { name: "dimension" }
        );
        let ranges = InitRanges {
            position: (5.0, 5.0),
            velocity: (-1.0, 1.0),
        };
        assert!(matches!(
            Function::with_parameters(FunctionKind::Zakharov, 2, ranges, 2.05, 2.05, 1.0),
            Err(HybridError::InvalidRange {
                name: "position",
                ..
            })
        ));
        let ranges = FunctionKind::Zakharov.default_init_ranges();
        assert!(matches!(
            Function::with_parameters(FunctionKind::Zakharov, 2, ranges, 0.0, 5.0, 1.0),
            Err(HybridError::NonPositive { name: "phi1", .. })
        ));
    }

    #[test]
    fn test_parse_function_kind() {
        for kind in FunctionKind::ALL {
            assert_eq!(kind.code().parse::<FunctionKind>().unwrap(), kind);
            assert_eq!(kind.to_string().parse::<FunctionKind>().unwrap(), kind);
        }
        assert_eq!(
            "sphere".parse::<FunctionKind>().unwrap_err(),
            HybridError::UnknownFunction("sphere".to_string())
        );
    }

    #[test]
    fn test_overflow_is_not_clamped() {
        let f = Function::new(FunctionKind::Rosenbrock, 2).unwrap();
        let fx = f.evaluate(&DVector::from_vec(vec![1e200, 1e200]));
        assert!(fx.is_infinite());
        let f = Function::new(FunctionKind::Rastrigin, 2).unwrap();
        let fx = f.evaluate(&DVector::from_vec(vec![Float::INFINITY, 0.0]));
        assert!(fx.is_nan());
    }
}
