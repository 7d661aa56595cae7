use serde::{Deserialize, Serialize};

use crate::{
    algorithms::{
        genetic::{CrossoverMethod, SelectionMethod},
        particles::SwarmTopology,
    },
    core::{
        function::{DEFAULT_K, DEFAULT_PHI1, DEFAULT_PHI2},
        Function, FunctionKind, HybridError, InitRanges,
    },
    Float,
};

/// The number of iterations between two samples of the convergence history.
pub const DEFAULT_RECORD_INTERVAL: usize = 500;

/// The configuration of one hybrid PSO/GA run.
///
/// Every field has a default mirroring the reference experiments (a 30-particle von Neumann
/// swarm in 30 dimensions, run for 10 000 iterations with one-point crossover and no
/// selection). Use the chainable `with_*` methods to adjust it and [`HybridConfig::validate`]
/// (called by [`Hybrid::new`](crate::algorithms::Hybrid::new)) to check it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridConfig {
    /// The benchmark to minimize.
    pub function: FunctionKind,
    /// The dimension of the search space.
    pub dimension: usize,
    /// The fraction of the ranked swarm subjected to crossover and mutation.
    pub cut_ratio: Float,
    /// The per-dimension mutation probability.
    pub mutation_probability: Float,
    /// The per-pair crossover probability.
    pub crossover_probability: Float,
    /// The number of particles in the swarm.
    pub n_particles: usize,
    /// The number of iterations of the run.
    pub max_iterations: usize,
    /// The neighborhood topology of the swarm.
    pub topology: SwarmTopology,
    /// The crossover operator.
    pub crossover: CrossoverMethod,
    /// The selection operator.
    pub selection: SelectionMethod,
    /// The seed of the run's random number generator (`None` seeds from entropy).
    pub seed: Option<u64>,
    /// The number of iterations between two samples of the convergence history.
    pub record_interval: usize,
    /// Overrides the function's default initialization ranges.
    pub init_ranges: Option<InitRanges>,
    /// The personal-best acceleration coefficient $`\varphi_1`$.
    pub phi1: Float,
    /// The social-best acceleration coefficient $`\varphi_2`$.
    pub phi2: Float,
    /// The swarm-confidence constant $`k`$.
    pub k: Float,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            function: FunctionKind::default(),
            dimension: 30,
            cut_ratio: 0.0,
            mutation_probability: 0.05,
            crossover_probability: 1.0,
            n_particles: 30,
            max_iterations: 10_000,
            topology: SwarmTopology::default(),
            crossover: CrossoverMethod::default(),
            selection: SelectionMethod::default(),
            seed: None,
            record_interval: DEFAULT_RECORD_INTERVAL,
            init_ranges: None,
            phi1: DEFAULT_PHI1,
            phi2: DEFAULT_PHI2,
            k: DEFAULT_K,
        }
    }
}

impl HybridConfig {
    /// Create a configuration with the given GA rates and all other fields at their defaults.
    pub fn new(cut_ratio: Float, mutation_probability: Float, crossover_probability: Float) -> Self {
        Self {
            cut_ratio,
            mutation_probability,
            crossover_probability,
            ..Default::default()
        }
    }
    /// Sets the benchmark function (default = [`FunctionKind::Rosenbrock`]).
    pub fn with_function(&mut self, value: FunctionKind) -> &mut Self {
        self.function = value;
        self
    }
    /// Sets the dimension of the search space (default = `30`).
    pub fn with_dimension(&mut self, value: usize) -> &mut Self {
        self.dimension = value;
        self
    }
    /// Sets the cut ratio (default = `0.0`).
    pub fn with_cut_ratio(&mut self, value: Float) -> &mut Self {
        self.cut_ratio = value;
        self
    }
    /// Sets the per-dimension mutation probability (default = `0.05`).
    pub fn with_mutation_probability(&mut self, value: Float) -> &mut Self {
        self.mutation_probability = value;
        self
    }
    /// Sets the per-pair crossover probability (default = `1.0`).
    pub fn with_crossover_probability(&mut self, value: Float) -> &mut Self {
        self.crossover_probability = value;
        self
    }
    /// Sets the number of particles (default = `30`).
    pub fn with_n_particles(&mut self, value: usize) -> &mut Self {
        self.n_particles = value;
        self
    }
    /// Sets the number of iterations (default = `10_000`).
    pub fn with_max_iterations(&mut self, value: usize) -> &mut Self {
        self.max_iterations = value;
        self
    }
    /// Sets the swarm topology (default = [`SwarmTopology::VonNeumann`] with radius `1`).
    pub fn with_topology(&mut self, value: SwarmTopology) -> &mut Self {
        self.topology = value;
        self
    }
    /// Sets the crossover method (default = [`CrossoverMethod::OnePoint`]).
    pub fn with_crossover(&mut self, value: CrossoverMethod) -> &mut Self {
        self.crossover = value;
        self
    }
    /// Sets the selection method (default = [`SelectionMethod::None`]).
    pub fn with_selection(&mut self, value: SelectionMethod) -> &mut Self {
        self.selection = value;
        self
    }
    /// Seeds the run's random number generator (default = seeded from entropy).
    pub fn with_seed(&mut self, value: u64) -> &mut Self {
        self.seed = Some(value);
        self
    }
    /// Sets the interval between two samples of the convergence history (default = `500`).
    pub fn with_record_interval(&mut self, value: usize) -> &mut Self {
        self.record_interval = value;
        self
    }
    /// Overrides the initialization ranges (default = [`FunctionKind::default_init_ranges`]).
    pub fn with_init_ranges(&mut self, value: InitRanges) -> &mut Self {
        self.init_ranges = Some(value);
        self
    }
    /// Sets the acceleration coefficients $`\varphi_1`$, $`\varphi_2`$ and the confidence
    /// constant $`k`$ (default = `2.05`, `2.05`, `1.0`).
    pub fn with_coefficients(&mut self, phi1: Float, phi2: Float, k: Float) -> &mut Self {
        self.phi1 = phi1;
        self.phi2 = phi2;
        self.k = k;
        self
    }

    /// Build the [`Function`] described by this configuration.
    ///
    /// # Errors
    ///
    /// See [`Function::with_parameters`].
    pub fn build_function(&self) -> Result<Function, HybridError> {
        Function::with_parameters(
            self.function,
            self.dimension,
            self.init_ranges
                .unwrap_or_else(|| self.function.default_init_ranges()),
            self.phi1,
            self.phi2,
            self.k,
        )
    }

    /// Check every field which does not depend on the swarm layout.
    ///
    /// Topology-specific size constraints are checked when the
    /// [`Swarm`](crate::algorithms::particles::Swarm) is built.
    ///
    /// # Errors
    ///
    /// Returns a [`HybridError`] describing the first invalid field.
    pub fn validate(&self) -> Result<(), HybridError> {
        for (name, value) in [
            ("dimension", self.dimension),
            ("n_particles", self.n_particles),
            ("max_iterations", self.max_iterations),
            ("record_interval", self.record_interval),
        ] {
            if value == 0 {
                return Err(HybridError::ZeroSize { name });
            }
        }
        for (name, value) in [
            ("cut_ratio", self.cut_ratio),
            ("mutation_probability", self.mutation_probability),
            ("crossover_probability", self.crossover_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(HybridError::OutOfUnitInterval { name, value });
            }
        }
        self.topology.validate()?;
        self.selection.validate(self.n_particles)?;
        self.build_function().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = HybridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.n_particles, 30);
        assert_eq!(config.dimension, 30);
        assert_eq!(config.max_iterations, 10_000);
        assert_eq!(config.topology, SwarmTopology::VonNeumann { radius: 1 });
    }

    #[test]
    fn test_new_sets_rates() {
        let config = HybridConfig::new(0.2, 0.1, 0.9);
        assert_eq!(config.cut_ratio, 0.2);
        assert_eq!(config.mutation_probability, 0.1);
        assert_eq!(config.crossover_probability, 0.9);
        assert_eq!(config.selection, SelectionMethod::None);
    }

    #[test]
    fn test_rates_must_lie_in_unit_interval() {
        let mut config = HybridConfig::default();
        config.with_cut_ratio(1.5);
        assert_eq!(
            config.validate().unwrap_err(),
            HybridError::OutOfUnitInterval {
                name: "cut_ratio",
                value: 1.5
            }
        );
        let mut config = HybridConfig::default();
        config.with_mutation_probability(Float::NAN);
        assert!(matches!(
            config.validate(),
            Err(HybridError::OutOfUnitInterval {
                name: "mutation_probability",
                ..
            })
        ));
    }

    #[test]
    fn test_sizes_must_be_positive() {
        let mut config = HybridConfig::default();
        config.with_max_iterations(0);
        assert_eq!(
            config.validate().unwrap_err(),
            HybridError::ZeroSize {
                name: "max_iterations"
            }
        );
    }

    #[test]
    fn test_coefficients_are_checked() {
        let mut config = HybridConfig::default();
        config.with_coefficients(1.0, 2.0, 1.0);
        assert_eq!(
            config.validate().unwrap_err(),
            HybridError::ConstrictionUndefined { phi: 3.0 }
        );
    }

    #[test]
    fn test_init_range_override() {
        let mut config = HybridConfig::default();
        let ranges = InitRanges {
            position: (-1.0, 1.0),
            velocity: (-0.1, 0.1),
        };
        config.with_function(FunctionKind::Ackley).with_init_ranges(ranges);
        let function = config.build_function().unwrap();
        assert_eq!(function.init_ranges(), ranges);
        assert_eq!(function.kind(), FunctionKind::Ackley);
    }
}
