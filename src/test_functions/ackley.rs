use std::convert::Infallible;

use crate::{traits::CostFunction, DVector, Float, E, PI};

/// The Ackley function, a nearly flat outer region with a deep hole at the center.
///
/// ```math
/// f(\vec{x}) = -20\exp\left(-0.2\sqrt{\frac{1}{n}\sum_{i=1}^n x_i^2}\right) - \exp\left(\frac{1}{n}\sum_{i=1}^n \cos(2\pi x_i)\right) + 20 + e
/// ```
/// This function has a minimum at $`f(\vec{0}) = 0`$.
pub struct Ackley {
    /// The number of dimensions of the function.
    pub n: usize,
}
impl CostFunction for Ackley {
    type Input = DVector<Float>;
    fn evaluate(&self, x: &DVector<Float>, _args: &()) -> Result<Float, Infallible> {
        let n = self.n as Float;
        let (sum_sq, sum_cos) = (0..self.n).fold((0.0, 0.0), |(sq, cs), i| {
            (sq + x[i].powi(2), cs + Float::cos(2.0 * PI * x[i]))
        });
        Ok(-20.0 * Float::exp(-0.2 * Float::sqrt(sum_sq / n)) - Float::exp(sum_cos / n) + 20.0 + E)
    }
}
