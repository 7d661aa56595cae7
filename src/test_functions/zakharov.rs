use std::convert::Infallible;

use crate::{traits::CostFunction, DVector, Float};

/// The Zakharov function, a plate-shaped function with no local minima but the global one.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^n x_i^2 + \left(\sum_{i=1}^n \frac{i x_i}{2}\right)^2 + \left(\sum_{i=1}^n \frac{i x_i}{2}\right)^4
/// ```
/// This function has a minimum at $`f(\vec{0}) = 0`$.
pub struct Zakharov {
    /// The number of dimensions of the function.
    pub n: usize,
}
impl CostFunction for Zakharov {
    type Input = DVector<Float>;
    fn evaluate(&self, x: &DVector<Float>, _args: &()) -> Result<Float, Infallible> {
        let sum_sq: Float = (0..self.n).map(|i| x[i].powi(2)).sum();
        let weighted: Float = (0..self.n).map(|i| 0.5 * (i + 1) as Float * x[i]).sum();
        Ok(sum_sq + weighted.powi(2) + weighted.powi(4))
    }
}
