use std::convert::Infallible;

use crate::{traits::CostFunction, DVector, Float};

/// The Griewank function, a product of cosines over a shallow quadratic bowl.
///
/// ```math
/// f(\vec{x}) = 1 + \frac{1}{4000}\sum_{i=1}^n x_i^2 - \prod_{i=1}^n \cos\left(\frac{x_i}{\sqrt{i}}\right)
/// ```
/// This function has a minimum at $`f(\vec{0}) = 0`$.
pub struct Griewank {
    /// The number of dimensions of the function.
    pub n: usize,
}
impl CostFunction for Griewank {
    type Input = DVector<Float>;
    fn evaluate(&self, x: &DVector<Float>, _args: &()) -> Result<Float, Infallible> {
        let sum: Float = (0..self.n).map(|i| x[i].powi(2)).sum();
        let product: Float = (0..self.n)
            .map(|i| Float::cos(x[i] / Float::sqrt((i + 1) as Float)))
            .product();
        Ok(sum / 4000.0 - product + 1.0)
    }
}
