use crate::{traits::CostFunction, DVector, Float};
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
};

/// Describes a point in parameter space along with its (lazily computed) objective value.
///
/// Every [`Point`] owns its coordinates, so recording a point as a "best" always stores an
/// independent copy which later moves of the particle cannot corrupt.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct Point<I = DVector<Float>> {
    /// the point's position
    pub x: I,
    /// the point's evaluation (`None` if the point has not yet been evaluated)
    pub fx: Option<Float>,
}
impl<I> Point<I> {
    /// Convert the [`Point`] into a `I`-`Float` tuple.
    ///
    /// # Panics
    ///
    /// This method will panic if the point is unevaluated.
    pub fn destructure(self) -> (I, Float) {
        let fx = self.fx_checked();
        (self.x, fx)
    }
    /// Compare two points by their `fx` value. Unevaluated points compare greater than evaluated
    /// ones, `NaN` (of either sign) compares greater than any number, and all other values are
    /// ordered with [`Float::total_cmp`].
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (&self.fx, &other.fx) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(s), Some(o)) => match (s.is_nan(), o.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => s.total_cmp(o),
            },
        }
    }
    /// Returns `true` if this point is strictly better than `other`.
    pub fn improves_on(&self, other: &Self) -> bool {
        self.total_cmp(other) == Ordering::Less
    }
    /// Move the point to a new position, resetting the evaluation of the point
    pub fn set_position(&mut self, x: I) {
        self.x = x;
        self.fx = None;
    }
    /// Get the current evaluation of the point, if it has been evaluated
    ///
    /// # Panics
    ///
    /// This method will panic if the point is unevaluated.
    pub fn fx_checked(&self) -> Float {
        #[allow(clippy::expect_used)]
        self.fx.expect("Point value requested before evaluation")
    }
}
impl Point<DVector<Float>> {
    /// Evaluate the given function at the point's coordinate and set the `fx` value to the result.
    /// Already evaluated points are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Users should implement this trait to return a
    /// `std::convert::Infallible` if the function evaluation never fails.
    pub fn evaluate<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E, Input = DVector<Float>>,
        args: &U,
    ) -> Result<Float, E> {
        match self.fx {
            Some(fx) => Ok(fx),
            None => {
                let fx = func.evaluate(&self.x, args)?;
                self.fx = Some(fx);
                Ok(fx)
            }
        }
    }
    /// The dimension of the point.
    pub fn dimension(&self) -> usize {
        self.x.len()
    }
}

impl<I: Debug> Display for Point<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "x: {:?}, f(x): {:?}", self.x, self.fx)
    }
}

impl From<&[Float]> for Point<DVector<Float>> {
    fn from(value: &[Float]) -> Self {
        Self {
            x: DVector::from_column_slice(value),
            fx: None,
        }
    }
}
impl From<Vec<Float>> for Point<DVector<Float>> {
    fn from(value: Vec<Float>) -> Self {
        Self {
            x: DVector::from_vec(value),
            fx: None,
        }
    }
}
impl From<DVector<Float>> for Point<DVector<Float>> {
    fn from(value: DVector<Float>) -> Self {
        Self { x: value, fx: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_functions::Rosenbrock;
    use nalgebra::dvector;

    #[test]
    fn test_destructure_and_fx_checked() {
        let p = Point {
            x: dvector![1.0, 2.0],
            fx: Some(5.0),
        };
        let (x, fx) = p.clone().destructure();
        assert_eq!(x, dvector![1.0, 2.0]);
        assert_eq!(fx, 5.0);
        assert_eq!(p.fx_checked(), 5.0);
    }

    #[test]
    #[should_panic(expected = "Point value requested before evaluation")]
    fn test_fx_checked_panics_if_unevaluated() {
        let p = Point {
            x: dvector![1.0],
            fx: None,
        };
        let _ = p.fx_checked();
    }

    #[test]
    fn test_evaluate_sets_fx_once() {
        let f = Rosenbrock { n: 2 };
        let mut p = Point::from(vec![1.0, 1.0]);
        assert!(p.fx.is_none());
        assert_eq!(p.evaluate(&f, &()).unwrap(), 0.0);
        assert_eq!(p.fx, Some(0.0));
        p.x[0] = 3.0;
        // cached value is kept until the position is reset
        assert_eq!(p.evaluate(&f, &()).unwrap(), 0.0);
    }

    #[test]
    fn test_total_cmp_orders_nan_last() {
        let finite = Point {
            x: dvector![1.0],
            fx: Some(1.0),
        };
        let infinite = Point {
            x: dvector![2.0],
            fx: Some(Float::INFINITY),
        };
        let nan = Point {
            x: dvector![3.0],
            fx: Some(Float::NAN),
        };
        let unevaluated = Point::<DVector<Float>>::from(vec![4.0]);
        assert_eq!(finite.total_cmp(&infinite), Ordering::Less);
        assert_eq!(infinite.total_cmp(&nan), Ordering::Less);
        assert_eq!(nan.total_cmp(&unevaluated), Ordering::Less);
        assert!(finite.improves_on(&infinite));
        let negative_nan = Point {
            x: dvector![5.0],
            fx: Some(-Float::NAN),
        };
        assert_eq!(negative_nan.total_cmp(&infinite), Ordering::Greater);
        assert_eq!(negative_nan.total_cmp(&nan), Ordering::Equal);
        assert!(!finite.improves_on(&finite.clone()));
    }

    #[test]
    fn test_set_position_resets_fx() {
        let mut p = Point {
            x: dvector![1.0],
            fx: Some(5.0),
        };
        p.set_position(dvector![2.0]);
        assert_eq!(p.x, dvector![2.0]);
        assert!(p.fx.is_none());
    }

    #[test]
    fn test_from_and_display() {
        let p = Point::from(vec![1.0, 2.0]);
        let s = format!("{}", p);
        assert!(s.contains("x:"));
        assert!(s.contains("f(x):"));
    }
}
