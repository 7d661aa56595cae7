use parking_lot::RwLock;
use std::{ops::ControlFlow, sync::Arc};

use crate::traits::Status;

/// A trait for all kinds of terminators used in [`Algorithm`](`crate::traits::Algorithm`)s.
///
/// These can be implemented for different kinds of [`Algorithm`](`crate::traits::Algorithm`)s
/// (`A`) and [`Status`]es (`S`). A terminator may mutate both the algorithm and its status, and
/// ends the run by returning [`ControlFlow::Break`].
pub trait Terminator<A, S: Status> {
    /// A termination check which is called after each step of an
    /// [`Algorithm`](`crate::traits::Algorithm`).
    fn check_for_termination(
        &mut self,
        current_step: usize,
        algorithm: &mut A,
        status: &mut S,
    ) -> ControlFlow<()>;
}
impl<T, A, S> Terminator<A, S> for Arc<RwLock<T>>
where
    T: Terminator<A, S>,
    S: Status,
{
    fn check_for_termination(
        &mut self,
        current_step: usize,
        algorithm: &mut A,
        status: &mut S,
    ) -> ControlFlow<()> {
        self.write()
            .check_for_termination(current_step, algorithm, status)
    }
}

/// A trait for all kinds of observers used in [`Algorithm`](`crate::traits::Algorithm`)s.
///
/// This is the most restrictive type of callback and is not able to mutate any of its inputs
/// aside from itself.
pub trait Observer<A, S: Status> {
    /// An observation method which is called after each step of an
    /// [`Algorithm`](`crate::traits::Algorithm`).
    fn observe(&mut self, current_step: usize, algorithm: &A, status: &S);
}
impl<O, A, S> Observer<A, S> for Arc<RwLock<O>>
where
    O: Observer<A, S>,
    S: Status,
{
    fn observe(&mut self, current_step: usize, algorithm: &A, status: &S) {
        self.write().observe(current_step, algorithm, status)
    }
}
