use std::convert::Infallible;

use crate::{
    core::Callbacks,
    traits::{Status, Terminator},
};

/// A trait representing an iterative minimization algorithm.
///
/// This trait is implemented for the algorithms found in the [`algorithms`](crate::algorithms)
/// module, and contains all the methods needed to run them through [`Algorithm::process`].
pub trait Algorithm<S: Status, E = Infallible> {
    /// A type which holds a summary of the algorithm's ending state.
    type Summary;

    /// Any setup work done before the main steps of the algorithm should be done here.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the setup fails.
    fn initialize(&mut self, status: &mut S) -> Result<(), E>;

    /// The main "step" of an algorithm, which is repeated until one of the [`Terminator`]s given
    /// to [`Algorithm::process`] breaks the loop.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the step fails.
    fn step(&mut self, current_step: usize, status: &mut S) -> Result<(), E>;

    /// Runs any steps needed by the [`Algorithm`] after termination. This will run regardless of
    /// which [`Terminator`] ended the loop.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the postprocessing fails.
    #[allow(unused_variables)]
    fn postprocessing(&mut self, status: &mut S) -> Result<(), E> {
        Ok(())
    }

    /// Generates a new [`Algorithm::Summary`] from the current state of the [`Algorithm`], which
    /// can be displayed or used elsewhere.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the summary cannot be created.
    fn summarize(&self, current_step: usize, status: &S) -> Result<Self::Summary, E>;

    /// Reset the algorithm to its initial state.
    fn reset(&mut self) {}

    /// Run the algorithm: [`Algorithm::initialize`] once, then [`Algorithm::step`] followed by
    /// the given [`Callbacks`] until one of them breaks, then [`Algorithm::postprocessing`] and
    /// finally [`Algorithm::summarize`].
    ///
    /// The loop only ends through the callbacks, so at least one [`Terminator`] such as
    /// [`MaxSteps`](crate::core::MaxSteps) should be supplied.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if any of the algorithm's methods fail.
    fn process(&mut self, mut callbacks: Callbacks<Self, S>) -> Result<Self::Summary, E>
    where
        Self: Sized,
    {
        let mut status = S::default();
        status.reset();
        self.initialize(&mut status)?;
        let mut current_step = 0;
        loop {
            self.step(current_step, &mut status)?;
            if callbacks
                .check_for_termination(current_step, self, &mut status)
                .is_break()
            {
                break;
            }
            current_step += 1;
        }
        self.postprocessing(&mut status)?;
        self.summarize(current_step, &status)
    }
}
