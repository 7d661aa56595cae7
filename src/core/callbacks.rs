use crate::{
    algorithms::HybridStatus,
    traits::{Observer, Status, Terminator},
    Float,
};
use std::{fmt::Debug, ops::ControlFlow};
use tracing::debug;

enum CallbackLike<A, S> {
    Terminator(Box<dyn Terminator<A, S>>),
    Observer(Box<dyn Observer<A, S>>),
}
impl<A, S: Status> CallbackLike<A, S> {
    fn callback(&mut self, current_step: usize, algorithm: &mut A, status: &mut S) -> ControlFlow<()> {
        match self {
            Self::Terminator(terminator) => {
                terminator.check_for_termination(current_step, algorithm, status)
            }
            Self::Observer(observer) => {
                observer.observe(current_step, algorithm, status);
                ControlFlow::Continue(())
            }
        }
    }
}

/// A set of [`Terminator`]s and/or [`Observer`]s which can be used as an input to
/// [`Algorithm::process`](crate::traits::Algorithm::process).
///
/// Callbacks run in insertion order after every step. Every callback runs even if an earlier one
/// asks to stop, so observers added after a terminator still see the final step.
pub struct Callbacks<A, S>(Vec<CallbackLike<A, S>>);
impl<A, S: Status> Callbacks<A, S> {
    /// Create an empty set of callbacks.
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Return the set of [`Callbacks`] with an additional [`Terminator`] added.
    pub fn with_terminator<T>(mut self, terminator: T) -> Self
    where
        T: Terminator<A, S> + 'static,
    {
        self.0.push(CallbackLike::Terminator(Box::new(terminator)));
        self
    }

    /// Return the set of [`Callbacks`] with an additional [`Observer`] added.
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: Observer<A, S> + 'static,
    {
        self.0.push(CallbackLike::Observer(Box::new(observer)));
        self
    }

    /// The number of callbacks in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set holds no callbacks.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl<A, S: Status> Terminator<A, S> for Callbacks<A, S> {
    fn check_for_termination(
        &mut self,
        current_step: usize,
        algorithm: &mut A,
        status: &mut S,
    ) -> ControlFlow<()> {
        let mut flow = ControlFlow::Continue(());
        for callback in &mut self.0 {
            if callback.callback(current_step, algorithm, status).is_break() {
                flow = ControlFlow::Break(());
            }
        }
        flow
    }
}

/// A [`Terminator`] which terminates the algorithm after a number of steps.
///
/// Steps are zero-based, so `MaxSteps(n)` stops the loop once step `n - 1` has run, for exactly
/// `n` steps in total.
pub struct MaxSteps(pub usize);
impl Default for MaxSteps {
    fn default() -> Self {
        Self(10_000)
    }
}
impl<A, S: Status> Terminator<A, S> for MaxSteps {
    fn check_for_termination(
        &mut self,
        current_step: usize,
        _algorithm: &mut A,
        status: &mut S,
    ) -> ControlFlow<()> {
        if current_step >= self.0.saturating_sub(1) {
            status.update_message(&format!("Maximum number of steps reached ({})!", self.0));
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}

/// A [`Terminator`] which stops a hybrid run as soon as the global best reaches a target value,
/// flagging the run as converged.
pub struct TargetValueTerminator(pub Float);
impl<A> Terminator<A, HybridStatus> for TargetValueTerminator {
    fn check_for_termination(
        &mut self,
        current_step: usize,
        _algorithm: &mut A,
        status: &mut HybridStatus,
    ) -> ControlFlow<()> {
        match status.gbest.fx {
            Some(fx) if fx <= self.0 => {
                status.converged = true;
                status.update_message(&format!(
                    "Target value {} reached at step {}",
                    self.0, current_step
                ));
                ControlFlow::Break(())
            }
            _ => ControlFlow::Continue(()),
        }
    }
}

/// A [`Terminator`] which stops a hybrid run after a number of consecutive steps without any
/// improvement of the global best.
pub struct StagnationTerminator(pub usize);
impl<A> Terminator<A, HybridStatus> for StagnationTerminator {
    fn check_for_termination(
        &mut self,
        current_step: usize,
        _algorithm: &mut A,
        status: &mut HybridStatus,
    ) -> ControlFlow<()> {
        if current_step.saturating_sub(status.gbest_iteration) >= self.0 {
            status.update_message(&format!(
                "No improvement in the last {} steps",
                self.0
            ));
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}

/// A debugging callback which logs the step and status at every step of an algorithm at the
/// `DEBUG` level.
///
/// # Usage:
///
/// ```rust
/// use hybridswarm::prelude::*;
/// use hybridswarm::core::{Callbacks, DebugObserver, MaxSteps};
///
/// let mut config = HybridConfig::default();
/// config
///     .with_function(FunctionKind::Rastrigin)
///     .with_dimension(2)
///     .with_n_particles(9)
///     .with_max_iterations(5);
/// let mut hybrid = Hybrid::new(config).unwrap();
/// let summary = hybrid
///     .process(Callbacks::empty().with_terminator(MaxSteps(5)).with_observer(DebugObserver))
///     .unwrap();
/// // ^ This will log the status at each step
/// assert_eq!(summary.iterations, 5);
/// ```
pub struct DebugObserver;
impl<A, S> Observer<A, S> for DebugObserver
where
    S: Status + Debug,
{
    fn observe(&mut self, current_step: usize, _algorithm: &A, status: &S) {
        debug!(step = current_step, status = ?status);
    }
}
