/// Basic implementations of [`AbortSignal`](crate::traits::AbortSignal)
pub mod abort_signals;
/// [`Callbacks`] and the built-in [`Terminator`](crate::traits::Terminator)s and
/// [`Observer`](crate::traits::Observer)s.
pub mod callbacks;
/// [`HybridConfig`] type describing one optimization run.
pub mod config;
/// [`RunContext`] type holding the mutable state shared by every stage of a run.
pub mod context;
/// [`HybridError`] type for configuration errors.
pub mod error;
/// [`Function`] type for the benchmark objective and the PSO constants derived from it.
pub mod function;
/// [`Point`] type for defining a point in the parameter space.
pub mod point;
/// [`HybridSummary`] type for the result of a run.
pub mod summary;
/// Random sampling helpers.
pub mod utils;

pub use abort_signals::{AtomicAbortSignal, CtrlCAbortSignal};
pub use callbacks::{
    Callbacks, DebugObserver, MaxSteps, StagnationTerminator, TargetValueTerminator,
};
pub use config::HybridConfig;
pub use context::RunContext;
pub use error::HybridError;
pub use function::{Function, FunctionKind, InitRanges};
pub use point::Point;
pub use summary::HybridSummary;
