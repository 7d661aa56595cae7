/// Module containing the [`AbortSignal`] trait.
pub mod abort_signal;
/// Module containing the [`Algorithm`] trait.
pub mod algorithm;
/// Module containing the [`Observer`] and [`Terminator`] traits.
pub mod callback;
/// Module containing the [`CostFunction`] trait.
pub mod cost_function;
/// Module containing the [`Status`] trait.
pub mod status;

pub use abort_signal::AbortSignal;
pub use algorithm::Algorithm;
pub use callback::{Observer, Terminator};
pub use cost_function::CostFunction;
pub use status::Status;
