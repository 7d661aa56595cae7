/// Module containing the genetic operators applied to the swarm after every PSO step.
pub mod genetic;

/// Module containing the particle swarm: particles, topologies and best tracking.
pub mod particles;

/// Module containing the hybrid PSO/GA algorithm.
pub mod hybrid;
pub use hybrid::{Hybrid, HybridStatus};
