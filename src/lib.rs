//! `hybridswarm` couples a constriction-factor Particle Swarm Optimizer (PSO) with a Genetic
//! Algorithm (GA) to minimize continuous benchmark functions. Every iteration the swarm moves
//! according to the usual PSO update rule, after which the best-ranked fraction of the swarm
//! (the "cut ratio") is bred with crossover and mutation. The crate is meant for research
//! experimentation: a driver sweeps configurations, runs one [`Hybrid`](algorithms::Hybrid) per
//! trial and records the resulting [`HybridSummary`](core::HybridSummary).
//!
//! # Table of Contents
//! - [Key Features](#key-features)
//! - [Quick Start](#quick-start)
//! - [Update Rule](#update-rule)
//! - [Genetic Layer](#genetic-layer)
//!
//! # Key Features
//! * Five closed-form benchmarks (Rosenbrock, Ackley, Rastrigin, Zakharov, Griewank).
//! * Four neighborhood topologies: global, random (rewired stochastically), ring and a toroidal
//!   von Neumann grid.
//! * Rank, tournament and Boltzmann selection, one-point and uniform crossover, and a cooling
//!   mutation schedule which pulls coordinates toward the search bounds.
//! * A single seedable random source per run, so trials are reproducible.
//! * Trait-based [`Algorithm`](traits::Algorithm) loop with [`Observer`](traits::Observer)s and
//!   [`Terminator`](traits::Terminator)s for instrumentation and optional early stopping.
//! * Pressing `Ctrl-C` during a run (with a [`CtrlCAbortSignal`](core::CtrlCAbortSignal)
//!   registered) still produces a summary, with a message indicating the run was aborted.
//!
//! # Quick Start
//!
//! ```rust
//! use hybridswarm::prelude::*;
//!
//! fn main() -> Result<(), HybridError> {
//!     let mut config = HybridConfig::default();
//!     config
//!         .with_function(FunctionKind::Rastrigin)
//!         .with_dimension(2)
//!         .with_n_particles(16)
//!         .with_topology(SwarmTopology::Global)
//!         .with_max_iterations(200)
//!         .with_seed(0);
//!     let mut hybrid = Hybrid::new(config)?;
//!     let summary = hybrid.run()?;
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```
//!
//! # Update Rule
//!
//! Each particle moves with the constricted velocity update
//! ```math
//! v_i^{t+1} = \chi \left(v_i^t + r_1 \circ (p_i^t - x_i^t) + r_2 \circ (g_i^t - x_i^t)\right)
//! ```
//! where $`r_1 \sim U[0, \varphi_1]^D`$, $`r_2 \sim U[0, \varphi_2]^D`$, $`p_i`$ is the personal best,
//! $`g_i`$ is the global or neighborhood best and
//! ```math
//! \chi = \frac{2k}{\varphi - 2 + \sqrt{\varphi(\varphi - 4)}}, \quad \varphi = \varphi_1 + \varphi_2 > 4.
//! ```
//! No clamping is applied, so particles are free to leave the initialization box.
//!
//! # Genetic Layer
//!
//! After the PSO update the swarm is ranked by the objective value of each particle's current
//! position. An optional selection step resamples the entire swarm, then the top
//! `floor(N * cut_ratio)` particles are paired by rank for crossover (positions and velocities
//! are swapped together) and mutated toward the search bounds with a magnitude governed by
//! ```math
//! \delta = \left(1 - \frac{t}{T}\right)^5.
//! ```
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]

/// Module containing the PSO, GA and hybrid algorithms.
pub mod algorithms;
/// Module containing the core types used throughout the crate.
pub mod core;
/// Module containing standard benchmark functions.
pub mod test_functions;
/// Module containing the traits which tie algorithms, statuses and callbacks together.
pub mod traits;

pub use nalgebra::DVector;

/// A floating-point number type (defaults to [`f64`], see `features = ["f32"]`)
#[cfg(not(feature = "f32"))]
pub type Float = f64;

/// A floating-point number type (defaults to [`f64`], see `features = ["f32"]`)
#[cfg(feature = "f32")]
pub type Float = f32;

/// The mathematical constant $`\pi`$.
#[cfg(not(feature = "f32"))]
pub const PI: Float = std::f64::consts::PI;

/// The mathematical constant $`\pi`$.
#[cfg(feature = "f32")]
pub const PI: Float = std::f32::consts::PI;

/// The mathematical constant $`e`$.
#[cfg(not(feature = "f32"))]
pub const E: Float = std::f64::consts::E;

/// The mathematical constant $`e`$.
#[cfg(feature = "f32")]
pub const E: Float = std::f32::consts::E;

/// Prelude module containing everything someone should need to run a hybrid optimization.
pub mod prelude {
    pub use crate::{
        algorithms::{
            genetic::{CrossoverMethod, SelectionMethod},
            particles::SwarmTopology,
            Hybrid, HybridStatus,
        },
        core::{Function, FunctionKind, HybridConfig, HybridError, HybridSummary},
        traits::{Algorithm, CostFunction, Observer, Status, Terminator},
        DVector, Float,
    };
}
