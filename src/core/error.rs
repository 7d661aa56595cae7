use thiserror::Error;

use crate::Float;

/// Errors raised while building a run. Every variant is detected before the first iteration;
/// the iteration loop itself never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HybridError {
    /// The benchmark function name is not one of the known kinds.
    #[error("unknown benchmark function `{0}` (expected one of rok, ack, ras, grk, zak)")]
    UnknownFunction(String),
    /// The topology name is not one of the known kinds.
    #[error("unknown swarm topology `{0}` (expected one of gl, ra, ri, vn)")]
    UnknownTopology(String),
    /// The crossover name is not one of the known methods.
    #[error("unknown crossover method `{0}` (expected one of 1c, uc)")]
    UnknownCrossover(String),
    /// The selection name is not one of the known methods.
    #[error("unknown selection method `{0}` (expected one of none, rs, ts, bs)")]
    UnknownSelection(String),
    /// The acceleration coefficients do not admit a real constriction factor.
    #[error("phi1 + phi2 = {phi} must exceed 4 for the constriction factor to be real")]
    ConstrictionUndefined {
        /// The offending sum $`\varphi_1 + \varphi_2`$.
        phi: Float,
    },
    /// A strictly positive quantity was zero, negative or not finite.
    #[error("{name} must be strictly positive and finite (got {value})")]
    NonPositive {
        /// The name of the quantity.
        name: &'static str,
        /// The value that was given.
        value: Float,
    },
    /// A size or count was zero.
    #[error("{name} must be at least 1")]
    ZeroSize {
        /// The name of the quantity.
        name: &'static str,
    },
    /// A probability or ratio lies outside of `[0, 1]`.
    #[error("{name} = {value} must lie in [0, 1]")]
    OutOfUnitInterval {
        /// The name of the quantity.
        name: &'static str,
        /// The value that was given.
        value: Float,
    },
    /// A sampling range is empty, inverted or not finite.
    #[error("{name} range [{lower}, {upper}] must be finite with lower < upper")]
    InvalidRange {
        /// The name of the range.
        name: &'static str,
        /// The lower limit.
        lower: Float,
        /// The upper limit.
        upper: Float,
    },
    /// The swarm has fewer particles than a neighborhood (or selection round) requires.
    #[error("{topology} needs at least {required} particles but the swarm has {n_particles}")]
    SwarmTooSmall {
        /// The component that needs more particles.
        topology: &'static str,
        /// The minimum number of particles.
        required: usize,
        /// The number of particles in the swarm.
        n_particles: usize,
    },
    /// The swarm cannot be laid out on a full toroidal grid.
    #[error(
        "{n_particles} particles do not fill a {rows}x{cols} von Neumann grid with at least {min_side} rows and columns"
    )]
    InvalidGrid {
        /// The number of particles in the swarm.
        n_particles: usize,
        /// The number of grid rows.
        rows: usize,
        /// The number of grid columns.
        cols: usize,
        /// The minimum side length needed for distinct neighbors.
        min_side: usize,
    },
}
