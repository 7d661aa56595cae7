use std::{fmt::Display, str::FromStr};

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::{core::HybridError, Float};

/// Default size of a random neighborhood (the seed particle included).
pub const DEFAULT_RANDOM_SIZE: usize = 5;
/// Default per-iteration probability that a particle rebuilds its random neighborhood.
pub const DEFAULT_REWIRE_PROBABILITY: Float = 0.2;
/// Default size of a ring window.
pub const DEFAULT_RING_SIZE: usize = 3;
/// Default taxicab radius of a von Neumann neighborhood.
pub const DEFAULT_VON_NEUMANN_RADIUS: usize = 1;

/// Swarm topologies which determine the flow of information
///
/// Every topology except [`SwarmTopology::Global`] gives each particle exactly one neighborhood
/// which it "seeds": neighborhood `i` always contains particle `i` as its first member, and
/// particle `i` is attracted to the best personal best found in neighborhood `i`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SwarmTopology {
    /// Each particle is connected to all others
    Global,
    /// Each particle is connected to `size - 1` distinct random others, and rebuilds that set
    /// with probability `rewire_probability` at every iteration
    Random {
        /// The size of each neighborhood
        size: usize,
        /// The probability of rebuilding a neighborhood at each iteration
        rewire_probability: Float,
    },
    /// Each particle is connected to the next `size - 1` particles by index (with joined
    /// endpoints)
    Ring {
        /// The size of each window
        size: usize,
    },
    /// Particles are laid out on a toroidal grid and each particle is connected to every cell
    /// within a taxicab distance of `radius`
    VonNeumann {
        /// The taxicab radius of each neighborhood
        radius: usize,
    },
}

impl Default for SwarmTopology {
    fn default() -> Self {
        Self::von_neumann()
    }
}

impl SwarmTopology {
    /// A [`SwarmTopology::Random`] topology with the default size and rewiring probability.
    pub const fn random() -> Self {
        Self::Random {
            size: DEFAULT_RANDOM_SIZE,
            rewire_probability: DEFAULT_REWIRE_PROBABILITY,
        }
    }
    /// A [`SwarmTopology::Ring`] topology with the default window size.
    pub const fn ring() -> Self {
        Self::Ring {
            size: DEFAULT_RING_SIZE,
        }
    }
    /// A [`SwarmTopology::VonNeumann`] topology with the default radius.
    pub const fn von_neumann() -> Self {
        Self::VonNeumann {
            radius: DEFAULT_VON_NEUMANN_RADIUS,
        }
    }

    /// The short code of the topology (`gl`, `ra`, `ri`, `vn`).
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Global => "gl",
            Self::Random { .. } => "ra",
            Self::Ring { .. } => "ri",
            Self::VonNeumann { .. } => "vn",
        }
    }

    /// The number of members of every neighborhood in a swarm of `n_particles`.
    pub fn neighborhood_size(&self, n_particles: usize) -> usize {
        match self {
            Self::Global => n_particles,
            Self::Random { size, .. } | Self::Ring { size } => *size,
            Self::VonNeumann { radius } => 1 + 2 * radius * (radius + 1),
        }
    }

    /// Check the topology parameters which do not depend on the swarm size.
    ///
    /// # Errors
    ///
    /// Returns a [`HybridError`] if a neighborhood size or radius is zero or the rewiring
    /// probability is outside of `[0, 1]`.
    pub fn validate(&self) -> Result<(), HybridError> {
        match *self {
            Self::Global => Ok(()),
            Self::Random {
                size,
                rewire_probability,
            } => {
                if size == 0 {
                    return Err(HybridError::ZeroSize {
                        name: "random neighborhood size",
                    });
                }
                if !(0.0..=1.0).contains(&rewire_probability) {
                    return Err(HybridError::OutOfUnitInterval {
                        name: "rewire_probability",
                        value: rewire_probability,
                    });
                }
                Ok(())
            }
            Self::Ring { size } => {
                if size == 0 {
                    return Err(HybridError::ZeroSize {
                        name: "ring neighborhood size",
                    });
                }
                Ok(())
            }
            Self::VonNeumann { radius } => {
                if radius == 0 {
                    return Err(HybridError::ZeroSize {
                        name: "von Neumann radius",
                    });
                }
                Ok(())
            }
        }
    }

    /// Build the neighborhoods of a swarm of `n_particles` particles.
    ///
    /// [`SwarmTopology::Global`] yields a single neighborhood holding every index; every other
    /// topology yields one neighborhood per particle, seeded by that particle. Random
    /// neighborhoods are drawn from `rng`.
    ///
    /// # Errors
    ///
    /// Returns a [`HybridError`] if the topology parameters are invalid, if the swarm is smaller
    /// than one neighborhood, or if a von Neumann swarm does not fill its grid.
    pub fn build(&self, n_particles: usize, rng: &mut Rng) -> Result<Vec<Vec<usize>>, HybridError> {
        self.validate()?;
        if n_particles == 0 {
            return Err(HybridError::ZeroSize {
                name: "n_particles",
            });
        }
        match *self {
            Self::Global => Ok(vec![(0..n_particles).collect()]),
            Self::Random { size, .. } => {
                check_swarm_size("random topology", size, n_particles)?;
                Ok((0..n_particles)
                    .map(|i| random_neighborhood(i, size, n_particles, rng))
                    .collect())
            }
            Self::Ring { size } => {
                check_swarm_size("ring topology", size, n_particles)?;
                Ok((0..n_particles)
                    .map(|i| ring_neighborhood(i, size, n_particles))
                    .collect())
            }
            Self::VonNeumann { radius } => {
                let grid = Grid::new(n_particles, radius)?;
                Ok((0..n_particles)
                    .map(|i| grid.neighborhood(i, radius))
                    .collect())
            }
        }
    }
}

impl Display for SwarmTopology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Random {
                size,
                rewire_probability,
            } => write!(f, "random (size {size}, rewire p = {rewire_probability})"),
            Self::Ring { size } => write!(f, "ring (size {size})"),
            Self::VonNeumann { radius } => write!(f, "von Neumann (radius {radius})"),
        }
    }
}

impl FromStr for SwarmTopology {
    type Err = HybridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gl" | "global" => Ok(Self::Global),
            "ra" | "random" => Ok(Self::random()),
            "ri" | "ring" => Ok(Self::ring()),
            "vn" | "von-neumann" | "vonneumann" | "von_neumann" => Ok(Self::von_neumann()),
            _ => Err(HybridError::UnknownTopology(s.to_string())),
        }
    }
}

fn check_swarm_size(
    topology: &'static str,
    required: usize,
    n_particles: usize,
) -> Result<(), HybridError> {
    if n_particles < required {
        return Err(HybridError::SwarmTooSmall {
            topology,
            required,
            n_particles,
        });
    }
    Ok(())
}

/// Draw a neighborhood of `size` distinct indices seeded by `index`.
pub(crate) fn random_neighborhood(
    index: usize,
    size: usize,
    n_particles: usize,
    rng: &mut Rng,
) -> Vec<usize> {
    let mut neighborhood = Vec::with_capacity(size);
    neighborhood.push(index);
    while neighborhood.len() < size {
        let candidate = rng.usize(0..n_particles);
        if !neighborhood.contains(&candidate) {
            neighborhood.push(candidate);
        }
    }
    neighborhood
}

fn ring_neighborhood(index: usize, size: usize, n_particles: usize) -> Vec<usize> {
    (0..size).map(|j| (index + j) % n_particles).collect()
}

/// A near-square toroidal layout of the swarm, filled row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    /// The number of rows
    pub rows: usize,
    /// The number of columns
    pub cols: usize,
}

impl Grid {
    /// Lay out `n_particles` on a grid with `ceil(sqrt(n))` columns and as few rows as needed
    /// (one less than the number of columns, or a square).
    ///
    /// # Errors
    ///
    /// Returns [`HybridError::InvalidGrid`] unless the grid is completely filled and both sides
    /// span at least `2 * radius + 1` cells, which keeps every neighborhood free of duplicates.
    pub fn new(n_particles: usize, radius: usize) -> Result<Self, HybridError> {
        let mut cols = 1;
        while cols * cols < n_particles {
            cols += 1;
        }
        let mut rows = cols - 1;
        if n_particles > rows * cols {
            rows += 1;
        }
        let min_side = 2 * radius + 1;
        if rows * cols != n_particles || rows < min_side || cols < min_side {
            return Err(HybridError::InvalidGrid {
                n_particles,
                rows,
                cols,
                min_side,
            });
        }
        Ok(Self { rows, cols })
    }

    /// The neighborhood of the particle at `index`: the particle itself followed by every cell at
    /// taxicab distance `1..=radius`, four cells per (vertical, horizontal) split of the
    /// distance.
    pub fn neighborhood(&self, index: usize, radius: usize) -> Vec<usize> {
        let (r, c) = (index / self.cols, index % self.cols);
        let mut neighborhood = Vec::with_capacity(1 + 2 * radius * (radius + 1));
        neighborhood.push(index);
        for distance in 1..=radius as isize {
            for step in 0..distance {
                let (di, dj) = (distance - step, step);
                for (dr, dc) in [(di, dj), (-di, -dj), (dj, -di), (-dj, di)] {
                    neighborhood.push(self.cell(r, c, dr, dc));
                }
            }
        }
        neighborhood
    }

    fn cell(&self, r: usize, c: usize, dr: isize, dc: isize) -> usize {
        let rows = self.rows as isize;
        let cols = self.cols as isize;
        let row = (r as isize + dr).rem_euclid(rows) as usize;
        let col = (c as isize + dc).rem_euclid(cols) as usize;
        row * self.cols + col
    }
}
