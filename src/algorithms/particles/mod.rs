/// [`SwarmParticle`] type for a single candidate solution.
pub mod particle;
pub use particle::SwarmParticle;

/// [`Swarm`] type holding the particles, their neighborhoods and the best-so-far positions.
pub mod swarm;
pub use swarm::Swarm;

/// [`SwarmTopology`] type and the neighborhood builders.
pub mod topology;
pub use topology::{Grid, SwarmTopology};

use crate::{algorithms::HybridStatus, core::Point, traits::Observer};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An [`Observer`] which stores the history of global best positions and, every `stride` steps,
/// a snapshot of the swarm particles.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TrackingSwarmObserver {
    /// The step interval between two particle snapshots
    pub stride: usize,
    /// The history of the swarm particles as `(step, particles)` pairs
    pub history: Vec<(usize, Vec<SwarmParticle>)>,
    /// The history of the best position in the swarm, one entry per step
    pub best_history: Vec<Point>,
}

impl Default for TrackingSwarmObserver {
    fn default() -> Self {
        Self {
            stride: 1,
            history: Vec::new(),
            best_history: Vec::new(),
        }
    }
}

impl TrackingSwarmObserver {
    /// Create an observer taking a particle snapshot every `stride` steps (a `stride` of zero
    /// only records the global best).
    pub fn new(stride: usize) -> Self {
        Self {
            stride,
            ..Default::default()
        }
    }

    /// Finalize the [`TrackingSwarmObserver`] by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }
}

impl<A> Observer<A, HybridStatus> for TrackingSwarmObserver {
    fn observe(&mut self, current_step: usize, _algorithm: &A, status: &HybridStatus) {
        if self.stride > 0 && current_step % self.stride == 0 {
            self.history
                .push((current_step, status.swarm.particles.clone()));
        }
        self.best_history.push(status.gbest.clone());
    }
}
