use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::{genetic::Ranking, particles::{Swarm, SwarmParticle}},
    core::{utils::SampleFloat, Function},
    Float,
};

/// The exponent of the mutation cooling schedule.
pub const DEFAULT_DECAY_EXPONENT: i32 = 5;

/// A boundary mutation with a decaying step size.
///
/// Each coordinate mutates with probability [`Mutation::probability`] and is pulled toward one of
/// the two bounds (chosen with equal probability) by a fraction `(1 - u)^decay` of its distance
/// to that bound, where `u` is uniform in `[0, 1)` and
///
/// ```math
/// \text{decay} = \left(1 - \frac{t}{T}\right)^{5}
/// ```
///
/// for iteration `t` of `T`. Early on the fraction is uniform on `(0, 1]`; as the decay approaches
/// zero the fraction concentrates near `1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    /// The per-coordinate mutation probability
    pub probability: Float,
    /// The lower mutation bound
    pub lower: Float,
    /// The upper mutation bound
    pub upper: Float,
    /// The exponent of the cooling schedule
    pub exponent: i32,
}

impl Mutation {
    /// A mutation whose bounds are the function's position initialization range.
    pub fn for_function(probability: Float, func: &Function) -> Self {
        let (lower, upper) = func.init_ranges().position;
        Self {
            probability,
            lower,
            upper,
            exponent: DEFAULT_DECAY_EXPONENT,
        }
    }

    /// The cooling factor after a fraction `progress = t / T` of the run.
    pub fn decay(&self, progress: Float) -> Float {
        (1.0 - progress).powi(self.exponent)
    }

    /// Mutate the coordinates of one particle. Returns the number of mutated coordinates.
    pub fn mutate(&self, particle: &mut SwarmParticle, decay: Float, rng: &mut Rng) -> usize {
        let mut mutated = 0;
        for index in 0..particle.position.dimension() {
            if rng.float() < self.probability {
                let x = particle.position.x[index];
                let value = if rng.float() > 0.5 {
                    x + (self.upper - x) * (1.0 - rng.float()).powf(decay)
                } else {
                    x - (x - self.lower) * (1.0 - rng.float()).powf(decay)
                };
                particle.set_coordinate(index, value);
                mutated += 1;
            }
        }
        mutated
    }

    /// Mutate every elite particle of the ranking, best first. Returns the number of mutated
    /// coordinates.
    pub fn mutate_elite(
        &self,
        swarm: &mut Swarm,
        ranking: &Ranking,
        progress: Float,
        rng: &mut Rng,
    ) -> usize {
        let decay = self.decay(progress);
        ranking
            .elite()
            .iter()
            .map(|&index| self.mutate(&mut swarm.particles[index], decay, rng))
            .sum()
    }
}
