use crate::{algorithms::particles::Swarm, Float};

/// A ranked view of a swarm: particle indices ordered by the value at their current position
/// (ascending, stable), together with the number of elite particles open to crossover and
/// mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ranking {
    /// Particle indices from best to worst
    pub order: Vec<usize>,
    /// The number of leading entries of [`Ranking::order`] which make up the elite
    pub n_elite: usize,
}

impl Ranking {
    /// Rank every particle of the swarm and take `floor(N * cut_ratio)` of them as the elite.
    ///
    /// Equal values keep their index order and `NaN` values rank last.
    pub fn new(swarm: &Swarm, cut_ratio: Float) -> Self {
        let mut order: Vec<usize> = (0..swarm.n_particles()).collect();
        order.sort_by(|&a, &b| {
            swarm.particles[a]
                .position
                .total_cmp(&swarm.particles[b].position)
        });
        Self {
            n_elite: elite_count(order.len(), cut_ratio),
            order,
        }
    }

    /// The indices of the elite particles, best first.
    pub fn elite(&self) -> &[usize] {
        &self.order[..self.n_elite]
    }

    /// The elite indices grouped into consecutive breeding pairs `(rank 2i, rank 2i + 1)`. An odd
    /// last elite particle has no partner.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.elite()
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
    }
}

/// The number of elite particles in a swarm of `n_particles` for the given cut ratio.
pub fn elite_count(n_particles: usize, cut_ratio: Float) -> usize {
    ((n_particles as Float * cut_ratio).floor() as usize).min(n_particles)
}
