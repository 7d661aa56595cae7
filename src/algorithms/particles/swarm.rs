use crate::{
    algorithms::particles::{topology::random_neighborhood, SwarmParticle, SwarmTopology},
    core::{utils::SampleFloat, Function, HybridError, Point, RunContext},
    DVector, Float,
};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A swarm of particles together with its neighborhood structure and best-so-far tracking.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Swarm {
    /// A list of the particles in the swarm
    pub particles: Vec<SwarmParticle>,
    /// The topology used by the swarm
    pub topology: SwarmTopology,
    /// The member indices of each neighborhood (the seed particle first)
    pub neighborhoods: Vec<Vec<usize>>,
    /// The best personal best of each neighborhood, indexed like
    /// [`Swarm::neighborhoods`]
    pub neighborhood_bests: Vec<Point<DVector<Float>>>,
    /// The best position ever found by any particle
    pub gbest: Point<DVector<Float>>,
    /// The number of objective evaluations performed by the swarm
    pub cost_evals: usize,
}

impl Swarm {
    /// Create `n_particles` random particles, build the neighborhoods of the given topology, and
    /// compute the initial neighborhood and global bests.
    ///
    /// # Errors
    ///
    /// Returns a [`HybridError`] if the topology cannot be built for `n_particles` particles. See
    /// [`SwarmTopology::build`].
    pub fn new(
        func: &Function,
        topology: SwarmTopology,
        n_particles: usize,
        rng: &mut Rng,
    ) -> Result<Self, HybridError> {
        let particles = (0..n_particles)
            .map(|_| SwarmParticle::random(func, rng))
            .collect();
        Self::from_particles(particles, topology, rng)
    }

    /// Build a swarm around existing (evaluated) particles.
    ///
    /// # Errors
    ///
    /// See [`SwarmTopology::build`].
    pub fn from_particles(
        particles: Vec<SwarmParticle>,
        topology: SwarmTopology,
        rng: &mut Rng,
    ) -> Result<Self, HybridError> {
        let neighborhoods = topology.build(particles.len(), rng)?;
        let mut swarm = Self {
            cost_evals: particles.len(),
            particles,
            topology,
            neighborhood_bests: Vec::new(),
            neighborhoods,
            gbest: Point::default(),
        };
        swarm.refresh_bests();
        Ok(swarm)
    }

    /// The number of particles in the swarm.
    pub fn n_particles(&self) -> usize {
        self.particles.len()
    }

    /// The index of the particle with the lowest personal best among `indices`. Ties go to the
    /// first minimum encountered.
    ///
    /// # Panics
    ///
    /// This method panics if `indices` is empty.
    pub fn best_index<I>(&self, indices: I) -> usize
    where
        I: IntoIterator<Item = usize>,
    {
        let mut indices = indices.into_iter();
        #[allow(clippy::expect_used)]
        let mut best = indices.next().expect("Neighborhood has zero size!");
        for index in indices {
            if self.particles[index]
                .best
                .improves_on(&self.particles[best].best)
            {
                best = index;
            }
        }
        best
    }

    /// Recompute the best personal best of every neighborhood.
    pub fn update_neighborhood_bests(&mut self) {
        if matches!(self.topology, SwarmTopology::Global) {
            self.neighborhood_bests = vec![self.gbest.clone()];
            return;
        }
        self.neighborhood_bests = (0..self.neighborhoods.len())
            .map(|i| self.neighborhood_best(i))
            .collect();
    }

    fn neighborhood_best(&self, neighborhood: usize) -> Point<DVector<Float>> {
        let best = self.best_index(self.neighborhoods[neighborhood].iter().copied());
        self.particles[best].best.clone()
    }

    /// Replace the global best by the best personal best in the swarm if the latter is strictly
    /// better. Returns `true` if the global best changed.
    pub fn update_global_best(&mut self) -> bool {
        let best = self.best_index(0..self.n_particles());
        if self.particles[best].best.improves_on(&self.gbest) {
            self.gbest = self.particles[best].best.clone();
            return true;
        }
        false
    }

    /// Update the global best and then every neighborhood best. Returns `true` if the global best
    /// changed.
    pub fn refresh_bests(&mut self) -> bool {
        let improved = self.update_global_best();
        self.update_neighborhood_bests();
        improved
    }

    /// Rebuild each random neighborhood with the topology's rewiring probability and recompute
    /// the bests of the rebuilt neighborhoods. Other topologies are left untouched.
    pub fn rewire(&mut self, rng: &mut Rng) -> usize {
        let SwarmTopology::Random {
            size,
            rewire_probability,
        } = self.topology
        else {
            return 0;
        };
        let n_particles = self.n_particles();
        let mut rewired = 0;
        for i in 0..n_particles {
            if rng.float() < rewire_probability {
                self.neighborhoods[i] = random_neighborhood(i, size, n_particles, rng);
                self.neighborhood_bests[i] = self.neighborhood_best(i);
                rewired += 1;
            }
        }
        rewired
    }

    /// Perform one PSO iteration.
    ///
    /// With the global topology every particle is attracted to the global best. Otherwise
    /// (after rewiring random neighborhoods) particle `i` is attracted to the best of the
    /// neighborhood it seeds, with all references taken before any particle moves. All bests are
    /// recomputed afterwards. Returns `true` if the global best strictly improved.
    pub fn step(&mut self, func: &Function, ctx: &mut RunContext) -> bool {
        let rewired = self.rewire(&mut ctx.rng);
        if rewired > 0 {
            trace!(rewired, "rebuilt random neighborhoods");
        }
        match self.topology {
            SwarmTopology::Global => {
                let reference = self.gbest.x.clone();
                for particle in &mut self.particles {
                    particle.update(&reference, func, &mut ctx.rng);
                }
            }
            _ => {
                for (particle, reference) in
                    self.particles.iter_mut().zip(&self.neighborhood_bests)
                {
                    particle.update(&reference.x, func, &mut ctx.rng);
                }
            }
        }
        self.cost_evals += self.n_particles();
        self.refresh_bests()
    }

    /// Replace the particle set by copies of the particles at `indices` (in that order). The
    /// global best is kept, neighborhood bests are recomputed by the caller.
    pub fn resample(&mut self, indices: &[usize]) {
        self.particles = indices
            .iter()
            .map(|&index| self.particles[index].clone())
            .collect();
    }

    /// Evaluate every particle whose position was changed outside of the PSO update. Returns the
    /// number of evaluations.
    pub fn reevaluate(&mut self, func: &Function) -> usize {
        let evaluations = self
            .particles
            .iter_mut()
            .map(|particle| particle.reevaluate(func))
            .filter(|&evaluated| evaluated)
            .count();
        self.cost_evals += evaluations;
        evaluations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FunctionKind;
    use nalgebra::dvector;

    fn fixed_particle(func: &Function, x: Float) -> SwarmParticle {
        SwarmParticle::new(dvector![x, x].into(), dvector![0.0, 0.0], func)
    }

    #[test]
    fn test_best_index_is_first_minimum() {
        let func = Function::new(FunctionKind::Zakharov, 2).unwrap();
        let particles = vec![
            fixed_particle(&func, 3.0),
            fixed_particle(&func, 1.0),
            fixed_particle(&func, 2.0),
            fixed_particle(&func, 1.0),
        ];
        let mut rng = Rng::with_seed(0);
        let swarm = Swarm::from_particles(particles, SwarmTopology::Global, &mut rng).unwrap();
        assert_eq!(swarm.best_index(0..4), 1);
        assert_eq!(swarm.best_index([3, 1, 0]), 3);
        assert_eq!(swarm.best_index([2, 0]), 2);
        assert_eq!(swarm.gbest.x, dvector![1.0, 1.0]);
    }

    #[test]
    fn test_ring_neighborhood_bests() {
        let func = Function::new(FunctionKind::Zakharov, 2).unwrap();
        let particles = [4.0, 0.5, 3.0, 2.0, 1.0]
            .iter()
            .map(|&x| fixed_particle(&func, x))
            .collect();
        let mut rng = Rng::with_seed(1);
        let swarm = Swarm::from_particles(particles, SwarmTopology::ring(), &mut rng).unwrap();
        let best_x: Vec<Float> = swarm.neighborhood_bests.iter().map(|p| p.x[0]).collect();
        // windows [0,1,2], [1,2,3], [2,3,4], [3,4,0], [4,0,1]
        assert_eq!(best_x, vec![0.5, 0.5, 1.0, 1.0, 0.5]);
        assert_eq!(swarm.gbest.x[0], 0.5);
    }

    #[test]
    fn test_global_neighborhood_tracks_gbest() {
        let func = Function::new(FunctionKind::Rastrigin, 2).unwrap();
        let mut ctx = RunContext::new(Some(2), 50);
        let mut swarm = Swarm::new(&func, SwarmTopology::Global, 10, &mut ctx.rng).unwrap();
        for _ in 0..50 {
            swarm.step(&func, &mut ctx);
            assert_eq!(swarm.neighborhood_bests.len(), 1);
            assert_eq!(swarm.neighborhood_bests[0].x, swarm.gbest.x);
            assert_eq!(swarm.neighborhood_bests[0].fx, swarm.gbest.fx);
        }
        assert_eq!(swarm.cost_evals, 10 * 51);
    }

    #[test]
    fn test_gbest_survives_resampling() {
        let func = Function::new(FunctionKind::Zakharov, 2).unwrap();
        let particles = vec![fixed_particle(&func, 0.0), fixed_particle(&func, 2.0)];
        let mut rng = Rng::with_seed(3);
        let mut swarm = Swarm::from_particles(particles, SwarmTopology::Global, &mut rng).unwrap();
        swarm.resample(&[1, 1]);
        assert!(!swarm.refresh_bests());
        assert_eq!(swarm.gbest.fx, Some(0.0));
        assert_eq!(swarm.particles[0].best.x, dvector![2.0, 2.0]);
    }

    #[test]
    fn test_rewire_keeps_neighborhoods_valid() {
        let func = Function::new(FunctionKind::Ackley, 3).unwrap();
        let mut ctx = RunContext::new(Some(4), 100);
        let topology = SwarmTopology::Random {
            size: 5,
            rewire_probability: 1.0,
        };
        let mut swarm = Swarm::new(&func, topology, 12, &mut ctx.rng).unwrap();
        assert_eq!(swarm.rewire(&mut ctx.rng), 12);
        for (i, neighborhood) in swarm.neighborhoods.iter().enumerate() {
            assert_eq!(neighborhood[0], i);
            assert_eq!(neighborhood.len(), 5);
            let best = swarm.best_index(neighborhood.iter().copied());
            assert_eq!(swarm.neighborhood_bests[i].fx, swarm.particles[best].best.fx);
        }
    }

    #[test]
    fn test_non_random_topologies_never_rewire() {
        let func = Function::new(FunctionKind::Ackley, 3).unwrap();
        let mut rng = Rng::with_seed(5);
        let mut swarm = Swarm::new(&func, SwarmTopology::ring(), 6, &mut rng).unwrap();
        let before = swarm.neighborhoods.clone();
        assert_eq!(swarm.rewire(&mut rng), 0);
        assert_eq!(swarm.neighborhoods, before);
    }
}
