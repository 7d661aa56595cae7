use std::{fmt::Display, str::FromStr};

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::{genetic::Ranking, particles::{Swarm, SwarmParticle}},
    core::{utils::SampleFloat, HybridError},
    Float,
};

/// Methods for exchanging position and velocity components between two particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CrossoverMethod {
    /// Swap every component from a uniformly drawn cut dimension to the end
    #[default]
    OnePoint,
    /// Swap each component independently with probability `0.5`
    Uniform,
}

impl CrossoverMethod {
    /// The short code of the method (`1c`, `uc`).
    pub const fn code(&self) -> &'static str {
        match self {
            Self::OnePoint => "1c",
            Self::Uniform => "uc",
        }
    }

    /// Cross two particles over, returning the number of swapped dimensions.
    pub fn apply(&self, a: &mut SwarmParticle, b: &mut SwarmParticle, rng: &mut Rng) -> usize {
        let dimension = a.position.dimension();
        match self {
            Self::OnePoint => {
                let cut = rng.usize(0..dimension);
                for index in cut..dimension {
                    a.swap_dimension(b, index);
                }
                dimension - cut
            }
            Self::Uniform => {
                let mut swapped = 0;
                for index in 0..dimension {
                    if rng.float() < 0.5 {
                        a.swap_dimension(b, index);
                        swapped += 1;
                    }
                }
                swapped
            }
        }
    }

    /// Cross over each elite breeding pair of the ranking with probability `probability`.
    /// Returns the number of pairs that were crossed over.
    pub fn crossover(
        &self,
        swarm: &mut Swarm,
        ranking: &Ranking,
        probability: Float,
        rng: &mut Rng,
    ) -> usize {
        let mut crossed = 0;
        for (i, j) in ranking.pairs() {
            if rng.float() < probability {
                let (a, b) = pair_mut(&mut swarm.particles, i, j);
                self.apply(a, b, rng);
                crossed += 1;
            }
        }
        crossed
    }
}

/// Borrow two distinct elements of a slice mutably.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

impl Display for CrossoverMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OnePoint => f.write_str("one-point"),
            Self::Uniform => f.write_str("uniform"),
        }
    }
}

impl FromStr for CrossoverMethod {
    type Err = HybridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "1c" | "one-point" | "onepoint" => Ok(Self::OnePoint),
            "uc" | "uniform" => Ok(Self::Uniform),
            _ => Err(HybridError::UnknownCrossover(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{Function, FunctionKind},
        DVector,
    };

    fn particle(value: Float, dimension: usize, func: &Function) -> SwarmParticle {
        SwarmParticle::new(
            DVector::from_element(dimension, value).into(),
            DVector::from_element(dimension, -value),
            func,
        )
    }

    #[test]
    fn test_parse() {
        assert_eq!("1c".parse::<CrossoverMethod>().unwrap(), CrossoverMethod::OnePoint);
        assert_eq!("UC".parse::<CrossoverMethod>().unwrap(), CrossoverMethod::Uniform);
        assert_eq!(
            "2c".parse::<CrossoverMethod>().unwrap_err(),
            HybridError::UnknownCrossover("2c".to_string())
        );
    }

    #[test]
    fn test_pair_mut() {
        let mut items = [1, 2, 3, 4];
        let (a, b) = pair_mut(&mut items, 3, 1);
        std::mem::swap(a, b);
        assert_eq!(items, [1, 4, 3, 2]);
    }

    #[test]
    fn test_one_point_swaps_a_suffix() {
        let func = Function::new(FunctionKind::Rastrigin, 8).unwrap();
        let mut rng = Rng::with_seed(0);
        for _ in 0..50 {
            let mut a = particle(1.0, 8, &func);
            let mut b = particle(2.0, 8, &func);
            let swapped = CrossoverMethod::OnePoint.apply(&mut a, &mut b, &mut rng);
            assert!((1..=8).contains(&swapped));
            let cut = 8 - swapped;
            for k in 0..8 {
                let (pa, pb) = if k < cut { (1.0, 2.0) } else { (2.0, 1.0) };
                assert_eq!(a.position.x[k], pa);
                assert_eq!(b.position.x[k], pb);
                assert_eq!(a.velocity[k], -pa);
                assert_eq!(b.velocity[k], -pb);
            }
            assert!(a.position.fx.is_none() && b.position.fx.is_none());
            // personal bests are untouched
            assert!(a.best.x.iter().all(|&x| x == 1.0));
        }
    }

    #[test]
    fn test_uniform_swaps_half_the_dimensions() {
        let func = Function::new(FunctionKind::Rastrigin, 100).unwrap();
        let mut rng = Rng::with_seed(1);
        let mut total = 0;
        for _ in 0..100 {
            let mut a = particle(1.0, 100, &func);
            let mut b = particle(2.0, 100, &func);
            let swapped = CrossoverMethod::Uniform.apply(&mut a, &mut b, &mut rng);
            let moved = a.position.x.iter().filter(|&&x| x == 2.0).count();
            assert_eq!(moved, swapped);
            assert_eq!(
                a.velocity.iter().filter(|&&v| v == -2.0).count(),
                swapped
            );
            total += swapped;
        }
        let rate = total as Float / 10_000.0;
        assert!((rate - 0.5).abs() < 0.03, "swap rate {rate}");
    }

    #[test]
    fn test_crossover_only_touches_elite_pairs() {
        let func = Function::new(FunctionKind::Zakharov, 4).unwrap();
        let mut rng = Rng::with_seed(2);
        let particles = (0..6).map(|i| particle(i as Float, 4, &func)).collect();
        let mut swarm = Swarm::from_particles(
            particles,
            crate::algorithms::particles::SwarmTopology::Global,
            &mut rng,
        )
        .unwrap();
        // elite = indices 0, 1, 2 -> one pair (0, 1)
        let ranking = Ranking::new(&swarm, 0.5);
        assert_eq!(ranking.n_elite, 3);
        let crossed = CrossoverMethod::Uniform.crossover(&mut swarm, &ranking, 1.0, &mut rng);
        assert_eq!(crossed, 1);
        for i in 2..6 {
            assert!(swarm.particles[i]
                .position
                .x
                .iter()
                .all(|&x| x == i as Float));
        }
        assert_eq!(
            CrossoverMethod::OnePoint.crossover(&mut swarm, &ranking, 0.0, &mut rng),
            0
        );
    }
}
