use std::{fmt::Display, str::FromStr};

use fastrand::Rng;
use logsumexp::LogSumExp;
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::{genetic::Ranking, particles::Swarm},
    core::{utils::RandChoice, HybridError},
    Float,
};

/// Methods which resample the whole swarm (with replacement) before crossover and mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionMethod {
    /// Keep the swarm as it is
    #[default]
    None,
    /// Draw each slot with a probability proportional to `N - r` for rank `r` (`0` is best)
    Rank,
    /// Fill each slot with the better of two distinct uniformly drawn particles
    Tournament,
    /// Draw each slot with probability proportional to `exp(f)`, where `f` is the value at the
    /// particle's position
    ///
    /// <div class="warning">Larger values are more likely to be drawn, which favors worse
    /// particles when minimizing.</div>
    Boltzmann,
}

impl SelectionMethod {
    /// The short code of the method (`none`, `rs`, `ts`, `bs`).
    pub const fn code(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Rank => "rs",
            Self::Tournament => "ts",
            Self::Boltzmann => "bs",
        }
    }

    /// Check that a swarm of `n_particles` can be resampled with this method.
    ///
    /// # Errors
    ///
    /// Tournament selection needs two distinct particles and returns
    /// [`HybridError::SwarmTooSmall`] for smaller swarms.
    pub fn validate(&self, n_particles: usize) -> Result<(), HybridError> {
        if matches!(self, Self::Tournament) && n_particles < 2 {
            return Err(HybridError::SwarmTooSmall {
                topology: "tournament selection",
                required: 2,
                n_particles,
            });
        }
        Ok(())
    }

    /// Draw `N` particle indices for the next population, or [`None`] if the method keeps the
    /// swarm as it is.
    pub fn select(&self, swarm: &Swarm, ranking: &Ranking, rng: &mut Rng) -> Option<Vec<usize>> {
        let n = swarm.n_particles();
        match self {
            Self::None => None,
            Self::Rank => {
                let weights = rank_weights(n);
                Some(
                    (0..n)
                        .map(|_| ranking.order[rng.choice_weighted(&weights).unwrap_or(n - 1)])
                        .collect(),
                )
            }
            Self::Tournament => Some((0..n).map(|_| tournament(swarm, rng)).collect()),
            Self::Boltzmann => {
                let weights = boltzmann_weights(swarm);
                Some(
                    (0..n)
                        .map(|_| rng.choice_weighted(&weights).unwrap_or(n - 1))
                        .collect(),
                )
            }
        }
    }
}

/// Weights `N - r` for ranks `r = 0..N`.
pub fn rank_weights(n: usize) -> Vec<Float> {
    (0..n).map(|r| (n - r) as Float).collect()
}

/// Normalized weights `exp(f_i) / sum_j exp(f_j)` over the values at the particles' positions,
/// computed through log-sum-exp. A `NaN` value leaves the distribution undefined and every
/// weight is `NaN`.
pub fn boltzmann_weights(swarm: &Swarm) -> Vec<Float> {
    let values: Vec<Float> = swarm.particles.iter().map(|p| p.fitness()).collect();
    if values.iter().any(|value| value.is_nan()) {
        return vec![Float::NAN; values.len()];
    }
    let normalization = values.iter().ln_sum_exp();
    values
        .iter()
        .map(|value| Float::exp(value - normalization))
        .collect()
}

fn tournament(swarm: &Swarm, rng: &mut Rng) -> usize {
    let n = swarm.n_particles();
    let first = rng.usize(0..n);
    let mut second = rng.usize(0..n - 1);
    if second >= first {
        second += 1;
    }
    if swarm.particles[second]
        .position
        .improves_on(&swarm.particles[first].position)
    {
        second
    } else {
        first
    }
}

impl Display for SelectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Rank => "rank",
            Self::Tournament => "tournament",
            Self::Boltzmann => "Boltzmann",
        };
        f.write_str(name)
    }
}

impl FromStr for SelectionMethod {
    type Err = HybridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "rs" | "rank" => Ok(Self::Rank),
            "ts" | "tournament" => Ok(Self::Tournament),
            "bs" | "boltzmann" => Ok(Self::Boltzmann),
            _ => Err(HybridError::UnknownSelection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algorithms::particles::{SwarmParticle, SwarmTopology},
        core::{Function, FunctionKind},
    };
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    fn swarm_at(xs: &[Float]) -> Swarm {
        let func = Function::new(FunctionKind::Zakharov, 1).unwrap();
        let particles = xs
            .iter()
            .map(|&x| SwarmParticle::new(dvector![x].into(), dvector![0.0], &func))
            .collect();
        Swarm::from_particles(particles, SwarmTopology::Global, &mut Rng::with_seed(0)).unwrap()
    }

    fn counts(selected: &[usize], n: usize) -> Vec<usize> {
        let mut counts = vec![0; n];
        for &i in selected {
            counts[i] += 1;
        }
        counts
    }

    #[test]
    fn test_parse() {
        assert_eq!("none".parse::<SelectionMethod>().unwrap(), SelectionMethod::None);
        assert_eq!("rs".parse::<SelectionMethod>().unwrap(), SelectionMethod::Rank);
        assert_eq!("TS".parse::<SelectionMethod>().unwrap(), SelectionMethod::Tournament);
        assert_eq!("bs".parse::<SelectionMethod>().unwrap(), SelectionMethod::Boltzmann);
        assert_eq!(
            "roulette".parse::<SelectionMethod>().unwrap_err(),
            HybridError::UnknownSelection("roulette".to_string())
        );
    }

    #[test]
    fn test_none_keeps_swarm() {
        let swarm = swarm_at(&[1.0, 2.0]);
        let ranking = Ranking::new(&swarm, 0.0);
        assert!(SelectionMethod::None
            .select(&swarm, &ranking, &mut Rng::with_seed(0))
            .is_none());
    }

    #[test]
    fn test_rank_selection_favors_better_ranks() {
        // best particle sits at the last index
        let swarm = swarm_at(&[3.0, 2.0, 1.0, 0.0]);
        let ranking = Ranking::new(&swarm, 0.0);
        let mut rng = Rng::with_seed(1);
        let mut selected = Vec::new();
        for _ in 0..2500 {
            selected.extend(SelectionMethod::Rank.select(&swarm, &ranking, &mut rng).unwrap());
        }
        let counts = counts(&selected, 4);
        // expected shares 4:3:2:1 for indices 3, 2, 1, 0
        assert!(counts[3] > counts[2] && counts[2] > counts[1] && counts[1] > counts[0]);
        assert!(counts.iter().all(|&c| c > 0));
        assert_relative_eq!(counts[3] as Float / 10_000.0, 0.4, epsilon = 0.03);
    }

    #[test]
    fn test_tournament_reaches_every_particle_but_the_worst() {
        let swarm = swarm_at(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let ranking = Ranking::new(&swarm, 0.0);
        let mut rng = Rng::with_seed(2);
        let mut selected = Vec::new();
        for _ in 0..1000 {
            selected.extend(
                SelectionMethod::Tournament
                    .select(&swarm, &ranking, &mut rng)
                    .unwrap(),
            );
        }
        let counts = counts(&selected, 5);
        // the worst particle loses every tournament, the last index of the best four still wins some
        assert_eq!(counts[4], 0);
        assert!(counts[..4].iter().all(|&c| c > 0));
        assert!(counts[0] > counts[1] && counts[1] > counts[2] && counts[2] > counts[3]);
    }

    #[test]
    fn test_tournament_can_pick_the_last_index() {
        let swarm = swarm_at(&[4.0, 3.0, 2.0, 1.0, 0.0]);
        let ranking = Ranking::new(&swarm, 0.0);
        let mut rng = Rng::with_seed(3);
        let selected: Vec<usize> = (0..20)
            .flat_map(|_| {
                SelectionMethod::Tournament
                    .select(&swarm, &ranking, &mut rng)
                    .unwrap()
            })
            .collect();
        assert!(selected.contains(&4));
    }

    #[test]
    fn test_tournament_needs_two_particles() {
        assert!(SelectionMethod::Tournament.validate(1).is_err());
        assert!(SelectionMethod::Tournament.validate(2).is_ok());
        assert!(SelectionMethod::Rank.validate(1).is_ok());
    }

    #[test]
    fn test_boltzmann_weights_are_normalized() {
        let swarm = swarm_at(&[0.0, 1.0, 2.0]);
        let weights = boltzmann_weights(&swarm);
        assert_relative_eq!(weights.iter().sum::<Float>(), 1.0, epsilon = 1e-12);
        let values: Vec<Float> = swarm.particles.iter().map(|p| p.fitness()).collect();
        assert_relative_eq!(weights[2] / weights[0], Float::exp(values[2] - values[0]), max_relative = 1e-9);
    }

    #[test]
    fn test_boltzmann_prefers_larger_values() {
        // Boltzmann weights grow with the objective value, so the worst particle dominates
        let swarm = swarm_at(&[0.0, 1.0, 2.0]);
        let ranking = Ranking::new(&swarm, 0.0);
        let mut rng = Rng::with_seed(4);
        let mut selected = Vec::new();
        for _ in 0..1000 {
            selected.extend(
                SelectionMethod::Boltzmann
                    .select(&swarm, &ranking, &mut rng)
                    .unwrap(),
            );
        }
        let counts = counts(&selected, 3);
        assert!(counts[2] > counts[1] && counts[1] > counts[0]);
    }

    #[test]
    fn test_boltzmann_nan_falls_to_last_particle() {
        let mut swarm = swarm_at(&[0.0, 1.0, 2.0]);
        swarm.particles[0].position.fx = Some(Float::NAN);
        let ranking = Ranking::new(&swarm, 0.0);
        let selected = SelectionMethod::Boltzmann
            .select(&swarm, &ranking, &mut Rng::with_seed(5))
            .unwrap();
        assert_eq!(selected, vec![2, 2, 2]);
    }
}
