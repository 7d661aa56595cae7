use serde::{Deserialize, Serialize};

use crate::{
    algorithms::particles::Swarm,
    core::Point,
    traits::Status,
    DVector, Float,
};

/// A status for the hybrid PSO/GA algorithm.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HybridStatus {
    /// The swarm
    pub swarm: Swarm,
    /// The global best position found by all particles
    pub gbest: Point<DVector<Float>>,
    /// The (zero-based) iteration at which [`HybridStatus::gbest`] last improved
    pub gbest_iteration: usize,
    /// The global-best value sampled every `record_interval` iterations
    pub history: Vec<(usize, Float)>,
    /// A message containing information about the condition of the run
    pub message: String,
    /// An indicator of whether a terminator flagged the run as converged
    pub converged: bool,
    /// The number of objective evaluations
    pub cost_evals: usize,
    /// The number of breeding pairs crossed over so far
    pub n_crossovers: usize,
    /// The number of coordinates mutated so far
    pub n_mutations: usize,
}

impl HybridStatus {
    /// The best objective value found so far, or [`Float::INFINITY`] before initialization.
    pub fn best_value(&self) -> Float {
        self.gbest.fx.unwrap_or(Float::INFINITY)
    }
}

impl Status for HybridStatus {
    fn reset(&mut self) {
        *self = Self::default();
    }
    fn converged(&self) -> bool {
        self.converged
    }
    fn message(&self) -> &str {
        &self.message
    }
    fn update_message(&mut self, message: &str) {
        self.message = message.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_clears_everything() {
        let mut status = HybridStatus {
            gbest: Point {
                x: DVector::zeros(2),
                fx: Some(1.0),
            },
            gbest_iteration: 3,
            history: vec![(0, 1.0)],
            converged: true,
            cost_evals: 10,
            ..Default::default()
        };
        status.update_message("done");
        assert_eq!(status.message(), "done");
        assert_eq!(status.best_value(), 1.0);
        status.reset();
        assert!(!status.converged());
        assert!(status.message().is_empty());
        assert!(status.history.is_empty());
        assert_eq!(status.cost_evals, 0);
        assert_eq!(status.best_value(), Float::INFINITY);
    }
}
