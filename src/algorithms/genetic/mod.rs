/// [`CrossoverMethod`] type for exchanging components between breeding pairs.
pub mod crossover;
pub use crossover::CrossoverMethod;

/// [`Mutation`] type for the decaying boundary mutation.
pub mod mutation;
pub use mutation::Mutation;

/// [`Ranking`] type for the ranked view of a swarm.
pub mod population;
pub use population::Ranking;

/// [`SelectionMethod`] type for resampling a swarm.
pub mod selection;
pub use selection::SelectionMethod;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    algorithms::particles::Swarm,
    core::{Function, HybridConfig, RunContext},
    Float,
};

/// The genetic layer of a hybrid run, applied to the swarm after every PSO iteration.
///
/// One pass ranks the swarm by the value at each particle's current position, optionally
/// resamples the whole swarm with the [`SelectionMethod`] (and ranks it again), crosses over
/// consecutive elite pairs and finally mutates every elite particle. Personal bests are never
/// modified, so the global best cannot get worse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneticLayer {
    /// The fraction of the ranked swarm open to crossover and mutation
    pub cut_ratio: Float,
    /// The per-pair crossover probability
    pub crossover_probability: Float,
    /// The crossover operator
    pub crossover: CrossoverMethod,
    /// The selection operator
    pub selection: SelectionMethod,
    /// The mutation operator
    pub mutation: Mutation,
}

/// What one genetic pass did to the swarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneticReport {
    /// Whether the swarm was resampled
    pub selected: bool,
    /// The number of elite particles
    pub n_elite: usize,
    /// The number of breeding pairs that were crossed over
    pub n_crossovers: usize,
    /// The number of coordinates that were mutated
    pub n_mutations: usize,
    /// The number of objective evaluations needed to refresh the changed particles
    pub cost_evals: usize,
}

impl GeneticLayer {
    /// Build the genetic layer described by a run configuration.
    pub fn new(config: &HybridConfig, func: &Function) -> Self {
        Self {
            cut_ratio: config.cut_ratio,
            crossover_probability: config.crossover_probability,
            crossover: config.crossover,
            selection: config.selection,
            mutation: Mutation::for_function(config.mutation_probability, func),
        }
    }

    /// Run one genetic pass over the swarm at iteration `ctx.iteration`.
    ///
    /// Changed particles are evaluated again at the end of the pass and every neighborhood best
    /// is recomputed, since neighborhoods refer to particles by index.
    pub fn evolve(&self, swarm: &mut Swarm, func: &Function, ctx: &mut RunContext) -> GeneticReport {
        let mut ranking = Ranking::new(swarm, self.cut_ratio);
        let selected = match self.selection.select(swarm, &ranking, &mut ctx.rng) {
            Some(indices) => {
                swarm.resample(&indices);
                ranking = Ranking::new(swarm, self.cut_ratio);
                true
            }
            None => false,
        };
        let n_crossovers = self.crossover.crossover(
            swarm,
            &ranking,
            self.crossover_probability,
            &mut ctx.rng,
        );
        let n_mutations =
            self.mutation
                .mutate_elite(swarm, &ranking, ctx.progress(), &mut ctx.rng);
        let cost_evals = swarm.reevaluate(func);
        swarm.update_neighborhood_bests();
        let report = GeneticReport {
            selected,
            n_elite: ranking.n_elite,
            n_crossovers,
            n_mutations,
            cost_evals,
        };
        trace!(
            iteration = ctx.iteration,
            selected,
            n_elite = report.n_elite,
            n_crossovers,
            n_mutations,
            "genetic pass"
        );
        report
    }
}
