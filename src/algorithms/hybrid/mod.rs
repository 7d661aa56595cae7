/// [`HybridStatus`] type holding the state of a hybrid run.
pub mod status;
pub use status::HybridStatus;

use std::time::Instant;

use fastrand::Rng;
use tracing::{debug, info, trace};

use crate::{
    algorithms::{genetic::GeneticLayer, particles::Swarm},
    core::{Callbacks, Function, HybridConfig, HybridError, HybridSummary, MaxSteps, RunContext},
    traits::{Algorithm, Status},
};

/// The hybrid PSO/GA minimizer.
///
/// Every step moves the swarm once with the constricted PSO update and then runs one
/// [`GeneticLayer`] pass over it. The global best value is sampled into the run history every
/// [`HybridConfig::record_interval`] steps, starting with step `0`.
///
/// All configuration is checked by [`Hybrid::new`], so a constructed [`Hybrid`] never fails
/// while running.
#[derive(Debug, Clone)]
pub struct Hybrid {
    config: HybridConfig,
    function: Function,
    genetic: GeneticLayer,
    ctx: RunContext,
    start: Option<Instant>,
}

impl Hybrid {
    /// Create a new hybrid minimizer from a run configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`HybridError`] if the configuration is invalid (see
    /// [`HybridConfig::validate`]) or if the swarm size does not fit the topology (see
    /// [`SwarmTopology::build`](crate::algorithms::particles::SwarmTopology::build)).
    pub fn new(config: HybridConfig) -> Result<Self, HybridError> {
        config.validate()?;
        config
            .topology
            .build(config.n_particles, &mut Rng::with_seed(0))?;
        let function = config.build_function()?;
        let genetic = GeneticLayer::new(&config, &function);
        let ctx = RunContext::new(config.seed, config.max_iterations);
        Ok(Self {
            config,
            function,
            genetic,
            ctx,
            start: None,
        })
    }

    /// The configuration of the run.
    pub const fn config(&self) -> &HybridConfig {
        &self.config
    }

    /// The objective being minimized.
    pub const fn function(&self) -> &Function {
        &self.function
    }

    /// The callbacks used by [`Hybrid::run`]: stop after [`HybridConfig::max_iterations`] steps.
    pub fn default_callbacks(&self) -> Callbacks<Self, HybridStatus> {
        Callbacks::empty().with_terminator(MaxSteps(self.config.max_iterations))
    }

    /// Run the full configured number of iterations.
    ///
    /// # Errors
    ///
    /// This method does not fail for a [`Hybrid`] built through [`Hybrid::new`]; the [`Result`]
    /// follows [`Algorithm::process`].
    pub fn run(&mut self) -> Result<HybridSummary, HybridError> {
        let callbacks = self.default_callbacks();
        self.process(callbacks)
    }
}

impl Algorithm<HybridStatus, HybridError> for Hybrid {
    type Summary = HybridSummary;

    fn initialize(&mut self, status: &mut HybridStatus) -> Result<(), HybridError> {
        self.ctx = RunContext::new(self.config.seed, self.config.max_iterations);
        self.start = Some(Instant::now());
        status.swarm = Swarm::new(
            &self.function,
            self.config.topology,
            self.config.n_particles,
            &mut self.ctx.rng,
        )?;
        status.gbest = status.swarm.gbest.clone();
        status.cost_evals = status.swarm.cost_evals;
        debug!(
            function = %self.function.kind(),
            dimension = self.function.dimension(),
            chi = self.function.constriction_factor(),
            topology = %self.config.topology,
            n_particles = self.config.n_particles,
            initial_best = status.best_value(),
            "initialized hybrid run"
        );
        status.update_message("Initialized");
        Ok(())
    }

    fn step(&mut self, current_step: usize, status: &mut HybridStatus) -> Result<(), HybridError> {
        self.ctx.iteration = current_step;
        if status.swarm.step(&self.function, &mut self.ctx) {
            status.gbest_iteration = current_step;
            trace!(
                step = current_step,
                fx = status.swarm.gbest.fx_checked(),
                "global best improved"
            );
        }
        let report = self
            .genetic
            .evolve(&mut status.swarm, &self.function, &mut self.ctx);
        status.gbest = status.swarm.gbest.clone();
        status.cost_evals = status.swarm.cost_evals;
        status.n_crossovers += report.n_crossovers;
        status.n_mutations += report.n_mutations;
        if current_step % self.config.record_interval == 0 {
            status.history.push((current_step, status.best_value()));
        }
        Ok(())
    }

    fn summarize(
        &self,
        current_step: usize,
        status: &HybridStatus,
    ) -> Result<Self::Summary, HybridError> {
        let duration = self.start.map(|start| start.elapsed()).unwrap_or_default();
        let summary = HybridSummary {
            function: self.function.kind(),
            cut_ratio: self.config.cut_ratio,
            fx: status.best_value(),
            x: status.gbest.x.iter().copied().collect(),
            gbest_iteration: status.gbest_iteration,
            iterations: current_step + 1,
            duration,
            history: status.history.clone(),
            cost_evals: status.cost_evals,
            message: status.message().to_string(),
            converged: status.converged(),
        };
        info!(
            fx = summary.fx,
            gbest_iteration = summary.gbest_iteration,
            iterations = summary.iterations,
            ?duration,
            "hybrid run finished"
        );
        Ok(summary)
    }

    fn reset(&mut self) {
        self.ctx = RunContext::new(self.config.seed, self.config.max_iterations);
        self.start = None;
    }
}
