use fastrand::Rng;

/// The mutable, run-scoped state threaded through every stage of a hybrid run: the single
/// random source and the iteration counter.
///
/// All randomness of a run is drawn from [`RunContext::rng`], in the order velocity vectors,
/// selection, crossover, mutation, so two runs with the same seed and configuration are
/// identical.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// The random number generator of the run.
    pub rng: Rng,
    /// The current (zero-based) iteration.
    pub iteration: usize,
    /// The total number of iterations the run is configured for.
    pub max_iterations: usize,
}

impl RunContext {
    /// Create a new context. A `seed` of [`None`] seeds the generator from entropy.
    pub fn new(seed: Option<u64>, max_iterations: usize) -> Self {
        Self {
            rng: seed.map_or_else(Rng::new, Rng::with_seed),
            iteration: 0,
            max_iterations,
        }
    }

    /// The fraction of the run that has elapsed, $`t / T`$.
    pub fn progress(&self) -> crate::Float {
        if self.max_iterations == 0 {
            return 1.0;
        }
        self.iteration as crate::Float / self.max_iterations as crate::Float
    }
}
