use crate::{
    core::{
        utils::generate_random_vector,
        Function, Point,
    },
    DVector, Float,
};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A particle with a position, velocity, and best known position
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SwarmParticle {
    /// The current position of the particle
    pub position: Point<DVector<Float>>,
    /// The velocity of the particle
    pub velocity: DVector<Float>,
    /// The best position of the particle (as measured by the minimum value of `fx`)
    pub best: Point<DVector<Float>>,
}

impl SwarmParticle {
    /// Create a new particle at the given position with the given velocity. The position is
    /// evaluated and becomes the particle's personal best.
    pub fn new(position: Point<DVector<Float>>, velocity: DVector<Float>, func: &Function) -> Self {
        let mut position = position;
        if position.fx.is_none() {
            position.fx = Some(func.evaluate(&position.x));
        }
        Self {
            best: position.clone(),
            position,
            velocity,
        }
    }

    /// Create a particle with every position component drawn uniformly from the function's
    /// position range and every velocity component drawn from its velocity range.
    ///
    /// All position components are drawn before any velocity component.
    pub fn random(func: &Function, rng: &mut Rng) -> Self {
        let ranges = func.init_ranges();
        let position = generate_random_vector(
            func.dimension(),
            ranges.position.0,
            ranges.position.1,
            rng,
        );
        let velocity = generate_random_vector(
            func.dimension(),
            ranges.velocity.0,
            ranges.velocity.1,
            rng,
        );
        Self::new(position.into(), velocity, func)
    }

    /// Compare the best position to another particle
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.best.total_cmp(&other.best)
    }

    /// The value at the particle's current position.
    pub fn fitness(&self) -> Float {
        self.position.fx_checked()
    }

    /// Move the particle with the constricted velocity update
    ///
    /// ```math
    /// v \leftarrow \chi \left(v + r_1 \odot (p - x) + r_2 \odot (g - x)\right)
    /// ```
    /// where $`r_1`$ and $`r_2`$ are vectors drawn uniformly from $`[0, \varphi_1)`$ and
    /// $`[0, \varphi_2)`$, $`p`$ is the particle's personal best and $`g`$ is `reference_best`.
    /// The new position $`x + v`$ is evaluated and replaces the personal best if it is strictly
    /// better. Returns the new value.
    pub fn update(&mut self, reference_best: &DVector<Float>, func: &Function, rng: &mut Rng) -> Float {
        let dim = self.position.dimension();
        let r1 = generate_random_vector(dim, 0.0, func.phi1(), rng);
        let r2 = generate_random_vector(dim, 0.0, func.phi2(), rng);
        self.velocity = (&self.velocity
            + r1.component_mul(&(&self.best.x - &self.position.x))
            + r2.component_mul(&(reference_best - &self.position.x)))
        .scale(func.constriction_factor());
        let new_position = &self.position.x + &self.velocity;
        self.position.set_position(new_position);
        let fx = func.evaluate(&self.position.x);
        self.position.fx = Some(fx);
        if self.position.improves_on(&self.best) {
            self.best = self.position.clone();
        }
        fx
    }

    /// Move one coordinate of the current position, invalidating its value until the next call
    /// to [`SwarmParticle::reevaluate`]. The personal best is untouched.
    pub fn set_coordinate(&mut self, index: usize, value: Float) {
        self.position.x[index] = value;
        self.position.fx = None;
    }

    /// Exchange the position and velocity components `index` between two particles.
    pub fn swap_dimension(&mut self, other: &mut Self, index: usize) {
        std::mem::swap(&mut self.position.x[index], &mut other.position.x[index]);
        std::mem::swap(&mut self.velocity[index], &mut other.velocity[index]);
        self.position.fx = None;
        other.position.fx = None;
    }

    /// Evaluate the current position if it has been changed since the last evaluation.
    /// Returns `true` if an evaluation took place.
    pub fn reevaluate(&mut self, func: &Function) -> bool {
        if self.position.fx.is_some() {
            return false;
        }
        self.position.fx = Some(func.evaluate(&self.position.x));
        true
    }
}
