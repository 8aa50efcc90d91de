//! Discrete particle: an assignment plus one velocity per task.

use std::sync::Arc;

use super::config::PsoConfig;
use crate::model::{Assignment, Problem};
use crate::sampler::Sampler;
use crate::strategy::InitScheme;

/// One member of the swarm.
#[derive(Debug, Clone)]
pub struct Particle {
    position: Assignment,
    velocity: Vec<f64>,
    personal_best: Assignment,
    stagnant: usize,
}

impl Particle {
    /// Starts at `position` with velocities drawn from `[-1, 1)`.
    pub fn new<S: Sampler + ?Sized>(position: Assignment, sampler: &mut S) -> Self {
        let velocity = (0..position.task_count())
            .map(|_| sampler.signed_unit())
            .collect();
        Self {
            personal_best: position.clone(),
            position,
            velocity,
            stagnant: 0,
        }
    }

    pub fn position(&self) -> &Assignment {
        &self.position
    }

    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    pub fn personal_best(&self) -> &Assignment {
        &self.personal_best
    }

    /// Iterations since the personal best last improved.
    pub fn stagnant(&self) -> usize {
        self.stagnant
    }

    /// `v ← w·v + c1·r1·(pbest - x) + c2·r2·(gbest - x)`, clamped, per task.
    pub fn update_velocity<S: Sampler + ?Sized>(
        &mut self,
        global_best: &Assignment,
        config: &PsoConfig,
        sampler: &mut S,
    ) {
        let limit = config.velocity_limit;
        for (task, v) in self.velocity.iter_mut().enumerate() {
            let r1 = sampler.sample();
            let r2 = sampler.sample();
            let current = self.position.worker_of(task) as f64;
            let own = self.personal_best.worker_of(task) as f64;
            let swarm = global_best.worker_of(task) as f64;
            let next = config.inertia * *v
                + config.cognitive * r1 * (own - current)
                + config.social * r2 * (swarm - current);
            *v = if next.is_nan() {
                0.0
            } else {
                next.clamp(-limit, limit)
            };
        }
    }

    /// Reassigns each task to a random worker with probability `|v| / limit`,
    /// then restarts the position if the particle has stagnated too long.
    pub fn update_position<S: Sampler + ?Sized>(
        &mut self,
        problem: &Arc<Problem>,
        config: &PsoConfig,
        sampler: &mut S,
    ) {
        let workers = problem.worker_count();
        for task in 0..self.velocity.len() {
            let probability = self.velocity[task].abs() / config.velocity_limit;
            if sampler.sample() < probability {
                let worker = sampler.int_below(workers);
                self.position.assign(task, worker);
            }
        }
        if self.stagnant > config.stagnation_limit {
            self.position = InitScheme::Uniform.build(problem, sampler);
            self.stagnant = 0;
        }
    }

    /// Promotes the position to personal best if strictly fitter, otherwise
    /// counts a stagnant iteration. Returns whether it improved.
    pub fn evaluate(&mut self) -> bool {
        if self.position.fitness() > self.personal_best.fitness() {
            self.personal_best = self.position.clone();
            self.stagnant = 0;
            true
        } else {
            self.stagnant += 1;
            false
        }
    }
}
