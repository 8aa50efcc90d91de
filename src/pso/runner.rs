//! Swarm loop.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::config::PsoConfig;
use super::particle::Particle;
use crate::error::SearchError;
use crate::model::{Assignment, Problem};
use crate::sampler::{Sampler, SeededSampler};
use crate::strategy::{InitScheme, SearchProgress, SearchStrategy};

const NAME: &str = "PSO";

/// Discrete Particle Swarm Optimization over task → worker assignments.
pub struct PsoSearch<S = SeededSampler> {
    problem: Arc<Problem>,
    config: PsoConfig,
    sampler: S,
    swarm: Vec<Particle>,
    progress: SearchProgress,
}

impl PsoSearch<SeededSampler> {
    pub fn new(problem: Arc<Problem>, config: PsoConfig) -> Result<Self, SearchError> {
        let sampler = SeededSampler::from_seed_option(config.seed);
        Self::with_sampler(problem, config, sampler)
    }
}

impl<S: Sampler> PsoSearch<S> {
    pub fn with_sampler(
        problem: Arc<Problem>,
        config: PsoConfig,
        sampler: S,
    ) -> Result<Self, SearchError> {
        config
            .validate()
            .map_err(|reason| SearchError::invalid_config(NAME, reason))?;
        Ok(Self {
            problem,
            config,
            sampler,
            swarm: Vec::new(),
            progress: SearchProgress::new(),
        })
    }

    pub fn config(&self) -> &PsoConfig {
        &self.config
    }

    pub fn swarm(&self) -> &[Particle] {
        &self.swarm
    }
}

impl<S: Sampler> SearchStrategy for PsoSearch<S> {
    fn name(&self) -> &'static str {
        NAME
    }

    fn progress(&self) -> &SearchProgress {
        &self.progress
    }

    fn progress_mut(&mut self) -> &mut SearchProgress {
        &mut self.progress
    }

    #[instrument(skip(self), fields(strategy = NAME))]
    fn initialize(&mut self) -> Result<(), SearchError> {
        let mut swarm = Vec::with_capacity(self.config.swarm_size);
        for _ in 0..self.config.swarm_size {
            let start = InitScheme::Uniform.build(&self.problem, &mut self.sampler);
            swarm.push(Particle::new(start, &mut self.sampler));
        }
        let positions: Vec<Assignment> = swarm.iter().map(|p| p.position().clone()).collect();
        self.progress.populate(&positions);
        self.swarm = swarm;
        debug!(swarm = self.swarm.len(), "swarm initialized");
        Ok(())
    }

    fn step(&mut self) -> Result<(), SearchError> {
        if !self.progress.begin_step(NAME)? {
            return Ok(());
        }
        let global_best = self
            .progress
            .best()
            .cloned()
            .ok_or(SearchError::NotInitialized { strategy: NAME })?;
        let mut restarts = 0usize;
        for particle in &mut self.swarm {
            particle.update_velocity(&global_best, &self.config, &mut self.sampler);
            let was_stagnant = particle.stagnant() > self.config.stagnation_limit;
            particle.update_position(&self.problem, &self.config, &mut self.sampler);
            if was_stagnant {
                restarts += 1;
            }
            particle.evaluate();
        }
        for particle in &self.swarm {
            self.progress.offer(particle.personal_best());
        }
        if restarts > 0 {
            debug!(restarts, iteration = self.progress.iterations(), "stagnant particles restarted");
        }
        self.progress.complete_iteration(self.config.max_iterations);
        self.progress.log_if_due(NAME, self.config.log_every);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Task, Worker};
    use crate::strategy::SearchState;

    fn problem() -> Arc<Problem> {
        Arc::new(
            Problem::new(
                (0..9).map(|i| Task::new(i, 1200 + 350 * i as u64)).collect(),
                (0..4)
                    .map(|i| Worker::new(i, 700.0 * (i as f64 + 1.0), 2))
                    .collect(),
            )
            .unwrap(),
        )
    }

    fn config() -> PsoConfig {
        PsoConfig::default()
            .with_swarm_size(15)
            .with_max_iterations(30)
            .with_stagnation_limit(5)
            .with_seed(11)
    }

    #[test]
    fn test_solve() {
        let mut pso = PsoSearch::new(problem(), config()).unwrap();
        let best = pso.solve().unwrap();
        assert_eq!(pso.state(), SearchState::Converged);
        assert_eq!(pso.progress().iterations(), 30);
        assert_eq!(pso.swarm().len(), 15);
        assert!(best.mapping().iter().all(|&w| w < 4));
    }

    #[test]
    fn test_velocities_stay_clamped() {
        let mut pso = PsoSearch::new(problem(), config()).unwrap();
        pso.initialize().unwrap();
        for _ in 0..5 {
            pso.step().unwrap();
        }
        for particle in pso.swarm() {
            assert!(particle.velocity().iter().all(|v| v.abs() <= 5.0));
        }
    }

    #[test]
    fn test_global_best_dominates_personal_bests() {
        let mut pso = PsoSearch::new(problem(), config()).unwrap();
        pso.solve().unwrap();
        let global = pso.best_so_far().unwrap().fitness();
        for particle in pso.swarm() {
            assert!(particle.personal_best().fitness() <= global);
        }
    }

    #[test]
    fn test_acceptance_probability_unsupported() {
        let pso = PsoSearch::new(problem(), config()).unwrap();
        assert!(matches!(
            pso.acceptance_probability(),
            Err(SearchError::Unsupported { strategy: "PSO", .. })
        ));
    }

    #[test]
    fn test_deterministic_with_seed() {
        let a = PsoSearch::new(problem(), config()).unwrap().solve().unwrap();
        let b = PsoSearch::new(problem(), config()).unwrap().solve().unwrap();
        assert_eq!(a, b);
    }
}
