//! Colony loop.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::config::AcoConfig;
use super::pheromone::{deposit_amount, PheromoneMatrix};
use crate::error::SearchError;
use crate::model::{Assignment, Problem};
use crate::sampler::{Sampler, SeededSampler};
use crate::strategy::{SearchProgress, SearchStrategy};

const NAME: &str = "ACO";

/// Ant Colony Optimization over task → worker assignments.
///
/// Each iteration evaporates the trails, builds a fresh colony from them and
/// reinforces the edges every ant used with `deposit_weight / cost`.
pub struct AcoSearch<S = SeededSampler> {
    problem: Arc<Problem>,
    config: AcoConfig,
    sampler: S,
    pheromone: PheromoneMatrix,
    colony: Vec<Assignment>,
    progress: SearchProgress,
}

impl AcoSearch<SeededSampler> {
    pub fn new(problem: Arc<Problem>, config: AcoConfig) -> Result<Self, SearchError> {
        let sampler = SeededSampler::from_seed_option(config.seed);
        Self::with_sampler(problem, config, sampler)
    }
}

impl<S: Sampler> AcoSearch<S> {
    pub fn with_sampler(
        problem: Arc<Problem>,
        config: AcoConfig,
        sampler: S,
    ) -> Result<Self, SearchError> {
        config
            .validate()
            .map_err(|reason| SearchError::invalid_config(NAME, reason))?;
        let pheromone = PheromoneMatrix::new(
            problem.task_count(),
            problem.worker_count(),
            config.initial_pheromone,
        );
        Ok(Self {
            problem,
            config,
            sampler,
            pheromone,
            colony: Vec::new(),
            progress: SearchProgress::new(),
        })
    }

    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    /// The most recently constructed ants.
    pub fn colony(&self) -> &[Assignment] {
        &self.colony
    }

    fn build_colony(&mut self) -> Vec<Assignment> {
        (0..self.config.colony_size)
            .map(|_| self.pheromone.construct(&self.problem, &mut self.sampler))
            .collect()
    }
}

impl<S: Sampler> SearchStrategy for AcoSearch<S> {
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
        self.pheromone = PheromoneMatrix::new(
            self.problem.task_count(),
            self.problem.worker_count(),
            self.config.initial_pheromone,
        );
        self.colony = self.build_colony();
        self.progress.populate(&self.colony);
        debug!(colony = self.colony.len(), "colony initialized");
        Ok(())
    }

    fn step(&mut self) -> Result<(), SearchError> {
        if !self.progress.begin_step(NAME)? {
            return Ok(());
        }
        self.pheromone.evaporate(self.config.evaporation_rate);
        let colony = self.build_colony();
        for ant in &colony {
            let amount = deposit_amount(ant.cost(), self.config.deposit_weight);
            self.pheromone.deposit(ant.mapping(), amount);
        }
        self.progress.offer_best_of(&colony);
        self.colony = colony;
        self.progress.complete_iteration(self.config.max_iterations);
        self.progress.log_if_due(NAME, self.config.log_every);
        Ok(())
    }

    /// Ants never accept a worse solution in place of the best.
    fn acceptance_probability(&self) -> Result<f64, SearchError> {
        Ok(0.0)
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
                (0..8).map(|i| Task::new(i, 1500 + 250 * i as u64)).collect(),
                (0..3)
                    .map(|i| Worker::new(i, 800.0 * (i as f64 + 1.0), 2))
                    .collect(),
            )
            .unwrap(),
        )
    }

    fn config() -> AcoConfig {
        AcoConfig::default()
            .with_colony_size(12)
            .with_max_iterations(10)
            .with_seed(3)
    }

    #[test]
    fn test_solve() {
        let mut aco = AcoSearch::new(problem(), config()).unwrap();
        let best = aco.solve().unwrap();
        assert_eq!(aco.state(), SearchState::Converged);
        assert_eq!(aco.progress().iterations(), 10);
        assert_eq!(aco.colony().len(), 12);
        assert!(best.mapping().iter().all(|&w| w < 3));
    }

    #[test]
    fn test_trails_reinforced_on_used_edges() {
        let mut aco = AcoSearch::new(problem(), config().with_colony_size(1)).unwrap();
        aco.initialize().unwrap();
        aco.step().unwrap();
        let ant = aco.colony()[0].clone();
        let expected = 0.5 * 0.95 + deposit_amount(ant.cost(), 1.0);
        for (task, &worker) in ant.mapping().iter().enumerate() {
            assert!((aco.pheromone().level(task, worker) - expected).abs() < 1e-9);
            for other in (0..3).filter(|&w| w != worker) {
                assert!((aco.pheromone().level(task, other) - 0.475).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_acceptance_probability_is_zero() {
        let aco = AcoSearch::new(problem(), config()).unwrap();
        assert_eq!(aco.acceptance_probability().unwrap(), 0.0);
    }

    #[test]
    fn test_neighbor_unsupported() {
        let mut aco = AcoSearch::new(problem(), config()).unwrap();
        let best = aco.solve().unwrap();
        assert!(matches!(
            aco.neighbor(&best),
            Err(SearchError::Unsupported { strategy: "ACO", .. })
        ));
    }

    #[test]
    fn test_monotone_history() {
        let mut aco = AcoSearch::new(problem(), config()).unwrap();
        aco.solve().unwrap();
        for w in aco.progress().fitness_history().windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    #[test]
    fn test_deterministic_with_seed() {
        let a = AcoSearch::new(problem(), config()).unwrap().solve().unwrap();
        let b = AcoSearch::new(problem(), config()).unwrap().solve().unwrap();
        assert_eq!(a, b);
    }
}
