//! Whale moves followed by one genetic breeding round per iteration.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::config::WgoaConfig;
use crate::error::SearchError;
use crate::ga::operators::{mutate, select_parents, uniform_crossover};
use crate::model::{Assignment, Problem};
use crate::sampler::{Sampler, SeededSampler};
use crate::strategy::population::truncate_by_fitness;
use crate::strategy::{SearchProgress, SearchStrategy};
use crate::woa::operators::evolve;
use crate::woa::WoaConfig;

const NAME: &str = "WGOA";

/// Whale Optimization with GA crossover and mutation.
pub struct WgoaSearch<S = SeededSampler> {
    problem: Arc<Problem>,
    config: WgoaConfig,
    moves: WoaConfig,
    sampler: S,
    population: Vec<Assignment>,
    progress: SearchProgress,
}

impl WgoaSearch<SeededSampler> {
    pub fn new(problem: Arc<Problem>, config: WgoaConfig) -> Result<Self, SearchError> {
        let sampler = SeededSampler::from_seed_option(config.seed);
        Self::with_sampler(problem, config, sampler)
    }
}

impl<S: Sampler> WgoaSearch<S> {
    pub fn with_sampler(
        problem: Arc<Problem>,
        config: WgoaConfig,
        sampler: S,
    ) -> Result<Self, SearchError> {
        config
            .validate()
            .map_err(|reason| SearchError::invalid_config(NAME, reason))?;
        Ok(Self {
            problem,
            moves: config.woa(),
            config,
            sampler,
            population: Vec::new(),
            progress: SearchProgress::new(),
        })
    }

    pub fn config(&self) -> &WgoaConfig {
        &self.config
    }

    pub fn population(&self) -> &[Assignment] {
        &self.population
    }

    fn breed(&mut self) -> [Assignment; 2] {
        let (f, m) = select_parents(&self.population, &mut self.sampler);
        let (son, daughter) = uniform_crossover(
            &self.population[f],
            &self.population[m],
            self.config.gene_swap_probability,
            &mut self.sampler,
        );
        let mut children = [son, daughter];
        if self.sampler.sample() < self.config.mutation_rate {
            let pick = self.sampler.int_below(children.len());
            mutate(&mut children[pick], &mut self.sampler);
        }
        children
    }
}

impl<S: Sampler> SearchStrategy for WgoaSearch<S> {
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
        self.population =
            self.config
                .init
                .population(&self.problem, self.config.population_size, &mut self.sampler);
        self.progress.populate(&self.population);
        debug!(population = self.population.len(), "pod initialized");
        Ok(())
    }

    fn step(&mut self) -> Result<(), SearchError> {
        if !self.progress.begin_step(NAME)? {
            return Ok(());
        }
        let mut best = self
            .progress
            .best()
            .cloned()
            .ok_or(SearchError::NotInitialized { strategy: NAME })?;
        self.population = evolve(
            &self.population,
            &mut best,
            self.progress.iterations(),
            self.config.max_iterations,
            &self.moves,
            &mut self.sampler,
        );
        self.progress.offer(&best);

        if self.population.len() >= 2 && self.sampler.sample() < self.config.crossover_rate {
            let children = self.breed();
            for child in &children {
                self.progress.offer(child);
            }
            self.population.extend(children);
            truncate_by_fitness(&mut self.population, self.config.population_size);
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
                (0..10).map(|i| Task::new(i, 1000 + 500 * i as u64)).collect(),
                (0..4)
                    .map(|i| Worker::new(i, 600.0 * (i as f64 + 1.0), 2))
                    .collect(),
            )
            .unwrap(),
        )
    }

    fn config() -> WgoaConfig {
        WgoaConfig::default()
            .with_population_size(12)
            .with_max_iterations(20)
            .with_seed(21)
    }

    #[test]
    fn test_solve() {
        let mut wgoa = WgoaSearch::new(problem(), config()).unwrap();
        let best = wgoa.solve().unwrap();
        assert_eq!(wgoa.state(), SearchState::Converged);
        assert_eq!(wgoa.progress().iterations(), 20);
        assert!(best.mapping().iter().all(|&w| w < 4));
    }

    #[test]
    fn test_population_size_is_held() {
        let mut wgoa =
            WgoaSearch::new(problem(), config().with_crossover_rate(1.0)).unwrap();
        wgoa.initialize().unwrap();
        for _ in 0..5 {
            wgoa.step().unwrap();
            assert_eq!(wgoa.population().len(), 12);
        }
    }

    #[test]
    fn test_without_crossover_keeps_size() {
        let mut wgoa =
            WgoaSearch::new(problem(), config().with_crossover_rate(0.0)).unwrap();
        wgoa.solve().unwrap();
        assert_eq!(wgoa.population().len(), 12);
        for w in wgoa.progress().fitness_history().windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    #[test]
    fn test_deterministic_with_seed() {
        let a = WgoaSearch::new(problem(), config()).unwrap().solve().unwrap();
        let b = WgoaSearch::new(problem(), config()).unwrap().solve().unwrap();
        assert_eq!(a, b);
    }
}
