//! GA generational loop.
//!
//! [`GaSearch`] runs one generation per [`step`](SearchStrategy::step):
//! trim → (maybe) crossover → (maybe) mutate one child → add children.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::config::GaConfig;
use super::operators::{mutate, select_parents, uniform_crossover};
use crate::error::SearchError;
use crate::model::{Assignment, Problem};
use crate::sampler::{Sampler, SeededSampler};
use crate::strategy::population::truncate_by_fitness;
use crate::strategy::{SearchProgress, SearchStrategy};

const NAME: &str = "GA";

/// Genetic Algorithm over task → worker assignments.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_placement::ga::{GaConfig, GaSearch};
/// use u_placement::model::{Problem, Task, Worker};
/// use u_placement::SearchStrategy;
///
/// let problem = Arc::new(Problem::new(
///     (0..6).map(|i| Task::new(i, 1000 + 500 * i as u64)).collect(),
///     (0..3).map(|i| Worker::new(i, 1000.0, 2)).collect(),
/// ).unwrap());
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_max_generations(30)
///     .with_seed(1);
/// let mut ga = GaSearch::new(problem, config).unwrap();
/// let best = ga.solve().unwrap();
/// assert_eq!(best.task_count(), 6);
/// ```
pub struct GaSearch<S = SeededSampler> {
    problem: Arc<Problem>,
    config: GaConfig,
    sampler: S,
    population: Vec<Assignment>,
    progress: SearchProgress,
}

impl GaSearch<SeededSampler> {
    /// Creates a GA seeded from `config.seed`.
    pub fn new(problem: Arc<Problem>, config: GaConfig) -> Result<Self, SearchError> {
        let sampler = SeededSampler::from_seed_option(config.seed);
        Self::with_sampler(problem, config, sampler)
    }
}

impl<S: Sampler> GaSearch<S> {
    /// Creates a GA driven by a caller-supplied sampler.
    pub fn with_sampler(
        problem: Arc<Problem>,
        config: GaConfig,
        sampler: S,
    ) -> Result<Self, SearchError> {
        config
            .validate()
            .map_err(|reason| SearchError::invalid_config(NAME, reason))?;
        Ok(Self {
            problem,
            config,
            sampler,
            population: Vec::new(),
            progress: SearchProgress::new(),
        })
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    pub fn population(&self) -> &[Assignment] {
        &self.population
    }
}

impl<S: Sampler> SearchStrategy for GaSearch<S> {
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
        debug!(population = self.population.len(), "population initialized");
        Ok(())
    }

    fn step(&mut self) -> Result<(), SearchError> {
        if !self.progress.begin_step(NAME)? {
            return Ok(());
        }
        let cfg = &self.config;

        truncate_by_fitness(&mut self.population, cfg.population_size);

        if self.sampler.sample() < cfg.crossover_rate {
            let (f, m) = select_parents(&self.population, &mut self.sampler);
            let (son, daughter) = uniform_crossover(
                &self.population[f],
                &self.population[m],
                cfg.gene_swap_probability,
                &mut self.sampler,
            );
            let mut children = [son, daughter];
            if self.sampler.sample() < cfg.mutation_rate {
                let pick = self.sampler.int_below(children.len());
                mutate(&mut children[pick], &mut self.sampler);
            }
            for child in &children {
                self.progress.offer(child);
            }
            self.population.extend(children);
        }

        self.progress.complete_iteration(cfg.max_generations);
        self.progress.log_if_due(NAME, cfg.log_every);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Task, Worker};
    use crate::sampler::FixedSampler;
    use crate::strategy::SearchState;

    fn problem(tasks: usize, workers: usize) -> Arc<Problem> {
        Arc::new(
            Problem::new(
                (0..tasks)
                    .map(|i| Task::new(i, 1000 + 250 * i as u64))
                    .collect(),
                (0..workers)
                    .map(|i| Worker::new(i, 500.0 + 250.0 * i as f64, 2))
                    .collect(),
            )
            .unwrap(),
        )
    }

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(8)
            .with_max_generations(40)
            .with_seed(42)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = GaSearch::new(problem(3, 2), GaConfig::default().with_population_size(1));
        assert!(matches!(
            err,
            Err(SearchError::InvalidConfig { strategy: "GA", .. })
        ));
    }

    #[test]
    fn test_step_before_initialize() {
        let mut ga = GaSearch::new(problem(3, 2), small_config()).unwrap();
        assert!(matches!(
            ga.step(),
            Err(SearchError::NotInitialized { strategy: "GA" })
        ));
    }

    #[test]
    fn test_solve_runs_full_budget() {
        let mut ga = GaSearch::new(problem(6, 3), small_config()).unwrap();
        let best = ga.solve().unwrap();
        assert_eq!(ga.state(), SearchState::Converged);
        assert_eq!(ga.progress().iterations(), 40);
        assert_eq!(ga.progress().fitness_history().len(), 41);
        assert_eq!(best.task_count(), 6);
        assert!(ga.solve_time_seconds() >= 0.0);
    }

    #[test]
    fn test_fitness_history_monotone() {
        let mut ga = GaSearch::new(problem(10, 4), small_config()).unwrap();
        ga.solve().unwrap();
        for w in ga.progress().fitness_history().windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    #[test]
    fn test_population_bounded() {
        let mut ga = GaSearch::new(problem(5, 3), small_config()).unwrap();
        ga.initialize().unwrap();
        for _ in 0..10 {
            ga.step().unwrap();
            assert!(ga.population().len() <= 8 + 2);
        }
    }

    #[test]
    fn test_step_after_converged_is_noop() {
        let mut ga = GaSearch::new(problem(4, 2), small_config().with_max_generations(2)).unwrap();
        ga.solve().unwrap();
        ga.step().unwrap();
        assert_eq!(ga.progress().iterations(), 2);
    }

    #[test]
    fn test_fixed_sampler_scenario_is_repeatable() {
        // 3 tasks, 2 identical workers, population 4, every draw selects index 0.
        let p = Arc::new(
            Problem::new(
                (0..3).map(|i| Task::new(i, 1000)).collect(),
                (0..2).map(|i| Worker::new(i, 1000.0, 2)).collect(),
            )
            .unwrap(),
        );
        let config = GaConfig::default()
            .with_population_size(4)
            .with_max_generations(25);
        let run = || {
            let mut ga =
                GaSearch::with_sampler(p.clone(), config.clone(), FixedSampler::new(0.0)).unwrap();
            ga.solve().unwrap()
        };
        let first = run();
        let second = run();
        assert_eq!(first, second);
        assert_eq!(first.cost(), second.cost());
    }

    #[test]
    fn test_seeded_runs_are_deterministic() {
        let p = problem(8, 3);
        let a = GaSearch::new(p.clone(), small_config()).unwrap().solve().unwrap();
        let b = GaSearch::new(p, small_config()).unwrap().solve().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_neighbor_unsupported() {
        let p = problem(3, 2);
        let mut ga = GaSearch::new(p.clone(), small_config()).unwrap();
        let a = Assignment::new(p, vec![0, 1, 0]).unwrap();
        assert!(matches!(
            ga.neighbor(&a),
            Err(SearchError::Unsupported { .. })
        ));
        assert!(ga.acceptance_probability().is_err());
    }
}
