//! Alternating FWA and WOA batches.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::config::HybridConfig;
use super::rounds::Rounds;
use crate::error::SearchError;
use crate::fwa::operators::explode_generation;
use crate::model::{Assignment, Problem};
use crate::sampler::{Sampler, SeededSampler};
use crate::strategy::{SearchProgress, SearchStrategy};
use crate::woa::operators::evolve;

const NAME: &str = "SEQUENTIAL";

/// FWA + WOA orchestrator that runs the two batches one after the other.
///
/// Each round copies the population twice, runs a batch of FWA iterations
/// on one copy and a batch of WOA iterations on the other, then merges both
/// and keeps the fittest. The round's best carries over from the FWA batch
/// into the WOA batch.
///
/// ```
/// use std::sync::Arc;
/// use u_placement::fwa::FwaConfig;
/// use u_placement::hybrid::{HybridConfig, SequentialHybrid};
/// use u_placement::model::{Problem, Task, Worker};
/// use u_placement::SearchStrategy;
///
/// let problem = Arc::new(Problem::new(
///     (0..6).map(|i| Task::new(i, 1000 + 250 * i as u64)).collect(),
///     (0..3).map(|i| Worker::new(i, 500.0 * (i + 1) as f64, 2)).collect(),
/// ).unwrap());
/// let config = HybridConfig::sequential()
///     .with_population_size(8)
///     .with_iterations(6, 6)
///     .with_batch_size(3)
///     .with_fwa(FwaConfig::default().with_sparks(20.0, 0.05, 0.5))
///     .with_seed(4);
/// let mut hybrid = SequentialHybrid::new(problem, config).unwrap();
/// let best = hybrid.solve().unwrap();
/// assert_eq!(hybrid.fwa_iterations(), 6);
/// assert_eq!(best.task_count(), 6);
/// ```
pub struct SequentialHybrid<S = SeededSampler> {
    problem: Arc<Problem>,
    config: HybridConfig,
    sampler: S,
    rounds: Rounds,
    progress: SearchProgress,
}

impl SequentialHybrid<SeededSampler> {
    pub fn new(problem: Arc<Problem>, config: HybridConfig) -> Result<Self, SearchError> {
        let sampler = SeededSampler::from_seed_option(config.seed);
        Self::with_sampler(problem, config, sampler)
    }
}

impl<S: Sampler> SequentialHybrid<S> {
    pub fn with_sampler(
        problem: Arc<Problem>,
        config: HybridConfig,
        sampler: S,
    ) -> Result<Self, SearchError> {
        config
            .validate()
            .map_err(|reason| SearchError::invalid_config(NAME, reason))?;
        Ok(Self {
            problem,
            config,
            sampler,
            rounds: Rounds::default(),
            progress: SearchProgress::new(),
        })
    }

    pub fn config(&self) -> &HybridConfig {
        &self.config
    }

    pub fn population(&self) -> &[Assignment] {
        &self.rounds.population
    }

    pub fn fwa_iterations(&self) -> usize {
        self.rounds.fwa_iterations
    }

    pub fn woa_iterations(&self) -> usize {
        self.rounds.woa_iterations
    }

    /// Times the population was refreshed after stalling.
    pub fn diversity_injections(&self) -> usize {
        self.rounds.injections()
    }
}

impl<S: Sampler> SearchStrategy for SequentialHybrid<S> {
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
        let population =
            self.config
                .init
                .population(&self.problem, self.config.population_size, &mut self.sampler);
        self.progress.populate(&population);
        let best = self.progress.best().map_or(0.0, Assignment::fitness);
        self.rounds = Rounds::new(population, best);
        debug!(population = self.rounds.population.len(), "hybrid initialized");
        Ok(())
    }

    fn step(&mut self) -> Result<(), SearchError> {
        if !self.progress.begin_step(NAME)? {
            return Ok(());
        }
        let cfg = &self.config;
        let mut best = self
            .progress
            .best()
            .cloned()
            .ok_or(SearchError::NotInitialized { strategy: NAME })?;

        let mut fireworks = self.rounds.population.clone();
        for _ in 0..self.rounds.fwa_batch(cfg) {
            fireworks = explode_generation(
                fireworks,
                &mut best,
                cfg.population_size,
                &cfg.fwa,
                &mut self.sampler,
            );
            self.rounds.fwa_iterations += 1;
        }

        let mut whales = self.rounds.population.clone();
        for _ in 0..self.rounds.woa_batch(cfg) {
            whales = evolve(
                &whales,
                &mut best,
                self.rounds.woa_iterations,
                cfg.max_woa_iterations,
                &cfg.woa,
                &mut self.sampler,
            );
            self.rounds.woa_iterations += 1;
        }

        self.progress.offer(&best);
        fireworks.extend(whales);
        self.rounds.finish(
            NAME,
            fireworks,
            &mut self.progress,
            cfg,
            &self.problem,
            &mut self.sampler,
        );

        self.progress.complete_iteration(usize::MAX);
        if self.rounds.fwa_iterations >= cfg.max_fwa_iterations
            || self.rounds.woa_iterations >= cfg.max_woa_iterations
        {
            self.progress.converge();
        }
        self.rounds.log_if_due(NAME, &self.progress, cfg.log_every);
        Ok(())
    }
}
