//! Whale moves with one amplitude spark per whale.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::config::HybridConfig;
use super::rounds::Rounds;
use crate::error::SearchError;
use crate::fwa::operators::{amplitude, explosion_spark};
use crate::model::{Assignment, Problem};
use crate::sampler::{Sampler, SeededSampler};
use crate::strategy::population::fitness_bounds;
use crate::strategy::{SearchProgress, SearchStrategy};
use crate::woa::operators::{coefficients, move_whale};

const NAME: &str = "WoaSpark";

/// WOA whose every whale also throws one firework spark.
///
/// Per round, each whale yields its WOA move and one explosion spark sized
/// by its fitness relative to the worst whale. The offspring join the
/// current population, the fittest `population_size` survive, and stalled
/// rounds trigger diversity injection. Runs `max_woa_iterations` rounds;
/// `max_fwa_iterations` and `batch_size` are not used.
pub struct WoaSparkHybrid<S = SeededSampler> {
    problem: Arc<Problem>,
    config: HybridConfig,
    sampler: S,
    rounds: Rounds,
    progress: SearchProgress,
}

impl WoaSparkHybrid<SeededSampler> {
    pub fn new(problem: Arc<Problem>, config: HybridConfig) -> Result<Self, SearchError> {
        let sampler = SeededSampler::from_seed_option(config.seed);
        Self::with_sampler(problem, config, sampler)
    }
}

impl<S: Sampler> WoaSparkHybrid<S> {
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

    /// Times the population was refreshed after stalling.
    pub fn diversity_injections(&self) -> usize {
        self.rounds.injections()
    }
}

impl<S: Sampler> SearchStrategy for WoaSparkHybrid<S> {
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
        let best = self
            .progress
            .best()
            .cloned()
            .ok_or(SearchError::NotInitialized { strategy: NAME })?;

        let pod = &self.rounds.population;
        let coef = coefficients(
            self.rounds.woa_iterations,
            cfg.max_woa_iterations,
            &mut self.sampler,
        );
        let (min_fitness, _) = fitness_bounds(pod);
        let spread_sum: f64 = pod.iter().map(|w| w.fitness() - min_fitness).sum();

        let mut offspring = Vec::with_capacity(pod.len() * 2);
        for whale in pod {
            offspring.push(move_whale(
                whale,
                pod,
                &best,
                coef,
                &cfg.woa,
                &mut self.sampler,
            ));
            let amp = amplitude(whale.fitness(), min_fitness, spread_sum, &cfg.fwa);
            offspring.push(explosion_spark(whale, amp, &mut self.sampler));
        }
        self.rounds.woa_iterations += 1;

        let mut merged = self.rounds.population.clone();
        merged.extend(offspring);
        self.rounds.finish(
            NAME,
            merged,
            &mut self.progress,
            cfg,
            &self.problem,
            &mut self.sampler,
        );

        self.progress.complete_iteration(cfg.max_woa_iterations);
        self.rounds.log_if_due(NAME, &self.progress, cfg.log_every);
        Ok(())
    }
}
