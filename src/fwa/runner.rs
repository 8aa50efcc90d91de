//! Fireworks loop.

use std::mem;
use std::sync::Arc;

use tracing::{debug, instrument};

use super::config::FwaConfig;
use super::operators::explode_generation;
use crate::error::SearchError;
use crate::model::{Assignment, Problem};
use crate::sampler::{Sampler, SeededSampler};
use crate::strategy::{SearchProgress, SearchStrategy};

const NAME: &str = "FWA";

/// Fireworks Algorithm over task → worker assignments.
pub struct FwaSearch<S = SeededSampler> {
    problem: Arc<Problem>,
    config: FwaConfig,
    sampler: S,
    population: Vec<Assignment>,
    progress: SearchProgress,
}

impl FwaSearch<SeededSampler> {
    pub fn new(problem: Arc<Problem>, config: FwaConfig) -> Result<Self, SearchError> {
        let sampler = SeededSampler::from_seed_option(config.seed);
        Self::with_sampler(problem, config, sampler)
    }
}

impl<S: Sampler> FwaSearch<S> {
    pub fn with_sampler(
        problem: Arc<Problem>,
        config: FwaConfig,
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

    pub fn config(&self) -> &FwaConfig {
        &self.config
    }

    pub fn population(&self) -> &[Assignment] {
        &self.population
    }
}

impl<S: Sampler> SearchStrategy for FwaSearch<S> {
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
        debug!(population = self.population.len(), "fireworks initialized");
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
        let population = mem::take(&mut self.population);
        self.population = explode_generation(
            population,
            &mut best,
            self.config.population_size,
            &self.config,
            &mut self.sampler,
        );
        self.progress.offer(&best);
        self.progress.complete_iteration(self.config.max_iterations);
        self.progress.log_if_due(NAME, self.config.log_every);
        Ok(())
    }
}
