//! FWA and WOA batches forked onto the rayon pool.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use super::config::HybridConfig;
use super::rounds::Rounds;
use super::shared::SharedBest;
use crate::error::SearchError;
use crate::fwa::operators::explode_generation;
use crate::model::{Assignment, Problem};
use crate::sampler::{Sampler, SeededSampler};
use crate::strategy::{SearchProgress, SearchStrategy};
use crate::woa::operators::evolve;

const NAME: &str = "PARALLEL";

/// FWA + WOA orchestrator that runs both batches of a round at once.
///
/// Both tasks start from their own copy of the same population snapshot and
/// their own forked sampler, so a seeded run is reproducible however the
/// pool schedules them. Each task offers its best to a [`SharedBest`]; only a
/// strictly fitter candidate replaces it.
pub struct ConcurrentHybrid<S = SeededSampler> {
    problem: Arc<Problem>,
    config: HybridConfig,
    sampler: S,
    rounds: Rounds,
    progress: SearchProgress,
}

impl ConcurrentHybrid<SeededSampler> {
    pub fn new(problem: Arc<Problem>, config: HybridConfig) -> Result<Self, SearchError> {
        let sampler = SeededSampler::from_seed_option(config.seed);
        Self::with_sampler(problem, config, sampler)
    }
}

impl<S: Sampler> ConcurrentHybrid<S> {
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

fn fwa_batch<S: Sampler>(
    mut population: Vec<Assignment>,
    mut best: Assignment,
    iterations: usize,
    config: &HybridConfig,
    sampler: &mut S,
    shared: &SharedBest,
) -> Vec<Assignment> {
    for _ in 0..iterations {
        population = explode_generation(
            population,
            &mut best,
            config.population_size,
            &config.fwa,
            sampler,
        );
    }
    shared.offer(&best);
    population
}

fn woa_batch<S: Sampler>(
    mut population: Vec<Assignment>,
    mut best: Assignment,
    first_iteration: usize,
    iterations: usize,
    config: &HybridConfig,
    sampler: &mut S,
    shared: &SharedBest,
) -> Vec<Assignment> {
    for i in 0..iterations {
        population = evolve(
            &population,
            &mut best,
            first_iteration + i,
            config.max_woa_iterations,
            &config.woa,
            sampler,
        );
    }
    shared.offer(&best);
    population
}

impl<S: Sampler> SearchStrategy for ConcurrentHybrid<S> {
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
        let best = self
            .progress
            .best()
            .cloned()
            .ok_or(SearchError::NotInitialized { strategy: NAME })?;

        let cfg = &self.config;
        let fwa_n = self.rounds.fwa_batch(cfg);
        let woa_n = self.rounds.woa_batch(cfg);
        let woa_start = self.rounds.woa_iterations;
        let shared = SharedBest::new(best.clone());

        let mut fwa_sampler = self.sampler.fork();
        let mut woa_sampler = self.sampler.fork();
        let fwa_input = (self.rounds.population.clone(), best.clone());
        let woa_input = (self.rounds.population.clone(), best);
        let shared_ref = &shared;

        let (fireworks, whales) = rayon::join(
            move || {
                panic::catch_unwind(AssertUnwindSafe(|| {
                    let (population, best) = fwa_input;
                    fwa_batch(population, best, fwa_n, cfg, &mut fwa_sampler, shared_ref)
                }))
            },
            move || {
                panic::catch_unwind(AssertUnwindSafe(|| {
                    let (population, best) = woa_input;
                    woa_batch(
                        population,
                        best,
                        woa_start,
                        woa_n,
                        cfg,
                        &mut woa_sampler,
                        shared_ref,
                    )
                }))
            },
        );
        let mut fireworks = fireworks.map_err(|_| SearchError::WorkerPanicked { strategy: NAME })?;
        let whales = whales.map_err(|_| SearchError::WorkerPanicked { strategy: NAME })?;
        self.rounds.fwa_iterations += fwa_n;
        self.rounds.woa_iterations += woa_n;

        let round_best = shared.into_inner();
        trace!(
            fwa_iterations = self.rounds.fwa_iterations,
            woa_iterations = self.rounds.woa_iterations,
            round_best = round_best.fitness(),
            "round joined"
        );
        self.progress.offer(&round_best);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fwa::FwaConfig;
    use crate::model::{Task, Worker};
    use crate::strategy::SearchState;

    fn problem() -> Arc<Problem> {
        Arc::new(
            Problem::new(
                (0..8).map(|i| Task::new(i, 1000 + 400 * i as u64)).collect(),
                (0..4)
                    .map(|i| Worker::new(i, 400.0 * (i as f64 + 1.0), 2))
                    .collect(),
            )
            .unwrap(),
        )
    }

    fn config() -> HybridConfig {
        HybridConfig::concurrent()
            .with_population_size(10)
            .with_iterations(8, 8)
            .with_fwa(FwaConfig::default().with_sparks(30.0, 0.05, 0.5))
            .with_seed(17)
    }

    #[test]
    fn test_one_iteration_each_per_round() {
        let mut h = ConcurrentHybrid::new(problem(), config()).unwrap();
        h.solve().unwrap();
        assert_eq!(h.state(), SearchState::Converged);
        assert_eq!(h.progress().iterations(), 8);
        assert_eq!(h.fwa_iterations(), 8);
        assert_eq!(h.woa_iterations(), 8);
        assert_eq!(h.population().len(), 10);
    }

    #[test]
    fn test_round_best_never_regresses() {
        let mut h = ConcurrentHybrid::new(problem(), config()).unwrap();
        h.initialize().unwrap();
        let mut last = h.best_so_far().unwrap().fitness();
        while h.state() != SearchState::Converged {
            h.step().unwrap();
            let now = h.best_so_far().unwrap().fitness();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_best_dominates_population() {
        let mut h = ConcurrentHybrid::new(problem(), config()).unwrap();
        let best = h.solve().unwrap();
        for a in h.population() {
            assert!(a.fitness() <= best.fitness());
        }
    }

    #[test]
    fn test_deterministic_with_seed() {
        let a = ConcurrentHybrid::new(problem(), config()).unwrap().solve().unwrap();
        let b = ConcurrentHybrid::new(problem(), config()).unwrap().solve().unwrap();
        assert_eq!(a, b);
    }
}
