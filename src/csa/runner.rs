//! Crow Search loop.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::config::{CsaConfig, FollowTarget};
use super::position::CrowPosition;
use crate::error::SearchError;
use crate::model::{Assignment, Problem};
use crate::sampler::{index_other_than, Sampler, SeededSampler};
use crate::strategy::{SearchProgress, SearchStrategy};

const NAME: &str = "CSA";

/// One crow: its current position and its remembered best.
#[derive(Debug, Clone)]
struct Crow {
    position: CrowPosition,
    solution: Assignment,
    memory: CrowPosition,
    memory_fitness: f64,
}

/// Crow Search over one-hot task × worker positions.
///
/// Each iteration visits every crow in order. A crow picks another crow to
/// follow; with probability `1 - awareness_probability` it flies toward
/// that crow (accepted only if the snapped position is feasible), otherwise
/// it jumps to a random position. A fitter position is remembered (cloned
/// into the memory slot); a worse one is reverted to memory.
pub struct CsaSearch<S = SeededSampler> {
    problem: Arc<Problem>,
    config: CsaConfig,
    sampler: S,
    flock: Vec<Crow>,
    progress: SearchProgress,
}

impl CsaSearch<SeededSampler> {
    pub fn new(problem: Arc<Problem>, config: CsaConfig) -> Result<Self, SearchError> {
        let sampler = SeededSampler::from_seed_option(config.seed);
        Self::with_sampler(problem, config, sampler)
    }
}

impl<S: Sampler> CsaSearch<S> {
    pub fn with_sampler(
        problem: Arc<Problem>,
        config: CsaConfig,
        sampler: S,
    ) -> Result<Self, SearchError> {
        config
            .validate()
            .map_err(|reason| SearchError::invalid_config(NAME, reason))?;
        Ok(Self {
            problem,
            config,
            sampler,
            flock: Vec::new(),
            progress: SearchProgress::new(),
        })
    }

    pub fn config(&self) -> &CsaConfig {
        &self.config
    }

    /// Current (not remembered) assignment of every crow.
    pub fn positions(&self) -> Vec<&Assignment> {
        self.flock.iter().map(|c| &c.solution).collect()
    }

    fn decode(&self, position: &CrowPosition) -> Assignment {
        Assignment::from_mapping(Arc::clone(&self.problem), position.to_mapping())
    }

    fn move_crow(&mut self, p: usize) {
        let followed = index_other_than(&mut self.sampler, self.flock.len(), p);
        let rp = self.sampler.sample();
        let proposal = if rp >= self.config.awareness_probability {
            let target = match self.config.follow {
                FollowTarget::Position => &self.flock[followed].position,
                FollowTarget::Memory => &self.flock[followed].memory,
            };
            let moved =
                self.flock[p]
                    .position
                    .fly_toward(target, self.config.flight_length, &mut self.sampler);
            moved.is_feasible().then_some(moved)
        } else {
            Some(CrowPosition::random(
                self.problem.task_count(),
                self.problem.worker_count(),
                &mut self.sampler,
            ))
        };
        if let Some(position) = proposal {
            let solution = self.decode(&position);
            let crow = &mut self.flock[p];
            crow.position = position;
            crow.solution = solution;
        }

        let fitness = self.flock[p].solution.fitness();
        let crow = &mut self.flock[p];
        if fitness > crow.memory_fitness {
            crow.memory = crow.position.clone();
            crow.memory_fitness = fitness;
            self.progress.offer(&crow.solution);
        } else if fitness < crow.memory_fitness {
            crow.position = crow.memory.clone();
            crow.solution = Assignment::from_mapping(
                Arc::clone(&self.problem),
                crow.memory.to_mapping(),
            );
        }
    }
}

impl<S: Sampler> SearchStrategy for CsaSearch<S> {
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
        let tasks = self.problem.task_count();
        let workers = self.problem.worker_count();
        let mut flock = Vec::with_capacity(self.config.flock_size);
        for _ in 0..self.config.flock_size {
            let position = CrowPosition::random(tasks, workers, &mut self.sampler);
            let solution = self.decode(&position);
            let memory_fitness = solution.fitness();
            flock.push(Crow {
                memory: position.clone(),
                position,
                solution,
                memory_fitness,
            });
        }
        self.flock = flock;
        let solutions: Vec<Assignment> = self.flock.iter().map(|c| c.solution.clone()).collect();
        self.progress.populate(&solutions);
        debug!(flock = self.flock.len(), "flock initialized");
        Ok(())
    }

    fn step(&mut self) -> Result<(), SearchError> {
        if !self.progress.begin_step(NAME)? {
            return Ok(());
        }
        for p in 0..self.flock.len() {
            self.move_crow(p);
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
                (0..8).map(|i| Task::new(i, 800 + 300 * i as u64)).collect(),
                (0..4)
                    .map(|i| Worker::new(i, 500.0 * (i as f64 + 1.0), 2 + i as u32))
                    .collect(),
            )
            .unwrap(),
        )
    }

    fn config() -> CsaConfig {
        CsaConfig::default()
            .with_flock_size(12)
            .with_max_iterations(15)
            .with_seed(3)
    }

    #[test]
    fn test_initial_best_is_fittest_crow() {
        let mut csa = CsaSearch::new(problem(), config()).unwrap();
        csa.initialize().unwrap();
        let max = csa
            .positions()
            .iter()
            .map(|a| a.fitness())
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(csa.best_so_far().unwrap().fitness(), max);
    }

    #[test]
    fn test_solve_converges_and_is_monotone() {
        let mut csa = CsaSearch::new(problem(), config()).unwrap();
        csa.solve().unwrap();
        assert_eq!(csa.state(), SearchState::Converged);
        for w in csa.progress().fitness_history().windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    #[test]
    fn test_positions_never_worse_than_memory() {
        let mut csa = CsaSearch::new(problem(), config()).unwrap();
        csa.initialize().unwrap();
        for _ in 0..5 {
            csa.step().unwrap();
            for crow in &csa.flock {
                assert!(crow.solution.fitness() >= crow.memory_fitness);
                assert!(crow.position.is_feasible());
                assert_eq!(crow.solution.mapping(), crow.position.to_mapping().as_slice());
            }
        }
    }

    #[test]
    fn test_memory_follow_variant_runs() {
        let cfg = config().with_follow(FollowTarget::Memory);
        let best = CsaSearch::new(problem(), cfg).unwrap().solve().unwrap();
        assert!(best.mapping().iter().all(|&w| w < 4));
    }

    #[test]
    fn test_deterministic_with_seed() {
        let a = CsaSearch::new(problem(), config()).unwrap().solve().unwrap();
        let b = CsaSearch::new(problem(), config()).unwrap().solve().unwrap();
        assert_eq!(a, b);
    }
}
