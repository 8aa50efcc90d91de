//! Search state machine bookkeeping and results.

use tracing::debug;

use crate::error::SearchError;
use crate::model::Assignment;

/// Lifecycle of a [`SearchStrategy`](super::SearchStrategy).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Uninitialized,
    /// Initial population built, no step taken yet.
    Populated,
    Iterating,
    /// Iteration budget exhausted; further steps are no-ops.
    Converged,
}

/// Best-so-far tracking shared by every strategy.
///
/// The best assignment only ever changes to a clone of a strictly fitter
/// candidate, so its fitness is non-decreasing for the whole run.
#[derive(Debug, Clone)]
pub struct SearchProgress {
    state: SearchState,
    best: Option<Assignment>,
    iterations: usize,
    fitness_history: Vec<f64>,
    solve_time_seconds: f64,
}

impl Default for SearchProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchProgress {
    pub fn new() -> Self {
        Self {
            state: SearchState::Uninitialized,
            best: None,
            iterations: 0,
            fitness_history: Vec::new(),
            solve_time_seconds: 0.0,
        }
    }

    /// Resets to `Populated` with the fittest member of `population` as best.
    pub fn populate(&mut self, population: &[Assignment]) {
        self.best = None;
        self.iterations = 0;
        self.fitness_history.clear();
        self.solve_time_seconds = 0.0;
        self.offer_best_of(population);
        if let Some(best) = &self.best {
            self.fitness_history.push(best.fitness());
        }
        self.state = SearchState::Populated;
    }

    /// Replaces the best with a clone of `candidate` if it is strictly fitter.
    pub fn offer(&mut self, candidate: &Assignment) -> bool {
        let improves = match &self.best {
            Some(best) => candidate.fitness() > best.fitness(),
            None => true,
        };
        if improves {
            self.best = Some(candidate.clone());
        }
        improves
    }

    /// Offers every member of `population`.
    pub fn offer_best_of(&mut self, population: &[Assignment]) -> bool {
        match super::population::best_index(population) {
            Some(i) => self.offer(&population[i]),
            None => false,
        }
    }

    /// Guards the start of a step.
    ///
    /// Returns `Ok(false)` once converged, and `NotInitialized` before
    /// [`populate`](Self::populate).
    pub fn begin_step(&mut self, strategy: &'static str) -> Result<bool, SearchError> {
        match self.state {
            SearchState::Uninitialized => Err(SearchError::NotInitialized { strategy }),
            SearchState::Converged => Ok(false),
            SearchState::Populated | SearchState::Iterating => {
                self.state = SearchState::Iterating;
                Ok(true)
            }
        }
    }

    /// Records a finished iteration and converges once `max_iterations` is reached.
    pub fn complete_iteration(&mut self, max_iterations: usize) {
        self.iterations += 1;
        if let Some(best) = &self.best {
            self.fitness_history.push(best.fitness());
        }
        if self.iterations >= max_iterations {
            self.state = SearchState::Converged;
        }
    }

    /// Emits a progress line every `every` iterations (0 disables).
    pub fn log_if_due(&self, strategy: &'static str, every: usize) {
        if every == 0 || self.iterations % every != 0 {
            return;
        }
        if let Some(best) = &self.best {
            debug!(
                strategy,
                iteration = self.iterations,
                best_fitness = best.fitness(),
                "progress"
            );
        }
    }

    /// Marks the search converged regardless of the iteration count.
    pub fn converge(&mut self) {
        self.state = SearchState::Converged;
    }

    pub fn add_solve_time(&mut self, seconds: f64) {
        self.solve_time_seconds += seconds;
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn best(&self) -> Option<&Assignment> {
        self.best.as_ref()
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Best fitness after initialization and after each iteration.
    pub fn fitness_history(&self) -> &[f64] {
        &self.fitness_history
    }

    pub fn solve_time_seconds(&self) -> f64 {
        self.solve_time_seconds
    }
}

/// Summary of a finished (or paused) search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The best assignment found during the entire run.
    pub best: Assignment,
    pub best_fitness: f64,
    pub best_cost: f64,
    /// Number of iterations executed.
    pub iterations: usize,
    /// Best fitness after initialization and after each iteration.
    pub fitness_history: Vec<f64>,
    pub solve_time_seconds: f64,
}

impl SearchOutcome {
    pub(crate) fn from_progress(
        strategy: &'static str,
        progress: &SearchProgress,
    ) -> Result<Self, SearchError> {
        let best = progress
            .best()
            .cloned()
            .ok_or(SearchError::NotInitialized { strategy })?;
        Ok(Self {
            best_fitness: best.fitness(),
            best_cost: best.cost(),
            best,
            iterations: progress.iterations(),
            fitness_history: progress.fitness_history().to_vec(),
            solve_time_seconds: progress.solve_time_seconds(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Problem, Task, Worker};
    use std::sync::Arc;

    fn assignments() -> (Assignment, Assignment) {
        let p = Arc::new(
            Problem::new(
                vec![Task::new(0, 1000), Task::new(1, 1000)],
                vec![Worker::new(0, 1000.0, 1), Worker::new(1, 100.0, 1)],
            )
            .unwrap(),
        );
        let good = Assignment::new(p.clone(), vec![0, 0]).unwrap();
        let bad = Assignment::new(p, vec![1, 1]).unwrap();
        assert!(good.fitness() > bad.fitness());
        (good, bad)
    }

    #[test]
    fn test_lifecycle() {
        let (good, bad) = assignments();
        let mut progress = SearchProgress::new();
        assert_eq!(progress.state(), SearchState::Uninitialized);
        assert!(progress.begin_step("GA").is_err());

        progress.populate(&[bad.clone(), good.clone()]);
        assert_eq!(progress.state(), SearchState::Populated);
        assert_eq!(progress.best(), Some(&good));
        assert_eq!(progress.fitness_history().len(), 1);

        assert!(progress.begin_step("GA").unwrap());
        assert_eq!(progress.state(), SearchState::Iterating);
        progress.complete_iteration(2);
        assert_eq!(progress.state(), SearchState::Iterating);
        assert!(progress.begin_step("GA").unwrap());
        progress.complete_iteration(2);
        assert_eq!(progress.state(), SearchState::Converged);
        assert!(!progress.begin_step("GA").unwrap());
        assert_eq!(progress.iterations(), 2);
        assert_eq!(progress.fitness_history().len(), 3);
    }

    #[test]
    fn test_offer_is_monotone() {
        let (good, bad) = assignments();
        let mut progress = SearchProgress::new();
        assert!(progress.offer(&bad));
        assert!(progress.offer(&good));
        assert!(!progress.offer(&bad));
        assert!(!progress.offer(&good));
        assert_eq!(progress.best(), Some(&good));
    }

    #[test]
    fn test_offer_clones() {
        let (good, _) = assignments();
        let mut progress = SearchProgress::new();
        let mut candidate = good.clone();
        progress.offer(&candidate);
        candidate.bind(0, 1).unwrap();
        assert_eq!(progress.best(), Some(&good));
    }

    #[test]
    fn test_outcome_requires_best() {
        let progress = SearchProgress::new();
        assert!(matches!(
            SearchOutcome::from_progress("PSO", &progress),
            Err(SearchError::NotInitialized { strategy: "PSO" })
        ));
    }
}
