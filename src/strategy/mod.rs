//! Common search state machine.
//!
//! Every algorithm implements [`SearchStrategy`]:
//!
//! ```text
//! Uninitialized --initialize()--> Populated --step()--> Iterating --step()--> ... --> Converged
//! ```
//!
//! Each strategy owns a [`SearchProgress`] that tracks the best-so-far
//! assignment (never replaced by a worse one), the iteration count and the
//! fitness history. [`SearchStrategy::solve`] drives a strategy from any
//! state to `Converged` and returns the best assignment.
//!
//! # Submodules
//!
//! - [`population`]: worker-id wraparound, fitness ordering, roulette selection
//! - [`InitScheme`]: initial-population builders

mod init;
mod kind;
pub mod population;
mod progress;

pub use init::InitScheme;
pub use kind::{build_strategy, ParseStrategyKindError, StrategyKind};
pub use progress::{SearchOutcome, SearchProgress, SearchState};

use std::time::Instant;

use tracing::{debug, instrument};

use crate::error::SearchError;
use crate::model::Assignment;

/// A population-based search over task → worker assignments.
pub trait SearchStrategy: Send {
    /// Short algorithm name, e.g. `"GA"`.
    fn name(&self) -> &'static str;

    fn progress(&self) -> &SearchProgress;

    fn progress_mut(&mut self) -> &mut SearchProgress;

    /// Builds the initial population. Calling it again restarts the search.
    fn initialize(&mut self) -> Result<(), SearchError>;

    /// Runs one iteration.
    ///
    /// Returns `NotInitialized` before [`initialize`](Self::initialize) and
    /// does nothing once converged.
    fn step(&mut self) -> Result<(), SearchError>;

    fn state(&self) -> SearchState {
        self.progress().state()
    }

    fn best_so_far(&self) -> Option<&Assignment> {
        self.progress().best()
    }

    /// Wall-clock seconds spent inside [`solve`](Self::solve).
    fn solve_time_seconds(&self) -> f64 {
        self.progress().solve_time_seconds()
    }

    /// Runs until converged and returns the best assignment found.
    #[instrument(skip(self), fields(strategy = self.name()))]
    fn solve(&mut self) -> Result<Assignment, SearchError> {
        let start = Instant::now();
        if self.state() == SearchState::Uninitialized {
            self.initialize()?;
        }
        while self.state() != SearchState::Converged {
            self.step()?;
        }
        self.progress_mut()
            .add_solve_time(start.elapsed().as_secs_f64());

        let strategy = self.name();
        let best = self
            .best_so_far()
            .cloned()
            .ok_or(SearchError::NotInitialized { strategy })?;
        debug!(
            iterations = self.progress().iterations(),
            fitness = best.fitness(),
            cost = best.cost(),
            seconds = self.solve_time_seconds(),
            "search finished"
        );
        Ok(best)
    }

    /// Snapshot of the current best and run statistics.
    fn outcome(&self) -> Result<SearchOutcome, SearchError> {
        SearchOutcome::from_progress(self.name(), self.progress())
    }

    /// Single-move neighbor of `current`; not every strategy defines one.
    fn neighbor(&mut self, _current: &Assignment) -> Result<Assignment, SearchError> {
        Err(SearchError::unsupported(self.name(), "neighbor"))
    }

    /// Probability of accepting a worse neighbor; not every strategy defines one.
    fn acceptance_probability(&self) -> Result<f64, SearchError> {
        Err(SearchError::unsupported(self.name(), "acceptance_probability"))
    }
}
