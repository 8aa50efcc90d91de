//! Mutex-guarded best-so-far for concurrent sub-searches.

use std::sync::{Mutex, MutexGuard};

use crate::model::Assignment;

/// Best assignment shared by the tasks of one concurrent round.
///
/// [`offer`](Self::offer) is the only way to change it and only accepts a
/// strictly fitter candidate, so the outcome of a round does not depend on
/// which task reports first.
#[derive(Debug)]
pub struct SharedBest {
    inner: Mutex<Assignment>,
}

impl SharedBest {
    pub fn new(initial: Assignment) -> Self {
        Self {
            inner: Mutex::new(initial),
        }
    }

    // A panic while holding the lock cannot leave a half-written value:
    // replacement is a single move of a fully built assignment.
    fn lock(&self) -> MutexGuard<'_, Assignment> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replaces the shared best with a clone of `candidate` if it is
    /// strictly fitter. Returns whether it was replaced.
    pub fn offer(&self, candidate: &Assignment) -> bool {
        let fitness = candidate.fitness();
        let mut best = self.lock();
        if fitness > best.fitness() {
            *best = candidate.clone();
            true
        } else {
            false
        }
    }

    pub fn snapshot(&self) -> Assignment {
        self.lock().clone()
    }

    pub fn fitness(&self) -> f64 {
        self.lock().fitness()
    }

    pub fn into_inner(self) -> Assignment {
        self.inner
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
