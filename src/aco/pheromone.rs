//! Task × worker pheromone trails.

use std::sync::Arc;

use tracing::warn;

use crate::model::{Assignment, Problem};
use crate::sampler::Sampler;
use crate::strategy::population::roulette_index;

/// Row-major `tasks × workers` trail levels.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    workers: usize,
    levels: Vec<f64>,
}

impl PheromoneMatrix {
    pub fn new(tasks: usize, workers: usize, initial: f64) -> Self {
        Self {
            workers,
            levels: vec![initial; tasks * workers],
        }
    }

    pub fn tasks(&self) -> usize {
        if self.workers == 0 {
            0
        } else {
            self.levels.len() / self.workers
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Trail levels from `task` to every worker.
    pub fn row(&self, task: usize) -> &[f64] {
        let start = task * self.workers;
        &self.levels[start..start + self.workers]
    }

    pub fn level(&self, task: usize, worker: usize) -> f64 {
        self.levels[task * self.workers + worker]
    }

    /// Multiplies every trail by `1 - rate`.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = 1.0 - rate;
        for level in &mut self.levels {
            *level *= keep;
        }
    }

    /// Adds `amount` to every edge used by `mapping`.
    pub fn deposit(&mut self, mapping: &[usize], amount: f64) {
        for (task, &worker) in mapping.iter().enumerate() {
            if worker < self.workers {
                self.levels[task * self.workers + worker] += amount;
            }
        }
    }

    /// Picks a worker for `task` by roulette over its row; a row without
    /// positive trail falls back to a uniform pick.
    pub fn choose_worker<S: Sampler + ?Sized>(&self, task: usize, sampler: &mut S) -> usize {
        let row = self.row(task);
        if !(row.iter().sum::<f64>() > 0.0) {
            warn!(task, "no pheromone on any edge, choosing uniformly");
        }
        roulette_index(row, sampler)
    }

    /// Builds one ant's assignment task by task.
    pub fn construct<S: Sampler + ?Sized>(
        &self,
        problem: &Arc<Problem>,
        sampler: &mut S,
    ) -> Assignment {
        let mapping = (0..problem.task_count())
            .map(|task| self.choose_worker(task, sampler))
            .collect();
        Assignment::from_mapping(Arc::clone(problem), mapping)
    }
}

/// Trail deposited by an ant of `cost`: `weight / cost`, or nothing when the
/// cost is zero, negative or not finite.
pub fn deposit_amount(cost: f64, weight: f64) -> f64 {
    if cost > 0.0 && cost.is_finite() {
        weight / cost
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Task, Worker};
    use crate::sampler::{FixedSampler, SeededSampler};

    fn problem() -> Arc<Problem> {
        Arc::new(
            Problem::new(
                (0..3).map(|i| Task::new(i, 1000)).collect(),
                (0..4).map(|i| Worker::new(i, 1000.0, 2)).collect(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_evaporate_and_deposit() {
        let mut m = PheromoneMatrix::new(3, 4, 0.5);
        m.evaporate(0.05);
        assert!((m.level(0, 0) - 0.475).abs() < 1e-12);
        m.deposit(&[1, 3, 0], 2.0);
        assert!((m.level(0, 1) - 2.475).abs() < 1e-12);
        assert!((m.level(1, 3) - 2.475).abs() < 1e-12);
        assert!((m.level(2, 0) - 2.475).abs() < 1e-12);
        assert!((m.level(2, 1) - 0.475).abs() < 1e-12);
        assert_eq!(m.tasks(), 3);
    }

    #[test]
    fn test_choose_follows_trail() {
        let mut m = PheromoneMatrix::new(1, 4, 0.0);
        m.deposit(&[2], 1.0);
        let mut s = SeededSampler::new(4);
        for _ in 0..50 {
            assert_eq!(m.choose_worker(0, &mut s), 2);
        }
    }

    #[test]
    fn test_choose_zero_row_is_uniform() {
        let m = PheromoneMatrix::new(1, 4, 0.0);
        assert_eq!(m.choose_worker(0, &mut FixedSampler::new(0.6)), 2);
    }

    #[test]
    fn test_construct_in_range() {
        let p = problem();
        let m = PheromoneMatrix::new(3, 4, 0.5);
        let ant = m.construct(&p, &mut SeededSampler::new(8));
        assert_eq!(ant.task_count(), 3);
        assert!(ant.mapping().iter().all(|&w| w < 4));
    }

    #[test]
    fn test_deposit_amount() {
        assert!((deposit_amount(4.0, 1.0) - 0.25).abs() < 1e-12);
        assert_eq!(deposit_amount(0.0, 1.0), 0.0);
        assert!(deposit_amount(f64::MAX, 1.0) < 1e-300);
        assert_eq!(deposit_amount(f64::NAN, 1.0), 0.0);
    }
}
