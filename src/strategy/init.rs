//! Initial-population schemes.

use std::sync::Arc;

use crate::model::{Assignment, Problem};
use crate::sampler::{shuffle, Sampler};

/// How a fresh random [`Assignment`] is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitScheme {
    /// Each task goes to a uniformly random worker.
    #[default]
    Uniform,
    /// Workers are shuffled once, then tasks are dealt round-robin.
    RoundRobinShuffled,
    /// Each task goes to the least-used slot of a worker order that is
    /// reshuffled after every task.
    LeastUsedShuffled,
}

impl InitScheme {
    /// Builds one assignment.
    pub fn build<S: Sampler + ?Sized>(self, problem: &Arc<Problem>, sampler: &mut S) -> Assignment {
        let n_tasks = problem.task_count();
        let n_workers = problem.worker_count();
        let mapping = match self {
            Self::Uniform => (0..n_tasks).map(|_| sampler.int_below(n_workers)).collect(),
            Self::RoundRobinShuffled => {
                let mut order: Vec<usize> = (0..n_workers).collect();
                shuffle(&mut order, sampler);
                (0..n_tasks).map(|t| order[t % n_workers]).collect()
            }
            Self::LeastUsedShuffled => {
                let mut order: Vec<usize> = (0..n_workers).collect();
                shuffle(&mut order, sampler);
                let mut usage = vec![0usize; n_workers];
                let mut mapping = Vec::with_capacity(n_tasks);
                for _ in 0..n_tasks {
                    let slot = least_used(&usage);
                    mapping.push(order[slot]);
                    usage[slot] += 1;
                    shuffle(&mut order, sampler);
                }
                mapping
            }
        };
        Assignment::from_mapping(Arc::clone(problem), mapping)
    }

    /// Builds `size` assignments.
    pub fn population<S: Sampler + ?Sized>(
        self,
        problem: &Arc<Problem>,
        size: usize,
        sampler: &mut S,
    ) -> Vec<Assignment> {
        (0..size).map(|_| self.build(problem, sampler)).collect()
    }
}

/// First index holding the minimum count.
fn least_used(usage: &[usize]) -> usize {
    let mut min = 0;
    for (i, &u) in usage.iter().enumerate().skip(1) {
        if u < usage[min] {
            min = i;
        }
    }
    min
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Task, Worker};
    use crate::sampler::{FixedSampler, SeededSampler};

    fn problem(tasks: usize, workers: usize) -> Arc<Problem> {
        Arc::new(
            Problem::new(
                (0..tasks).map(|i| Task::new(i, 1000)).collect(),
                (0..workers).map(|i| Worker::new(i, 1000.0, 2)).collect(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_uniform_in_range() {
        let p = problem(50, 7);
        let mut s = SeededSampler::new(1);
        for a in InitScheme::Uniform.population(&p, 20, &mut s) {
            assert_eq!(a.task_count(), 50);
            assert!(a.mapping().iter().all(|&w| w < 7));
        }
    }

    #[test]
    fn test_round_robin_balances_counts() {
        let p = problem(12, 4);
        let mut s = SeededSampler::new(2);
        let a = InitScheme::RoundRobinShuffled.build(&p, &mut s);
        for w in 0..4 {
            assert_eq!(a.tasks_on(w).len(), 3);
        }
    }

    #[test]
    fn test_least_used_in_range() {
        let p = problem(10, 5);
        let mut s = SeededSampler::new(3);
        let a = InitScheme::LeastUsedShuffled.build(&p, &mut s);
        assert_eq!(a.task_count(), 10);
        assert!(a.mapping().iter().all(|&w| w < 5));
    }

    #[test]
    fn test_fixed_sampler_uniform_picks_first_worker() {
        let p = problem(4, 3);
        let mut s = FixedSampler::new(0.0);
        let a = InitScheme::Uniform.build(&p, &mut s);
        assert_eq!(a.mapping(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_least_used_index() {
        assert_eq!(least_used(&[2, 1, 1, 3]), 1);
        assert_eq!(least_used(&[0, 0]), 0);
    }
}
