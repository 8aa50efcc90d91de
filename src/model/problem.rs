//! A fixed placement instance: tasks, workers, cost model and fitness transform.

use std::fmt;
use std::sync::Arc;

use super::cost::{CostModel, WeightedUtilizationCost};
use super::fitness::FitnessTransform;
use super::task::Task;
use super::worker::Worker;
use crate::error::SearchError;

/// Read-only problem instance shared by every candidate [`Assignment`](super::Assignment).
///
/// Task and worker ids must be dense (`tasks[i].id == i`), and every worker
/// must have positive processing capacity and at least one core.
///
/// # Examples
///
/// ```
/// use u_placement::model::{MakespanCost, Problem, Task, Worker};
///
/// let tasks = vec![Task::new(0, 1000), Task::new(1, 3000)];
/// let workers = vec![Worker::new(0, 500.0, 2), Worker::new(1, 1500.0, 6)];
/// let problem = Problem::new(tasks, workers)
///     .unwrap()
///     .with_cost_model(MakespanCost);
/// assert_eq!(problem.task_count(), 2);
/// assert!((problem.evaluate_cost(&[1, 1]) - 2.0).abs() < 1e-12);
/// ```
#[derive(Clone)]
pub struct Problem {
    tasks: Vec<Task>,
    workers: Vec<Worker>,
    cost_model: Arc<dyn CostModel>,
    fitness: FitnessTransform,
}

impl Problem {
    /// Builds a problem with the default weighted-utilization cost and
    /// `1 / (1 + cost)` fitness.
    pub fn new(tasks: Vec<Task>, workers: Vec<Worker>) -> Result<Self, SearchError> {
        if tasks.is_empty() || workers.is_empty() {
            return Err(SearchError::EmptyProblem {
                tasks: tasks.len(),
                workers: workers.len(),
            });
        }
        if let Some((i, t)) = tasks.iter().enumerate().find(|(i, t)| t.id != *i) {
            return Err(SearchError::InvalidInstance(format!(
                "task at index {i} has id {}",
                t.id
            )));
        }
        for (i, w) in workers.iter().enumerate() {
            if w.id != i {
                return Err(SearchError::InvalidInstance(format!(
                    "worker at index {i} has id {}",
                    w.id
                )));
            }
            if !(w.processing_capacity > 0.0) || w.core_count == 0 {
                return Err(SearchError::InvalidInstance(format!(
                    "worker {i} needs positive processing capacity and cores"
                )));
            }
        }
        Ok(Self {
            tasks,
            workers,
            cost_model: Arc::new(WeightedUtilizationCost::default()),
            fitness: FitnessTransform::default(),
        })
    }

    /// Replaces the cost model.
    pub fn with_cost_model<C: CostModel + 'static>(mut self, model: C) -> Self {
        self.cost_model = Arc::new(model);
        self
    }

    /// Replaces the cost model with a shared one.
    pub fn with_shared_cost_model(mut self, model: Arc<dyn CostModel>) -> Self {
        self.cost_model = model;
        self
    }

    /// Replaces the fitness transform.
    pub fn with_fitness(mut self, fitness: FitnessTransform) -> Self {
        self.fitness = fitness;
        self
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn fitness_transform(&self) -> FitnessTransform {
        self.fitness
    }

    /// Execution time of `task` on `worker` at full capacity.
    pub fn execution_time(&self, task: usize, worker: usize) -> f64 {
        self.workers[worker].execution_time(self.tasks[task].instruction_length)
    }

    /// Cost of a raw mapping under this problem's cost model.
    pub fn evaluate_cost(&self, mapping: &[usize]) -> f64 {
        self.cost_model.cost(self, mapping)
    }

    pub fn fitness_of(&self, cost: f64) -> f64 {
        self.fitness.apply(cost)
    }

    /// Returns `Err` unless `mapping` is total and every worker id is in range.
    pub fn check_mapping(&self, mapping: &[usize]) -> Result<(), SearchError> {
        if mapping.len() != self.tasks.len() {
            return Err(SearchError::InvalidInstance(format!(
                "mapping covers {} tasks, expected {}",
                mapping.len(),
                self.tasks.len()
            )));
        }
        if let Some((t, w)) = mapping
            .iter()
            .enumerate()
            .find(|&(_, &w)| w >= self.workers.len())
        {
            return Err(SearchError::InvalidInstance(format!(
                "task {t} mapped to unknown worker {w}"
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Problem")
            .field("tasks", &self.tasks.len())
            .field("workers", &self.workers.len())
            .field("fitness", &self.fitness)
            .finish_non_exhaustive()
    }
}
