//! Candidate solutions: a total task → worker mapping with cached cost.

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

use super::problem::Problem;
use crate::error::SearchError;

/// Static per-worker summary of an assignment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerLoad {
    pub worker: usize,
    /// Ids of the hosted tasks, ascending.
    pub tasks: Vec<usize>,
    pub cores_demanded: u32,
    /// `cores_demanded / core_count`.
    pub relative_core_load: f64,
    /// `Σ instruction_length / processing_capacity`.
    pub estimated_completion: f64,
}

/// Maps every task of a [`Problem`] to exactly one worker.
///
/// Cost is computed lazily on first access and cached until the mapping
/// changes. Cloning copies the mapping and the cached cost; clones never
/// share mutable state.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_placement::model::{Assignment, Problem, Task, Worker};
///
/// let problem = Arc::new(Problem::new(
///     vec![Task::new(0, 1000), Task::new(1, 2000)],
///     vec![Worker::new(0, 1000.0, 1), Worker::new(1, 2000.0, 2)],
/// ).unwrap());
///
/// let mut a = Assignment::new(problem, vec![0, 0]).unwrap();
/// let before = a.cost();
/// a.bind(1, 1).unwrap();
/// assert_ne!(a.cost(), before);
/// ```
#[derive(Clone)]
pub struct Assignment {
    problem: Arc<Problem>,
    mapping: Vec<usize>,
    cost: Cell<Option<f64>>,
}

impl Assignment {
    /// Creates an assignment after checking that `mapping` is total and in range.
    pub fn new(problem: Arc<Problem>, mapping: Vec<usize>) -> Result<Self, SearchError> {
        problem.check_mapping(&mapping)?;
        Ok(Self::from_mapping(problem, mapping))
    }

    /// Creates an assignment from a mapping the caller has already checked.
    pub(crate) fn from_mapping(problem: Arc<Problem>, mapping: Vec<usize>) -> Self {
        debug_assert_eq!(mapping.len(), problem.task_count());
        Self {
            problem,
            mapping,
            cost: Cell::new(None),
        }
    }

    /// Moves `task` to `worker`, invalidating the cached cost.
    pub fn bind(&mut self, task: usize, worker: usize) -> Result<(), SearchError> {
        if task >= self.mapping.len() {
            return Err(SearchError::InvalidInstance(format!("unknown task {task}")));
        }
        if worker >= self.problem.worker_count() {
            return Err(SearchError::InvalidInstance(format!(
                "unknown worker {worker}"
            )));
        }
        self.assign(task, worker);
        Ok(())
    }

    /// Unchecked [`bind`](Self::bind) for operators that already normalized ids.
    pub(crate) fn assign(&mut self, task: usize, worker: usize) {
        debug_assert!(worker < self.problem.worker_count());
        if self.mapping[task] != worker {
            self.mapping[task] = worker;
            self.cost.set(None);
        }
    }

    pub fn worker_of(&self, task: usize) -> usize {
        self.mapping[task]
    }

    pub fn mapping(&self) -> &[usize] {
        &self.mapping
    }

    pub fn problem(&self) -> &Arc<Problem> {
        &self.problem
    }

    pub fn task_count(&self) -> usize {
        self.mapping.len()
    }

    /// Cost under the problem's cost model; lower is better.
    pub fn cost(&self) -> f64 {
        match self.cost.get() {
            Some(c) => c,
            None => {
                let c = self.problem.evaluate_cost(&self.mapping);
                self.cost.set(Some(c));
                c
            }
        }
    }

    /// Fitness derived from [`cost`](Self::cost); higher is better.
    pub fn fitness(&self) -> f64 {
        self.problem.fitness_of(self.cost())
    }

    pub fn is_cost_cached(&self) -> bool {
        self.cost.get().is_some()
    }

    /// Drops the cached cost, forcing the next access to recompute.
    pub fn invalidate(&self) {
        self.cost.set(None);
    }

    /// Task ids hosted by `worker`.
    pub fn tasks_on(&self, worker: usize) -> Vec<usize> {
        self.mapping
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w == worker)
            .map(|(t, _)| t)
            .collect()
    }

    /// Number of workers hosting at least one task.
    pub fn used_workers(&self) -> usize {
        let mut used = vec![false; self.problem.worker_count()];
        for &w in &self.mapping {
            used[w] = true;
        }
        used.into_iter().filter(|u| *u).count()
    }

    /// Per-worker load summary for every worker, used or not.
    pub fn worker_loads(&self) -> Vec<WorkerLoad> {
        let mut loads: Vec<WorkerLoad> = self
            .problem
            .workers()
            .iter()
            .map(|w| WorkerLoad {
                worker: w.id,
                tasks: Vec::new(),
                cores_demanded: 0,
                relative_core_load: 0.0,
                estimated_completion: 0.0,
            })
            .collect();
        for (t, &w) in self.mapping.iter().enumerate() {
            let task = &self.problem.tasks()[t];
            let load = &mut loads[w];
            load.tasks.push(t);
            load.cores_demanded += task.demand.cores;
            load.estimated_completion += self.problem.execution_time(t, w);
        }
        for load in &mut loads {
            let cores = self.problem.workers()[load.worker].core_count;
            load.relative_core_load = f64::from(load.cores_demanded) / f64::from(cores);
        }
        loads
    }

    /// Euclidean distance between two mappings in worker-id space.
    pub fn distance(&self, other: &Assignment) -> f64 {
        self.mapping
            .iter()
            .zip(&other.mapping)
            .map(|(&a, &b)| {
                let d = a as f64 - b as f64;
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }
}

impl PartialEq for Assignment {
    fn eq(&self, other: &Self) -> bool {
        self.mapping == other.mapping
    }
}

impl fmt::Debug for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assignment")
            .field("mapping", &self.mapping)
            .field("cost", &self.cost.get())
            .finish()
    }
}
