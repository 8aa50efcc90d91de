//! Cost models for candidate assignments.
//!
//! A [`CostModel`] maps a task → worker mapping to a scalar penalty (lower is
//! better). The default, [`WeightedUtilizationCost`], aggregates per-worker
//! utilization and relative load terms. The other models cover make-span,
//! load balance and monetary objectives, and [`CompositeCost`] blends them.
//!
//! Every model returns [`MAX_COST`] when no worker hosts a task, so an empty
//! mapping ranks below any real one instead of failing.

use super::problem::Problem;

/// Sentinel cost for mappings that use no worker.
pub const MAX_COST: f64 = f64::MAX;

/// Scalar penalty of a mapping.
///
/// `mapping[task] = worker` for every task of `problem`; implementations may
/// assume all worker ids are in range.
pub trait CostModel: Send + Sync {
    fn cost(&self, problem: &Problem, mapping: &[usize]) -> f64;
}

/// Tasks grouped by hosting worker, in worker-id order.
fn group_by_worker(problem: &Problem, mapping: &[usize]) -> Vec<Vec<usize>> {
    let mut groups = vec![Vec::new(); problem.worker_count()];
    for (task, &worker) in mapping.iter().enumerate() {
        if let Some(group) = groups.get_mut(worker) {
            group.push(task);
        }
    }
    groups
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Weights of the five per-worker terms of [`WeightedUtilizationCost`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostWeights {
    pub ram: f64,
    pub bandwidth: f64,
    pub cpu: f64,
    /// Weight of `Σ task cores / worker cores`.
    pub core_load: f64,
    /// Weight of `Σ task length / worker capacity`.
    pub completion_time: f64,
}

impl CostWeights {
    /// 0.2 RAM, 0.1 bandwidth, 0.25 CPU, 0.2 core load, 0.25 completion time.
    pub fn reference() -> Self {
        Self {
            ram: 0.2,
            bandwidth: 0.1,
            cpu: 0.25,
            core_load: 0.2,
            completion_time: 0.25,
        }
    }

    /// 0.2 on every term.
    pub fn uniform() -> Self {
        Self {
            ram: 0.2,
            bandwidth: 0.2,
            cpu: 0.2,
            core_load: 0.2,
            completion_time: 0.2,
        }
    }

    /// Throughput-heavy scheme: 0.2 RAM/bandwidth/core load, 0.5 CPU and completion time.
    pub fn throughput_heavy() -> Self {
        Self {
            ram: 0.2,
            bandwidth: 0.2,
            cpu: 0.5,
            core_load: 0.2,
            completion_time: 0.5,
        }
    }

    pub fn sum(&self) -> f64 {
        self.ram + self.bandwidth + self.cpu + self.core_load + self.completion_time
    }

    /// Returns `Err` if any weight is negative or not finite.
    pub fn validate(&self) -> Result<(), String> {
        let all = [
            ("ram", self.ram),
            ("bandwidth", self.bandwidth),
            ("cpu", self.cpu),
            ("core_load", self.core_load),
            ("completion_time", self.completion_time),
        ];
        for (name, w) in all {
            if !w.is_finite() || w < 0.0 {
                return Err(format!("weight {name} must be finite and non-negative"));
            }
        }
        Ok(())
    }
}

impl Default for CostWeights {
    fn default() -> Self {
        Self::reference()
    }
}

/// Weighted per-worker utilization cost.
///
/// For each worker hosting at least one task:
///
/// ```text
/// w_ram·Σram + w_bw·Σbw + w_cpu·Σcpu + w_core·(Σcores / worker cores)
///     + w_time·(Σlength / worker capacity)
/// ```
///
/// The total is the sum over used workers divided by the number of used
/// workers. With `standardized` set, two spread terms are added before the
/// division: `w_core·mean(core_load_i / mean(core_load))` and
/// `w_time·mean(completion_i / mean(core_load))`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedUtilizationCost {
    pub weights: CostWeights,
    pub standardized: bool,
}

impl WeightedUtilizationCost {
    pub fn new(weights: CostWeights) -> Self {
        Self {
            weights,
            standardized: false,
        }
    }

    pub fn with_standardization(mut self, on: bool) -> Self {
        self.standardized = on;
        self
    }
}

impl CostModel for WeightedUtilizationCost {
    fn cost(&self, problem: &Problem, mapping: &[usize]) -> f64 {
        let w = &self.weights;
        let mut total = 0.0;
        let mut core_loads = Vec::new();
        let mut completions = Vec::new();

        for (worker_id, tasks) in group_by_worker(problem, mapping).iter().enumerate() {
            if tasks.is_empty() {
                continue;
            }
            let worker = &problem.workers()[worker_id];
            let (mut ram, mut bw, mut cpu, mut cores, mut length) = (0.0, 0.0, 0.0, 0.0, 0.0);
            for &t in tasks {
                let task = &problem.tasks()[t];
                ram += task.demand.ram;
                bw += task.demand.bandwidth;
                cpu += task.demand.cpu;
                cores += f64::from(task.demand.cores);
                length += task.instruction_length as f64;
            }
            let core_load = ratio(cores, f64::from(worker.core_count));
            let completion = ratio(length, worker.processing_capacity);
            core_loads.push(core_load);
            completions.push(completion);

            total += w.ram * ram
                + w.bandwidth * bw
                + w.cpu * cpu
                + w.core_load * core_load
                + w.completion_time * completion;
        }

        let used = core_loads.len();
        if used == 0 {
            return MAX_COST;
        }

        if self.standardized {
            let mean_core = core_loads.iter().sum::<f64>() / used as f64;
            let core_spread =
                core_loads.iter().map(|c| ratio(*c, mean_core)).sum::<f64>() / used as f64;
            let time_spread =
                completions.iter().map(|c| ratio(*c, mean_core)).sum::<f64>() / used as f64;
            total += core_spread * w.core_load + time_spread * w.completion_time;
        }

        total / used as f64
    }
}

/// Longest single-task execution time across all workers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MakespanCost;

impl CostModel for MakespanCost {
    fn cost(&self, problem: &Problem, mapping: &[usize]) -> f64 {
        if mapping.is_empty() {
            return MAX_COST;
        }
        mapping
            .iter()
            .enumerate()
            .map(|(t, &w)| problem.execution_time(t, w))
            .fold(0.0, f64::max)
    }
}

/// Spread of execution times around each worker's mean.
///
/// `sqrt(Σ_task (exec - mean_exec(worker))² / used_workers)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadBalanceCost;

impl CostModel for LoadBalanceCost {
    fn cost(&self, problem: &Problem, mapping: &[usize]) -> f64 {
        let groups = group_by_worker(problem, mapping);
        let mut used = 0usize;
        let mut variance = 0.0;
        for (worker, tasks) in groups.iter().enumerate() {
            if tasks.is_empty() {
                continue;
            }
            used += 1;
            let times: Vec<f64> = tasks
                .iter()
                .map(|&t| problem.execution_time(t, worker))
                .collect();
            let mean = times.iter().sum::<f64>() / times.len() as f64;
            variance += times.iter().map(|x| (x - mean).powi(2)).sum::<f64>();
        }
        if used == 0 {
            return MAX_COST;
        }
        (variance / used as f64).sqrt()
    }
}

/// Rental price of the hosting worker, charged once per task.
///
/// Per task: `cpu·capacity·exec + ram·ram_capacity + storage·storage_capacity
/// + bandwidth·bandwidth_capacity`, using the hosting worker's prices.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonetaryCost;

impl CostModel for MonetaryCost {
    fn cost(&self, problem: &Problem, mapping: &[usize]) -> f64 {
        if mapping.is_empty() {
            return MAX_COST;
        }
        mapping
            .iter()
            .enumerate()
            .map(|(t, &w)| {
                let worker = &problem.workers()[w];
                let p = &worker.price;
                p.cpu * worker.processing_capacity * problem.execution_time(t, w)
                    + p.ram * worker.ram_capacity
                    + p.storage * worker.storage_capacity
                    + p.bandwidth * worker.bandwidth_capacity
            })
            .sum()
    }
}

/// `(α·makespan + β·load_balance + γ·monetary) · 1e-2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeCost {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Default for CompositeCost {
    /// α = 0.8, β = 0, γ = 0.2.
    fn default() -> Self {
        Self {
            alpha: 0.8,
            beta: 0.0,
            gamma: 0.2,
        }
    }
}

impl CostModel for CompositeCost {
    fn cost(&self, problem: &Problem, mapping: &[usize]) -> f64 {
        if mapping.is_empty() {
            return MAX_COST;
        }
        let makespan = MakespanCost.cost(problem, mapping);
        let balance = if self.beta == 0.0 {
            0.0
        } else {
            LoadBalanceCost.cost(problem, mapping)
        };
        let monetary = MonetaryCost.cost(problem, mapping);
        (self.alpha * makespan + self.beta * balance + self.gamma * monetary) * 1e-2
    }
}
