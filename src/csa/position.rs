//! One-hot task × worker crow positions.

use crate::sampler::Sampler;

/// Row-major `tasks × workers` matrix. A feasible position has exactly one
/// `1.0` per row.
#[derive(Debug, Clone, PartialEq)]
pub struct CrowPosition {
    workers: usize,
    cells: Vec<f64>,
}

impl CrowPosition {
    /// One-hot encoding of `mapping`.
    pub fn from_mapping(mapping: &[usize], workers: usize) -> Self {
        let mut cells = vec![0.0; mapping.len() * workers];
        for (task, &w) in mapping.iter().enumerate() {
            cells[task * workers + w] = 1.0;
        }
        Self { workers, cells }
    }

    /// Uniformly random one-hot position.
    pub fn random<S: Sampler + ?Sized>(tasks: usize, workers: usize, sampler: &mut S) -> Self {
        let mapping: Vec<usize> = (0..tasks).map(|_| sampler.int_below(workers)).collect();
        Self::from_mapping(&mapping, workers)
    }

    pub fn tasks(&self) -> usize {
        if self.workers == 0 {
            0
        } else {
            self.cells.len() / self.workers
        }
    }

    pub fn row(&self, task: usize) -> &[f64] {
        &self.cells[task * self.workers..(task + 1) * self.workers]
    }

    /// Continuous move `follower + r_i · flight · (followed - follower)`,
    /// with one random factor `r_i` per task row, snapped back to one-hot.
    pub fn fly_toward<S: Sampler + ?Sized>(
        &self,
        followed: &CrowPosition,
        flight_length: f64,
        sampler: &mut S,
    ) -> CrowPosition {
        let mut cells = Vec::with_capacity(self.cells.len());
        for task in 0..self.tasks() {
            let r = sampler.sample();
            for (x, y) in self.row(task).iter().zip(followed.row(task)) {
                cells.push(x + r * flight_length * (y - x));
            }
        }
        CrowPosition {
            workers: self.workers,
            cells,
        }
        .standardized()
    }

    /// Keeps only the first maximum of each row as `1.0`.
    pub fn standardized(&self) -> CrowPosition {
        let mapping = self.to_mapping();
        Self::from_mapping(&mapping, self.workers)
    }

    /// Every row sums to exactly one.
    pub fn is_feasible(&self) -> bool {
        (0..self.tasks()).all(|t| self.row(t).iter().sum::<f64>() == 1.0)
    }

    /// Arg-max worker per task; the first maximum wins ties.
    pub fn to_mapping(&self) -> Vec<usize> {
        (0..self.tasks())
            .map(|t| {
                let row = self.row(t);
                let mut max = 0;
                for (j, v) in row.iter().enumerate().skip(1) {
                    if *v > row[max] {
                        max = j;
                    }
                }
                max
            })
            .collect()
    }
}
