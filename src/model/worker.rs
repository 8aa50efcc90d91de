//! Execution resources with fixed capacity.

/// Price per unit of each resource, supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceModel {
    pub cpu: f64,
    pub ram: f64,
    pub storage: f64,
    pub bandwidth: f64,
}

impl PriceModel {
    /// Same price for every resource.
    pub fn flat(price: f64) -> Self {
        Self {
            cpu: price,
            ram: price,
            storage: price,
            bandwidth: price,
        }
    }
}

impl Default for PriceModel {
    fn default() -> Self {
        Self::flat(0.00001)
    }
}

/// A worker that can host any number of tasks.
///
/// `id` must equal the worker's index in [`Problem::workers`](super::Problem::workers).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Worker {
    pub id: usize,
    /// Aggregate instruction rate across all cores.
    pub processing_capacity: f64,
    pub core_count: u32,
    pub ram_capacity: f64,
    pub bandwidth_capacity: f64,
    pub storage_capacity: f64,
    pub price: PriceModel,
}

impl Worker {
    /// Creates a worker with the given compute capacity and no other resources.
    pub fn new(id: usize, processing_capacity: f64, core_count: u32) -> Self {
        Self {
            id,
            processing_capacity,
            core_count,
            ram_capacity: 0.0,
            bandwidth_capacity: 0.0,
            storage_capacity: 0.0,
            price: PriceModel::default(),
        }
    }

    pub fn with_ram(mut self, capacity: f64) -> Self {
        self.ram_capacity = capacity;
        self
    }

    pub fn with_bandwidth(mut self, capacity: f64) -> Self {
        self.bandwidth_capacity = capacity;
        self
    }

    pub fn with_storage(mut self, capacity: f64) -> Self {
        self.storage_capacity = capacity;
        self
    }

    pub fn with_price(mut self, price: PriceModel) -> Self {
        self.price = price;
        self
    }

    /// Time this worker needs for `instructions` at full capacity.
    pub fn execution_time(&self, instructions: u64) -> f64 {
        if self.processing_capacity > 0.0 {
            instructions as f64 / self.processing_capacity
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_price() {
        let p = PriceModel::default();
        assert!((p.cpu - 0.00001).abs() < 1e-15);
        assert!((p.bandwidth - 0.00001).abs() < 1e-15);
    }

    #[test]
    fn test_execution_time() {
        let w = Worker::new(0, 1000.0, 4);
        assert!((w.execution_time(2500) - 2.5).abs() < 1e-12);
        let idle = Worker::new(1, 0.0, 1);
        assert_eq!(idle.execution_time(100), 0.0);
    }
}
