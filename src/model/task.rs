//! Units of work to place.

/// Per-unit-time resource consumption of a task, as utilization ratios.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceDemand {
    /// Number of processing cores the task occupies.
    pub cores: u32,
    /// CPU utilization ratio (1.0 = fully busy).
    pub cpu: f64,
    /// RAM utilization ratio.
    pub ram: f64,
    /// Bandwidth utilization ratio.
    pub bandwidth: f64,
}

impl Default for ResourceDemand {
    /// One core, full CPU, and a 1% dynamic share of RAM and bandwidth.
    fn default() -> Self {
        Self {
            cores: 1,
            cpu: 1.0,
            ram: 0.01,
            bandwidth: 0.01,
        }
    }
}

impl ResourceDemand {
    pub fn with_cores(mut self, cores: u32) -> Self {
        self.cores = cores;
        self
    }

    pub fn with_cpu(mut self, cpu: f64) -> Self {
        self.cpu = cpu;
        self
    }

    pub fn with_ram(mut self, ram: f64) -> Self {
        self.ram = ram;
        self
    }

    pub fn with_bandwidth(mut self, bandwidth: f64) -> Self {
        self.bandwidth = bandwidth;
        self
    }
}

/// An immutable unit of work.
///
/// `id` must equal the task's index in [`Problem::tasks`](super::Problem::tasks).
///
/// # Examples
///
/// ```
/// use u_placement::model::{ResourceDemand, Task};
///
/// let task = Task::new(0, 2500)
///     .with_file_size(120)
///     .with_demand(ResourceDemand::default().with_cores(2));
/// assert_eq!(task.demand.cores, 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    pub id: usize,
    /// Work volume in instructions.
    pub instruction_length: u64,
    pub file_size: u64,
    pub output_size: u64,
    pub demand: ResourceDemand,
}

impl Task {
    /// Creates a task with default file sizes and resource demand.
    pub fn new(id: usize, instruction_length: u64) -> Self {
        Self {
            id,
            instruction_length,
            file_size: 0,
            output_size: 0,
            demand: ResourceDemand::default(),
        }
    }

    pub fn with_file_size(mut self, size: u64) -> Self {
        self.file_size = size;
        self
    }

    pub fn with_output_size(mut self, size: u64) -> Self {
        self.output_size = size;
        self
    }

    pub fn with_demand(mut self, demand: ResourceDemand) -> Self {
        self.demand = demand;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_demand() {
        let d = ResourceDemand::default();
        assert_eq!(d.cores, 1);
        assert!((d.cpu - 1.0).abs() < 1e-12);
        assert!((d.ram - 0.01).abs() < 1e-12);
        assert!((d.bandwidth - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_task_builder() {
        let t = Task::new(3, 4000)
            .with_file_size(50)
            .with_output_size(200)
            .with_demand(ResourceDemand::default().with_cpu(0.5).with_ram(0.2));
        assert_eq!(t.id, 3);
        assert_eq!(t.instruction_length, 4000);
        assert_eq!(t.file_size, 50);
        assert_eq!(t.output_size, 200);
        assert!((t.demand.cpu - 0.5).abs() < 1e-12);
        assert!((t.demand.ram - 0.2).abs() < 1e-12);
    }
}
