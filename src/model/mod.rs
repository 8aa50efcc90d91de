//! Placement problem model.
//!
//! - [`Task`] / [`Worker`]: immutable instance data
//! - [`Problem`]: the instance plus its [`CostModel`] and [`FitnessTransform`]
//! - [`Assignment`]: a total task → worker mapping with lazily cached cost

mod assignment;
pub mod cost;
mod fitness;
mod problem;
mod task;
mod worker;

pub use assignment::{Assignment, WorkerLoad};
pub use cost::{
    CompositeCost, CostModel, CostWeights, LoadBalanceCost, MakespanCost, MonetaryCost,
    WeightedUtilizationCost, MAX_COST,
};
pub use fitness::FitnessTransform;
pub use problem::Problem;
pub use task::{ResourceDemand, Task};
pub use worker::{PriceModel, Worker};
