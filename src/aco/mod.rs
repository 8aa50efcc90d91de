//! Ant Colony Optimization (ACO) for task placement.
//!
//! Ants pick a worker for each task by roulette over that task's row of the
//! [`PheromoneMatrix`]. Trails evaporate at a fixed rate and are reinforced in
//! proportion to `1/cost` of every ant that used them.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant system: optimization by a colony
//!   of cooperating agents", *IEEE Trans. SMC-B* 26(1)

mod config;
mod pheromone;
mod runner;

pub use config::AcoConfig;
pub use pheromone::{deposit_amount, PheromoneMatrix};
pub use runner::AcoSearch;
