//! FWA + WOA orchestrators.
//!
//! All three run rounds over one population and share the same round
//! policy: merge the sub-populations, keep the fittest `population_size`,
//! and replace part of the population with fresh individuals once the best
//! has stalled for `stagnation_rounds` rounds.
//!
//! - [`SequentialHybrid`]: a batch of FWA then a batch of WOA per round
//! - [`ConcurrentHybrid`]: one FWA and one WOA batch per round, forked with
//!   `rayon::join` and reconciled through [`SharedBest`]
//! - [`WoaSparkHybrid`]: WOA moves plus one firework spark per whale

mod concurrent;
mod config;
mod rounds;
mod sequential;
mod shared;
mod woa_spark;

pub use concurrent::ConcurrentHybrid;
pub use config::HybridConfig;
pub use sequential::SequentialHybrid;
pub use shared::SharedBest;
pub use woa_spark::WoaSparkHybrid;
