//! Metaheuristic placement of independent tasks onto heterogeneous workers.
//!
//! Searches for a low-cost assignment of a fixed set of tasks onto a fixed
//! set of workers using randomized population-based strategies that share a
//! single cost/fitness model:
//!
//! - **Genetic Algorithm (GA)**: roulette parent selection, uniform per-task
//!   crossover, single-task mutation.
//! - **Crow Search (CSA)**: one-hot task x worker positions with per-crow memory
//!   and awareness probability.
//! - **Fireworks (FWA)**: fitness-scaled explosions, Gaussian sparks and
//!   distance-biased selection.
//! - **Whale Optimization (WOA)**: encircling and logarithmic-spiral moves over
//!   worker ids with adaptive coefficients.
//! - **Ant Colony (ACO)**: pheromone-guided construction with evaporation.
//! - **Particle Swarm (PSO)**: velocity-driven reassignment with stagnation
//!   restarts.
//! - **WGOA**: whale moves followed by genetic crossover.
//! - **Hybrids**: FWA + WOA run sequentially, concurrently (fork-join against a
//!   mutex-guarded best), or fused per whale (WoaSpark).
//!
//! # Architecture
//!
//! [`model`] owns tasks, workers, the [`model::Assignment`] with its cached
//! cost and the pluggable [`model::CostModel`]. Every stochastic decision goes
//! through a [`sampler::Sampler`] so a seeded run is reproducible. Each
//! algorithm implements the [`strategy::SearchStrategy`] state machine:
//! `initialize()` → repeated `step()` → converged, with `solve()` driving it
//! to the end of its iteration budget.
//!
//! Discrete-event simulation of the chosen placement, instance generation and
//! reporting are left to the caller.

pub mod aco;
pub mod csa;
pub mod error;
pub mod fwa;
pub mod ga;
pub mod hybrid;
pub mod model;
pub mod pso;
pub mod sampler;
pub mod strategy;
pub mod wgoa;
pub mod woa;

pub use error::SearchError;
pub use model::{Assignment, Problem, Task, Worker};
pub use sampler::{Sampler, SeededSampler};
pub use strategy::{
    build_strategy, ParseStrategyKindError, SearchOutcome, SearchState, SearchStrategy,
    StrategyKind,
};
