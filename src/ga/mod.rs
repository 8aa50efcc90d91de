//! Genetic Algorithm for task placement.
//!
//! Steady-state variant: each generation trims the population back to its
//! target size (dropping the least fit), then with probability
//! `crossover_rate` breeds one pair of children from roulette-selected
//! parents and, with probability `mutation_rate`, reassigns one task of one
//! child.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters
//! - [`GaSearch`]: The [`SearchStrategy`](crate::strategy::SearchStrategy) implementation
//!
//! # Submodules
//!
//! - [`operators`]: roulette parent selection, uniform crossover, point mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;

pub use config::GaConfig;
pub use runner::GaSearch;
