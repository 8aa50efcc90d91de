//! Whale + Genetic Optimization (WGOA).
//!
//! Each iteration applies the [`woa`](crate::woa) moves to every whale, then
//! with probability `crossover_rate` breeds two children with the
//! [`ga`](crate::ga) operators and keeps the fittest `population_size`.

mod config;
mod runner;

pub use config::WgoaConfig;
pub use runner::WgoaSearch;
