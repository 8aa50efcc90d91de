//! Fireworks Algorithm (FWA) for task placement.
//!
//! Fitter fireworks explode into more sparks with a smaller amplitude; worse
//! ones into fewer sparks spread further. A few Gaussian sparks add
//! multiplicative noise, and survivors are chosen with probability
//! proportional to their distance from the best, which always survives.
//!
//! # References
//!
//! - Tan & Zhu (2010), "Fireworks Algorithm for Optimization", *ICSI 2010*

mod config;
pub mod operators;
mod runner;

pub use config::FwaConfig;
pub use runner::FwaSearch;
