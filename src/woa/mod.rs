//! Whale Optimization Algorithm (WOA) for task placement.
//!
//! Whales either encircle a target (the best assignment while `|A| < 1`,
//! otherwise a random peer) or spiral toward the best. The coefficient `a`
//! decays linearly from 2 to 0, shifting the pod from exploration to
//! exploitation. Moves operate on integer worker ids with modulo wraparound.
//!
//! # References
//!
//! - Mirjalili & Lewis (2016), "The Whale Optimization Algorithm",
//!   *Advances in Engineering Software* 95, 51-67

mod config;
pub mod operators;
mod runner;

pub use config::WoaConfig;
pub use runner::WoaSearch;
