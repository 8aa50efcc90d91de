//! Crow Search Algorithm (CSA) for task placement.
//!
//! Candidates are one-hot task × worker matrices ([`CrowPosition`]). Moves
//! are computed in continuous space and snapped back to the arg-max worker
//! per task.
//!
//! # References
//!
//! - Askarzadeh (2016), "A novel metaheuristic method for solving constrained
//!   engineering optimization problems: Crow search algorithm",
//!   *Computers & Structures* 169

mod config;
mod position;
mod runner;

pub use config::{CsaConfig, FollowTarget};
pub use position::CrowPosition;
pub use runner::CsaSearch;
