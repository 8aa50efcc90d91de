//! Discrete Particle Swarm Optimization (PSO) for task placement.
//!
//! Velocities are continuous per task and driven by worker-id differences to
//! the particle's own best and the swarm's best. A task is reassigned to a
//! random worker with probability proportional to its speed, and particles
//! that stop improving restart from a random assignment.
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle swarm optimization", *ICNN'95*

mod config;
mod particle;
mod runner;

pub use config::PsoConfig;
pub use particle::Particle;
pub use runner::PsoSearch;
