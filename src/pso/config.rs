//! PSO configuration.

/// Configuration for Particle Swarm Optimization.
///
/// The default coefficients are large enough that velocities saturate at
/// the clamp after the first update, so a particle mostly behaves as a
/// random-reassignment walk pulled back by its stagnation reset.
///
/// ```
/// use u_placement::pso::PsoConfig;
///
/// let config = PsoConfig::default();
/// assert_eq!(config.swarm_size, 200);
/// assert!((config.velocity_limit - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    pub swarm_size: usize,

    pub max_iterations: usize,

    /// Weight of the previous velocity.
    pub inertia: f64,

    /// Pull toward the particle's own best.
    pub cognitive: f64,

    /// Pull toward the swarm's best.
    pub social: f64,

    /// Velocities are clamped to `[-limit, limit]`; a task is reassigned with
    /// probability `|v| / limit`.
    pub velocity_limit: f64,

    /// A particle whose own best has not improved for more than this many
    /// iterations restarts from a random assignment.
    pub stagnation_limit: usize,

    /// Emit a progress line every this many iterations; 0 disables.
    pub log_every: usize,

    pub seed: Option<u64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            swarm_size: 200,
            max_iterations: 200,
            inertia: 155.0,
            cognitive: 120.5,
            social: 32.5,
            velocity_limit: 5.0,
            stagnation_limit: 20,
            log_every: 10,
            seed: None,
        }
    }
}

impl PsoConfig {
    pub fn with_swarm_size(mut self, n: usize) -> Self {
        self.swarm_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets inertia, cognitive and social weights.
    pub fn with_coefficients(mut self, inertia: f64, cognitive: f64, social: f64) -> Self {
        self.inertia = inertia;
        self.cognitive = cognitive;
        self.social = social;
        self
    }

    pub fn with_velocity_limit(mut self, limit: f64) -> Self {
        self.velocity_limit = limit;
        self
    }

    pub fn with_stagnation_limit(mut self, n: usize) -> Self {
        self.stagnation_limit = n;
        self
    }

    pub fn with_log_every(mut self, n: usize) -> Self {
        self.log_every = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.swarm_size == 0 {
            return Err("swarm_size must be at least 1".into());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if ![self.inertia, self.cognitive, self.social]
            .iter()
            .all(|c| c.is_finite())
        {
            return Err("velocity coefficients must be finite".into());
        }
        if !(self.velocity_limit > 0.0) || !self.velocity_limit.is_finite() {
            return Err("velocity_limit must be positive and finite".into());
        }
        Ok(())
    }
}
