//! CSA configuration.

/// Which position of the followed crow a follower flies toward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FollowTarget {
    /// The followed crow's current position.
    #[default]
    Position,
    /// The followed crow's remembered best position (textbook CSA).
    Memory,
}

/// Configuration for Crow Search.
///
/// ```
/// use u_placement::csa::CsaConfig;
///
/// let config = CsaConfig::default();
/// assert_eq!(config.flock_size, 200);
/// assert!((config.flight_length - 1.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CsaConfig {
    /// Number of crows.
    pub flock_size: usize,

    pub max_iterations: usize,

    /// Step scale toward the followed crow. Values above 1 overshoot.
    pub flight_length: f64,

    /// Probability that the followed crow notices and the follower takes a
    /// random position instead.
    pub awareness_probability: f64,

    pub follow: FollowTarget,

    /// Emit a progress line every this many iterations; 0 disables.
    pub log_every: usize,

    pub seed: Option<u64>,
}

impl Default for CsaConfig {
    fn default() -> Self {
        Self {
            flock_size: 200,
            max_iterations: 100,
            flight_length: 1.1,
            awareness_probability: 0.2,
            follow: FollowTarget::Position,
            log_every: 20,
            seed: None,
        }
    }
}

impl CsaConfig {
    pub fn with_flock_size(mut self, n: usize) -> Self {
        self.flock_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_flight_length(mut self, fl: f64) -> Self {
        self.flight_length = fl;
        self
    }

    pub fn with_awareness_probability(mut self, ap: f64) -> Self {
        self.awareness_probability = ap.clamp(0.0, 1.0);
        self
    }

    pub fn with_follow(mut self, follow: FollowTarget) -> Self {
        self.follow = follow;
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
        if self.flock_size < 2 {
            return Err("flock_size must be at least 2".into());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if !self.flight_length.is_finite() || self.flight_length <= 0.0 {
            return Err("flight_length must be positive".into());
        }
        if !(0.0..=1.0).contains(&self.awareness_probability) {
            return Err("awareness_probability must be in [0, 1]".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = CsaConfig::default();
        assert_eq!(c.flock_size, 200);
        assert_eq!(c.max_iterations, 100);
        assert!((c.awareness_probability - 0.2).abs() < 1e-12);
        assert_eq!(c.follow, FollowTarget::Position);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(CsaConfig::default().with_flock_size(1).validate().is_err());
        assert!(CsaConfig::default().with_max_iterations(0).validate().is_err());
        assert!(CsaConfig::default().with_flight_length(0.0).validate().is_err());
        assert!(CsaConfig::default()
            .with_flight_length(f64::NAN)
            .validate()
            .is_err());
    }
}
