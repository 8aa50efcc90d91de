//! WOA configuration.

use crate::strategy::InitScheme;

/// Configuration for the Whale Optimization Algorithm.
///
/// ```
/// use u_placement::woa::WoaConfig;
///
/// let config = WoaConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.max_iterations, 100);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WoaConfig {
    pub population_size: usize,

    /// Iteration budget; also the horizon over which `a` decays from 2 to 0.
    pub max_iterations: usize,

    /// Logarithmic spiral shape constant `b`.
    pub spiral_shape: f64,

    /// Probability of an encircling move rather than a spiral one.
    pub encircle_probability: f64,

    pub init: InitScheme,

    /// Emit a progress line every this many iterations; 0 disables.
    pub log_every: usize,

    pub seed: Option<u64>,
}

impl Default for WoaConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            max_iterations: 100,
            spiral_shape: 2.0,
            encircle_probability: 0.5,
            init: InitScheme::Uniform,
            log_every: 50,
            seed: None,
        }
    }
}

impl WoaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_spiral_shape(mut self, b: f64) -> Self {
        self.spiral_shape = b;
        self
    }

    pub fn with_encircle_probability(mut self, p: f64) -> Self {
        self.encircle_probability = p.clamp(0.0, 1.0);
        self
    }

    pub fn with_init(mut self, init: InitScheme) -> Self {
        self.init = init;
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
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if !self.spiral_shape.is_finite() {
            return Err("spiral_shape must be finite".into());
        }
        if !(0.0..=1.0).contains(&self.encircle_probability) {
            return Err("encircle_probability must be in [0, 1]".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = WoaConfig::default();
        assert!((c.spiral_shape - 2.0).abs() < 1e-12);
        assert!((c.encircle_probability - 0.5).abs() < 1e-12);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(WoaConfig::default()
            .with_population_size(0)
            .validate()
            .is_err());
        assert!(WoaConfig::default()
            .with_max_iterations(0)
            .validate()
            .is_err());
        assert!(WoaConfig::default()
            .with_spiral_shape(f64::INFINITY)
            .validate()
            .is_err());
    }
}
