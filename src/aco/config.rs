//! ACO configuration.

/// Configuration for Ant Colony Optimization.
///
/// ```
/// use u_placement::aco::AcoConfig;
///
/// let config = AcoConfig::default();
/// assert_eq!(config.colony_size, 50);
/// assert!((config.evaporation_rate - 0.05).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Ants constructed per iteration.
    pub colony_size: usize,

    pub max_iterations: usize,

    /// Fraction of every trail lost at the start of each iteration.
    pub evaporation_rate: f64,

    /// Trail level on every task/worker edge before the first iteration.
    pub initial_pheromone: f64,

    /// Scale of the `1/cost` deposit.
    pub deposit_weight: f64,

    /// Emit a progress line every this many iterations; 0 disables.
    pub log_every: usize,

    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            colony_size: 50,
            max_iterations: 50,
            evaporation_rate: 0.05,
            initial_pheromone: 0.5,
            deposit_weight: 1.0,
            log_every: 10,
            seed: None,
        }
    }
}

impl AcoConfig {
    pub fn with_colony_size(mut self, n: usize) -> Self {
        self.colony_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_initial_pheromone(mut self, level: f64) -> Self {
        self.initial_pheromone = level;
        self
    }

    pub fn with_deposit_weight(mut self, weight: f64) -> Self {
        self.deposit_weight = weight;
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
        if self.colony_size == 0 {
            return Err("colony_size must be at least 1".into());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if !(0.0..1.0).contains(&self.evaporation_rate) {
            return Err("evaporation_rate must be in [0, 1)".into());
        }
        if !(self.initial_pheromone > 0.0) || !self.initial_pheromone.is_finite() {
            return Err("initial_pheromone must be positive and finite".into());
        }
        if !(self.deposit_weight >= 0.0) || !self.deposit_weight.is_finite() {
            return Err("deposit_weight must be non-negative and finite".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        assert!(AcoConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(AcoConfig::default().with_colony_size(0).validate().is_err());
        assert!(AcoConfig::default()
            .with_evaporation_rate(1.0)
            .validate()
            .is_err());
        assert!(AcoConfig::default()
            .with_initial_pheromone(0.0)
            .validate()
            .is_err());
        assert!(AcoConfig::default()
            .with_deposit_weight(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_evaporation_clamped() {
        let c = AcoConfig::default().with_evaporation_rate(-0.3);
        assert_eq!(c.evaporation_rate, 0.0);
    }
}
