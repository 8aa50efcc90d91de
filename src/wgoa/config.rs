//! WGOA configuration.

use crate::strategy::InitScheme;
use crate::woa::WoaConfig;

/// Configuration for the whale + genetic hybrid.
///
/// ```
/// use u_placement::wgoa::WgoaConfig;
///
/// let config = WgoaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_iterations, 400);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WgoaConfig {
    /// Whales kept after each iteration's children are merged in.
    pub population_size: usize,

    pub max_iterations: usize,

    /// Logarithmic spiral shape constant `b`.
    pub spiral_shape: f64,

    /// Probability of an encircling move rather than a spiral one.
    pub encircle_probability: f64,

    /// Probability that an iteration breeds a pair of children.
    pub crossover_rate: f64,

    /// Probability that one child of a pair is mutated.
    pub mutation_rate: f64,

    /// Per-task probability that the children swap parents' workers.
    pub gene_swap_probability: f64,

    pub init: InitScheme,

    /// Emit a progress line every this many iterations; 0 disables.
    pub log_every: usize,

    pub seed: Option<u64>,
}

impl Default for WgoaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_iterations: 400,
            spiral_shape: 2.0,
            encircle_probability: 0.5,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            gene_swap_probability: 0.5,
            init: InitScheme::Uniform,
            log_every: 50,
            seed: None,
        }
    }
}

impl WgoaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
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

    /// The whale-move parameters as a [`WoaConfig`].
    pub fn woa(&self) -> WoaConfig {
        WoaConfig {
            population_size: self.population_size,
            max_iterations: self.max_iterations,
            spiral_shape: self.spiral_shape,
            encircle_probability: self.encircle_probability,
            init: self.init,
            log_every: self.log_every,
            seed: self.seed,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("gene_swap_probability", self.gene_swap_probability),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(format!("{name} must be in [0, 1]"));
            }
        }
        self.woa().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        let c = WgoaConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.woa().max_iterations, 400);
    }

    #[test]
    fn test_validate() {
        assert!(WgoaConfig::default()
            .with_population_size(1)
            .validate()
            .is_err());
        assert!(WgoaConfig::default()
            .with_max_iterations(0)
            .validate()
            .is_err());
        let mut c = WgoaConfig::default();
        c.gene_swap_probability = 1.5;
        assert!(c.validate().is_err());
    }
}
