//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.

use crate::strategy::InitScheme;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_placement::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_placement::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(40)
///     .with_mutation_rate(0.2)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Target population size; the population is trimmed back to this before
    /// each generation's children are added.
    pub population_size: usize,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Probability that a generation produces a pair of children (0.0–1.0).
    pub crossover_rate: f64,

    /// Probability that one child of a pair is mutated (0.0–1.0).
    pub mutation_rate: f64,

    /// Per-task probability that the children swap parents' workers (0.0–1.0).
    pub gene_swap_probability: f64,

    /// How the initial population is built.
    pub init: InitScheme,

    /// Emit a progress line every this many generations; 0 disables.
    pub log_every: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            gene_swap_probability: 0.5,
            init: InitScheme::Uniform,
            log_every: 20,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-task gene swap probability.
    pub fn with_gene_swap_probability(mut self, p: f64) -> Self {
        self.gene_swap_probability = p.clamp(0.0, 1.0);
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

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
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
        Ok(())
    }
}
