//! FWA configuration.

use crate::strategy::InitScheme;

/// Configuration for the Fireworks Algorithm.
///
/// ```
/// use u_placement::fwa::FwaConfig;
///
/// let config = FwaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.min_sparks(), 32);
/// assert_eq!(config.max_sparks(), 640);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FwaConfig {
    /// Number of fireworks kept after selection.
    pub population_size: usize,

    pub max_iterations: usize,

    /// Maximum explosion amplitude (`A`).
    pub max_amplitude: f64,

    /// Total spark budget per firework scale (`m`).
    pub spark_budget: f64,

    /// Lower spark bound as a fraction of the budget (`a`).
    pub min_spark_ratio: f64,

    /// Upper spark bound as a fraction of the budget (`b`).
    pub max_spark_ratio: f64,

    /// Smoothing term that keeps the spark and amplitude ratios finite.
    pub epsilon: f64,

    /// Gaussian sparks per iteration as a fraction of the population.
    pub gaussian_ratio: f64,

    pub init: InitScheme,

    /// Emit a progress line every this many iterations; 0 disables.
    pub log_every: usize,

    pub seed: Option<u64>,
}

impl Default for FwaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_iterations: 50,
            max_amplitude: 40.0,
            spark_budget: 800.0,
            min_spark_ratio: 0.04,
            max_spark_ratio: 0.8,
            epsilon: 1e-6,
            gaussian_ratio: 0.1,
            init: InitScheme::Uniform,
            log_every: 50,
            seed: None,
        }
    }
}

impl FwaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_max_amplitude(mut self, a: f64) -> Self {
        self.max_amplitude = a;
        self
    }

    /// Sets the spark budget and its lower/upper bound ratios.
    pub fn with_sparks(mut self, budget: f64, min_ratio: f64, max_ratio: f64) -> Self {
        self.spark_budget = budget;
        self.min_spark_ratio = min_ratio;
        self.max_spark_ratio = max_ratio;
        self
    }

    pub fn with_gaussian_ratio(mut self, ratio: f64) -> Self {
        self.gaussian_ratio = ratio.clamp(0.0, 1.0);
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

    /// `round(a · m)`.
    pub fn min_sparks(&self) -> usize {
        (self.min_spark_ratio * self.spark_budget).round() as usize
    }

    /// `round(b · m)`.
    pub fn max_sparks(&self) -> usize {
        (self.max_spark_ratio * self.spark_budget).round() as usize
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if !(self.max_amplitude >= 0.0) {
            return Err("max_amplitude must be non-negative".into());
        }
        if !(self.spark_budget >= 0.0) || !self.spark_budget.is_finite() {
            return Err("spark_budget must be finite and non-negative".into());
        }
        if !(0.0..=1.0).contains(&self.min_spark_ratio)
            || !(0.0..=1.0).contains(&self.max_spark_ratio)
            || self.min_spark_ratio > self.max_spark_ratio
        {
            return Err("spark ratios must satisfy 0 <= min <= max <= 1".into());
        }
        if !(self.epsilon > 0.0) {
            return Err("epsilon must be positive".into());
        }
        if !(0.0..=1.0).contains(&self.gaussian_ratio) {
            return Err("gaussian_ratio must be in [0, 1]".into());
        }
        Ok(())
    }
}
