//! Orchestrator configuration.

use crate::fwa::FwaConfig;
use crate::strategy::InitScheme;
use crate::woa::WoaConfig;

/// Configuration shared by the FWA + WOA orchestrators.
///
/// Only the operator parameters of `fwa` and `woa` are used (amplitude,
/// spark bounds, spiral shape, encircle probability); population size,
/// iteration caps and seeding come from the orchestrator itself.
///
/// ```
/// use u_placement::hybrid::HybridConfig;
///
/// let config = HybridConfig::sequential();
/// assert_eq!(config.batch_size, 10);
/// assert_eq!(HybridConfig::concurrent().batch_size, 1);
/// assert_eq!(HybridConfig::woa_spark().max_woa_iterations, 200);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HybridConfig {
    pub population_size: usize,

    /// FWA iteration cap across all rounds.
    pub max_fwa_iterations: usize,

    /// WOA iteration cap across all rounds; also the horizon over which the
    /// whale coefficient `a` decays.
    pub max_woa_iterations: usize,

    /// Iterations of each sub-algorithm per round.
    pub batch_size: usize,

    /// Rounds without a best-so-far improvement before diversity injection.
    pub stagnation_rounds: usize,

    /// Share of the population replaced on diversity injection.
    pub diversity_fraction: f64,

    /// Scheme for the initial population and injected individuals.
    pub init: InitScheme,

    pub fwa: FwaConfig,

    pub woa: WoaConfig,

    /// Emit a progress line every this many rounds; 0 disables.
    pub log_every: usize,

    pub seed: Option<u64>,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_fwa_iterations: 100,
            max_woa_iterations: 100,
            batch_size: 10,
            stagnation_rounds: 10,
            diversity_fraction: 0.5,
            init: InitScheme::RoundRobinShuffled,
            fwa: FwaConfig::default(),
            woa: WoaConfig::default(),
            log_every: 1,
            seed: None,
        }
    }
}

impl HybridConfig {
    /// Batches of ten FWA then ten WOA iterations per round.
    pub fn sequential() -> Self {
        Self::default()
    }

    /// One FWA and one WOA iteration per round, run side by side.
    pub fn concurrent() -> Self {
        Self {
            batch_size: 1,
            log_every: 10,
            ..Self::default()
        }
    }

    /// Whale moves plus one spark per whale, 200 rounds.
    pub fn woa_spark() -> Self {
        Self {
            batch_size: 1,
            max_woa_iterations: 200,
            log_every: 10,
            ..Self::default()
        }
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets both iteration caps.
    pub fn with_iterations(mut self, fwa: usize, woa: usize) -> Self {
        self.max_fwa_iterations = fwa;
        self.max_woa_iterations = woa;
        self
    }

    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n;
        self
    }

    pub fn with_stagnation_rounds(mut self, n: usize) -> Self {
        self.stagnation_rounds = n;
        self
    }

    pub fn with_diversity_fraction(mut self, fraction: f64) -> Self {
        self.diversity_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn with_init(mut self, init: InitScheme) -> Self {
        self.init = init;
        self
    }

    pub fn with_fwa(mut self, fwa: FwaConfig) -> Self {
        self.fwa = fwa;
        self
    }

    pub fn with_woa(mut self, woa: WoaConfig) -> Self {
        self.woa = woa;
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
        if self.max_fwa_iterations == 0 || self.max_woa_iterations == 0 {
            return Err("iteration caps must be at least 1".into());
        }
        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.diversity_fraction) {
            return Err("diversity_fraction must be in [0, 1]".into());
        }
        self.fwa.validate().map_err(|e| format!("fwa: {e}"))?;
        self.woa.validate().map_err(|e| format!("woa: {e}"))?;
        Ok(())
    }
}
