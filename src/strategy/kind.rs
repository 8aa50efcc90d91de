//! Strategy selection by name.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::SearchStrategy;
use crate::aco::{AcoConfig, AcoSearch};
use crate::csa::{CsaConfig, CsaSearch};
use crate::error::SearchError;
use crate::fwa::{FwaConfig, FwaSearch};
use crate::ga::{GaConfig, GaSearch};
use crate::hybrid::{ConcurrentHybrid, HybridConfig, SequentialHybrid, WoaSparkHybrid};
use crate::model::Problem;
use crate::pso::{PsoConfig, PsoSearch};
use crate::wgoa::{WgoaConfig, WgoaSearch};
use crate::woa::{WoaConfig, WoaSearch};

/// Every strategy the crate provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyKind {
    Ga,
    Csa,
    Fwa,
    Woa,
    Aco,
    Pso,
    Wgoa,
    Sequential,
    Parallel,
    WoaSpark,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 10] = [
        Self::Ga,
        Self::Csa,
        Self::Fwa,
        Self::Woa,
        Self::Aco,
        Self::Pso,
        Self::Wgoa,
        Self::Sequential,
        Self::Parallel,
        Self::WoaSpark,
    ];

    /// Name reported by [`SearchStrategy::name`] for this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ga => "GA",
            Self::Csa => "CSA",
            Self::Fwa => "FWA",
            Self::Woa => "WOA",
            Self::Aco => "ACO",
            Self::Pso => "PSO",
            Self::Wgoa => "WGOA",
            Self::Sequential => "SEQUENTIAL",
            Self::Parallel => "PARALLEL",
            Self::WoaSpark => "WoaSpark",
        }
    }

    /// Whether the strategy orchestrates FWA and WOA rounds.
    pub fn is_hybrid(self) -> bool {
        matches!(self, Self::Sequential | Self::Parallel | Self::WoaSpark)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by [`StrategyKind::from_str`] for an unknown name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy `{0}`")]
pub struct ParseStrategyKindError(pub String);

impl FromStr for StrategyKind {
    type Err = ParseStrategyKindError;

    /// Case-insensitive; `CONCURRENT` is accepted for [`StrategyKind::Parallel`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("CONCURRENT") {
            return Ok(Self::Parallel);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseStrategyKindError(s.to_string()))
    }
}

/// Builds `kind` with its default configuration and the given seed.
///
/// ```
/// use std::sync::Arc;
/// use u_placement::model::{Problem, Task, Worker};
/// use u_placement::{build_strategy, StrategyKind};
///
/// let problem = Arc::new(Problem::new(
///     vec![Task::new(0, 1000), Task::new(1, 2000)],
///     vec![Worker::new(0, 1000.0, 1), Worker::new(1, 500.0, 1)],
/// ).unwrap());
/// let kind: StrategyKind = "woa".parse().unwrap();
/// let mut strategy = build_strategy(kind, problem, Some(7)).unwrap();
/// assert_eq!(strategy.name(), "WOA");
/// let best = strategy.solve().unwrap();
/// assert_eq!(best.task_count(), 2);
/// ```
pub fn build_strategy(
    kind: StrategyKind,
    problem: Arc<Problem>,
    seed: Option<u64>,
) -> Result<Box<dyn SearchStrategy>, SearchError> {
    let strategy: Box<dyn SearchStrategy> = match kind {
        StrategyKind::Ga => Box::new(GaSearch::new(
            problem,
            GaConfig {
                seed,
                ..GaConfig::default()
            },
        )?),
        StrategyKind::Csa => Box::new(CsaSearch::new(
            problem,
            CsaConfig {
                seed,
                ..CsaConfig::default()
            },
        )?),
        StrategyKind::Fwa => Box::new(FwaSearch::new(
            problem,
            FwaConfig {
                seed,
                ..FwaConfig::default()
            },
        )?),
        StrategyKind::Woa => Box::new(WoaSearch::new(
            problem,
            WoaConfig {
                seed,
                ..WoaConfig::default()
            },
        )?),
        StrategyKind::Aco => Box::new(AcoSearch::new(
            problem,
            AcoConfig {
                seed,
                ..AcoConfig::default()
            },
        )?),
        StrategyKind::Pso => Box::new(PsoSearch::new(
            problem,
            PsoConfig {
                seed,
                ..PsoConfig::default()
            },
        )?),
        StrategyKind::Wgoa => Box::new(WgoaSearch::new(
            problem,
            WgoaConfig {
                seed,
                ..WgoaConfig::default()
            },
        )?),
        StrategyKind::Sequential => Box::new(SequentialHybrid::new(
            problem,
            HybridConfig {
                seed,
                ..HybridConfig::sequential()
            },
        )?),
        StrategyKind::Parallel => Box::new(ConcurrentHybrid::new(
            problem,
            HybridConfig {
                seed,
                ..HybridConfig::concurrent()
            },
        )?),
        StrategyKind::WoaSpark => Box::new(WoaSparkHybrid::new(
            problem,
            HybridConfig {
                seed,
                ..HybridConfig::woa_spark()
            },
        )?),
    };
    Ok(strategy)
}
