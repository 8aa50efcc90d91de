//! Typed failures surfaced by the placement engine.
//!
//! Numeric degeneracies (zero denominators, empty spreads, NaN fitness) and
//! infeasible moves are repaired locally and never reach this type. What
//! remains are problems the caller must act on: an unusable instance, an
//! invalid configuration, calling operations out of order, or asking a
//! strategy for a capability it does not have.

/// Errors returned by problem construction and search strategies.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("EmptyProblem: tasks={tasks}, workers={workers}")]
    EmptyProblem { tasks: usize, workers: usize },

    #[error("InvalidInstance: {0}")]
    InvalidInstance(String),

    #[error("InvalidConfig: strategy={strategy}, reason={reason}")]
    InvalidConfig {
        strategy: &'static str,
        reason: String,
    },

    #[error("NotInitialized: strategy={strategy}")]
    NotInitialized { strategy: &'static str },

    #[error("Unsupported: strategy={strategy} does not support {capability}")]
    Unsupported {
        strategy: &'static str,
        capability: &'static str,
    },

    #[error("WorkerPanicked: a {strategy} round task panicked")]
    WorkerPanicked { strategy: &'static str },
}

impl SearchError {
    pub(crate) fn invalid_config(strategy: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            strategy,
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(strategy: &'static str, capability: &'static str) -> Self {
        Self::Unsupported {
            strategy,
            capability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_config() {
        let err = SearchError::invalid_config("GA", "population_size must be at least 2");
        assert_eq!(
            err.to_string(),
            "InvalidConfig: strategy=GA, reason=population_size must be at least 2"
        );
    }

    #[test]
    fn test_display_unsupported() {
        let err = SearchError::unsupported("FWA", "neighbor");
        assert_eq!(
            err.to_string(),
            "Unsupported: strategy=FWA does not support neighbor"
        );
    }
}
