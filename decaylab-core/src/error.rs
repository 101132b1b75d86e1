//! Error taxonomy for the simulator and the summary analyzer.

use thiserror::Error;

/// Why a configuration was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigIssue {
    #[error("initial investment must be positive and finite, got {0}")]
    NonPositiveInvestment(f64),
    #[error("day count must be at least 1")]
    ZeroDays,
    #[error("variation set is empty")]
    EmptyVariationSet,
    #[error("variation #{index} is not finite: {value}")]
    NonFiniteVariation { index: usize, value: f64 },
}

/// Errors from the simulator and analyzer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Fatal: the simulation does not run.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigIssue),
    /// Both short valuations are ~0, so the decay ratio has no denominator.
    #[error("decay ratio undefined: manual short {manual}, etf short {etf}")]
    DegenerateDecayRatio { manual: f64, etf: f64 },
}
