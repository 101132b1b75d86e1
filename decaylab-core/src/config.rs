//! Simulation configuration and named scenario presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigIssue, SimError};
use crate::rng::RngEngine;

pub const DEFAULT_SEED: u64 = 30;
pub const DEFAULT_INITIAL_INVESTMENT: f64 = 200.0;
pub const DEFAULT_DAYS: usize = 100;

/// Everything needed to reproduce one simulation trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub seed: u64,
    pub initial_investment: f64,
    pub days: usize,
    /// Fractional daily returns; `0.02` is +2%.
    pub variations: Vec<f64>,
    #[serde(default)]
    pub engine: RngEngine,
}

impl SimulationConfig {
    /// Reject configurations the simulator cannot run.
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.initial_investment > 0.0 && self.initial_investment.is_finite()) {
            return Err(ConfigIssue::NonPositiveInvestment(self.initial_investment).into());
        }
        if self.days < 1 {
            return Err(ConfigIssue::ZeroDays.into());
        }
        if self.variations.is_empty() {
            return Err(ConfigIssue::EmptyVariationSet.into());
        }
        if let Some((index, &value)) = self
            .variations
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(ConfigIssue::NonFiniteVariation { index, value }.into());
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        ScenarioPreset::Mixed.to_config()
    }
}

// ─── ScenarioPreset ─────────────────────────────────────────────────

/// Named variation sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScenarioPreset {
    /// Oscillating market, both gains and losses.
    #[default]
    Mixed,
    /// Every day is a loss.
    Bearish,
    /// Every day is a gain, with one large jump.
    Bullish,
}

impl ScenarioPreset {
    pub const ALL: [ScenarioPreset; 3] = [Self::Mixed, Self::Bearish, Self::Bullish];

    pub fn name(self) -> &'static str {
        match self {
            Self::Mixed => "mixed",
            Self::Bearish => "bearish",
            Self::Bullish => "bullish",
        }
    }

    pub fn variations(self) -> Vec<f64> {
        match self {
            Self::Mixed => vec![0.02, -0.03, -0.04, 0.05],
            Self::Bearish => vec![-0.01, -0.02, -0.03, -0.04],
            Self::Bullish => vec![0.1, 0.02, 0.03, 0.04],
        }
    }

    /// Convert to a `SimulationConfig` with the default seed, investment and horizon.
    pub fn to_config(self) -> SimulationConfig {
        SimulationConfig {
            seed: DEFAULT_SEED,
            initial_investment: DEFAULT_INITIAL_INVESTMENT,
            days: DEFAULT_DAYS,
            variations: self.variations(),
            engine: RngEngine::default(),
        }
    }
}

impl fmt::Display for ScenarioPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown preset '{s}'. Valid: mixed, bearish, bullish"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed, 30);
        assert_eq!(config.days, 100);
        assert_eq!(config.variations, vec![0.02, -0.03, -0.04, 0.05]);
        assert_eq!(config.engine, RngEngine::Mt19937);
    }

    #[test]
    fn rejects_non_positive_investment() {
        for bad in [0.0, -50.0, f64::NAN, f64::INFINITY] {
            let config = SimulationConfig {
                initial_investment: bad,
                ..SimulationConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(SimError::InvalidConfiguration(
                    ConfigIssue::NonPositiveInvestment(_)
                ))
            ));
        }
    }

    #[test]
    fn rejects_zero_days() {
        let config = SimulationConfig {
            days: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SimError::InvalidConfiguration(ConfigIssue::ZeroDays))
        );
    }

    #[test]
    fn rejects_empty_variation_set() {
        let config = SimulationConfig {
            variations: vec![],
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SimError::InvalidConfiguration(ConfigIssue::EmptyVariationSet))
        );
    }

    #[test]
    fn rejects_non_finite_variation() {
        let config = SimulationConfig {
            variations: vec![0.01, f64::INFINITY],
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfiguration(
                ConfigIssue::NonFiniteVariation { index: 1, .. }
            ))
        ));
    }

    #[test]
    fn presets_round_trip_through_names() {
        for preset in ScenarioPreset::ALL {
            assert_eq!(preset.name().parse::<ScenarioPreset>(), Ok(preset));
            assert!(preset.to_config().validate().is_ok());
        }
        assert_eq!("BEARISH".parse::<ScenarioPreset>(), Ok(ScenarioPreset::Bearish));
        assert!("sideways".parse::<ScenarioPreset>().is_err());
    }

    #[test]
    fn bearish_and_bullish_are_one_signed() {
        assert!(ScenarioPreset::Bearish.variations().iter().all(|v| *v < 0.0));
        assert!(ScenarioPreset::Bullish.variations().iter().all(|v| *v > 0.0));
    }

    #[test]
    fn engine_defaults_when_missing_from_json() {
        let json = r#"{"seed":1,"initial_investment":100.0,"days":5,"variations":[0.01]}"#;
        let config: SimulationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.engine, RngEngine::Mt19937);
    }
}
