//! Run fingerprinting — deterministic identification of a simulation configuration.
//!
//! The digest is taken over a canonical encoding (floats by bit pattern, fixed
//! field order), so two configs share a fingerprint only if they produce the
//! same trace.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;

/// BLAKE3 digest of a configuration, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunFingerprint(pub String);

impl RunFingerprint {
    pub fn of(config: &SimulationConfig) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(config.engine.name().as_bytes());
        hasher.update(&config.seed.to_le_bytes());
        hasher.update(&config.initial_investment.to_bits().to_le_bytes());
        hasher.update(&(config.days as u64).to_le_bytes());
        hasher.update(&(config.variations.len() as u64).to_le_bytes());
        for v in &config.variations {
            hasher.update(&v.to_bits().to_le_bytes());
        }
        Self(hasher.finalize().to_hex().to_string())
    }

    /// First 12 hex characters, for display.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl fmt::Display for RunFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngEngine;

    #[test]
    fn fingerprint_is_deterministic() {
        let config = SimulationConfig::default();
        let f1 = RunFingerprint::of(&config);
        let f2 = RunFingerprint::of(&config.clone());
        assert_eq!(f1, f2);
        assert_eq!(f1.0.len(), 64);
        assert_eq!(f1.short().len(), 12);
    }

    #[test]
    fn fingerprint_changes_with_each_field() {
        let base = SimulationConfig::default();
        let base_fp = RunFingerprint::of(&base);

        let variants = [
            SimulationConfig { seed: 31, ..base.clone() },
            SimulationConfig { initial_investment: 201.0, ..base.clone() },
            SimulationConfig { days: 99, ..base.clone() },
            SimulationConfig { variations: vec![0.02, -0.03, -0.04], ..base.clone() },
            SimulationConfig { engine: RngEngine::ChaCha8, ..base.clone() },
        ];
        for variant in &variants {
            assert_ne!(RunFingerprint::of(variant), base_fp, "{variant:?}");
        }
    }

    #[test]
    fn variation_order_matters() {
        let a = SimulationConfig {
            variations: vec![0.01, -0.01],
            ..SimulationConfig::default()
        };
        let b = SimulationConfig {
            variations: vec![-0.01, 0.01],
            ..SimulationConfig::default()
        };
        assert_ne!(RunFingerprint::of(&a), RunFingerprint::of(&b));
    }
}
