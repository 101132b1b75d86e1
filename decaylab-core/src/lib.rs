//! DecayLab Core — configuration, seeded return engines, decay simulator, analysis.
//!
//! This crate contains the whole computation and performs no I/O:
//! - Simulation configuration, validation and scenario presets
//! - Seeded return engines (MT19937, ChaCha8) and the uniform draw procedure
//! - The decay simulator: long asset, manual short and daily-rebalanced short
//!   driven by one shared return stream
//! - Summary analysis: returns, volatility decay, conservation check
//! - Run fingerprinting

pub mod analysis;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod rng;
pub mod simulator;

pub use analysis::{ConservationCheck, DecayAnalysis, StrategyReturns, Summary};
pub use config::{ScenarioPreset, SimulationConfig};
pub use error::{ConfigIssue, SimError};
pub use fingerprint::RunFingerprint;
pub use rng::{Mt19937, ReturnStream, RngEngine};
pub use simulator::{simulate, DayRecord, DecaySimulator, SimulationRun, Valuations};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all public data types are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<SimulationConfig>();
        require_sync::<SimulationConfig>();
        require_send::<SimulationRun>();
        require_sync::<SimulationRun>();
        require_send::<DayRecord>();
        require_sync::<DayRecord>();
        require_send::<Summary>();
        require_sync::<Summary>();
        require_send::<SimError>();
        require_sync::<SimError>();
        require_send::<RunFingerprint>();
        require_sync::<RunFingerprint>();
        require_send::<Mt19937>();
        require_sync::<Mt19937>();
        require_send::<DecaySimulator<Mt19937>>();
    }

    #[test]
    fn default_run_end_to_end() {
        let config = SimulationConfig::default();
        let run = simulate(&config).unwrap();
        let summary = Summary::compute(&run);
        assert_eq!(run.days(), 100);
        assert!(summary.conservation.holds);
        assert!(summary.decay.magnitude > 0.0);
    }
}
