//! Run orchestration — simulate, analyze and fingerprint one configuration.

use decaylab_core::{simulate, RunFingerprint, SimError, SimulationConfig, SimulationRun, Summary};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("simulation error: {0}")]
    Simulation(#[from] SimError),
}

/// Current schema version for serialized reports.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete, self-describing result of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub fingerprint: RunFingerprint,
    pub config: SimulationConfig,
    pub run: SimulationRun,
    pub summary: Summary,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Run one simulation and bundle everything the reports need.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationReport, RunError> {
    let fingerprint = RunFingerprint::of(config);
    info!(
        fingerprint = fingerprint.short(),
        seed = config.seed,
        days = config.days,
        engine = %config.engine,
        "simulation starting"
    );

    let run = simulate(config)?;
    let summary = Summary::compute(&run);

    info!(
        fingerprint = fingerprint.short(),
        asset = summary.final_values.asset,
        manual_short = summary.final_values.manual_short,
        etf_short = summary.final_values.etf_short,
        decay = summary.decay.magnitude,
        "simulation finished"
    );

    Ok(SimulationReport {
        schema_version: SCHEMA_VERSION,
        fingerprint,
        config: config.clone(),
        run,
        summary,
    })
}
