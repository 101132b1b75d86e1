//! DecayLab Runner — run files, orchestration and reporting.
//!
//! This crate builds on `decaylab-core` to provide:
//! - TOML run files (`[simulation]` + `[report]`)
//! - A runner that simulates, analyzes and fingerprints one configuration
//! - Text table, JSON and CSV renderings of the result

pub mod config;
pub mod reporting;
pub mod runner;

pub use config::{ConfigError, RunConfig};
pub use reporting::{render, DaySelection, ReportFormat, ReportOptions};
pub use runner::{run_simulation, RunError, SimulationReport, SCHEMA_VERSION};
