//! Reporting — text table, JSON and CSV renderings of a `SimulationReport`.
//!
//! Every renderer returns a `String`; writing it anywhere is the caller's job.

pub mod export;
pub mod table;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::runner::SimulationReport;

pub use export::{export_days_csv, export_json, import_json};
pub use table::render_table;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown format '{other}'. Valid: table, json, csv")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}

/// Which days get a row in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaySelection {
    /// Day 0, days 1 through 10, then every 10th day.
    #[default]
    Sampled,
    /// Every day.
    All,
}

impl DaySelection {
    pub fn includes(self, day: usize) -> bool {
        match self {
            Self::Sampled => day <= 10 || day % 10 == 0,
            Self::All => true,
        }
    }
}

/// How a run is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportOptions {
    #[serde(default)]
    pub format: ReportFormat,
    #[serde(default)]
    pub days: DaySelection,
}

/// Render a report in the requested format.
///
/// The day selection applies to the table only; JSON and CSV carry every day.
pub fn render(report: &SimulationReport, options: &ReportOptions) -> Result<String> {
    match options.format {
        ReportFormat::Table => Ok(render_table(report, options.days)),
        ReportFormat::Json => export_json(report),
        ReportFormat::Csv => export_days_csv(report),
    }
}
