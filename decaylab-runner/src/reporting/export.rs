//! JSON and CSV export of a `SimulationReport`.
//!
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: one row per day, day 0 included, for external analysis tools

use anyhow::{bail, Context, Result};

use crate::runner::{SimulationReport, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `SimulationReport` to pretty JSON.
pub fn export_json(report: &SimulationReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize SimulationReport to JSON")
}

/// Deserialize a `SimulationReport` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<SimulationReport> {
    let report: SimulationReport =
        serde_json::from_str(json).context("failed to deserialize SimulationReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export the day-by-day trace as CSV.
///
/// Columns: day, daily_return, asset_value, manual_short_value,
/// etf_short_value, asset_pnl, manual_short_pnl, etf_short_pnl.
/// Day 0 has an empty `daily_return`.
pub fn export_days_csv(report: &SimulationReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "day",
        "daily_return",
        "asset_value",
        "manual_short_value",
        "etf_short_value",
        "asset_pnl",
        "manual_short_pnl",
        "etf_short_pnl",
    ])?;

    let opening = report.run.opening();
    wtr.write_record([
        "0".to_string(),
        String::new(),
        format!("{:.6}", opening.asset),
        format!("{:.6}", opening.manual_short),
        format!("{:.6}", opening.etf_short),
        format!("{:.6}", 0.0),
        format!("{:.6}", 0.0),
        format!("{:.6}", 0.0),
    ])?;

    for r in &report.run.records {
        wtr.write_record([
            r.day.to_string(),
            format!("{:.6}", r.daily_return),
            format!("{:.6}", r.values.asset),
            format!("{:.6}", r.values.manual_short),
            format!("{:.6}", r.values.etf_short),
            format!("{:.6}", r.asset_pnl),
            format!("{:.6}", r.manual_short_pnl),
            format!("{:.6}", r.etf_short_pnl),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::run_simulation;
    use decaylab_core::{ScenarioPreset, SimulationConfig};

    fn small_report() -> SimulationReport {
        let config = SimulationConfig {
            days: 5,
            ..ScenarioPreset::Mixed.to_config()
        };
        run_simulation(&config).unwrap()
    }

    #[test]
    fn json_round_trip() {
        let report = small_report();
        let json = export_json(&report).unwrap();
        assert!(json.contains("\"schema_version\": 1"));
        assert_eq!(import_json(&json).unwrap(), report);
    }

    #[test]
    fn json_rejects_future_schema() {
        let mut report = small_report();
        report.schema_version = SCHEMA_VERSION + 1;
        let json = export_json(&report).unwrap();
        let err = import_json(&json).unwrap_err();
        assert!(err.to_string().contains("unsupported schema version"));
    }

    #[test]
    fn csv_has_header_and_one_row_per_day() {
        let csv = export_days_csv(&small_report()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 1 + 1 + 5);
        assert!(lines[0].starts_with("day,daily_return,asset_value"));
        assert!(lines[1].starts_with("0,,200.000000,200.000000,200.000000"));
        assert!(lines[2].starts_with("1,-0.040000,192.000000,208.000000,208.000000"));
    }
}
