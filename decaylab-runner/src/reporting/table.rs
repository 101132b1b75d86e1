//! Human-readable text report: header, day table, final results, analysis.

use crate::reporting::DaySelection;
use crate::runner::SimulationReport;

const WIDTH: usize = 90;

/// Signed percentage of a fractional return: `0.02` → `+2%`, `0.015` → `+1.50%`.
pub fn signed_pct(fraction: f64) -> String {
    let pct = fraction * 100.0;
    if (pct - pct.round()).abs() < 1e-9 {
        format!("{:+.0}%", pct.round())
    } else {
        format!("{pct:+.2}%")
    }
}

fn money(value: f64) -> String {
    format!("${value:>8.2}")
}

fn pnl_row(day: &str, asset: f64, manual: f64, etf: f64, variation: &str) -> String {
    format!(
        "{day:<6} {:<15} {:<15} {:<15} {variation:<12}",
        money(asset),
        money(manual),
        money(etf),
    )
}

/// Render the full text report.
pub fn render_table(report: &SimulationReport, days: DaySelection) -> String {
    let mut out = String::with_capacity(4096);
    let rule = "=".repeat(WIDTH);
    let thin = "-".repeat(WIDTH);
    let config = &report.config;

    // Header
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!(
        "SIMULATION: {} days with seed={}\n",
        config.days, config.seed
    ));
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!(
        "Initial Investment: ${:.2}\n",
        config.initial_investment
    ));
    let variations: Vec<String> = config.variations.iter().map(|v| signed_pct(*v)).collect();
    out.push_str(&format!("Variations: [{}]\n", variations.join(", ")));
    out.push_str(&format!(
        "Engine: {}  Fingerprint: {}\n",
        config.engine,
        report.fingerprint.short()
    ));
    out.push_str(&format!("{rule}\n"));

    // Day table
    out.push_str(&format!(
        "{:<6} {:<15} {:<15} {:<15} {:<12}\n",
        "Day", "Asset P&L", "Manual Short", "ETF Short", "Daily Var"
    ));
    out.push_str(&format!("{thin}\n"));
    if days.includes(0) {
        out.push_str(pnl_row("0", 0.0, 0.0, 0.0, "-").trim_end());
        out.push('\n');
    }
    for r in report.run.records.iter().filter(|r| days.includes(r.day)) {
        let row = pnl_row(
            &r.day.to_string(),
            r.asset_pnl,
            r.manual_short_pnl,
            r.etf_short_pnl,
            &signed_pct(r.daily_return),
        );
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out.push_str(&format!("{rule}\n"));

    // Final results
    let s = &report.summary;
    out.push_str("\nFINAL RESULTS:\n");
    out.push_str(&format!("{thin}\n"));
    out.push_str(&format!(
        "Long Asset:            {}  ({:+.2}%)\n",
        money(s.final_values.asset),
        s.returns.asset_pct
    ));
    out.push_str(&format!(
        "Manual Short:          {}  ({:+.2}%)\n",
        money(s.final_values.manual_short),
        s.returns.manual_short_pct
    ));
    out.push_str(&format!(
        "Short ETF (daily):     {}  ({:+.2}%)\n",
        money(s.final_values.etf_short),
        s.returns.etf_short_pct
    ));

    // Analysis
    out.push_str("\nANALYSIS:\n");
    out.push_str(&format!("{thin}\n"));
    let decay_pct = match s.decay.percentage {
        Some(pct) => format!("{pct:.2}%"),
        None => "undefined".to_string(),
    };
    out.push_str(&format!(
        "Difference: ${:.2} ({decay_pct} volatility decay)\n",
        s.decay.magnitude
    ));

    let c = &s.conservation;
    // Round-off residue would otherwise print as "-0.00".
    let sum = if c.final_sum.abs() < 0.005 { 0.0 } else { c.final_sum };
    out.push_str("Verification:\n");
    out.push_str(&format!("  Asset change: ${:+.2}\n", c.asset_change));
    out.push_str(&format!(
        "  Manual short change: ${:+.2}\n",
        c.manual_short_change
    ));
    out.push_str(&format!("  Sum (should be ~$0): ${sum:+.2}\n"));
    out.push_str(&format!(
        "  Largest daily residual: {:.3e} ({})\n",
        c.max_residual,
        if c.holds { "ok" } else { "VIOLATED" }
    ));

    out
}
