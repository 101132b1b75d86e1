//! DecayLab CLI — run one volatility decay simulation and print the report.
//!
//! The run is resolved from a named preset (default `mixed`) or a TOML run
//! file, then per-field overrides are applied. Stdout carries only the report;
//! logs go to stderr.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use decaylab_core::{RngEngine, ScenarioPreset};
use decaylab_runner::{render, run_simulation, DaySelection, ReportFormat, RunConfig};

const DEFAULT_LOG_FILTER: &str = "decaylab_core=warn,decaylab_runner=warn";
const VERBOSE_LOG_FILTER: &str = "decaylab_core=info,decaylab_runner=info";

#[derive(Parser, Debug)]
#[command(
    name = "decaylab",
    about = "DecayLab CLI — volatility decay of a daily-rebalanced short vs a manual short"
)]
struct Cli {
    /// Named scenario: mixed, bearish, bullish. Defaults to mixed.
    #[arg(long)]
    preset: Option<String>,

    /// Path to a TOML run file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the initial investment.
    #[arg(long)]
    investment: Option<f64>,

    /// Override the number of days.
    #[arg(long)]
    days: Option<usize>,

    /// Override the variation set, as comma-separated fractions (e.g. 0.02,-0.03).
    #[arg(long, allow_hyphen_values = true)]
    variations: Option<String>,

    /// Return engine: mt19937, chacha8.
    #[arg(long)]
    engine: Option<RngEngine>,

    /// Output format: table, json, csv.
    #[arg(long)]
    format: Option<ReportFormat>,

    /// List every day in the table instead of the sampled days.
    #[arg(long, default_value_t = false)]
    all_days: bool,

    /// Log run progress to stderr.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let run_config = resolve_run_config(&cli)?;
    info!(
        format = %run_config.report.format,
        engine = %run_config.simulation.engine,
        "run resolved"
    );

    let report = run_simulation(&run_config.simulation)?;
    let rendered = render(&report, &run_config.report)?;
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        })
    });

    let json_logging = std::env::var("DECAYLAB_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    }
}

/// Base run from `--config` or `--preset`, then the per-field overrides.
fn resolve_run_config(cli: &Cli) -> Result<RunConfig> {
    if cli.config.is_some() && cli.preset.is_some() {
        bail!("--config and --preset are mutually exclusive");
    }

    let mut run_config = match (&cli.config, &cli.preset) {
        (Some(path), _) => RunConfig::from_file(path)?,
        (None, Some(name)) => {
            let preset: ScenarioPreset = name.parse().map_err(anyhow::Error::msg)?;
            RunConfig::from(preset.to_config())
        }
        (None, None) => RunConfig::from(ScenarioPreset::default().to_config()),
    };

    let sim = &mut run_config.simulation;
    if let Some(seed) = cli.seed {
        sim.seed = seed;
    }
    if let Some(investment) = cli.investment {
        sim.initial_investment = investment;
    }
    if let Some(days) = cli.days {
        sim.days = days;
    }
    if let Some(list) = &cli.variations {
        sim.variations = parse_variations(list)?;
    }
    if let Some(engine) = cli.engine {
        sim.engine = engine;
    }
    sim.validate()?;

    if let Some(format) = cli.format {
        run_config.report.format = format;
    }
    if cli.all_days {
        run_config.report.days = DaySelection::All;
    }
    Ok(run_config)
}

fn parse_variations(list: &str) -> Result<Vec<f64>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .with_context(|| format!("invalid variation '{s}'"))
        })
        .collect()
}
