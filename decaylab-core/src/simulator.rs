//! Decay simulator — day-by-day walk of three parallel valuations.
//!
//! Every day one return is drawn from the variation set and applied to:
//! 1. the long asset, compounding: `asset × (1 + r)`
//! 2. the manual short, a static payoff: `2 × initial − asset`
//! 3. the daily-rebalanced short, compounding the inverse: `etf × (1 − r)`
//!
//! The manual short never looks at its own previous value, the other two are
//! recurrences. The gap between the two shorts is the volatility decay.

use rand_core::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::rng::ReturnStream;

/// Marked value of the three tracked positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuations {
    pub asset: f64,
    pub manual_short: f64,
    pub etf_short: f64,
}

impl Valuations {
    /// All three positions opened at the same amount.
    pub fn opening(initial_investment: f64) -> Self {
        Self {
            asset: initial_investment,
            manual_short: initial_investment,
            etf_short: initial_investment,
        }
    }

    /// Apply one day's return to all three positions.
    pub fn apply(&mut self, daily_return: f64, initial_investment: f64) {
        self.asset *= 1.0 + daily_return;
        self.manual_short = 2.0 * initial_investment - self.asset;
        self.etf_short *= 1.0 - daily_return;
    }
}

/// Snapshot of one simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// 1-based day index.
    pub day: usize,
    pub daily_return: f64,
    pub asset_pnl: f64,
    pub manual_short_pnl: f64,
    pub etf_short_pnl: f64,
    /// Valuations after this day's update.
    pub values: Valuations,
}

impl DayRecord {
    fn new(day: usize, daily_return: f64, values: Valuations, initial_investment: f64) -> Self {
        Self {
            day,
            daily_return,
            asset_pnl: values.asset - initial_investment,
            manual_short_pnl: values.manual_short - initial_investment,
            etf_short_pnl: values.etf_short - initial_investment,
            values,
        }
    }
}

/// Output of one simulation: the per-day records and the final valuations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub initial_investment: f64,
    pub records: Vec<DayRecord>,
    pub final_values: Valuations,
}

impl SimulationRun {
    /// Day-0 valuations: nothing applied yet.
    pub fn opening(&self) -> Valuations {
        Valuations::opening(self.initial_investment)
    }

    /// The drawn return stream, in day order.
    pub fn returns(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.daily_return).collect()
    }

    pub fn days(&self) -> usize {
        self.records.len()
    }
}

/// Simulator owning its configuration and an injected random engine.
///
/// The engine is seeded once by the caller and consumed by a single run.
pub struct DecaySimulator<R: RngCore> {
    config: SimulationConfig,
    rng: R,
}

impl<R: RngCore> DecaySimulator<R> {
    /// Validates the configuration; the run does not start on error.
    pub fn new(config: SimulationConfig, rng: R) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn run(mut self) -> SimulationRun {
        let initial = self.config.initial_investment;
        let mut values = Valuations::opening(initial);
        let mut records = Vec::with_capacity(self.config.days);

        let stream = ReturnStream::new(&mut self.rng, &self.config.variations, self.config.days);
        for (i, daily_return) in stream.enumerate() {
            values.apply(daily_return, initial);
            let record = DayRecord::new(i + 1, daily_return, values, initial);
            debug!(
                day = record.day,
                daily_return,
                asset = values.asset,
                manual_short = values.manual_short,
                etf_short = values.etf_short,
                "day simulated"
            );
            records.push(record);
        }

        SimulationRun {
            initial_investment: initial,
            records,
            final_values: values,
        }
    }
}

/// Run a configuration with its own configured engine, seeded from `config.seed`.
pub fn simulate(config: &SimulationConfig) -> Result<SimulationRun, SimError> {
    let rng = config.engine.build(config.seed);
    Ok(DecaySimulator::new(config.clone(), rng)?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigIssue;
    use crate::rng::{Mt19937, RngEngine};

    fn config(variations: Vec<f64>, days: usize) -> SimulationConfig {
        SimulationConfig {
            seed: 7,
            initial_investment: 100.0,
            days,
            variations,
            engine: RngEngine::Mt19937,
        }
    }

    #[test]
    fn single_value_single_day_shorts_coincide() {
        let run = simulate(&config(vec![-0.04], 1)).unwrap();
        let v = run.final_values;
        assert_eq!(v.asset, 100.0 * (1.0 - 0.04));
        assert_eq!(v.manual_short, 2.0 * 100.0 - 100.0 * (1.0 - 0.04));
        assert_eq!(v.etf_short, 100.0 * (1.0 + 0.04));
        assert!((v.manual_short - v.etf_short).abs() < 1e-12);
    }

    #[test]
    fn alternating_returns_open_a_gap() {
        // +10% then -10%: asset 99, manual short 101, etf short 90 * 1.1 = 99.
        let mut values = Valuations::opening(100.0);
        values.apply(0.10, 100.0);
        values.apply(-0.10, 100.0);
        assert!((values.asset - 99.0).abs() < 1e-9);
        assert!((values.manual_short - 101.0).abs() < 1e-9);
        assert!((values.etf_short - 99.0).abs() < 1e-9);
    }

    #[test]
    fn records_cover_every_day_once() {
        let run = simulate(&config(vec![0.01, -0.02], 25)).unwrap();
        assert_eq!(run.days(), 25);
        let days: Vec<usize> = run.records.iter().map(|r| r.day).collect();
        assert_eq!(days, (1..=25).collect::<Vec<_>>());
        assert_eq!(run.records.last().unwrap().values, run.final_values);
    }

    #[test]
    fn opening_is_all_initial() {
        let run = simulate(&config(vec![0.01], 3)).unwrap();
        assert_eq!(run.opening(), Valuations::opening(100.0));
    }

    #[test]
    fn pnl_is_value_minus_initial() {
        let run = simulate(&config(vec![0.03, -0.05], 10)).unwrap();
        for r in &run.records {
            assert_eq!(r.asset_pnl, r.values.asset - 100.0);
            assert_eq!(r.manual_short_pnl, r.values.manual_short - 100.0);
            assert_eq!(r.etf_short_pnl, r.values.etf_short - 100.0);
        }
    }

    #[test]
    fn injected_engine_matches_configured_engine() {
        let cfg = config(vec![0.02, -0.03, -0.04, 0.05], 40);
        let injected = DecaySimulator::new(cfg.clone(), Mt19937::new(cfg.seed))
            .unwrap()
            .run();
        assert_eq!(injected, simulate(&cfg).unwrap());
    }

    #[test]
    fn invalid_config_does_not_build_a_simulator() {
        let result = DecaySimulator::new(config(vec![], 10), Mt19937::new(1));
        assert!(matches!(
            result,
            Err(SimError::InvalidConfiguration(ConfigIssue::EmptyVariationSet))
        ));
        assert!(simulate(&config(vec![0.01], 0)).is_err());
    }
}
