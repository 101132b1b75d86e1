//! Summary analysis of a finished run: pure functions over the final state.
//!
//! No dependency on reporting: every quantity here is a number, formatting is
//! left to the caller.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SimError;
use crate::simulator::{SimulationRun, Valuations};

/// Short valuations with magnitude below this are treated as zero.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// Relative tolerance for the long + manual short conservation identity,
/// scaled by `max(1, initial, |asset|)` of the day checked.
pub const CONSERVATION_TOLERANCE: f64 = 1e-9;

// ─── Individual functions ───────────────────────────────────────────

/// Percentage return: `100 × (final − initial) / initial`.
pub fn percentage_return(final_value: f64, initial_investment: f64) -> f64 {
    100.0 * (final_value - initial_investment) / initial_investment
}

/// Absolute gap between the two shorts.
pub fn decay_magnitude(manual_short: f64, etf_short: f64) -> f64 {
    (manual_short - etf_short).abs()
}

/// Decay relative to the short with the larger magnitude: `(1 − smaller / larger) × 100`.
///
/// Fails with `DegenerateDecayRatio` when both shorts are ~0.
pub fn decay_percentage(manual_short: f64, etf_short: f64) -> Result<f64, SimError> {
    let (smaller, larger) = if manual_short.abs() >= etf_short.abs() {
        (etf_short, manual_short)
    } else {
        (manual_short, etf_short)
    };
    if larger.abs() < DEGENERATE_EPSILON {
        return Err(SimError::DegenerateDecayRatio {
            manual: manual_short,
            etf: etf_short,
        });
    }
    Ok((1.0 - smaller / larger) * 100.0)
}

// ─── Aggregates ─────────────────────────────────────────────────────

/// Percentage return of each strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyReturns {
    pub asset_pct: f64,
    pub manual_short_pct: f64,
    pub etf_short_pct: f64,
}

impl StrategyReturns {
    pub fn compute(values: &Valuations, initial_investment: f64) -> Self {
        Self {
            asset_pct: percentage_return(values.asset, initial_investment),
            manual_short_pct: percentage_return(values.manual_short, initial_investment),
            etf_short_pct: percentage_return(values.etf_short, initial_investment),
        }
    }
}

/// Gap between the manual short and the daily-rebalanced short.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayAnalysis {
    pub magnitude: f64,
    /// `None` when both shorts are ~0 and the ratio is undefined.
    pub percentage: Option<f64>,
}

impl DecayAnalysis {
    pub fn compute(values: &Valuations) -> Self {
        let percentage = match decay_percentage(values.manual_short, values.etf_short) {
            Ok(pct) => Some(pct),
            Err(err) => {
                warn!(%err, "decay percentage reported as undefined");
                None
            }
        };
        Self {
            magnitude: decay_magnitude(values.manual_short, values.etf_short),
            percentage,
        }
    }
}

/// Verification that the manual short mirrors the long asset on every day.
///
/// `asset_pnl + manual_short_pnl` is zero by construction; a residual above
/// the tolerance means the update rule is broken.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConservationCheck {
    pub asset_change: f64,
    pub manual_short_change: f64,
    /// `asset_change + manual_short_change` at the end of the run.
    pub final_sum: f64,
    /// Largest `|asset_pnl + manual_short_pnl|` over all days.
    pub max_residual: f64,
    /// Largest residual scaled by `max(1, initial, |asset|)` of its day.
    pub max_relative_residual: f64,
    /// Day of the largest relative residual (`None` for an empty run).
    pub worst_day: Option<usize>,
    pub tolerance: f64,
    pub holds: bool,
}

impl ConservationCheck {
    pub fn evaluate(run: &SimulationRun) -> Self {
        let initial = run.initial_investment.abs().max(1.0);

        let mut max_residual = 0.0_f64;
        let mut max_relative_residual = 0.0_f64;
        let mut worst_day = None;
        for record in &run.records {
            let residual = (record.asset_pnl + record.manual_short_pnl).abs();
            let relative = residual / initial.max(record.values.asset.abs());
            max_residual = max_residual.max(residual);
            if worst_day.is_none() || relative > max_relative_residual {
                max_relative_residual = relative;
                worst_day = Some(record.day);
            }
        }

        let asset_change = run.final_values.asset - run.initial_investment;
        let manual_short_change = run.final_values.manual_short - run.initial_investment;
        let holds = max_relative_residual <= CONSERVATION_TOLERANCE;
        if !holds {
            warn!(
                max_residual,
                max_relative_residual,
                day = ?worst_day,
                "conservation identity violated"
            );
        }

        Self {
            asset_change,
            manual_short_change,
            final_sum: asset_change + manual_short_change,
            max_residual,
            max_relative_residual,
            worst_day,
            tolerance: CONSERVATION_TOLERANCE,
            holds,
        }
    }
}

/// Everything the final-results and analysis blocks report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub final_values: Valuations,
    pub returns: StrategyReturns,
    pub decay: DecayAnalysis,
    pub conservation: ConservationCheck,
}

impl Summary {
    pub fn compute(run: &SimulationRun) -> Self {
        Self {
            final_values: run.final_values,
            returns: StrategyReturns::compute(&run.final_values, run.initial_investment),
            decay: DecayAnalysis::compute(&run.final_values),
            conservation: ConservationCheck::evaluate(run),
        }
    }
}
