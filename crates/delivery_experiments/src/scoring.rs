//! Experiment score calculation.
//!
//! Combines min-max normalised sweep metrics into a single weighted score
//! per run. Scores are relative: they only compare runs of the same sweep.

use crate::metrics::ExperimentResult;

/// Weights for combining experiment metrics into a score.
///
/// # Default Weights
///
/// - Profit: 0.5
/// - Efficiency: 0.4
/// - Overtime drivers: -0.1 (penalty, more is worse)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Weight for total profit (higher is better).
    pub profit_weight: f64,
    /// Weight for on-time efficiency (higher is better).
    pub efficiency_weight: f64,
    /// Weight for drivers over max hours; negative to penalise.
    pub overtime_penalty: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            profit_weight: 0.5,
            efficiency_weight: 0.4,
            overtime_penalty: -0.1,
        }
    }
}

impl ScoreWeights {
    pub fn new(profit_weight: f64, efficiency_weight: f64, overtime_penalty: f64) -> Self {
        Self {
            profit_weight,
            efficiency_weight,
            overtime_penalty,
        }
    }
}

/// Min-max normalise to [0, 1]. Returns 0.5 when all values are equal.
fn normalize_metric(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        0.5
    } else {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    })
}

/// Calculate scores for all experiment results, in input order.
pub fn calculate_scores(results: &[ExperimentResult], weights: &ScoreWeights) -> Vec<f64> {
    if results.is_empty() {
        return vec![];
    }

    let (profit_min, profit_max) = min_max(results.iter().map(|r| r.total_profit as f64));
    let (efficiency_min, efficiency_max) = min_max(results.iter().map(|r| r.efficiency));
    let (overtime_min, overtime_max) =
        min_max(results.iter().map(|r| r.drivers_over_max_hours as f64));

    results
        .iter()
        .map(|result| {
            let profit_norm = normalize_metric(result.total_profit as f64, profit_min, profit_max);
            let efficiency_norm =
                normalize_metric(result.efficiency, efficiency_min, efficiency_max);
            let overtime_norm = normalize_metric(
                result.drivers_over_max_hours as f64,
                overtime_min,
                overtime_max,
            );

            profit_norm * weights.profit_weight
                + efficiency_norm * weights.efficiency_weight
                + overtime_norm * weights.overtime_penalty
        })
        .collect()
}
