//! Result export and analysis utilities.
//!
//! Sweep results go to CSV or JSON; single runs go to JSON or a per-order
//! CSV. Ranking picks the best run by weighted score.

use std::path::Path;

use delivery_core::telemetry::SimulationResult;

use crate::metrics::ExperimentResult;
use crate::parameters::ParameterSet;
use crate::scoring::ScoreWeights;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/ranking.rs"]
mod ranking;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Export experiment results to a pretty-printed JSON array.
pub fn export_to_json(
    results: &[ExperimentResult],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::write_json(results, file)
}

/// Export experiment results with their parameter sets to CSV.
///
/// `results[i]` must belong to `parameter_sets[i]`.
///
/// # Errors
///
/// Fails on empty input, mismatched lengths, or I/O and CSV errors.
pub fn export_to_csv(
    results: &[ExperimentResult],
    parameter_sets: &[ParameterSet],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(results)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_to_csv_impl(results, parameter_sets, file)
}

/// Export one engine result (inputs, KPIs and per-order outcomes) as JSON.
pub fn export_simulation_result(
    result: &SimulationResult,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::write_json(result, file)
}

/// Export the per-order outcomes of one engine result as CSV, one row per order.
pub fn export_deliveries_to_csv(
    result: &SimulationResult,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    csv::export_deliveries_impl(result, file)
}

/// The parameter set of the highest-scoring result.
///
/// `None` if inputs are empty or their lengths differ.
pub fn find_best_parameters<'a>(
    results: &[ExperimentResult],
    parameter_sets: &'a [ParameterSet],
    weights: &ScoreWeights,
) -> Option<&'a ParameterSet> {
    ranking::find_best_parameters_impl(results, parameter_sets, weights)
}

/// Index of the highest-scoring result; the first one on ties.
pub fn find_best_result_index(results: &[ExperimentResult], weights: &ScoreWeights) -> Option<usize> {
    ranking::find_best_index_by_score(results, weights)
}
