//! Parallel experiment execution using rayon.
//!
//! Every parameter set runs the engine once against the same read-only data
//! set. Runs share nothing mutable, so they parallelise without locking.

use delivery_core::runner::simulate_detailed;
use delivery_core::scenario::Scenario;
use delivery_core::EngineInputError;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::metrics::{extract_metrics, ExperimentResult};
use crate::parameters::ParameterSet;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("experiment {experiment_id} failed: {source}")]
    Engine {
        experiment_id: String,
        #[source]
        source: EngineInputError,
    },
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("parameter space produced no parameter sets")]
    EmptyParameterSpace,
}

/// Run one parameter set against the data set.
///
/// Drivers go through the usual supply step first: inactive drivers are
/// dropped and the roster is capped at the requested count.
pub fn run_single_experiment(
    scenario: &Scenario,
    param_set: &ParameterSet,
) -> Result<ExperimentResult, SweepError> {
    let drivers = scenario.active_drivers(param_set.params.number_of_drivers);
    let run = simulate_detailed(
        &drivers,
        &scenario.routes,
        &scenario.orders,
        &param_set.params,
        &param_set.rules,
    )
    .map_err(|source| SweepError::Engine {
        experiment_id: param_set.experiment_id.clone(),
        source,
    })?;

    let metrics = extract_metrics(param_set, &run);
    debug!(
        experiment_id = %metrics.experiment_id,
        total_profit = metrics.total_profit,
        efficiency = metrics.efficiency,
        "experiment finished"
    );
    Ok(metrics)
}

/// Run all parameter sets in parallel with a progress bar.
///
/// `num_threads` overrides rayon's default thread count. Results are in the
/// same order as `parameter_sets`.
pub fn run_parallel_experiments(
    scenario: &Scenario,
    parameter_sets: &[ParameterSet],
    num_threads: Option<usize>,
) -> Result<Vec<ExperimentResult>, SweepError> {
    run_parallel_experiments_with_progress(scenario, parameter_sets, num_threads, true)
}

/// Run all parameter sets in parallel, optionally showing a progress bar.
///
/// The first failing set aborts the sweep.
pub fn run_parallel_experiments_with_progress(
    scenario: &Scenario,
    parameter_sets: &[ParameterSet],
    num_threads: Option<usize>,
    show_progress: bool,
) -> Result<Vec<ExperimentResult>, SweepError> {
    if parameter_sets.is_empty() {
        return Err(SweepError::EmptyParameterSpace);
    }

    let total = parameter_sets.len();
    let pb = show_progress.then(|| {
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar
    });

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = num_threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;

    info!(
        experiments = total,
        threads = pool.current_num_threads(),
        orders = scenario.orders.len(),
        "starting parameter sweep"
    );

    let results = pool.install(|| {
        parameter_sets
            .par_iter()
            .map(|param_set| {
                let result = run_single_experiment(scenario, param_set);
                if let Some(progress_bar) = &pb {
                    progress_bar.inc(1);
                }
                result
            })
            .collect::<Result<Vec<_>, _>>()
    });

    if let Some(progress_bar) = &pb {
        progress_bar.finish_with_message("Completed");
    }

    let results = results?;
    info!(experiments = results.len(), "parameter sweep finished");
    Ok(results)
}
