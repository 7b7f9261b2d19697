//! Parallel experimentation and tooling around the delivery dispatch engine.
//!
//! This crate loads CSV data sets, runs the engine over parameter grids in
//! parallel, scores and ranks the runs, exports results, and keeps a
//! history of past simulations.
//!
//! # Quick Start
//!
//! ```no_run
//! use delivery_experiments::{
//!     find_best_result_index, load_dataset, run_parallel_experiments, ParameterSpace,
//!     ScoreWeights,
//! };
//!
//! let service_date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let scenario = load_dataset("data", service_date).unwrap();
//!
//! let parameter_sets = ParameterSpace::grid()
//!     .num_drivers(vec![2, 3, 5])
//!     .late_penalty(vec![25.0, 50.0])
//!     .generate();
//!
//! let results = run_parallel_experiments(&scenario, &parameter_sets, None).unwrap();
//! let best_idx = find_best_result_index(&results, &ScoreWeights::default()).unwrap();
//! println!("best: {}", results[best_idx].experiment_id);
//! ```
//!
//! # Architecture
//!
//! - [`dataset`]: CSV data set loading and the sample data set
//! - [`parameters`]: Parameter variation framework (grid search, random sampling)
//! - [`runner`]: Parallel execution using rayon
//! - [`metrics`]: Per-run sweep metrics
//! - [`scoring`]: Weighted score calculation
//! - [`export`]: Result export to CSV/JSON and ranking
//! - [`history`]: In-memory store of past results

pub mod dataset;
pub mod export;
pub mod history;
pub mod metrics;
pub mod parameters;
pub mod runner;
pub mod scoring;

pub use dataset::{load_dataset, write_dataset, write_sample_dataset, DatasetError};
pub use export::{
    export_deliveries_to_csv, export_simulation_result, export_to_csv, export_to_json,
    find_best_parameters, find_best_result_index,
};
pub use history::{SimulationHistory, StoredSimulation};
pub use metrics::ExperimentResult;
pub use parameters::{ParameterSet, ParameterSpace};
pub use runner::{run_parallel_experiments, SweepError};
pub use scoring::{calculate_scores, ScoreWeights};
