//! Example: Parameter sweep over fleet size and rule settings.
//!
//! This example demonstrates how to:
//! 1. Generate a synthetic data set
//! 2. Build a grid of driver counts, late penalties and fuel costs
//! 3. Run the grid in parallel
//! 4. Score the runs and pick the best configuration
//! 5. Export results to CSV and JSON

use delivery_core::scenario::{generate_scenario, ScenarioConfig};
use delivery_experiments::{
    export_to_csv, export_to_json, find_best_parameters, find_best_result_index,
    run_parallel_experiments, ParameterSpace, ScoreWeights,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Starting parameter sweep experiment...");

    let scenario = generate_scenario(
        &ScenarioConfig::default()
            .with_seed(7)
            .with_counts(30, 20, 1500),
    )?;

    let space = ParameterSpace::grid()
        .num_drivers(vec![5, 10, 20, 30])
        .late_penalty(vec![25.0, 50.0, 100.0])
        .base_fuel_per_km(vec![4.0, 5.0, 6.0])
        .max_hours_per_driver(vec![8.0, 10.0]);

    println!("Generating parameter sets...");
    let parameter_sets = space.generate();
    println!(
        "Generated {} parameter combinations (invalid combinations filtered out)",
        parameter_sets.len()
    );

    println!("Running simulations in parallel...");
    let results = run_parallel_experiments(&scenario, &parameter_sets, None)?;
    println!("Completed {} simulations", results.len());

    let weights = ScoreWeights::default();
    let Some(best_idx) = find_best_result_index(&results, &weights) else {
        return Err("no results to analyze".into());
    };

    println!("\n=== Best Configuration ===");
    let best_result = &results[best_idx];
    println!("Total profit: {}", best_result.total_profit);
    println!("Efficiency: {:.2}%", best_result.efficiency);
    println!("Fuel cost: {:.2}", best_result.fuel_cost_total);
    println!("Avg driver minutes: {:.1}", best_result.avg_driver_minutes);
    println!("Drivers over max hours: {}", best_result.drivers_over_max_hours);

    if let Some(best_params) = find_best_parameters(&results, &parameter_sets, &weights) {
        println!("\n=== Best Parameters ===");
        println!("Number of drivers: {}", best_params.params.number_of_drivers);
        println!("Max hours per driver: {}", best_params.params.max_hours_per_driver);
        println!("Late penalty: {:.2}", best_params.rules.late_penalty);
        println!("Fuel per km: {:.2}", best_params.rules.base_fuel_per_km);
    }

    println!("\nExporting results...");
    export_to_csv(&results, &parameter_sets, "experiment_results.csv")?;
    println!("Exported to experiment_results.csv");
    export_to_json(&results, "experiment_results.json")?;
    println!("Exported to experiment_results.json");

    println!("\nExperiment complete!");

    Ok(())
}
