use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use delivery_core::rules::SimulationRules;
use delivery_core::runner::simulate_detailed;
use delivery_core::scenario::{generate_scenario, RunParameters, Scenario, ScenarioConfig};
use delivery_core::traffic::TrafficLevel;
use delivery_experiments::dataset::{load_dataset, write_dataset, write_sample_dataset};
use delivery_experiments::export::{
    export_deliveries_to_csv, export_simulation_result, export_to_csv, export_to_json,
    find_best_result_index,
};
use delivery_experiments::parameters::ParameterSpace;
use delivery_experiments::runner::run_parallel_experiments_with_progress;
use delivery_experiments::scoring::{calculate_scores, ScoreWeights};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "delivery_sim",
    about = "Delivery dispatch simulation",
    long_about = "Assigns orders to the least-loaded drivers, applies traffic, fatigue,\n\
                  penalty, bonus and fuel rules, and reports profit and efficiency KPIs."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the sample data set (5 drivers, 5 routes, 7 orders)
    Seed {
        #[command(flatten)]
        data: DataArgs,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
    /// Write a seeded synthetic data set
    Generate {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long, default_value_t = 10)]
        drivers: usize,
        #[arg(long, default_value_t = 10)]
        routes: usize,
        #[arg(long, default_value_t = 50)]
        orders: usize,
        #[arg(long)]
        seed: Option<u64>,
        /// Share of orders pointing at routes that do not exist
        #[arg(long, default_value_t = 0.0)]
        missing_route_share: f64,
        /// Share of drivers marked inactive
        #[arg(long, default_value_t = 0.0)]
        inactive_share: f64,
    },
    /// Run one simulation and print its KPIs
    Run {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        rules: RulesArgs,
        /// Number of active drivers to dispatch
        #[arg(long, default_value_t = 1)]
        drivers: usize,
        /// Shift start time (HH:MM), echoed in the result
        #[arg(long, default_value = "09:00")]
        start_time: String,
        #[arg(long, default_value_t = 8.0)]
        max_hours: f64,
        /// Write the full result as JSON
        #[arg(long)]
        output: Option<PathBuf>,
        /// Write per-order outcomes as CSV
        #[arg(long)]
        deliveries_csv: Option<PathBuf>,
    },
    /// Run a parameter sweep in parallel and rank the runs
    Sweep {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        rules: RulesArgs,
        #[arg(long, value_delimiter = ',', default_value = "1,2,3,4,5")]
        drivers: Vec<usize>,
        #[arg(long, value_delimiter = ',')]
        max_hours: Vec<f64>,
        #[arg(long, value_delimiter = ',')]
        late_penalty: Vec<f64>,
        #[arg(long, value_delimiter = ',')]
        fuel_per_km: Vec<f64>,
        #[arg(long, value_delimiter = ',')]
        fatigue_multiplier: Vec<f64>,
        #[arg(long, value_delimiter = ',')]
        bonus_rate: Vec<f64>,
        /// Sample this many parameter sets instead of the full grid
        #[arg(long)]
        sample: Option<usize>,
        #[arg(long, default_value_t = 42)]
        sample_seed: u64,
        /// Worker threads (defaults to the number of CPUs)
        #[arg(long)]
        threads: Option<usize>,
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long)]
        json: Option<PathBuf>,
        #[arg(long)]
        no_progress: bool,
    },
}

#[derive(Args)]
struct DataArgs {
    /// Data set directory
    #[arg(long, env = "DELIVERY_SIM_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,
    /// Date on which order delivery times fall (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    service_date: Option<NaiveDate>,
}

#[derive(Args)]
struct RulesArgs {
    /// JSON rule set; absent fields keep their defaults
    #[arg(long, env = "DELIVERY_SIM_RULES")]
    rules: Option<PathBuf>,
}

// ── helpers ────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("delivery_core=info,delivery_experiments=info,delivery_sim=info")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_rules(args: &RulesArgs) -> Result<SimulationRules> {
    match &args.rules {
        Some(path) => SimulationRules::from_json_file(path)
            .with_context(|| format!("loading rules from {}", path.display())),
        None => Ok(SimulationRules::default()),
    }
}

fn service_date(data: &DataArgs) -> NaiveDate {
    data.service_date.unwrap_or_else(|| Local::now().date_naive())
}

fn load(data: &DataArgs) -> Result<Scenario> {
    load_dataset(&data.data_dir, service_date(data))
        .with_context(|| format!("loading data set from {}", data.data_dir.display()))
}

// Export helpers return non-Send boxed errors.
fn exported(path: &Path, outcome: Result<(), Box<dyn std::error::Error>>) -> Result<()> {
    outcome.map_err(|err| anyhow::anyhow!("writing {}: {err}", path.display()))
}

// ── commands ───────────────────────────────────────────────────────

fn seed(data: &DataArgs, force: bool) -> Result<()> {
    let written = write_sample_dataset(&data.data_dir, force)?;
    if written.is_empty() {
        println!(
            "Sample data already present in {} (use --force to overwrite)",
            data.data_dir.display()
        );
    }
    for path in written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn generate(data: &DataArgs, config: ScenarioConfig) -> Result<()> {
    let scenario = generate_scenario(&config)?;
    write_dataset(&data.data_dir, &scenario)?;
    println!(
        "Wrote {} drivers, {} routes, {} orders to {}",
        scenario.drivers.len(),
        scenario.routes.len(),
        scenario.orders.len(),
        data.data_dir.display()
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run(
    data: &DataArgs,
    rules: &RulesArgs,
    drivers: usize,
    start_time: String,
    max_hours: f64,
    output: Option<PathBuf>,
    deliveries_csv: Option<PathBuf>,
) -> Result<()> {
    let params = RunParameters::new(drivers, start_time, max_hours);
    params.validate()?;
    let rules = load_rules(rules)?;
    let scenario = load(data)?;

    let active = scenario.active_drivers(params.number_of_drivers);
    let run = simulate_detailed(&active, &scenario.routes, &scenario.orders, &params, &rules)?;
    let kpis = &run.result.kpis;

    println!("=== Simulation ===");
    println!("Drivers: {} of {} requested", run.workloads.len(), params.number_of_drivers);
    println!("Total profit: {}", kpis.total_profit);
    println!(
        "Efficiency: {:.2}% ({} of {} on time)",
        kpis.efficiency, kpis.on_time_deliveries, kpis.total_deliveries
    );
    for level in TrafficLevel::ALL {
        println!("Fuel ({level}): {:.2}", kpis.fuel_cost_breakdown.get(level));
    }
    let unresolved = run.result.unresolved_count();
    if unresolved > 0 {
        println!("Orders with unknown routes: {unresolved}");
    }
    for workload in &run.workloads {
        println!(
            "  {:<20} {:>5} min {:>3} orders{}{}",
            workload.name,
            workload.assigned_minutes,
            workload.assigned_orders.len(),
            if workload.fatigued { " (fatigued)" } else { "" },
            if workload.exceeds_max_hours { " (over max hours)" } else { "" },
        );
    }

    if let Some(path) = output {
        exported(&path, export_simulation_result(&run.result, &path))?;
        info!(path = %path.display(), "wrote simulation result");
    }
    if let Some(path) = deliveries_csv {
        exported(&path, export_deliveries_to_csv(&run.result, &path))?;
        info!(path = %path.display(), "wrote per-order outcomes");
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn sweep(
    data: &DataArgs,
    rules: &RulesArgs,
    space: ParameterSpace,
    sample: Option<usize>,
    sample_seed: u64,
    threads: Option<usize>,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
    show_progress: bool,
) -> Result<()> {
    let space = space.with_base_rules(load_rules(rules)?);
    let scenario = load(data)?;

    let parameter_sets = match sample {
        Some(count) => space.sample_random(count, sample_seed),
        None => space.generate(),
    };
    println!(
        "Generated {} parameter sets ({} grid points, invalid combinations filtered out)",
        parameter_sets.len(),
        space.grid_size()
    );

    let results =
        run_parallel_experiments_with_progress(&scenario, &parameter_sets, threads, show_progress)?;

    let weights = ScoreWeights::default();
    let scores = calculate_scores(&results, &weights);
    let Some(best_idx) = find_best_result_index(&results, &weights) else {
        bail!("sweep produced no results");
    };
    let best = &results[best_idx];
    let best_set = &parameter_sets[best_idx];

    println!("\n=== Best Configuration ===");
    println!("Experiment: {} (score {:.3})", best.experiment_id, scores[best_idx]);
    println!("Drivers: {}", best_set.params.number_of_drivers);
    println!("Max hours per driver: {}", best_set.params.max_hours_per_driver);
    println!("Late penalty: {}", best_set.rules.late_penalty);
    println!("Fuel per km: {}", best_set.rules.base_fuel_per_km);
    println!("Fatigue multiplier: {}", best_set.rules.fatigue_time_multiplier);
    println!("Bonus rate: {}", best_set.rules.high_value_bonus_rate);
    println!("Total profit: {}", best.total_profit);
    println!("Efficiency: {:.2}%", best.efficiency);
    println!("Drivers over max hours: {}", best.drivers_over_max_hours);

    if let Some(path) = csv {
        exported(&path, export_to_csv(&results, &parameter_sets, &path))?;
        println!("Results written to {}", path.display());
    }
    if let Some(path) = json {
        exported(&path, export_to_json(&results, &path))?;
        println!("Results written to {}", path.display());
    }
    Ok(())
}

// ── main ───────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Seed { data, force } => seed(&data, force),
        Commands::Generate {
            data,
            drivers,
            routes,
            orders,
            seed,
            missing_route_share,
            inactive_share,
        } => {
            let mut config = ScenarioConfig::default()
                .with_counts(drivers, routes, orders)
                .with_missing_route_share(missing_route_share)
                .with_inactive_share(inactive_share);
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            generate(&data, config)
        }
        Commands::Run {
            data,
            rules,
            drivers,
            start_time,
            max_hours,
            output,
            deliveries_csv,
        } => run(&data, &rules, drivers, start_time, max_hours, output, deliveries_csv),
        Commands::Sweep {
            data,
            rules,
            drivers,
            max_hours,
            late_penalty,
            fuel_per_km,
            fatigue_multiplier,
            bonus_rate,
            sample,
            sample_seed,
            threads,
            csv,
            json,
            no_progress,
        } => {
            let space = ParameterSpace::grid()
                .num_drivers(drivers)
                .max_hours_per_driver(max_hours)
                .late_penalty(late_penalty)
                .base_fuel_per_km(fuel_per_km)
                .fatigue_time_multiplier(fatigue_multiplier)
                .high_value_bonus_rate(bonus_rate);
            sweep(
                &data,
                &rules,
                space,
                sample,
                sample_seed,
                threads,
                csv,
                json,
                !no_progress,
            )
        }
    }
}
