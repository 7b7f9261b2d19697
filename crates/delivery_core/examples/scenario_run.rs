//! Run a generated 40 driver / 2000 order scenario and print the KPIs.
//!
//! Run with: cargo run -p delivery_core --example scenario_run

use delivery_core::runner::simulate_detailed;
use delivery_core::rules::SimulationRules;
use delivery_core::scenario::{generate_scenario, RunParameters, ScenarioConfig};
use delivery_core::traffic::TrafficLevel;

fn main() {
    const NUM_DRIVERS: usize = 40;
    const NUM_ROUTES: usize = 25;
    const NUM_ORDERS: usize = 2_000;

    let scenario = match generate_scenario(
        &ScenarioConfig::default()
            .with_seed(123)
            .with_counts(NUM_DRIVERS, NUM_ROUTES, NUM_ORDERS)
            .with_missing_route_share(0.02),
    ) {
        Ok(scenario) => scenario,
        Err(err) => {
            eprintln!("invalid scenario config: {err}");
            std::process::exit(1);
        }
    };
    let drivers = scenario.active_drivers(NUM_DRIVERS);
    let params = RunParameters::new(NUM_DRIVERS, "09:00", 8.0);

    let run = match simulate_detailed(
        &drivers,
        &scenario.routes,
        &scenario.orders,
        &params,
        &SimulationRules::default(),
    ) {
        Ok(run) => run,
        Err(err) => {
            eprintln!("simulation failed: {err}");
            std::process::exit(1);
        }
    };
    let kpis = &run.result.kpis;

    println!(
        "--- Scenario run ({} drivers, {} routes, {} orders, seed 123) ---",
        NUM_DRIVERS, NUM_ROUTES, NUM_ORDERS
    );
    println!("Total profit: {}", kpis.total_profit);
    println!(
        "Efficiency: {:.2}% ({} of {} on time)",
        kpis.efficiency, kpis.on_time_deliveries, kpis.total_deliveries
    );
    println!("Unresolved orders: {}", run.result.unresolved_count());
    for level in TrafficLevel::ALL {
        println!(
            "Fuel cost ({level}): {:.2}",
            kpis.fuel_cost_breakdown.get(level)
        );
    }

    let over = run.workloads.iter().filter(|w| w.exceeds_max_hours).count();
    let busiest = run.workloads.iter().max_by_key(|w| w.assigned_minutes);
    println!("Drivers over {}h: {}", params.max_hours_per_driver, over);
    if let Some(busiest) = busiest {
        println!(
            "Busiest driver: {} ({} min, {} orders)",
            busiest.name,
            busiest.assigned_minutes,
            busiest.assigned_orders.len()
        );
    }
}
