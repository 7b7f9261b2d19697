//! Simulation runner: one linear pass over the order book.
//!
//! Orders are sorted once by descending value. Each order is priced against
//! its route, handed to the least-loaded driver and folded into the KPI
//! accumulator. The runner holds no state between invocations; every call
//! builds a fresh [`DriverPool`].

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::EngineInputError;
use crate::model::{Driver, Order, Route};
use crate::pool::{DriverPool, DriverWorkload};
use crate::pricing::price_delivery;
use crate::rules::SimulationRules;
use crate::scenario::RunParameters;
use crate::telemetry::{DeliveryRecord, KpiAccumulator, OrderOutcome, SimulationResult};

/// A simulation result together with the final driver workloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRun {
    pub result: SimulationResult,
    /// Per-driver workload in pool order.
    pub workloads: Vec<DriverWorkload>,
}

/// Run the engine with the default rule set.
///
/// # Errors
///
/// Returns [`EngineInputError::EmptyDriverPool`] when taking the first
/// `params.number_of_drivers` drivers leaves no one to assign.
pub fn simulate(
    drivers: &[Driver],
    routes: &[Route],
    orders: &[Order],
    params: &RunParameters,
) -> Result<SimulationResult, EngineInputError> {
    simulate_with_rules(drivers, routes, orders, params, &SimulationRules::default())
}

/// Run the engine with a custom rule set.
pub fn simulate_with_rules(
    drivers: &[Driver],
    routes: &[Route],
    orders: &[Order],
    params: &RunParameters,
    rules: &SimulationRules,
) -> Result<SimulationResult, EngineInputError> {
    simulate_detailed(drivers, routes, orders, params, rules).map(|run| run.result)
}

/// Run the engine and also report each driver's final workload.
pub fn simulate_detailed(
    drivers: &[Driver],
    routes: &[Route],
    orders: &[Order],
    params: &RunParameters,
    rules: &SimulationRules,
) -> Result<SimulationRun, EngineInputError> {
    let mut pool = DriverPool::new(drivers, params.number_of_drivers, rules.fatigue_threshold_hours)?;

    // Later duplicates of a route id replace earlier ones.
    let routes_by_id: HashMap<&str, &Route> = routes
        .iter()
        .map(|route| (route.id.as_str(), route))
        .collect();

    let mut sorted_orders: Vec<&Order> = orders.iter().collect();
    // Stable sort: equal values keep their input order.
    sorted_orders.sort_by(|a, b| b.value.total_cmp(&a.value));

    info!(
        drivers = pool.len(),
        routes = routes_by_id.len(),
        orders = sorted_orders.len(),
        "starting delivery simulation"
    );

    let mut per_order = Vec::with_capacity(sorted_orders.len());
    let mut totals = KpiAccumulator::default();

    for order in sorted_orders {
        let Some(route) = routes_by_id.get(order.route_id.as_str()).copied() else {
            warn!(
                order_id = %order.id,
                route_id = %order.route_id,
                "order references an unknown route; skipping"
            );
            let outcome = OrderOutcome::route_missing(order.id.as_str());
            totals = totals.record(&outcome, None);
            per_order.push(outcome);
            continue;
        };

        let picked = pool.peek_least_loaded();
        let economics = price_delivery(order, route, picked.fatigued, rules);
        pool.assign(picked.index, &order.id, economics.load_minutes());

        debug!(
            order_id = %order.id,
            route_id = %route.id,
            driver = pool.name(picked.index),
            fatigued = picked.fatigued,
            minutes = economics.time_minutes,
            on_time = economics.on_time,
            profit = economics.profit,
            "order assigned"
        );

        let outcome = OrderOutcome::Delivered(DeliveryRecord {
            order_id: order.id.clone(),
            route_id: route.id.clone(),
            order_value: order.value,
            time_to_deliver_minutes: economics.display_minutes(),
            on_time: economics.on_time,
            penalty: economics.penalty,
            bonus: economics.bonus,
            fuel_cost: economics.fuel_cost,
            profit: economics.profit,
            assigned_driver: pool.name(picked.index).to_string(),
        });
        totals = totals.record(&outcome, Some(route.traffic_level));
        per_order.push(outcome);
    }

    let kpis = totals.finish();
    let workloads = pool.into_workloads(params.max_hours_per_driver);

    let over_max_hours = workloads.iter().filter(|w| w.exceeds_max_hours).count();
    if over_max_hours > 0 {
        // Max hours is advisory only; assignment is not capped.
        warn!(
            drivers = over_max_hours,
            max_hours = params.max_hours_per_driver,
            "drivers assigned more than the max hours per driver"
        );
    }

    info!(
        total_profit = kpis.total_profit,
        efficiency = kpis.efficiency,
        on_time = kpis.on_time_deliveries,
        total = kpis.total_deliveries,
        "delivery simulation finished"
    );

    Ok(SimulationRun {
        result: SimulationResult {
            inputs: params.clone(),
            kpis,
            per_order,
        },
        workloads,
    })
}
