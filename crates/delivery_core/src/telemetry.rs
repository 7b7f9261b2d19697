//! Telemetry / KPIs: per-order outcomes and the run-level aggregate.
//!
//! Running totals are carried in a [`KpiAccumulator`] value that the engine
//! folds over the processed orders; [`KpiAccumulator::finish`] turns it into
//! the rounded [`Kpis`] of a [`SimulationResult`].

use serde::{Deserialize, Serialize};

use crate::pricing::{round_half_up, round_to_cents};
use crate::scenario::RunParameters;
use crate::traffic::TrafficLevel;

/// Error marker recorded for orders whose route is not in the route set.
pub const ROUTE_MISSING: &str = "route missing";

/// A fully computed delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub order_id: String,
    pub route_id: String,
    pub order_value: f64,
    /// Delivery time rounded to the nearest minute.
    pub time_to_deliver_minutes: i64,
    pub on_time: bool,
    pub penalty: f64,
    pub bonus: f64,
    pub fuel_cost: f64,
    pub profit: f64,
    pub assigned_driver: String,
}

/// Outcome of one input order: delivered, or skipped because its route is unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OrderOutcome {
    Delivered(DeliveryRecord),
    RouteMissing { order_id: String, error: String },
}

impl OrderOutcome {
    pub fn route_missing(order_id: impl Into<String>) -> Self {
        OrderOutcome::RouteMissing {
            order_id: order_id.into(),
            error: ROUTE_MISSING.to_string(),
        }
    }

    pub fn order_id(&self) -> &str {
        match self {
            OrderOutcome::Delivered(record) => &record.order_id,
            OrderOutcome::RouteMissing { order_id, .. } => order_id,
        }
    }

    pub fn as_delivery(&self) -> Option<&DeliveryRecord> {
        match self {
            OrderOutcome::Delivered(record) => Some(record),
            OrderOutcome::RouteMissing { .. } => None,
        }
    }

    pub fn is_on_time(&self) -> bool {
        self.as_delivery().is_some_and(|record| record.on_time)
    }
}

/// Fuel cost totals keyed by route traffic level. Values are unrounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FuelCostBreakdown {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl FuelCostBreakdown {
    pub fn add(&mut self, level: TrafficLevel, cost: f64) {
        match level {
            TrafficLevel::Low => self.low += cost,
            TrafficLevel::Medium => self.medium += cost,
            TrafficLevel::High => self.high += cost,
        }
    }

    pub fn get(&self, level: TrafficLevel) -> f64 {
        match level {
            TrafficLevel::Low => self.low,
            TrafficLevel::Medium => self.medium,
            TrafficLevel::High => self.high,
        }
    }

    pub fn total(&self) -> f64 {
        self.low + self.medium + self.high
    }
}

/// Run-level KPIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    /// Sum of order profits, rounded to the nearest integer.
    pub total_profit: i64,
    /// On-time share of all processed orders in percent, two decimals.
    pub efficiency: f64,
    pub on_time_deliveries: usize,
    /// Every processed order, including those with a missing route.
    pub total_deliveries: usize,
    pub fuel_cost_breakdown: FuelCostBreakdown,
}

/// Everything one engine invocation produces. Created once per run; the
/// caller owns it from then on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub inputs: RunParameters,
    pub kpis: Kpis,
    /// Outcomes in processing order (descending order value).
    pub per_order: Vec<OrderOutcome>,
}

impl SimulationResult {
    pub fn deliveries(&self) -> impl Iterator<Item = &DeliveryRecord> + '_ {
        self.per_order.iter().filter_map(OrderOutcome::as_delivery)
    }

    /// Number of orders skipped because their route did not resolve.
    pub fn unresolved_count(&self) -> usize {
        self.per_order
            .iter()
            .filter(|outcome| matches!(outcome, OrderOutcome::RouteMissing { .. }))
            .count()
    }
}

/// Running totals threaded through the order loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiAccumulator {
    pub total_profit: f64,
    pub on_time_count: usize,
    pub total_deliveries: usize,
    pub fuel_cost_breakdown: FuelCostBreakdown,
}

impl KpiAccumulator {
    /// Fold one outcome into the totals. `traffic_level` is the level of the
    /// delivered order's route and is ignored for missing routes.
    pub fn record(mut self, outcome: &OrderOutcome, traffic_level: Option<TrafficLevel>) -> Self {
        self.total_deliveries += 1;
        if let OrderOutcome::Delivered(record) = outcome {
            if record.on_time {
                self.on_time_count += 1;
            }
            self.total_profit += record.profit;
            if let Some(level) = traffic_level {
                self.fuel_cost_breakdown.add(level, record.fuel_cost);
            }
        }
        self
    }

    /// On-time percentage, unrounded. Zero when nothing was processed.
    pub fn efficiency(&self) -> f64 {
        if self.total_deliveries == 0 {
            0.0
        } else {
            self.on_time_count as f64 / self.total_deliveries as f64 * 100.0
        }
    }

    pub fn finish(self) -> Kpis {
        Kpis {
            total_profit: round_half_up(self.total_profit) as i64,
            efficiency: round_to_cents(self.efficiency()),
            on_time_deliveries: self.on_time_count,
            total_deliveries: self.total_deliveries,
            fuel_cost_breakdown: self.fuel_cost_breakdown,
        }
    }
}
