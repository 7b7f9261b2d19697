//! Order-level economics: delivery time, lateness penalty, high-value bonus,
//! fuel cost and the resulting profit contribution.
//!
//! Formulas (with the default [`SimulationRules`]):
//!
//! - `time = base_time × (1 + traffic_multiplier) × fatigue_multiplier`
//! - `penalty = 50` if `time > base_time + 10`, else 0
//! - `bonus = 0.10 × value` if `value > 1000` and on time, else 0
//! - `fuel = distance_km × (5 + surcharge)`, surcharge 2 on `High` traffic
//! - `profit = value + bonus − penalty − fuel`

use crate::model::{Order, Route};
use crate::rules::SimulationRules;
use crate::traffic::{fuel_surcharge_per_km, time_multiplier};

/// Computed economics of one delivery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryEconomics {
    /// Unrounded delivery time in minutes.
    pub time_minutes: f64,
    pub on_time: bool,
    pub penalty: f64,
    pub bonus: f64,
    pub fuel_cost: f64,
    pub profit: f64,
}

impl DeliveryEconomics {
    /// Delivery time as shown in reports: nearest whole minute.
    pub fn display_minutes(&self) -> i64 {
        round_half_up(self.time_minutes) as i64
    }

    /// Minutes charged to the driver's workload: always rounded up.
    pub fn load_minutes(&self) -> u64 {
        // Saturating cast: negative or NaN times charge nothing.
        self.time_minutes.ceil() as u64
    }
}

/// Delivery time for a route, given whether the driver is fatigued.
pub fn delivery_time_minutes(route: &Route, fatigued: bool, rules: &SimulationRules) -> f64 {
    let fatigue_multiplier = if fatigued {
        rules.fatigue_time_multiplier
    } else {
        1.0
    };
    route.base_time_minutes * (1.0 + time_multiplier(route.traffic_level)) * fatigue_multiplier
}

/// Flat penalty if `time_minutes` strictly exceeds base time plus tolerance.
pub fn late_penalty(time_minutes: f64, base_time_minutes: f64, rules: &SimulationRules) -> f64 {
    if time_minutes > base_time_minutes + rules.late_tolerance_minutes {
        rules.late_penalty
    } else {
        0.0
    }
}

/// Bonus for on-time delivery of a high-value order.
pub fn high_value_bonus(order_value: f64, on_time: bool, rules: &SimulationRules) -> f64 {
    if order_value > rules.high_value_threshold && on_time {
        rules.high_value_bonus_rate * order_value
    } else {
        0.0
    }
}

/// Fuel cost of driving a route.
pub fn fuel_cost(route: &Route, rules: &SimulationRules) -> f64 {
    let surcharge = fuel_surcharge_per_km(route.traffic_level, rules.high_traffic_surcharge_per_km);
    route.distance_km * (rules.base_fuel_per_km + surcharge)
}

/// Full economics of delivering `order` over `route`.
///
/// On-time is defined as "no penalty applied", so a zero late penalty rule
/// makes every delivery on time.
pub fn price_delivery(
    order: &Order,
    route: &Route,
    fatigued: bool,
    rules: &SimulationRules,
) -> DeliveryEconomics {
    let time_minutes = delivery_time_minutes(route, fatigued, rules);
    let penalty = late_penalty(time_minutes, route.base_time_minutes, rules);
    let on_time = penalty == 0.0;
    let bonus = high_value_bonus(order.value, on_time, rules);
    let fuel_cost = fuel_cost(route, rules);
    let profit = order.value + bonus - penalty - fuel_cost;

    DeliveryEconomics {
        time_minutes,
        on_time,
        penalty,
        bonus,
        fuel_cost,
        profit,
    }
}

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    // `value + 0.5` can itself round up, so compare the fraction instead.
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round to two decimal places.
pub fn round_to_cents(value: f64) -> f64 {
    round_half_up(value * 100.0) / 100.0
}
