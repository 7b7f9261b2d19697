//! Input records consumed by the engine: drivers, routes and orders.
//!
//! All three are immutable snapshots. Per-run driver workload lives in
//! [`crate::pool`] and is never written back onto a [`Driver`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::traffic::TrafficLevel;

/// On-duty hours above which a driver counts as fatigued the next day.
pub const FATIGUE_THRESHOLD_HOURS: f64 = 8.0;

/// Whether a driver was fatigued yesterday: the most recent entry of the
/// on-duty history (last element) exceeds [`FATIGUE_THRESHOLD_HOURS`].
///
/// An empty history is never fatigued.
pub fn is_fatigued(past_hours: &[f64]) -> bool {
    is_fatigued_above(past_hours, FATIGUE_THRESHOLD_HOURS)
}

/// [`is_fatigued`] with an explicit threshold.
pub fn is_fatigued_above(past_hours: &[f64], threshold_hours: f64) -> bool {
    past_hours
        .last()
        .is_some_and(|&hours| hours > threshold_hours)
}

fn default_active() -> bool {
    true
}

/// A driver available for dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    /// Daily on-duty hours, oldest first.
    #[serde(default)]
    pub past_hours: Vec<f64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub current_shift_hours: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Driver {
    pub fn new(id: impl Into<String>, name: impl Into<String>, past_hours: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            past_hours,
            email: None,
            current_shift_hours: 0.0,
            is_active: true,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_current_shift_hours(mut self, hours: f64) -> Self {
        self.current_shift_hours = hours;
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn was_fatigued_yesterday(&self) -> bool {
        is_fatigued(&self.past_hours)
    }
}

/// A delivery route with its congestion level and base travel time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub distance_km: f64,
    pub traffic_level: TrafficLevel,
    pub base_time_minutes: f64,
}

impl Route {
    pub fn new(
        id: impl Into<String>,
        distance_km: f64,
        traffic_level: TrafficLevel,
        base_time_minutes: f64,
    ) -> Self {
        Self {
            id: id.into(),
            distance_km,
            traffic_level,
            base_time_minutes,
        }
    }
}

/// Lifecycle state of an order. The engine does not filter on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Delivered,
}

/// A customer order bound to one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Monetary value of the order in currency units.
    pub value: f64,
    pub route_id: String,
    #[serde(default)]
    pub delivery_timestamp: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    pub fn new(id: impl Into<String>, value: f64, route_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value,
            route_id: route_id.into(),
            delivery_timestamp: None,
            status: OrderStatus::Pending,
        }
    }

    pub fn with_delivery_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.delivery_timestamp = Some(timestamp);
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatigue_uses_most_recent_day_only() {
        assert!(!is_fatigued(&[]));
        assert!(!is_fatigued(&[7.0]));
        assert!(!is_fatigued(&[8.0]));
        assert!(is_fatigued(&[8.5]));
        assert!(is_fatigued(&[6.0, 7.0, 9.0]));
        assert!(!is_fatigued(&[9.0, 10.0, 6.0]));
    }

    #[test]
    fn driver_flag_matches_pure_function() {
        let rested = Driver::new("D1", "Rested", vec![9.0, 7.0]);
        let tired = Driver::new("D2", "Tired", vec![7.0, 9.0]);
        assert!(!rested.was_fatigued_yesterday());
        assert!(tired.was_fatigued_yesterday());
    }

    #[test]
    fn driver_defaults_to_active_when_deserialized() {
        let driver: Driver =
            serde_json::from_str(r#"{"id":"D1","name":"Amit Kumar","past_hours":[6,7,9]}"#)
                .expect("driver json");
        assert!(driver.is_active);
        assert_eq!(driver.current_shift_hours, 0.0);
        assert!(driver.was_fatigued_yesterday());
    }

    #[test]
    fn order_defaults_to_pending() {
        let order: Order = serde_json::from_str(r#"{"id":"O1","value":950,"route_id":"R003"}"#)
            .expect("order json");
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.delivery_timestamp.is_none());
    }
}
