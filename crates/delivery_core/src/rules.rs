//! Business rules applied to every delivery: fatigue slowdown, lateness
//! penalty, high-value bonus and fuel pricing.
//!
//! The defaults are the production rule set. Every field can be overridden
//! from a JSON file; missing fields keep their default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::FATIGUE_THRESHOLD_HOURS;

/// Multiplier applied to delivery time when the driver was fatigued yesterday.
pub const FATIGUE_TIME_MULTIPLIER: f64 = 1.3;

/// Minutes a delivery may run over its base time before it counts as late.
pub const LATE_TOLERANCE_MINUTES: f64 = 10.0;

/// Flat penalty for a late delivery, in currency units.
pub const LATE_PENALTY: f64 = 50.0;

/// Orders strictly above this value earn the on-time bonus.
pub const HIGH_VALUE_THRESHOLD: f64 = 1000.0;

/// Share of the order value paid as the high-value on-time bonus.
pub const HIGH_VALUE_BONUS_RATE: f64 = 0.10;

/// Fuel cost per kilometer on any route.
pub const BASE_FUEL_PER_KM: f64 = 5.0;

/// Additional fuel cost per kilometer on `High` traffic routes.
pub const HIGH_TRAFFIC_SURCHARGE_PER_KM: f64 = 2.0;

/// Errors while loading or checking a rule set.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse rules file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rule `{field}` must be a finite, non-negative number, got {value}")]
    InvalidValue { field: &'static str, value: f64 },
}

/// Rule set for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationRules {
    /// Last-day on-duty hours above which a driver is fatigued.
    pub fatigue_threshold_hours: f64,
    /// Delivery time multiplier for fatigued drivers.
    pub fatigue_time_multiplier: f64,
    /// Allowed overrun (minutes) over the route base time.
    pub late_tolerance_minutes: f64,
    /// Flat penalty for late deliveries.
    pub late_penalty: f64,
    /// Order value above which on-time deliveries earn a bonus.
    pub high_value_threshold: f64,
    /// Bonus as a fraction of order value.
    pub high_value_bonus_rate: f64,
    /// Fuel cost per kilometer.
    pub base_fuel_per_km: f64,
    /// Extra fuel cost per kilometer in heavy traffic.
    pub high_traffic_surcharge_per_km: f64,
}

impl Default for SimulationRules {
    fn default() -> Self {
        Self {
            fatigue_threshold_hours: FATIGUE_THRESHOLD_HOURS,
            fatigue_time_multiplier: FATIGUE_TIME_MULTIPLIER,
            late_tolerance_minutes: LATE_TOLERANCE_MINUTES,
            late_penalty: LATE_PENALTY,
            high_value_threshold: HIGH_VALUE_THRESHOLD,
            high_value_bonus_rate: HIGH_VALUE_BONUS_RATE,
            base_fuel_per_km: BASE_FUEL_PER_KM,
            high_traffic_surcharge_per_km: HIGH_TRAFFIC_SURCHARGE_PER_KM,
        }
    }
}

impl SimulationRules {
    /// Load a rule set from a JSON file. Fields absent from the file keep
    /// their defaults. The loaded set is validated.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self, RulesError> {
        let rules: Self = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reject negative or non-finite rule values.
    pub fn validate(&self) -> Result<(), RulesError> {
        let fields = [
            ("fatigue_threshold_hours", self.fatigue_threshold_hours),
            ("fatigue_time_multiplier", self.fatigue_time_multiplier),
            ("late_tolerance_minutes", self.late_tolerance_minutes),
            ("late_penalty", self.late_penalty),
            ("high_value_threshold", self.high_value_threshold),
            ("high_value_bonus_rate", self.high_value_bonus_rate),
            ("base_fuel_per_km", self.base_fuel_per_km),
            ("high_traffic_surcharge_per_km", self.high_traffic_surcharge_per_km),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(RulesError::InvalidValue { field, value });
            }
        }
        Ok(())
    }

    pub fn with_fatigue_time_multiplier(mut self, multiplier: f64) -> Self {
        self.fatigue_time_multiplier = multiplier;
        self
    }

    pub fn with_late_tolerance_minutes(mut self, minutes: f64) -> Self {
        self.late_tolerance_minutes = minutes;
        self
    }

    pub fn with_late_penalty(mut self, penalty: f64) -> Self {
        self.late_penalty = penalty;
        self
    }

    pub fn with_high_value_bonus(mut self, threshold: f64, rate: f64) -> Self {
        self.high_value_threshold = threshold;
        self.high_value_bonus_rate = rate;
        self
    }

    /// Set base fuel cost and heavy-traffic surcharge, both per kilometer.
    pub fn with_fuel_costs(mut self, base_per_km: f64, high_traffic_surcharge_per_km: f64) -> Self {
        self.base_fuel_per_km = base_per_km;
        self.high_traffic_surcharge_per_km = high_traffic_surcharge_per_km;
        self
    }
}
