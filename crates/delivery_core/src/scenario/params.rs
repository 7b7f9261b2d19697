use serde::{Deserialize, Serialize};

use crate::error::EngineInputError;

/// Default requested driver count.
const DEFAULT_NUMBER_OF_DRIVERS: usize = 1;

/// Default shift start, passed through to the result untouched.
const DEFAULT_ROUTE_START_TIME: &str = "09:00";

/// Default shift length cap in hours.
const DEFAULT_MAX_HOURS_PER_DRIVER: f64 = 8.0;

/// Parameters of one simulation run, echoed back in the result.
///
/// `max_hours_per_driver` is accepted and reported on but does not cap how
/// much work a driver is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    pub number_of_drivers: usize,
    /// Opaque to the engine.
    pub route_start_time: String,
    pub max_hours_per_driver: f64,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            number_of_drivers: DEFAULT_NUMBER_OF_DRIVERS,
            route_start_time: DEFAULT_ROUTE_START_TIME.to_string(),
            max_hours_per_driver: DEFAULT_MAX_HOURS_PER_DRIVER,
        }
    }
}

impl RunParameters {
    pub fn new(
        number_of_drivers: usize,
        route_start_time: impl Into<String>,
        max_hours_per_driver: f64,
    ) -> Self {
        Self {
            number_of_drivers,
            route_start_time: route_start_time.into(),
            max_hours_per_driver,
        }
    }

    pub fn with_number_of_drivers(mut self, count: usize) -> Self {
        self.number_of_drivers = count;
        self
    }

    pub fn with_route_start_time(mut self, start_time: impl Into<String>) -> Self {
        self.route_start_time = start_time.into();
        self
    }

    pub fn with_max_hours_per_driver(mut self, hours: f64) -> Self {
        self.max_hours_per_driver = hours;
        self
    }

    /// Caller-side checks run before invoking the engine: a positive driver
    /// count, at least one hour per driver and a non-empty start time.
    pub fn validate(&self) -> Result<(), EngineInputError> {
        if self.number_of_drivers == 0 {
            return Err(EngineInputError::InvalidDriverCount);
        }
        if self.max_hours_per_driver.is_nan() || self.max_hours_per_driver < 1.0 {
            return Err(EngineInputError::InvalidMaxHours(self.max_hours_per_driver));
        }
        if self.route_start_time.trim().is_empty() {
            return Err(EngineInputError::MissingStartTime);
        }
        Ok(())
    }
}
