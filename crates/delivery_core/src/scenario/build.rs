use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Driver, Order, Route};
use crate::traffic::TrafficLevel;

const FIRST_NAMES: [&str; 12] = [
    "Rahul", "Priya", "Amit", "Sneha", "Vikram", "Anjali", "Karan", "Meera", "Arjun", "Kavya",
    "Rohan", "Divya",
];

const LAST_NAMES: [&str; 8] = [
    "Singh", "Patel", "Kumar", "Gupta", "Sharma", "Reddy", "Iyer", "Nair",
];

/// Days of on-duty history generated per driver.
const HISTORY_DAYS: usize = 7;

/// Input snapshot for the engine: the full driver roster, route set and
/// order book at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub drivers: Vec<Driver>,
    pub routes: Vec<Route>,
    pub orders: Vec<Order>,
}

impl Scenario {
    pub fn new(drivers: Vec<Driver>, routes: Vec<Route>, orders: Vec<Order>) -> Self {
        Self {
            drivers,
            routes,
            orders,
        }
    }

    /// Active drivers in roster order, capped at `limit`.
    ///
    /// This is the driver supply step that runs before the engine; the
    /// engine itself takes whatever list it is given.
    pub fn active_drivers(&self, limit: usize) -> Vec<Driver> {
        self.drivers
            .iter()
            .filter(|driver| driver.is_active)
            .take(limit)
            .cloned()
            .collect()
    }
}

/// A [`ScenarioConfig`] the generator cannot sample from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioConfigError {
    #[error("{field} must be a probability in [0, 1], got {value}")]
    InvalidShare { field: &'static str, value: f64 },
    #[error("{field} range must be finite, positive and ordered, got {min}..={max}")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

/// Parameters for generating a synthetic scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub num_drivers: usize,
    pub num_routes: usize,
    pub num_orders: usize,
    /// Random seed for reproducibility (optional; if None, uses entropy).
    pub seed: Option<u64>,
    /// Probability that a generated driver is inactive.
    pub inactive_share: f64,
    /// Probability that a driver's last day exceeded the fatigue threshold.
    pub fatigued_share: f64,
    /// Probability that an order references a route that does not exist.
    pub missing_route_share: f64,
    pub min_distance_km: f64,
    pub max_distance_km: f64,
    pub min_order_value: f64,
    pub max_order_value: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            num_drivers: 10,
            num_routes: 10,
            num_orders: 50,
            seed: None,
            inactive_share: 0.0,
            fatigued_share: 0.2,
            missing_route_share: 0.0,
            min_distance_km: 5.0,
            max_distance_km: 25.0,
            min_order_value: 300.0,
            max_order_value: 2500.0,
        }
    }
}

impl ScenarioConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_counts(mut self, drivers: usize, routes: usize, orders: usize) -> Self {
        self.num_drivers = drivers;
        self.num_routes = routes;
        self.num_orders = orders;
        self
    }

    pub fn with_missing_route_share(mut self, share: f64) -> Self {
        self.missing_route_share = share;
        self
    }

    pub fn with_inactive_share(mut self, share: f64) -> Self {
        self.inactive_share = share;
        self
    }

    pub fn with_fatigued_share(mut self, share: f64) -> Self {
        self.fatigued_share = share;
        self
    }

    /// Reject shares outside `[0, 1]` (NaN included) and empty or
    /// non-positive value ranges.
    pub fn validate(&self) -> Result<(), ScenarioConfigError> {
        let shares = [
            ("inactive_share", self.inactive_share),
            ("fatigued_share", self.fatigued_share),
            ("missing_route_share", self.missing_route_share),
        ];
        for (field, value) in shares {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScenarioConfigError::InvalidShare { field, value });
            }
        }

        let ranges = [
            ("distance_km", self.min_distance_km, self.max_distance_km),
            ("order_value", self.min_order_value, self.max_order_value),
        ];
        for (field, min, max) in ranges {
            if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
                return Err(ScenarioConfigError::InvalidRange { field, min, max });
            }
        }
        Ok(())
    }
}

/// Generate a random fleet, route set and order book.
///
/// Route base times follow distance (roughly 2.5–3.5 minutes per km) and
/// order values are whole currency units. With a seed the output is fully
/// reproducible.
///
/// # Errors
///
/// Fails if [`ScenarioConfig::validate`] rejects the config.
pub fn generate_scenario(config: &ScenarioConfig) -> Result<Scenario, ScenarioConfigError> {
    config.validate()?;
    let mut rng: StdRng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let drivers = (0..config.num_drivers)
        .map(|i| random_driver(&mut rng, i, config))
        .collect();

    let routes: Vec<Route> = (0..config.num_routes)
        .map(|i| random_route(&mut rng, i, config))
        .collect();

    let orders = (0..config.num_orders)
        .map(|i| {
            let route_id = if routes.is_empty() || rng.gen_bool(config.missing_route_share) {
                format!("R{:03}", config.num_routes + 1 + i)
            } else {
                routes[rng.gen_range(0..routes.len())].id.clone()
            };
            let value = rng
                .gen_range(config.min_order_value..=config.max_order_value)
                .round();
            Order::new(format!("O{:03}", i + 1), value, route_id)
        })
        .collect();

    Ok(Scenario::new(drivers, routes, orders))
}

fn random_driver(rng: &mut StdRng, index: usize, config: &ScenarioConfig) -> Driver {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Driver");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
    let name = format!("{first} {last}");
    let email = format!(
        "{}.{}{}@example.com",
        first.to_lowercase(),
        last.to_lowercase(),
        index + 1
    );

    let mut past_hours: Vec<f64> = (0..HISTORY_DAYS - 1)
        .map(|_| f64::from(rng.gen_range(4_u8..=10)))
        .collect();
    let last_day = if rng.gen_bool(config.fatigued_share) {
        rng.gen_range(9_u8..=11)
    } else {
        rng.gen_range(4_u8..=8)
    };
    past_hours.push(f64::from(last_day));

    Driver::new(format!("D{:03}", index + 1), name, past_hours)
        .with_email(email)
        .with_current_shift_hours(f64::from(rng.gen_range(0_u8..=4)))
        .with_active(!rng.gen_bool(config.inactive_share))
}

fn random_route(rng: &mut StdRng, index: usize, config: &ScenarioConfig) -> Route {
    let distance_km = rng
        .gen_range(config.min_distance_km..=config.max_distance_km)
        .round()
        .max(1.0);
    let minutes_per_km = rng.gen_range(2.5..=3.5);
    let base_time_minutes = (distance_km * minutes_per_km).round().max(1.0);
    let traffic_level = TrafficLevel::ALL[rng.gen_range(0..TrafficLevel::ALL.len())];
    Route::new(
        format!("R{:03}", index + 1),
        distance_km,
        traffic_level,
        base_time_minutes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_scenario() {
        let config = ScenarioConfig::default().with_seed(42);
        assert_eq!(generate_scenario(&config).unwrap(), generate_scenario(&config).unwrap());
    }

    #[test]
    fn generated_counts_and_ranges() {
        let config = ScenarioConfig::default().with_seed(7).with_counts(5, 8, 40);
        let scenario = generate_scenario(&config).unwrap();
        assert_eq!(scenario.drivers.len(), 5);
        assert_eq!(scenario.routes.len(), 8);
        assert_eq!(scenario.orders.len(), 40);

        for route in &scenario.routes {
            assert!(route.distance_km > 0.0);
            assert!(route.base_time_minutes > 0.0);
        }
        for order in &scenario.orders {
            assert!(order.value >= 300.0 && order.value <= 2500.0);
            assert!(scenario.routes.iter().any(|r| r.id == order.route_id));
        }
        for driver in &scenario.drivers {
            assert_eq!(driver.past_hours.len(), HISTORY_DAYS);
            assert!(driver.is_active);
        }
    }

    #[test]
    fn missing_route_share_produces_unknown_references() {
        let config = ScenarioConfig::default()
            .with_seed(3)
            .with_counts(2, 3, 20)
            .with_missing_route_share(1.0);
        let scenario = generate_scenario(&config).unwrap();
        assert!(scenario
            .orders
            .iter()
            .all(|order| !scenario.routes.iter().any(|r| r.id == order.route_id)));
    }

    #[test]
    fn nan_or_out_of_range_shares_are_rejected() {
        let err = generate_scenario(&ScenarioConfig::default().with_missing_route_share(f64::NAN))
            .unwrap_err();
        assert!(matches!(
            err,
            ScenarioConfigError::InvalidShare { field: "missing_route_share", .. }
        ));

        let err = generate_scenario(&ScenarioConfig::default().with_inactive_share(1.5)).unwrap_err();
        assert!(matches!(
            err,
            ScenarioConfigError::InvalidShare { field: "inactive_share", value } if value == 1.5
        ));
        assert!(ScenarioConfig::default().with_fatigued_share(-0.1).validate().is_err());
    }

    #[test]
    fn inverted_or_non_finite_ranges_are_rejected() {
        let config = ScenarioConfig {
            min_order_value: 900.0,
            max_order_value: 100.0,
            ..ScenarioConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ScenarioConfigError::InvalidRange {
                field: "order_value",
                min: 900.0,
                max: 100.0,
            })
        );

        let config = ScenarioConfig {
            max_distance_km: f64::INFINITY,
            ..ScenarioConfig::default()
        };
        assert!(generate_scenario(&config).is_err());
        assert_eq!(ScenarioConfig::default().validate(), Ok(()));
    }

    #[test]
    fn active_drivers_filters_and_caps_in_roster_order() {
        let scenario = Scenario::new(
            vec![
                Driver::new("D1", "A", vec![]),
                Driver::new("D2", "B", vec![]).with_active(false),
                Driver::new("D3", "C", vec![]),
                Driver::new("D4", "D", vec![]),
            ],
            vec![],
            vec![],
        );
        let picked: Vec<_> = scenario
            .active_drivers(2)
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(picked, vec!["D1", "D3"]);
        assert!(scenario.active_drivers(0).is_empty());
    }
}
