//! Test helpers for common test setup and utilities.
//!
//! Shared record builders so unit tests, integration tests and benchmarks
//! describe fleets and order books the same way.

use crate::model::{Driver, Order, Route};
use crate::scenario::Scenario;
use crate::traffic::TrafficLevel;

/// Hours that keep a driver below the fatigue threshold.
pub const RESTED_HOURS: f64 = 7.0;

/// Hours that make a driver fatigued.
pub const FATIGUED_HOURS: f64 = 9.0;

/// A driver whose last day was short enough not to be fatigued.
pub fn rested_driver(name: &str) -> Driver {
    Driver::new(driver_id(name), name, vec![RESTED_HOURS])
}

/// A driver whose last day exceeded the fatigue threshold.
pub fn fatigued_driver(name: &str) -> Driver {
    Driver::new(driver_id(name), name, vec![RESTED_HOURS, FATIGUED_HOURS])
}

/// `count` rested drivers named `Driver 1`, `Driver 2`, ...
pub fn rested_drivers(count: usize) -> Vec<Driver> {
    (1..=count)
        .map(|i| rested_driver(&format!("Driver {i}")))
        .collect()
}

/// Route `R001`: 10 km, low traffic, 30 minutes.
pub fn standard_route() -> Route {
    Route::new("R001", 10.0, TrafficLevel::Low, 30.0)
}

pub fn route(id: &str, distance_km: f64, traffic: TrafficLevel, base_minutes: f64) -> Route {
    Route::new(id, distance_km, traffic, base_minutes)
}

pub fn order(id: &str, value: f64, route_id: &str) -> Order {
    Order::new(id, value, route_id)
}

/// `count` orders of equal value on the same route.
pub fn equal_orders(count: usize, value: f64, route_id: &str) -> Vec<Order> {
    (1..=count)
        .map(|i| Order::new(format!("O{i:03}"), value, route_id))
        .collect()
}

/// The five-route, seven-order sample data set with five drivers.
pub fn sample_scenario() -> Scenario {
    let drivers = vec![
        Driver::new("D001", "Rahul Singh", vec![7.0, 8.0, 6.0, 7.0, 8.0, 6.0]),
        Driver::new("D002", "Priya Patel", vec![8.0, 7.0, 9.0, 8.0, 7.0, 6.0]),
        Driver::new("D003", "Amit Kumar", vec![6.0, 7.0, 9.0, 8.0, 6.0, 7.0]),
        Driver::new("D004", "Sneha Gupta", vec![5.0, 6.0, 7.0, 6.0, 5.0, 4.0]),
        Driver::new("D005", "Vikram Sharma", vec![8.0, 9.0, 8.0, 7.0, 8.0, 9.0]),
    ];
    let routes = vec![
        Route::new("R001", 10.0, TrafficLevel::Low, 30.0),
        Route::new("R002", 15.0, TrafficLevel::Medium, 45.0),
        Route::new("R003", 20.0, TrafficLevel::High, 60.0),
        Route::new("R004", 12.0, TrafficLevel::Low, 35.0),
        Route::new("R005", 18.0, TrafficLevel::Medium, 50.0),
    ];
    let orders = vec![
        Order::new("O001", 800.0, "R001"),
        Order::new("O002", 1200.0, "R002"),
        Order::new("O003", 950.0, "R003"),
        Order::new("O004", 1500.0, "R004"),
        Order::new("O005", 750.0, "R005"),
        Order::new("O006", 1100.0, "R001"),
        Order::new("O007", 900.0, "R002"),
    ];
    Scenario::new(drivers, routes, orders)
}

fn driver_id(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
