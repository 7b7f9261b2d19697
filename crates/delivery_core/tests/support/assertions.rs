use std::collections::HashMap;

use delivery_core::telemetry::{DeliveryRecord, SimulationResult};

/// Look up the delivery record for `order_id`, panicking if it was not delivered.
pub fn delivery<'a>(result: &'a SimulationResult, order_id: &str) -> &'a DeliveryRecord {
    result
        .deliveries()
        .find(|record| record.order_id == order_id)
        .unwrap_or_else(|| panic!("order {order_id} should have been delivered"))
}

/// Number of orders handed to each driver, keyed by driver name.
pub fn orders_per_driver(result: &SimulationResult) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for record in result.deliveries() {
        *counts.entry(record.assigned_driver.clone()).or_insert(0) += 1;
    }
    counts
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
