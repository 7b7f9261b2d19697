use delivery_core::model::{Driver, Order, Route};
use delivery_core::scenario::{RunParameters, Scenario};
use delivery_core::test_helpers::{rested_drivers, sample_scenario};
use delivery_core::traffic::TrafficLevel;

/// Builder for small hand-written fleets and order books.
#[derive(Debug, Default)]
pub struct TestFleetBuilder {
    drivers: Vec<Driver>,
    routes: Vec<Route>,
    orders: Vec<Order>,
}

impl TestFleetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rested_drivers(mut self, count: usize) -> Self {
        self.drivers.extend(rested_drivers(count));
        self
    }

    pub fn with_driver(mut self, name: &str, past_hours: &[f64]) -> Self {
        let id = format!("D{:03}", self.drivers.len() + 1);
        self.drivers.push(Driver::new(id, name, past_hours.to_vec()));
        self
    }

    pub fn with_route(
        mut self,
        id: &str,
        distance_km: f64,
        traffic: TrafficLevel,
        base_minutes: f64,
    ) -> Self {
        self.routes
            .push(Route::new(id, distance_km, traffic, base_minutes));
        self
    }

    pub fn with_order(mut self, id: &str, value: f64, route_id: &str) -> Self {
        self.orders.push(Order::new(id, value, route_id));
        self
    }

    pub fn with_equal_orders(mut self, count: usize, value: f64, route_id: &str) -> Self {
        let start = self.orders.len();
        self.orders.extend(
            (start + 1..=start + count).map(|i| Order::new(format!("O{i:03}"), value, route_id)),
        );
        self
    }

    /// Parameters that put every configured driver in the pool.
    pub fn params(&self) -> RunParameters {
        RunParameters::default().with_number_of_drivers(self.drivers.len().max(1))
    }

    pub fn build(self) -> Scenario {
        Scenario::new(self.drivers, self.routes, self.orders)
    }
}

/// The sample data set together with parameters covering all five drivers.
pub fn sample_with_full_pool() -> (Scenario, RunParameters) {
    let scenario = sample_scenario();
    let params = RunParameters::default().with_number_of_drivers(scenario.drivers.len());
    (scenario, params)
}
