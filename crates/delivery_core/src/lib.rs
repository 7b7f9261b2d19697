//! Delivery dispatch simulation engine.
//!
//! Assigns delivery orders to drivers with a greedy least-loaded policy and
//! derives financial and operational KPIs (profit, efficiency, fuel cost,
//! on-time rate) from the per-order outcomes.
//!
//! The engine is a pure, synchronous function over in-memory snapshots:
//!
//! ```
//! use delivery_core::model::{Driver, Order, Route};
//! use delivery_core::runner::simulate;
//! use delivery_core::scenario::RunParameters;
//! use delivery_core::traffic::TrafficLevel;
//!
//! let drivers = vec![Driver::new("D001", "Rahul Singh", vec![7.0, 6.0])];
//! let routes = vec![Route::new("R001", 10.0, TrafficLevel::Low, 30.0)];
//! let orders = vec![Order::new("O001", 800.0, "R001")];
//!
//! let result = simulate(&drivers, &routes, &orders, &RunParameters::default()).unwrap();
//! assert_eq!(result.kpis.total_profit, 750);
//! assert_eq!(result.kpis.efficiency, 100.0);
//! ```

pub mod error;
pub mod model;
pub mod pool;
pub mod pricing;
pub mod rules;
pub mod runner;
pub mod scenario;
pub mod telemetry;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod traffic;

pub use error::EngineInputError;
pub use model::{Driver, Order, OrderStatus, Route};
pub use rules::SimulationRules;
pub use runner::{simulate, simulate_detailed, simulate_with_rules};
pub use scenario::RunParameters;
pub use telemetry::{Kpis, OrderOutcome, SimulationResult};
pub use traffic::TrafficLevel;
