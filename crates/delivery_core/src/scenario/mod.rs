//! Scenario setup: run parameters, the input snapshot handed to the engine,
//! and seeded generation of synthetic fleets and order books.

mod build;
mod params;

pub use build::{generate_scenario, Scenario, ScenarioConfig, ScenarioConfigError};
pub use params::RunParameters;
