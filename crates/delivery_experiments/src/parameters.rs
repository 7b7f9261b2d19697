//! Parameter variation framework for exploring run parameters and rule values.
//!
//! A [`ParameterSpace`] lists candidate values per dimension; unspecified
//! dimensions fall back to the base [`RunParameters`] and [`SimulationRules`].
//! Supports grid search (Cartesian product) and random sampling.

use delivery_core::rules::SimulationRules;
use delivery_core::scenario::RunParameters;
use serde::Serialize;

mod combinations;
mod constraints;
mod conversion;
mod sampling;


/// A single parameter configuration for one engine run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSet {
    /// Run parameters handed to the engine.
    pub params: RunParameters,
    /// Rule values handed to the engine.
    pub rules: SimulationRules,
    /// Unique experiment ID for this parameter configuration.
    pub experiment_id: String,
    /// Run ID within the experiment.
    pub run_id: usize,
}

impl ParameterSet {
    pub fn new(
        params: RunParameters,
        rules: SimulationRules,
        experiment_id: String,
        run_id: usize,
    ) -> Self {
        Self {
            params,
            rules,
            experiment_id,
            run_id,
        }
    }
}

/// Defines a parameter space for exploration.
#[derive(Debug, Clone, Default)]
pub struct ParameterSpace {
    /// Base parameters (used for unspecified dimensions).
    base_params: RunParameters,
    base_rules: SimulationRules,
    num_drivers: Vec<usize>,
    max_hours_per_driver: Vec<f64>,
    fatigue_time_multipliers: Vec<f64>,
    late_penalties: Vec<f64>,
    base_fuel_per_km: Vec<f64>,
    high_value_bonus_rates: Vec<f64>,
}

impl ParameterSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new parameter space for grid search.
    pub fn grid() -> Self {
        Self::new()
    }

    /// Driver counts to explore.
    pub fn num_drivers(mut self, counts: Vec<usize>) -> Self {
        self.num_drivers = counts;
        self
    }

    /// Max hours per driver to explore.
    pub fn max_hours_per_driver(mut self, hours: Vec<f64>) -> Self {
        self.max_hours_per_driver = hours;
        self
    }

    /// Fatigue time multipliers to explore.
    pub fn fatigue_time_multiplier(mut self, multipliers: Vec<f64>) -> Self {
        self.fatigue_time_multipliers = multipliers;
        self
    }

    /// Late penalties to explore.
    pub fn late_penalty(mut self, penalties: Vec<f64>) -> Self {
        self.late_penalties = penalties;
        self
    }

    /// Base fuel costs per km to explore.
    pub fn base_fuel_per_km(mut self, costs: Vec<f64>) -> Self {
        self.base_fuel_per_km = costs;
        self
    }

    /// High-value bonus rates to explore.
    pub fn high_value_bonus_rate(mut self, rates: Vec<f64>) -> Self {
        self.high_value_bonus_rates = rates;
        self
    }

    pub fn with_base_params(mut self, params: RunParameters) -> Self {
        self.base_params = params;
        self
    }

    pub fn with_base_rules(mut self, rules: SimulationRules) -> Self {
        self.base_rules = rules;
        self
    }

    /// Generate all parameter sets using grid search (Cartesian product).
    ///
    /// Combinations that fail parameter or rule validation are skipped;
    /// experiment ids stay contiguous over the kept sets.
    pub fn generate(&self) -> Vec<ParameterSet> {
        combinations::ParameterVariations::from_space(self)
            .generate_combinations()
            .filter(constraints::is_valid_combination)
            .enumerate()
            .map(|(experiment_id, combo)| {
                conversion::combination_to_parameter_set(
                    &self.base_params,
                    &self.base_rules,
                    combo,
                    format!("exp_{experiment_id}"),
                )
            })
            .collect()
    }

    /// Number of grid points before validation.
    pub fn grid_size(&self) -> usize {
        combinations::ParameterVariations::from_space(self).len()
    }
}
