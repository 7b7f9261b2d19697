use delivery_core::rules::SimulationRules;
use delivery_core::scenario::RunParameters;

use super::combinations::ParameterCombination;

/// Returns false for combinations the engine's callers would reject.
pub(super) fn is_valid_combination(combo: &ParameterCombination) -> bool {
    let params = RunParameters::default()
        .with_number_of_drivers(combo.num_drivers)
        .with_max_hours_per_driver(combo.max_hours_per_driver);
    let rules = SimulationRules::default()
        .with_fatigue_time_multiplier(combo.fatigue_time_multiplier)
        .with_late_penalty(combo.late_penalty)
        .with_fuel_costs(combo.base_fuel_per_km, 0.0)
        .with_high_value_bonus(0.0, combo.high_value_bonus_rate);
    params.validate().is_ok() && rules.validate().is_ok()
}
