use delivery_core::rules::SimulationRules;
use delivery_core::scenario::RunParameters;

use super::combinations::ParameterCombination;
use super::ParameterSet;

pub(super) fn apply_combination(
    base_params: &RunParameters,
    base_rules: &SimulationRules,
    combo: &ParameterCombination,
) -> (RunParameters, SimulationRules) {
    let params = base_params
        .clone()
        .with_number_of_drivers(combo.num_drivers)
        .with_max_hours_per_driver(combo.max_hours_per_driver);

    let rules = base_rules
        .with_fatigue_time_multiplier(combo.fatigue_time_multiplier)
        .with_late_penalty(combo.late_penalty)
        .with_fuel_costs(combo.base_fuel_per_km, base_rules.high_traffic_surcharge_per_km)
        .with_high_value_bonus(base_rules.high_value_threshold, combo.high_value_bonus_rate);

    (params, rules)
}

pub(super) fn combination_to_parameter_set(
    base_params: &RunParameters,
    base_rules: &SimulationRules,
    combo: ParameterCombination,
    experiment_id: String,
) -> ParameterSet {
    let (params, rules) = apply_combination(base_params, base_rules, &combo);
    ParameterSet::new(params, rules, experiment_id, 0)
}
