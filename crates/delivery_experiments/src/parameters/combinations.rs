use super::ParameterSpace;

/// Represents a single parameter combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ParameterCombination {
    pub(super) num_drivers: usize,
    pub(super) max_hours_per_driver: f64,
    pub(super) fatigue_time_multiplier: f64,
    pub(super) late_penalty: f64,
    pub(super) base_fuel_per_km: f64,
    pub(super) high_value_bonus_rate: f64,
}

/// All values per dimension, with unspecified dimensions collapsed to the base value.
pub(super) struct ParameterVariations {
    pub(super) num_drivers: Vec<usize>,
    pub(super) max_hours_per_driver: Vec<f64>,
    pub(super) fatigue_time_multipliers: Vec<f64>,
    pub(super) late_penalties: Vec<f64>,
    pub(super) base_fuel_per_km: Vec<f64>,
    pub(super) high_value_bonus_rates: Vec<f64>,
}

fn or_base<T: Clone>(values: &[T], base: T) -> Vec<T> {
    if values.is_empty() {
        vec![base]
    } else {
        values.to_vec()
    }
}

impl ParameterVariations {
    pub(super) fn from_space(space: &ParameterSpace) -> Self {
        Self {
            num_drivers: or_base(&space.num_drivers, space.base_params.number_of_drivers),
            max_hours_per_driver: or_base(
                &space.max_hours_per_driver,
                space.base_params.max_hours_per_driver,
            ),
            fatigue_time_multipliers: or_base(
                &space.fatigue_time_multipliers,
                space.base_rules.fatigue_time_multiplier,
            ),
            late_penalties: or_base(&space.late_penalties, space.base_rules.late_penalty),
            base_fuel_per_km: or_base(&space.base_fuel_per_km, space.base_rules.base_fuel_per_km),
            high_value_bonus_rates: or_base(
                &space.high_value_bonus_rates,
                space.base_rules.high_value_bonus_rate,
            ),
        }
    }

    pub(super) fn len(&self) -> usize {
        self.num_drivers.len()
            * self.max_hours_per_driver.len()
            * self.fatigue_time_multipliers.len()
            * self.late_penalties.len()
            * self.base_fuel_per_km.len()
            * self.high_value_bonus_rates.len()
    }

    /// Cartesian product in dimension order; the last dimension varies fastest.
    pub(super) fn generate_combinations(&self) -> impl Iterator<Item = ParameterCombination> + '_ {
        self.num_drivers.iter().flat_map(move |&num_drivers| {
            self.max_hours_per_driver.iter().flat_map(move |&max_hours_per_driver| {
                self.fatigue_time_multipliers.iter().flat_map(move |&fatigue_time_multiplier| {
                    self.late_penalties.iter().flat_map(move |&late_penalty| {
                        self.base_fuel_per_km.iter().flat_map(move |&base_fuel_per_km| {
                            self.high_value_bonus_rates.iter().map(move |&high_value_bonus_rate| {
                                ParameterCombination {
                                    num_drivers,
                                    max_hours_per_driver,
                                    fatigue_time_multiplier,
                                    late_penalty,
                                    base_fuel_per_km,
                                    high_value_bonus_rate,
                                }
                            })
                        })
                    })
                })
            })
        })
    }
}
