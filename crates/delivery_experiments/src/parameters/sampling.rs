use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::combinations::{ParameterCombination, ParameterVariations};
use super::constraints::is_valid_combination;
use super::{conversion, ParameterSet, ParameterSpace};

const MAX_ATTEMPTS: usize = 10_000;

fn pick<T: Copy>(rng: &mut StdRng, values: &[T]) -> Option<T> {
    values.choose(rng).copied()
}

impl ParameterSpace {
    /// Generate random parameter sets (Monte Carlo sampling).
    ///
    /// Samples up to `count` distinct valid combinations from the space.
    /// Stops early when the space runs out of distinct combinations.
    pub fn sample_random(&self, count: usize, seed: u64) -> Vec<ParameterSet> {
        let variations = ParameterVariations::from_space(self);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut parameter_sets = Vec::new();
        let mut seen = HashSet::new();
        let mut attempts = 0;

        while parameter_sets.len() < count && attempts < MAX_ATTEMPTS {
            attempts += 1;
            let Some(combo) = sample_combination(&mut rng, &variations) else {
                break;
            };
            if !is_valid_combination(&combo) {
                continue;
            }
            // Floats are not Hash; the debug form identifies a combination.
            if !seen.insert(format!("{combo:?}")) {
                continue;
            }

            let experiment_id = format!("random_{}", parameter_sets.len());
            parameter_sets.push(conversion::combination_to_parameter_set(
                &self.base_params,
                &self.base_rules,
                combo,
                experiment_id,
            ));
        }

        parameter_sets
    }
}

fn sample_combination(rng: &mut StdRng, variations: &ParameterVariations) -> Option<ParameterCombination> {
    Some(ParameterCombination {
        num_drivers: pick(rng, &variations.num_drivers)?,
        max_hours_per_driver: pick(rng, &variations.max_hours_per_driver)?,
        fatigue_time_multiplier: pick(rng, &variations.fatigue_time_multipliers)?,
        late_penalty: pick(rng, &variations.late_penalties)?,
        base_fuel_per_km: pick(rng, &variations.base_fuel_per_km)?,
        high_value_bonus_rate: pick(rng, &variations.high_value_bonus_rates)?,
    })
}
