//! Metrics extraction from simulation runs.
//!
//! Flattens one engine run into a row of sweep metrics: the KPIs, fuel
//! totals per traffic level, and driver workload statistics.

use delivery_core::runner::SimulationRun;
use serde::Serialize;

use crate::parameters::ParameterSet;

/// Aggregated metrics from a single experiment run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentResult {
    pub experiment_id: String,
    pub run_id: usize,
    /// Drivers requested for the run.
    pub number_of_drivers: usize,
    /// Drivers actually in the pool after filtering and capping.
    pub drivers_used: usize,
    pub max_hours_per_driver: f64,
    /// Rounded total profit.
    pub total_profit: i64,
    /// On-time percentage, two decimals.
    pub efficiency: f64,
    pub on_time_deliveries: usize,
    pub total_deliveries: usize,
    /// Orders whose route did not resolve.
    pub unresolved_orders: usize,
    pub fuel_cost_total: f64,
    pub fuel_cost_low: f64,
    pub fuel_cost_medium: f64,
    pub fuel_cost_high: f64,
    /// Average assigned minutes per pooled driver.
    pub avg_driver_minutes: f64,
    pub median_driver_minutes: f64,
    pub p90_driver_minutes: f64,
    /// Drivers whose assigned minutes exceed the max hours per driver.
    pub drivers_over_max_hours: usize,
}

impl ExperimentResult {
    /// Average, median and 90th percentile of `values`; zeros when empty.
    pub(crate) fn calculate_stats(values: &[u64]) -> (f64, f64, f64) {
        if values.is_empty() {
            return (0.0, 0.0, 0.0);
        }

        let mut sorted = values.to_vec();
        sorted.sort_unstable();

        let avg = sorted.iter().sum::<u64>() as f64 / sorted.len() as f64;
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
        } else {
            sorted[mid] as f64
        };
        // floor(0.9 * (n - 1)) index
        let p90_idx = ((sorted.len() - 1) as f64 * 0.9) as usize;
        let p90 = sorted[p90_idx.min(sorted.len() - 1)] as f64;

        (avg, median, p90)
    }
}

/// Extract sweep metrics from a finished run.
pub fn extract_metrics(param_set: &ParameterSet, run: &SimulationRun) -> ExperimentResult {
    let kpis = &run.result.kpis;
    let fuel = kpis.fuel_cost_breakdown;

    let minutes: Vec<u64> = run.workloads.iter().map(|w| w.assigned_minutes).collect();
    let (avg_driver_minutes, median_driver_minutes, p90_driver_minutes) =
        ExperimentResult::calculate_stats(&minutes);

    ExperimentResult {
        experiment_id: param_set.experiment_id.clone(),
        run_id: param_set.run_id,
        number_of_drivers: param_set.params.number_of_drivers,
        drivers_used: run.workloads.len(),
        max_hours_per_driver: param_set.params.max_hours_per_driver,
        total_profit: kpis.total_profit,
        efficiency: kpis.efficiency,
        on_time_deliveries: kpis.on_time_deliveries,
        total_deliveries: kpis.total_deliveries,
        unresolved_orders: run.result.unresolved_count(),
        fuel_cost_total: fuel.total(),
        fuel_cost_low: fuel.low,
        fuel_cost_medium: fuel.medium,
        fuel_cost_high: fuel.high,
        avg_driver_minutes,
        median_driver_minutes,
        p90_driver_minutes,
        drivers_over_max_hours: run.workloads.iter().filter(|w| w.exceeds_max_hours).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delivery_core::rules::SimulationRules;
    use delivery_core::runner::simulate_detailed;
    use delivery_core::scenario::RunParameters;
    use delivery_core::test_helpers::sample_scenario;

    #[test]
    fn test_calculate_stats() {
        let values = vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100];
        let (avg, median, p90) = ExperimentResult::calculate_stats(&values);
        assert_eq!(avg, 55.0);
        assert_eq!(median, 55.0);
        // floor(0.9 * 9) = 8 → 90
        assert_eq!(p90, 90.0);
    }

    #[test]
    fn test_calculate_stats_empty() {
        let (avg, median, p90) = ExperimentResult::calculate_stats(&[]);
        assert_eq!(avg, 0.0);
        assert_eq!(median, 0.0);
        assert_eq!(p90, 0.0);
    }

    #[test]
    fn test_extract_metrics_from_sample_run() {
        let scenario = sample_scenario();
        let params = RunParameters::default().with_number_of_drivers(5);
        let rules = SimulationRules::default();
        let run = simulate_detailed(
            &scenario.drivers,
            &scenario.routes,
            &scenario.orders,
            &params,
            &rules,
        )
        .unwrap();
        let set = ParameterSet::new(params, rules, "exp_0".to_string(), 0);

        let metrics = extract_metrics(&set, &run);
        assert_eq!(metrics.drivers_used, 5);
        assert_eq!(metrics.total_deliveries, 7);
        assert_eq!(metrics.total_profit, 6940);
        assert_eq!(metrics.unresolved_orders, 0);
        assert_eq!(metrics.fuel_cost_total, 540.0);
        assert_eq!(metrics.drivers_over_max_hours, 0);
        // Loads: 91, 50, 60, 75, 65 minutes.
        assert_eq!(metrics.avg_driver_minutes, 68.2);
        assert_eq!(metrics.median_driver_minutes, 65.0);
        assert_eq!(metrics.p90_driver_minutes, 75.0);
    }
}
