use delivery_core::telemetry::{OrderOutcome, SimulationResult};

use crate::metrics::ExperimentResult;
use crate::parameters::ParameterSet;

pub(crate) fn export_to_csv_impl(
    results: &[ExperimentResult],
    parameter_sets: &[ParameterSet],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    if results.len() != parameter_sets.len() {
        return Err(format!(
            "Results length ({}) doesn't match parameter_sets length ({})",
            results.len(),
            parameter_sets.len()
        )
        .into());
    }

    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "experiment_id",
        "run_id",
        "number_of_drivers",
        "route_start_time",
        "max_hours_per_driver",
        "fatigue_threshold_hours",
        "fatigue_time_multiplier",
        "late_tolerance_minutes",
        "late_penalty",
        "high_value_threshold",
        "high_value_bonus_rate",
        "base_fuel_per_km",
        "high_traffic_surcharge_per_km",
        "drivers_used",
        "total_profit",
        "efficiency",
        "on_time_deliveries",
        "total_deliveries",
        "unresolved_orders",
        "fuel_cost_total",
        "fuel_cost_low",
        "fuel_cost_medium",
        "fuel_cost_high",
        "avg_driver_minutes",
        "median_driver_minutes",
        "p90_driver_minutes",
        "drivers_over_max_hours",
    ])?;

    for (result, param_set) in results.iter().zip(parameter_sets) {
        let params = &param_set.params;
        let rules = &param_set.rules;
        wtr.write_record([
            param_set.experiment_id.clone(),
            param_set.run_id.to_string(),
            params.number_of_drivers.to_string(),
            params.route_start_time.clone(),
            params.max_hours_per_driver.to_string(),
            rules.fatigue_threshold_hours.to_string(),
            rules.fatigue_time_multiplier.to_string(),
            rules.late_tolerance_minutes.to_string(),
            rules.late_penalty.to_string(),
            rules.high_value_threshold.to_string(),
            rules.high_value_bonus_rate.to_string(),
            rules.base_fuel_per_km.to_string(),
            rules.high_traffic_surcharge_per_km.to_string(),
            result.drivers_used.to_string(),
            result.total_profit.to_string(),
            result.efficiency.to_string(),
            result.on_time_deliveries.to_string(),
            result.total_deliveries.to_string(),
            result.unresolved_orders.to_string(),
            result.fuel_cost_total.to_string(),
            result.fuel_cost_low.to_string(),
            result.fuel_cost_medium.to_string(),
            result.fuel_cost_high.to_string(),
            result.avg_driver_minutes.to_string(),
            result.median_driver_minutes.to_string(),
            result.p90_driver_minutes.to_string(),
            result.drivers_over_max_hours.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// One row per order in processing order. Unresolved orders carry the
/// error text and leave the delivery columns empty.
pub(crate) fn export_deliveries_impl(
    result: &SimulationResult,
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "order_id",
        "route_id",
        "assigned_driver",
        "order_value",
        "time_to_deliver_minutes",
        "on_time",
        "penalty",
        "bonus",
        "fuel_cost",
        "profit",
        "error",
    ])?;

    for outcome in &result.per_order {
        match outcome {
            OrderOutcome::Delivered(record) => wtr.write_record([
                record.order_id.clone(),
                record.route_id.clone(),
                record.assigned_driver.clone(),
                record.order_value.to_string(),
                record.time_to_deliver_minutes.to_string(),
                record.on_time.to_string(),
                record.penalty.to_string(),
                record.bonus.to_string(),
                record.fuel_cost.to_string(),
                record.profit.to_string(),
                String::new(),
            ])?,
            OrderOutcome::RouteMissing { order_id, error } => {
                let mut row = vec![String::new(); 11];
                row[0] = order_id.clone();
                row[10] = error.clone();
                wtr.write_record(&row)?
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
