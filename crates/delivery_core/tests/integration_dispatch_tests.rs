mod support;

use delivery_core::rules::SimulationRules;
use delivery_core::runner::{simulate, simulate_detailed, simulate_with_rules};
use delivery_core::scenario::RunParameters;
use delivery_core::traffic::TrafficLevel;
use delivery_core::EngineInputError;
use support::assertions::{assert_close, delivery, orders_per_driver};
use support::fleet::{sample_with_full_pool, TestFleetBuilder};

#[test]
fn sample_data_set_end_to_end() {
    let (scenario, params) = sample_with_full_pool();
    let result = simulate(&scenario.drivers, &scenario.routes, &scenario.orders, &params)
        .expect("simulation");

    let processing_order: Vec<_> = result.per_order.iter().map(|o| o.order_id()).collect();
    assert_eq!(
        processing_order,
        vec!["O004", "O002", "O006", "O003", "O007", "O001", "O005"]
    );

    // First five orders fan out across the idle pool in roster order.
    assert_eq!(delivery(&result, "O004").assigned_driver, "Rahul Singh");
    assert_eq!(delivery(&result, "O002").assigned_driver, "Priya Patel");
    assert_eq!(delivery(&result, "O006").assigned_driver, "Amit Kumar");
    assert_eq!(delivery(&result, "O003").assigned_driver, "Sneha Gupta");
    assert_eq!(delivery(&result, "O007").assigned_driver, "Vikram Sharma");
    // Then the least-loaded drivers: Amit (30 min), then Rahul (35 min).
    assert_eq!(delivery(&result, "O001").assigned_driver, "Amit Kumar");
    assert_eq!(delivery(&result, "O005").assigned_driver, "Rahul Singh");

    let o004 = delivery(&result, "O004");
    assert!(o004.on_time);
    assert_close(o004.bonus, 150.0);
    assert_close(o004.profit, 1590.0);

    let o003 = delivery(&result, "O003");
    assert!(!o003.on_time);
    assert_close(o003.penalty, 50.0);
    assert_close(o003.fuel_cost, 140.0);

    // Vikram's last day was 9 hours: fatigued, so the medium route runs late.
    let o007 = delivery(&result, "O007");
    assert!(!o007.on_time);
    assert_eq!(o007.time_to_deliver_minutes, 64);

    assert_eq!(result.kpis.total_deliveries, 7);
    assert_eq!(result.kpis.on_time_deliveries, 5);
    assert_eq!(result.kpis.efficiency, 71.43);
    assert_eq!(result.kpis.total_profit, 6940);
    assert_close(result.kpis.fuel_cost_breakdown.low, 160.0);
    assert_close(result.kpis.fuel_cost_breakdown.medium, 240.0);
    assert_close(result.kpis.fuel_cost_breakdown.high, 140.0);
}

#[test]
fn equal_orders_are_spread_evenly_across_rested_drivers() {
    let fleet = TestFleetBuilder::new()
        .with_rested_drivers(4)
        .with_route("R001", 10.0, TrafficLevel::Low, 30.0)
        .with_equal_orders(8, 500.0, "R001");
    let params = fleet.params();
    let scenario = fleet.build();

    let result = simulate(&scenario.drivers, &scenario.routes, &scenario.orders, &params)
        .expect("simulation");

    let counts = orders_per_driver(&result);
    assert_eq!(counts.len(), 4);
    assert!(counts.values().all(|&count| count == 2));

    let assigned: Vec<_> = result
        .deliveries()
        .map(|record| record.assigned_driver.as_str())
        .collect();
    assert_eq!(
        assigned,
        vec![
            "Driver 1", "Driver 2", "Driver 3", "Driver 4", "Driver 1", "Driver 2", "Driver 3",
            "Driver 4"
        ]
    );
}

#[test]
fn pool_is_capped_at_requested_driver_count() {
    let fleet = TestFleetBuilder::new()
        .with_rested_drivers(5)
        .with_route("R001", 10.0, TrafficLevel::Low, 30.0)
        .with_equal_orders(6, 500.0, "R001");
    let scenario = fleet.build();
    let params = RunParameters::default().with_number_of_drivers(2);

    let result = simulate(&scenario.drivers, &scenario.routes, &scenario.orders, &params)
        .expect("simulation");

    let counts = orders_per_driver(&result);
    assert_eq!(counts.len(), 2);
    assert_eq!(counts["Driver 1"], 3);
    assert_eq!(counts["Driver 2"], 3);
}

#[test]
fn fatigued_driver_takes_thirty_percent_longer() {
    let fleet = TestFleetBuilder::new()
        .with_driver("Tired", &[8.0, 9.5])
        .with_route("R001", 10.0, TrafficLevel::Low, 40.0)
        .with_order("O001", 600.0, "R001");
    let params = fleet.params();
    let scenario = fleet.build();

    let result = simulate(&scenario.drivers, &scenario.routes, &scenario.orders, &params)
        .expect("simulation");

    let record = delivery(&result, "O001");
    assert_eq!(record.time_to_deliver_minutes, 52);
    assert!(!record.on_time);
    assert_close(record.penalty, 50.0);
    assert_close(record.profit, 600.0 - 50.0 - 50.0);
}

#[test]
fn exactly_eight_hours_is_not_fatigue() {
    let fleet = TestFleetBuilder::new()
        .with_driver("Steady", &[10.0, 8.0])
        .with_route("R001", 10.0, TrafficLevel::Low, 40.0)
        .with_order("O001", 600.0, "R001");
    let params = fleet.params();
    let scenario = fleet.build();

    let result = simulate(&scenario.drivers, &scenario.routes, &scenario.orders, &params)
        .expect("simulation");
    assert_eq!(delivery(&result, "O001").time_to_deliver_minutes, 40);
    assert!(delivery(&result, "O001").on_time);
}

#[test]
fn high_traffic_adds_fuel_surcharge() {
    let fleet = TestFleetBuilder::new()
        .with_rested_drivers(2)
        .with_route("LOW", 10.0, TrafficLevel::Low, 20.0)
        .with_route("HIGH", 10.0, TrafficLevel::High, 20.0)
        .with_order("O001", 700.0, "LOW")
        .with_order("O002", 600.0, "HIGH");
    let params = fleet.params();
    let scenario = fleet.build();

    let result = simulate(&scenario.drivers, &scenario.routes, &scenario.orders, &params)
        .expect("simulation");

    assert_close(delivery(&result, "O001").fuel_cost, 50.0);
    assert_close(delivery(&result, "O002").fuel_cost, 70.0);
    assert_close(result.kpis.fuel_cost_breakdown.low, 50.0);
    assert_close(result.kpis.fuel_cost_breakdown.high, 70.0);
    assert_close(result.kpis.fuel_cost_breakdown.total(), 120.0);
}

#[test]
fn unknown_routes_are_reported_and_lower_efficiency() {
    let fleet = TestFleetBuilder::new()
        .with_rested_drivers(1)
        .with_route("R001", 10.0, TrafficLevel::Low, 30.0)
        .with_order("O001", 900.0, "R001")
        .with_order("O002", 800.0, "R999");
    let params = fleet.params();
    let scenario = fleet.build();

    let result = simulate(&scenario.drivers, &scenario.routes, &scenario.orders, &params)
        .expect("simulation");

    assert_eq!(result.unresolved_count(), 1);
    assert_eq!(result.kpis.total_deliveries, 2);
    assert_eq!(result.kpis.efficiency, 50.0);
    assert_eq!(result.kpis.total_profit, 850);

    let json = serde_json::to_value(&result.per_order[1]).expect("json");
    assert_eq!(json["order_id"], "O002");
    assert_eq!(json["error"], "route missing");
}

#[test]
fn repeated_runs_are_identical() {
    let (scenario, params) = sample_with_full_pool();
    let first = simulate(&scenario.drivers, &scenario.routes, &scenario.orders, &params)
        .expect("simulation");
    let second = simulate(&scenario.drivers, &scenario.routes, &scenario.orders, &params)
        .expect("simulation");
    assert_eq!(first, second);
}

#[test]
fn custom_rules_change_the_economics() {
    let (scenario, params) = sample_with_full_pool();
    let rules = SimulationRules::default()
        .with_late_penalty(0.0)
        .with_fuel_costs(0.0, 0.0);

    let result = simulate_with_rules(
        &scenario.drivers,
        &scenario.routes,
        &scenario.orders,
        &params,
        &rules,
    )
    .expect("simulation");

    // No penalty means nothing is late, and no fuel means no fuel cost.
    assert_eq!(result.kpis.on_time_deliveries, 7);
    assert_eq!(result.kpis.efficiency, 100.0);
    assert_close(result.kpis.fuel_cost_breakdown.total(), 0.0);
}

#[test]
fn workloads_flag_drivers_over_max_hours() {
    let fleet = TestFleetBuilder::new()
        .with_rested_drivers(1)
        .with_route("R001", 10.0, TrafficLevel::Low, 45.0)
        .with_equal_orders(3, 500.0, "R001");
    let scenario = fleet.build();
    let params = RunParameters::default().with_max_hours_per_driver(2.0);

    let run = simulate_detailed(
        &scenario.drivers,
        &scenario.routes,
        &scenario.orders,
        &params,
        &SimulationRules::default(),
    )
    .expect("simulation");

    // 135 minutes against a two hour cap; assignment is not blocked.
    assert_eq!(run.workloads[0].assigned_minutes, 135);
    assert!(run.workloads[0].exceeds_max_hours);
    assert_eq!(run.result.kpis.total_deliveries, 3);
}

#[test]
fn zero_drivers_requested_is_an_error() {
    let (scenario, _) = sample_with_full_pool();
    let params = RunParameters::default().with_number_of_drivers(0);
    let err = simulate(&scenario.drivers, &scenario.routes, &scenario.orders, &params)
        .unwrap_err();
    assert_eq!(err, EngineInputError::EmptyDriverPool { requested: 0 });
}

#[test]
fn padded_traffic_label_is_priced_as_low() {
    let route: delivery_core::Route = serde_json::from_str(
        r#"{"id":"R001","distance_km":10.0,"traffic_level":" High ","base_time_minutes":60.0}"#,
    )
    .expect("route json");
    assert_eq!(route.traffic_level, TrafficLevel::Low);

    let scenario = TestFleetBuilder::new()
        .with_rested_drivers(1)
        .with_order("O001", 800.0, "R001")
        .build();
    let result = simulate(&scenario.drivers, &[route], &scenario.orders, &RunParameters::default())
        .expect("simulation");

    let record = delivery(&result, "O001");
    assert_eq!(record.time_to_deliver_minutes, 60);
    assert!(record.on_time);
    assert_eq!(record.penalty, 0.0);
    assert_eq!(record.fuel_cost, 50.0);
    assert_eq!(record.profit, 750.0);
}
