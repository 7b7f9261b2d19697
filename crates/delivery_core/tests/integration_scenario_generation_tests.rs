use delivery_core::runner::simulate;
use delivery_core::scenario::{generate_scenario, RunParameters, ScenarioConfig};

#[test]
fn seeded_scenarios_produce_identical_runs() {
    let config = ScenarioConfig::default().with_seed(11).with_counts(6, 5, 60);
    let params = RunParameters::default().with_number_of_drivers(6);

    let a = generate_scenario(&config).expect("valid config");
    let b = generate_scenario(&config).expect("valid config");
    let first = simulate(&a.drivers, &a.routes, &a.orders, &params).expect("simulation");
    let second = simulate(&b.drivers, &b.routes, &b.orders, &params).expect("simulation");
    assert_eq!(first, second);
}

#[test]
fn missing_routes_from_generator_flow_into_results() {
    let config = ScenarioConfig::default()
        .with_seed(5)
        .with_counts(3, 4, 30)
        .with_missing_route_share(1.0);
    let scenario = generate_scenario(&config).expect("valid config");
    let params = RunParameters::default().with_number_of_drivers(3);

    let result = simulate(&scenario.drivers, &scenario.routes, &scenario.orders, &params)
        .expect("simulation");
    assert_eq!(result.unresolved_count(), 30);
    assert_eq!(result.kpis.efficiency, 0.0);
    assert_eq!(result.kpis.total_profit, 0);
}

#[test]
fn inactive_drivers_are_filtered_before_the_engine() {
    let config = ScenarioConfig::default()
        .with_seed(9)
        .with_counts(8, 3, 10)
        .with_inactive_share(1.0);
    let scenario = generate_scenario(&config).expect("valid config");

    let active = scenario.active_drivers(8);
    assert!(active.is_empty());
    let params = RunParameters::default().with_number_of_drivers(8);
    assert!(simulate(&active, &scenario.routes, &scenario.orders, &params).is_err());
}
