//! CSV data sets: loading drivers, routes and orders from a directory and
//! writing the bundled sample data.
//!
//! A data set directory holds three files:
//!
//! | File          | Columns                                                        |
//! |---------------|----------------------------------------------------------------|
//! | `drivers.csv` | `name, shift_hours, past_week_hours, email[, is_active, driver_id]` |
//! | `routes.csv`  | `route_id, distance_km, traffic_level, base_time_min`          |
//! | `orders.csv`  | `order_id, value_rs, route_id, delivery_time, status`          |
//!
//! `past_week_hours` is a `|`-separated list, oldest day first. `delivery_time`
//! is an optional `HH:MM` wall-clock time placed on the service date.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};
use delivery_core::model::{Driver, Order, OrderStatus, Route};
use delivery_core::scenario::Scenario;
use delivery_core::traffic::TrafficLevel;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

pub const DRIVERS_FILE: &str = "drivers.csv";
pub const ROUTES_FILE: &str = "routes.csv";
pub const ORDERS_FILE: &str = "orders.csv";

const SAMPLE_DRIVERS: &str = "\
name,shift_hours,past_week_hours,email,is_active
Rahul Singh,2,7|8|6|7|8|6,rahul@example.com,true
Priya Patel,3,8|7|9|8|7|6,priya@example.com,true
Amit Kumar,1,6|7|9|8|6|7,amit@example.com,true
Sneha Gupta,0,5|6|7|6|5|4,sneha@example.com,true
Vikram Sharma,4,8|9|8|7|8|9,vikram@example.com,true
";

const SAMPLE_ROUTES: &str = "\
route_id,distance_km,traffic_level,base_time_min
R001,10,Low,30
R002,15,Medium,45
R003,20,High,60
R004,12,Low,35
R005,18,Medium,50
";

const SAMPLE_ORDERS: &str = "\
order_id,value_rs,route_id,delivery_time,status
O001,800,R001,,Pending
O002,1200,R002,,Pending
O003,950,R003,,Pending
O004,1500,R004,,Pending
O005,750,R005,,Pending
O006,1100,R001,,Pending
O007,900,R002,,Pending
";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{file} row {row}: invalid {field} {value:?}")]
    InvalidValue {
        file: &'static str,
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("duplicate order id {0:?}")]
    DuplicateOrderId(String),
}

#[derive(Debug, Deserialize)]
struct DriverRow {
    #[serde(default)]
    driver_id: String,
    name: String,
    #[serde(default)]
    shift_hours: String,
    #[serde(default)]
    past_week_hours: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    is_active: String,
}

#[derive(Debug, Deserialize)]
struct RouteRow {
    route_id: String,
    distance_km: String,
    traffic_level: String,
    base_time_min: String,
}

#[derive(Debug, Deserialize)]
struct OrderRow {
    order_id: String,
    value_rs: String,
    route_id: String,
    #[serde(default)]
    delivery_time: String,
    #[serde(default)]
    status: String,
}

/// Load `drivers.csv`, `routes.csv` and `orders.csv` from `dir`.
///
/// Order delivery times are placed on `service_date`. Rows are returned in
/// file order.
pub fn load_dataset(dir: impl AsRef<Path>, service_date: NaiveDate) -> Result<Scenario, DatasetError> {
    let dir = dir.as_ref();
    let drivers = load_drivers(dir.join(DRIVERS_FILE))?;
    let routes = load_routes(dir.join(ROUTES_FILE))?;
    let orders = load_orders(dir.join(ORDERS_FILE), service_date)?;

    info!(
        dir = %dir.display(),
        drivers = drivers.len(),
        routes = routes.len(),
        orders = orders.len(),
        "loaded data set"
    );
    Ok(Scenario::new(drivers, routes, orders))
}

pub fn load_drivers(path: impl AsRef<Path>) -> Result<Vec<Driver>, DatasetError> {
    let rows: Vec<DriverRow> = read_rows(path.as_ref())?;
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| parse_driver(i + 1, row))
        .collect()
}

pub fn load_routes(path: impl AsRef<Path>) -> Result<Vec<Route>, DatasetError> {
    let rows: Vec<RouteRow> = read_rows(path.as_ref())?;
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| parse_route(i + 1, row))
        .collect()
}

/// Load orders, rejecting repeated order ids.
pub fn load_orders(
    path: impl AsRef<Path>,
    service_date: NaiveDate,
) -> Result<Vec<Order>, DatasetError> {
    let rows: Vec<OrderRow> = read_rows(path.as_ref())?;
    let mut seen = HashSet::new();
    let mut orders = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let order = parse_order(i + 1, row, service_date)?;
        if !seen.insert(order.id.clone()) {
            return Err(DatasetError::DuplicateOrderId(order.id));
        }
        orders.push(order);
    }
    Ok(orders)
}

/// Write the five-driver sample data set into `dir`, creating it if needed.
///
/// Existing files are left alone unless `force` is set. Returns the paths
/// that were written.
pub fn write_sample_dataset(dir: impl AsRef<Path>, force: bool) -> Result<Vec<PathBuf>, DatasetError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| DatasetError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();
    for (name, contents) in [
        (DRIVERS_FILE, SAMPLE_DRIVERS),
        (ROUTES_FILE, SAMPLE_ROUTES),
        (ORDERS_FILE, SAMPLE_ORDERS),
    ] {
        let path = dir.join(name);
        if path.exists() && !force {
            debug!(path = %path.display(), "sample file exists; keeping it");
            continue;
        }
        fs::write(&path, contents).map_err(|source| DatasetError::Io {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }
    Ok(written)
}

/// Write `scenario` into `dir` in the data set format, overwriting any
/// existing files. Delivery timestamps are written as `HH:MM`.
pub fn write_dataset(dir: impl AsRef<Path>, scenario: &Scenario) -> Result<(), DatasetError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| DatasetError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(DRIVERS_FILE);
    write_rows(
        &path,
        ["driver_id", "name", "shift_hours", "past_week_hours", "email", "is_active"],
        scenario.drivers.iter().map(|driver| {
            let history: Vec<String> = driver.past_hours.iter().map(f64::to_string).collect();
            [
                driver.id.clone(),
                driver.name.clone(),
                driver.current_shift_hours.to_string(),
                history.join("|"),
                driver.email.clone().unwrap_or_default(),
                driver.is_active.to_string(),
            ]
        }),
    )?;

    let path = dir.join(ROUTES_FILE);
    write_rows(
        &path,
        ["route_id", "distance_km", "traffic_level", "base_time_min"],
        scenario.routes.iter().map(|route| {
            [
                route.id.clone(),
                route.distance_km.to_string(),
                route.traffic_level.to_string(),
                route.base_time_minutes.to_string(),
            ]
        }),
    )?;

    let path = dir.join(ORDERS_FILE);
    write_rows(
        &path,
        ["order_id", "value_rs", "route_id", "delivery_time", "status"],
        scenario.orders.iter().map(|order| {
            let status = match order.status {
                OrderStatus::Pending => "Pending",
                OrderStatus::Delivered => "Delivered",
            };
            [
                order.id.clone(),
                order.value.to_string(),
                order.route_id.clone(),
                order
                    .delivery_timestamp
                    .map(|ts| ts.format("%H:%M").to_string())
                    .unwrap_or_default(),
                status.to_string(),
            ]
        }),
    )?;

    info!(dir = %dir.display(), "wrote data set");
    Ok(())
}

fn write_rows<const N: usize>(
    path: &Path,
    header: [&str; N],
    rows: impl Iterator<Item = [String; N]>,
) -> Result<(), DatasetError> {
    let mut writer = csv::Writer::from_path(path).map_err(|source| csv_error(path, source))?;
    writer
        .write_record(header)
        .map_err(|source| csv_error(path, source))?;
    for row in rows {
        writer
            .write_record(&row)
            .map_err(|source| csv_error(path, source))?;
    }
    writer.flush().map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_rows<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| csv_error(path, source))?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| csv_error(path, source))
}

fn csv_error(path: &Path, source: csv::Error) -> DatasetError {
    // Surface a missing file as plain I/O.
    if source.is_io_error() {
        DatasetError::Io {
            path: path.to_path_buf(),
            source: source.into(),
        }
    } else {
        DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn invalid(file: &'static str, row: usize, field: &'static str, value: &str) -> DatasetError {
    DatasetError::InvalidValue {
        file,
        row,
        field,
        value: value.to_string(),
    }
}

/// Parse a finite number, optionally requiring it to be strictly positive.
fn parse_number(
    file: &'static str,
    row: usize,
    field: &'static str,
    raw: &str,
    positive: bool,
) -> Result<f64, DatasetError> {
    let value: f64 = raw.parse().map_err(|_| invalid(file, row, field, raw))?;
    let in_range = if positive { value > 0.0 } else { value >= 0.0 };
    if value.is_finite() && in_range {
        Ok(value)
    } else {
        Err(invalid(file, row, field, raw))
    }
}

fn parse_driver(row: usize, raw: DriverRow) -> Result<Driver, DatasetError> {
    if raw.name.is_empty() {
        return Err(invalid(DRIVERS_FILE, row, "name", &raw.name));
    }
    let id = if raw.driver_id.is_empty() {
        format!("D{row:03}")
    } else {
        raw.driver_id
    };

    let shift_hours = if raw.shift_hours.is_empty() {
        0.0
    } else {
        parse_number(DRIVERS_FILE, row, "shift_hours", &raw.shift_hours, false)?
    };

    let past_hours = raw
        .past_week_hours
        .split('|')
        .map(str::trim)
        .filter(|day| !day.is_empty())
        .map(|day| parse_number(DRIVERS_FILE, row, "past_week_hours", day, false))
        .collect::<Result<Vec<_>, _>>()?;

    let is_active = match raw.is_active.to_ascii_lowercase().as_str() {
        "" | "true" => true,
        "false" => false,
        _ => return Err(invalid(DRIVERS_FILE, row, "is_active", &raw.is_active)),
    };

    let mut driver = Driver::new(id, raw.name, past_hours)
        .with_current_shift_hours(shift_hours)
        .with_active(is_active);
    if !raw.email.is_empty() {
        driver = driver.with_email(raw.email);
    }
    Ok(driver)
}

fn parse_route(row: usize, raw: RouteRow) -> Result<Route, DatasetError> {
    if raw.route_id.is_empty() {
        return Err(invalid(ROUTES_FILE, row, "route_id", &raw.route_id));
    }
    let distance_km = parse_number(ROUTES_FILE, row, "distance_km", &raw.distance_km, true)?;
    let base_time = parse_number(ROUTES_FILE, row, "base_time_min", &raw.base_time_min, true)?;
    let traffic_level: TrafficLevel = raw
        .traffic_level
        .parse()
        .map_err(|_| invalid(ROUTES_FILE, row, "traffic_level", &raw.traffic_level))?;
    Ok(Route::new(raw.route_id, distance_km, traffic_level, base_time))
}

fn parse_order(row: usize, raw: OrderRow, service_date: NaiveDate) -> Result<Order, DatasetError> {
    if raw.order_id.is_empty() {
        return Err(invalid(ORDERS_FILE, row, "order_id", &raw.order_id));
    }
    if raw.route_id.is_empty() {
        return Err(invalid(ORDERS_FILE, row, "route_id", &raw.route_id));
    }
    let value = parse_number(ORDERS_FILE, row, "value_rs", &raw.value_rs, true)?;

    let status = match raw.status.as_str() {
        "" | "Pending" => OrderStatus::Pending,
        "Delivered" => OrderStatus::Delivered,
        _ => return Err(invalid(ORDERS_FILE, row, "status", &raw.status)),
    };

    let mut order = Order::new(raw.order_id, value, raw.route_id).with_status(status);
    if !raw.delivery_time.is_empty() {
        let time = NaiveTime::parse_from_str(&raw.delivery_time, "%H:%M")
            .map_err(|_| invalid(ORDERS_FILE, row, "delivery_time", &raw.delivery_time))?;
        order = order.with_delivery_timestamp(service_date.and_time(time));
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")
    }

    #[test]
    fn sample_data_set_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let written = write_sample_dataset(dir.path(), false).unwrap();
        assert_eq!(written.len(), 3);

        let scenario = load_dataset(dir.path(), service_date()).unwrap();
        assert_eq!(scenario.drivers.len(), 5);
        assert_eq!(scenario.routes.len(), 5);
        assert_eq!(scenario.orders.len(), 7);

        let rahul = &scenario.drivers[0];
        assert_eq!(rahul.id, "D001");
        assert_eq!(rahul.past_hours, vec![7.0, 8.0, 6.0, 7.0, 8.0, 6.0]);
        assert_eq!(rahul.current_shift_hours, 2.0);
        assert_eq!(rahul.email.as_deref(), Some("rahul@example.com"));
        assert!(scenario.drivers[4].was_fatigued_yesterday());

        assert_eq!(scenario.routes[2].traffic_level, TrafficLevel::High);
        assert_eq!(scenario.orders[3].value, 1500.0);
        assert_eq!(scenario.orders[3].route_id, "R004");
    }

    #[test]
    fn existing_files_are_kept_without_force() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(ROUTES_FILE), "route_id,distance_km,traffic_level,base_time_min\n").unwrap();

        let written = write_sample_dataset(dir.path(), false).unwrap();
        assert_eq!(written.len(), 2);
        assert!(load_routes(dir.path().join(ROUTES_FILE)).unwrap().is_empty());

        let written = write_sample_dataset(dir.path(), true).unwrap();
        assert_eq!(written.len(), 3);
        assert_eq!(load_routes(dir.path().join(ROUTES_FILE)).unwrap().len(), 5);
    }

    #[test]
    fn delivery_time_lands_on_service_date() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ORDERS_FILE);
        fs::write(
            &path,
            "order_id,value_rs,route_id,delivery_time,status\nO1,500,R001,14:35,Delivered\n",
        )
        .unwrap();

        let orders = load_orders(&path, service_date()).unwrap();
        let expected = service_date().and_hms_opt(14, 35, 0).unwrap();
        assert_eq!(orders[0].delivery_timestamp, Some(expected));
        assert_eq!(orders[0].status, OrderStatus::Delivered);
    }

    #[test]
    fn duplicate_order_ids_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ORDERS_FILE);
        fs::write(
            &path,
            "order_id,value_rs,route_id,delivery_time,status\nO1,500,R001,,\nO1,600,R002,,\n",
        )
        .unwrap();

        let err = load_orders(&path, service_date()).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateOrderId(id) if id == "O1"));
    }

    #[test]
    fn invalid_values_name_the_row_and_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ROUTES_FILE);
        fs::write(
            &path,
            "route_id,distance_km,traffic_level,base_time_min\nR001,10,Low,30\nR002,-4,Low,30\n",
        )
        .unwrap();

        match load_routes(&path).unwrap_err() {
            DatasetError::InvalidValue { row, field, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(field, "distance_km");
                assert_eq!(value, "-4");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_traffic_level_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ROUTES_FILE);
        fs::write(
            &path,
            "route_id,distance_km,traffic_level,base_time_min\nR001,10,Gridlock,30\n",
        )
        .unwrap();
        assert!(matches!(
            load_routes(&path).unwrap_err(),
            DatasetError::InvalidValue { field: "traffic_level", .. }
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_dataset(dir.path(), service_date()).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn generated_scenario_survives_write_and_load() {
        use delivery_core::scenario::{generate_scenario, ScenarioConfig};

        let dir = TempDir::new().unwrap();
        let scenario = generate_scenario(
            &ScenarioConfig::default()
                .with_seed(17)
                .with_counts(4, 6, 25)
                .with_inactive_share(0.5),
        )
        .unwrap();
        write_dataset(dir.path(), &scenario).unwrap();

        let loaded = load_dataset(dir.path(), service_date()).unwrap();
        assert_eq!(loaded, scenario);
    }

    #[test]
    fn inactive_flag_and_explicit_ids_are_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DRIVERS_FILE);
        fs::write(
            &path,
            "driver_id,name,shift_hours,past_week_hours,email,is_active\nX9,Ana,,,,false\n",
        )
        .unwrap();

        let drivers = load_drivers(&path).unwrap();
        assert_eq!(drivers[0].id, "X9");
        assert!(!drivers[0].is_active);
        assert!(drivers[0].past_hours.is_empty());
        assert_eq!(drivers[0].email, None);
    }
}
