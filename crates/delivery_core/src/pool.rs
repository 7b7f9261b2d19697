//! Driver pool with least-loaded selection.
//!
//! Each order goes to the driver with the smallest accumulated workload.
//! Ties go to the driver that appears first in the pool. The pool keeps a
//! min-heap keyed by `(assigned_minutes, pool_index)`, so a pick costs
//! O(log n) instead of a full re-sort.
//!
//! Keys are never updated in place. Assigning work pushes a fresh key, and a
//! key whose order count no longer matches its driver is stale and dropped
//! once it reaches the top.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::error::EngineInputError;
use crate::model::{is_fatigued_above, Driver};

/// Per-run workload of one driver. Lives only for the duration of a run.
#[derive(Debug, Clone)]
struct DriverLoad {
    id: String,
    name: String,
    fatigued: bool,
    assigned_minutes: u64,
    assigned_orders: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
struct LoadKey {
    assigned_minutes: u64,
    index: usize,
    // Orders the driver had when this key was pushed.
    orders: usize,
}

impl PartialEq for LoadKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LoadKey {}

impl Ord for LoadKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by load, then index.
        other
            .assigned_minutes
            .cmp(&self.assigned_minutes)
            .then_with(|| other.index.cmp(&self.index))
            .then_with(|| other.orders.cmp(&self.orders))
    }
}

impl PartialOrd for LoadKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The driver chosen for one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickedDriver {
    /// Position of the driver in the pool (input order).
    pub index: usize,
    pub fatigued: bool,
}

/// Final workload of one driver after a run.
///
/// `exceeds_max_hours` is informational: the max-hours parameter does not
/// cap assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverWorkload {
    pub driver_id: String,
    pub name: String,
    pub fatigued: bool,
    pub assigned_minutes: u64,
    pub assigned_orders: Vec<String>,
    pub exceeds_max_hours: bool,
}

/// Drivers taking part in one run and their accumulated load.
#[derive(Debug)]
pub struct DriverPool {
    drivers: Vec<DriverLoad>,
    heap: BinaryHeap<LoadKey>,
}

impl DriverPool {
    /// Build a pool from the first `limit` drivers, in input order.
    ///
    /// Fatigue flags are computed here, once, from each driver's history.
    pub fn new(
        drivers: &[Driver],
        limit: usize,
        fatigue_threshold_hours: f64,
    ) -> Result<Self, EngineInputError> {
        let loads: Vec<DriverLoad> = drivers
            .iter()
            .take(limit)
            .map(|driver| DriverLoad {
                id: driver.id.clone(),
                name: driver.name.clone(),
                fatigued: is_fatigued_above(&driver.past_hours, fatigue_threshold_hours),
                assigned_minutes: 0,
                assigned_orders: Vec::new(),
            })
            .collect();

        if loads.is_empty() {
            return Err(EngineInputError::EmptyDriverPool { requested: limit });
        }

        let heap = (0..loads.len())
            .map(|index| LoadKey {
                assigned_minutes: 0,
                index,
                orders: 0,
            })
            .collect();

        Ok(Self {
            drivers: loads,
            heap,
        })
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// The least-loaded driver. Does not change any load.
    pub fn peek_least_loaded(&self) -> PickedDriver {
        // The top key is always current and the pool is never empty.
        let index = self.heap.peek().map_or(0, |key| key.index);
        PickedDriver {
            index,
            fatigued: self.drivers[index].fatigued,
        }
    }

    /// Add `minutes` of work and one order to the driver at `index`.
    ///
    /// Any driver in the pool may be assigned. Passing the index returned by
    /// [`DriverPool::peek_least_loaded`] gives least-loaded dispatch.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a pool position.
    pub fn assign(&mut self, index: usize, order_id: &str, minutes: u64) {
        let driver = &mut self.drivers[index];
        driver.assigned_minutes = driver.assigned_minutes.saturating_add(minutes);
        driver.assigned_orders.push(order_id.to_string());
        self.heap.push(LoadKey {
            assigned_minutes: driver.assigned_minutes,
            index,
            orders: driver.assigned_orders.len(),
        });
        self.drop_stale_keys();
    }

    fn drop_stale_keys(&mut self) {
        while let Some(key) = self.heap.peek() {
            if key.orders == self.drivers[key.index].assigned_orders.len() {
                break;
            }
            self.heap.pop();
        }
    }

    pub fn name(&self, index: usize) -> &str {
        &self.drivers[index].name
    }

    pub fn assigned_minutes(&self, index: usize) -> u64 {
        self.drivers[index].assigned_minutes
    }

    /// Consume the pool and report each driver's workload, in pool order.
    pub fn into_workloads(self, max_hours_per_driver: f64) -> Vec<DriverWorkload> {
        let max_minutes = max_hours_per_driver * 60.0;
        self.drivers
            .into_iter()
            .map(|load| DriverWorkload {
                exceeds_max_hours: load.assigned_minutes as f64 > max_minutes,
                driver_id: load.id,
                name: load.name,
                fatigued: load.fatigued,
                assigned_minutes: load.assigned_minutes,
                assigned_orders: load.assigned_orders,
            })
            .collect()
    }
}
