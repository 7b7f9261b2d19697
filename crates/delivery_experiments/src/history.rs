//! In-memory store of past simulation results, ordered by creation time.

use chrono::{DateTime, Utc};
use delivery_core::telemetry::SimulationResult;
use serde::Serialize;

/// How many results [`SimulationHistory::recent`] callers typically ask for.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// One stored simulation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredSimulation {
    pub created_at: DateTime<Utc>,
    pub result: SimulationResult,
}

/// Results recorded so far. Entries are never modified after insertion.
#[derive(Debug, Clone, Default)]
pub struct SimulationHistory {
    // Insertion order; recency ties are broken by position.
    entries: Vec<StoredSimulation>,
}

impl SimulationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `result` stamped with the current time.
    pub fn record(&mut self, result: SimulationResult) -> &StoredSimulation {
        self.record_at(Utc::now(), result)
    }

    /// Store `result` with an explicit creation time.
    pub fn record_at(&mut self, created_at: DateTime<Utc>, result: SimulationResult) -> &StoredSimulation {
        let index = self.entries.len();
        self.entries.push(StoredSimulation { created_at, result });
        &self.entries[index]
    }

    /// The most recently created result.
    pub fn latest(&self) -> Option<&StoredSimulation> {
        self.recent(1).into_iter().next()
    }

    /// Up to `limit` results, newest first. Results with the same creation
    /// time are returned most recently inserted first.
    pub fn recent(&self, limit: usize) -> Vec<&StoredSimulation> {
        let mut ordered: Vec<(usize, &StoredSimulation)> = self.entries.iter().enumerate().collect();
        ordered.sort_by(|(ia, a), (ib, b)| b.created_at.cmp(&a.created_at).then(ib.cmp(ia)));
        ordered
            .into_iter()
            .take(limit)
            .map(|(_, entry)| entry)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
