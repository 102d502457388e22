//! Dated FX rate snapshots
//!
//! Snapshot files map a date to that day's quoted pairs:
//!
//! ```json
//! {
//!   "2025-08-01": {"USD_AUD": 1.52, "EUR_AUD": 1.66},
//!   "2025-08-02": {"USD_AUD": 1.53, "EUR_AUD": 1.67}
//! }
//! ```

use super::table::RateTable;
use crate::error::{Result, WalletError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Rate tables keyed by the day they were quoted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateHistory {
    snapshots: BTreeMap<NaiveDate, RateTable>,
}

impl RateHistory {
    pub fn new() -> Self {
        Self {
            snapshots: BTreeMap::new(),
        }
    }

    /// Add or replace the snapshot for `date`
    pub fn insert(&mut self, date: NaiveDate, table: RateTable) {
        self.snapshots.insert(date, table);
    }

    pub fn get(&self, date: NaiveDate) -> Option<&RateTable> {
        self.snapshots.get(&date)
    }

    /// Most recent snapshot
    pub fn latest(&self) -> Option<(NaiveDate, &RateTable)> {
        self.snapshots
            .iter()
            .next_back()
            .map(|(date, table)| (*date, table))
    }

    /// Most recent snapshot quoted on or before `date` (forward fill)
    pub fn on_or_before(&self, date: NaiveDate) -> Option<(NaiveDate, &RateTable)> {
        self.snapshots
            .range(..=date)
            .next_back()
            .map(|(date, table)| (*date, table))
    }

    /// Dates with a snapshot, oldest first
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.snapshots.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let history: Self = serde_json::from_str(json)?;
        log::debug!("Loaded {} FX snapshots", history.len());
        Ok(history)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Latest snapshot, or an error if the history is empty
    pub fn require_latest(&self) -> Result<(NaiveDate, &RateTable)> {
        self.latest()
            .ok_or_else(|| WalletError::InvalidData("FX rate history is empty".to_string()))
    }
}
