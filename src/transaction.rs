//! Transaction - a recorded currency exchange
//!
//! Transactions are produced by [`crate::wallet::Wallet::exchange`] or supplied
//! as seed history. Derived metrics (carbon estimate, effective rate) are
//! computed on demand, never stored.

use crate::carbon::{estimate_footprint, CarbonEstimate};
use crate::currency::{Currency, CurrencyPair};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Transaction ID
pub type TransactionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// An exchange between two wallet currencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction ID
    pub id: TransactionId,
    pub from_currency: Currency,
    pub to_currency: Currency,
    /// Amount debited in `from_currency`
    pub from_amount: f64,
    /// Amount credited in `to_currency`
    pub to_amount: f64,
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
}

impl Transaction {
    /// Create a new transaction with a fresh ID
    pub fn new(
        from_currency: Currency,
        to_currency: Currency,
        from_amount: f64,
        to_amount: f64,
        timestamp: DateTime<Utc>,
        status: TransactionStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_currency,
            to_currency,
            from_amount,
            to_amount,
            timestamp,
            status,
        }
    }

    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.from_currency, self.to_currency)
    }

    /// Rate actually realized (`to_amount / from_amount`), if defined
    pub fn effective_rate(&self) -> Option<f64> {
        if self.from_amount > 0.0 {
            Some(self.to_amount / self.from_amount)
        } else {
            None
        }
    }

    /// Carbon estimate derived from the source amount
    pub fn carbon(&self) -> Result<CarbonEstimate> {
        estimate_footprint(self.from_amount)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, TransactionStatus::Completed)
    }
}
