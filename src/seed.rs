//! Mock wallet data used by the dashboard and the CLI

use crate::currency::Currency;
use crate::transaction::{Transaction, TransactionStatus};
use crate::wallet::{Balances, Wallet};
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

/// Starting balances of the demo wallet
pub fn balances() -> Balances {
    let mut balances = Balances::new();
    balances.insert(Currency::AUD, 1000.0);
    balances.insert(Currency::USD, 500.0);
    balances.insert(Currency::EUR, 300.0);
    balances
}

pub fn wallet() -> Wallet {
    let wallet = Wallet::with_balances(balances());
    debug_assert!(wallet.is_ok(), "invalid seed balances: {:?}", wallet);
    wallet.unwrap_or_default()
}

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    let timestamp = Utc.with_ymd_and_hms(2025, 8, day, hour, minute, 0).single();
    debug_assert!(
        timestamp.is_some(),
        "invalid seed timestamp 2025-08-{} {}:{}",
        day,
        hour,
        minute
    );
    timestamp.unwrap_or_default()
}

/// Recent transaction history, newest first
pub fn transactions() -> Vec<Transaction> {
    let rows = [
        (1u128, Currency::USD, Currency::AUD, 200.0, 304.0, at(4, 9, 30), TransactionStatus::Completed),
        (2, Currency::EUR, Currency::USD, 150.0, 164.07, at(3, 16, 5), TransactionStatus::Completed),
        (3, Currency::AUD, Currency::EUR, 500.0, 300.0, at(3, 8, 45), TransactionStatus::Pending),
        (4, Currency::USD, Currency::EUR, 1200.0, 1097.04, at(1, 11, 0), TransactionStatus::Failed),
    ];

    rows.into_iter()
        .map(|(id, from, to, from_amount, to_amount, timestamp, status)| Transaction {
            id: Uuid::from_u128(id),
            from_currency: from,
            to_currency: to,
            from_amount,
            to_amount,
            timestamp,
            status,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::RateTable;

    #[test]
    fn test_seed_wallet() {
        let wallet = wallet();
        assert_eq!(wallet.balances(), &balances());
    }

    #[test]
    fn test_seed_transactions_match_default_rates() {
        let table = RateTable::default_rates();
        for txn in transactions() {
            let rate = table.get(txn.from_currency, txn.to_currency).unwrap();
            let expected = crate::amount::round_money(txn.from_amount * rate);
            assert_eq!(txn.to_amount, expected, "transaction {}", txn.id);
        }
    }

    #[test]
    fn test_seed_timestamps_are_real_dates() {
        let august = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
        for txn in transactions() {
            assert!(txn.timestamp >= august, "transaction {}", txn.id);
        }
        assert!(!wallet().balances().is_empty());
    }

    #[test]
    fn test_seed_ids_unique_and_sorted() {
        let txns = transactions();
        for pair in txns.windows(2) {
            assert_ne!(pair[0].id, pair[1].id);
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }
}
