//! Wallet balances and the exchange simulation
//!
//! An exchange debits the source balance, credits the converted amount,
//! and produces a receipt with the carbon estimate and compliance status.
//! Balances are only touched once every check has passed.

use crate::amount::round_money;
use crate::carbon::{CarbonEstimate, CarbonModel};
use crate::compliance::{compliance_check, ComplianceStatus, DEFAULT_REVIEW_THRESHOLD};
use crate::currency::Currency;
use crate::error::{Result, WalletError};
use crate::fx::{
    convert_request, total_value, ConversionRequest, DerivedRates, MissingRatePolicy, RateHistory,
    RateReader,
};
use crate::transaction::{Transaction, TransactionStatus};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Balance per currency
pub type Balances = BTreeMap<Currency, f64>;

/// Knobs for [`Wallet::exchange`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeSettings {
    pub missing_rate_policy: MissingRatePolicy,
    pub carbon: CarbonModel,
    /// Amounts strictly above this are flagged for review
    pub review_threshold: f64,
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self {
            // exchanges fail closed; display conversion falls back to 1.0
            missing_rate_policy: MissingRatePolicy::Strict,
            carbon: CarbonModel::default(),
            review_threshold: DEFAULT_REVIEW_THRESHOLD,
        }
    }
}

/// Everything recorded about one exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeReceipt {
    pub transaction: Transaction,
    pub rate: f64,
    /// Snapshot date the rate came from, when rates were dated
    pub rate_date: Option<NaiveDate>,
    pub balances_before: Balances,
    pub balances_after: Balances,
    pub carbon: CarbonEstimate,
    pub compliance: ComplianceStatus,
}

/// Multi-currency wallet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wallet {
    balances: Balances,
}

impl Wallet {
    pub fn new() -> Self {
        Self {
            balances: Balances::new(),
        }
    }

    /// Wallet with given balances; negative or non-finite balances are rejected
    pub fn with_balances(balances: Balances) -> Result<Self> {
        for (currency, amount) in &balances {
            if !amount.is_finite() || *amount < 0.0 {
                return Err(WalletError::InvalidData(format!(
                    "Invalid {} balance: {}",
                    currency, amount
                )));
            }
        }
        Ok(Self { balances })
    }

    /// Parse a balances file, e.g. `{"USD": 1000.0, "EUR": 1000.0}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let balances: Balances = serde_json::from_str(json)?;
        Self::with_balances(balances)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.balances)?)
    }

    /// Balance in `currency` (0 when never funded)
    pub fn balance(&self, currency: Currency) -> f64 {
        self.balances.get(&currency).copied().unwrap_or(0.0)
    }

    pub fn balances(&self) -> &Balances {
        &self.balances
    }

    /// Add funds
    pub fn deposit(&mut self, currency: Currency, amount: f64) -> Result<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(WalletError::InvalidAmount(format!(
                "deposit must be positive, got {}",
                amount
            )));
        }
        let updated = self.balance(currency) + amount;
        if !updated.is_finite() {
            return Err(WalletError::InvalidAmount(format!(
                "{} balance overflows after deposit of {}",
                currency, amount
            )));
        }
        self.balances.insert(currency, round_money(updated));
        Ok(())
    }

    /// Total value of all balances in `currency`
    pub fn total_in<R: RateReader + ?Sized>(
        &self,
        rates: &R,
        currency: Currency,
        policy: MissingRatePolicy,
    ) -> Result<f64> {
        let holdings: Vec<(f64, Currency)> =
            self.balances.iter().map(|(c, amount)| (*amount, *c)).collect();
        total_value(rates, &holdings, currency, policy)
    }

    /// Exchange `request.amount` of `request.from` into `request.to`
    pub fn exchange<R: RateReader + ?Sized>(
        &mut self,
        request: &ConversionRequest,
        rates: &R,
        settings: &ExchangeSettings,
    ) -> Result<ExchangeReceipt> {
        self.exchange_dated(request, rates, None, settings)
    }

    /// Exchange at the latest snapshot in `history`, deriving inverse and
    /// cross rates through `pivot` when the pair is not quoted directly
    pub fn exchange_with_history(
        &mut self,
        request: &ConversionRequest,
        history: &RateHistory,
        pivot: Currency,
        settings: &ExchangeSettings,
    ) -> Result<ExchangeReceipt> {
        let (date, table) = history.require_latest()?;
        let rates = DerivedRates::with_pivot(table, pivot);
        self.exchange_dated(request, &rates, Some(date), settings)
    }

    fn exchange_dated<R: RateReader + ?Sized>(
        &mut self,
        request: &ConversionRequest,
        rates: &R,
        rate_date: Option<NaiveDate>,
        settings: &ExchangeSettings,
    ) -> Result<ExchangeReceipt> {
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(WalletError::InvalidAmount(format!(
                "exchange amount must be positive, got {}",
                request.amount
            )));
        }

        let available = self.balance(request.from);
        if available < request.amount {
            return Err(WalletError::InsufficientFunds {
                currency: request.from.to_string(),
                required: request.amount,
                available,
            });
        }

        let conversion = convert_request(request, rates, settings.missing_rate_policy)?;
        let carbon = settings.carbon.estimate(request.amount)?;
        let received = conversion.amount();

        let credited = self.balance(request.to) + received;
        if !credited.is_finite() {
            return Err(WalletError::InvalidAmount(format!(
                "{} balance overflows after receiving {}",
                request.to, received
            )));
        }

        let balances_before = self.balances.clone();
        let debited = round_money(available - request.amount);
        self.balances.insert(request.from, debited);
        let credited = round_money(self.balance(request.to) + received);
        self.balances.insert(request.to, credited);

        let compliance = compliance_check(
            request.amount,
            request.from,
            request.to,
            settings.review_threshold,
        );

        let transaction = Transaction::new(
            request.from,
            request.to,
            round_money(request.amount),
            received,
            Utc::now(),
            TransactionStatus::Completed,
        );

        log::info!(
            "Exchanged {} {} -> {} {} @ {:.6} (carbon {} kg, {})",
            request.amount,
            request.from,
            received,
            request.to,
            conversion.rate,
            carbon.kilograms,
            compliance
        );

        Ok(ExchangeReceipt {
            transaction,
            rate: conversion.rate,
            rate_date,
            balances_before,
            balances_after: self.balances.clone(),
            carbon,
            compliance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carbon::CarbonBand;
    use crate::fx::RateTable;
    use approx::assert_relative_eq;

    fn funded() -> Wallet {
        let mut balances = Balances::new();
        balances.insert(Currency::AUD, 1000.0);
        balances.insert(Currency::USD, 500.0);
        balances.insert(Currency::EUR, 300.0);
        Wallet::with_balances(balances).unwrap()
    }

    #[test]
    fn test_exchange_updates_balances() {
        let mut wallet = funded();
        let request = ConversionRequest::new(200.0, Currency::USD, Currency::AUD).unwrap();
        let receipt = wallet
            .exchange(&request, &RateTable::default_rates(), &ExchangeSettings::default())
            .unwrap();

        assert_eq!(receipt.rate, 1.52);
        assert_eq!(receipt.transaction.to_amount, 304.0);
        assert_eq!(receipt.transaction.status, TransactionStatus::Completed);
        assert_eq!(receipt.balances_before[&Currency::USD], 500.0);
        assert_eq!(wallet.balance(Currency::USD), 300.0);
        assert_eq!(wallet.balance(Currency::AUD), 1304.0);
        assert_eq!(wallet.balance(Currency::EUR), 300.0);
        assert_eq!(receipt.balances_after, *wallet.balances());
        assert_eq!(receipt.carbon.band, CarbonBand::Medium);
        assert_eq!(receipt.compliance, ComplianceStatus::Clear);
        assert!(receipt.rate_date.is_none());
    }

    #[test]
    fn test_insufficient_funds_leaves_wallet_untouched() {
        let mut wallet = funded();
        let before = wallet.clone();
        let request = ConversionRequest::new(500.01, Currency::USD, Currency::EUR).unwrap();
        let err = wallet
            .exchange(&request, &RateTable::default_rates(), &ExchangeSettings::default())
            .unwrap_err();

        assert!(matches!(
            err,
            WalletError::InsufficientFunds { ref currency, available, .. }
                if currency == "USD" && available == 500.0
        ));
        assert_eq!(wallet, before);
    }

    #[test]
    fn test_zero_amount_rejected() {
        let mut wallet = funded();
        let request = ConversionRequest::new(0.0, Currency::USD, Currency::EUR).unwrap();
        let err = wallet
            .exchange(&request, &RateTable::default_rates(), &ExchangeSettings::default())
            .unwrap_err();
        assert!(matches!(err, WalletError::InvalidAmount(_)));
    }

    #[test]
    fn test_strict_settings_reject_missing_rate() {
        let mut wallet = funded();
        let before = wallet.clone();
        let request = ConversionRequest::new(10.0, Currency::USD, Currency::EUR).unwrap();
        let err = wallet
            .exchange(&request, &RateTable::new(), &ExchangeSettings::default())
            .unwrap_err();
        assert!(matches!(err, WalletError::UnknownCurrencyPair { .. }));
        assert_eq!(wallet, before);
    }

    #[test]
    fn test_large_exchange_needs_review() {
        let mut wallet = Wallet::new();
        wallet.deposit(Currency::EUR, 20_000.0).unwrap();
        let request = ConversionRequest::new(15_000.0, Currency::EUR, Currency::USD).unwrap();
        let receipt = wallet
            .exchange(&request, &RateTable::default_rates(), &ExchangeSettings::default())
            .unwrap();
        assert_eq!(receipt.compliance, ComplianceStatus::Review);
        assert_eq!(receipt.carbon.band, CarbonBand::High);
        assert_eq!(wallet.balance(Currency::EUR), 5_000.0);
        assert_eq!(wallet.balance(Currency::USD), 16_407.0);
    }

    #[test]
    fn test_exchange_with_history_uses_latest_cross_rate() {
        let history = RateHistory::from_json_str(
            r#"{
                "2025-08-01": {"USD_AUD": 1.50, "EUR_AUD": 1.60},
                "2025-08-02": {"USD_AUD": 1.52, "EUR_AUD": 1.66}
            }"#,
        )
        .unwrap();

        let mut wallet = funded();
        let request = ConversionRequest::new(100.0, Currency::USD, Currency::EUR).unwrap();
        let receipt = wallet
            .exchange_with_history(&request, &history, Currency::AUD, &ExchangeSettings::default())
            .unwrap();

        assert_eq!(receipt.rate_date, NaiveDate::from_ymd_opt(2025, 8, 2));
        assert_relative_eq!(receipt.rate, 1.52 / 1.66, epsilon = 1e-12);
        assert_eq!(receipt.transaction.to_amount, 91.57);
        assert_eq!(wallet.balance(Currency::EUR), 391.57);
    }

    #[test]
    fn test_balances_json() {
        let wallet = Wallet::from_json_str(r#"{"USD": 1000.0, "EUR": 250.5}"#).unwrap();
        assert_eq!(wallet.balance(Currency::EUR), 250.5);
        assert_eq!(wallet.balance(Currency::AUD), 0.0);

        let json = wallet.to_json_string().unwrap();
        assert_eq!(Wallet::from_json_str(&json).unwrap(), wallet);

        assert!(Wallet::from_json_str(r#"{"USD": -1.0}"#).is_err());
        assert!(Wallet::from_json_str(r#"{"XYZ": 1.0}"#).is_err());
    }

    #[test]
    fn test_total_in() {
        let wallet = funded();
        let total = wallet
            .total_in(&RateTable::default_rates(), Currency::USD, MissingRatePolicy::Identity)
            .unwrap();
        assert_relative_eq!(total, 500.0 + 660.0 + 328.14, epsilon = 1e-9);
    }

    #[test]
    fn test_deposit_validation() {
        let mut wallet = Wallet::new();
        assert!(wallet.deposit(Currency::USD, 0.0).is_err());
        assert!(wallet.deposit(Currency::USD, f64::NAN).is_err());
        assert!(wallet.deposit(Currency::EUR, 1.7e308).is_ok());
        assert!(wallet.deposit(Currency::EUR, 1.7e308).is_err());
        assert_eq!(wallet.balance(Currency::EUR), 1.7e308);
        wallet.deposit(Currency::USD, 10.1).unwrap();
        wallet.deposit(Currency::USD, 0.2).unwrap();
        assert_eq!(wallet.balance(Currency::USD), 10.3);
    }
}
