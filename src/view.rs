//! Immutable view state for the converter and dashboard
//!
//! The presentation layer owns layout and formatting. It keeps a
//! [`ConverterState`] value, feeds it [`ConverterEvent`]s, and calls
//! [`ConverterState::render`] to get derived display values. Nothing here
//! mutates shared state.

use crate::amount::format_money;
use crate::carbon::CarbonEstimate;
use crate::currency::Currency;
use crate::error::Result;
use crate::fx::{convert_input, Conversion, MissingRatePolicy, RateReader};
use crate::transaction::Transaction;
use crate::wallet::Wallet;
use serde::{Deserialize, Serialize};

/// Converter widget input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterState {
    /// Raw text as typed by the user
    pub amount_input: String,
    pub from: Currency,
    pub to: Currency,
}

/// User interactions with the converter widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConverterEvent {
    AmountChanged(String),
    FromChanged(Currency),
    ToChanged(Currency),
    /// Exchange source and target currencies
    Swap,
}

/// Derived converter output for one render
#[derive(Debug)]
pub struct ConverterView {
    pub conversion: Result<Conversion>,
    /// Text for the result field; empty when the input is invalid
    pub display: String,
}

impl Default for ConverterState {
    fn default() -> Self {
        Self {
            amount_input: "100".to_string(),
            from: Currency::USD,
            to: Currency::EUR,
        }
    }
}

impl ConverterState {
    pub fn new(amount_input: impl Into<String>, from: Currency, to: Currency) -> Self {
        Self {
            amount_input: amount_input.into(),
            from,
            to,
        }
    }

    /// Next state after `event`
    pub fn apply(self, event: ConverterEvent) -> Self {
        match event {
            ConverterEvent::AmountChanged(amount_input) => Self {
                amount_input,
                ..self
            },
            ConverterEvent::FromChanged(from) => Self { from, ..self },
            ConverterEvent::ToChanged(to) => Self { to, ..self },
            ConverterEvent::Swap => Self {
                from: self.to,
                to: self.from,
                ..self
            },
        }
    }

    /// Derive display values for the current input
    pub fn render<R: RateReader + ?Sized>(
        &self,
        rates: &R,
        policy: MissingRatePolicy,
    ) -> ConverterView {
        let conversion = convert_input(&self.amount_input, self.from, self.to, rates, policy);
        let display = match &conversion {
            Ok(c) => format!("{} {}", format_money(c.raw), c.to()),
            Err(_) => String::new(),
        };
        ConverterView {
            conversion,
            display,
        }
    }
}

/// One row of the transaction history with its derived metric
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub transaction: Transaction,
    pub carbon: CarbonEstimate,
}

/// Derived values for the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub currency: Currency,
    /// Total of all balances in `currency`, unrounded
    pub total_balance: f64,
    pub rows: Vec<TransactionRow>,
}

/// Compute dashboard values from a wallet and its history
pub fn dashboard<R: RateReader + ?Sized>(
    wallet: &Wallet,
    history: &[Transaction],
    currency: Currency,
    rates: &R,
    policy: MissingRatePolicy,
) -> Result<DashboardView> {
    let total_balance = wallet.total_in(rates, currency, policy)?;
    let rows = history
        .iter()
        .map(|txn| {
            Ok(TransactionRow {
                transaction: txn.clone(),
                carbon: txn.carbon()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DashboardView {
        currency,
        total_balance,
        rows,
    })
}
