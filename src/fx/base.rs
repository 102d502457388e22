//! Base FX system - RateReader trait and missing-rate policy

use crate::currency::Currency;
use crate::error::{Result, WalletError};
use serde::{Deserialize, Serialize};

/// What to do when a currency pair has no configured rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingRatePolicy {
    /// Use a multiplier of 1. Matches the dashboard's historical behavior but
    /// hides misconfigured tables, so every fallback is logged.
    #[default]
    Identity,
    /// Report [`WalletError::UnknownCurrencyPair`]
    Strict,
}

/// Trait for reading FX rates
pub trait RateReader: Send + Sync {
    /// Rate configured for the ordered pair, such that `to_amount = from_amount * rate`
    fn lookup(&self, from: Currency, to: Currency) -> Option<f64>;

    /// Resolve the rate for a pair, applying the identity rule and `policy`
    fn get_rate(&self, from: Currency, to: Currency, policy: MissingRatePolicy) -> Result<f64> {
        if from == to {
            return Ok(1.0);
        }

        if let Some(rate) = self.lookup(from, to) {
            return Ok(rate);
        }

        match policy {
            MissingRatePolicy::Identity => {
                log::warn!("No FX rate for {}/{}, falling back to 1.0", from, to);
                Ok(1.0)
            }
            MissingRatePolicy::Strict => Err(WalletError::UnknownCurrencyPair {
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }

    /// Check if rate is available without any fallback
    fn has_rate(&self, from: Currency, to: Currency) -> bool {
        from == to || self.lookup(from, to).is_some()
    }
}

impl<R: RateReader + ?Sized> RateReader for &R {
    fn lookup(&self, from: Currency, to: Currency) -> Option<f64> {
        (**self).lookup(from, to)
    }
}
