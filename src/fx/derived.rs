//! Inverse and cross-rate derivation
//!
//! Rate snapshots usually quote each currency against a single pivot
//! (`USD_AUD`, `EUR_AUD`). [`DerivedRates`] fills the gaps: inverses of
//! quoted pairs and crosses through the pivot. Directly quoted rates always
//! win over derived ones.

use super::base::RateReader;
use crate::currency::Currency;

/// Rate reader that derives missing rates from an inner reader
///
/// # Example
/// ```
/// use wallet_fx::currency::Currency;
/// use wallet_fx::fx::{DerivedRates, RateReader, RateTable};
///
/// let table = RateTable::new()
///     .with_rate(Currency::USD, Currency::AUD, 1.50).unwrap()
///     .with_rate(Currency::EUR, Currency::AUD, 1.65).unwrap();
/// let rates = DerivedRates::with_pivot(&table, Currency::AUD);
///
/// // USD -> EUR = USD_AUD / EUR_AUD
/// let usd_eur = rates.lookup(Currency::USD, Currency::EUR).unwrap();
/// assert!((usd_eur - 1.50 / 1.65).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct DerivedRates<R> {
    inner: R,
    /// Enable automatic inverse rate lookup
    auto_inverse: bool,
    /// Currency used for cross-rate calculation
    pivot: Option<Currency>,
}

impl<R: RateReader> DerivedRates<R> {
    /// Inverse lookup only
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            auto_inverse: true,
            pivot: None,
        }
    }

    /// Inverse lookup plus crosses through `pivot`
    pub fn with_pivot(inner: R, pivot: Currency) -> Self {
        Self {
            inner,
            auto_inverse: true,
            pivot: Some(pivot),
        }
    }

    pub fn with_config(inner: R, auto_inverse: bool, pivot: Option<Currency>) -> Self {
        Self {
            inner,
            auto_inverse,
            pivot,
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn pivot(&self) -> Option<Currency> {
        self.pivot
    }

    /// Direct rate, or the inverse of the opposite direction
    fn leg(&self, from: Currency, to: Currency) -> Option<f64> {
        if from == to {
            return Some(1.0);
        }
        self.inner
            .lookup(from, to)
            .or_else(|| self.try_inverse(from, to))
    }

    fn try_inverse(&self, from: Currency, to: Currency) -> Option<f64> {
        if !self.auto_inverse {
            return None;
        }
        self.inner.lookup(to, from).map(|rate| 1.0 / rate)
    }

    /// from -> pivot -> to
    fn try_cross_rate(&self, from: Currency, to: Currency) -> Option<f64> {
        let pivot = self.pivot?;
        if pivot == from || pivot == to {
            return None;
        }
        let from_to_pivot = self.leg(from, pivot)?;
        let pivot_to_to = self.leg(pivot, to)?;
        Some(from_to_pivot * pivot_to_to)
    }
}

impl<R: RateReader> RateReader for DerivedRates<R> {
    fn lookup(&self, from: Currency, to: Currency) -> Option<f64> {
        if let Some(rate) = self.inner.lookup(from, to) {
            return Some(rate);
        }

        if let Some(rate) = self.try_inverse(from, to) {
            log::debug!("Derived {}/{} as inverse: {:.6}", from, to, rate);
            return Some(rate);
        }

        if let Some(rate) = self.try_cross_rate(from, to) {
            log::debug!("Derived {}/{} as cross rate: {:.6}", from, to, rate);
            return Some(rate);
        }

        None
    }
}
