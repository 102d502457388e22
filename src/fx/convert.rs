//! Currency conversion through a [`RateReader`]

use super::base::{MissingRatePolicy, RateReader};
use crate::amount::{parse_amount, round_money, validate_amount};
use crate::currency::{Currency, CurrencyPair};
use crate::error::{Result, WalletError};
use serde::{Deserialize, Serialize};

/// A single conversion input, built from the current view state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: Currency,
    pub to: Currency,
}

impl ConversionRequest {
    /// Create a request, rejecting negative or non-finite amounts
    pub fn new(amount: f64, from: Currency, to: Currency) -> Result<Self> {
        Ok(Self {
            amount: validate_amount(amount)?,
            from,
            to,
        })
    }

    /// Create a request from raw amount text
    pub fn parse(amount: &str, from: Currency, to: Currency) -> Result<Self> {
        Ok(Self {
            amount: parse_amount(amount)?,
            from,
            to,
        })
    }

    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.from, self.to)
    }
}

/// Outcome of a conversion
///
/// `raw` keeps full precision for chained computation; [`Conversion::amount`]
/// is the display value rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub request: ConversionRequest,
    /// Multiplier applied (1.0 for identity or fallback)
    pub rate: f64,
    /// Unrounded converted amount
    pub raw: f64,
}

impl Conversion {
    /// Converted amount at currency display precision
    pub fn amount(&self) -> f64 {
        round_money(self.raw)
    }

    pub fn from(&self) -> Currency {
        self.request.from
    }

    pub fn to(&self) -> Currency {
        self.request.to
    }
}

/// Convert `amount` from one currency to another
///
/// # Example
/// ```
/// use wallet_fx::currency::Currency;
/// use wallet_fx::fx::{convert, MissingRatePolicy, RateTable};
///
/// let table = RateTable::default_rates();
/// let result = convert(100.0, Currency::USD, Currency::EUR, &table, MissingRatePolicy::Identity).unwrap();
/// assert_eq!(result.amount(), 91.42);
/// ```
pub fn convert<R: RateReader + ?Sized>(
    amount: f64,
    from: Currency,
    to: Currency,
    rates: &R,
    policy: MissingRatePolicy,
) -> Result<Conversion> {
    let request = ConversionRequest::new(amount, from, to)?;
    convert_request(&request, rates, policy)
}

/// Convert a prepared request
pub fn convert_request<R: RateReader + ?Sized>(
    request: &ConversionRequest,
    rates: &R,
    policy: MissingRatePolicy,
) -> Result<Conversion> {
    validate_amount(request.amount)?;
    let rate = rates.get_rate(request.from, request.to, policy)?;
    let raw = request.amount * rate;
    if !raw.is_finite() {
        return Err(WalletError::InvalidAmount(format!(
            "{} {} overflows when converted to {}",
            request.amount, request.from, request.to
        )));
    }

    log::debug!(
        "Converted {} {} -> {} {} @ {}",
        request.amount,
        request.from,
        raw,
        request.to,
        rate
    );

    Ok(Conversion {
        request: *request,
        rate,
        raw,
    })
}

/// Convert user-entered amount text
///
/// Empty or non-numeric input yields `InvalidAmount`, never `NaN`.
pub fn convert_input<R: RateReader + ?Sized>(
    input: &str,
    from: Currency,
    to: Currency,
    rates: &R,
    policy: MissingRatePolicy,
) -> Result<Conversion> {
    let request = ConversionRequest::parse(input, from, to)?;
    convert_request(&request, rates, policy)
}

/// Batch convert multiple amounts into one currency
pub fn convert_amounts<R: RateReader + ?Sized>(
    rates: &R,
    amounts: &[(f64, Currency)],
    to: Currency,
    policy: MissingRatePolicy,
) -> Result<Vec<Conversion>> {
    amounts
        .iter()
        .map(|(amount, from)| convert(*amount, *from, to, rates, policy))
        .collect()
}

/// Total value of holdings in `to`, unrounded
pub fn total_value<R: RateReader + ?Sized>(
    rates: &R,
    holdings: &[(f64, Currency)],
    to: Currency,
    policy: MissingRatePolicy,
) -> Result<f64> {
    let converted = convert_amounts(rates, holdings, to, policy)?;
    let total: f64 = converted.iter().map(|c| c.raw).sum();
    if !total.is_finite() {
        return Err(WalletError::InvalidAmount(format!(
            "total value in {} overflows",
            to
        )));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::RateTable;
    use approx::assert_relative_eq;

    const ID: MissingRatePolicy = MissingRatePolicy::Identity;

    #[test]
    fn test_convert_default_table() {
        let table = RateTable::default_rates();
        let result = convert(100.0, Currency::USD, Currency::EUR, &table, ID).unwrap();
        assert_eq!(result.amount(), 91.42);
        assert_eq!(result.rate, 0.9142);
        assert_relative_eq!(result.raw, 91.42, epsilon = 1e-9);
    }

    #[test]
    fn test_identity_conversion_ignores_table() {
        let table = RateTable::new()
            .with_rate(Currency::USD, Currency::USD, 2.0)
            .unwrap();
        let result = convert(123.456, Currency::USD, Currency::USD, &table, ID).unwrap();
        assert_eq!(result.raw, 123.456);
        assert_eq!(result.rate, 1.0);
        assert_eq!(result.amount(), 123.46);
    }

    #[test]
    fn test_missing_pair_policies() {
        let table = RateTable::new();
        let result = convert(50.0, Currency::AUD, Currency::EUR, &table, ID).unwrap();
        assert_eq!(result.amount(), 50.0);

        let err = convert(
            50.0,
            Currency::AUD,
            Currency::EUR,
            &table,
            MissingRatePolicy::Strict,
        )
        .unwrap_err();
        assert!(matches!(err, WalletError::UnknownCurrencyPair { .. }));
    }

    #[test]
    fn test_invalid_amounts() {
        let table = RateTable::default_rates();
        for amount in [f64::NAN, f64::INFINITY, -1.0] {
            let err = convert(amount, Currency::USD, Currency::EUR, &table, ID).unwrap_err();
            assert!(matches!(err, WalletError::InvalidAmount(_)));
        }
    }

    #[test]
    fn test_convert_input() {
        let table = RateTable::default_rates();
        let result = convert_input(" 200 ", Currency::USD, Currency::AUD, &table, ID).unwrap();
        assert_eq!(result.amount(), 304.0);

        for input in ["", "abc", "1,000"] {
            let err = convert_input(input, Currency::USD, Currency::AUD, &table, ID).unwrap_err();
            assert!(matches!(err, WalletError::InvalidAmount(_)));
        }
    }

    #[test]
    fn test_overflowing_conversion_is_invalid_amount() {
        let table = RateTable::default_rates();
        let err = convert_input("1.7e308", Currency::USD, Currency::AUD, &table, ID).unwrap_err();
        assert!(matches!(err, WalletError::InvalidAmount(_)));

        // rate below 1 keeps the same amount finite
        let result = convert(1.7e308, Currency::USD, Currency::EUR, &table, ID).unwrap();
        assert!(result.raw.is_finite());
        assert!(result.amount().is_finite());

        let holdings = vec![(1.7e308, Currency::USD), (1.7e308, Currency::USD)];
        let err = total_value(&table, &holdings, Currency::USD, ID).unwrap_err();
        assert!(matches!(err, WalletError::InvalidAmount(_)));
    }

    #[test]
    fn test_convert_request_revalidates() {
        let table = RateTable::default_rates();
        let request = ConversionRequest {
            amount: f64::NAN,
            from: Currency::USD,
            to: Currency::EUR,
        };
        assert!(convert_request(&request, &table, ID).is_err());
    }

    #[test]
    fn test_total_value() {
        let table = RateTable::default_rates();
        let holdings = vec![
            (1000.0, Currency::AUD),
            (500.0, Currency::USD),
            (300.0, Currency::EUR),
        ];

        let converted = convert_amounts(&table, &holdings, Currency::USD, ID).unwrap();
        assert_eq!(converted.len(), 3);
        assert_eq!(converted[0].amount(), 660.0);
        assert_eq!(converted[1].amount(), 500.0);
        assert_eq!(converted[2].amount(), 328.14);

        let total = total_value(&table, &holdings, Currency::USD, ID).unwrap();
        assert_relative_eq!(total, 1488.14, epsilon = 1e-9);
    }
}
