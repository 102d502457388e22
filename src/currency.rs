//! Currency types and currency pairs

use crate::error::{Result, WalletError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported wallet currencies (ISO 4217 codes)
///
/// The set is closed: anything else is rejected at parse time with
/// [`WalletError::UnknownCurrency`] rather than mapped to a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// US Dollar
    USD,
    /// Euro
    EUR,
    /// Australian Dollar
    AUD,
}

impl Currency {
    /// Get ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::AUD => "AUD",
        }
    }

    /// Get currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::AUD => "A$",
        }
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            Currency::USD => "US Dollar",
            Currency::EUR => "Euro",
            Currency::AUD => "Australian Dollar",
        }
    }

    /// Parse from ISO code (case-insensitive, surrounding whitespace ignored)
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "AUD" => Ok(Currency::AUD),
            _ => Err(WalletError::UnknownCurrency(code.trim().to_string())),
        }
    }

    /// Get all supported currencies
    pub fn all() -> [Currency; 3] {
        [Currency::USD, Currency::EUR, Currency::AUD]
    }
}

impl FromStr for Currency {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self> {
        Currency::from_code(s)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Ordered currency pair used as a rate table key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CurrencyPair {
    pub from: Currency,
    pub to: Currency,
}

impl CurrencyPair {
    /// Create new currency pair
    pub fn new(from: Currency, to: Currency) -> Self {
        Self { from, to }
    }

    /// Get the inverse pair
    pub fn inverse(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }

    /// Snapshot key form, e.g. `USD_AUD`
    pub fn key(&self) -> String {
        format!("{}_{}", self.from, self.to)
    }

    /// Parse `USD_AUD`, `USD/AUD` or `USDAUD`
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let parts: Vec<&str> = if s.contains('_') {
            s.split('_').collect()
        } else if s.contains('/') {
            s.split('/').collect()
        } else if s.len() == 6 && s.is_ascii() {
            vec![&s[0..3], &s[3..6]]
        } else {
            return Err(WalletError::InvalidData(format!(
                "Invalid currency pair format: {}",
                s
            )));
        };

        if parts.len() != 2 {
            return Err(WalletError::InvalidData(format!(
                "Invalid currency pair format: {}",
                s
            )));
        }

        Ok(Self {
            from: Currency::from_code(parts[0])?,
            to: Currency::from_code(parts[1])?,
        })
    }
}

impl FromStr for CurrencyPair {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self> {
        CurrencyPair::parse(s)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}
