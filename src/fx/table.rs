//! Directed pairwise FX rate table
//!
//! Rates are specified independently per direction: the table is neither
//! symmetric nor transitive. `USD_EUR` says nothing about `EUR_USD`.

use super::base::RateReader;
use crate::currency::{Currency, CurrencyPair};
use crate::error::{Result, WalletError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Directed rate table keyed by ordered currency pair
///
/// Serializes as a map of snapshot keys, e.g. `{"USD_AUD": 1.52}`.
///
/// # Example
/// ```
/// use wallet_fx::currency::Currency;
/// use wallet_fx::fx::{RateReader, RateTable};
///
/// let mut table = RateTable::new();
/// table.insert(Currency::USD, Currency::AUD, 1.52).unwrap();
///
/// assert_eq!(table.lookup(Currency::USD, Currency::AUD), Some(1.52));
/// assert_eq!(table.lookup(Currency::AUD, Currency::USD), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct RateTable {
    rates: BTreeMap<CurrencyPair, f64>,
}

#[derive(Debug, Deserialize)]
struct RateRecord {
    from: String,
    to: String,
    rate: f64,
}

impl RateTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            rates: BTreeMap::new(),
        }
    }

    /// The wallet's built-in mock rates
    pub fn default_rates() -> Self {
        let mut rates = BTreeMap::new();
        for (from, to, rate) in [
            (Currency::USD, Currency::EUR, 0.9142),
            (Currency::EUR, Currency::USD, 1.0938),
            (Currency::USD, Currency::AUD, 1.52),
            (Currency::AUD, Currency::USD, 0.66),
            (Currency::EUR, Currency::AUD, 1.66),
            (Currency::AUD, Currency::EUR, 0.60),
        ] {
            rates.insert(CurrencyPair::new(from, to), rate);
        }
        Self { rates }
    }

    /// Add or replace a single rate
    pub fn insert(&mut self, from: Currency, to: Currency, rate: f64) -> Result<()> {
        let pair = CurrencyPair::new(from, to);
        if !rate.is_finite() || rate <= 0.0 {
            return Err(WalletError::InvalidRate {
                pair: pair.key(),
                rate,
            });
        }
        self.rates.insert(pair, rate);
        Ok(())
    }

    /// Builder form of [`RateTable::insert`]
    pub fn with_rate(mut self, from: Currency, to: Currency, rate: f64) -> Result<Self> {
        self.insert(from, to, rate)?;
        Ok(self)
    }

    /// Remove a rate, returning it if it was present
    pub fn remove(&mut self, from: Currency, to: Currency) -> Option<f64> {
        self.rates.remove(&CurrencyPair::new(from, to))
    }

    /// Overlay every rate from `other` onto this table
    pub fn merge(&mut self, other: &RateTable) {
        for (pair, rate) in &other.rates {
            self.rates.insert(*pair, *rate);
        }
    }

    pub fn get(&self, from: Currency, to: Currency) -> Option<f64> {
        self.rates.get(&CurrencyPair::new(from, to)).copied()
    }

    /// Number of configured pairs
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Iterate over configured pairs in a stable order
    pub fn iter(&self) -> impl Iterator<Item = (CurrencyPair, f64)> + '_ {
        self.rates.iter().map(|(pair, rate)| (*pair, *rate))
    }

    /// Pairs of supported currencies with no configured rate
    pub fn missing_pairs(&self) -> Vec<CurrencyPair> {
        let mut missing = Vec::new();
        for from in Currency::all() {
            for to in Currency::all() {
                let pair = CurrencyPair::new(from, to);
                if !pair.is_identity() && !self.rates.contains_key(&pair) {
                    missing.push(pair);
                }
            }
        }
        missing
    }

    /// Build from snapshot keys (`"USD_AUD" -> 1.52`)
    pub fn from_pair_map<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        let mut table = Self::new();
        for (key, rate) in entries {
            let pair = CurrencyPair::parse(key)?;
            table.insert(pair.from, pair.to, *rate)?;
        }
        Ok(table)
    }

    /// Parse a JSON object of snapshot keys
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load rates from CSV data
    ///
    /// Expected header: `from,to,rate`
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut table = Self::new();
        for (line, record) in csv_reader.deserialize::<RateRecord>().enumerate() {
            let record = record?;
            let from = Currency::from_code(&record.from)?;
            let to = Currency::from_code(&record.to)?;
            table.insert(from, to, record.rate).map_err(|e| {
                WalletError::InvalidData(format!("row {}: {}", line + 1, e))
            })?;
        }

        log::debug!("Loaded {} FX rates from CSV", table.len());
        Ok(table)
    }

    /// Load a table from a `.json` or `.csv` file
    pub fn from_path(path: &Path) -> Result<Self> {
        let is_csv = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        if is_csv {
            let file = std::fs::File::open(path)?;
            Self::from_csv_reader(file)
        } else {
            let contents = std::fs::read_to_string(path)?;
            Self::from_json_str(&contents)
        }
    }
}

impl RateReader for RateTable {
    fn lookup(&self, from: Currency, to: Currency) -> Option<f64> {
        self.get(from, to)
    }
}

impl TryFrom<BTreeMap<String, f64>> for RateTable {
    type Error = WalletError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self> {
        Self::from_pair_map(&map)
    }
}

impl From<RateTable> for BTreeMap<String, f64> {
    fn from(table: RateTable) -> Self {
        table
            .rates
            .into_iter()
            .map(|(pair, rate)| (pair.key(), rate))
            .collect()
    }
}
