//! Wallet configuration
//!
//! Every field has a default so a partial (or empty) config file is valid.
//! The CLI reads this from TOML; the library only needs the deserialized value.

use crate::currency::Currency;
use crate::error::Result;
use crate::fx::{MissingRatePolicy, RateTable};
use crate::wallet::ExchangeSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Policy for display conversion when a pair has no rate
    pub missing_rate_policy: MissingRatePolicy,
    /// Currency used to total balances
    pub display_currency: Currency,
    /// Pivot for derived inverse/cross rates from snapshot files
    pub pivot_currency: Currency,
    /// Rate file (`.json` pair map or `.csv`) layered over the built-in rates
    pub rates_file: Option<PathBuf>,
    /// Inline rate overrides, applied last, e.g. `USD_EUR = 0.92`
    pub rates: RateTable,
    pub exchange: ExchangeSettings,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            missing_rate_policy: MissingRatePolicy::Identity,
            display_currency: Currency::USD,
            pivot_currency: Currency::AUD,
            rates_file: None,
            rates: RateTable::new(),
            exchange: ExchangeSettings::default(),
        }
    }
}

impl WalletConfig {
    /// Built-in rates, then `rates_file`, then inline overrides
    pub fn rate_table(&self) -> Result<RateTable> {
        let mut table = RateTable::default_rates();
        if let Some(path) = &self.rates_file {
            let from_file = RateTable::from_path(path)?;
            log::debug!("Loaded {} rates from {}", from_file.len(), path.display());
            table.merge(&from_file);
        }
        table.merge(&self.rates);
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = WalletConfig::default();
        assert_eq!(config.missing_rate_policy, MissingRatePolicy::Identity);
        assert_eq!(config.exchange.missing_rate_policy, MissingRatePolicy::Strict);
        assert_eq!(config.rate_table().unwrap(), RateTable::default_rates());
    }

    #[test]
    fn test_partial_config() {
        let config: WalletConfig = serde_json::from_str(
            r#"{"missing_rate_policy": "strict", "rates": {"USD_EUR": 0.92}}"#,
        )
        .unwrap();
        assert_eq!(config.missing_rate_policy, MissingRatePolicy::Strict);
        assert_eq!(config.pivot_currency, Currency::AUD);

        let table = config.rate_table().unwrap();
        assert_eq!(table.get(Currency::USD, Currency::EUR), Some(0.92));
        assert_eq!(table.get(Currency::USD, Currency::AUD), Some(1.52));
    }

    #[test]
    fn test_rates_file_layering() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "from,to,rate").unwrap();
        writeln!(file, "USD,AUD,1.55").unwrap();
        writeln!(file, "USD,EUR,0.95").unwrap();

        let mut config = WalletConfig {
            rates_file: Some(file.path().to_path_buf()),
            ..WalletConfig::default()
        };
        config.rates.insert(Currency::USD, Currency::EUR, 0.93).unwrap();

        let table = config.rate_table().unwrap();
        assert_eq!(table.get(Currency::USD, Currency::AUD), Some(1.55));
        assert_eq!(table.get(Currency::USD, Currency::EUR), Some(0.93));
    }

    #[test]
    fn test_missing_rates_file() {
        let config = WalletConfig {
            rates_file: Some(PathBuf::from("/nonexistent/rates.json")),
            ..WalletConfig::default()
        };
        assert!(config.rate_table().is_err());
    }
}
