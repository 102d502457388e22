//! # wallet_fx
//!
//! Currency conversion and transaction metrics behind a multi-currency
//! wallet dashboard.
//!
//! The core is two pure functions: [`fx::convert`] over a directed
//! [`fx::RateTable`], and [`carbon::estimate_footprint`] which derives a
//! banded carbon estimate from a transfer amount. Around them sit dated rate
//! snapshots, a wallet that can simulate exchanges, and immutable view state
//! for a presentation layer.
//!
//! ## Example
//!
//! ```rust
//! use wallet_fx::prelude::*;
//!
//! let table = RateTable::default_rates();
//! let eur = convert(100.0, Currency::USD, Currency::EUR, &table, MissingRatePolicy::Identity).unwrap();
//! assert_eq!(eur.amount(), 91.42);
//!
//! let carbon = estimate_footprint(500.0).unwrap();
//! assert_eq!(carbon.band, CarbonBand::High);
//! ```

pub mod amount;
pub mod carbon;
pub mod compliance;
pub mod config;
pub mod currency;
pub mod error;
pub mod fx;
pub mod seed;
pub mod transaction;
pub mod view;
pub mod wallet;

pub mod prelude {
    //! Commonly used types and functions
    pub use crate::carbon::{estimate_footprint, CarbonBand, CarbonEstimate, CarbonModel};
    pub use crate::compliance::ComplianceStatus;
    pub use crate::config::WalletConfig;
    pub use crate::currency::{Currency, CurrencyPair};
    pub use crate::error::{Result, WalletError};
    pub use crate::fx::{
        convert, convert_input, Conversion, ConversionRequest, DerivedRates, MissingRatePolicy,
        RateHistory, RateReader, RateTable,
    };
    pub use crate::transaction::{Transaction, TransactionStatus};
    pub use crate::view::{ConverterEvent, ConverterState};
    pub use crate::wallet::{ExchangeReceipt, ExchangeSettings, Wallet};
}
