//! Foreign exchange (FX) rates and currency conversion
//!
//! # Components
//!
//! - **base**: the [`RateReader`] trait and the missing-rate policy
//! - **table**: [`RateTable`], a directed pairwise rate table
//! - **derived**: [`DerivedRates`], inverse and pivot-cross lookup on top of a reader
//! - **history**: [`RateHistory`], dated rate snapshots
//! - **convert**: conversion of amounts through a reader
//!
//! # Example
//!
//! ```rust
//! use wallet_fx::currency::Currency;
//! use wallet_fx::fx::{convert, MissingRatePolicy, RateTable};
//!
//! let table = RateTable::default_rates();
//! let eur = convert(100.0, Currency::USD, Currency::EUR, &table, MissingRatePolicy::Identity).unwrap();
//! assert_eq!(eur.amount(), 91.42);
//! ```

pub mod base;
pub mod convert;
pub mod derived;
pub mod history;
pub mod table;

pub use base::{MissingRatePolicy, RateReader};
pub use convert::{
    convert, convert_amounts, convert_input, convert_request, total_value, Conversion,
    ConversionRequest,
};
pub use derived::DerivedRates;
pub use history::RateHistory;
pub use table::RateTable;
