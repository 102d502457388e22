//! Error types for wallet_fx

use thiserror::Error;

/// Main error type for wallet_fx
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("No FX rate configured for {from}/{to}")]
    UnknownCurrencyPair { from: String, to: String },

    #[error("Invalid FX rate for {pair}: {rate} (must be positive and finite)")]
    InvalidRate { pair: String, rate: f64 },

    #[error("Insufficient {currency} balance: required {required}, available {available}")]
    InsufficientFunds {
        currency: String,
        required: f64,
        available: f64,
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type alias for wallet_fx operations
pub type Result<T> = std::result::Result<T, WalletError>;
