//! Error message formatting and conversions

use wallet_fx::error::WalletError;

#[test]
fn test_invalid_amount_message() {
    let err = WalletError::InvalidAmount("'abc' is not a number".to_string());
    assert_eq!(err.to_string(), "Invalid amount: 'abc' is not a number");
}

#[test]
fn test_unknown_pair_message() {
    let err = WalletError::UnknownCurrencyPair {
        from: "EUR".to_string(),
        to: "AUD".to_string(),
    };
    assert_eq!(err.to_string(), "No FX rate configured for EUR/AUD");
}

#[test]
fn test_invalid_rate_message() {
    let err = WalletError::InvalidRate {
        pair: "USD_AUD".to_string(),
        rate: -1.5,
    };
    let msg = err.to_string();
    assert!(msg.contains("USD_AUD"));
    assert!(msg.contains("-1.5"));
}

#[test]
fn test_insufficient_funds_message() {
    let err = WalletError::InsufficientFunds {
        currency: "USD".to_string(),
        required: 600.0,
        available: 500.0,
    };
    let msg = err.to_string();
    assert!(msg.contains("Insufficient USD balance"));
    assert!(msg.contains("600"));
    assert!(msg.contains("500"));
}

#[test]
fn test_from_io_error() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "rates.json");
    let err: WalletError = io.into();
    assert!(matches!(err, WalletError::IoError(_)));
    assert!(err.to_string().starts_with("IO error"));
}

#[test]
fn test_from_json_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: WalletError = json_err.into();
    assert!(matches!(err, WalletError::SerdeError(_)));
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync + std::error::Error>() {}
    assert_send_sync::<WalletError>();
}
