//! Amount parsing and rounding rules
//!
//! All rounding is half away from zero (`f64::round` semantics): money is
//! rounded to 2 decimal places, carbon estimates to 3.

use crate::error::{Result, WalletError};

/// Decimal places used when displaying currency amounts
pub const MONEY_DECIMALS: u32 = 2;

/// Decimal places used for carbon estimates (kg)
pub const CARBON_DECIMALS: u32 = 3;

/// Above this magnitude an `f64` has no fractional digits left
const INTEGRAL_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52

/// Round `value` to `decimals` places, half away from zero
///
/// Values too large to carry a fraction are returned unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() || value.abs() >= INTEGRAL_LIMIT {
        return value;
    }
    scaled.round() / factor
}

/// Round to currency display precision
pub fn round_money(value: f64) -> f64 {
    round_to(value, MONEY_DECIMALS)
}

/// Validate that an amount is a finite, non-negative number
pub fn validate_amount(amount: f64) -> Result<f64> {
    if !amount.is_finite() {
        return Err(WalletError::InvalidAmount(format!(
            "amount must be a finite number, got {}",
            amount
        )));
    }
    if amount < 0.0 {
        return Err(WalletError::InvalidAmount(format!(
            "amount must not be negative, got {}",
            amount
        )));
    }
    Ok(amount)
}

/// Parse user-entered amount text
///
/// Empty input, non-numeric text, `NaN`/`inf` and negative values are all
/// rejected with [`WalletError::InvalidAmount`].
pub fn parse_amount(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(WalletError::InvalidAmount("amount is empty".to_string()));
    }

    let amount: f64 = trimmed
        .parse()
        .map_err(|_| WalletError::InvalidAmount(format!("'{}' is not a number", trimmed)))?;

    validate_amount(amount)
}

/// Format money with thousands separators, e.g. `12,847.35`
pub fn format_money(value: f64) -> String {
    let rounded = round_money(value);
    let sign = if rounded < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}
