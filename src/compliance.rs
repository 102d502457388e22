//! Minimal compliance screening for exchanges

use crate::currency::Currency;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source amounts above this need manual review
pub const DEFAULT_REVIEW_THRESHOLD: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    Clear,
    Review,
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceStatus::Clear => f.write_str("Clear"),
            ComplianceStatus::Review => f.write_str("Review"),
        }
    }
}

/// Screen an exchange of `amount` units of `from` into `to`
pub fn compliance_check(
    amount: f64,
    from: Currency,
    to: Currency,
    threshold: f64,
) -> ComplianceStatus {
    if amount > threshold {
        log::warn!(
            "Exchange of {} {} -> {} exceeds review threshold {}",
            amount,
            from,
            to,
            threshold
        );
        ComplianceStatus::Review
    } else {
        ComplianceStatus::Clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        let t = DEFAULT_REVIEW_THRESHOLD;
        let check = |amount| compliance_check(amount, Currency::USD, Currency::AUD, t);
        assert_eq!(check(200.0), ComplianceStatus::Clear);
        assert_eq!(check(10_000.0), ComplianceStatus::Clear);
        assert_eq!(check(10_000.01), ComplianceStatus::Review);
    }

    #[test]
    fn test_display() {
        assert_eq!(ComplianceStatus::Review.to_string(), "Review");
    }
}
