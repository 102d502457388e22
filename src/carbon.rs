//! Synthetic carbon-footprint estimate for transfers
//!
//! `kilograms = base_factor + (amount / per_units) * amount_factor`, rounded to
//! 3 decimals (half away from zero), then bucketed into a [`CarbonBand`]. Band
//! thresholds are half-open: a value equal to a threshold falls in the higher band.

use crate::amount::{round_to, validate_amount, CARBON_DECIMALS};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed kg charged per transfer
pub const BASE_FACTOR: f64 = 0.05;
/// Kg charged per `PER_UNITS` of the source amount
pub const AMOUNT_FACTOR: f64 = 0.02;
pub const PER_UNITS: f64 = 100.0;
/// Lowest value in the Medium band
pub const MEDIUM_THRESHOLD: f64 = 0.05;
/// Lowest value in the High band
pub const HIGH_THRESHOLD: f64 = 0.15;

/// Qualitative carbon bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CarbonBand {
    Low,
    Medium,
    High,
}

impl fmt::Display for CarbonBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CarbonBand::Low => "Low",
            CarbonBand::Medium => "Medium",
            CarbonBand::High => "High",
        };
        f.write_str(label)
    }
}

/// Carbon estimate for one transfer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarbonEstimate {
    /// Estimated kg CO2, rounded to 3 decimals
    pub kilograms: f64,
    pub band: CarbonBand,
}

/// Parameters of the linear carbon model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarbonModel {
    pub base_factor: f64,
    pub amount_factor: f64,
    pub per_units: f64,
    pub medium_threshold: f64,
    pub high_threshold: f64,
}

impl Default for CarbonModel {
    fn default() -> Self {
        Self {
            base_factor: BASE_FACTOR,
            amount_factor: AMOUNT_FACTOR,
            per_units: PER_UNITS,
            medium_threshold: MEDIUM_THRESHOLD,
            high_threshold: HIGH_THRESHOLD,
        }
    }
}

impl CarbonModel {
    /// Estimate the footprint of moving `from_amount`
    ///
    /// Negative and non-finite amounts are rejected with `InvalidAmount`.
    pub fn estimate(&self, from_amount: f64) -> Result<CarbonEstimate> {
        let amount = validate_amount(from_amount)?;
        let raw = self.base_factor + (amount / self.per_units) * self.amount_factor;
        let kilograms = round_to(raw, CARBON_DECIMALS);

        Ok(CarbonEstimate {
            kilograms,
            band: self.band(kilograms),
        })
    }

    /// Band for an already rounded estimate; first matching rule wins
    pub fn band(&self, kilograms: f64) -> CarbonBand {
        if kilograms < self.medium_threshold {
            CarbonBand::Low
        } else if kilograms < self.high_threshold {
            CarbonBand::Medium
        } else {
            CarbonBand::High
        }
    }
}

/// Estimate with the standard model
///
/// # Example
/// ```
/// use wallet_fx::carbon::{estimate_footprint, CarbonBand};
///
/// let estimate = estimate_footprint(100.0).unwrap();
/// assert_eq!(estimate.kilograms, 0.07);
/// assert_eq!(estimate.band, CarbonBand::Medium);
/// ```
pub fn estimate_footprint(from_amount: f64) -> Result<CarbonEstimate> {
    CarbonModel::default().estimate(from_amount)
}
