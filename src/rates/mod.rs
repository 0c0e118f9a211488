//! Interest rate tables indexed by 6-month reset periods

pub mod loader;

use crate::error::LoanError;
use serde::{Deserialize, Serialize};

/// Number of months sharing one rate entry
pub const RATE_PERIOD_MONTHS: u32 = 6;

/// Annual interest rates by 6-month period
///
/// Period 0 covers months 1-6, period 1 covers months 7-12, and so on.
/// When the loan term outruns the table, the last configured rate persists
/// indefinitely. Operators are expected to supply enough periods to cover
/// the term; clamping keeps a short table from ever being an out-of-range
/// failure mid-simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Annual percentage rates, one entry per 6-month period
    rates: Vec<f64>,
}

impl RateTable {
    /// Create a rate table from per-period annual percentage rates
    pub fn new(rates: Vec<f64>) -> Result<Self, LoanError> {
        if rates.is_empty() {
            return Err(LoanError::EmptyRateTable);
        }
        Ok(Self { rates })
    }

    /// Create a single-period table holding one rate for the whole term
    pub fn flat(annual_pct: f64) -> Self {
        Self {
            rates: vec![annual_pct],
        }
    }

    /// 6-month period index containing the given 1-based month
    pub fn period_for_month(month: u32) -> usize {
        ((month.saturating_sub(1)) / RATE_PERIOD_MONTHS) as usize
    }

    /// Annual rate and period index in effect for a 1-based month
    ///
    /// The period index is clamped to the last configured entry.
    pub fn resolve(&self, month: u32) -> (f64, usize) {
        let period = Self::period_for_month(month).min(self.rates.len() - 1);
        (self.rates[period], period)
    }

    /// Number of configured periods
    pub fn periods(&self) -> usize {
        self.rates.len()
    }

    /// Number of months the configured periods cover before clamping begins
    pub fn months_covered(&self) -> u32 {
        self.rates.len() as u32 * RATE_PERIOD_MONTHS
    }
}
