//! Error types for loan construction and validation
//!
//! Validation happens once, when `LoanSpec`, `RateTable`, and
//! `PrepaymentRequest` values are constructed. The simulation loops assume
//! valid input and never fail mid-computation: balance clamping and early
//! payoff truncation are normal outcomes reported through the shape of the
//! returned schedule, not through errors.

use crate::loan::Money;
use thiserror::Error;

/// Errors raised when constructing loan inputs
#[derive(Debug, Error, PartialEq)]
pub enum LoanError {
    /// Principal must be a positive amount in minor units
    #[error("principal must be positive, got {0}")]
    NonPositivePrincipal(Money),

    /// Term must cover at least one month
    #[error("term must be at least 1 month, got {0}")]
    NonPositiveTerm(u32),

    /// A rate table needs at least one 6-month period entry
    #[error("rate table must contain at least one period rate")]
    EmptyRateTable,

    /// Prepayment amounts are clamped to the outstanding balance, but a
    /// negative request is rejected rather than silently adjusted
    #[error("prepayment at month {month} has negative amount {amount}")]
    NegativePrepaymentAmount { month: u32, amount: Money },

    /// Fee rates of zero are valid; negative rates are rejected
    #[error("prepayment at month {month} has negative fee rate {fee_rate_pct}")]
    NegativeFeeRate { month: u32, fee_rate_pct: f64 },
}
