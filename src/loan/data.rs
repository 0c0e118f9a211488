//! Loan input value objects
//!
//! `LoanSpec` and `PrepaymentRequest` are validated once at construction and
//! never mutated afterward; the engine assumes valid input throughout.

use crate::error::LoanError;
use crate::rates::RateTable;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Currency amount in minor units. All money values are i64 minor units.
pub type Money = i64;

/// Immutable description of one loan to simulate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSpec {
    /// Amount borrowed, in minor units
    pub principal: Money,

    /// Loan term in months
    pub term_months: u32,

    /// Annual rates by 6-month reset period
    pub rate_table: RateTable,

    /// Calendar date of the first monthly payment, when the caller wants
    /// dated schedule rows
    #[serde(default)]
    pub first_payment_date: Option<NaiveDate>,
}

impl LoanSpec {
    /// Create a validated loan spec
    pub fn new(
        principal: Money,
        term_months: u32,
        rate_table: RateTable,
    ) -> Result<Self, LoanError> {
        if principal <= 0 {
            return Err(LoanError::NonPositivePrincipal(principal));
        }
        if term_months == 0 {
            return Err(LoanError::NonPositiveTerm(term_months));
        }
        Ok(Self {
            principal,
            term_months,
            rate_table,
            first_payment_date: None,
        })
    }

    /// Attach a first payment date, dating every schedule row
    pub fn with_first_payment_date(mut self, date: NaiveDate) -> Self {
        self.first_payment_date = Some(date);
        self
    }

    /// Calendar date of the payment for a 1-based schedule month
    pub fn payment_date(&self, month: u32) -> Option<NaiveDate> {
        self.first_payment_date
            .map(|d| d + Months::new(month.saturating_sub(1)))
    }
}

/// One requested early repayment
///
/// The amount may exceed the outstanding balance; the engine clamps it, so a
/// caller can say "pay off everything" with an arbitrarily large amount. A
/// request whose month lands beyond the live schedule (because an earlier
/// prepayment shortened the loan) is filtered at application time, not
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentRequest {
    /// 1-based schedule month the repayment lands in, after that month's
    /// regular payment has posted
    pub month: u32,

    /// Requested repayment amount in minor units
    pub amount: Money,

    /// Fee charged as a percentage of the balance outstanding at that month
    pub fee_rate_pct: f64,
}

impl PrepaymentRequest {
    /// Create a validated prepayment request
    pub fn new(month: u32, amount: Money, fee_rate_pct: f64) -> Result<Self, LoanError> {
        if amount < 0 {
            return Err(LoanError::NegativePrepaymentAmount { month, amount });
        }
        if fee_rate_pct < 0.0 {
            return Err(LoanError::NegativeFeeRate {
                month,
                fee_rate_pct,
            });
        }
        Ok(Self {
            month,
            amount,
            fee_rate_pct,
        })
    }
}
