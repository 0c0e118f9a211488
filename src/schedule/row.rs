//! Schedule output structures

use crate::loan::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One simulated month of the payment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based month number, contiguous across the schedule
    pub month: u32,

    /// 6-month rate period this month falls in
    pub period_index: usize,

    /// Annual rate in effect for the month
    pub rate_annual_pct: f64,

    /// Calendar date of the payment, when the loan spec is dated
    pub payment_date: Option<NaiveDate>,

    /// Balance owed before this month's payment
    pub opening_balance: Money,

    /// Interest portion of the regular payment
    pub interest_amount: Money,

    /// Principal portion of the regular payment
    pub principal_amount: Money,

    /// Regular payment plus any prepayment and fee posted this month
    pub total_payment: Money,

    /// Balance owed after this month's payment and any prepayment
    pub closing_balance: Money,

    /// Early repayment applied after this month's regular payment
    pub prepayment_amount: Money,

    /// Fee charged on the prepayment
    pub prepayment_fee: Money,
}

impl ScheduleRow {
    /// Create an empty row for the given month
    pub fn new(month: u32) -> Self {
        Self {
            month,
            period_index: 0,
            rate_annual_pct: 0.0,
            payment_date: None,
            opening_balance: 0,
            interest_amount: 0,
            principal_amount: 0,
            total_payment: 0,
            closing_balance: 0,
            prepayment_amount: 0,
            prepayment_fee: 0,
        }
    }
}

/// Month-by-month payment schedule for one simulation run
///
/// Owned by exactly one run; rows are ordered by month and never reordered.
/// The schedule may be shorter than the loan term when a prepayment
/// extinguishes the balance early.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Monthly rows, month 1 first
    pub rows: Vec<ScheduleRow>,
}

impl Schedule {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Add a row at the end of the schedule
    pub fn add_row(&mut self, row: ScheduleRow) {
        self.rows.push(row);
    }

    /// Balance outstanding after the last simulated month
    pub fn final_balance(&self) -> Money {
        self.rows.last().map(|r| r.closing_balance).unwrap_or(0)
    }

    /// Derive summary totals; an empty schedule sums to all zeros
    pub fn summarize(&self) -> ScheduleTotals {
        let total_payment: Money = self.rows.iter().map(|r| r.total_payment).sum();
        let total_interest: Money = self.rows.iter().map(|r| r.interest_amount).sum();
        let total_principal: Money = self.rows.iter().map(|r| r.principal_amount).sum();
        let total_prepayment: Money = self.rows.iter().map(|r| r.prepayment_amount).sum();
        let total_fee: Money = self.rows.iter().map(|r| r.prepayment_fee).sum();

        ScheduleTotals {
            months: self.rows.len() as u32,
            total_payment,
            total_interest,
            total_principal,
            total_prepayment,
            total_fee,
        }
    }
}

/// Summary totals for a finished schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTotals {
    /// Effective payoff month (number of simulated rows)
    pub months: u32,
    pub total_payment: Money,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_prepayment: Money,
    pub total_fee: Money,
}

impl ScheduleTotals {
    /// Everything the borrower hands over: payments, prepayments, and fees
    /// are all folded into `total_payment` row by row
    pub fn total_cost(&self) -> Money {
        self.total_payment
    }
}

/// Finished schedule together with its totals
///
/// Totals are computed once when the run completes so callers never
/// re-derive them from row state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub schedule: Schedule,
    pub totals: ScheduleTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_schedule_sums_to_zero() {
        let totals = Schedule::new().summarize();
        assert_eq!(totals.months, 0);
        assert_eq!(totals.total_payment, 0);
        assert_eq!(totals.total_interest, 0);
        assert_eq!(totals.total_principal, 0);
        assert_eq!(totals.total_prepayment, 0);
        assert_eq!(totals.total_fee, 0);
    }

    #[test]
    fn test_summarize_sums_rows() {
        let mut schedule = Schedule::new();
        for month in 1..=3 {
            let mut row = ScheduleRow::new(month);
            row.interest_amount = 100;
            row.principal_amount = 900;
            row.total_payment = 1_000;
            schedule.add_row(row);
        }
        schedule.rows[1].prepayment_amount = 5_000;
        schedule.rows[1].prepayment_fee = 50;
        schedule.rows[1].total_payment += 5_050;

        let totals = schedule.summarize();
        assert_eq!(totals.months, 3);
        assert_eq!(totals.total_interest, 300);
        assert_eq!(totals.total_principal, 2_700);
        assert_eq!(totals.total_prepayment, 5_000);
        assert_eq!(totals.total_fee, 50);
        assert_eq!(totals.total_payment, 3_000 + 5_050);
        assert_eq!(totals.total_cost(), totals.total_payment);
    }
}
