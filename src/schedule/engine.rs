//! Core amortization engine for monthly payment schedules

use super::prepayment;
use super::row::{LoanResult, Schedule, ScheduleRow};
use crate::loan::{LoanSpec, Money, PrepaymentRequest};

/// Balance at or below this many minor units counts as paid off
pub(crate) const BALANCE_EPSILON: Money = 1;

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Whether prepayment requests are applied at all; when disabled the
    /// base schedule is returned untouched
    pub prepayments_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prepayments_enabled: true,
        }
    }
}

/// Main amortization engine
///
/// Drives the month-by-month simulation for one loan: base schedule
/// generation, prepayment application with cascading recomputation, and
/// summary aggregation. A run is a bounded, deterministic computation with
/// no I/O; independent engines share no state and may run in parallel.
pub struct AmortizationEngine {
    spec: LoanSpec,
    config: EngineConfig,
}

impl AmortizationEngine {
    /// Create an engine with default configuration
    pub fn new(spec: LoanSpec) -> Self {
        Self::with_config(spec, EngineConfig::default())
    }

    /// Create an engine with explicit configuration
    pub fn with_config(spec: LoanSpec, config: EngineConfig) -> Self {
        Self { spec, config }
    }

    /// The loan this engine simulates
    pub fn spec(&self) -> &LoanSpec {
        &self.spec
    }

    /// Generate the unmodified schedule with no prepayments
    ///
    /// The annuity payment is recomputed every month over the months still
    /// remaining, so a rate reset at a 6-month boundary is absorbed without
    /// moving the payoff month: the schedule always fully amortizes by
    /// `term_months`.
    pub fn generate_base_schedule(&self) -> Schedule {
        let mut schedule = Schedule::new();
        let mut balance = self.spec.principal;

        for month in 1..=self.spec.term_months {
            if balance <= BALANCE_EPSILON {
                log::debug!("balance extinguished before month {}, stopping early", month);
                break;
            }

            let remaining = self.spec.term_months - month + 1;
            let row = compute_row(&self.spec, month, balance, remaining);
            balance = row.closing_balance;
            schedule.add_row(row);
        }

        schedule
    }

    /// Apply prepayment requests to a schedule, returning the reworked
    /// schedule and the total fees charged
    ///
    /// Requests are stable-sorted by month and applied one at a time, each
    /// against the schedule state left by the previous one. Every row after
    /// a prepayment month is recomputed against the reduced balance, and the
    /// schedule is truncated if the balance is extinguished early.
    pub fn apply_prepayments(
        &self,
        schedule: Schedule,
        requests: &[PrepaymentRequest],
    ) -> (Schedule, Money) {
        if !self.config.prepayments_enabled || requests.is_empty() {
            return (schedule, 0);
        }
        prepayment::apply(&self.spec, schedule, requests)
    }

    /// Run the full simulation: base schedule, prepayments, totals
    pub fn run(&self, requests: &[PrepaymentRequest]) -> LoanResult {
        let base = self.generate_base_schedule();
        let (schedule, _total_fee) = self.apply_prepayments(base, requests);
        let totals = schedule.summarize();
        LoanResult { schedule, totals }
    }
}

/// Compute one schedule row for a month with `remaining_months` still owed
///
/// In the final scheduled month the balance is paid off in full, which
/// absorbs the minor-unit rounding accumulated across earlier rows.
pub(crate) fn compute_row(
    spec: &LoanSpec,
    month: u32,
    balance: Money,
    remaining_months: u32,
) -> ScheduleRow {
    let (rate_annual_pct, period_index) = spec.rate_table.resolve(month);
    let monthly_rate = rate_annual_pct / 12.0 / 100.0;

    let interest = round_to_unit(balance as f64 * monthly_rate);
    let principal = if remaining_months <= 1 {
        balance
    } else if monthly_rate == 0.0 {
        // Straight-line when the rate is zero; the annuity formula divides
        // by zero here
        balance / remaining_months as Money
    } else {
        let payment = round_to_unit(annuity_payment(balance as f64, monthly_rate, remaining_months));
        (payment - interest).clamp(0, balance)
    };

    let mut row = ScheduleRow::new(month);
    row.period_index = period_index;
    row.rate_annual_pct = rate_annual_pct;
    row.payment_date = spec.payment_date(month);
    row.opening_balance = balance;
    row.interest_amount = interest;
    row.principal_amount = principal;
    row.total_payment = interest + principal;
    row.closing_balance = balance - principal;
    row
}

/// Standard annuity payment over the remaining term
///
/// `balance * r * (1+r)^n / ((1+r)^n - 1)` for monthly rate `r` and `n`
/// months remaining. Callers handle `r == 0`.
pub(crate) fn annuity_payment(balance: f64, monthly_rate: f64, remaining_months: u32) -> f64 {
    let factor = (1.0 + monthly_rate).powi(remaining_months as i32);
    balance * monthly_rate * factor / (factor - 1.0)
}

/// Round a fractional amount to the nearest minor unit
pub(crate) fn round_to_unit(amount: f64) -> Money {
    amount.round() as Money
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateTable;
    use approx::assert_relative_eq;

    fn test_spec() -> LoanSpec {
        LoanSpec::new(1_000_000_000, 12, RateTable::flat(6.0)).unwrap()
    }

    fn assert_consistent(schedule: &Schedule) {
        for (i, row) in schedule.rows.iter().enumerate() {
            assert_eq!(row.month, i as u32 + 1, "months must be contiguous");
            assert_eq!(
                row.opening_balance,
                row.closing_balance + row.principal_amount + row.prepayment_amount,
                "row {} must balance",
                row.month
            );
            if let Some(next) = schedule.rows.get(i + 1) {
                assert_eq!(
                    row.closing_balance, next.opening_balance,
                    "row {} closing must carry into row {} opening",
                    row.month, next.month
                );
                assert!(
                    next.closing_balance <= row.closing_balance,
                    "balance must never increase"
                );
            }
        }
    }

    #[test]
    fn test_annuity_payment_repays_balance() {
        // The present value of the level payment stream must equal the
        // balance being amortized
        let balance = 1_000_000_000.0;
        let rate = 0.06 / 12.0;
        let payment = annuity_payment(balance, rate, 12);

        let pv: f64 = (1..=12).map(|m| payment / (1.0 + rate).powi(m)).sum();
        assert_relative_eq!(pv, balance, max_relative = 1e-10);
    }

    #[test]
    fn test_annuity_payment_increases_with_rate() {
        let low = annuity_payment(1_000_000_000.0, 0.06 / 12.0, 120);
        let high = annuity_payment(1_000_000_000.0, 0.09 / 12.0, 120);
        assert!(high > low);
    }

    #[test]
    fn test_base_schedule_flat_rate() {
        let engine = AmortizationEngine::new(test_spec());
        let schedule = engine.generate_base_schedule();

        assert_eq!(schedule.len(), 12);
        assert_consistent(&schedule);

        // Month 1 interest on the full principal at 6%/yr
        assert_eq!(schedule.rows[0].interest_amount, 5_000_000);
        assert_eq!(schedule.rows[0].opening_balance, 1_000_000_000);

        // Fully amortized by the end of the term
        assert_eq!(schedule.final_balance(), 0);

        let totals = schedule.summarize();
        assert_eq!(totals.total_principal, 1_000_000_000);
        assert_eq!(totals.total_payment - totals.total_interest, totals.total_principal);
    }

    #[test]
    fn test_base_schedule_level_payment() {
        // With a flat rate the recomputed annuity stays level apart from
        // minor-unit rounding
        let engine = AmortizationEngine::new(test_spec());
        let schedule = engine.generate_base_schedule();

        let first = schedule.rows[0].total_payment;
        for row in &schedule.rows {
            assert!((row.total_payment - first).abs() <= 2, "month {}", row.month);
        }
    }

    #[test]
    fn test_base_schedule_rate_reset() {
        // Rate doubles at the second 6-month period; the schedule must
        // still amortize exactly by month 12
        let spec = LoanSpec::new(
            1_000_000_000,
            12,
            RateTable::new(vec![6.0, 12.0]).unwrap(),
        )
        .unwrap();
        let engine = AmortizationEngine::new(spec);
        let schedule = engine.generate_base_schedule();

        assert_eq!(schedule.len(), 12);
        assert_consistent(&schedule);
        assert_eq!(schedule.rows[5].period_index, 0);
        assert_eq!(schedule.rows[5].rate_annual_pct, 6.0);
        assert_eq!(schedule.rows[6].period_index, 1);
        assert_eq!(schedule.rows[6].rate_annual_pct, 12.0);
        assert_eq!(schedule.final_balance(), 0);

        // The payment steps up with the rate
        assert!(schedule.rows[6].total_payment > schedule.rows[5].total_payment);
    }

    #[test]
    fn test_base_schedule_zero_rate() {
        let spec = LoanSpec::new(1_200, 12, RateTable::flat(0.0)).unwrap();
        let engine = AmortizationEngine::new(spec);
        let schedule = engine.generate_base_schedule();

        assert_eq!(schedule.len(), 12);
        assert_consistent(&schedule);
        for row in &schedule.rows {
            assert_eq!(row.interest_amount, 0);
            assert_eq!(row.principal_amount, 100);
        }
        assert_eq!(schedule.final_balance(), 0);
    }

    #[test]
    fn test_long_term_uses_clamped_rate() {
        // 30 months needs 5 periods; only 2 are configured
        let spec = LoanSpec::new(600_000_000, 30, RateTable::new(vec![6.0, 7.0]).unwrap())
            .unwrap();
        let engine = AmortizationEngine::new(spec);
        let schedule = engine.generate_base_schedule();

        assert_eq!(schedule.len(), 30);
        assert_consistent(&schedule);
        for row in &schedule.rows[6..] {
            assert_eq!(row.rate_annual_pct, 7.0);
            assert_eq!(row.period_index, 1);
        }
        assert_eq!(schedule.final_balance(), 0);
    }

    #[test]
    fn test_run_computes_totals_once() {
        let engine = AmortizationEngine::new(test_spec());
        let result = engine.run(&[]);

        assert_eq!(result.totals, result.schedule.summarize());
        assert_eq!(result.totals.months, 12);
        assert_eq!(result.totals.total_prepayment, 0);
        assert_eq!(result.totals.total_fee, 0);
    }

    #[test]
    fn test_dated_schedule_rows() {
        let spec = test_spec().with_first_payment_date(
            chrono::NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        );
        let engine = AmortizationEngine::new(spec);
        let schedule = engine.generate_base_schedule();

        assert_eq!(
            schedule.rows[0].payment_date,
            Some(chrono::NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())
        );
        assert_eq!(
            schedule.rows[11].payment_date,
            Some(chrono::NaiveDate::from_ymd_opt(2024, 12, 10).unwrap())
        );
    }
}
