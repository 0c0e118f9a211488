//! Prepayment application with cascading recomputation
//!
//! A prepayment lands after the regular payment of its month has posted. It
//! reduces that month's closing balance, and every later row is then
//! recomputed against the carried balance over the months originally
//! remaining: the loan still targets its original maturity unless the
//! balance reaches zero first, in which case the schedule is truncated.

use super::engine::{compute_row, round_to_unit};
use super::row::Schedule;
use crate::loan::{LoanSpec, Money, PrepaymentRequest};

/// Apply prepayment requests in increasing month order
///
/// Requests whose month falls beyond the live schedule are skipped: an
/// earlier prepayment may already have shortened the loan, so this is a
/// policy no-op rather than an error. Requests sharing a month merge
/// additively on the row, each one clamped against the balance left by the
/// one before it.
pub(super) fn apply(
    spec: &LoanSpec,
    mut schedule: Schedule,
    requests: &[PrepaymentRequest],
) -> (Schedule, Money) {
    let mut ordered: Vec<&PrepaymentRequest> = requests
        .iter()
        .filter(|r| r.month >= 1 && r.month as usize <= schedule.len())
        .collect();
    // Stable sort: requests sharing a month keep their list order
    ordered.sort_by_key(|r| r.month);

    let mut total_fee: Money = 0;

    for request in ordered {
        let at = request.month as usize;
        if at > schedule.len() {
            // An earlier request truncated the schedule past this month
            log::debug!(
                "skipping prepayment at month {}: schedule now ends at month {}",
                request.month,
                schedule.len()
            );
            continue;
        }

        // Balance before this prepayment, after the month's regular payment
        let balance_before = schedule.rows[at - 1].closing_balance;
        let fee = round_to_unit(balance_before as f64 * request.fee_rate_pct / 100.0);
        let paid = request.amount.min(balance_before);
        let new_balance = balance_before - paid;

        let row = &mut schedule.rows[at - 1];
        row.closing_balance = new_balance;
        row.prepayment_amount += paid;
        row.prepayment_fee += fee;
        row.total_payment += paid + fee;
        total_fee += fee;

        log::debug!(
            "prepayment at month {}: paid {} (fee {}), balance {} -> {}",
            request.month,
            paid,
            fee,
            balance_before,
            new_balance
        );

        cascade(spec, &mut schedule, at, new_balance);
    }

    (schedule, total_fee)
}

/// Recompute every row from index `from` onward against `balance`
///
/// Each recomputed row starts from a fresh annuity split over the rows
/// originally remaining; any prepayment recorded on a cascaded row is wiped,
/// because it belongs to a request that is re-applied in its own later pass.
/// Truncates the schedule as fully repaid the moment the carried balance
/// reaches zero.
fn cascade(spec: &LoanSpec, schedule: &mut Schedule, from: usize, balance: Money) {
    let len = schedule.len();
    let mut balance = balance;

    for i in from..len {
        if balance <= 0 {
            log::debug!("loan fully repaid at month {}, truncating schedule", i);
            schedule.rows.truncate(i);
            return;
        }

        let month = i as u32 + 1;
        let remaining = (len - i) as u32;
        let row = compute_row(spec, month, balance, remaining);
        balance = row.closing_balance;
        schedule.rows[i] = row;
    }
}
