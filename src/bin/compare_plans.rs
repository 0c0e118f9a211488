//! Compare competing mortgage plans side by side
//!
//! Runs a set of sample plans in parallel and prints them ranked by total
//! borrower cost.

use loan_engine::{LoanPlan, LoanSpec, PrepaymentRequest, RateTable, ScenarioRunner};
use rayon::prelude::*;
use std::time::Instant;

/// 900M minor units over 20 years
const PRINCIPAL: i64 = 900_000_000;
const TERM_MONTHS: u32 = 240;

fn sample_plans() -> Vec<LoanPlan> {
    // Flat offer: one rate for the whole term
    let flat = LoanSpec::new(PRINCIPAL, TERM_MONTHS, RateTable::flat(10.5))
        .expect("valid flat spec");

    // Teaser offer: 7.9% for the first year, floating 11.5% afterwards
    let teaser = LoanSpec::new(
        PRINCIPAL,
        TERM_MONTHS,
        RateTable::new(vec![7.9, 7.9, 11.5]).expect("non-empty rate table"),
    )
    .expect("valid teaser spec");

    // Lump-sum repayment once the teaser period ends, 2% fee
    let exit_teaser_early = vec![PrepaymentRequest::new(12, 300_000_000, 2.0)
        .expect("valid prepayment")];

    vec![
        LoanPlan::new("Flat 10.5%", flat.clone()),
        LoanPlan::new("Teaser 7.9% -> 11.5%", teaser.clone()),
        LoanPlan::new("Flat 10.5% + prepay M12", flat)
            .with_prepayments(exit_teaser_early.clone()),
        LoanPlan::new("Teaser + prepay M12", teaser).with_prepayments(exit_teaser_early),
    ]
}

fn main() {
    env_logger::init();

    let plans = sample_plans();
    println!("Comparing {} loan plans...", plans.len());

    let start = Instant::now();
    let runner = ScenarioRunner::new();

    // Plans are independent; fan them out
    let results: Vec<_> = plans.par_iter().map(|plan| runner.run(plan)).collect();
    log::info!("simulated {} plans in {:?}", results.len(), start.elapsed());

    let ranked = runner.rank_by_total_cost(results);

    println!(
        "{:>28} {:>8} {:>16} {:>16} {:>16} {:>12}",
        "Plan", "Months", "Total Paid", "Interest", "Prepaid", "Fees"
    );
    println!("{}", "-".repeat(102));

    for result in &ranked {
        let t = &result.totals;
        println!(
            "{:>28} {:>8} {:>16} {:>16} {:>16} {:>12}",
            result.name, t.months, t.total_payment, t.total_interest, t.total_prepayment, t.total_fee
        );
    }

    let best = &ranked[0];
    let worst = ranked.last().expect("at least one plan");
    println!(
        "\nCheapest: {} (saves {} vs {})",
        best.name,
        worst.totals.total_cost() - best.totals.total_cost(),
        worst.name
    );
}
