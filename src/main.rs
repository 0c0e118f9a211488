//! Loan Engine CLI
//!
//! Simulates one loan schedule from command-line arguments, with optional
//! prepayments, and prints or exports the result.

use anyhow::{anyhow, bail};
use chrono::NaiveDate;
use clap::Parser;
use loan_engine::loan::loader::load_prepayments;
use loan_engine::rates::loader::load_rate_table;
use loan_engine::{AmortizationEngine, LoanSpec, PrepaymentRequest, RateTable};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "loan_engine",
    about = "Simulate a loan amortization schedule with optional prepayments"
)]
struct Args {
    /// Principal in minor units
    #[arg(long)]
    principal: i64,

    /// Loan term in months
    #[arg(long)]
    term_months: u32,

    /// Annual rates, one per 6-month period (e.g. 8.5,10.0,11.2)
    #[arg(long, value_delimiter = ',', conflicts_with = "rates_csv")]
    rates: Vec<f64>,

    /// Load per-period rates from a CSV file (period,annual_rate_pct)
    #[arg(long)]
    rates_csv: Option<PathBuf>,

    /// Load prepayments from a CSV file (month,amount,fee_rate_pct)
    #[arg(long)]
    prepayments_csv: Option<PathBuf>,

    /// Date of the first monthly payment (YYYY-MM-DD)
    #[arg(long)]
    first_payment: Option<NaiveDate>,

    /// Write the full schedule to a CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rate_table = match &args.rates_csv {
        Some(path) => load_rate_table(path)
            .map_err(|e| anyhow!("failed to load rate table from {}: {e}", path.display()))?,
        None => {
            if args.rates.is_empty() {
                bail!("provide per-period rates via --rates or --rates-csv");
            }
            RateTable::new(args.rates.clone())?
        }
    };

    let prepayments: Vec<PrepaymentRequest> = match &args.prepayments_csv {
        Some(path) => load_prepayments(path)
            .map_err(|e| anyhow!("failed to load prepayments from {}: {e}", path.display()))?,
        None => Vec::new(),
    };

    let mut spec = LoanSpec::new(args.principal, args.term_months, rate_table)?;
    if let Some(date) = args.first_payment {
        spec = spec.with_first_payment_date(date);
    }

    let engine = AmortizationEngine::new(spec);
    let result = engine.run(&prepayments);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Loan Engine v0.1.0");
    println!("==================\n");
    println!("Principal: {}", args.principal);
    println!("Term: {} months", args.term_months);
    println!("Prepayments: {}", prepayments.len());
    println!();

    // Print header
    println!(
        "{:>5} {:>6} {:>7} {:>16} {:>14} {:>16} {:>14} {:>12} {:>16} {:>16}",
        "Month", "Period", "Rate%", "Opening", "Interest", "Principal", "Prepay", "Fee", "Payment", "Closing"
    );
    println!("{}", "-".repeat(130));

    // Print first 24 months to console
    for row in result.schedule.rows.iter().take(24) {
        println!(
            "{:>5} {:>6} {:>7.2} {:>16} {:>14} {:>16} {:>14} {:>12} {:>16} {:>16}",
            row.month,
            row.period_index,
            row.rate_annual_pct,
            row.opening_balance,
            row.interest_amount,
            row.principal_amount,
            row.prepayment_amount,
            row.prepayment_fee,
            row.total_payment,
            row.closing_balance,
        );
    }

    if result.schedule.len() > 24 {
        println!("... ({} more months)", result.schedule.len() - 24);
    }

    // Write full schedule to CSV
    if let Some(path) = &args.output {
        let mut file = File::create(path)?;

        writeln!(
            file,
            "Month,Period,RatePct,PaymentDate,Opening,Interest,Principal,Prepayment,Fee,TotalPayment,Closing"
        )?;
        for row in &result.schedule.rows {
            writeln!(
                file,
                "{},{},{:.4},{},{},{},{},{},{},{},{}",
                row.month,
                row.period_index,
                row.rate_annual_pct,
                row.payment_date.map(|d| d.to_string()).unwrap_or_default(),
                row.opening_balance,
                row.interest_amount,
                row.principal_amount,
                row.prepayment_amount,
                row.prepayment_fee,
                row.total_payment,
                row.closing_balance,
            )?;
        }

        println!("\nFull schedule written to: {}", path.display());
    }

    // Print summary
    let totals = &result.totals;
    println!("\nSummary:");
    println!("  Payoff Month: {}", totals.months);
    println!("  Total Payment: {}", totals.total_payment);
    println!("  Total Interest: {}", totals.total_interest);
    println!("  Total Principal: {}", totals.total_principal);
    println!("  Total Prepayment: {}", totals.total_prepayment);
    println!("  Total Fees: {}", totals.total_fee);

    Ok(())
}
