//! Month-by-month amortization simulation

mod engine;
mod prepayment;
mod row;

pub use engine::{AmortizationEngine, EngineConfig};
pub use row::{LoanResult, Schedule, ScheduleRow, ScheduleTotals};
