//! Loan Engine - amortization and flexible-prepayment simulation for
//! mortgage plan comparison
//!
//! This library provides:
//! - Month-by-month annuity schedules with 6-month rate reset periods
//! - Flexible prepayment application with cascading recomputation
//! - Early-payoff truncation and summary aggregation
//! - Named-plan scenario comparison
//! - CSV loaders for rate tables and prepayment lists

pub mod error;
pub mod loan;
pub mod rates;
pub mod scenario;
pub mod schedule;

// Re-export commonly used types
pub use error::LoanError;
pub use loan::{LoanSpec, Money, PrepaymentRequest};
pub use rates::RateTable;
pub use scenario::{LoanPlan, PlanResult, ScenarioRunner};
pub use schedule::{AmortizationEngine, EngineConfig, LoanResult, Schedule, ScheduleTotals};
