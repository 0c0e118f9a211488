//! Loan inputs: spec, prepayment requests, and CSV loading

mod data;
pub mod loader;

pub use data::{LoanSpec, Money, PrepaymentRequest};
