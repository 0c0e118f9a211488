//! Scenario runner for comparing loan plans
//!
//! A plan bundles a loan spec with a prepayment strategy under a display
//! name. Plans are independent values with no shared mutable state, so an
//! outer caller can fan `run_plans` work out in parallel without extra
//! synchronization.

use crate::loan::{LoanSpec, PrepaymentRequest};
use crate::schedule::{AmortizationEngine, EngineConfig, Schedule, ScheduleTotals};
use serde::{Deserialize, Serialize};

/// A named loan scenario: one spec plus one prepayment strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPlan {
    /// Display name ("Plan A", "Bank X teaser offer", ...)
    pub name: String,

    /// The loan to simulate
    pub spec: LoanSpec,

    /// Prepayments to apply, in any order
    pub prepayments: Vec<PrepaymentRequest>,
}

impl LoanPlan {
    pub fn new(name: impl Into<String>, spec: LoanSpec) -> Self {
        Self {
            name: name.into(),
            spec,
            prepayments: Vec::new(),
        }
    }

    /// Attach a prepayment strategy to the plan
    pub fn with_prepayments(mut self, prepayments: Vec<PrepaymentRequest>) -> Self {
        self.prepayments = prepayments;
        self
    }
}

/// Outcome of one simulated plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub name: String,
    pub schedule: Schedule,
    pub totals: ScheduleTotals,
}

/// Runs loan plans through the engine with a shared configuration
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: EngineConfig,
}

impl ScenarioRunner {
    /// Create a runner with default engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner with explicit engine configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Simulate a single plan
    pub fn run(&self, plan: &LoanPlan) -> PlanResult {
        let engine = AmortizationEngine::with_config(plan.spec.clone(), self.config.clone());
        let result = engine.run(&plan.prepayments);

        PlanResult {
            name: plan.name.clone(),
            schedule: result.schedule,
            totals: result.totals,
        }
    }

    /// Simulate several plans sequentially
    pub fn run_plans(&self, plans: &[LoanPlan]) -> Vec<PlanResult> {
        plans.iter().map(|p| self.run(p)).collect()
    }

    /// Order results by what the borrower pays in total, cheapest first
    pub fn rank_by_total_cost(&self, mut results: Vec<PlanResult>) -> Vec<PlanResult> {
        results.sort_by_key(|r| r.totals.total_cost());
        results
    }
}
