//! Discounted cash flow valuation.
//!
//! Projects free cash flow over an explicit window, discounts it at WACC,
//! adds a Gordon-growth terminal value and reports the per-share intrinsic
//! value together with a margin-of-safety verdict. Every entry point is a
//! pure function of its inputs.

pub mod calculator;
pub mod margin;
pub mod scenarios;
pub mod sensitivity;
pub mod statements;
#[cfg(test)]
mod tests;

pub use calculator::{compute_intrinsic_value, project_cash_flows};
pub use margin::{evaluate, value};
pub use scenarios::{default_scenarios, run_scenarios};
pub use sensitivity::{sensitivity_grid, SensitivityGrid};
pub use statements::{free_cash_flow, snapshot_from_statements};

pub use valuation_core::{
    DcfBreakdown, FinancialSnapshot, ProjectedYear, ScenarioOutcome, ValuationAssumptions,
    ValuationError, ValuationResult, Verdict,
};
