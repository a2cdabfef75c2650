use chrono::{DateTime, Utc};
use dcf_engine::{
    default_scenarios, project_cash_flows, run_scenarios, sensitivity_grid, SensitivityGrid,
};
use serde::Serialize;
use valuation_core::{
    DcfBreakdown, FinancialSnapshot, ScenarioOutcome, SnapshotKey, ValuationAssumptions,
};

use crate::config::ReportConfig;

/// FCF growth axis of the sensitivity table (5% to 30%)
const GROWTH_AXIS: [f64; 6] = [0.05, 0.10, 0.15, 0.20, 0.25, 0.30];
/// WACC axis of the sensitivity table (5% to 20%)
const DISCOUNT_AXIS: [f64; 7] = [0.05, 0.075, 0.10, 0.125, 0.15, 0.175, 0.20];

#[derive(Debug, Clone, Serialize)]
pub struct ValuationReport {
    pub ticker: String,
    pub fiscal_period: String,
    pub generated_at: DateTime<Utc>,
    pub snapshot: FinancialSnapshot,
    pub scenarios: Vec<ScenarioOutcome>,
    /// Year-by-year detail for the Base scenario
    pub base_case: Option<DcfBreakdown>,
    pub sensitivity: Option<SensitivityGrid>,
}

impl ValuationReport {
    pub fn failed_scenarios(&self) -> usize {
        self.scenarios.iter().filter(|s| !s.is_ok()).count()
    }
}

pub fn build_report(
    config: &ReportConfig,
    key: &SnapshotKey,
    snapshot: FinancialSnapshot,
) -> ValuationReport {
    let scenarios: Vec<(String, ValuationAssumptions)> = default_scenarios()
        .into_iter()
        .map(|(name, a)| (name, a.with_projection_years(config.projection_years)))
        .collect();
    let base = ValuationAssumptions::base().with_projection_years(config.projection_years);

    let base_case = match project_cash_flows(&snapshot, &base) {
        Ok(breakdown) => Some(breakdown),
        Err(e) => {
            tracing::warn!("Base case breakdown unavailable for {}: {}", key, e);
            None
        }
    };

    let sensitivity = config
        .include_sensitivity
        .then(|| sensitivity_grid(&snapshot, &base, &GROWTH_AXIS, &DISCOUNT_AXIS));

    ValuationReport {
        ticker: key.ticker.clone(),
        fiscal_period: key.fiscal_period.clone(),
        generated_at: Utc::now(),
        snapshot,
        scenarios: run_scenarios(&snapshot, scenarios),
        base_case,
        sensitivity,
    }
}
