use valuation_core::{FinancialSnapshot, ScenarioOutcome, ValuationAssumptions};

use crate::margin::value;

/// Conservative, Base and Aggressive presets, in that order.
pub fn default_scenarios() -> Vec<(String, ValuationAssumptions)> {
    vec![
        ("Conservative".to_string(), ValuationAssumptions::conservative()),
        ("Base".to_string(), ValuationAssumptions::base()),
        ("Aggressive".to_string(), ValuationAssumptions::aggressive()),
    ]
}

/// Value `snapshot` under each named scenario, in the order given.
///
/// A scenario that fails validation keeps its slot with the error attached;
/// the remaining scenarios are still computed.
pub fn run_scenarios<I, N>(snapshot: &FinancialSnapshot, scenarios: I) -> Vec<ScenarioOutcome>
where
    I: IntoIterator<Item = (N, ValuationAssumptions)>,
    N: Into<String>,
{
    scenarios
        .into_iter()
        .map(|(name, assumptions)| {
            let name = name.into();
            let result = value(snapshot, &assumptions);
            match &result {
                Ok(r) => tracing::debug!(
                    "Scenario {}: intrinsic value {:.4}/share, verdict {}",
                    name,
                    r.intrinsic_value_per_share,
                    r.verdict
                ),
                Err(e) => tracing::warn!("Scenario {} failed: {}", name, e),
            }
            ScenarioOutcome { name, result }
        })
        .collect()
}
