use valuation_core::{
    DcfBreakdown, FinancialSnapshot, ProjectedYear, ValuationAssumptions, ValuationError,
};

/// Intrinsic value per share for one snapshot under one set of assumptions.
///
/// Fails with `InvalidAssumptions` when WACC does not exceed terminal growth
/// or the horizon is empty, and with `InvalidSnapshot` for a non-positive
/// share count. Negative free cash flow flows straight through.
pub fn compute_intrinsic_value(
    snapshot: &FinancialSnapshot,
    assumptions: &ValuationAssumptions,
) -> Result<f64, ValuationError> {
    let horizon = checked_horizon(snapshot, assumptions)?;
    let projected_pv: f64 = projected_years(snapshot, assumptions, horizon)
        .map(|y| y.present_value)
        .sum();
    let (_, terminal_pv) = terminal_value(snapshot, assumptions, horizon);
    per_share(projected_pv + terminal_pv, snapshot)
}

/// Same calculation as [`compute_intrinsic_value`], keeping each year's
/// projected and discounted cash flow plus the terminal value.
pub fn project_cash_flows(
    snapshot: &FinancialSnapshot,
    assumptions: &ValuationAssumptions,
) -> Result<DcfBreakdown, ValuationError> {
    let horizon = checked_horizon(snapshot, assumptions)?;
    let years: Vec<ProjectedYear> = projected_years(snapshot, assumptions, horizon).collect();
    let projected_pv: f64 = years.iter().map(|y| y.present_value).sum();
    let (terminal_value, terminal_present_value) = terminal_value(snapshot, assumptions, horizon);
    let enterprise_value = projected_pv + terminal_present_value;
    let intrinsic_value_per_share = per_share(enterprise_value, snapshot)?;

    Ok(DcfBreakdown {
        years,
        terminal_value,
        terminal_present_value,
        enterprise_value,
        intrinsic_value_per_share,
    })
}

fn checked_horizon(
    snapshot: &FinancialSnapshot,
    assumptions: &ValuationAssumptions,
) -> Result<i32, ValuationError> {
    snapshot.validate()?;
    assumptions.validate()?;
    i32::try_from(assumptions.projection_years).map_err(|_| {
        ValuationError::InvalidAssumptions(format!(
            "projection horizon of {} years is out of range",
            assumptions.projection_years
        ))
    })
}

fn projected_years<'a>(
    snapshot: &'a FinancialSnapshot,
    assumptions: &'a ValuationAssumptions,
    horizon: i32,
) -> impl Iterator<Item = ProjectedYear> + 'a {
    let growth = 1.0 + assumptions.fcf_growth_rate;
    let discount = 1.0 + assumptions.discount_rate;
    (1..=horizon).map(move |t| {
        let free_cash_flow = snapshot.base_free_cash_flow() * growth.powi(t);
        ProjectedYear {
            year: t as u32,
            free_cash_flow,
            present_value: free_cash_flow / discount.powi(t),
        }
    })
}

/// Gordon-growth perpetuity on the final projected year, and its present value.
fn terminal_value(
    snapshot: &FinancialSnapshot,
    assumptions: &ValuationAssumptions,
    horizon: i32,
) -> (f64, f64) {
    let final_fcf = snapshot.base_free_cash_flow() * (1.0 + assumptions.fcf_growth_rate).powi(horizon);
    let tv = final_fcf * (1.0 + assumptions.terminal_growth_rate)
        / (assumptions.discount_rate - assumptions.terminal_growth_rate);
    let pv = tv / (1.0 + assumptions.discount_rate).powi(horizon);
    (tv, pv)
}

fn per_share(enterprise_value: f64, snapshot: &FinancialSnapshot) -> Result<f64, ValuationError> {
    let value = enterprise_value / snapshot.shares_outstanding();
    if !value.is_finite() {
        return Err(ValuationError::InvalidAssumptions(format!(
            "valuation is not finite ({}); growth or horizon too extreme",
            value
        )));
    }
    Ok(value)
}
