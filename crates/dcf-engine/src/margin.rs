use valuation_core::{
    FinancialSnapshot, ValuationAssumptions, ValuationError, ValuationResult, Verdict,
};

use crate::calculator::compute_intrinsic_value;

/// Margin of safety in percent of intrinsic value, with its verdict band.
///
/// `pct = (intrinsic - price) / intrinsic * 100`; undefined for a
/// non-positive intrinsic value.
pub fn evaluate(intrinsic_value: f64, current_price: f64) -> Result<(f64, Verdict), ValuationError> {
    if !intrinsic_value.is_finite() || intrinsic_value <= 0.0 {
        return Err(ValuationError::InvalidIntrinsicValue(intrinsic_value));
    }
    let pct = (intrinsic_value - current_price) / intrinsic_value * 100.0;
    Ok((pct, Verdict::classify(pct)))
}

/// Full valuation of one scenario: intrinsic value plus margin of safety.
///
/// Without a current price there is nothing to compare against, so the
/// margin is `None` and the verdict `Verdict::None`. The same holds when the
/// business is worth nothing per share.
pub fn value(
    snapshot: &FinancialSnapshot,
    assumptions: &ValuationAssumptions,
) -> Result<ValuationResult, ValuationError> {
    let intrinsic_value_per_share = compute_intrinsic_value(snapshot, assumptions)?;

    let (margin_of_safety_pct, verdict) = match snapshot.current_price() {
        Some(price) => match evaluate(intrinsic_value_per_share, price) {
            Ok((pct, verdict)) => (Some(pct), verdict),
            Err(ValuationError::InvalidIntrinsicValue(_)) => (None, Verdict::None),
            Err(e) => return Err(e),
        },
        None => (None, Verdict::None),
    };

    Ok(ValuationResult {
        intrinsic_value_per_share,
        margin_of_safety_pct,
        verdict,
    })
}
