use valuation_core::{FinancialSnapshot, ValuationError};

/// Operating cash flow less capital expenditure.
///
/// Statements report capex with either sign; only its magnitude is subtracted.
pub fn free_cash_flow(operating_cash_flow: f64, capital_expenditure: f64) -> f64 {
    operating_cash_flow - capital_expenditure.abs()
}

/// Build a validated snapshot straight from cash flow statement line items.
pub fn snapshot_from_statements(
    operating_cash_flow: f64,
    capital_expenditure: f64,
    shares_outstanding: f64,
    current_price: Option<f64>,
) -> Result<FinancialSnapshot, ValuationError> {
    FinancialSnapshot::new(
        free_cash_flow(operating_cash_flow, capital_expenditure),
        shares_outstanding,
        current_price,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capex_sign_ignored() {
        assert_eq!(free_cash_flow(120_000.0, -20_000.0), 100_000.0);
        assert_eq!(free_cash_flow(120_000.0, 20_000.0), 100_000.0);
    }

    #[test]
    fn test_capex_heavy_goes_negative() {
        assert_eq!(free_cash_flow(50_000.0, -80_000.0), -30_000.0);
    }

    #[test]
    fn test_snapshot_from_statements() {
        let snapshot = snapshot_from_statements(118_254.0, -9_447.0, 15_204.0, Some(227.5)).unwrap();
        assert_eq!(snapshot.base_free_cash_flow(), 108_807.0);
        assert_eq!(snapshot.current_price(), Some(227.5));

        let err = snapshot_from_statements(1.0, 0.0, 0.0, None).unwrap_err();
        assert!(matches!(err, ValuationError::InvalidSnapshot(_)));
    }
}
