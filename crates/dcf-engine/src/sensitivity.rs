use serde::{Deserialize, Serialize};
use valuation_core::{FinancialSnapshot, ValuationAssumptions};

use crate::calculator::compute_intrinsic_value;

/// Intrinsic value across a growth x WACC grid.
///
/// `values[row][col]` is the value at `growth_rates[row]` and
/// `discount_rates[col]`; `None` marks a pair the calculator rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityGrid {
    pub growth_rates: Vec<f64>,
    pub discount_rates: Vec<f64>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl SensitivityGrid {
    pub fn get(&self, growth_idx: usize, discount_idx: usize) -> Option<f64> {
        self.values
            .get(growth_idx)
            .and_then(|row| row.get(discount_idx))
            .copied()
            .flatten()
    }

    /// Number of cells holding a value.
    pub fn valid_cells(&self) -> usize {
        self.values.iter().flatten().filter(|v| v.is_some()).count()
    }
}

/// Terminal growth and horizon come from `base`; growth and WACC vary.
pub fn sensitivity_grid(
    snapshot: &FinancialSnapshot,
    base: &ValuationAssumptions,
    growth_rates: &[f64],
    discount_rates: &[f64],
) -> SensitivityGrid {
    let values = growth_rates
        .iter()
        .map(|&fcf_growth_rate| {
            discount_rates
                .iter()
                .map(|&discount_rate| {
                    let assumptions = ValuationAssumptions {
                        fcf_growth_rate,
                        discount_rate,
                        ..*base
                    };
                    compute_intrinsic_value(snapshot, &assumptions).ok()
                })
                .collect()
        })
        .collect();

    SensitivityGrid {
        growth_rates: growth_rates.to_vec(),
        discount_rates: discount_rates.to_vec(),
        values,
    }
}
