use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::ValuationError;

/// Explicit forecast horizon used by the preset scenarios.
pub const DEFAULT_PROJECTION_YEARS: u32 = 10;

/// Margin of safety (percent) above which a valuation counts as a strong buffer.
pub const STRONG_MARGIN_THRESHOLD_PCT: f64 = 15.0;

/// Raw inputs for one valuation, as supplied by a market data provider.
///
/// Fields are private so every instance has passed [`FinancialSnapshot::new`];
/// deserialization goes through the same checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotFields")]
pub struct FinancialSnapshot {
    base_free_cash_flow: f64,
    shares_outstanding: f64,
    current_price: Option<f64>,
}

#[derive(Deserialize)]
struct SnapshotFields {
    base_free_cash_flow: f64,
    shares_outstanding: f64,
    #[serde(default)]
    current_price: Option<f64>,
}

impl TryFrom<SnapshotFields> for FinancialSnapshot {
    type Error = ValuationError;

    fn try_from(fields: SnapshotFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.base_free_cash_flow,
            fields.shares_outstanding,
            fields.current_price,
        )
    }
}

impl FinancialSnapshot {
    /// Negative free cash flow is accepted (cash-burn phase); share count must be positive.
    pub fn new(
        base_free_cash_flow: f64,
        shares_outstanding: f64,
        current_price: Option<f64>,
    ) -> Result<Self, ValuationError> {
        let snapshot = Self {
            base_free_cash_flow,
            shares_outstanding,
            current_price,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<(), ValuationError> {
        if !self.base_free_cash_flow.is_finite() {
            return Err(ValuationError::InvalidSnapshot(format!(
                "base free cash flow must be finite, got {}",
                self.base_free_cash_flow
            )));
        }
        if !self.shares_outstanding.is_finite() || self.shares_outstanding <= 0.0 {
            return Err(ValuationError::InvalidSnapshot(format!(
                "shares outstanding must be positive, got {}",
                self.shares_outstanding
            )));
        }
        if let Some(price) = self.current_price {
            if !price.is_finite() || price <= 0.0 {
                return Err(ValuationError::InvalidSnapshot(format!(
                    "current price must be positive when supplied, got {}",
                    price
                )));
            }
        }
        Ok(())
    }

    pub fn base_free_cash_flow(&self) -> f64 {
        self.base_free_cash_flow
    }

    pub fn shares_outstanding(&self) -> f64 {
        self.shares_outstanding
    }

    pub fn current_price(&self) -> Option<f64> {
        self.current_price
    }
}

/// One scenario's DCF inputs. Rates are decimals (0.085 = 8.5%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationAssumptions {
    /// Annual compounding growth applied to FCF inside the projection window
    pub fcf_growth_rate: f64,
    /// WACC
    pub discount_rate: f64,
    /// Perpetual growth after the window; must stay below `discount_rate`
    pub terminal_growth_rate: f64,
    pub projection_years: u32,
}

impl ValuationAssumptions {
    pub fn new(
        fcf_growth_rate: f64,
        discount_rate: f64,
        terminal_growth_rate: f64,
        projection_years: u32,
    ) -> Result<Self, ValuationError> {
        let assumptions = Self {
            fcf_growth_rate,
            discount_rate,
            terminal_growth_rate,
            projection_years,
        };
        assumptions.validate()?;
        Ok(assumptions)
    }

    /// 5% growth, 9.5% WACC, 2% terminal growth
    pub fn conservative() -> Self {
        Self {
            fcf_growth_rate: 0.05,
            discount_rate: 0.095,
            terminal_growth_rate: 0.02,
            projection_years: DEFAULT_PROJECTION_YEARS,
        }
    }

    /// 10% growth, 8.5% WACC, 2.5% terminal growth
    pub fn base() -> Self {
        Self {
            fcf_growth_rate: 0.10,
            discount_rate: 0.085,
            terminal_growth_rate: 0.025,
            projection_years: DEFAULT_PROJECTION_YEARS,
        }
    }

    /// 18% growth, 7.5% WACC, 3% terminal growth
    pub fn aggressive() -> Self {
        Self {
            fcf_growth_rate: 0.18,
            discount_rate: 0.075,
            terminal_growth_rate: 0.03,
            projection_years: DEFAULT_PROJECTION_YEARS,
        }
    }

    pub fn with_projection_years(mut self, projection_years: u32) -> Self {
        self.projection_years = projection_years;
        self
    }

    pub fn validate(&self) -> Result<(), ValuationError> {
        let rates = [
            ("fcf growth rate", self.fcf_growth_rate),
            ("discount rate", self.discount_rate),
            ("terminal growth rate", self.terminal_growth_rate),
        ];
        for (label, rate) in rates {
            if !rate.is_finite() {
                return Err(ValuationError::InvalidAssumptions(format!(
                    "{} must be finite, got {}",
                    label, rate
                )));
            }
        }
        if self.projection_years < 1 {
            return Err(ValuationError::InvalidAssumptions(
                "projection horizon must be at least one year".to_string(),
            ));
        }
        if self.discount_rate <= self.terminal_growth_rate {
            return Err(ValuationError::InvalidAssumptions(format!(
                "discount rate {} must exceed terminal growth rate {}",
                self.discount_rate, self.terminal_growth_rate
            )));
        }
        if 1.0 + self.discount_rate <= 0.0 {
            return Err(ValuationError::InvalidAssumptions(format!(
                "discount rate {} leaves no positive discount factor",
                self.discount_rate
            )));
        }
        Ok(())
    }
}

/// Qualitative band for a margin of safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Margin above 15%
    Strong,
    /// Margin in (0%, 15%]
    Thin,
    /// No margin: at or above intrinsic value, or no price to compare against
    None,
}

impl Verdict {
    /// Partition of the real line: `> 15` strong, `(0, 15]` thin, `<= 0` none.
    pub fn classify(margin_of_safety_pct: f64) -> Self {
        if margin_of_safety_pct > STRONG_MARGIN_THRESHOLD_PCT {
            Verdict::Strong
        } else if margin_of_safety_pct > 0.0 {
            Verdict::Thin
        } else {
            Verdict::None
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Strong => write!(f, "Strong"),
            Verdict::Thin => write!(f, "Thin"),
            Verdict::None => write!(f, "None"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub intrinsic_value_per_share: f64,
    /// `None` when the snapshot carries no current price
    pub margin_of_safety_pct: Option<f64>,
    pub verdict: Verdict,
}

/// A single forecast year inside a [`DcfBreakdown`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedYear {
    pub year: u32,
    pub free_cash_flow: f64,
    pub present_value: f64,
}

/// Every intermediate figure behind one intrinsic value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfBreakdown {
    pub years: Vec<ProjectedYear>,
    pub terminal_value: f64,
    pub terminal_present_value: f64,
    pub enterprise_value: f64,
    pub intrinsic_value_per_share: f64,
}

/// Named entry of a scenario comparison. Serializes as `{name, result}` or `{name, error}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Result<ValuationResult, ValuationError>,
}

impl ScenarioOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn intrinsic_value(&self) -> Option<f64> {
        self.result
            .as_ref()
            .ok()
            .map(|r| r.intrinsic_value_per_share)
    }
}

impl Serialize for ScenarioOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ScenarioOutcome", 2)?;
        state.serialize_field("name", &self.name)?;
        match &self.result {
            Ok(result) => state.serialize_field("result", result)?,
            Err(err) => state.serialize_field("error", err)?,
        }
        state.end()
    }
}

/// Cache key for provider-side memoization of snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotKey {
    pub ticker: String,
    pub fiscal_period: String,
}

impl SnapshotKey {
    pub fn new(ticker: &str, fiscal_period: &str) -> Self {
        Self {
            ticker: ticker.trim().to_uppercase(),
            fiscal_period: fiscal_period.trim().to_string(),
        }
    }
}

impl std::fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.ticker, self.fiscal_period)
    }
}
