use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use valuation_core::DEFAULT_PROJECTION_YEARS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    // Snapshot identity
    pub ticker: String,             // AAPL
    pub fiscal_period: String,      // FY

    // Snapshot figures (defaults are the placeholder figures used when no statement data is available)
    pub base_free_cash_flow: f64,   // 100000
    pub shares_outstanding: f64,    // 16000000
    pub current_price: Option<f64>,

    // Model settings
    pub projection_years: u32,      // 10
    pub include_sensitivity: bool,  // false
}

impl ReportConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            ticker: lookup("DCF_TICKER").unwrap_or_else(|| "AAPL".to_string()),
            fiscal_period: lookup("DCF_FISCAL_PERIOD").unwrap_or_else(|| "FY".to_string()),
            base_free_cash_flow: parse_or(&lookup, "DCF_BASE_FCF", 100_000.0)?,
            shares_outstanding: parse_or(&lookup, "DCF_SHARES_OUTSTANDING", 16_000_000.0)?,
            current_price: parse_opt(&lookup, "DCF_CURRENT_PRICE")?,
            projection_years: parse_or(&lookup, "DCF_PROJECTION_YEARS", DEFAULT_PROJECTION_YEARS)?,
            include_sensitivity: parse_or(&lookup, "DCF_INCLUDE_SENSITIVITY", false)?,
        };
        Ok(config)
    }
}

fn parse_opt<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            let value = raw
                .trim()
                .parse()
                .with_context(|| format!("{} has an invalid value: {:?}", key, raw))?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}
