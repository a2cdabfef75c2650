use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ValuationError {
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Invalid assumptions: {0}")]
    InvalidAssumptions(String),

    #[error("Invalid intrinsic value: {0} (margin of safety requires a positive value)")]
    InvalidIntrinsicValue(f64),

    #[error("Market data provider error: {0}")]
    Provider(String),
}
