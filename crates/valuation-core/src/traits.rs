use async_trait::async_trait;
use crate::{FinancialSnapshot, SnapshotKey, ValuationError};

/// Source of the raw inputs for a valuation (FCF, share count, last price).
///
/// Implementations own retries and caching; the engine only sees the
/// validated snapshot or the error.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_snapshot(&self, key: &SnapshotKey) -> Result<FinancialSnapshot, ValuationError>;
}
