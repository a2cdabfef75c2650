//! Snapshot providers for the valuation engine.
//!
//! Fetching, caching and failure handling for market data live here so the
//! engine itself can stay a pure function of its inputs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::collections::HashMap;
use valuation_core::{FinancialSnapshot, ValuationError};

pub use valuation_core::{MarketDataProvider, SnapshotKey};

const DEFAULT_CACHE_TTL_SECS: i64 = 300; // 5 minutes

/// Fixed set of snapshots, e.g. loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    snapshots: HashMap<SnapshotKey, FinancialSnapshot>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(mut self, key: SnapshotKey, snapshot: FinancialSnapshot) -> Self {
        self.snapshots.insert(key, snapshot);
        self
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[async_trait]
impl MarketDataProvider for StaticProvider {
    async fn fetch_snapshot(&self, key: &SnapshotKey) -> Result<FinancialSnapshot, ValuationError> {
        self.snapshots
            .get(key)
            .copied()
            .ok_or_else(|| ValuationError::Provider(format!("ticker not found: {}", key)))
    }
}

/// Internal cache entry with timestamp
struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
}

/// Memoizes another provider's snapshots per `(ticker, fiscal_period)`.
///
/// Only successful fetches are stored; an error is returned as-is and the
/// next call goes back to the inner provider.
pub struct CachedProvider<P> {
    inner: P,
    cache: DashMap<SnapshotKey, CacheEntry<FinancialSnapshot>>,
    ttl_secs: i64,
}

impl<P: MarketDataProvider> CachedProvider<P> {
    pub fn new(inner: P) -> Self {
        Self::with_ttl(inner, DEFAULT_CACHE_TTL_SECS)
    }

    pub fn with_ttl(inner: P, ttl_secs: i64) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
            ttl_secs,
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    pub fn invalidate(&self, key: &SnapshotKey) {
        self.cache.remove(key);
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: MarketDataProvider> MarketDataProvider for CachedProvider<P> {
    async fn fetch_snapshot(&self, key: &SnapshotKey) -> Result<FinancialSnapshot, ValuationError> {
        if let Some(entry) = self.cache.get(key) {
            let age = (Utc::now() - entry.cached_at).num_seconds();
            if age < self.ttl_secs {
                tracing::debug!("Snapshot cache hit for {} (age {}s)", key, age);
                return Ok(entry.data);
            }
        }

        let snapshot = match self.inner.fetch_snapshot(key).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Snapshot fetch failed for {}: {}", key, e);
                return Err(e);
            }
        };

        self.cache.insert(
            key.clone(),
            CacheEntry {
                data: snapshot,
                cached_at: Utc::now(),
            },
        );

        Ok(snapshot)
    }
}
