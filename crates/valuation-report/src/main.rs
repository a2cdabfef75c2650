//! valuation-report: value one snapshot under the preset DCF scenarios.
//!
//! Reads the snapshot and model settings from the environment (or `.env`),
//! prints the report as JSON on stdout and logs to stderr.
//!
//! Usage:
//!   DCF_TICKER=AAPL DCF_BASE_FCF=108807000000 DCF_SHARES_OUTSTANDING=15204000000 \
//!     DCF_CURRENT_PRICE=227.5 cargo run -p valuation-report
//!   RUST_LOG_FORMAT=json DCF_INCLUDE_SENSITIVITY=true cargo run -p valuation-report

use anyhow::{Context, Result};
use market_data::{CachedProvider, MarketDataProvider, StaticProvider};
use valuation_core::{FinancialSnapshot, SnapshotKey};

mod config;
mod report;

use config::ReportConfig;
use report::build_report;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env, init tracing
    dotenvy::dotenv().ok();
    init_tracing();

    // 2. Load configuration
    let config = ReportConfig::from_env().context("Failed to load report configuration")?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Ticker: {} ({})", config.ticker, config.fiscal_period);
    tracing::info!("  Projection horizon: {} years", config.projection_years);

    // 3. Resolve the snapshot through the provider chain
    let key = SnapshotKey::new(&config.ticker, &config.fiscal_period);
    let configured = FinancialSnapshot::new(
        config.base_free_cash_flow,
        config.shares_outstanding,
        config.current_price,
    )
    .context("Configured financial snapshot is invalid")?;
    let provider = CachedProvider::new(StaticProvider::new().with_snapshot(key.clone(), configured));
    let snapshot = provider
        .fetch_snapshot(&key)
        .await
        .with_context(|| format!("Failed to fetch snapshot for {}", key))?;

    // 4. Value and emit
    let report = build_report(&config, &key, snapshot);
    let failed = report.failed_scenarios();
    if failed > 0 {
        tracing::warn!("{} of {} scenarios failed", failed, report.scenarios.len());
    } else {
        tracing::info!("Valued {} scenarios for {}", report.scenarios.len(), key);
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to serialize report")?
    );
    Ok(())
}

fn init_tracing() {
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "valuation_report=info,dcf_engine=info,market_data=info".into())
    };
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init();
    }
}
