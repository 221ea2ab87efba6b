use std::sync::Arc;
use std::time::Instant;

use stockboard_market_data::{MarketDataProvider, YahooProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    /// Market data provider backing the stock endpoints.
    pub provider: Arc<dyn MarketDataProvider>,
    /// Deployment environment name reported by the health endpoint.
    pub environment: String,
    /// Process start time, for uptime reporting.
    pub started_at: Instant,
}

pub fn init_tracing() {
    let log_format = std::env::var("SB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider: Arc<dyn MarketDataProvider> = Arc::new(YahooProvider::new().await?);
    Ok(Arc::new(AppState {
        provider,
        environment: config.environment.clone(),
        started_at: Instant::now(),
    }))
}
