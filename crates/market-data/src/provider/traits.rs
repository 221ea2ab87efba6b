//! Market data provider trait definitions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::MarketDataError;
use crate::models::{DailyBar, SearchHit, StockQuote};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source. The
/// HTTP layer holds the active provider behind this trait object, which is
/// also the seam test code uses to substitute canned data.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO". Used for logging and for
    /// error messages.
    fn id(&self) -> &'static str;

    /// Fetch the current quote snapshot for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The ticker symbol (e.g., "AAPL")
    ///
    /// # Returns
    ///
    /// The quote snapshot on success, or a `MarketDataError` on failure.
    /// Fields the provider omits are `None`, never zeroed.
    async fn get_quote(&self, symbol: &str) -> Result<StockQuote, MarketDataError>;

    /// Fetch daily OHLCV bars for a symbol over a date window.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The ticker symbol
    /// * `start` - Start of the window (inclusive)
    /// * `end` - End of the window (inclusive)
    ///
    /// # Returns
    ///
    /// Bars ordered by timestamp ascending. The provider may return more
    /// bars than trading days in the window; truncation is the caller's
    /// responsibility.
    async fn get_daily_history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DailyBar>, MarketDataError>;

    /// Search for symbols matching a free-text query.
    ///
    /// # Arguments
    ///
    /// * `query` - The search query (e.g., "AAPL", "Apple")
    ///
    /// # Returns
    ///
    /// The provider's full, untruncated result set.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, MarketDataError>;
}
