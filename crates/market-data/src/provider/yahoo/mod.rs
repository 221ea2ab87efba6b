//! Yahoo Finance market data provider.
//!
//! Three operations, three Yahoo surfaces:
//! - Quote snapshots from the quoteSummary API (crumb/cookie authenticated)
//! - Daily history from the chart API via `yahoo_finance_api`
//! - Symbol search from the search API

mod models;

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use reqwest::header;
use time::OffsetDateTime;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{DailyBar, SearchHit, StockQuote};
use crate::provider::MarketDataProvider;

use models::{YahooQuoteSummaryResponse, YahooQuoteSummaryResult, YahooSearchResponse};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

lazy_static! {
    /// Global cache for Yahoo authentication crumb
    static ref YAHOO_CRUMB: RwLock<Option<CrumbData>> = RwLock::default();
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    client: reqwest::Client,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub async fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self {
            connector,
            client: reqwest::Client::new(),
        })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Check if we have a cached crumb
        {
            let guard = YAHOO_CRUMB.read().unwrap();
            if let Some(crumb) = guard.as_ref() {
                return Ok(crumb.clone());
            }
        }

        // Fetch new crumb
        self.fetch_crumb().await
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Step 1: Get cookie from fc.yahoo.com
        let response = self
            .client
            .get("https://fc.yahoo.com")
            .send()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: format!("Failed to get cookie: {}", e),
            })?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: "Failed to parse Yahoo cookie".to_string(),
            })?;

        // Step 2: Get crumb using cookie
        let crumb = self
            .client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: format!("Failed to get crumb: {}", e),
            })?
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: format!("Failed to read crumb: {}", e),
            })?;

        let crumb_data = CrumbData { cookie, crumb };

        // Cache it
        let mut guard = YAHOO_CRUMB.write().unwrap();
        *guard = Some(crumb_data.clone());

        Ok(crumb_data)
    }

    /// Clear the cached crumb (used when authentication fails)
    fn clear_crumb(&self) {
        let mut guard = YAHOO_CRUMB.write().unwrap();
        *guard = None;
    }

    // ========================================================================
    // Quote Fetching
    // ========================================================================

    /// Fetch the current quote snapshot from the quoteSummary API.
    async fn fetch_quote_summary(&self, symbol: &str) -> Result<StockQuote, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules=price,summaryDetail&crumb={}",
            encode(symbol),
            encode(&crumb.crumb)
        );

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: format!("Quote request failed: {}", e),
            })?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.clear_crumb();
            return Err(MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: "Yahoo authentication expired".to_string(),
            });
        }

        let data: YahooQuoteSummaryResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::ProviderError {
                    provider: "YAHOO".to_string(),
                    message: format!("Failed to parse quote response: {}", e),
                })?;

        let result = data
            .quote_summary
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(map_quote_summary(symbol, &result))
    }

    /// Convert chrono DateTime<Utc> to time::OffsetDateTime for the Yahoo API.
    fn chrono_to_offset_datetime(dt: DateTime<Utc>) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(dt.timestamp())
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}

// ============================================================================
// MarketDataProvider Implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        "YAHOO"
    }

    async fn get_quote(&self, symbol: &str) -> Result<StockQuote, MarketDataError> {
        debug!("Fetching quote for {} from Yahoo", symbol);
        self.fetch_quote_summary(symbol).await
    }

    async fn get_daily_history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DailyBar>, MarketDataError> {
        debug!(
            "Fetching daily history for {} from {} to {} from Yahoo",
            symbol,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );

        let start_time = Self::chrono_to_offset_datetime(start);
        let end_time = Self::chrono_to_offset_datetime(end);

        let response = self
            .connector
            .get_quote_history(symbol, start_time, end_time)
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::SymbolNotFound(symbol.to_string())
                } else {
                    MarketDataError::ProviderError {
                        provider: "YAHOO".to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        match response.quotes() {
            Ok(yahoo_quotes) => {
                let bars: Vec<DailyBar> = yahoo_quotes
                    .into_iter()
                    .filter_map(|q| {
                        let timestamp = Utc.timestamp_opt(q.timestamp as i64, 0).single();
                        match timestamp {
                            Some(timestamp) => {
                                Some(DailyBar::new(timestamp, q.open, q.high, q.low, q.close, q.volume))
                            }
                            None => {
                                warn!("Skipping bar with invalid timestamp: {}", q.timestamp);
                                None
                            }
                        }
                    })
                    .collect();

                if bars.is_empty() {
                    return Err(MarketDataError::NoDataForRange);
                }

                Ok(bars)
            }
            Err(yahoo::YahooError::NoQuotes) => {
                warn!(
                    "No historical bars returned for '{}' between {} and {}",
                    symbol,
                    start.format("%Y-%m-%d"),
                    end.format("%Y-%m-%d")
                );
                Err(MarketDataError::NoDataForRange)
            }
            Err(e) => Err(MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: e.to_string(),
            }),
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, MarketDataError> {
        debug!("Searching Yahoo for '{}'", query);

        let url = format!(
            "https://query1.finance.yahoo.com/v1/finance/search?q={}",
            encode(query)
        );

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: format!("Search request failed: {}", e),
            })?;

        let data: YahooSearchResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::ProviderError {
                    provider: "YAHOO".to_string(),
                    message: format!("Failed to parse search response: {}", e),
                })?;

        let hits = data
            .quotes
            .into_iter()
            .filter_map(|item| {
                // Some entries (news, screeners) carry no symbol; skip them
                let symbol = item.symbol.filter(|s| !s.is_empty())?;
                Some(SearchHit {
                    symbol,
                    short_name: item.shortname,
                    long_name: item.longname,
                    exchange: item.exchange,
                    quote_type: item.quote_type,
                    market: item.market,
                    score: item.score,
                })
            })
            .collect();

        Ok(hits)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Map a quoteSummary result to a StockQuote.
///
/// Market cap lives in the price module for equities and in summaryDetail
/// for some fund types; the price module wins when both are present.
fn map_quote_summary(symbol: &str, result: &YahooQuoteSummaryResult) -> StockQuote {
    let price = result.price.as_ref();
    let detail = result.summary_detail.as_ref();

    let price_field = |get: fn(&models::YahooPriceData) -> &Option<models::YahooPriceDetail>| {
        price.and_then(|p| get(p).as_ref()).and_then(|d| d.raw)
    };

    StockQuote {
        symbol: price
            .and_then(|p| p.symbol.clone())
            .unwrap_or_else(|| symbol.to_string()),
        price: price_field(|p| &p.regular_market_price),
        change: price_field(|p| &p.regular_market_change),
        change_percent: price_field(|p| &p.regular_market_change_percent),
        previous_close: price_field(|p| &p.regular_market_previous_close),
        open: price_field(|p| &p.regular_market_open),
        day_high: price_field(|p| &p.regular_market_day_high),
        day_low: price_field(|p| &p.regular_market_day_low),
        volume: price_field(|p| &p.regular_market_volume),
        market_cap: price_field(|p| &p.market_cap)
            .or_else(|| detail.and_then(|d| d.market_cap.as_ref()).and_then(|d| d.raw)),
        short_name: price.and_then(|p| p.short_name.clone()),
        long_name: price.and_then(|p| p.long_name.clone()),
        currency: price.and_then(|p| p.currency.clone()),
        exchange: price.and_then(|p| p.exchange_name.clone()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_from_json(json: &str) -> YahooQuoteSummaryResult {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_map_quote_summary_full() {
        let result = summary_from_json(
            r#"{
                "price": {
                    "symbol": "AAPL",
                    "currency": "USD",
                    "shortName": "Apple Inc.",
                    "longName": "Apple Inc.",
                    "exchangeName": "NasdaqGS",
                    "regularMarketPrice": {"raw": 150.25},
                    "regularMarketChange": {"raw": 1.5},
                    "regularMarketChangePercent": {"raw": 0.0101},
                    "regularMarketPreviousClose": {"raw": 148.75},
                    "regularMarketOpen": {"raw": 149.0},
                    "regularMarketDayHigh": {"raw": 151.0},
                    "regularMarketDayLow": {"raw": 148.5},
                    "regularMarketVolume": {"raw": 53000000},
                    "marketCap": {"raw": 2400000000000}
                }
            }"#,
        );

        let quote = map_quote_summary("AAPL", &result);
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.price, Some(150.25));
        assert_eq!(quote.change, Some(1.5));
        assert_eq!(quote.change_percent, Some(0.0101));
        assert_eq!(quote.previous_close, Some(148.75));
        assert_eq!(quote.open, Some(149.0));
        assert_eq!(quote.day_high, Some(151.0));
        assert_eq!(quote.day_low, Some(148.5));
        assert_eq!(quote.volume, Some(53_000_000.0));
        assert_eq!(quote.market_cap, Some(2_400_000_000_000.0));
        assert_eq!(quote.short_name.as_deref(), Some("Apple Inc."));
        assert_eq!(quote.currency.as_deref(), Some("USD"));
        assert_eq!(quote.exchange.as_deref(), Some("NasdaqGS"));
    }

    #[test]
    fn test_map_quote_summary_missing_numerics_stay_none() {
        // Empty {} detail objects and absent fields must not become zeros
        let result = summary_from_json(
            r#"{
                "price": {
                    "symbol": "EURUSD=X",
                    "currency": "USD",
                    "regularMarketPrice": {"raw": 1.0834},
                    "regularMarketVolume": {},
                    "marketCap": {}
                }
            }"#,
        );

        let quote = map_quote_summary("EURUSD=X", &result);
        assert_eq!(quote.price, Some(1.0834));
        assert_eq!(quote.volume, None);
        assert_eq!(quote.market_cap, None);
        assert_eq!(quote.change, None);
        assert!(quote.short_name.is_none());
    }

    #[test]
    fn test_map_quote_summary_market_cap_falls_back_to_detail() {
        let result = summary_from_json(
            r#"{
                "price": {
                    "symbol": "VWCE.DE",
                    "regularMarketPrice": {"raw": 112.5}
                },
                "summaryDetail": {
                    "marketCap": {"raw": 18000000000}
                }
            }"#,
        );

        let quote = map_quote_summary("VWCE.DE", &result);
        assert_eq!(quote.market_cap, Some(18_000_000_000.0));
    }

    #[test]
    fn test_map_quote_summary_symbol_falls_back_to_request() {
        let result = summary_from_json(r#"{"price": {"regularMarketPrice": {"raw": 10.0}}}"#);
        let quote = map_quote_summary("aapl", &result);
        assert_eq!(quote.symbol, "aapl");
    }

    #[test]
    fn test_chrono_to_offset_datetime() {
        let dt = Utc.with_ymd_and_hms(2026, 8, 3, 13, 30, 0).unwrap();
        let offset = YahooProvider::chrono_to_offset_datetime(dt);
        assert_eq!(offset.unix_timestamp(), dt.timestamp());
    }
}
