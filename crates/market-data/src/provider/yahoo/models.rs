//! Yahoo Finance API response models.
//!
//! These models parse the quoteSummary and search API responses. Numeric
//! values arrive as `{"raw": 123.45, "fmt": "123.45"}` objects, or as empty
//! objects when Yahoo has no data; only the raw value is used.

use serde::Deserialize;

/// Main response wrapper for quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResponse {
    pub quote_summary: YahooQuoteSummary,
}

/// Quote summary container.
/// Yahoo sends `"result": null` together with an error object for unknown
/// symbols; the null maps to `None` here.
#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummary {
    pub result: Option<Vec<YahooQuoteSummaryResult>>,
}

/// Individual result from quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResult {
    pub price: Option<YahooPriceData>,
    pub summary_detail: Option<YahooSummaryDetail>,
}

/// Price data from quoteSummary API
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooPriceData {
    pub symbol: Option<String>,
    pub currency: Option<String>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub exchange_name: Option<String>,
    pub regular_market_price: Option<YahooPriceDetail>,
    pub regular_market_change: Option<YahooPriceDetail>,
    pub regular_market_change_percent: Option<YahooPriceDetail>,
    pub regular_market_previous_close: Option<YahooPriceDetail>,
    pub regular_market_open: Option<YahooPriceDetail>,
    pub regular_market_day_high: Option<YahooPriceDetail>,
    pub regular_market_day_low: Option<YahooPriceDetail>,
    pub regular_market_volume: Option<YahooPriceDetail>,
    pub market_cap: Option<YahooPriceDetail>,
}

/// Price detail with raw and formatted values
#[derive(Debug, Deserialize, Clone)]
pub struct YahooPriceDetail {
    pub raw: Option<f64>,
    // Note: fmt field exists but we only use raw values
}

/// Summary detail data (financial metrics)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooSummaryDetail {
    pub market_cap: Option<YahooPriceDetail>,
}

/// Response wrapper for the symbol search API
#[derive(Debug, Deserialize)]
pub struct YahooSearchResponse {
    #[serde(default)]
    pub quotes: Vec<YahooSearchQuote>,
}

/// Individual quote entry from the search API.
/// Field names follow Yahoo's wire format: `shortname`/`longname` are
/// lowercase single words, the rest camelCase.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooSearchQuote {
    pub symbol: Option<String>,
    pub shortname: Option<String>,
    pub longname: Option<String>,
    pub exchange: Option<String>,
    pub quote_type: Option<String>,
    pub market: Option<String>,
    pub score: Option<f64>,
}
