//! Response shapes for the stock endpoints.
//!
//! Normalization from provider models to the wire contract happens here:
//! field renames, the last-5 truncation for history, and the first-10
//! truncation plus total count for search. All functions are pure.

use serde::Serialize;
use stockboard_market_data::{DailyBar, SearchHit, StockQuote};

use crate::api::shared::iso_timestamp;

pub const DATA_SOURCE: &str = "yahoo-finance";

/// Number of trailing daily bars returned by the stock endpoint. The
/// provider window may cover more bars around weekends and holidays.
pub const HISTORY_DAYS: usize = 5;

/// Maximum search results returned to the client.
pub const MAX_SEARCH_RESULTS: usize = 10;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDataResponse {
    pub symbol: String,
    pub timestamp: String,
    pub quote: QuoteDto,
    pub historical: Vec<HistoricalDayDto>,
    pub data_source: &'static str,
    pub function_name: &'static str,
}

/// Quote fields in the dashboard's wire names. Fields the provider omitted
/// are left out of the payload; the dashboard renders them as a dash.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_market_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_market_change: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_market_change_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_market_previous_close: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_market_open: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_market_day_high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_market_day_low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_market_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
}

#[derive(Serialize)]
pub struct HistoricalDayDto {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub timestamp: String,
    pub results: Vec<SearchHitDto>,
    pub total_results: usize,
    pub data_source: &'static str,
    pub function_name: &'static str,
}

/// Search hit in the dashboard's wire names (`shortname`/`longname` are
/// lowercase single words on the wire).
#[derive(Serialize)]
pub struct SearchHitDto {
    pub symbol: String,
    #[serde(rename = "shortname", skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(rename = "longname", skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(rename = "quoteType", skip_serializing_if = "Option::is_none")]
    pub quote_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
}

pub fn stock_data_response(
    symbol: &str,
    quote: &StockQuote,
    bars: &[DailyBar],
) -> StockDataResponse {
    StockDataResponse {
        symbol: symbol.to_uppercase(),
        timestamp: iso_timestamp(),
        quote: quote_dto(quote),
        historical: last_days(bars, HISTORY_DAYS),
        data_source: DATA_SOURCE,
        function_name: "stockData",
    }
}

fn quote_dto(quote: &StockQuote) -> QuoteDto {
    QuoteDto {
        regular_market_price: quote.price,
        regular_market_change: quote.change,
        regular_market_change_percent: quote.change_percent,
        regular_market_previous_close: quote.previous_close,
        regular_market_open: quote.open,
        regular_market_day_high: quote.day_high,
        regular_market_day_low: quote.day_low,
        regular_market_volume: quote.volume,
        market_cap: quote.market_cap,
        short_name: quote.short_name.clone(),
        long_name: quote.long_name.clone(),
        currency: quote.currency.clone(),
        exchange: quote.exchange.clone(),
    }
}

/// Last `count` bars in their original ascending order, dates reduced to
/// plain `YYYY-MM-DD`.
fn last_days(bars: &[DailyBar], count: usize) -> Vec<HistoricalDayDto> {
    let skip = bars.len().saturating_sub(count);
    bars[skip..]
        .iter()
        .map(|bar| HistoricalDayDto {
            date: bar.timestamp.format("%Y-%m-%d").to_string(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        })
        .collect()
}

pub fn search_response(query: &str, hits: &[SearchHit]) -> SearchResponse {
    SearchResponse {
        query: query.to_string(),
        timestamp: iso_timestamp(),
        results: hits
            .iter()
            .take(MAX_SEARCH_RESULTS)
            .map(search_hit_dto)
            .collect(),
        total_results: hits.len(),
        data_source: DATA_SOURCE,
        function_name: "stockSearch",
    }
}

fn search_hit_dto(hit: &SearchHit) -> SearchHitDto {
    SearchHitDto {
        symbol: hit.symbol.clone(),
        short_name: hit.short_name.clone(),
        long_name: hit.long_name.clone(),
        exchange: hit.exchange.clone(),
        quote_type: hit.quote_type.clone(),
        market: hit.market.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn bar(day: u32) -> DailyBar {
        DailyBar::new(
            Utc.with_ymd_and_hms(2026, 8, day, 13, 30, 0).unwrap(),
            100.0 + day as f64,
            101.0 + day as f64,
            99.0 + day as f64,
            100.5 + day as f64,
            1_000 * day as u64,
        )
    }

    #[test]
    fn test_last_days_truncates_to_trailing_five() {
        let bars: Vec<DailyBar> = (1..=7).map(bar).collect();
        let days = last_days(&bars, HISTORY_DAYS);
        assert_eq!(days.len(), 5);
        // Trailing bars in original ascending order
        assert_eq!(days[0].date, "2026-08-03");
        assert_eq!(days[4].date, "2026-08-07");
        for pair in days.windows(2) {
            assert!(pair[0].date <= pair[1].date);
        }
    }

    #[test]
    fn test_last_days_keeps_short_sequences() {
        let bars: Vec<DailyBar> = (1..=3).map(bar).collect();
        let days = last_days(&bars, HISTORY_DAYS);
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, "2026-08-01");
    }

    #[test]
    fn test_stock_data_response_uppercases_symbol() {
        let quote = StockQuote {
            symbol: "aapl".to_string(),
            price: Some(150.25),
            ..Default::default()
        };
        let response = stock_data_response("aapl", &quote, &[bar(3)]);
        assert_eq!(response.symbol, "AAPL");
        assert_eq!(response.function_name, "stockData");
        assert_eq!(response.data_source, DATA_SOURCE);
    }

    #[test]
    fn test_quote_dto_omits_absent_fields() {
        let quote = StockQuote {
            symbol: "AAPL".to_string(),
            price: Some(150.25),
            currency: Some("USD".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(quote_dto(&quote)).unwrap();
        assert_eq!(value["regularMarketPrice"], 150.25);
        assert_eq!(value["currency"], "USD");
        // Absent provider fields stay out of the payload, not zeroed
        assert!(value.get("marketCap").is_none());
        assert!(value.get("regularMarketVolume").is_none());
    }

    #[test]
    fn test_search_response_truncates_and_counts() {
        let hits: Vec<SearchHit> = (0..12)
            .map(|i| SearchHit {
                short_name: Some(format!("Company {}", i)),
                ..SearchHit::new(format!("SYM{}", i))
            })
            .collect();
        let response = search_response("Apple", &hits);
        assert_eq!(response.results.len(), MAX_SEARCH_RESULTS);
        assert_eq!(response.total_results, 12);
        assert_eq!(response.query, "Apple");
        assert_eq!(response.results[0].symbol, "SYM0");
    }

    #[test]
    fn test_search_hit_wire_names() {
        let hit = SearchHit {
            short_name: Some("Apple Inc.".to_string()),
            quote_type: Some("EQUITY".to_string()),
            ..SearchHit::new("AAPL")
        };
        let value = serde_json::to_value(search_hit_dto(&hit)).unwrap();
        assert_eq!(value["shortname"], "Apple Inc.");
        assert_eq!(value["quoteType"], "EQUITY");
        assert!(value.get("longname").is_none());
    }
}
