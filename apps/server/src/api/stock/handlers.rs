use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue};
use axum::response::IntoResponse;
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::api::shared::PrettyJson;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

use super::dto;

/// Fallback symbol when the request names none.
const DEFAULT_SYMBOL: &str = "AAPL";

/// Fallback search query when the request names none.
const DEFAULT_QUERY: &str = "Apple";

/// History window requested from the provider, in days back from now.
const HISTORY_WINDOW_DAYS: i64 = 5;

#[derive(Deserialize)]
pub struct SymbolQuery {
    symbol: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
}

/// Quote plus trailing daily history, merged into one payload.
///
/// The two provider calls run sequentially and all-or-nothing: the first
/// failure aborts the request with the stockData error envelope.
pub async fn stock_data(
    State(state): State<Arc<AppState>>,
    path: Option<Path<String>>,
    Query(query): Query<SymbolQuery>,
) -> ApiResult<impl IntoResponse> {
    let symbol = path
        .map(|Path(symbol)| symbol)
        .or(query.symbol)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SYMBOL.to_string());
    tracing::info!(%symbol, "Fetching stock data");

    let quote = state
        .provider
        .get_quote(&symbol)
        .await
        .map_err(ApiError::stock_data)?;

    let end = Utc::now();
    let start = end - Duration::days(HISTORY_WINDOW_DAYS);
    let bars = state
        .provider
        .get_daily_history(&symbol, start, end)
        .await
        .map_err(ApiError::stock_data)?;

    let body = dto::stock_data_response(&symbol, &quote, &bars);
    Ok((
        [(header::CACHE_CONTROL, HeaderValue::from_static("max-age=60"))],
        PrettyJson(body),
    ))
}

/// Symbol search, truncated to the first ten matches.
pub async fn stock_search(
    State(state): State<Arc<AppState>>,
    path: Option<Path<String>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<impl IntoResponse> {
    let term = path
        .map(|Path(term)| term)
        .or(query.q)
        .filter(|q| !q.is_empty())
        .unwrap_or_else(|| DEFAULT_QUERY.to_string());
    tracing::info!(query = %term, "Searching stocks");

    let hits = state
        .provider
        .search(&term)
        .await
        .map_err(ApiError::stock_search)?;

    let body = dto::search_response(&term, &hits);
    Ok((
        [(header::CACHE_CONTROL, HeaderValue::from_static("max-age=300"))],
        PrettyJson(body),
    ))
}
