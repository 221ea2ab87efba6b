use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::api::shared::{iso_timestamp, PrettyJson};

/// Error returned by API handlers.
///
/// Serializes to the fixed envelope the dashboard expects: a stable `error`
/// label per handler, the underlying message, a timestamp, and the name of
/// the handler that failed. Every failure maps to HTTP 500; an unknown
/// symbol is not distinguished from an outage.
#[derive(Debug, thiserror::Error)]
#[error("{function_name}: {message}")]
pub struct ApiError {
    pub error: &'static str,
    pub message: String,
    pub function_name: &'static str,
}

impl ApiError {
    pub fn stock_data(err: impl std::fmt::Display) -> Self {
        Self {
            error: "Failed to fetch stock data",
            message: err.to_string(),
            function_name: "stockData",
        }
    }

    pub fn stock_search(err: impl std::fmt::Display) -> Self {
        Self {
            error: "Failed to search stocks",
            message: err.to_string(),
            function_name: "stockSearch",
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    error: &'a str,
    message: &'a str,
    timestamp: String,
    function_name: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(function = self.function_name, "{}", self.message);
        let body = ErrorBody {
            error: self.error,
            message: &self.message,
            timestamp: iso_timestamp(),
            function_name: self.function_name,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, PrettyJson(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_data_error_shape() {
        let err = ApiError::stock_data("connection refused");
        assert_eq!(err.error, "Failed to fetch stock data");
        assert_eq!(err.function_name, "stockData");
        assert_eq!(err.message, "connection refused");
    }

    #[test]
    fn test_stock_search_error_shape() {
        let err = ApiError::stock_search("boom");
        assert_eq!(err.error, "Failed to search stocks");
        assert_eq!(err.function_name, "stockSearch");
    }
}
