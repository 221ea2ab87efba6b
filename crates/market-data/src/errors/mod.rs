//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// Every variant surfaces to the HTTP layer the same way: the request that
/// triggered it fails as a whole, carrying the provider's message. There is
/// no retry or fallback chain.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No data available for the requested date range.
    /// The symbol exists but has no bars in the specified period.
    #[error("No data for date range")]
    NoDataForRange,

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: INVALID");

        let error = MarketDataError::NoDataForRange;
        assert_eq!(format!("{}", error), "No data for date range");

        let error = MarketDataError::ProviderError {
            provider: "YAHOO".to_string(),
            message: "Internal server error".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Provider error: YAHOO - Internal server error"
        );
    }
}
