//! Search result models for symbol lookup.

use serde::{Deserialize, Serialize};

/// A symbol/company candidate from a free-text search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchHit {
    /// Symbol/ticker (e.g., "AAPL", "SHOP.TO")
    pub symbol: String,

    /// Short display name (e.g., "Apple Inc.")
    pub short_name: Option<String>,

    /// Long display name (e.g., "Apple Inc.")
    pub long_name: Option<String>,

    /// Exchange code (e.g., "NMS")
    pub exchange: Option<String>,

    /// Asset type (e.g., "EQUITY", "ETF")
    pub quote_type: Option<String>,

    /// Market the symbol trades in (e.g., "us_market")
    pub market: Option<String>,

    /// Relevance score from the provider (higher = better match)
    pub score: Option<f64>,
}

impl SearchHit {
    /// Create a search hit with only the symbol set.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }
}
