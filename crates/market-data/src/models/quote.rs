use serde::{Deserialize, Serialize};

/// Current quote snapshot for a symbol.
///
/// Numeric fields the provider omits stay `None` rather than defaulting to
/// zero; the dashboard renders missing values as a dash. The snapshot is
/// immutable per request and never persisted.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StockQuote {
    /// Symbol/ticker the quote was fetched for (e.g., "AAPL")
    pub symbol: String,

    /// Current trading price
    pub price: Option<f64>,

    /// Absolute change since the previous close
    pub change: Option<f64>,

    /// Percent change since the previous close
    pub change_percent: Option<f64>,

    /// Previous session's closing price
    pub previous_close: Option<f64>,

    /// Today's opening price
    pub open: Option<f64>,

    /// Intraday high
    pub day_high: Option<f64>,

    /// Intraday low
    pub day_low: Option<f64>,

    /// Trading volume
    pub volume: Option<f64>,

    /// Market capitalization
    pub market_cap: Option<f64>,

    /// Short display name (e.g., "Apple Inc.")
    pub short_name: Option<String>,

    /// Long display name (e.g., "Apple Inc.")
    pub long_name: Option<String>,

    /// Quote currency (e.g., "USD")
    pub currency: Option<String>,

    /// Exchange display name (e.g., "NasdaqGS")
    pub exchange: Option<String>,
}
