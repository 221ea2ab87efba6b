use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single daily OHLCV bar.
///
/// Bars come from the provider in ascending timestamp order; callers that
/// only want the trailing days truncate the sequence themselves.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DailyBar {
    /// Timestamp of the bar (session open, UTC)
    pub timestamp: DateTime<Utc>,

    /// Opening price
    pub open: f64,

    /// High price
    pub high: f64,

    /// Low price
    pub low: f64,

    /// Closing price
    pub close: f64,

    /// Trading volume
    pub volume: u64,
}

impl DailyBar {
    /// Create a full OHLCV bar.
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bar_new() {
        let timestamp = Utc.with_ymd_and_hms(2026, 8, 3, 13, 30, 0).unwrap();
        let bar = DailyBar::new(timestamp, 148.0, 152.0, 147.5, 150.25, 1_000_000);
        assert_eq!(bar.timestamp, timestamp);
        assert_eq!(bar.open, 148.0);
        assert_eq!(bar.close, 150.25);
        assert_eq!(bar.volume, 1_000_000);
    }
}
