// =============================================================================
// Candle Model
// =============================================================================
//
// OHLCV candles as delivered by the quote fetcher, plus the per-request
// snapshot that wraps them.  Series are ordered oldest-first with strictly
// ascending timestamps; de-duplication happens upstream.

use serde::{Deserialize, Serialize};

/// A single OHLCV candle.  `timestamp` is epoch seconds (bucket open).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandlePoint {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: u64,
    pub timestamp: i64,
}

/// Symbol, request parameters and the fetched candle history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSnapshot {
    pub symbol: String,
    /// Range string passed to the quote provider, e.g. `"1mo"`, `"1y"`.
    #[serde(default)]
    pub requested_range: String,
    /// Interval string passed to the quote provider, e.g. `"1d"`, `"15m"`.
    #[serde(default)]
    pub requested_interval: String,
    #[serde(default)]
    pub series: Vec<CandlePoint>,
}

impl InstrumentSnapshot {
    pub fn new(
        symbol: impl Into<String>,
        requested_range: impl Into<String>,
        requested_interval: impl Into<String>,
        series: Vec<CandlePoint>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            requested_range: requested_range.into(),
            requested_interval: requested_interval.into(),
            series,
        }
    }

    /// A snapshot is usable only with a symbol and at least one candle.
    pub fn is_valid(&self) -> bool {
        !self.symbol.is_empty() && !self.series.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.series.iter().map(|c| c.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.series.iter().map(|c| c.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.series.iter().map(|c| c.low).collect()
    }

    /// Volumes widened to `f64` for the indicator library.
    pub fn volumes(&self) -> Vec<f64> {
        self.series.iter().map(|c| c.volume as f64).collect()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.series.last().map(|c| c.close)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::from_closes;
    use super::*;

    #[test]
    fn validity_requires_symbol_and_candles() {
        let series = from_closes(&[1.0, 2.0]);
        assert!(InstrumentSnapshot::new("AAPL", "1mo", "1d", series.clone()).is_valid());
        assert!(!InstrumentSnapshot::new("", "1mo", "1d", series).is_valid());
        assert!(!InstrumentSnapshot::new("AAPL", "1mo", "1d", Vec::new()).is_valid());
    }

    #[test]
    fn column_extractors_preserve_order() {
        let snap = InstrumentSnapshot::new("MSFT", "1mo", "1d", from_closes(&[3.0, 4.0, 5.0]));
        assert_eq!(snap.closes(), vec![3.0, 4.0, 5.0]);
        assert_eq!(snap.highs(), vec![4.0, 5.0, 6.0]);
        assert_eq!(snap.lows(), vec![2.0, 3.0, 4.0]);
        assert_eq!(snap.volumes(), vec![1_000.0; 3]);
        assert_eq!(snap.last_close(), Some(5.0));
    }

    #[test]
    fn deserialise_snapshot_with_missing_volume() {
        let json = r#"{
            "symbol": "NVDA",
            "requested_range": "3mo",
            "requested_interval": "1d",
            "series": [
                { "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5, "timestamp": 1704153600 }
            ]
        }"#;
        let snap: InstrumentSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.symbol, "NVDA");
        assert_eq!(snap.series.len(), 1);
        assert_eq!(snap.series[0].volume, 0);
    }
}
