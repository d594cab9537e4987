// =============================================================================
// Daily Aggregator
// =============================================================================
//
// Reduces intraday or mixed-granularity candles to one close per UTC calendar
// day.  The day key is `year * 10000 + month * 100 + day`; the close kept for
// a day is the chronologically last one seen for it.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use tracing::warn;

use super::candle::{CandlePoint, InstrumentSnapshot};

/// Which close series a consumer wants.  Chosen by the caller, never by the
/// aggregator itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseSource {
    /// One close per UTC day (last intraday close).
    DailyAggregate,
    /// One close per candle, no aggregation.
    PerCandle,
}

impl CloseSource {
    /// Minute and hour intervals (`"5m"`, `"90m"`, `"1h"`) aggregate to daily
    /// closes; day/week/month intervals already are daily-or-coarser.
    ///
    /// Case-sensitive: `"1M"` is one month, as in kline interval names.
    pub fn for_interval(interval: &str) -> Self {
        let iv = interval.trim();
        let intraday = (iv.ends_with('m') && !iv.ends_with("mo")) || iv.ends_with('h');
        if intraday {
            Self::DailyAggregate
        } else {
            Self::PerCandle
        }
    }

    /// Resolve this choice against a snapshot.
    pub fn closes(self, snapshot: &InstrumentSnapshot) -> Vec<f64> {
        match self {
            Self::DailyAggregate => build_daily_closes(snapshot),
            Self::PerCandle => candle_closes(&snapshot.series),
        }
    }
}

/// UTC calendar key `yyyymmdd` for an epoch-seconds timestamp.
pub fn day_key(timestamp: i64) -> Option<i64> {
    let dt = DateTime::<Utc>::from_timestamp(timestamp, 0)?;
    Some(i64::from(dt.year()) * 10_000 + i64::from(dt.month()) * 100 + i64::from(dt.day()))
}

/// One close per UTC day, ascending by day.  Empty for an invalid snapshot.
pub fn build_daily_closes(snapshot: &InstrumentSnapshot) -> Vec<f64> {
    if !snapshot.is_valid() {
        return Vec::new();
    }

    let mut by_day: BTreeMap<i64, f64> = BTreeMap::new();
    for candle in &snapshot.series {
        match day_key(candle.timestamp) {
            // Ascending input order means a later insert is a later close.
            Some(key) => {
                by_day.insert(key, candle.close);
            }
            None => warn!(
                symbol = %snapshot.symbol,
                timestamp = candle.timestamp,
                "candle timestamp out of calendar range, skipped"
            ),
        }
    }

    by_day.into_values().collect()
}

/// Pass-through: one close per candle.
pub fn candle_closes(series: &[CandlePoint]) -> Vec<f64> {
    series.iter().map(|c| c.close).collect()
}
