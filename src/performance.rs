// =============================================================================
// Performance Analyzer
// =============================================================================
//
// Daily % change of an instrument and how it compares with its sector.
//
//   daily_change_percent = (live - prev_close) / prev_close * 100
//   relative_to_sector   = daily_change_percent - sector_change_percent
//
// A non-positive previous close means there is nothing to compare against;
// the report then carries NaN numbers and a "data unavailable" explanation.

use serde::Serialize;

use crate::market_data::{build_daily_closes, InstrumentSnapshot};

/// Relative moves smaller than this (in percentage points) read as in line.
pub const IN_LINE_BAND: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceReport {
    pub daily_change_percent: f64,
    pub relative_to_sector: f64,
    pub explanation: String,
}

impl PerformanceReport {
    fn unavailable(symbol: &str) -> Self {
        Self {
            daily_change_percent: f64::NAN,
            relative_to_sector: f64::NAN,
            explanation: format!("{symbol}: performance data unavailable (no previous close)"),
        }
    }

    pub fn is_available(&self) -> bool {
        self.daily_change_percent.is_finite()
    }
}

/// Compare a live quote against its previous close and the sector's move.
pub fn analyze_quote(
    symbol: &str,
    live_price: f64,
    prev_close: f64,
    sector_change_percent: f64,
) -> PerformanceReport {
    if prev_close.is_nan() || prev_close <= 0.0 || !live_price.is_finite() {
        return PerformanceReport::unavailable(symbol);
    }

    let daily = (live_price - prev_close) / prev_close * 100.0;
    let relative = daily - sector_change_percent;

    let direction = if daily > 0.0 {
        format!("up {daily:.2}%")
    } else if daily < 0.0 {
        format!("down {:.2}%", daily.abs())
    } else {
        "unchanged".to_string()
    };

    let versus_sector = if relative.abs() < IN_LINE_BAND {
        format!("in line with its sector ({sector_change_percent:+.2}%)")
    } else if relative > 0.0 {
        format!("outperforming its sector by {relative:.2} points")
    } else {
        format!("underperforming its sector by {:.2} points", relative.abs())
    };

    PerformanceReport {
        daily_change_percent: daily,
        relative_to_sector: relative,
        explanation: format!("{symbol} is {direction} today, {versus_sector}."),
    }
}

/// Performance of `snapshot` using its last close as the live price and the
/// previous day's close from the daily aggregator.
pub fn analyze(snapshot: &InstrumentSnapshot, sector_change_percent: f64) -> PerformanceReport {
    let daily = build_daily_closes(snapshot);
    let (live, prev) = match (snapshot.last_close(), daily.len()) {
        (Some(live), len) if len >= 2 => (live, daily[len - 2]),
        _ => (f64::NAN, 0.0),
    };
    analyze_quote(&snapshot.symbol, live, prev, sector_change_percent)
}
