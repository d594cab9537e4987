// =============================================================================
// Relative Strength Index (RSI)
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Two flavours live here:
//
//   rsi()                 : classic last-value RSI over the trailing
//                           `period + 1` closes (plain sums, no smoothing).
//   compute_rsi_series()  : full series aligned with the candle history,
//                           using Wilder's smoothing:
//            avg_gain = (prev_avg_gain * (period - 1) + current_gain) / period
//            avg_loss = (prev_avg_loss * (period - 1) + current_loss) / period
//
// RS  = avg_gain / avg_loss
// RSI = 100 - 100 / (1 + RS)
//
// Thresholds:  RSI >= 70 => OVERBOUGHT,  RSI <= 30 => OVERSOLD.
// =============================================================================

use serde::Serialize;

use crate::market_data::InstrumentSnapshot;

/// Default look-back used by the charting layer.
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Full RSI series aligned index-for-index with the candle history.
///
/// Indices before the first computable value are NaN.
#[derive(Debug, Clone, Serialize)]
pub struct RsiSeries {
    pub series: Vec<f64>,
    pub last: f64,
}

impl RsiSeries {
    fn undefined(len: usize) -> Self {
        Self {
            series: vec![f64::NAN; len],
            last: f64::NAN,
        }
    }
}

/// Overbought / oversold classification of a single RSI reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiZone {
    /// Classify `value`.  NaN classifies as `None`.
    pub fn classify(value: f64) -> Option<Self> {
        if value.is_nan() {
            None
        } else if value >= 70.0 {
            Some(Self::Overbought)
        } else if value <= 30.0 {
            Some(Self::Oversold)
        } else {
            Some(Self::Neutral)
        }
    }
}

impl std::fmt::Display for RsiZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overbought => write!(f, "OVERBOUGHT"),
            Self::Oversold => write!(f, "OVERSOLD"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Classic last-value RSI over the trailing `period + 1` closes.
///
/// # Edge cases
/// - `period == 0` or fewer than `period + 1` closes => NaN
/// - No movement at all => 50.0
/// - No losses => 100.0
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return f64::NAN;
    }

    let window = &closes[closes.len() - (period + 1)..];
    let (gain, loss) = window.windows(2).fold((0.0_f64, 0.0_f64), |(g, l), w| {
        let delta = w[1] - w[0];
        if delta > 0.0 {
            (g + delta, l)
        } else {
            (g, l - delta)
        }
    });

    if gain + loss == 0.0 {
        return 50.0;
    }

    let period_f = period as f64;
    let avg_gain = gain / period_f;
    let avg_loss = loss / period_f;
    if avg_loss == 0.0 {
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}

/// Wilder-smoothed RSI for every candle of `snapshot`.
///
/// The output has exactly one entry per candle.  Indices `0..period` are NaN;
/// the first defined value lands at index `period`.  An invalid snapshot, a
/// history shorter than two candles or not longer than `period` gives an
/// all-NaN series with `last = NaN`.
pub fn compute_rsi_series(snapshot: &InstrumentSnapshot, period: usize) -> RsiSeries {
    let n = snapshot.series.len();
    if !snapshot.is_valid() || n < 2 || period == 0 || n <= period {
        return RsiSeries::undefined(n);
    }

    let closes = snapshot.closes();
    let mut series = vec![f64::NAN; n];

    // --- Seed averages over the first `period` deltas ------------------------
    let (sum_gain, sum_loss) = closes[..=period].windows(2).fold((0.0_f64, 0.0_f64), |(g, l), w| {
        let delta = w[1] - w[0];
        if delta > 0.0 {
            (g + delta, l)
        } else {
            (g, l - delta)
        }
    });

    let period_f = period as f64;
    let mut avg_gain = sum_gain / period_f;
    let mut avg_loss = sum_loss / period_f;

    series[period] = if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    };

    // --- Wilder's smoothing for subsequent values ----------------------------
    for i in period + 1..n {
        let delta = closes[i] - closes[i - 1];
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { -delta } else { 0.0 };

        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;

        series[i] = if avg_loss == 0.0 {
            100.0
        } else if avg_gain == 0.0 {
            0.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        };
    }

    let last = series[n - 1];
    RsiSeries { series, last }
}
