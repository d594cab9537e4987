// =============================================================================
// MACD (Moving Average Convergence / Divergence)
// =============================================================================
//
//   MACD   = EMA(fast) - EMA(slow)
//   Signal = EMA(signal) of the MACD series
//
// The MACD series feeding the signal line is rebuilt by re-evaluating both
// EMAs on every prefix of the closes whose length is at least `slow`.  This
// is quadratic in the input length; candle histories here are a few hundred
// bars at most.
// =============================================================================

use serde::Serialize;

use super::ema::ema;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// Latest MACD and signal-line values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdValue {
    pub macd: f64,
    pub signal: f64,
}

impl MacdValue {
    fn undefined() -> Self {
        Self {
            macd: f64::NAN,
            signal: f64::NAN,
        }
    }

    /// MACD minus signal.
    pub fn histogram(&self) -> f64 {
        self.macd - self.signal
    }
}

fn macd_at(closes: &[f64], fast: usize, slow: usize) -> f64 {
    ema(closes, fast) - ema(closes, slow)
}

/// Latest MACD / signal pair.
///
/// Returns a NaN pair when `closes.len() < slow` or either EMA is undefined.
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdValue {
    if closes.len() < slow {
        return MacdValue::undefined();
    }

    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);
    if fast_ema.is_nan() || slow_ema.is_nan() {
        return MacdValue::undefined();
    }

    let history: Vec<f64> = (slow..=closes.len())
        .map(|len| macd_at(&closes[..len], fast, slow))
        .collect();

    MacdValue {
        macd: fast_ema - slow_ema,
        signal: ema(&history, signal),
    }
}

/// [`macd`] with the conventional 12 / 26 / 9 parameters.
pub fn macd_default(closes: &[f64]) -> MacdValue {
    macd(closes, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
