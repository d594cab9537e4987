// =============================================================================
// Moving Average Family (DMA / EMA per period)
// =============================================================================
//
// Full-length SMA ("DMA") and EMA series for a ladder of periods chosen by the
// requested chart range.  Unlike the momentum series, the leading entries are
// not NaN: DMA emits 0.0 until its window fills and EMA is seeded with the
// first close.  Charts key off these placeholders, so keep them.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::indicators::ema::multiplier;
use crate::market_data::{CloseSource, InstrumentSnapshot};

/// Fewer source closes than this and no family is produced.
pub const MIN_SOURCE_LEN: usize = 5;

const PERIODS_1MO: &[usize] = &[5, 10, 20];
const PERIODS_3MO: &[usize] = &[5, 10, 20, 30, 50];
const PERIODS_FULL: &[usize] = &[5, 10, 20, 30, 50, 100, 150, 200, 300];

/// Per-period DMA and EMA series, each as long as the source close series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaFamily {
    pub dma: BTreeMap<usize, Vec<f64>>,
    pub ema: BTreeMap<usize, Vec<f64>>,
}

impl MaFamily {
    pub fn is_empty(&self) -> bool {
        self.dma.is_empty() && self.ema.is_empty()
    }

    /// Latest DMA for `period`, if that period was computed.
    pub fn last_dma(&self, period: usize) -> Option<f64> {
        self.dma.get(&period).and_then(|s| s.last().copied())
    }

    /// Latest EMA for `period`, if that period was computed.
    pub fn last_ema(&self, period: usize) -> Option<f64> {
        self.ema.get(&period).and_then(|s| s.last().copied())
    }
}

/// Period ladder for a requested range string.
pub fn periods_for_range(range: &str) -> &'static [usize] {
    match range {
        "1mo" => PERIODS_1MO,
        "3mo" => PERIODS_3MO,
        _ => PERIODS_FULL,
    }
}

/// Sliding-window SMA.  Entries before index `period - 1` are 0.0.
pub fn dma_series(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    if period == 0 {
        out.resize(values.len(), 0.0);
        return out;
    }

    let period_f = period as f64;
    let mut sum = 0.0;
    for (i, &value) in values.iter().enumerate() {
        sum += value;
        if i >= period {
            sum -= values[i - period];
        }
        out.push(if i + 1 >= period { sum / period_f } else { 0.0 });
    }
    out
}

/// EMA seeded with the first value, multiplier `2 / (period + 1)`.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };

    let k = multiplier(period);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = first;
    out.push(prev);
    for &value in &values[1..] {
        prev = value * k + prev * (1.0 - k);
        out.push(prev);
    }
    out
}

/// DMA and EMA series for every period in the snapshot's range ladder.
///
/// `source` picks daily-aggregated or per-candle closes.  Returns an empty
/// family for an invalid snapshot or when fewer than [`MIN_SOURCE_LEN`]
/// closes result.
pub fn compute_ma_family(snapshot: &InstrumentSnapshot, source: CloseSource) -> MaFamily {
    if !snapshot.is_valid() {
        debug!(symbol = %snapshot.symbol, "moving averages: invalid snapshot");
        return MaFamily::default();
    }

    let closes = source.closes(snapshot);
    if closes.len() < MIN_SOURCE_LEN {
        debug!(
            symbol = %snapshot.symbol,
            closes = closes.len(),
            "moving averages: insufficient data"
        );
        return MaFamily::default();
    }

    let mut family = MaFamily::default();
    for &period in periods_for_range(&snapshot.requested_range) {
        family.dma.insert(period, dma_series(&closes, period));
        family.ema.insert(period, ema_series(&closes, period));
    }
    family
}
