// =============================================================================
// Chart Pattern Detector
// =============================================================================
//
// Coarse geometric scans over a whole candle series.  These are independent
// of the support/resistance clusterer and deliberately simple:
//
//   Double top / bottom     : one global extremum per half of the series,
//                             not a multi-pivot search.
//   Head and shoulders      : every 3-point window over highs (lows for the
//                             inverse form), emitted without merging overlaps.
//   Trend structure         : one-sample pivots tallied into higher/lower
//                             highs and lows.
//
// Thresholds and strengths are fixed constants of the algorithms.

use serde::Serialize;

use crate::market_data::CandlePoint;

const DOUBLE_MIN_POINTS: usize = 8;
const HEAD_SHOULDERS_MIN_POINTS: usize = 9;
const TREND_MIN_POINTS: usize = 5;

/// Max relative difference between the two peaks (or troughs).
const DOUBLE_PEAK_TOLERANCE: f64 = 0.03;
/// Valley between peaks must reach this fraction of the smaller peak.
const DOUBLE_TOP_VALLEY_RATIO: f64 = 0.95;
/// Rally between troughs must reach this multiple of the larger trough.
const DOUBLE_BOTTOM_RALLY_RATIO: f64 = 1.03;
const DOUBLE_STRENGTH: f64 = 0.85;

const HEAD_PROMINENCE: f64 = 0.03;
const SHOULDER_TOLERANCE: f64 = 0.06;
const HEAD_SHOULDERS_STRENGTH: f64 = 0.75;

const TREND_MIN_SWINGS: u32 = 2;
const TREND_STRENGTH: f64 = 0.85;
const NO_TREND_STRENGTH: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PatternKind {
    DoubleTop,
    DoubleBottom,
    HeadAndShoulders,
    InverseHeadAndShoulders,
    Trend,
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DoubleTop => write!(f, "Double Top"),
            Self::DoubleBottom => write!(f, "Double Bottom"),
            Self::HeadAndShoulders => write!(f, "Head and Shoulders"),
            Self::InverseHeadAndShoulders => write!(f, "Inverse Head and Shoulders"),
            Self::Trend => write!(f, "Trend"),
        }
    }
}

/// One detected pattern, spanning candle indices `start_index..=end_index`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternHit {
    pub kind: PatternKind,
    pub start_index: u32,
    pub end_index: u32,
    /// Confidence in `[0, 1]`.
    pub strength: f64,
    pub rationale: String,
}

impl PatternHit {
    fn new(kind: PatternKind, start: usize, end: usize, strength: f64, rationale: String) -> Self {
        Self {
            kind,
            start_index: to_index(start),
            end_index: to_index(end),
            strength,
            rationale,
        }
    }
}

fn to_index(i: usize) -> u32 {
    u32::try_from(i).unwrap_or(u32::MAX)
}

/// Index and value of the first maximum (`pick_max`) or minimum in `values`,
/// offset by `base`.
fn extremum(values: &[f64], base: usize, pick_max: bool) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        let better = match best {
            None => true,
            Some((_, b)) if pick_max => v > b,
            Some((_, b)) => v < b,
        };
        if better {
            best = Some((base + i, v));
        }
    }
    best
}

// =============================================================================
// Double top / double bottom
// =============================================================================

/// Double top and double bottom from the global extremum of each half.
///
/// Needs at least 8 candles.  The series is split at `len / 2`.
pub fn detect_double_top_bottom(series: &[CandlePoint]) -> Vec<PatternHit> {
    let n = series.len();
    if n < DOUBLE_MIN_POINTS {
        return Vec::new();
    }

    let highs: Vec<f64> = series.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = series.iter().map(|c| c.low).collect();
    let mid = n / 2;
    let mut hits = Vec::new();

    // --- Double top ---------------------------------------------------------
    if let (Some((i1, p1)), Some((i2, p2))) =
        (extremum(&highs[..mid], 0, true), extremum(&highs[mid..], mid, true))
    {
        let larger = p1.max(p2);
        let smaller = p1.min(p2);
        let similar = larger > 0.0 && (p1 - p2).abs() / larger <= DOUBLE_PEAK_TOLERANCE;
        let valley = extremum(&lows[i1 + 1..i2], i1 + 1, false);

        if let (true, Some((_, valley_low))) = (similar, valley) {
            if valley_low <= smaller * DOUBLE_TOP_VALLEY_RATIO {
                hits.push(PatternHit::new(
                    PatternKind::DoubleTop,
                    i1,
                    i2,
                    DOUBLE_STRENGTH,
                    format!(
                        "peaks {p1:.2} and {p2:.2} within 3%, valley {valley_low:.2} at least 5% below"
                    ),
                ));
            }
        }
    }

    // --- Double bottom ------------------------------------------------------
    if let (Some((i1, t1)), Some((i2, t2))) =
        (extremum(&lows[..mid], 0, false), extremum(&lows[mid..], mid, false))
    {
        let larger = t1.max(t2);
        let smaller = t1.min(t2);
        let similar = larger > 0.0 && smaller >= larger * (1.0 - DOUBLE_PEAK_TOLERANCE);
        let rally = extremum(&highs[i1 + 1..i2], i1 + 1, true);

        if let (true, Some((_, rally_high))) = (similar, rally) {
            if rally_high >= larger * DOUBLE_BOTTOM_RALLY_RATIO {
                hits.push(PatternHit::new(
                    PatternKind::DoubleBottom,
                    i1,
                    i2,
                    DOUBLE_STRENGTH,
                    format!(
                        "troughs {t1:.2} and {t2:.2} within 3%, rally {rally_high:.2} at least 3% above"
                    ),
                ));
            }
        }
    }

    hits
}

// =============================================================================
// Head and shoulders
// =============================================================================

fn shoulders_match(left: f64, right: f64) -> bool {
    let smaller = left.min(right);
    smaller > 0.0 && (left - right).abs() / smaller <= SHOULDER_TOLERANCE
}

/// Head-and-shoulders over highs and the inverse form over lows.
///
/// Needs at least 9 candles.  Every qualifying 3-point window is reported.
pub fn detect_head_and_shoulders(series: &[CandlePoint]) -> Vec<PatternHit> {
    let n = series.len();
    if n < HEAD_SHOULDERS_MIN_POINTS {
        return Vec::new();
    }

    let mut hits = Vec::new();

    for (start, w) in series.windows(3).enumerate() {
        let (left, head, right) = (w[0].high, w[1].high, w[2].high);
        if head > left * (1.0 + HEAD_PROMINENCE)
            && head > right * (1.0 + HEAD_PROMINENCE)
            && shoulders_match(left, right)
        {
            hits.push(PatternHit::new(
                PatternKind::HeadAndShoulders,
                start,
                start + 2,
                HEAD_SHOULDERS_STRENGTH,
                format!("head {head:.2} over shoulders {left:.2} / {right:.2}"),
            ));
        }
    }

    for (start, w) in series.windows(3).enumerate() {
        let (left, head, right) = (w[0].low, w[1].low, w[2].low);
        if head < left * (1.0 - HEAD_PROMINENCE)
            && head < right * (1.0 - HEAD_PROMINENCE)
            && shoulders_match(left, right)
        {
            hits.push(PatternHit::new(
                PatternKind::InverseHeadAndShoulders,
                start,
                start + 2,
                HEAD_SHOULDERS_STRENGTH,
                format!("head {head:.2} under shoulders {left:.2} / {right:.2}"),
            ));
        }
    }

    hits
}

// =============================================================================
// Trend structure
// =============================================================================

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct SwingTally {
    higher_highs: u32,
    lower_highs: u32,
    higher_lows: u32,
    lower_lows: u32,
}

/// Classify the series as uptrend, downtrend or no clear trend from its
/// one-sample swing points.  Needs at least 5 candles; emits a single
/// [`PatternKind::Trend`] hit spanning the whole series.
pub fn detect_trend_structure(series: &[CandlePoint]) -> Vec<PatternHit> {
    let n = series.len();
    if n < TREND_MIN_POINTS {
        return Vec::new();
    }

    let mut tally = SwingTally::default();
    let mut last_high: Option<f64> = None;
    let mut last_low: Option<f64> = None;

    for i in 1..n - 1 {
        let (prev, cur, next) = (&series[i - 1], &series[i], &series[i + 1]);

        if cur.high > prev.high && cur.high > next.high {
            if let Some(h) = last_high {
                if cur.high > h {
                    tally.higher_highs += 1;
                } else if cur.high < h {
                    tally.lower_highs += 1;
                }
            }
            last_high = Some(cur.high);
        }

        if cur.low < prev.low && cur.low < next.low {
            if let Some(l) = last_low {
                if cur.low > l {
                    tally.higher_lows += 1;
                } else if cur.low < l {
                    tally.lower_lows += 1;
                }
            }
            last_low = Some(cur.low);
        }
    }

    let (label, strength) =
        if tally.higher_highs >= TREND_MIN_SWINGS && tally.higher_lows >= TREND_MIN_SWINGS {
            ("uptrend", TREND_STRENGTH)
        } else if tally.lower_highs >= TREND_MIN_SWINGS && tally.lower_lows >= TREND_MIN_SWINGS {
            ("downtrend", TREND_STRENGTH)
        } else {
            ("no clear trend", NO_TREND_STRENGTH)
        };

    vec![PatternHit::new(
        PatternKind::Trend,
        0,
        n - 1,
        strength,
        format!(
            "{label}: {} higher highs, {} higher lows, {} lower highs, {} lower lows",
            tally.higher_highs, tally.higher_lows, tally.lower_highs, tally.lower_lows
        ),
    )]
}

/// All detectors, in order: double top/bottom, head and shoulders, trend.
pub fn detect_all(series: &[CandlePoint]) -> Vec<PatternHit> {
    let mut hits = detect_double_top_bottom(series);
    hits.extend(detect_head_and_shoulders(series));
    hits.extend(detect_trend_structure(series));
    hits
}
