// =============================================================================
// Pivot Detection & Support / Resistance Clustering
// =============================================================================
//
// Swing highs and swing lows are strict local extrema against a symmetric
// neighbour window.  Swing highs feed the resistance list, swing lows the
// support list.  Each new pivot joins the FIRST existing cluster whose price
// lies within `cluster_tolerance` (not the closest one); otherwise it opens a
// new cluster.  Cluster prices are running count-weighted means, never
// recomputed from scratch.

use serde::Serialize;
use tracing::debug;

use crate::market_data::CandlePoint;

/// A merged price level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PivotCluster {
    /// Running weighted mean of every pivot absorbed so far.
    pub price: f64,
    pub touch_count: u32,
    /// Candle index of the most recent pivot absorbed.
    pub last_touch_index: u32,
}

/// Ordered cluster list (insertion order = detection order).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClusterSet {
    clusters: Vec<PivotCluster>,
}

impl ClusterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `price` observed at candle `index` into the first cluster within
    /// `tolerance`, or append a new cluster.
    pub fn absorb(&mut self, price: f64, index: u32, tolerance: f64) {
        let existing = self
            .clusters
            .iter_mut()
            .find(|c| (c.price - price).abs() <= tolerance);

        match existing {
            Some(cluster) => {
                let count = f64::from(cluster.touch_count);
                cluster.price = (cluster.price * count + price) / (count + 1.0);
                cluster.touch_count += 1;
                cluster.last_touch_index = index;
            }
            None => self.clusters.push(PivotCluster {
                price,
                touch_count: 1,
                last_touch_index: index,
            }),
        }
    }

    pub fn as_slice(&self) -> &[PivotCluster] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

/// Resistance clusters (from swing highs) and support clusters (from swing lows).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SupportResistance {
    pub resistances: ClusterSet,
    pub supports: ClusterSet,
}

/// `values[i]` strictly above every value in `[i-left, i-1]` and `[i+1, i+right]`.
///
/// False when the window does not fit inside `values`.
pub fn is_swing_high(values: &[f64], i: usize, left: usize, right: usize) -> bool {
    is_strict_extremum(values, i, left, right, |candidate, other| candidate > other)
}

/// `values[i]` strictly below every value in `[i-left, i-1]` and `[i+1, i+right]`.
pub fn is_swing_low(values: &[f64], i: usize, left: usize, right: usize) -> bool {
    is_strict_extremum(values, i, left, right, |candidate, other| candidate < other)
}

fn is_strict_extremum(
    values: &[f64],
    i: usize,
    left: usize,
    right: usize,
    beats: impl Fn(f64, f64) -> bool,
) -> bool {
    if i < left || i + right >= values.len() {
        return false;
    }
    let candidate = values[i];
    values[i - left..i]
        .iter()
        .chain(&values[i + 1..=i + right])
        .all(|&other| beats(candidate, other))
}

/// Scan `series` for swing points and cluster them into levels.
///
/// Pivots are tested at `i` in `pivot_range ..= len - pivot_range - 1`; nothing
/// is produced when `pivot_range == 0` or `len < 2 * pivot_range + 1`.
pub fn detect_levels(
    series: &[CandlePoint],
    pivot_range: usize,
    cluster_tolerance: f64,
) -> SupportResistance {
    let mut levels = SupportResistance::default();
    let n = series.len();
    if pivot_range == 0 || n < 2 * pivot_range + 1 {
        return levels;
    }

    let highs: Vec<f64> = series.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = series.iter().map(|c| c.low).collect();

    for i in pivot_range..n - pivot_range {
        let index = u32::try_from(i).unwrap_or(u32::MAX);
        if is_swing_high(&highs, i, pivot_range, pivot_range) {
            levels.resistances.absorb(highs[i], index, cluster_tolerance);
        }
        if is_swing_low(&lows, i, pivot_range, pivot_range) {
            levels.supports.absorb(lows[i], index, cluster_tolerance);
        }
    }

    debug!(
        candles = n,
        resistances = levels.resistances.len(),
        supports = levels.supports.len(),
        "support/resistance scan complete"
    );
    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::candle::test_support::from_highs_lows;

    #[test]
    fn nearby_pivots_merge_into_weighted_mean() {
        let mut set = ClusterSet::new();
        set.absorb(100.0, 3, 0.5);
        set.absorb(100.2, 9, 0.5);
        assert_eq!(set.len(), 1);
        let c = set.as_slice()[0];
        assert!((c.price - 100.1).abs() < 1e-9);
        assert_eq!(c.touch_count, 2);
        assert_eq!(c.last_touch_index, 9);

        set.absorb(110.0, 15, 0.5);
        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice()[1].touch_count, 1);
    }

    #[test]
    fn first_match_wins_over_best_match() {
        let mut set = ClusterSet::new();
        set.absorb(100.0, 0, 1.0);
        set.absorb(101.5, 1, 1.0);
        // 100.9 is closer to 101.5 but 100.0 is first within tolerance.
        set.absorb(100.9, 2, 1.0);
        assert_eq!(set.as_slice()[0].touch_count, 2);
        assert_eq!(set.as_slice()[1].touch_count, 1);
    }

    #[test]
    fn weighted_mean_follows_prior_count() {
        let mut set = ClusterSet::new();
        set.absorb(10.0, 0, 5.0);
        set.absorb(10.0, 1, 5.0);
        set.absorb(13.0, 2, 5.0);
        assert!((set.as_slice()[0].price - 11.0).abs() < 1e-12);
    }

    #[test]
    fn swing_tests_are_strict() {
        let values = [1.0, 2.0, 3.0, 2.0, 1.0];
        assert!(is_swing_high(&values, 2, 2, 2));
        assert!(!is_swing_high(&values, 1, 1, 1));
        assert!(!is_swing_high(&values, 2, 3, 2)); // window out of bounds

        let plateau = [1.0, 3.0, 3.0, 1.0];
        assert!(!is_swing_high(&plateau, 1, 1, 1));
        assert!(!is_swing_high(&plateau, 2, 1, 1));

        let valley = [5.0, 4.0, 2.0, 4.0, 5.0];
        assert!(is_swing_low(&valley, 2, 2, 2));
    }

    #[test]
    fn detect_levels_clusters_highs_and_lows() {
        // Peaks at 100.0 (i=2) and 100.2 (i=6), a later peak at 110 (i=10).
        let highs = [95.0, 97.0, 100.0, 97.0, 95.0, 97.0, 100.2, 97.0, 95.0, 98.0, 110.0, 98.0, 96.0];
        let lows: Vec<f64> = highs.iter().map(|h| h - 5.0).collect();
        let series = from_highs_lows(&highs, &lows);

        let levels = detect_levels(&series, 2, 0.5);
        let res = levels.resistances.as_slice();
        assert_eq!(res.len(), 2);
        assert!((res[0].price - 100.1).abs() < 1e-9);
        assert_eq!(res[0].touch_count, 2);
        assert_eq!(res[0].last_touch_index, 6);
        assert_eq!(res[1].price, 110.0);

        // Troughs at i=4 (90) and i=8 (90) merge.
        let sup = levels.supports.as_slice();
        assert_eq!(sup.len(), 1);
        assert_eq!(sup[0].touch_count, 2);
        assert_eq!(sup[0].last_touch_index, 8);
    }

    #[test]
    fn short_series_is_noop() {
        let series = from_highs_lows(&[1.0, 2.0, 1.0, 2.0], &[0.0, 1.0, 0.0, 1.0]);
        let levels = detect_levels(&series, 2, 0.5);
        assert!(levels.resistances.is_empty());
        assert!(levels.supports.is_empty());
    }

    #[test]
    fn zero_pivot_range_is_noop() {
        let series = from_highs_lows(&[1.0, 2.0, 3.0, 2.0, 1.0], &[0.0, 1.0, 2.0, 1.0, 0.0]);
        let levels = detect_levels(&series, 0, 0.5);
        assert!(levels.resistances.is_empty());
        assert!(levels.supports.is_empty());
    }
}
