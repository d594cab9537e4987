// =============================================================================
// Technical Report: every signal for one snapshot
// =============================================================================
//
// Runs the indicator library, momentum series, moving-average family,
// support/resistance clusterer, pattern detectors and performance analyzer
// over a single snapshot and bundles the results for the rendering layer.
//
// Close source for the moving-average family follows the requested interval:
// intraday requests are aggregated to daily closes first.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::indicators::{
    adx, atr, bollinger, compute_rsi_series, ema, macd, obv, roc, rsi, sma, stochastic,
    BollingerBands, MacdValue, RsiSeries, RsiZone, StochasticValue,
};
use crate::levels::{detect_levels, SupportResistance};
use crate::market_data::{CloseSource, InstrumentSnapshot};
use crate::moving_averages::{compute_ma_family, MaFamily};
use crate::patterns::{detect_all, PatternHit};
use crate::performance::{self, PerformanceReport};

/// Latest value of every scalar indicator.  NaN means "not enough data yet".
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorSnapshot {
    pub sma: f64,
    pub ema: f64,
    pub rsi: f64,
    pub atr: f64,
    pub macd: MacdValue,
    pub bollinger: BollingerBands,
    pub obv: f64,
    pub stochastic: StochasticValue,
    pub adx: f64,
    pub roc: f64,
}

impl IndicatorSnapshot {
    pub fn compute(snapshot: &InstrumentSnapshot, config: &AnalysisConfig) -> Self {
        let closes = snapshot.closes();
        let highs = snapshot.highs();
        let lows = snapshot.lows();
        let volumes = snapshot.volumes();

        Self {
            sma: sma(&closes, config.sma_period),
            ema: ema(&closes, config.ema_period),
            rsi: rsi(&closes, config.rsi_period),
            atr: atr(&highs, &lows, &closes, config.atr_period),
            macd: macd(&closes, config.macd_fast, config.macd_slow, config.macd_signal),
            bollinger: bollinger(&closes, config.bollinger_period, config.bollinger_k),
            obv: obv(&closes, &volumes),
            stochastic: stochastic(
                &highs,
                &lows,
                &closes,
                config.stochastic_k,
                config.stochastic_d,
            ),
            adx: adx(&highs, &lows, &closes, config.atr_period),
            roc: roc(&closes, config.roc_period),
        }
    }
}

/// Full analysis of one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct TechnicalReport {
    pub symbol: String,
    pub requested_range: String,
    pub requested_interval: String,
    pub candles: usize,
    pub last_close: Option<f64>,
    pub indicators: IndicatorSnapshot,
    pub rsi_series: RsiSeries,
    pub rsi_zone: Option<RsiZone>,
    pub moving_averages: MaFamily,
    pub levels: SupportResistance,
    pub patterns: Vec<PatternHit>,
    pub performance: PerformanceReport,
}

/// Analyse `snapshot` with `config`.
///
/// Never fails: an invalid snapshot yields NaN indicators, an all-NaN RSI
/// series, empty families, levels and patterns, and an "unavailable"
/// performance report.
pub fn analyze_snapshot(snapshot: &InstrumentSnapshot, config: &AnalysisConfig) -> TechnicalReport {
    if !snapshot.is_valid() {
        debug!(symbol = %snapshot.symbol, "analysis of invalid snapshot, results will be empty");
    }

    let indicators = IndicatorSnapshot::compute(snapshot, config);
    let rsi_series = compute_rsi_series(snapshot, config.rsi_period);
    let rsi_zone = RsiZone::classify(rsi_series.last);

    let source = CloseSource::for_interval(&snapshot.requested_interval);
    let moving_averages = compute_ma_family(snapshot, source);

    let levels = detect_levels(&snapshot.series, config.pivot_range, config.cluster_tolerance);
    let patterns = detect_all(&snapshot.series);
    let performance = performance::analyze(snapshot, config.sector_change_percent);

    info!(
        symbol = %snapshot.symbol,
        candles = snapshot.series.len(),
        rsi = format!("{:.2}", rsi_series.last),
        resistances = levels.resistances.len(),
        supports = levels.supports.len(),
        patterns = patterns.len(),
        "technical analysis complete"
    );

    TechnicalReport {
        symbol: snapshot.symbol.clone(),
        requested_range: snapshot.requested_range.clone(),
        requested_interval: snapshot.requested_interval.clone(),
        candles: snapshot.series.len(),
        last_close: snapshot.last_close(),
        indicators,
        rsi_series,
        rsi_zone,
        moving_averages,
        levels,
        patterns,
        performance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::candle::test_support::from_closes;
    use crate::patterns::PatternKind;

    fn rising(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + i as f64 + if i % 3 == 0 { 2.0 } else { 0.0 })
            .collect()
    }

    #[test]
    fn report_for_daily_history() {
        let closes = rising(60);
        let snap = InstrumentSnapshot::new("AAPL", "3mo", "1d", from_closes(&closes));
        let report = analyze_snapshot(&snap, &AnalysisConfig::default());

        assert_eq!(report.candles, 60);
        assert_eq!(report.rsi_series.series.len(), 60);
        assert!(report.indicators.sma.is_finite());
        assert!(report.indicators.macd.macd.is_finite());
        assert!(report.indicators.adx.is_nan());
        assert_eq!(
            report.moving_averages.dma.keys().copied().collect::<Vec<_>>(),
            vec![5, 10, 20, 30, 50]
        );
        assert!(report.performance.is_available());
        assert!(report.patterns.iter().any(|p| p.kind == PatternKind::Trend));
    }

    #[test]
    fn report_for_invalid_snapshot_is_empty() {
        let snap = InstrumentSnapshot::new("", "1mo", "1d", Vec::new());
        let report = analyze_snapshot(&snap, &AnalysisConfig::default());

        assert_eq!(report.candles, 0);
        assert!(report.last_close.is_none());
        assert!(report.indicators.rsi.is_nan());
        assert!(report.rsi_series.series.is_empty());
        assert!(report.rsi_zone.is_none());
        assert!(report.moving_averages.is_empty());
        assert!(report.levels.resistances.is_empty());
        assert!(report.patterns.is_empty());
        assert!(!report.performance.is_available());
    }

    #[test]
    fn report_serialises_nan_as_null() {
        let snap = InstrumentSnapshot::new("MSFT", "1mo", "1d", from_closes(&[1.0, 2.0]));
        let report = analyze_snapshot(&snap, &AnalysisConfig::default());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["indicators"]["adx"].is_null());
        assert!(json["indicators"]["macd"]["signal"].is_null());
        assert!(json["rsi_series"]["last"].is_null());
        assert_eq!(json["symbol"], "MSFT");
    }
}
