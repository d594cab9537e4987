// =============================================================================
// Analysis Configuration: indicator periods and level-detection tuning
// =============================================================================
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash.  All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.
//
// Pattern-detector thresholds are NOT configurable; they are constants of the
// detectors themselves.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_rsi_period() -> usize {
    14
}

fn default_ma_period() -> usize {
    20
}

fn default_atr_period() -> usize {
    14
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

fn default_bollinger_period() -> usize {
    20
}

fn default_bollinger_k() -> f64 {
    2.0
}

fn default_stochastic_k() -> usize {
    14
}

fn default_stochastic_d() -> usize {
    3
}

fn default_roc_period() -> usize {
    12
}

fn default_pivot_range() -> usize {
    5
}

fn default_cluster_tolerance() -> f64 {
    0.5
}

// =============================================================================
// AnalysisConfig
// =============================================================================

/// Tunable parameters for one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    // --- Oscillators --------------------------------------------------------

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    #[serde(default = "default_stochastic_k")]
    pub stochastic_k: usize,

    /// Accepted for compatibility; %D is reported equal to %K.
    #[serde(default = "default_stochastic_d")]
    pub stochastic_d: usize,

    #[serde(default = "default_roc_period")]
    pub roc_period: usize,

    // --- Trend / averages ---------------------------------------------------

    /// Period for the headline SMA value.
    #[serde(default = "default_ma_period")]
    pub sma_period: usize,

    /// Period for the headline EMA value.
    #[serde(default = "default_ma_period")]
    pub ema_period: usize,

    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,

    // --- Volatility ---------------------------------------------------------

    #[serde(default = "default_atr_period")]
    pub atr_period: usize,

    #[serde(default = "default_bollinger_period")]
    pub bollinger_period: usize,

    /// Standard-deviation multiplier for the outer bands.
    #[serde(default = "default_bollinger_k")]
    pub bollinger_k: f64,

    // --- Support / resistance ------------------------------------------------

    /// Neighbours on each side a swing point must strictly exceed.
    #[serde(default = "default_pivot_range")]
    pub pivot_range: usize,

    /// Absolute price distance within which pivots merge into one level.
    #[serde(default = "default_cluster_tolerance")]
    pub cluster_tolerance: f64,

    // --- Performance --------------------------------------------------------

    /// Sector's daily % change used for relative performance.
    #[serde(default)]
    pub sector_change_percent: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rsi_period: default_rsi_period(),
            stochastic_k: default_stochastic_k(),
            stochastic_d: default_stochastic_d(),
            roc_period: default_roc_period(),
            sma_period: default_ma_period(),
            ema_period: default_ma_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            atr_period: default_atr_period(),
            bollinger_period: default_bollinger_period(),
            bollinger_k: default_bollinger_k(),
            pivot_range: default_pivot_range(),
            cluster_tolerance: default_cluster_tolerance(),
            sector_change_percent: 0.0,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read analysis config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse analysis config from {}", path.display()))?;

        info!(
            path = %path.display(),
            rsi_period = config.rsi_period,
            pivot_range = config.pivot_range,
            cluster_tolerance = config.cluster_tolerance,
            "analysis config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` using an atomic write (write to
    /// `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise analysis config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "analysis config saved (atomic)");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.rsi_period, 14);
        assert_eq!((cfg.macd_fast, cfg.macd_slow, cfg.macd_signal), (12, 26, 9));
        assert_eq!(cfg.bollinger_period, 20);
        assert!((cfg.bollinger_k - 2.0).abs() < f64::EPSILON);
        assert_eq!((cfg.stochastic_k, cfg.stochastic_d), (14, 3));
        assert_eq!(cfg.pivot_range, 5);
        assert!((cfg.cluster_tolerance - 0.5).abs() < f64::EPSILON);
        assert_eq!(cfg.sector_change_percent, 0.0);
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: AnalysisConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, AnalysisConfig::default());
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "rsi_period": 7, "cluster_tolerance": 1.25 }"#;
        let cfg: AnalysisConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.rsi_period, 7);
        assert!((cfg.cluster_tolerance - 1.25).abs() < f64::EPSILON);
        assert_eq!(cfg.atr_period, 14);
        assert_eq!(cfg.sma_period, 20);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("candle-analytics-cfg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("analysis_config.json");

        let mut cfg = AnalysisConfig::default();
        cfg.pivot_range = 3;
        cfg.sector_change_percent = -0.8;
        cfg.save(&path).unwrap();

        assert!(!path.with_extension("json.tmp").exists());
        let loaded = AnalysisConfig::load(&path).unwrap();
        assert_eq!(loaded, cfg);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_missing_file_is_error() {
        let err = AnalysisConfig::load("/definitely/not/here/analysis_config.json").unwrap_err();
        assert!(err.to_string().contains("failed to read analysis config"));
    }
}
