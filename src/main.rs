// =============================================================================
// candle-analytics: Command-line Entry Point
// =============================================================================
//
// Usage: candle-analytics <snapshot.json>...
//
// Each file holds one snapshot or an array of snapshots as produced by the
// quote fetcher.  Snapshots are published into a `SnapshotStore`, every stored
// symbol is analysed, and the reports are printed to stdout as pretty JSON.
// Logs go to stderr; verbosity via RUST_LOG (default "info").
// =============================================================================

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use candle_analytics::{analyze_snapshot, AnalysisConfig, InstrumentSnapshot, SnapshotStore};

const DEFAULT_CONFIG_PATH: &str = "analysis_config.json";

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Many(Vec<InstrumentSnapshot>),
    One(InstrumentSnapshot),
}

fn read_snapshots(path: &Path) -> Result<Vec<InstrumentSnapshot>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot file {}", path.display()))?;
    let parsed: SnapshotFile = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse snapshot file {}", path.display()))?;
    Ok(match parsed {
        SnapshotFile::Many(v) => v,
        SnapshotFile::One(s) => vec![s],
    })
}

fn main() -> Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── 2. Configuration ─────────────────────────────────────────────────
    let config_path =
        std::env::var("CANDLE_ANALYTICS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let config = AnalysisConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AnalysisConfig::default()
    });

    // ── 3. Load snapshots into the store ─────────────────────────────────
    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        bail!("usage: candle-analytics <snapshot.json>...");
    }

    let store = SnapshotStore::new();
    for path in &paths {
        for snapshot in read_snapshots(Path::new(path))? {
            store.publish(snapshot);
        }
    }
    info!(symbols = ?store.symbols(), "snapshots loaded");

    // ── 4. Analyse and emit ──────────────────────────────────────────────
    let reports: Vec<_> = store
        .symbols()
        .iter()
        .filter_map(|symbol| store.get(symbol))
        .map(|snapshot| analyze_snapshot(&snapshot, &config))
        .collect();

    let json = serde_json::to_string_pretty(&reports).context("failed to serialise reports")?;
    println!("{json}");
    Ok(())
}
