// =============================================================================
// candle-analytics: technical-analysis signals from OHLCV candle history
// =============================================================================
//
// Every computation is a pure function of a borrowed candle series or
// snapshot: no shared mutable state, no I/O, no suspension points.  The only
// lock in the crate guards the `SnapshotStore` repository.
// =============================================================================

pub mod config;
pub mod indicators;
pub mod levels;
pub mod market_data;
pub mod moving_averages;
pub mod patterns;
pub mod performance;
pub mod report;

pub use config::AnalysisConfig;
pub use market_data::{CandlePoint, InstrumentSnapshot, SnapshotStore};
pub use report::{analyze_snapshot, TechnicalReport};
