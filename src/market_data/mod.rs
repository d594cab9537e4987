pub mod candle;
pub mod daily;
pub mod snapshot_store;

// Re-export the candle model for convenient access (e.g. `use crate::market_data::CandlePoint`).
pub use candle::{CandlePoint, InstrumentSnapshot};
pub use daily::{build_daily_closes, candle_closes, CloseSource};
pub use snapshot_store::SnapshotStore;
