use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use super::candle::InstrumentSnapshot;

// ---------------------------------------------------------------------------
// SnapshotStore -- latest snapshot per symbol
// ---------------------------------------------------------------------------

/// Owned repository of the latest fetched snapshot per symbol.
///
/// Single writer, many readers.  A publish swaps the whole `Arc`, so a reader
/// holding the result of [`get`](Self::get) keeps a consistent snapshot even
/// while a newer one is being published.
#[derive(Default)]
pub struct SnapshotStore {
    snapshots: RwLock<HashMap<String, Arc<InstrumentSnapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot stored for `snapshot.symbol`.
    ///
    /// Invalid snapshots (empty symbol or series) are rejected and leave the
    /// previous entry untouched.  Returns whether the snapshot was stored.
    pub fn publish(&self, snapshot: InstrumentSnapshot) -> bool {
        if !snapshot.is_valid() {
            warn!(symbol = %snapshot.symbol, "rejecting invalid snapshot");
            return false;
        }

        let symbol = snapshot.symbol.clone();
        let candles = snapshot.series.len();
        self.snapshots.write().insert(symbol.clone(), Arc::new(snapshot));
        debug!(symbol = %symbol, candles, "snapshot published");
        true
    }

    /// Latest snapshot for `symbol`, if any.
    pub fn get(&self, symbol: &str) -> Option<Arc<InstrumentSnapshot>> {
        self.snapshots.read().get(symbol).cloned()
    }

    pub fn remove(&self, symbol: &str) -> Option<Arc<InstrumentSnapshot>> {
        self.snapshots.write().remove(symbol)
    }

    /// Stored symbols in ascending order.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.snapshots.read().keys().cloned().collect();
        symbols.sort();
        symbols
    }

    pub fn len(&self) -> usize {
        self.snapshots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.read().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::candle::test_support::from_closes;

    fn snap(symbol: &str, closes: &[f64]) -> InstrumentSnapshot {
        InstrumentSnapshot::new(symbol, "1mo", "1d", from_closes(closes))
    }

    #[test]
    fn publish_and_get() {
        let store = SnapshotStore::new();
        assert!(store.publish(snap("AAPL", &[1.0, 2.0])));
        let got = store.get("AAPL").expect("stored");
        assert_eq!(got.closes(), vec![1.0, 2.0]);
        assert!(store.get("MSFT").is_none());
    }

    #[test]
    fn invalid_snapshot_is_rejected() {
        let store = SnapshotStore::new();
        assert!(store.publish(snap("AAPL", &[1.0])));
        assert!(!store.publish(snap("AAPL", &[])));
        assert!(!store.publish(snap("", &[1.0])));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("AAPL").map(|s| s.series.len()), Some(1));
    }

    #[test]
    fn reader_keeps_old_snapshot_after_republish() {
        let store = SnapshotStore::new();
        store.publish(snap("AAPL", &[1.0]));
        let held = store.get("AAPL").unwrap();

        store.publish(snap("AAPL", &[5.0, 6.0, 7.0]));
        assert_eq!(held.closes(), vec![1.0]);
        assert_eq!(store.get("AAPL").unwrap().closes(), vec![5.0, 6.0, 7.0]);
    }

    #[test]
    fn symbols_sorted_and_remove() {
        let store = SnapshotStore::new();
        store.publish(snap("MSFT", &[1.0]));
        store.publish(snap("AAPL", &[1.0]));
        assert_eq!(store.symbols(), vec!["AAPL", "MSFT"]);

        assert!(store.remove("AAPL").is_some());
        assert_eq!(store.symbols(), vec!["MSFT"]);
        assert!(!store.is_empty());
    }

    #[test]
    fn concurrent_readers_see_whole_snapshots() {
        let store = SnapshotStore::new();
        store.publish(snap("BTC", &[1.0; 10]));

        std::thread::scope(|s| {
            s.spawn(|| {
                for i in 0..200 {
                    let v = i as f64;
                    store.publish(snap("BTC", &[v; 10]));
                }
            });
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..200 {
                        let closes = store.get("BTC").unwrap().closes();
                        assert_eq!(closes.len(), 10);
                        assert!(closes.iter().all(|&c| c == closes[0]));
                    }
                });
            }
        });
    }
}
