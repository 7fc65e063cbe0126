//! Operation counter persistence and start-up recovery.

use crate::error::Result;
use crate::history::HistoryLog;

/// Durable single-integer store for the operation counter.
pub trait CounterStore {
    /// Reads the stored counter.
    ///
    /// Returns `Ok(None)` when the store is absent, empty or malformed.
    fn load(&self) -> Result<Option<u64>>;

    /// Overwrites the stored counter with `count`.
    fn persist(&mut self, count: u64) -> Result<()>;
}

/// Recovers the operation counter from both durable sources.
///
/// The result is the larger of the history tail maximum and the counter
/// store, or 0 when neither yields a value. A read failure in either source
/// counts as absent so that start-up never fails on a damaged artifact.
pub fn recover_sequence(history: &dyn HistoryLog, counter: &dyn CounterStore) -> u64 {
    let from_history = history.max_sequence().unwrap_or_else(|e| {
        tracing::warn!("Failed to read history for counter recovery: {}", e);
        None
    });
    let from_counter = counter.load().unwrap_or_else(|e| {
        tracing::warn!("Failed to read counter file: {}", e);
        None
    });

    tracing::debug!(
        ?from_history,
        ?from_counter,
        "Recovered operation counter sources"
    );

    from_history
        .unwrap_or(0)
        .max(from_counter.unwrap_or(0))
}
