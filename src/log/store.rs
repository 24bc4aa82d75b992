//! Persistence seam for the action log.
//!
//! The log owns its persisted form: one bincode record per entry, keyed by
//! sequence id. Stores only ever see appends and tail truncations.

use std::fmt::Debug;

use thiserror::Error;

use super::entry::{LogEntry, SequenceId};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("failed to encode log entry {seq}: {reason}")]
    Encode { seq: SequenceId, reason: String },
    #[error("failed to decode log record: {0}")]
    Decode(String),
    #[error("store rejected entry {0}: sequence is not increasing")]
    OutOfOrder(SequenceId),
}

/// Encode an entry into its persisted record.
pub fn encode_entry(entry: &LogEntry) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(entry).map_err(|e| StoreError::Encode {
        seq: entry.seq,
        reason: e.to_string(),
    })
}

/// Decode a persisted record.
pub fn decode_entry(bytes: &[u8]) -> Result<LogEntry, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Append-only record store.
pub trait LogStore: Debug {
    /// Persist a new entry at the tail.
    fn append(&mut self, entry: &LogEntry) -> Result<(), StoreError>;

    /// Drop every record with a sequence id at or after `from`.
    fn truncate_from(&mut self, from: SequenceId) -> Result<(), StoreError>;

    /// Every record in sequence order.
    fn load(&self) -> Result<Vec<LogEntry>, StoreError>;
}

/// Store keeping encoded records in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryLogStore {
    records: Vec<(SequenceId, Vec<u8>)>,
}

impl MemoryLogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LogStore for MemoryLogStore {
    fn append(&mut self, entry: &LogEntry) -> Result<(), StoreError> {
        if self.records.last().is_some_and(|(seq, _)| *seq >= entry.seq) {
            return Err(StoreError::OutOfOrder(entry.seq));
        }
        self.records.push((entry.seq, encode_entry(entry)?));
        Ok(())
    }

    fn truncate_from(&mut self, from: SequenceId) -> Result<(), StoreError> {
        self.records.retain(|(seq, _)| *seq < from);
        Ok(())
    }

    fn load(&self) -> Result<Vec<LogEntry>, StoreError> {
        self.records
            .iter()
            .map(|(_, bytes)| decode_entry(bytes))
            .collect()
    }
}
