//! Action log: append-only record of every turn mutation.
//!
//! ## Key Components
//!
//! - [`LogEntry`]: one recorded effect with its statistic deltas
//! - [`ActionLog`]: recording, turn-scoped queries and exact rollback
//! - [`LogStore`]: persistence seam, one bincode record per entry

mod action_log;
mod entry;
mod store;

pub use action_log::ActionLog;
pub use entry::{ActionKind, LogEntry, Payload, SequenceId, Tag};
pub use store::{decode_entry, encode_entry, LogStore, MemoryLogStore, StoreError};
