//! Journal entry and export types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rxguard_contracts::journal::JournalRecord;

/// One link in the journal's hash chain.
///
/// Changing any field, including those of the embedded `record`, breaks
/// `this_hash` and every later `prev_hash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    pub journal_id: String,

    pub record: JournalRecord,

    /// Hex SHA-256 of the previous entry, or `GENESIS_HASH` for the first.
    pub prev_hash: String,

    /// Hex SHA-256 over (journal_id, sequence, prev_hash, canonical JSON of record).
    pub this_hash: String,
}

impl JournalEntry {
    /// The `prev_hash` of the first entry in every chain: 64 hex zeros.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A snapshot of the journal taken by `InMemoryJournal::export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalExport {
    pub journal_id: String,
    pub entries: Vec<JournalEntry>,
    pub exported_at: DateTime<Utc>,
    /// `this_hash` of the last entry; empty when the journal is empty.
    pub head_hash: String,
}
