//! Hash-chain primitives: hashing and chain integrity verification.
//!
//! Hash input layout (bytes, in order):
//!   1. journal_id as UTF-8 bytes
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. canonical JSON of the record (serde_json, no pretty-printing)

use sha2::{Digest, Sha256};

use rxguard_contracts::{
    error::{RxGuardError, RxResult},
    journal::JournalRecord,
};

use crate::event::JournalEntry;

/// Compute the lowercase hex SHA-256 for one journal entry.
pub fn hash_entry(
    journal_id: &str,
    sequence: u64,
    record: &JournalRecord,
    prev_hash: &str,
) -> RxResult<String> {
    let record_json = serde_json::to_vec(record).map_err(|e| RxGuardError::JournalWriteFailed {
        reason: format!("record could not be serialized: {}", e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(journal_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&record_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify prev-hash linkage and recomputed hashes for every entry.
///
/// An empty chain is valid.
pub fn verify_chain(entries: &[JournalEntry]) -> bool {
    let mut expected_prev = JournalEntry::GENESIS_HASH.to_string();

    for entry in entries {
        if entry.prev_hash != expected_prev {
            return false;
        }

        match hash_entry(&entry.journal_id, entry.sequence, &entry.record, &entry.prev_hash) {
            Ok(recomputed) if recomputed == entry.this_hash => {}
            _ => return false,
        }

        expected_prev = entry.this_hash.clone();
    }

    true
}
