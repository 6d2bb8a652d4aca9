//! In-memory implementation of `JournalWriter`.
//!
//! `InMemoryJournal` is a cheap handle: clones share the same entries, so
//! the application can hand one clone to the controller and keep another
//! for `export()` and `verify_integrity()`.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::debug;

use rxguard_contracts::{
    error::{RxGuardError, RxResult},
    journal::JournalRecord,
};
use rxguard_core::traits::JournalWriter;

use crate::{
    chain::{hash_entry, verify_chain},
    event::{JournalEntry, JournalExport},
};

pub(crate) struct JournalState {
    pub(crate) entries: Vec<JournalEntry>,
    pub(crate) sequence: u64,
    /// `this_hash` of the last entry, or `GENESIS_HASH` before any write.
    pub(crate) last_hash: String,
}

/// An in-memory, append-only journal backed by a SHA-256 hash chain.
#[derive(Clone)]
pub struct InMemoryJournal {
    journal_id: String,
    pub(crate) state: Arc<Mutex<JournalState>>,
}

impl InMemoryJournal {
    pub fn new(journal_id: impl Into<String>) -> Self {
        let state = JournalState {
            entries: Vec::new(),
            sequence: 0,
            last_hash: JournalEntry::GENESIS_HASH.to_string(),
        };
        Self {
            journal_id: journal_id.into(),
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Export every entry written so far.
    pub fn export(&self) -> RxResult<JournalExport> {
        let state = self.lock()?;
        let head_hash = state
            .entries
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        Ok(JournalExport {
            journal_id: self.journal_id.clone(),
            entries: state.entries.clone(),
            exported_at: Utc::now(),
            head_hash,
        })
    }

    /// True when the in-memory chain still verifies.
    pub fn verify_integrity(&self) -> bool {
        match self.lock() {
            Ok(state) => verify_chain(&state.entries),
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> RxResult<std::sync::MutexGuard<'_, JournalState>> {
        self.state.lock().map_err(|e| RxGuardError::JournalWriteFailed {
            reason: format!("journal state lock poisoned: {}", e),
        })
    }
}

impl JournalWriter for InMemoryJournal {
    /// Hash the record onto the chain and append it.
    fn append(&self, record: &JournalRecord) -> RxResult<()> {
        let mut state = self.lock()?;

        let prev_hash = state.last_hash.clone();
        let sequence = state.sequence;
        let this_hash = hash_entry(&self.journal_id, sequence, record, &prev_hash)?;

        state.entries.push(JournalEntry {
            sequence,
            journal_id: self.journal_id.clone(),
            record: record.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.sequence += 1;
        state.last_hash = this_hash;

        debug!(
            journal_id = %self.journal_id,
            sequence,
            command = %record.command_kind,
            "journal entry appended"
        );
        Ok(())
    }
}
