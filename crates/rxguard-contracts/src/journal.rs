//! Journal records: one per applied state command.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable record of one applied command, written to the journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    /// Short discriminant, e.g. `"update-prescription-status"`.
    pub command_kind: String,
    /// Human-readable description of the effect.
    pub summary: String,
    /// Id of the record the command touched, when there is one.
    pub subject_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}
