//! # rxguard-audit
//!
//! Append-only, SHA-256 hash-chained journal of applied state commands.
//!
//! Every record the controller writes is wrapped in a `JournalEntry` that
//! links to the previous entry by hash. Editing any entry breaks the chain,
//! which `verify_chain` detects.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rxguard_audit::InMemoryJournal;
//!
//! let journal = InMemoryJournal::new("demo-session");
//! let controller = Controller::new(reviewer, probe, Box::new(journal.clone()), clock);
//! // ... dispatch commands ...
//! assert!(journal.verify_integrity());
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_entry, verify_chain};
pub use event::{JournalEntry, JournalExport};
pub use memory::InMemoryJournal;

// ── Tests ─────────────────────────────────────────────────────────────────────
