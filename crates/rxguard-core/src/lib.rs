//! # rxguard-core
//!
//! The command-driven state core of RxGuard.
//!
//! This crate provides:
//! - The seam traits (`SafetyReviewer`, `HealthProbe`, `RandomSource`,
//!   `JournalWriter`, `Clock`)
//! - `AppState`, the plain snapshot every dashboard reads from
//! - `Command` and the `Controller` that turns one snapshot into the next
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rxguard_core::{Command, Controller};
//!
//! let next = controller.dispatch(&state, Command::RunHealthCheck)?;
//! ```

pub mod command;
pub mod controller;
pub mod state;
pub mod traits;

pub use command::Command;
pub use controller::Controller;
pub use state::AppState;
