//! # rxguard-contracts
//!
//! Shared types and error contracts for the RxGuard prescribing safety engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions, validation of single values, and the
//! error type.

pub mod credential;
pub mod directory;
pub mod error;
pub mod interaction;
pub mod journal;
pub mod medication;
pub mod metrics;
pub mod prescription;
pub mod review;
