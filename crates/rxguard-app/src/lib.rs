//! # rxguard-app
//!
//! The RxGuard demo application layer.
//!
//! Wires the engine crates into something a front-end (or the demo CLI) can
//! drive:
//!
//! 1. **Configuration**: `EngineConfig` loaded from TOML.
//! 2. **Fixtures**: a fictional dataset of users, organizations, doctors,
//!    prescriptions, and API keys.
//! 3. **Runtime**: the state container that applies commands through the
//!    controller and journals them.
//! 4. **Session and dashboards**: mock login and one dashboard per role.
//!
//! All data is hardcoded and fictional. No external systems are contacted.

pub mod config;
pub mod dashboard;
pub mod mock_data;
pub mod runtime;
pub mod session;

pub use config::EngineConfig;
pub use dashboard::Dashboard;
pub use runtime::Runtime;
pub use session::Session;
