//! Wiring: one controller, one journal, one current snapshot.

use tracing::info;

use rxguard_audit::InMemoryJournal;
use rxguard_contracts::error::RxResult;
use rxguard_core::{
    traits::{Clock, HealthProbe},
    AppState, Command, Controller,
};
use rxguard_keys::{SeededRandom, SimulatedHealthProbe, ThreadRandom};

use crate::config::EngineConfig;

/// The application-state container.
///
/// Holds the current snapshot and replaces it wholesale each time a command
/// succeeds. A failed command leaves the snapshot as it was.
pub struct Runtime {
    controller: Controller,
    journal: InMemoryJournal,
    state: AppState,
}

impl Runtime {
    pub fn new(config: &EngineConfig, state: AppState, clock: Box<dyn Clock>) -> RxResult<Self> {
        let reviewer = config.safety_engine()?;
        let probe: Box<dyn HealthProbe> = match config.seed {
            Some(seed) => Box::new(SimulatedHealthProbe::new(SeededRandom::new(seed), config.health.clone())?),
            None => Box::new(SimulatedHealthProbe::new(ThreadRandom, config.health.clone())?),
        };
        let journal = InMemoryJournal::new("rxguard-session");
        let controller = Controller::new(Box::new(reviewer), probe, Box::new(journal.clone()), clock);

        info!(
            prescriptions = state.prescriptions.len(),
            api_keys = state.api_keys.len(),
            "runtime initialized"
        );
        Ok(Self { controller, journal, state })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn journal(&self) -> &InMemoryJournal {
        &self.journal
    }

    /// Apply `command` and return the new current snapshot.
    pub fn apply(&mut self, command: Command) -> RxResult<&AppState> {
        self.state = self.controller.dispatch(&self.state, command)?;
        Ok(&self.state)
    }
}
