use crate::model::{GameState, Panel, Rates};
use crate::modes::describe;
use crate::rng::BugRng;
use crate::shop::Catalog;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Signal {
    Continue,
    Quit,
}

/// Owns everything one run of the game mutates.
pub(crate) struct Session {
    pub(crate) state: GameState,
    pub(crate) rates: Rates,
    pub(crate) catalog: Catalog,
    pub(crate) rng: BugRng,
}

impl Session {
    pub(crate) fn new(catalog: Catalog, rates: Rates, rng: BugRng) -> Self {
        let mut session = Self {
            state: GameState::new(catalog.len()),
            rates,
            catalog,
            rng,
        };
        session.state.panel = describe(&session.state, &session.catalog);
        session
    }

    /// Per-tick entry point for the driver.
    pub(crate) fn update(&mut self) {
        if self.state.started && !self.state.ended {
            self.state.advance(&self.rates);
        }
        self.state.panel = describe(&self.state, &self.catalog);
    }

    pub(crate) fn panel(&self) -> &Panel {
        &self.state.panel
    }
}
