//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::action::{Action, ActionId, ActionTable};
use crate::automaton::{Automaton, State, StateId};
use crate::canonical::CanonicalNumbering;

impl ActionTable {
    pub(crate) fn ensure_action(&self, id: ActionId) -> &Action {
        self.raw(id).unwrap_or_else(|| {
            panic!(
                "ActionTable: {id} not found (ids must come from the table they index, len {})",
                self.len()
            )
        })
    }
}

impl Automaton {
    pub(crate) fn ensure_state(&self, id: StateId) -> &State {
        let count = self.state_count();
        self.raw_state(id)
            .unwrap_or_else(|| panic!("Automaton: {id} not found (state count {count})"))
    }

    pub(crate) fn ensure_state_mut(&mut self, id: StateId) -> &mut State {
        let count = self.state_count();
        self.raw_state_mut(id)
            .unwrap_or_else(|| panic!("Automaton: {id} not found (state count {count})"))
    }
}

impl CanonicalNumbering {
    pub(crate) fn ensure_id(&self, state: StateId) -> u32 {
        self.id(state).unwrap_or_else(|| {
            panic!("CanonicalNumbering: {state} has no id (successor of a reachable state)")
        })
    }
}
