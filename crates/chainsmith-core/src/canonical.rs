//! Canonical state numbering.
//!
//! Ids are a pure function of the automaton's shape: breadth-first from the
//! initial state (id 0), visiting each state's actions in canonical action
//! order, numbering states by first discovery. Insertion order of states or
//! transitions never leaks into the result.

use std::collections::VecDeque;

use crate::automaton::{Automaton, StateId, Successor};

/// Side table mapping states to canonical ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalNumbering {
    ids: Vec<Option<u32>>,
    order: Vec<StateId>,
}

impl CanonicalNumbering {
    /// Canonical id of `state`, or `None` if it is unreachable.
    pub fn id(&self, state: StateId) -> Option<u32> {
        self.ids.get(state.index()).copied().flatten()
    }

    /// Reachable states, in canonical id order.
    pub fn order(&self) -> &[StateId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

pub fn canonical_numbering(automaton: &Automaton) -> CanonicalNumbering {
    let mut ids: Vec<Option<u32>> = vec![None; automaton.state_count()];
    let mut order = Vec::with_capacity(automaton.state_count());
    let mut queue = VecDeque::new();

    let initial = automaton.initial_state();
    ids[initial.index()] = Some(0);
    order.push(initial);
    queue.push_back(initial);

    while let Some(state) = queue.pop_front() {
        for transition in automaton.transitions(state) {
            let Successor::State(target) = transition.successor else {
                continue;
            };
            if ids[target.index()].is_some() {
                continue;
            }
            ids[target.index()] = Some(order.len() as u32);
            order.push(target);
            queue.push_back(target);
        }
    }

    CanonicalNumbering { ids, order }
}
