//! Compiled chain automaton.
//!
//! States are identified by dense [`StateId`]s. Every state is a valid place to
//! stop, so there is no accepting flag. A transition either moves to another
//! state or is [`Successor::Terminal`], meaning the action ends the chain.

use std::fmt;

use indexmap::IndexMap;

use crate::action::{ActionId, ActionTable};
use crate::canonical::{CanonicalNumbering, canonical_numbering};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StateId(u32);

impl StateId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Successor {
    State(StateId),
    /// Taking the action leaves the chain.
    Terminal,
}

impl Successor {
    pub fn state(self) -> Option<StateId> {
        match self {
            Successor::State(id) => Some(id),
            Successor::Terminal => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Transition {
    pub source: StateId,
    pub action: ActionId,
    pub successor: Successor,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct State {
    pub(crate) transitions: IndexMap<ActionId, Successor>,
}

#[derive(Clone, Debug)]
pub struct Automaton {
    actions: ActionTable,
    states: Vec<State>,
    initial: StateId,
}

impl Automaton {
    /// Creates an automaton holding only its initial state.
    pub fn new(actions: ActionTable) -> Self {
        Self {
            actions,
            states: vec![State::default()],
            initial: StateId(0),
        }
    }

    pub fn add_state(&mut self) -> StateId {
        let id = StateId(self.states.len() as u32);
        self.states.push(State::default());
        id
    }

    /// Adds or replaces the transition of `source` on `action`.
    ///
    /// Returns the successor that was replaced, if any.
    pub fn add_transition(
        &mut self,
        source: StateId,
        action: ActionId,
        successor: Successor,
    ) -> Option<Successor> {
        self.actions.ensure_action(action);
        if let Successor::State(target) = successor {
            self.ensure_state(target);
        }
        self.ensure_state_mut(source)
            .transitions
            .insert(action, successor)
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    pub fn all_actions(&self) -> &[ActionId] {
        self.actions.all_actions()
    }

    pub fn global_actions(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.actions.global_actions()
    }

    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    pub fn is_initial(&self, state: StateId) -> bool {
        state == self.initial
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn states(&self) -> impl Iterator<Item = StateId> {
        (0..self.states.len() as u32).map(StateId)
    }

    pub fn successor(&self, state: StateId, action: ActionId) -> Option<Successor> {
        self.ensure_state(state).transitions.get(&action).copied()
    }

    /// Outgoing transitions of `state`, in canonical action order.
    pub fn transitions(&self, state: StateId) -> Vec<Transition> {
        let mut out: Vec<Transition> = self
            .ensure_state(state)
            .transitions
            .iter()
            .map(|(&action, &successor)| Transition {
                source: state,
                action,
                successor,
            })
            .collect();
        out.sort_by(|a, b| self.actions.compare(a.action, b.action));
        out
    }

    pub(crate) fn raw_state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.index())
    }

    pub(crate) fn raw_state_mut(&mut self, id: StateId) -> Option<&mut State> {
        self.states.get_mut(id.index())
    }

    pub fn has_transitions(&self, state: StateId) -> bool {
        !self.ensure_state(state).transitions.is_empty()
    }

    /// Whether the transition's action may be repeated right away at its destination.
    ///
    /// Holds when the action is not a terminator, allows vararg expansion, and
    /// loops on itself at the destination state.
    pub fn is_varargs_applicable(&self, transition: &Transition) -> bool {
        let Successor::State(target) = transition.successor else {
            return false;
        };
        let action = self.actions.get(transition.action);
        if action.is_terminator() || !action.is_auto_varargs() {
            return false;
        }
        self.successor(target, transition.action) == Some(Successor::State(target))
    }

    /// Breadth-first canonical ids, see [`canonical_numbering`].
    pub fn canonical_numbering(&self) -> CanonicalNumbering {
        canonical_numbering(self)
    }

    /// Copy of this automaton whose state indices are the canonical ids.
    ///
    /// States unreachable from the initial state are dropped.
    pub fn canonicalize(&self) -> Automaton {
        let numbering = self.canonical_numbering();
        let mut out = Automaton {
            actions: self.actions.clone(),
            states: vec![State::default(); numbering.len()],
            initial: StateId(0),
        };

        for (new_idx, &old) in numbering.order().iter().enumerate() {
            for transition in self.transitions(old) {
                let successor = match transition.successor {
                    Successor::State(target) => {
                        Successor::State(StateId(numbering.ensure_id(target)))
                    }
                    Successor::Terminal => Successor::Terminal,
                };
                out.states[new_idx]
                    .transitions
                    .insert(transition.action, successor);
            }
        }

        out
    }
}
