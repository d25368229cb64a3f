//! Conversion to the public automaton model.

use chainsmith_core::{ActionTable, Automaton, StateId, Successor};

use crate::automata::Dfa;

use super::alphabet::Alphabet;

/// Builds the [`Automaton`] for a postprocessed DFA.
///
/// States without transitions are dropped, except the initial state.
/// Terminator transitions, and transitions into a dropped state, become
/// [`Successor::Terminal`]. The result carries canonical state ids.
pub(super) fn finalize(dfa: &Dfa, alphabet: &Alphabet, actions: &ActionTable) -> Automaton {
    let mut automaton = Automaton::new(actions.clone());

    let mut ids: Vec<Option<StateId>> = vec![None; dfa.state_count() as usize];
    ids[dfa.initial() as usize] = Some(automaton.initial_state());
    for state in dfa.states() {
        if state != dfa.initial() && dfa.has_transitions(state) {
            ids[state as usize] = Some(automaton.add_state());
        }
    }

    for state in dfa.states() {
        let Some(from) = ids[state as usize] else {
            continue;
        };
        for (symbol, target) in dfa.edges(state) {
            let Some(action) = alphabet.action(symbol) else {
                continue;
            };
            let successor = if actions.get(action).is_terminator() {
                Successor::Terminal
            } else {
                ids[target as usize].map_or(Successor::Terminal, Successor::State)
            };
            automaton.add_transition(from, action, successor);
        }
    }

    automaton.canonicalize()
}
