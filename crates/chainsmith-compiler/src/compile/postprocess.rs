//! Passes over the closed root automaton.

use chainsmith_core::ActionTable;

use crate::automata::Dfa;

use super::alphabet::Alphabet;

/// Prefix closure, global self-loops and terminator flattening.
///
/// Minimizes before and after: the first run removes dead states so they do
/// not become accepting, the second merges states that flattening made
/// equivalent.
pub(super) fn postprocess(dfa: &Dfa, alphabet: &Alphabet, actions: &ActionTable) -> Dfa {
    let mut dfa = dfa.minimize();
    dfa.accept_all();

    let globals: Vec<_> = actions.global_actions().map(|id| alphabet.symbol(id)).collect();
    let terminators: Vec<_> = actions
        .iter()
        .filter(|(_, action)| action.is_terminator())
        .map(|(id, _)| alphabet.symbol(id))
        .collect();

    for state in dfa.states() {
        for &symbol in &globals {
            if dfa.transition(state, symbol).is_none() {
                dfa.set_transition(state, symbol, Some(state));
            }
        }
        for &symbol in &terminators {
            if dfa.transition(state, symbol).is_some() {
                dfa.set_transition(state, symbol, Some(state));
            }
        }
    }

    dfa.minimize()
}
