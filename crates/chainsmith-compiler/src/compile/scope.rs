//! Own-scope closing.
//!
//! An own-scope body is compiled as `^? body` and intersected with
//! `^ [^^]*`, so every word starts with exactly one start anchor. Closing
//! then resolves the anchors inside the scope:
//!
//! - the scope begins after the start anchor;
//! - a state that can take the end anchor loses all its transitions;
//! - an inner anchor jumps to its target as if it were not there, except
//!   right at the start of the scope, where it is not allowed;
//! - every state becomes accepting.

use crate::automata::{Dfa, Fragment, Nfa, SymbolRange};

use super::alphabet::{Alphabet, ScopeAnchor};

/// `^ [^^]*`
pub(super) fn scope_language(alphabet: &Alphabet) -> Dfa {
    let start = alphabet.anchor(ScopeAnchor::Start);
    let mut dfa = Dfa::new(alphabet.size());
    let inside = dfa.add_state(true);
    dfa.set_transition(dfa.initial(), start, Some(inside));
    for symbol in 0..alphabet.size() {
        if symbol != start {
            dfa.set_transition(inside, symbol, Some(inside));
        }
    }
    dfa
}

/// Resolves the anchors of one scope and strips them from the automaton.
pub(super) fn close_scope(dfa: &Dfa, alphabet: &Alphabet) -> Dfa {
    let start = alphabet.anchor(ScopeAnchor::Start);
    let end = alphabet.anchor(ScopeAnchor::End);
    let inner = alphabet.anchor(ScopeAnchor::Inner);

    let Some(scope_entry) = dfa.transition(dfa.initial(), start) else {
        return Dfa::empty_word(dfa.alphabet_size());
    };

    let mut nfa = Nfa::new(dfa.alphabet_size());
    let base = nfa.len() as u32;
    for _ in dfa.states() {
        nfa.add_node();
    }
    let entry = nfa.add_node();
    let exit = nfa.add_node();

    let ends_scope = |state| dfa.transition(state, end).is_some();

    let copy = |nfa: &mut Nfa, node: u32, state: u32, splice_inner: bool| {
        nfa.connect_epsilon(node, exit);
        if ends_scope(state) {
            return;
        }
        for (symbol, target) in dfa.edges(state) {
            if !alphabet.is_anchor(symbol) {
                nfa.connect(node, SymbolRange::single(symbol), base + target);
            } else if symbol == inner && splice_inner {
                nfa.connect_epsilon(node, base + target);
            }
        }
    };

    for state in dfa.states() {
        copy(&mut nfa, base + state, state, true);
    }
    copy(&mut nfa, entry, scope_entry, false);

    let result = Dfa::from_nfa(&nfa, Fragment::new(entry, exit)).minimize();
    log::trace!(
        "closed scope: {} states in, {} out",
        dfa.state_count(),
        result.state_count()
    );
    result
}
