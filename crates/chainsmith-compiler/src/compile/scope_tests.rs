use chainsmith_core::{Action, ActionTable};

use super::alphabet::{Alphabet, ScopeAnchor};
use super::scope::scope_language;
use super::Compiler;
use crate::analyze::{Registry, SubExpression};
use crate::automata::{Dfa, Symbol};
use crate::parser::{lower, parse};

const NAMES: [&str; 3] = ["a", "b", "c"];

/// Compiles `body` as an own-scope grammar, without postprocessing.
fn closed(body: &str) -> (Dfa, Alphabet) {
    let actions = ActionTable::new(NAMES.map(Action::new)).unwrap();
    let res = parse(body, Default::default(), 64).unwrap();
    let registry = Registry::new(SubExpression::root(lower(&res.root).unwrap()));

    let mut compiler = Compiler::new(&registry, &actions);
    let dfa = compiler.compile_body(registry.root()).unwrap();
    (dfa, compiler.alphabet().clone())
}

fn word(alphabet: &Alphabet, names: &[&str]) -> Vec<Symbol> {
    names
        .iter()
        .map(|name| alphabet.range(name).unwrap().start)
        .collect()
}

#[test]
fn every_prefix_is_accepted() {
    let (dfa, alphabet) = closed("a b c");

    assert!(dfa.accepts(&word(&alphabet, &[])));
    assert!(dfa.accepts(&word(&alphabet, &["a"])));
    assert!(dfa.accepts(&word(&alphabet, &["a", "b"])));
    assert!(dfa.accepts(&word(&alphabet, &["a", "b", "c"])));
    assert!(!dfa.accepts(&word(&alphabet, &["b"])));
}

#[test]
fn start_anchor_only_at_scope_start() {
    let (dfa, alphabet) = closed("^a | /b");

    assert!(dfa.accepts(&word(&alphabet, &["a"])));
    assert!(!dfa.accepts(&word(&alphabet, &["b"])));
}

#[test]
fn start_anchor_inside_scope_matches_nothing() {
    let (dfa, alphabet) = closed("a ^ b");

    assert!(dfa.accepts(&[]));
    assert!(!dfa.accepts(&word(&alphabet, &["a"])));
    assert_eq!(dfa.state_count(), 1);
}

#[test]
fn inner_anchor_is_transparent_after_start() {
    let (dfa, alphabet) = closed("a /b");

    assert!(dfa.accepts(&word(&alphabet, &["a", "b"])));
    assert!(!dfa.accepts(&word(&alphabet, &["b"])));
}

#[test]
fn end_anchor_closes_scope() {
    let (dfa, alphabet) = closed("a b? !");

    assert!(dfa.accepts(&[]));
    assert!(dfa.accepts(&word(&alphabet, &["a"])));
    assert!(!dfa.accepts(&word(&alphabet, &["a", "b"])));
}

#[test]
fn anchors_never_survive_closing() {
    let (dfa, alphabet) = closed("(^a | /b) c !");

    for state in dfa.states() {
        for (symbol, _) in dfa.edges(state) {
            assert!(!alphabet.is_anchor(symbol), "anchor left at {state}");
        }
    }
}

#[test]
fn scope_language_has_one_leading_start() {
    let (_, alphabet) = closed("a");
    let dfa = scope_language(&alphabet);
    let start = alphabet.anchor(ScopeAnchor::Start);
    let inner = alphabet.anchor(ScopeAnchor::Inner);

    assert!(dfa.accepts(&[start]));
    assert!(dfa.accepts(&[start, 0, inner, 1]));
    assert!(!dfa.accepts(&[start, start]));
    assert!(!dfa.accepts(&[0]));
    assert!(!dfa.accepts(&[]));
}
