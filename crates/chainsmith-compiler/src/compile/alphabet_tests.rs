use chainsmith_core::{Action, ActionId, ActionTable};

use super::{Alphabet, ScopeAnchor, SymbolKind};
use crate::automata::SymbolRange;

fn alphabet() -> Alphabet {
    let table = ActionTable::new([
        Action::new("add").with_params(["int"]),
        Action::new("days"),
        Action::new("add").with_params(["int", "int"]),
        Action::new("to").terminator(),
    ])
    .unwrap();
    Alphabet::new(&table)
}

#[test]
fn overloads_share_a_range() {
    let alphabet = alphabet();

    assert_eq!(alphabet.range("add"), Some(SymbolRange::new(0, 2)));
    assert_eq!(alphabet.range("days"), Some(SymbolRange::new(2, 3)));
    assert_eq!(alphabet.range("to"), Some(SymbolRange::new(3, 4)));
    assert_eq!(alphabet.range("nope"), None);
}

#[test]
fn symbols_map_back_to_actions() {
    let alphabet = alphabet();

    assert_eq!(alphabet.action(0), Some(ActionId::new(0)));
    assert_eq!(alphabet.action(1), Some(ActionId::new(2)));
    assert_eq!(alphabet.symbol(ActionId::new(2)), 1);
    assert_eq!(alphabet.symbol(ActionId::new(1)), 2);
    assert_eq!(alphabet.action(4), None);
}

#[test]
fn anchors_follow_actions() {
    let alphabet = alphabet();

    assert_eq!(alphabet.action_symbols(), 4);
    assert_eq!(alphabet.size(), 7);
    assert_eq!(alphabet.anchor(ScopeAnchor::Start), 4);
    assert_eq!(alphabet.classify(5), SymbolKind::Anchor(ScopeAnchor::End));
    assert_eq!(alphabet.classify(6), SymbolKind::Anchor(ScopeAnchor::Inner));
    assert_eq!(alphabet.classify(3), SymbolKind::Action(ActionId::new(3)));
    assert!(alphabet.is_anchor(4));
    assert!(!alphabet.is_anchor(0));
}
