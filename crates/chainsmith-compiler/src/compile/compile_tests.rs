use chainsmith_core::{Action, ActionTable, Automaton, Successor};

use super::{CompileError, Compiler};
use crate::analyze::{Registry, SubExpression};
use crate::parser::{ModifierOp, Regex, lower, parse};

fn regex(source: &str) -> Regex {
    let res = parse(source, Default::default(), 64).unwrap();
    lower(&res.root).unwrap()
}

fn registry(root: &str, subs: &[(&str, &str, bool)]) -> Registry {
    let mut registry = Registry::new(SubExpression::root(regex(root)));
    for &(name, body, own_scope) in subs {
        registry.define(SubExpression::named(name, regex(body), own_scope));
    }
    registry
}

fn table(actions: impl IntoIterator<Item = Action>) -> ActionTable {
    ActionTable::new(actions).unwrap()
}

fn compile(
    root: &str,
    subs: &[(&str, &str, bool)],
    actions: &ActionTable,
) -> Result<Automaton, CompileError> {
    Compiler::new(&registry(root, subs), actions).compile()
}

fn date_actions() -> ActionTable {
    table([
        Action::new("add"),
        Action::new("and"),
        Action::new("days"),
        Action::new("hours"),
        Action::new("to").terminator(),
    ])
}

#[test]
fn optional_groups_with_terminator() {
    let actions = table([
        Action::new("add"),
        Action::new("days"),
        Action::new("hours"),
        Action::new("to").terminator(),
    ]);
    let automaton = compile("(add days)? (add hours)? to", &[], &actions).unwrap();

    insta::assert_snapshot!(automaton.dump(), @r"
    S0: add → S1, to → ⊤
    S1: days → S2, hours → S3
    S2: add → S4, to → ⊤
    S3: to → ⊤
    S4: hours → S3
    ");
}

#[test]
fn inner_anchor_in_shared_subexpression() {
    let automaton = compile(
        "(<add> days)? (<add> hours)? to",
        &[("add", "^add|/and", false)],
        &date_actions(),
    )
    .unwrap();

    insta::assert_snapshot!(automaton.dump(), @r"
    S0: add → S1, to → ⊤
    S1: days → S2, hours → S3
    S2: and → S4, to → ⊤
    S3: to → ⊤
    S4: hours → S3
    ");
}

#[test]
fn own_scope_subexpression_resolves_its_anchors() {
    let actions = table([
        Action::new("a"),
        Action::new("b"),
        Action::new("c"),
        Action::new("done").terminator(),
    ]);
    let automaton = compile("c <x> <x> done", &[("x", "^a | /b", true)], &actions).unwrap();

    insta::assert_snapshot!(automaton.dump(), @r"
    S0: c → S1
    S1: a → S2, done → ⊤
    S2: a → S3, done → ⊤
    S3: done → ⊤
    ");
}

#[test]
fn end_anchor_inside_own_scope() {
    let actions = table([
        Action::new("a"),
        Action::new("b"),
        Action::new("done").terminator(),
    ]);
    let automaton = compile("<y> done", &[("y", "a b? !", true)], &actions).unwrap();

    insta::assert_snapshot!(automaton.dump(), @r"
    S0: a → S1, done → ⊤
    S1: done → ⊤
    ");
}

#[test]
fn global_actions_loop_everywhere() {
    let actions = table([
        Action::new("a"),
        Action::new("b"),
        Action::new("log").global(),
        Action::new("done").terminator(),
    ]);
    let automaton = compile("a b done", &[], &actions).unwrap();

    insta::assert_snapshot!(automaton.dump(), @r"
    S0: a → S1, log → S0
    S1: b → S2, log → S1
    S2: done → ⊤, log → S2
    ");
}

#[test]
fn chain_without_terminator_ends_in_terminal() {
    let actions = table([Action::new("a"), Action::new("b")]);
    let automaton = compile("a b", &[], &actions).unwrap();

    insta::assert_snapshot!(automaton.dump(), @r"
    S0: a → S1
    S1: b → ⊤
    ");
}

#[test]
fn empty_language_keeps_initial_state() {
    let actions = table([Action::new("a")]);
    let automaton = compile("a ^ a", &[], &actions).unwrap();

    assert_eq!(automaton.state_count(), 1);
    insta::assert_snapshot!(automaton.dump(), @"S0: ∅");
}

#[test]
fn global_terminator_ends_chain_everywhere() {
    let actions = table([Action::new("a"), Action::new("quit").global().terminator()]);
    let automaton = compile("a", &[], &actions).unwrap();

    insta::assert_snapshot!(automaton.dump(), @r"
    S0: a → S1, quit → ⊤
    S1: quit → ⊤
    ");
}

#[test]
fn literal_covers_every_overload() {
    let actions = table([
        Action::new("add").with_params(["int"]).auto_varargs(true),
        Action::new("add").with_params(["int", "int"]),
        Action::new("done").terminator(),
    ]);
    let automaton = compile("add+ done", &[], &actions).unwrap();

    insta::assert_snapshot!(automaton.dump(), @r"
    S0: add(int)… → S1, add(int, int) → S1
    S1: add(int)… → S1, add(int, int) → S1, done → ⊤
    ");
}

#[test]
fn non_empty_drops_empty_word() {
    let actions = table([Action::new("a"), Action::new("done").terminator()]);
    let root = Regex::concat(vec![
        Regex::literal("a").modified(ModifierOp::Star).non_empty(),
        Regex::literal("done"),
    ]);
    let registry = Registry::new(SubExpression::root(root));
    let automaton = Compiler::new(&registry, &actions).compile().unwrap();

    insta::assert_snapshot!(automaton.dump(), @r"
    S0: a → S1
    S1: a → S1, done → ⊤
    ");
}

#[test]
fn recursive_subexpressions_fail() {
    let actions = table([Action::new("a"), Action::new("b")]);
    let err = compile("<A>", &[("A", "a <B>", false), ("B", "b <A>?", false)], &actions).unwrap_err();

    assert_eq!(
        err,
        CompileError::RecursiveSubExpression {
            name: "A".to_owned()
        }
    );
}

#[test]
fn undefined_identifier_in_root() {
    let actions = table([Action::new("a")]);
    let err = compile("a foo", &[], &actions).unwrap_err();

    assert_eq!(
        err,
        CompileError::UndefinedIdentifier {
            name: "foo".to_owned(),
            context: None,
        }
    );
    assert_eq!(err.to_string(), "`foo` is not a declared action");
}

#[test]
fn undefined_identifier_in_subexpression() {
    let actions = table([Action::new("a")]);
    let err = compile("<x>", &[("x", "a bar", false)], &actions).unwrap_err();

    assert_eq!(
        err.to_string(),
        "`bar` is not a declared action (in subexpression `x`)"
    );
}

#[test]
fn undefined_subexpression() {
    let actions = table([Action::new("a")]);
    let err = compile("a <nope>", &[], &actions).unwrap_err();

    assert_eq!(
        err,
        CompileError::UndefinedSubExpression {
            name: "nope".to_owned(),
            context: None,
        }
    );
}

#[test]
fn unused_subexpression_does_not_block_compilation() {
    let actions = table([Action::new("a")]);
    let automaton = compile("a", &[("unused", "a a", false)], &actions);
    assert!(automaton.is_ok());
}

#[test]
fn subexpressions_compile_once() {
    let actions = date_actions();
    let registry = registry("<add> days <add> hours", &[("add", "^add|/and", false)]);
    let mut compiler = Compiler::new(&registry, &actions);

    compiler.subexpression("add", None).unwrap();
    compiler.subexpression("add", None).unwrap();
    assert_eq!(compiler.compiled.len(), 1);
}

#[test]
fn output_is_independent_of_declaration_order() {
    let grammar = "(<add> days)? (<add> hours)? to";
    let subs = [("add", "^add|/and", false)];
    let forward = compile(grammar, &subs, &date_actions()).unwrap();

    let reversed = table([
        Action::new("to").terminator(),
        Action::new("hours"),
        Action::new("days"),
        Action::new("and"),
        Action::new("add"),
    ]);
    let backward = compile(grammar, &subs, &reversed).unwrap();

    assert_eq!(forward.dump(), backward.dump());
    assert_eq!(forward.dump(), compile(grammar, &subs, &date_actions()).unwrap().dump());
}

#[test]
fn compiled_automata_satisfy_model_invariants() {
    let actions = table([
        Action::new("add"),
        Action::new("and"),
        Action::new("days"),
        Action::new("hours"),
        Action::new("log").global(),
        Action::new("to").terminator(),
    ]);
    let automaton = compile(
        "(<add> days)* (<add> hours)? to",
        &[("add", "^add|/and", false)],
        &actions,
    )
    .unwrap();

    // reachable: canonical numbering covers every state
    assert_eq!(automaton.canonical_numbering().len(), automaton.state_count());

    for state in automaton.states() {
        for global in automaton.global_actions() {
            assert_eq!(
                automaton.successor(state, global),
                Some(Successor::State(state))
            );
        }
        for transition in automaton.transitions(state) {
            if automaton.actions().get(transition.action).is_terminator() {
                assert_eq!(transition.successor, Successor::Terminal);
            }
        }
    }
}
