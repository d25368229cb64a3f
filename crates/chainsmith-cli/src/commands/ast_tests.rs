use chainsmith_compiler::GrammarBuilder;
use chainsmith_core::{Action, ActionTable};

use super::ast::render;

fn actions() -> ActionTable {
    ActionTable::new(
        ["add", "and", "days", "hours", "to", "a", "b"]
            .into_iter()
            .map(Action::new),
    )
    .unwrap()
}

#[test]
fn renders_grammar_and_subexpressions() {
    let parsed = GrammarBuilder::new(actions(), "(<add> days)? (<add> hours)? to")
        .subexpression("add", "^add|/and", false)
        .subexpression("pair", "a b", true)
        .parse()
        .unwrap();

    insta::assert_snapshot!(render(&parsed, false), @r"
    # <syntax>
    (<add> days)? (<add> hours)? to

    # <add>
    ^ add | / and

    # <pair> (own scope)
    a b
    ");
}

#[test]
fn raw_renders_lossless_tree() {
    let parsed = GrammarBuilder::new(actions(), "a b?").parse().unwrap();

    insta::assert_snapshot!(render(&parsed, true), @r#"
    # <syntax>
    Root
      Concat
        Ident
          Id "a"
        Whitespace " "
        Quantified
          Ident
            Id "b"
          Question "?"
    "#);
}

#[test]
fn broken_sources_are_marked() {
    let parsed = GrammarBuilder::new(actions(), "a (b").parse().unwrap();

    insta::assert_snapshot!(render(&parsed, false), @r"
    # <syntax>
    (invalid)
    ");
}
