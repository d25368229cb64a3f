use chainsmith_core::{Action, ActionTable};
use rowan::TextRange;

use super::{Registry, Resolution, SubExpression, resolve};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::{Regex, lower, parse};
use crate::source_map::SourceMap;

fn actions(names: &[&str]) -> ActionTable {
    ActionTable::new(names.iter().map(|n| Action::new(*n))).unwrap()
}

fn regex(source: &str) -> Regex {
    let res = parse(source, Default::default(), 64).unwrap();
    lower(&res.root).unwrap()
}

/// Registers every text in a source map so diagnostics render with names.
fn analyze(
    root: &str,
    subs: &[(&str, &str, bool)],
    names: &[&str],
) -> (Resolution, Diagnostics, SourceMap) {
    let mut map = SourceMap::new();
    let root_id = map.add_root(root);
    let root_span = TextRange::up_to((root.len() as u32).into());
    let mut registry = Registry::new(SubExpression::root(regex(root)).with_source(root_id, root_span));

    for &(name, body, own_scope) in subs {
        let id = map.add_subexpression(name, body);
        let span = TextRange::up_to((body.len() as u32).into());
        registry.define(SubExpression::named(name, regex(body), own_scope).with_source(id, span));
    }

    let mut diagnostics = Diagnostics::new();
    let resolution = resolve(&registry, &actions(names), &mut diagnostics);
    (resolution, diagnostics, map)
}

fn plain(diagnostics: &Diagnostics, map: &SourceMap) -> String {
    diagnostics.printer(map).plain(true).render()
}

#[test]
fn clean_grammar() {
    let (resolution, diagnostics, _) = analyze(
        "(<add> days)? (<add> hours)? to",
        &[("add", "^add|/and", false)],
        &["add", "and", "days", "hours", "to"],
    );

    assert!(diagnostics.is_empty());
    assert!(resolution.unused.is_empty());
}

#[test]
fn undefined_identifier_in_root() {
    let (_, diagnostics, map) = analyze("a foo", &[], &["a"]);

    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.kind(), DiagnosticKind::UndefinedIdentifier);
    assert_eq!(diag.detail(), Some("foo"));
    assert_eq!(map.context_name(diag.source()), None);
    insta::assert_snapshot!(plain(&diagnostics, &map), @"<syntax>: error at 2..5: `foo` is not a declared action");
}

#[test]
fn undefined_identifier_names_its_subexpression() {
    let (_, diagnostics, map) = analyze("<x>", &[("x", "a | b", false)], &["a"]);

    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.kind(), DiagnosticKind::UndefinedIdentifier);
    assert_eq!(map.context_name(diag.source()), Some("x"));
    insta::assert_snapshot!(plain(&diagnostics, &map), @"<x>: error at 4..5: `b` is not a declared action");
}

#[test]
fn every_occurrence_is_reported() {
    let (_, diagnostics, _) = analyze("foo bar foo", &[], &["bar"]);
    assert_eq!(diagnostics.of_kind(DiagnosticKind::UndefinedIdentifier).count(), 2);
}

#[test]
fn undefined_subexpression() {
    let (_, diagnostics, map) = analyze("a <missing>", &[], &["a"]);

    insta::assert_snapshot!(plain(&diagnostics, &map), @"<syntax>: error at 3..10: subexpression `<missing>` is not defined");
}

#[test]
fn mutual_recursion() {
    let (resolution, diagnostics, map) = analyze(
        "<A>",
        &[("A", "a <B>", false), ("B", "b <A>?", false)],
        &["a", "b"],
    );

    let diag = diagnostics
        .of_kind(DiagnosticKind::RecursiveSubExpression)
        .next()
        .unwrap();
    assert_eq!(diag.detail(), Some("A"));
    assert_eq!(map.context_name(diag.source()), Some("B"));
    assert_eq!(diagnostics.len(), 1);
    assert!(resolution.unused.is_empty());
}

#[test]
fn self_reference() {
    let (_, diagnostics, map) = analyze("<x>", &[("x", "a <x>*", true)], &["a"]);

    insta::assert_snapshot!(plain(&diagnostics, &map), @"<x>: error at 3..4: subexpression `<x>` is used recursively");
}

#[test]
fn shared_subexpression_is_not_recursive() {
    let (resolution, diagnostics, _) = analyze(
        "<a> <b>",
        &[("a", "<c> x", false), ("b", "<c> y", false), ("c", "z", false)],
        &["x", "y", "z"],
    );

    assert!(diagnostics.is_empty());
    assert!(resolution.unused.is_empty());
}

#[test]
fn unused_subexpression_is_a_warning() {
    let (resolution, diagnostics, map) = analyze("a", &[("unused", "a a", false)], &["a"]);

    assert!(!diagnostics.has_errors());
    assert_eq!(resolution.unused, ["unused"]);
    insta::assert_snapshot!(plain(&diagnostics, &map), @"<unused>: warning at 0..3: subexpression `unused` is never used");
}

#[test]
fn unreachable_subexpressions_are_not_checked() {
    let (_, diagnostics, _) = analyze("a", &[("dead", "nope", false)], &["a"]);

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_warnings());
}

#[test]
fn repeated_references_report_once() {
    let (_, diagnostics, _) = analyze("<m> <m> <m>", &[], &[]);
    assert_eq!(diagnostics.len(), 1);
}
