use indoc::indoc;
use rowan::TextRange;

use super::{ModifierOp, Regex, dump_cst, lower, parse};
use crate::Error;
use crate::source_map::SourceId;

const LIMIT: u32 = 64;

fn parse_ok(source: &str) -> Regex {
    let res = parse(source, SourceId::default(), LIMIT).unwrap();
    assert!(
        res.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        res.diagnostics
    );
    lower(&res.root).unwrap()
}

fn errors(source: &str) -> String {
    let res = parse(source, SourceId::default(), LIMIT).unwrap();
    res.diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn alternation_binds_loosest() {
    let regex = parse_ok("a b | c d*");

    let Regex::Alt(branches) = &regex else {
        panic!("expected alternation, got {regex:?}");
    };
    assert_eq!(branches.len(), 2);
    assert!(matches!(&branches[0], Regex::Concat(c) if c.len() == 2));
    let Regex::Concat(right) = &branches[1] else {
        panic!("expected concatenation");
    };
    assert!(matches!(&right[1], Regex::Modifier(_, ModifierOp::Star)));
    assert_eq!(regex.to_string(), "a b | c d*");
}

#[test]
fn alternation_is_flat() {
    let regex = parse_ok("a|b|c");

    assert!(matches!(&regex, Regex::Alt(b) if b.len() == 3));
    assert_eq!(regex.to_string(), "a | b | c");
}

#[test]
fn groups_fold_away() {
    let regex = parse_ok("((a))");
    assert!(matches!(&regex, Regex::Literal(name) if name.text == "a"));
}

#[test]
fn quantifiers_stack() {
    let regex = parse_ok("a*?");

    let Regex::Modifier(inner, ModifierOp::Optional) = &regex else {
        panic!("expected optional, got {regex:?}");
    };
    assert!(matches!(inner.as_ref(), Regex::Modifier(_, ModifierOp::Star)));
    assert_eq!(regex.to_string(), "a*?");
}

#[test]
fn printing_keeps_needed_parentheses() {
    assert_eq!(parse_ok("(a | b) c").to_string(), "(a | b) c");
    assert_eq!(parse_ok("(a b)+").to_string(), "(a b)+");
    assert_eq!(parse_ok("a (b c)").to_string(), "a (b c)");
    assert_eq!(parse_ok("(a)(b)").to_string(), "a b");
}

#[test]
fn anchors_and_references() {
    let regex = parse_ok("^add|/and");

    let Regex::Alt(branches) = &regex else {
        panic!("expected alternation");
    };
    assert!(matches!(&branches[0], Regex::Concat(c) if c[0] == Regex::ScopeStart));
    assert!(matches!(&branches[1], Regex::Concat(c) if c[0] == Regex::ScopeInner));
    assert_eq!(parse_ok("a !").to_string(), "a !");

    let regex = parse_ok("< add >");
    assert!(matches!(&regex, Regex::SubExprRef(name) if name.text == "add"));
}

#[test]
fn date_adder_grammar_round_trips() {
    let source = "(<add> days)? (<add> hours)? (<add> minutes)? (<add> seconds)? to";
    let regex = parse_ok(source);

    assert_eq!(regex.to_string(), source);
    assert_eq!(regex.subexpr_refs().len(), 4);
    let literals: Vec<_> = regex.literals().iter().map(|n| n.text.as_str()).collect();
    assert_eq!(literals, ["days", "hours", "minutes", "seconds", "to"]);
}

#[test]
fn names_carry_positions() {
    let regex = parse_ok("add  <days>");

    assert_eq!(regex.literals()[0].range, range(0, 3));
    assert_eq!(regex.subexpr_refs()[0].range, range(6, 10));
}

#[test]
fn cst_dump() {
    let res = parse("a b?", SourceId::default(), LIMIT).unwrap();

    insta::assert_snapshot!(dump_cst(&res.root, false), @r#"
    Root
      Concat
        Ident
          Id "a"
        Quantified
          Ident
            Id "b"
          Question "?"
    "#);
}

#[test]
fn cst_is_lossless() {
    let source = indoc! {"
        (<add> days)?
          to
    "};
    let res = parse(source, SourceId::default(), LIMIT).unwrap();
    assert_eq!(res.root.text().to_string(), source);
}

#[test]
fn empty_grammar() {
    assert_eq!(errors(""), "error at 0..0: expected an expression");
    assert_eq!(errors("   "), "error at 3..3: expected an expression");
}

#[test]
fn empty_group() {
    assert_eq!(
        errors("()"),
        "error at 1..2: expected an expression, found `)`"
    );
}

#[test]
fn unclosed_group() {
    assert_eq!(
        errors("(a b"),
        "error at 4..4: missing closing `)` (related: group started here at 0..1)"
    );
}

#[test]
fn empty_alternative() {
    assert_eq!(
        errors("a | | b"),
        "error at 4..5: expected an expression, found `|`"
    );
    assert_eq!(errors("a |"), "error at 3..3: expected an expression");
}

#[test]
fn stray_close_paren() {
    assert_eq!(errors("a )"), "error at 2..3: unexpected `)`");
}

#[test]
fn dangling_quantifier() {
    assert_eq!(errors("*"), "error at 0..1: expected an expression, found `*`");
}

#[test]
fn garbage_reports_once() {
    assert_eq!(errors("a $ b"), "error at 2..3: unexpected `$`");
}

#[test]
fn unclosed_reference() {
    assert_eq!(
        errors("<add"),
        "error at 4..4: missing closing `>` (related: reference started here at 0..1)"
    );
    assert_eq!(
        errors("< > a"),
        "error at 2..3: expected subexpression name, found `>`"
    );
}

#[test]
fn several_errors_in_one_grammar() {
    insta::assert_snapshot!(errors("(a | ) <b"), @r"
    error at 5..6: expected an expression, found `)`
    error at 9..9: missing closing `>` (related: reference started here at 7..8)
    ");
}

#[test]
fn deep_nesting_is_fatal() {
    let res = parse("((((a))))", SourceId::default(), 2);
    assert!(matches!(res, Err(Error::RecursionLimitExceeded)));
}

#[test]
fn long_quantifier_run_is_fatal() {
    let source = format!("a{}", "+".repeat(LIMIT as usize + 1));
    let res = parse(&source, SourceId::default(), LIMIT);
    assert!(matches!(res, Err(Error::RecursionLimitExceeded)));

    let source = format!("a{}", "+".repeat(LIMIT as usize));
    assert!(parse(&source, SourceId::default(), LIMIT).is_ok());
}

#[test]
fn non_empty_prints_in_brackets() {
    let regex = Regex::concat(vec![
        Regex::literal("a"),
        Regex::literal("b").modified(ModifierOp::Star).non_empty(),
    ]);
    assert_eq!(regex.to_string(), "a [b*]");
}
