use super::cst::SyntaxKind::{self, *};
use super::lexer::{lex, token_text};

fn kinds(source: &str) -> Vec<SyntaxKind> {
    lex(source)
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| !k.is_trivia())
        .collect()
}

#[test]
fn operators_and_identifiers() {
    assert_eq!(
        kinds("(<add> days)? to"),
        [ParenOpen, AngleOpen, Id, AngleClose, Id, ParenClose, Question, Id]
    );
}

#[test]
fn anchors_and_quantifiers() {
    assert_eq!(
        kinds("^a|/b*!+"),
        [Caret, Id, Pipe, Slash, Id, Star, Bang, Plus]
    );
}

#[test]
fn identifiers_allow_underscores_and_digits() {
    let source = "_x1 y_2";
    let tokens = lex(source);
    let texts: Vec<_> = tokens
        .iter()
        .filter(|t| t.kind == Id)
        .map(|t| token_text(source, t))
        .collect();
    assert_eq!(texts, ["_x1", "y_2"]);
}

#[test]
fn unknown_characters_coalesce_into_garbage() {
    let source = "a $$$ b";
    let tokens = lex(source);

    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        [Id, Whitespace, Garbage, Whitespace, Id]
    );
    assert_eq!(token_text(source, &tokens[2]), "$$$");
}

#[test]
fn identifiers_cannot_start_with_digit() {
    let source = "1a";
    let tokens = lex(source);

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, Garbage);
    assert_eq!(token_text(source, &tokens[0]), "1");
    assert_eq!(tokens[1].kind, Id);
}

#[test]
fn whitespace_includes_newlines() {
    let tokens = lex("a\n\t b");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].kind, Whitespace);
}
