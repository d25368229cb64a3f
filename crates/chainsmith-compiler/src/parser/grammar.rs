//! Grammar productions.
//!
//! ```text
//! regex    ::= union
//! union    ::= concat ('|' concat)*
//! concat   ::= modified modified*
//! modified ::= modified ('?' | '*' | '+') | atomic
//! atomic   ::= '(' regex ')' | identifier | '<' identifier '>' | '^' | '/' | '!'
//! ```
//!
//! Alternation and concatenation nodes are only created when there are at
//! least two operands; a quantifier wraps the preceding operand retroactively
//! via a checkpoint.

use super::core::Parser;
use super::cst::SyntaxKind::{self, *};
use super::cst::token_sets::{ANCHORS, ATOM_FIRST, QUANTIFIERS};
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub(super) fn parse_root(&mut self) {
        self.start_node(Root);

        if self.at_end() {
            self.error(DiagnosticKind::ExpectedExpression);
        } else {
            self.parse_union();
            while !self.should_stop() {
                self.error_and_bump(DiagnosticKind::UnexpectedToken);
                if self.currently_is_one_of(ATOM_FIRST) {
                    self.parse_union();
                }
            }
        }

        self.eat_trivia();
        self.finish_node();
    }

    fn parse_union(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_concat();

        if !self.currently_is(Pipe) {
            return;
        }

        self.start_node_at(checkpoint, Alt);
        while self.eat_token(Pipe) {
            self.parse_concat();
        }
        self.finish_node();
    }

    fn parse_concat(&mut self) {
        if !self.currently_is_one_of(ATOM_FIRST) {
            self.error(DiagnosticKind::ExpectedExpression);
            return;
        }

        let checkpoint = self.checkpoint();
        self.parse_modified();

        if !self.currently_is_one_of(ATOM_FIRST) || self.has_fatal_error() {
            return;
        }

        self.start_node_at(checkpoint, Concat);
        while self.currently_is_one_of(ATOM_FIRST) && !self.has_fatal_error() {
            self.parse_modified();
        }
        self.finish_node();
    }

    fn parse_modified(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_atomic();

        // Every quantifier nests the operand one level deeper.
        let mut depth = 0;
        while self.currently_is_one_of(QUANTIFIERS) && !self.has_fatal_error() {
            if !self.enter_recursion() {
                break;
            }
            depth += 1;
            self.start_node_at(checkpoint, Quantified);
            self.bump();
            self.finish_node();
        }
        for _ in 0..depth {
            self.exit_recursion();
        }
    }

    fn parse_atomic(&mut self) {
        match self.current() {
            ParenOpen => self.parse_group(),
            AngleOpen => self.parse_subexpr_ref(),
            Id => self.parse_leaf(Ident),
            kind if ANCHORS.contains(kind) => self.parse_leaf(Anchor),
            _ => self.error(DiagnosticKind::ExpectedExpression),
        }
    }

    fn parse_leaf(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.finish_node();
    }

    /// `(` regex `)`
    fn parse_group(&mut self) {
        if !self.enter_recursion() {
            return;
        }

        self.start_node(Group);
        let open = self.current_span();
        self.bump();

        if self.currently_is(ParenClose) {
            self.error(DiagnosticKind::ExpectedExpression);
        } else if !self.at_end() {
            self.parse_union();
        }

        if !self.eat_token(ParenClose) && !self.has_fatal_error() {
            self.error_related(
                DiagnosticKind::UnclosedGroup,
                Some(("group started here", open)),
            );
        }

        self.finish_node();
        self.exit_recursion();
    }

    /// `<` identifier `>`
    fn parse_subexpr_ref(&mut self) {
        self.start_node(SubExprRef);
        let open = self.current_span();
        self.bump();

        if !self.eat_token(Id) {
            self.error(DiagnosticKind::ExpectedSubExpressionName);
        }

        if !self.eat_token(AngleClose) {
            self.error_related(
                DiagnosticKind::UnclosedSubExpressionRef,
                Some(("reference started here", open)),
            );
        }

        self.finish_node();
    }
}
