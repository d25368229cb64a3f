//! Parser state machine and low-level operations.

use std::cell::Cell;

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::cst::{SyntaxKind, SyntaxNode, TokenSet};
use super::lexer::{Token, token_text};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::source_map::SourceId;

/// Operations allowed without consuming a token before the parser is
/// considered stuck.
const DEBUG_FUEL: u32 = 256;

#[derive(Debug)]
pub struct ParseResult {
    pub root: SyntaxNode,
    pub diagnostics: Diagnostics,
}

/// Trivia tokens are buffered and flushed when starting a new node.
pub struct Parser<'src> {
    pub(super) source: &'src str,
    source_id: SourceId,
    tokens: Vec<Token>,
    pos: usize,
    trivia_buffer: Vec<Token>,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Diagnostics,
    depth: u32,
    last_diagnostic_pos: Option<TextSize>,
    debug_fuel: Cell<u32>,
    recursion_limit: u32,
    fatal_error: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(
        source: &'src str,
        source_id: SourceId,
        tokens: Vec<Token>,
        recursion_limit: u32,
    ) -> Self {
        Self {
            source,
            source_id,
            tokens,
            pos: 0,
            trivia_buffer: Vec::with_capacity(4),
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_diagnostic_pos: None,
            debug_fuel: Cell::new(DEBUG_FUEL),
            recursion_limit,
            fatal_error: None,
        }
    }

    pub fn parse(mut self) -> Result<ParseResult, Error> {
        self.parse_root();
        let (cst, diagnostics) = self.finish()?;
        Ok(ParseResult {
            root: SyntaxNode::new_root(cst),
            diagnostics,
        })
    }

    fn finish(mut self) -> Result<(GreenNode, Diagnostics), Error> {
        self.drain_trivia();
        if let Some(err) = self.fatal_error {
            return Err(err);
        }
        Ok((self.builder.finish(), self.diagnostics))
    }

    pub(super) fn has_fatal_error(&self) -> bool {
        self.fatal_error.is_some()
    }

    pub(super) fn current(&mut self) -> SyntaxKind {
        self.skip_trivia_to_buffer();
        self.ensure_progress();
        self.tokens
            .get(self.pos)
            .map_or(SyntaxKind::Error, |t| t.kind)
    }

    fn ensure_progress(&self) {
        let fuel = self.debug_fuel.get();
        assert!(fuel > 0, "parser is stuck at token {}", self.pos);
        self.debug_fuel.set(fuel - 1);
    }

    fn reset_debug_fuel(&self) {
        self.debug_fuel.set(DEBUG_FUEL);
    }

    pub(super) fn current_span(&mut self) -> TextRange {
        self.skip_trivia_to_buffer();
        self.tokens
            .get(self.pos)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    /// Text of the current token, `None` at end of input.
    pub(super) fn current_text(&mut self) -> Option<&'src str> {
        self.skip_trivia_to_buffer();
        let source = self.source;
        self.tokens.get(self.pos).map(|t| token_text(source, t))
    }

    fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// End of input, ignoring trailing trivia.
    pub(super) fn at_end(&mut self) -> bool {
        self.skip_trivia_to_buffer();
        self.eof()
    }

    pub(super) fn should_stop(&mut self) -> bool {
        self.at_end() || self.has_fatal_error()
    }

    pub(super) fn currently_is(&mut self, kind: SyntaxKind) -> bool {
        !self.at_end() && self.current() == kind
    }

    pub(super) fn currently_is_one_of(&mut self, set: TokenSet) -> bool {
        !self.at_end() && set.contains(self.current())
    }

    fn skip_trivia_to_buffer(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.trivia_buffer.push(self.tokens[self.pos]);
            self.pos += 1;
        }
    }

    fn drain_trivia(&mut self) {
        for token in self.trivia_buffer.drain(..) {
            let text = token_text(self.source, &token);
            self.builder.token(token.kind.into(), text);
        }
    }

    pub(super) fn eat_trivia(&mut self) {
        self.skip_trivia_to_buffer();
        self.drain_trivia();
    }

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.drain_trivia();
        self.builder.start_node(kind.into());
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia_to_buffer();
        self.drain_trivia();
        self.builder.checkpoint()
    }

    pub(super) fn bump(&mut self) {
        self.skip_trivia_to_buffer();
        assert!(!self.eof(), "bump called at EOF");
        self.reset_debug_fuel();
        self.drain_trivia();

        let token = self.tokens[self.pos];
        let text = token_text(self.source, &token);
        self.builder.token(token.kind.into(), text);
        self.pos += 1;
    }

    pub(super) fn eat_token(&mut self, kind: SyntaxKind) -> bool {
        if self.currently_is(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn should_report(&mut self, pos: TextSize) -> bool {
        if self.last_diagnostic_pos == Some(pos) {
            return false;
        }
        self.last_diagnostic_pos = Some(pos);
        true
    }

    pub(super) fn bump_as_error(&mut self) {
        if !self.at_end() {
            self.start_node(SyntaxKind::Error);
            self.bump();
            self.finish_node();
        }
    }

    /// Reports `kind` at the current token, naming the token that was found.
    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        self.error_related(kind, None);
    }

    /// Like [`Self::error`], pointing back at an earlier span of the same source.
    pub(super) fn error_related(
        &mut self,
        kind: DiagnosticKind,
        related: Option<(&str, TextRange)>,
    ) {
        let range = self.current_span();
        if !self.should_report(range.start()) {
            return;
        }
        let found = self.current_text();
        let mut builder = self.diagnostics.report(self.source_id, kind, range);
        if let Some(found) = found {
            builder = builder.message(found);
        }
        if let Some((msg, related_range)) = related {
            builder = builder.related_to(msg, related_range);
        }
        builder.emit();
    }

    pub(super) fn error_and_bump(&mut self, kind: DiagnosticKind) {
        self.error(kind);
        self.bump_as_error();
    }

    pub(super) fn enter_recursion(&mut self) -> bool {
        if self.depth >= self.recursion_limit {
            if self.fatal_error.is_none() {
                self.fatal_error = Some(Error::RecursionLimitExceeded);
            }
            return false;
        }
        self.depth += 1;
        self.reset_debug_fuel();
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.reset_debug_fuel();
    }
}
