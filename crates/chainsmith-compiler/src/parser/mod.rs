//! Grammar parser: lexer, lossless CST, and lowering to the typed AST.
//!
//! Parsing is resilient: malformed input yields diagnostics plus a best-effort
//! tree. Only a tree without errors is lowered to a [`Regex`].

mod ast;
mod core;
mod cst;
mod grammar;
mod lexer;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod parser_tests;

pub use ast::{ModifierOp, Name, Regex, dump_cst, lower};
pub use core::{ParseResult, Parser};
pub use cst::{GLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, TokenSet, token_sets};
pub use lexer::{Token, lex, token_text};

use crate::Error;
use crate::source_map::SourceId;

/// Lex and parse one grammar text.
pub fn parse(source: &str, source_id: SourceId, recursion_limit: u32) -> Result<ParseResult, Error> {
    let tokens = lex(source);
    Parser::new(source, source_id, tokens, recursion_limit).parse()
}
