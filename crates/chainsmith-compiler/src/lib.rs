//! Chainsmith: compiles chained-call grammars into prefix-closed automata.
//!
//! A grammar is a regular expression over action names. The compiler turns it
//! into an [`Automaton`](chainsmith_core::Automaton) that says, after any
//! sequence of actions, which actions may come next.
//!
//! # Example
//!
//! ```
//! use chainsmith_compiler::GrammarBuilder;
//! use chainsmith_core::{Action, ActionTable};
//!
//! let actions = ActionTable::new([
//!     Action::new("add"),
//!     Action::new("days"),
//!     Action::new("to").terminator(),
//! ])
//! .unwrap();
//!
//! let compiled = GrammarBuilder::new(actions, "(add days)* to")
//!     .parse()
//!     .unwrap()
//!     .analyze()
//!     .compile()
//!     .unwrap();
//! println!("{}", compiled.automaton.dump());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod automata;
pub mod compile;
pub mod definition;
pub mod diagnostics;
pub mod grammar;
pub mod parser;
pub mod source_map;


use chainsmith_core::DuplicateActionError;

pub use compile::{CompileError, Compiler};
pub use definition::DslDefinition;
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use grammar::{Compiled, GrammarAnalyzed, GrammarBuilder, GrammarConfig, GrammarParsed, compile};
pub use source_map::{SourceId, SourceMap};

/// Errors that abort the compilation of one grammar.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Input nested too deeply.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("grammar parsing failed with {} errors", .0.error_count())]
    GrammarSyntax(Diagnostics),

    #[error("grammar analysis failed with {} errors", .0.error_count())]
    GrammarAnalysis(Diagnostics),

    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The action list itself is broken, not the grammar.
    #[error("internal error: {0}")]
    DuplicateAction(#[from] DuplicateActionError),

    #[error("invalid definition: {0}")]
    Definition(String),
}

impl Error {
    /// Diagnostics carried by grammar errors, for rendering.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Error::GrammarSyntax(d) | Error::GrammarAnalysis(d) => Some(d),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
