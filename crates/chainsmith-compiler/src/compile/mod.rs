//! Grammar to automaton compilation.
//!
//! Pipeline for one grammar:
//! 1. Every subexpression body is translated to an NFA over the action
//!    alphabet plus three anchor symbols, determinized and minimized. Own-scope
//!    bodies are closed (anchors resolved and stripped). Results are memoized
//!    by name, so each subexpression is compiled once.
//! 2. The root, which always has its own scope, goes through the same steps.
//! 3. Postprocessing: prefix closure, global self-loops, terminator flattening.
//! 4. Finalization into the public [`Automaton`] with canonical ids.

mod alphabet;
mod finalize;
mod postprocess;
mod scope;
mod translate;

#[cfg(test)]
mod alphabet_tests;
#[cfg(test)]
mod compile_tests;
#[cfg(test)]
mod scope_tests;

use std::collections::{HashMap, HashSet};

use chainsmith_core::{ActionTable, Automaton};

use crate::analyze::{Registry, SubExpression};
use crate::automata::{Dfa, Nfa};

pub use alphabet::{Alphabet, ScopeAnchor, SymbolKind};

use finalize::finalize;
use postprocess::postprocess;
use scope::{close_scope, scope_language};

/// First problem found while compiling; `context` is the subexpression the
/// offending text belongs to, `None` for the root grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("`{name}` is not a declared action{}", in_context(.context))]
    UndefinedIdentifier {
        name: String,
        context: Option<String>,
    },
    #[error("subexpression `<{name}>` is not defined{}", in_context(.context))]
    UndefinedSubExpression {
        name: String,
        context: Option<String>,
    },
    #[error("subexpression `<{name}>` is used recursively")]
    RecursiveSubExpression { name: String },
}

fn in_context(context: &Option<String>) -> String {
    match context {
        Some(name) => format!(" (in subexpression `{name}`)"),
        None => String::new(),
    }
}

pub struct Compiler<'a> {
    registry: &'a Registry,
    actions: &'a ActionTable,
    alphabet: Alphabet,
    /// Finished subexpression automata, anchors of non-own-scope bodies intact.
    compiled: HashMap<String, Dfa>,
    in_progress: HashSet<String>,
}

impl<'a> Compiler<'a> {
    pub fn new(registry: &'a Registry, actions: &'a ActionTable) -> Self {
        Self {
            registry,
            actions,
            alphabet: Alphabet::new(actions),
            compiled: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn compile(mut self) -> Result<Automaton, CompileError> {
        for id in self.actions.global_terminators() {
            log::warn!(
                "action `{}` is global and a terminator: it ends the chain from every state",
                self.actions.label(id)
            );
        }
        log::debug!(
            "alphabet: {} actions under {} names",
            self.alphabet.action_symbols(),
            self.actions.names().count()
        );

        let root = self.compile_body(self.registry.root())?;
        log::debug!("root automaton: {} states", root.state_count());

        let processed = postprocess(&root, &self.alphabet, self.actions);
        log::debug!(
            "postprocessed automaton: {} states, {} transitions",
            processed.state_count(),
            processed.transition_count()
        );

        let automaton = finalize(&processed, &self.alphabet, self.actions);
        log::debug!("compiled automaton: {} states", automaton.state_count());
        Ok(automaton)
    }

    /// Compiled automaton of a named subexpression, built on first use.
    fn subexpression(&mut self, name: &str, context: Option<&str>) -> Result<&Dfa, CompileError> {
        if !self.compiled.contains_key(name) {
            let Some(sub) = self.registry.get(name) else {
                return Err(CompileError::UndefinedSubExpression {
                    name: name.to_owned(),
                    context: context.map(str::to_owned),
                });
            };
            if !self.in_progress.insert(name.to_owned()) {
                return Err(CompileError::RecursiveSubExpression {
                    name: name.to_owned(),
                });
            }

            let dfa = self.compile_body(sub)?;
            self.in_progress.remove(name);
            log::debug!(
                "subexpression <{name}>: {} states{}",
                dfa.state_count(),
                if sub.is_own_scope() { ", own scope" } else { "" }
            );
            self.compiled.insert(name.to_owned(), dfa);
        }
        Ok(&self.compiled[name])
    }

    fn compile_body(&mut self, expr: &SubExpression) -> Result<Dfa, CompileError> {
        let mut nfa = Nfa::new(self.alphabet.size());
        let body = self.translate(&mut nfa, expr.body(), expr.name())?;

        if !expr.is_own_scope() {
            return Ok(Dfa::from_nfa(&nfa, body).minimize());
        }

        let start = nfa.symbol(self.alphabet.anchor(ScopeAnchor::Start));
        let start = nfa.optional(start);
        let scoped = nfa.sequence(&[start, body]);
        let anchored = Dfa::from_nfa(&nfa, scoped)
            .intersect(&scope_language(&self.alphabet))
            .minimize();
        Ok(close_scope(&anchored, &self.alphabet))
    }
}
