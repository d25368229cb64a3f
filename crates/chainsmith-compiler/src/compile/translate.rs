//! Grammar AST to NFA fragments.

use crate::automata::{Dfa, Fragment, Nfa};
use crate::parser::{ModifierOp, Regex};

use super::alphabet::ScopeAnchor;
use super::{CompileError, Compiler};

impl Compiler<'_> {
    pub(super) fn translate(
        &mut self,
        nfa: &mut Nfa,
        regex: &Regex,
        context: Option<&str>,
    ) -> Result<Fragment, CompileError> {
        let fragment = match regex {
            Regex::Literal(name) => {
                let range = self.alphabet.range(&name.text).ok_or_else(|| {
                    CompileError::UndefinedIdentifier {
                        name: name.text.clone(),
                        context: context.map(str::to_owned),
                    }
                })?;
                nfa.symbols(range)
            }
            Regex::Concat(children) => {
                let parts = self.translate_all(nfa, children, context)?;
                nfa.sequence(&parts)
            }
            Regex::Alt(children) => {
                let parts = self.translate_all(nfa, children, context)?;
                nfa.alternation(&parts)
            }
            Regex::Modifier(child, op) => {
                let inner = self.translate(nfa, child, context)?;
                match op {
                    ModifierOp::Star => nfa.zero_or_more(inner),
                    ModifierOp::Plus => nfa.one_or_more(inner),
                    ModifierOp::Optional => nfa.optional(inner),
                }
            }
            Regex::SubExprRef(name) => {
                let dfa = self.subexpression(&name.text, context)?;
                nfa.embed(dfa)
            }
            Regex::NonEmpty(child) => {
                let size = self.alphabet.size();
                let mut inner = Nfa::new(size);
                let fragment = self.translate(&mut inner, child, context)?;
                let non_empty = Dfa::from_nfa(&inner, fragment)
                    .intersect(&Dfa::empty_word(size).complement())
                    .minimize();
                nfa.embed(&non_empty)
            }
            Regex::ScopeStart => nfa.symbol(self.alphabet.anchor(ScopeAnchor::Start)),
            Regex::ScopeEnd => nfa.symbol(self.alphabet.anchor(ScopeAnchor::End)),
            Regex::ScopeInner => nfa.symbol(self.alphabet.anchor(ScopeAnchor::Inner)),
        };
        Ok(fragment)
    }

    fn translate_all(
        &mut self,
        nfa: &mut Nfa,
        children: &[Regex],
        context: Option<&str>,
    ) -> Result<Vec<Fragment>, CompileError> {
        children
            .iter()
            .map(|child| self.translate(nfa, child, context))
            .collect()
    }
}
