//! Named grammar fragments.
//!
//! The top-level grammar is stored as an unnamed subexpression that always
//! opens its own scope.

use indexmap::IndexMap;
use rowan::TextRange;

use crate::parser::Regex;
use crate::source_map::SourceId;

#[derive(Clone, Debug)]
pub struct SubExpression {
    /// `None` for the top-level grammar.
    name: Option<String>,
    body: Regex,
    own_scope: bool,
    source: SourceId,
    /// Extent of the body text, used when reporting on the whole body.
    span: TextRange,
}

impl SubExpression {
    pub fn root(body: Regex) -> Self {
        Self {
            name: None,
            body,
            own_scope: true,
            source: SourceId::default(),
            span: TextRange::default(),
        }
    }

    pub fn named(name: impl Into<String>, body: Regex, own_scope: bool) -> Self {
        Self {
            name: Some(name.into()),
            body,
            own_scope,
            source: SourceId::default(),
            span: TextRange::default(),
        }
    }

    pub fn with_source(mut self, source: SourceId, span: TextRange) -> Self {
        self.source = source;
        self.span = span;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn body(&self) -> &Regex {
        &self.body
    }

    pub fn is_own_scope(&self) -> bool {
        self.own_scope
    }

    pub fn is_root(&self) -> bool {
        self.name.is_none()
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    pub fn span(&self) -> TextRange {
        self.span
    }
}

/// The root grammar plus every named subexpression, in definition order.
#[derive(Clone, Debug)]
pub struct Registry {
    root: SubExpression,
    named: IndexMap<String, SubExpression>,
}

impl Registry {
    pub fn new(root: SubExpression) -> Self {
        assert!(root.is_root(), "registry root must be unnamed");
        Self {
            root,
            named: IndexMap::new(),
        }
    }

    /// Adds a named subexpression.
    ///
    /// Returns the previous definition if the name was already taken; the new
    /// one replaces it.
    pub fn define(&mut self, sub: SubExpression) -> Option<SubExpression> {
        let name = sub
            .name
            .clone()
            .expect("only named subexpressions can be defined");
        self.named.insert(name, sub)
    }

    pub fn root(&self) -> &SubExpression {
        &self.root
    }

    pub fn get(&self, name: &str) -> Option<&SubExpression> {
        self.named.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.named.contains_key(name)
    }

    /// Named subexpressions in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &SubExpression> {
        self.named.values()
    }

    pub fn len(&self) -> usize {
        self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }
}
