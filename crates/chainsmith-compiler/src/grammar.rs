//! Staged pipeline: parse → analyze → compile.
//!
//! Each stage keeps the diagnostics of the previous ones, so a caller can stop
//! after any stage and still report everything found so far.

use chainsmith_core::{ActionTable, Automaton};
use indexmap::IndexSet;

use crate::analyze::{Registry, Resolution, SubExpression, resolve};
use crate::compile::Compiler;
use crate::diagnostics::Diagnostics;
use crate::parser::{Regex, SyntaxNode, lower, parse};
use crate::source_map::{SourceId, SourceMap};
use crate::{Error, Result};

const DEFAULT_PARSE_RECURSION_LIMIT: u32 = 512;

#[derive(Clone, Debug)]
pub struct GrammarConfig {
    /// Maximum group nesting depth.
    pub parse_recursion_limit: u32,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            parse_recursion_limit: DEFAULT_PARSE_RECURSION_LIMIT,
        }
    }
}

#[derive(Clone, Debug)]
struct SubExpressionText {
    name: String,
    body: String,
    own_scope: bool,
}

pub struct GrammarBuilder {
    actions: ActionTable,
    syntax: String,
    subexpressions: Vec<SubExpressionText>,
    origin: Option<String>,
    config: GrammarConfig,
}

impl GrammarBuilder {
    pub fn new(actions: ActionTable, syntax: impl Into<String>) -> Self {
        Self {
            actions,
            syntax: syntax.into(),
            subexpressions: Vec::new(),
            origin: None,
            config: GrammarConfig::default(),
        }
    }

    pub fn subexpression(
        mut self,
        name: impl Into<String>,
        body: impl Into<String>,
        own_scope: bool,
    ) -> Self {
        self.subexpressions.push(SubExpressionText {
            name: name.into(),
            body: body.into(),
            own_scope,
        });
        self
    }

    /// Where the grammar came from, shown in rendered diagnostics.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_config(mut self, config: GrammarConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_parse_recursion_limit(mut self, limit: u32) -> Self {
        self.config.parse_recursion_limit = limit;
        self
    }

    /// Parses the root grammar and every subexpression body.
    ///
    /// Syntax errors end up in the diagnostics; only nesting beyond the
    /// recursion limit or a name defined twice fails here.
    pub fn parse(self) -> Result<GrammarParsed> {
        let mut seen = IndexSet::new();
        for sub in &self.subexpressions {
            if !seen.insert(sub.name.as_str()) {
                return Err(Error::Definition(format!(
                    "subexpression `{}` is defined more than once",
                    sub.name
                )));
            }
        }

        let mut source_map = SourceMap::new();
        if let Some(origin) = &self.origin {
            source_map = source_map.with_origin(origin);
        }

        let mut sources = Vec::with_capacity(self.subexpressions.len() + 1);
        let root = source_map.add_root(&self.syntax);
        sources.push((root, None, true));
        for sub in &self.subexpressions {
            let id = source_map.add_subexpression(&sub.name, &sub.body);
            sources.push((id, Some(sub.name.clone()), sub.own_scope));
        }

        let mut diag = Diagnostics::new();
        let mut parsed = Vec::with_capacity(sources.len());
        for (id, name, own_scope) in sources {
            let res = parse(
                source_map.content(id),
                id,
                self.config.parse_recursion_limit,
            )?;
            let ast = if res.diagnostics.is_empty() {
                lower(&res.root)
            } else {
                None
            };
            diag.extend(res.diagnostics);
            parsed.push(ParsedSource {
                id,
                name,
                own_scope,
                cst: res.root,
                ast,
            });
        }

        log::debug!(
            "parsed {} sources, {} diagnostics",
            parsed.len(),
            diag.len()
        );

        Ok(GrammarParsed {
            actions: self.actions,
            source_map,
            sources: parsed,
            diag,
        })
    }
}

/// One parsed grammar text.
#[derive(Debug)]
pub struct ParsedSource {
    id: SourceId,
    name: Option<String>,
    own_scope: bool,
    cst: SyntaxNode,
    ast: Option<Regex>,
}

impl ParsedSource {
    pub fn id(&self) -> SourceId {
        self.id
    }

    /// Subexpression name, `None` for the root grammar.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_own_scope(&self) -> bool {
        self.own_scope
    }

    pub fn cst(&self) -> &SyntaxNode {
        &self.cst
    }

    /// Typed tree, absent when the text has syntax errors.
    pub fn ast(&self) -> Option<&Regex> {
        self.ast.as_ref()
    }
}

#[derive(Debug)]
pub struct GrammarParsed {
    actions: ActionTable,
    source_map: SourceMap,
    /// Root grammar first, then subexpressions in definition order.
    sources: Vec<ParsedSource>,
    diag: Diagnostics,
}

impl GrammarParsed {
    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diag
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    pub fn sources(&self) -> &[ParsedSource] {
        &self.sources
    }

    pub fn root(&self) -> &ParsedSource {
        &self.sources[0]
    }

    fn build_registry(&self) -> Option<Registry> {
        let (root, subs) = self.sources.split_first()?;
        let root_sub = SubExpression::root(root.ast.clone()?).with_source(root.id, root.cst.text_range());
        let mut registry = Registry::new(root_sub);
        for source in subs {
            let name = source.name.clone()?;
            let sub = SubExpression::named(name, source.ast.clone()?, source.own_scope)
                .with_source(source.id, source.cst.text_range());
            registry.define(sub);
        }
        Some(registry)
    }

    /// Resolves references and checks literals against the actions.
    ///
    /// Skipped when parsing reported errors: analysis needs every tree.
    pub fn analyze(mut self) -> GrammarAnalyzed {
        if self.diag.has_errors() {
            return GrammarAnalyzed {
                parsed: self,
                registry: None,
                resolution: Resolution::default(),
            };
        }

        let registry = self.build_registry();
        let resolution = match &registry {
            Some(registry) => resolve(registry, &self.actions, &mut self.diag),
            None => Resolution::default(),
        };

        GrammarAnalyzed {
            parsed: self,
            registry,
            resolution,
        }
    }
}

#[derive(Debug)]
pub struct GrammarAnalyzed {
    parsed: GrammarParsed,
    registry: Option<Registry>,
    resolution: Resolution,
}

impl GrammarAnalyzed {
    pub fn is_valid(&self) -> bool {
        !self.parsed.diag.has_errors()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.parsed.diag
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.parsed.source_map
    }

    pub fn parsed(&self) -> &GrammarParsed {
        &self.parsed
    }

    pub fn registry(&self) -> Option<&Registry> {
        self.registry.as_ref()
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Builds the automaton, failing if any stage reported an error.
    ///
    /// Warnings are kept in [`Compiled::diagnostics`].
    pub fn compile(self) -> Result<Compiled> {
        let diag = self.parsed.diag;
        if diag.iter().any(|d| d.is_error() && d.kind().is_syntax_error()) {
            return Err(Error::GrammarSyntax(diag));
        }
        if diag.has_errors() {
            return Err(Error::GrammarAnalysis(diag));
        }

        let registry = self
            .registry
            .expect("error-free grammar always has a registry");
        let automaton = Compiler::new(&registry, &self.parsed.actions).compile()?;

        Ok(Compiled {
            automaton,
            diagnostics: diag,
            source_map: self.parsed.source_map,
        })
    }
}

/// A compiled grammar and the warnings found along the way.
#[derive(Debug)]
pub struct Compiled {
    pub automaton: Automaton,
    pub diagnostics: Diagnostics,
    pub source_map: SourceMap,
}

/// Compiles a grammar in one go.
///
/// `subexpressions` holds `(name, body, own_scope)` triples.
pub fn compile(
    actions: ActionTable,
    syntax: &str,
    subexpressions: &[(&str, &str, bool)],
) -> Result<Automaton> {
    let mut builder = GrammarBuilder::new(actions, syntax);
    for &(name, body, own_scope) in subexpressions {
        builder = builder.subexpression(name, body, own_scope);
    }
    Ok(builder.parse()?.analyze().compile()?.automaton)
}
