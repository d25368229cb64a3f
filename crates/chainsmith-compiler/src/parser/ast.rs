//! Typed grammar AST.
//!
//! The CST keeps every token; the AST keeps only what the automaton compiler
//! needs. `Concat` and `Alt` always hold at least two children, groups are
//! folded away.

use std::fmt;

use rowan::TextRange;

use super::cst::token_sets::{ANCHORS, QUANTIFIERS};
use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

/// A name as written in the grammar, with its position for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Name {
    pub text: String,
    pub range: TextRange,
}

impl Name {
    pub fn new(text: impl Into<String>, range: TextRange) -> Self {
        Self {
            text: text.into(),
            range,
        }
    }

    fn from_token(token: &SyntaxToken) -> Self {
        Self::new(token.text(), token.text_range())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModifierOp {
    Star,
    Plus,
    Optional,
}

impl ModifierOp {
    pub fn symbol(self) -> char {
        match self {
            ModifierOp::Star => '*',
            ModifierOp::Plus => '+',
            ModifierOp::Optional => '?',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Regex {
    /// Any overload of the named action.
    Literal(Name),
    Concat(Vec<Regex>),
    Alt(Vec<Regex>),
    Modifier(Box<Regex>, ModifierOp),
    SubExprRef(Name),
    /// The inner language without the empty sequence. Has no surface syntax.
    NonEmpty(Box<Regex>),
    ScopeStart,
    ScopeEnd,
    ScopeInner,
}

impl Regex {
    /// Literal without a source position, for grammars built in code.
    pub fn literal(name: &str) -> Self {
        Regex::Literal(Name::new(name, TextRange::default()))
    }

    pub fn subexpr_ref(name: &str) -> Self {
        Regex::SubExprRef(Name::new(name, TextRange::default()))
    }

    /// Sequence of `children`; a single child is returned as is.
    ///
    /// # Panics
    /// If `children` is empty.
    pub fn concat(children: Vec<Regex>) -> Self {
        Self::fold(children, Regex::Concat)
    }

    /// Choice between `children`; a single child is returned as is.
    ///
    /// # Panics
    /// If `children` is empty.
    pub fn alt(children: Vec<Regex>) -> Self {
        Self::fold(children, Regex::Alt)
    }

    pub fn modified(self, op: ModifierOp) -> Self {
        Regex::Modifier(Box::new(self), op)
    }

    pub fn non_empty(self) -> Self {
        Regex::NonEmpty(Box::new(self))
    }

    fn fold(mut children: Vec<Regex>, wrap: fn(Vec<Regex>) -> Regex) -> Self {
        assert!(!children.is_empty(), "empty operand list");
        if children.len() == 1 {
            return children.pop().expect("length checked above");
        }
        wrap(children)
    }

    /// Action names used by literals, in order of occurrence.
    pub fn literals(&self) -> Vec<&Name> {
        let mut out = Vec::new();
        self.collect(&mut |node| {
            if let Regex::Literal(name) = node {
                out.push(name);
            }
        });
        out
    }

    /// Subexpression references, in order of occurrence.
    pub fn subexpr_refs(&self) -> Vec<&Name> {
        let mut out = Vec::new();
        self.collect(&mut |node| {
            if let Regex::SubExprRef(name) = node {
                out.push(name);
            }
        });
        out
    }

    fn collect<'a>(&'a self, f: &mut impl FnMut(&'a Regex)) {
        f(self);
        match self {
            Regex::Concat(children) | Regex::Alt(children) => {
                for child in children {
                    child.collect(f);
                }
            }
            Regex::Modifier(child, _) | Regex::NonEmpty(child) => child.collect(f),
            Regex::Literal(_)
            | Regex::SubExprRef(_)
            | Regex::ScopeStart
            | Regex::ScopeEnd
            | Regex::ScopeInner => {}
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Regex::Alt(_) => 0,
            Regex::Concat(_) => 1,
            _ => 2,
        }
    }

    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.precedence() < min {
            write!(f, "(")?;
            self.fmt_at(f, 0)?;
            return write!(f, ")");
        }

        match self {
            Regex::Literal(name) => write!(f, "{}", name.text),
            Regex::SubExprRef(name) => write!(f, "<{}>", name.text),
            Regex::ScopeStart => write!(f, "^"),
            Regex::ScopeInner => write!(f, "/"),
            Regex::ScopeEnd => write!(f, "!"),
            Regex::Alt(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    child.fmt_at(f, 1)?;
                }
                Ok(())
            }
            Regex::Concat(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    child.fmt_at(f, 2)?;
                }
                Ok(())
            }
            Regex::Modifier(child, op) => {
                child.fmt_at(f, 2)?;
                write!(f, "{}", op.symbol())
            }
            Regex::NonEmpty(child) => {
                write!(f, "[")?;
                child.fmt_at(f, 0)?;
                write!(f, "]")
            }
        }
    }
}

/// Prints the grammar back with the fewest parentheses that keep its structure.
///
/// `NonEmpty` has no surface syntax; it prints as `[inner]`, which does not
/// parse back.
impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, 0)
    }
}

/// Lowers a parsed `Root` to the AST.
///
/// Returns `None` when the tree contains error nodes or is missing operands,
/// which only happens when the parser reported errors.
pub fn lower(root: &SyntaxNode) -> Option<Regex> {
    let mut nodes = root.children();
    let expr = nodes.next()?;
    if nodes.next().is_some() {
        return None;
    }
    lower_node(&expr)
}

fn lower_node(node: &SyntaxNode) -> Option<Regex> {
    match node.kind() {
        SyntaxKind::Alt => {
            let children = lower_children(node)?;
            (children.len() >= 2).then(|| Regex::Alt(children))
        }
        SyntaxKind::Concat => {
            let children = lower_children(node)?;
            (children.len() >= 2).then(|| Regex::Concat(children))
        }
        SyntaxKind::Quantified => {
            let operand = lower_node(&node.children().next()?)?;
            let op = match first_token(node, |k| {
                matches!(k, SyntaxKind::Star | SyntaxKind::Plus | SyntaxKind::Question)
            })?
            .kind()
            {
                SyntaxKind::Star => ModifierOp::Star,
                SyntaxKind::Plus => ModifierOp::Plus,
                _ => ModifierOp::Optional,
            };
            Some(operand.modified(op))
        }
        SyntaxKind::Group => {
            let mut inner = node.children();
            let expr = inner.next()?;
            if inner.next().is_some() {
                return None;
            }
            lower_node(&expr)
        }
        SyntaxKind::Ident => {
            let token = first_token(node, |k| k == SyntaxKind::Id)?;
            Some(Regex::Literal(Name::from_token(&token)))
        }
        SyntaxKind::SubExprRef => {
            let token = first_token(node, |k| k == SyntaxKind::Id)?;
            Some(Regex::SubExprRef(Name::from_token(&token)))
        }
        SyntaxKind::Anchor => {
            let token = first_token(node, |k| {
                matches!(k, SyntaxKind::Caret | SyntaxKind::Slash | SyntaxKind::Bang)
            })?;
            Some(match token.kind() {
                SyntaxKind::Caret => Regex::ScopeStart,
                SyntaxKind::Slash => Regex::ScopeInner,
                _ => Regex::ScopeEnd,
            })
        }
        _ => None,
    }
}

fn lower_children(node: &SyntaxNode) -> Option<Vec<Regex>> {
    node.children().map(|child| lower_node(&child)).collect()
}

fn first_token(node: &SyntaxNode, pred: impl Fn(SyntaxKind) -> bool) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| pred(token.kind()))
}

/// Indented tree dump of a CST for debugging.
///
/// With `raw`, every token (whitespace included) is printed too.
pub fn dump_cst(root: &SyntaxNode, raw: bool) -> String {
    let mut out = String::new();
    dump_node(root, raw, 0, &mut out).expect("String write never fails");
    out
}

fn dump_node(node: &SyntaxNode, raw: bool, depth: usize, w: &mut String) -> std::fmt::Result {
    use std::fmt::Write;

    let indent = "  ".repeat(depth);
    writeln!(w, "{indent}{:?}", node.kind())?;

    for element in node.children_with_tokens() {
        match element {
            rowan::NodeOrToken::Node(child) => dump_node(&child, raw, depth + 1, w)?,
            rowan::NodeOrToken::Token(token) => {
                if raw || is_named_token(token.kind()) {
                    writeln!(w, "{indent}  {:?} {:?}", token.kind(), token.text())?;
                }
            }
        }
    }
    Ok(())
}

/// Tokens that carry information beyond the node they sit in.
fn is_named_token(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::Id | SyntaxKind::Garbage)
        || QUANTIFIERS.contains(kind)
        || ANCHORS.contains(kind)
}
