//! Grammar texts of one compilation.
//!
//! A definition has one root grammar and any number of named subexpression
//! bodies; each is a separate source so diagnostics can point into it and
//! name the subexpression they occurred in.

/// Lightweight handle to a source in a compilation session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct SourceId(pub(crate) u32);

/// Describes the origin of a source.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SourceKind {
    /// The top-level grammar.
    Root,
    /// The body of a named subexpression.
    SubExpression(String),
}

impl SourceKind {
    /// Subexpression name, absent for the root grammar.
    pub fn context_name(&self) -> Option<&str> {
        match self {
            SourceKind::Root => None,
            SourceKind::SubExpression(name) => Some(name),
        }
    }
}

/// A borrowed view of a source: id, kind, and content.
#[derive(Clone, Debug)]
pub struct Source<'q> {
    pub id: SourceId,
    pub kind: &'q SourceKind,
    pub content: &'q str,
}

#[derive(Clone, Debug)]
struct SourceEntry {
    kind: SourceKind,
    content: String,
}

#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    /// File the grammar texts were loaded from, used in display names.
    origin: Option<String>,
    entries: Vec<SourceEntry>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn add_root(&mut self, content: &str) -> SourceId {
        self.push_entry(SourceKind::Root, content)
    }

    pub fn add_subexpression(&mut self, name: &str, content: &str) -> SourceId {
        self.push_entry(SourceKind::SubExpression(name.to_owned()), content)
    }

    pub fn content(&self, id: SourceId) -> &str {
        self.entries
            .get(id.0 as usize)
            .map(|e| e.content.as_str())
            .expect("invalid SourceId")
    }

    pub fn kind(&self, id: SourceId) -> &SourceKind {
        self.entries
            .get(id.0 as usize)
            .map(|e| &e.kind)
            .expect("invalid SourceId")
    }

    /// Subexpression a source belongs to, `None` for the root grammar.
    pub fn context_name(&self, id: SourceId) -> Option<&str> {
        self.kind(id).context_name()
    }

    /// Name shown in rendered diagnostics.
    pub fn display_name(&self, id: SourceId) -> String {
        let local = match self.kind(id) {
            SourceKind::Root => "<syntax>".to_owned(),
            SourceKind::SubExpression(name) => format!("<{name}>"),
        };
        match &self.origin {
            Some(origin) => format!("{origin} {local}"),
            None => local,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: SourceId) -> Source<'_> {
        let entry = self.entries.get(id.0 as usize).expect("invalid SourceId");
        Source {
            id,
            kind: &entry.kind,
            content: &entry.content,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Source<'_>> {
        self.entries.iter().enumerate().map(|(idx, entry)| Source {
            id: SourceId(idx as u32),
            kind: &entry.kind,
            content: &entry.content,
        })
    }

    fn push_entry(&mut self, kind: SourceKind, content: &str) -> SourceId {
        let id = SourceId(self.entries.len() as u32);
        self.entries.push(SourceEntry {
            kind,
            content: content.to_owned(),
        });
        id
    }
}
