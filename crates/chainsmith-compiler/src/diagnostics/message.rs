use rowan::TextRange;

use crate::source_map::SourceId;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// When two diagnostics start at the same position, the higher-priority one
/// suppresses the other. Unclosed delimiters come first because they cascade
/// into everything parsed after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Cascading syntax errors
    UnclosedGroup,
    UnclosedSubExpressionRef,

    // Something required is missing
    ExpectedExpression,
    ExpectedSubExpressionName,

    // Something that doesn't belong
    UnexpectedToken,

    // Valid syntax, invalid semantics
    UndefinedIdentifier,
    UndefinedSubExpression,
    RecursiveSubExpression,

    // Observations
    UnusedSubExpression,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnusedSubExpression => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    /// Errors produced while parsing, as opposed to analysis.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            Self::UnclosedGroup
                | Self::UnclosedSubExpressionRef
                | Self::ExpectedExpression
                | Self::ExpectedSubExpressionName
                | Self::UnexpectedToken
        )
    }

    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedGroup => "missing closing `)`",
            Self::UnclosedSubExpressionRef => "missing closing `>`",

            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedSubExpressionName => "expected subexpression name",

            Self::UnexpectedToken => "unexpected token",

            Self::UndefinedIdentifier => "undefined action",
            Self::UndefinedSubExpression => "undefined subexpression",
            Self::RecursiveSubExpression => "recursive subexpression",

            Self::UnusedSubExpression => "unused subexpression",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UndefinedIdentifier => "`{}` is not a declared action".to_string(),
            Self::UndefinedSubExpression => "subexpression `<{}>` is not defined".to_string(),
            Self::RecursiveSubExpression => {
                "subexpression `<{}>` is used recursively".to_string()
            }
            Self::UnusedSubExpression => "subexpression `{}` is never used".to_string(),

            Self::UnexpectedToken => "unexpected `{}`".to_string(),

            // Syntax errors name what was found instead
            _ => format!("{}, found `{{}}`", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Which grammar text (root or subexpression body) this belongs to.
    pub(crate) source: SourceId,
    pub(crate) range: TextRange,
    pub(crate) message: String,
    /// Offending name or text, when the diagnostic is about one.
    pub(crate) detail: Option<String>,
    /// Secondary spans, always within `source`.
    pub(crate) related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn new(source: SourceId, kind: DiagnosticKind, range: TextRange) -> Self {
        Self {
            kind,
            source,
            range,
            message: kind.fallback_message().to_string(),
            detail: None,
            related: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        Ok(())
    }
}
