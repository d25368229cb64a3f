//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::message::{DiagnosticMessage, Severity};
use crate::source_map::SourceMap;

/// Renders diagnostics against the grammar texts they point into.
///
/// Each diagnostic is drawn over its own source (the root grammar or a
/// subexpression body), labeled with that source's display name.
pub struct DiagnosticsPrinter<'a> {
    messages: Vec<DiagnosticMessage>,
    source_map: &'a SourceMap,
    colored: bool,
    plain: bool,
}

impl<'a> DiagnosticsPrinter<'a> {
    pub fn new(messages: Vec<DiagnosticMessage>, source_map: &'a SourceMap) -> Self {
        Self {
            messages,
            source_map,
            colored: false,
            plain: false,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// One line per diagnostic, without source excerpts.
    pub fn plain(mut self, value: bool) -> Self {
        self.plain = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        if self.plain {
            return self.format_plain(w);
        }

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.messages.iter().enumerate() {
            let source = self.source_map.content(diag.source);
            let path = self.source_map.display_name(diag.source);
            let range = adjust_range(diag.range, source.len());

            let mut snippet = Snippet::source(source)
                .line_start(1)
                .path(path.as_str())
                .annotation(
                    AnnotationKind::Primary
                        .span(range.clone())
                        .label(&diag.message),
                );

            for related in &diag.related {
                snippet = snippet.annotation(
                    AnnotationKind::Context
                        .span(adjust_range(related.range, source.len()))
                        .label(&related.message),
                );
            }

            let level = severity_to_level(diag.severity());
            let report: Vec<Group> = vec![level.primary_title(&diag.message).element(snippet)];

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        for diag in &self.messages {
            let path = self.source_map.display_name(diag.source);
            writeln!(w, "{path}: {diag}")?;
        }
        Ok(())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}
