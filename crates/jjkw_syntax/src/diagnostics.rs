//! Diagnostics and error reporting for the grammar frontend.
//!
//! Every stage collects [`CompileError`]s instead of stopping at the first problem. Rendering with source context
//! goes through miette (see [`CompileError::to_report`]).

use std::fmt;

use miette::{Diagnostic, LabeledSpan, NamedSource, Report, Severity};
use thiserror::Error;

use crate::ast::Span;

/// A grammar error with location information
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct CompileError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn new(message: String, span: Span) -> Self {
        Self::with_kind(ErrorKind::Lex, message, span)
    }

    pub fn syntax(message: String, span: Span) -> Self {
        Self::with_kind(ErrorKind::Syntax, message, span)
    }

    pub fn semantic(message: String, span: Span) -> Self {
        Self::with_kind(ErrorKind::Semantic, message, span)
    }

    fn with_kind(kind: ErrorKind, message: String, span: Span) -> Self {
        Self {
            message,
            span,
            kind,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// Convert this error into a miette report carrying the grammar source.
    ///
    /// ## Notes
    /// - Spans outside `source` are clamped rather than dropped, so a stale span still renders.
    pub fn to_report(&self, file_name: &str, source: &str) -> Report {
        let len = source.len();
        let start = self.span.start.min(len);
        let end = self.span.end.min(len).max(start);
        let diagnostic = RenderedError {
            message: format!("{}: {}", self.kind, self.message),
            help: if self.hints.is_empty() {
                None
            } else {
                Some(self.hints.join("\n"))
            },
            labels: vec![LabeledSpan::new_primary_with_span(
                Some(self.kind.to_string()),
                (start, end - start),
            )],
            related: self.notes.iter().cloned().map(NoteDiagnostic).collect(),
        };
        Report::new(diagnostic).with_source_code(NamedSource::new(file_name, source.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unrecognized characters, unterminated literals or comments.
    Lex,
    /// Text that does not follow the grammar file structure.
    Syntax,
    /// Well-formed text with inconsistent definitions (duplicates, undefined references).
    Semantic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lex => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Semantic => write!(f, "semantic error"),
        }
    }
}

/// Render a batch of errors against their source, one report per error.
pub fn format_errors(file_name: &str, source: &str, errors: &[CompileError]) -> String {
    let mut out = String::new();
    for error in errors {
        out.push_str(&format!("{:?}\n", error.to_report(file_name, source)));
    }
    out
}

#[derive(Debug, Error)]
#[error("{message}")]
struct RenderedError {
    message: String,
    help: Option<String>,
    labels: Vec<LabeledSpan>,
    related: Vec<NoteDiagnostic>,
}

impl Diagnostic for RenderedError {
    fn severity(&self) -> Option<Severity> {
        Some(Severity::Error)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help.as_ref().map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(self.labels.iter().cloned()))
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        if self.related.is_empty() {
            None
        } else {
            Some(Box::new(self.related.iter().map(|n| n as &dyn Diagnostic)))
        }
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
struct NoteDiagnostic(String);

impl Diagnostic for NoteDiagnostic {
    fn severity(&self) -> Option<Severity> {
        Some(Severity::Advice)
    }
}
