//! Errors of the keyword extraction pipeline.

use std::io;
use std::path::PathBuf;

use jjkw_syntax::CompileError;
use jjkw_syntax::diagnostics::format_errors;
use miette::Diagnostic;
use thiserror::Error;

/// Failure of loading a grammar or of querying an extractor.
#[derive(Debug, Error, Diagnostic)]
pub enum ExtractError {
    /// The grammar file cannot be read.
    #[error("cannot read grammar file '{}': {source}", .path.display())]
    #[diagnostic(code(jjkw::load))]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The scratch directory cannot be created, or the expanded grammar cannot be written into it.
    #[error("cannot use scratch directory '{}': {source}", .path.display())]
    #[diagnostic(code(jjkw::scratch))]
    Scratch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Tree-annotation expansion, parsing or semantic analysis rejected the grammar.
    #[error("grammar '{}' was rejected with {} error(s); first: {}", .path.display(), .errors.len(), first_message(.errors))]
    #[diagnostic(code(jjkw::grammar_syntax))]
    GrammarSyntax {
        path: PathBuf,
        source_text: String,
        errors: Vec<CompileError>,
    },

    /// The catalog was queried before a successful initialization.
    #[error("keyword catalog queried before initialization")]
    #[diagnostic(code(jjkw::uninitialized), help("call `Extractor::initialize` first"))]
    Uninitialized,

    /// An earlier initialization failed; the failure is not retried implicitly.
    #[error("keyword extraction failed earlier: {0}")]
    #[diagnostic(code(jjkw::previously_failed), help("use `Extractor::retry` to load the grammar again"))]
    PreviouslyFailed(String),
}

impl ExtractError {
    /// Render the error for humans.
    ///
    /// Grammar errors are rendered with source context, one report per diagnostic; everything else uses `Display`.
    pub fn render(&self) -> String {
        match self {
            ExtractError::GrammarSyntax {
                path,
                source_text,
                errors,
            } => format_errors(&path.display().to_string(), source_text, errors),
            other => other.to_string(),
        }
    }
}

fn first_message(errors: &[CompileError]) -> String {
    errors.first().map(|e| e.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jjkw_syntax::ast::Span;

    #[test]
    fn test_grammar_syntax_display_summarizes() {
        let err = ExtractError::GrammarSyntax {
            path: PathBuf::from("Sql.jjt"),
            source_text: "void A() : {} { <K_X> }".to_string(),
            errors: vec![CompileError::semantic(
                "Undefined lexical token name \"K_X\"".to_string(),
                Span::new(16, 21),
            )],
        };
        let msg = err.to_string();
        assert!(msg.contains("Sql.jjt"), "{msg}");
        assert!(msg.contains("1 error(s)"), "{msg}");
        assert!(msg.contains("K_X"), "{msg}");
        assert!(err.render().contains("Undefined lexical token name"));
    }

    #[test]
    fn test_load_error_keeps_io_source() {
        let err = ExtractError::Load {
            path: PathBuf::from("missing.jjt"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.render(), err.to_string());
    }

    #[test]
    fn test_diagnostic_codes() {
        let code = ExtractError::Uninitialized.code().unwrap().to_string();
        assert_eq!(code, "jjkw::uninitialized");
        assert!(ExtractError::PreviouslyFailed("boom".to_string()).help().is_some());
    }
}
