//! Token types for the grammar lexer.
//!
//! The lexer uses **registry-backed IDs** for grammar vocabulary:
//! - `Directive(DirectiveId)` for JavaCC reserved words
//! - `Punctuation(PunctuationId)` for structural punctuation
//!
//! ## Notes
//! - Every token keeps its raw `image`. String literal images keep their quotes, so `"K_SELECT"` written as a string
//!   never looks like a keyword reference.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::ast::Span;
use jjkw_core::lang::directives::{self, DirectiveId};
use jjkw_core::lang::punctuation::PunctuationId;

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Directive / punctuation (ID-based) ==========
    Directive(DirectiveId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident(String),
    /// Unescaped string value (the image keeps the quoted source text)
    String(String),
    Char,
    Number,

    /// Java-only operator characters (`!`, `&`, `/`, `%`, ...)
    Symbol(char),

    Eof,
}

/// A token with its kind, raw source text and span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub image: String,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, image: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            image: image.into(),
            span,
        }
    }
}

/// Resolve an identifier spelling to a directive id, if reserved.
pub fn directive_id(name: &str) -> Option<DirectiveId> {
    directives::from_str(name)
}
