//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to make it easy
//! to work with ID-based tokens.

use crate::lexer::{Token, TokenKind};
use jjkw_core::lang::directives::DirectiveId;
use jjkw_core::lang::punctuation::PunctuationId;

impl TokenKind {
    /// Return the directive id, if this is a directive token.
    pub fn directive_id(&self) -> Option<DirectiveId> {
        match self {
            TokenKind::Directive(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given directive.
    pub fn is_directive(&self, id: DirectiveId) -> bool {
        matches!(self, TokenKind::Directive(d) if *d == id)
    }

    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return the identifier spelling, if this is an identifier token.
    pub fn ident(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Return `true` if this is the given identifier spelling.
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(self, TokenKind::Ident(n) if n == name)
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.directive_id()`.
    pub fn directive_id(&self) -> Option<DirectiveId> {
        self.kind.directive_id()
    }

    /// Convenience wrapper for `self.kind.punctuation_id()`.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        self.kind.punctuation_id()
    }
}
