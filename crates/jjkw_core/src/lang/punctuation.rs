//! Punctuation vocabulary of the grammar language.
//!
//! This module defines the single-character punctuation the grammar structure is built from: delimiters, the
//! regular-expression angle brackets, separators and the repetition markers.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Characters that only appear inside embedded Java (`!`, `&`, `/`, ...) are not registered; the lexer keeps them
//!   as plain symbols.
//!
//! ## Examples
//! ```rust
//! use jjkw_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_char('|'), Some(PunctuationId::Pipe));
//! assert_eq!(punctuation::as_str(PunctuationId::Hash), "#");
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets, braces and regular-expression angle brackets.
    Delimiter,
    /// Separators like `,`, `:` and `;`.
    Separator,
    /// Repetition and choice markers in expansions and regular expressions.
    Operator,
    /// Misc markers like `#` and `.`.
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Lt,
    Gt,

    // Separators
    Comma,
    Colon,
    Semi,

    // Operators
    Pipe,
    Star,
    Plus,
    Question,
    Tilde,
    Minus,
    Eq,

    // Markers
    Hash,
    Dot,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    // Delimiters
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter),
    info(PunctuationId::Lt, "<", PunctuationCategory::Delimiter),
    info(PunctuationId::Gt, ">", PunctuationCategory::Delimiter),
    // Separators
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator),
    info(PunctuationId::Semi, ";", PunctuationCategory::Separator),
    // Operators
    info(PunctuationId::Pipe, "|", PunctuationCategory::Operator),
    info(PunctuationId::Star, "*", PunctuationCategory::Operator),
    info(PunctuationId::Plus, "+", PunctuationCategory::Operator),
    info(PunctuationId::Question, "?", PunctuationCategory::Operator),
    info(PunctuationId::Tilde, "~", PunctuationCategory::Operator),
    info(PunctuationId::Minus, "-", PunctuationCategory::Operator),
    info(PunctuationId::Eq, "=", PunctuationCategory::Operator),
    // Markers
    info(PunctuationId::Hash, "#", PunctuationCategory::Marker),
    info(PunctuationId::Dot, ".", PunctuationCategory::Marker),
];

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Resolve a punctuation spelling to its identifier.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

/// Resolve a single punctuation character to its identifier.
pub fn from_char(c: char) -> Option<PunctuationId> {
    let mut buf = [0u8; 4];
    from_str(c.encode_utf8(&mut buf))
}

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo { id, canonical, category }
}
