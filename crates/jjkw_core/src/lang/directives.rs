//! Define the reserved words of the grammar language.
//!
//! This module is the single source of truth for JavaCC reserved words: a stable identifier ([`DirectiveId`]) plus a
//! const metadata table ([`DIRECTIVES`]) that records canonical spellings, categories and a short description.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**: `options` is lowercase, every other directive is uppercase.
//! - Inside embedded Java code these spellings carry no meaning; the parser treats Java blocks as opaque.
//!
//! ## Examples
//! ```rust
//! use jjkw_core::lang::directives::{self, DirectiveCategory, DirectiveId};
//!
//! assert_eq!(directives::from_str("SPECIAL_TOKEN"), Some(DirectiveId::SpecialToken));
//! assert_eq!(directives::category(DirectiveId::Skip), DirectiveCategory::RegexKind);
//! assert_eq!(directives::from_str("token"), None);
//! ```

/// Stable identifier for every reserved word of the grammar language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveId {
    // Sections
    Options,
    ParserBegin,
    ParserEnd,
    TokenMgrDecls,
    JavaCode,

    // Regular expression kinds
    Token,
    SpecialToken,
    Skip,
    More,

    // Modifiers
    IgnoreCase,
    Lookahead,

    // Terminals
    Eof,
}

/// High-level grouping for documentation and parser dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveCategory {
    /// Introduces a top-level grammar section.
    Section,
    /// Introduces a regular expression production (`TOKEN : { ... }`).
    RegexKind,
    /// Modifies the surrounding construct.
    Modifier,
    /// Predefined terminal.
    Terminal,
}

/// Metadata for a grammar directive.
#[derive(Debug, Clone, Copy)]
pub struct DirectiveInfo {
    pub id: DirectiveId,
    pub canonical: &'static str,
    pub category: DirectiveCategory,
    pub description: &'static str,
}

/// Registry of all directives.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const DIRECTIVES: &[DirectiveInfo] = &[
    // Sections
    info(
        DirectiveId::Options,
        "options",
        DirectiveCategory::Section,
        "Generator options block.",
    ),
    info(
        DirectiveId::ParserBegin,
        "PARSER_BEGIN",
        DirectiveCategory::Section,
        "Start of the embedded parser class.",
    ),
    info(
        DirectiveId::ParserEnd,
        "PARSER_END",
        DirectiveCategory::Section,
        "End of the embedded parser class.",
    ),
    info(
        DirectiveId::TokenMgrDecls,
        "TOKEN_MGR_DECLS",
        DirectiveCategory::Section,
        "Declarations injected into the token manager.",
    ),
    info(
        DirectiveId::JavaCode,
        "JAVACODE",
        DirectiveCategory::Section,
        "Production implemented in plain Java.",
    ),
    // Regular expression kinds
    info(
        DirectiveId::Token,
        "TOKEN",
        DirectiveCategory::RegexKind,
        "Regular expressions producing tokens.",
    ),
    info(
        DirectiveId::SpecialToken,
        "SPECIAL_TOKEN",
        DirectiveCategory::RegexKind,
        "Regular expressions producing special (hidden) tokens.",
    ),
    info(
        DirectiveId::Skip,
        "SKIP",
        DirectiveCategory::RegexKind,
        "Regular expressions whose matches are discarded.",
    ),
    info(
        DirectiveId::More,
        "MORE",
        DirectiveCategory::RegexKind,
        "Regular expressions whose matches prefix the next token.",
    ),
    // Modifiers
    info(
        DirectiveId::IgnoreCase,
        "IGNORE_CASE",
        DirectiveCategory::Modifier,
        "Case-insensitive matching for a regular expression block.",
    ),
    info(
        DirectiveId::Lookahead,
        "LOOKAHEAD",
        DirectiveCategory::Modifier,
        "Explicit lookahead specification.",
    ),
    // Terminals
    info(
        DirectiveId::Eof,
        "EOF",
        DirectiveCategory::Terminal,
        "End of input.",
    ),
];

/// Return the canonical spelling for a directive.
pub fn as_str(id: DirectiveId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a directive.
pub fn category(id: DirectiveId) -> DirectiveCategory {
    info_for(id).category
}

/// Return the full metadata entry for a directive.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: DirectiveId) -> &'static DirectiveInfo {
    DIRECTIVES
        .iter()
        .find(|d| d.id == id)
        .expect("directive info missing")
}

/// Resolve a spelling to a directive id, if reserved.
pub fn from_str(s: &str) -> Option<DirectiveId> {
    DIRECTIVES.iter().find(|d| d.canonical == s).map(|d| d.id)
}

const fn info(
    id: DirectiveId,
    canonical: &'static str,
    category: DirectiveCategory,
    description: &'static str,
) -> DirectiveInfo {
    DirectiveInfo {
        id,
        canonical,
        category,
        description,
    }
}
