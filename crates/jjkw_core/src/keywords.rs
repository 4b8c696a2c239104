//! Keyword entity derived from literal token definitions.
//!
//! A keyword is a labeled literal token whose image starts with an alphabetic character, e.g.
//! `<K_SELECT: "SELECT">`. Punctuation literals such as `<OPENING_BRACKET: "(">` are not keywords.

/// A candidate reserved word: its symbolic token label and its literal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keyword {
    pub label: String,
    pub image: String,
}

impl Keyword {
    /// Construct a keyword from a token label and its literal image.
    pub fn new(label: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            image: image.into(),
        }
    }
}

/// Return `true` if a literal image qualifies as a keyword.
///
/// ## Notes
/// - Only the first character is inspected; `"ON_ERROR"` and `"SQL_CACHE"` qualify, `"_X"` and `":="` do not.
/// - Alphabetic is Unicode-aware, matching the grammar toolchain's notion of a letter.
pub fn is_keyword_image(image: &str) -> bool {
    image.chars().next().is_some_and(char::is_alphabetic)
}
