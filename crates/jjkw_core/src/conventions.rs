//! Naming conventions the SQL grammar uses in place of explicit tags.
//!
//! The grammar marks nothing structurally: a production is an "object-name" production because its name starts
//! with `RelObjectName`, a token reference is a keyword because its label starts with `K_`. These predicates are
//! fragile by nature and are preserved exactly as the grammar authors apply them.
//!
//! ## Examples
//! ```rust
//! use jjkw_core::conventions::Conventions;
//!
//! let conventions = Conventions::default();
//! assert!(conventions.is_object_name_production("RelObjectNameExt"));
//! assert!(!conventions.is_object_name_production("RelObjectNameList"));
//! assert!(conventions.is_keyword_reference("K_SELECT"));
//! ```

/// Prefix shared by every production that accepts (some) keywords as identifiers.
pub const OBJECT_NAME_PREFIX: &str = "RelObjectName";

/// Suffix of aggregate productions (lists of object names) that never form a whitelist bucket.
pub const LIST_SUFFIX: &str = "List";

/// Prefix of token labels that denote keywords.
pub const KEYWORD_TOKEN_PREFIX: &str = "K_";

/// Naming conventions used to select object-name productions and keyword references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conventions {
    /// Productions whose name starts with this prefix are object-name productions
    pub object_name_prefix: String,
    /// Object-name productions whose name ends with this suffix are aggregates and skipped
    pub list_suffix: String,
    /// Token images starting with this prefix are keyword references
    pub keyword_token_prefix: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            object_name_prefix: OBJECT_NAME_PREFIX.to_string(),
            list_suffix: LIST_SUFFIX.to_string(),
            keyword_token_prefix: KEYWORD_TOKEN_PREFIX.to_string(),
        }
    }
}

impl Conventions {
    /// Create conventions with the grammar's default spellings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the object-name production prefix
    pub fn with_object_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.object_name_prefix = prefix.into();
        self
    }

    /// Set the aggregate production suffix
    pub fn with_list_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.list_suffix = suffix.into();
        self
    }

    /// Set the keyword token prefix
    pub fn with_keyword_token_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.keyword_token_prefix = prefix.into();
        self
    }

    /// Return `true` if a production with this name forms a whitelist bucket.
    ///
    /// ## Notes
    /// - The name must start with the object-name prefix and must not end with the list suffix.
    pub fn is_object_name_production(&self, name: &str) -> bool {
        name.starts_with(&self.object_name_prefix) && !name.ends_with(&self.list_suffix)
    }

    /// Return `true` if a token image inside a production body references a keyword.
    pub fn is_keyword_reference(&self, image: &str) -> bool {
        image.starts_with(&self.keyword_token_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_object_name_productions() {
        let c = Conventions::default();
        assert!(c.is_object_name_production("RelObjectName"));
        assert!(c.is_object_name_production("RelObjectNameWithoutValue"));
        assert!(c.is_object_name_production("RelObjectNameExt2"));
        assert!(!c.is_object_name_production("RelObjectNameList"));
        assert!(!c.is_object_name_production("ColumnList"));
        assert!(!c.is_object_name_production("relObjectName"));
    }

    #[test]
    fn test_keyword_reference_is_prefix_only() {
        let c = Conventions::default();
        assert!(c.is_keyword_reference("K_SELECT"));
        assert!(!c.is_keyword_reference("S_IDENTIFIER"));
        // String literal images keep their quotes and never match.
        assert!(!c.is_keyword_reference("\"K_SELECT\""));
        assert!(!c.is_keyword_reference("k_select"));
    }

    #[test]
    fn test_overrides() {
        let c = Conventions::new()
            .with_object_name_prefix("Name")
            .with_list_suffix("Seq")
            .with_keyword_token_prefix("KW_");
        assert!(c.is_object_name_production("NameList"));
        assert!(!c.is_object_name_production("NameSeq"));
        assert!(c.is_keyword_reference("KW_FROM"));
        assert!(!c.is_keyword_reference("K_FROM"));
    }
}
