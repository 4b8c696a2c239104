//! Keyword collection from the named-token table.

use std::collections::BTreeMap;

use jjkw_core::Keyword;
use jjkw_core::keywords::is_keyword_image;
use jjkw_syntax::{GrammarTables, NamedGrammarItem};

/// Collect every literal token whose image starts with an alphabetic character, keyed by label.
pub fn collect_keywords(tables: &GrammarTables) -> BTreeMap<String, Keyword> {
    let mut keywords = BTreeMap::new();
    for (label, item) in tables.tokens() {
        match item {
            NamedGrammarItem::LiteralToken(def) if is_keyword_image(&def.image) => {
                tracing::debug!(label = %label, image = %def.image, "keyword");
                keywords.insert(label.clone(), Keyword::new(label.clone(), def.image.clone()));
            }
            NamedGrammarItem::LiteralToken(def) => {
                tracing::debug!(label = %label, image = %def.image, "skipping non-alphabetic literal token");
            }
            NamedGrammarItem::Production(_) | NamedGrammarItem::Other(_) => {
                tracing::debug!(label = %label, "skipping token that is not a single literal");
            }
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::loader::load_str;

    #[test]
    fn test_only_alphabetic_literals_are_keywords() {
        let tables = load_str(
            "t.jjt",
            r#"TOKEN : {
    <K_SELECT: "SELECT">
  | <K_ÄRGER: "ÄRGER">
  | <OP_CONCAT: "||">
  | <S_LONG: "1">
  | <K_ID: ["a"-"z"] ("x")*>
  | <_UNDERSCORE: "_X">
}"#,
        )
        .unwrap();
        let keywords = collect_keywords(&tables);
        assert_eq!(keywords.keys().map(String::as_str).collect::<Vec<_>>(), vec!["K_SELECT", "K_ÄRGER"]);
        assert_eq!(keywords["K_ÄRGER"].image, "ÄRGER");
    }
}
