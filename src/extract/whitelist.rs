//! Per-production whitelist buckets.
//!
//! An object-name production tolerates the keywords it references as identifiers. The bucket of a production is
//! every keyword reference found in its token sequence, in order, duplicates included.

use std::collections::BTreeMap;

use jjkw_core::Conventions;
use jjkw_syntax::{GrammarTables, NamedGrammarItem};

/// Build one bucket per object-name production.
///
/// ## Notes
/// - The token sequence is scanned from its first token up to, but excluding, its last token (the closing brace
///   of the expansion body).
/// - `JAVACODE` productions matching the naming convention get an empty bucket.
pub fn collect_whitelist(tables: &GrammarTables, conventions: &Conventions) -> BTreeMap<String, Vec<String>> {
    let mut buckets = BTreeMap::new();
    for (name, item) in tables.productions() {
        if !conventions.is_object_name_production(name) {
            continue;
        }
        let labels: Vec<String> = match item {
            NamedGrammarItem::Production(def) => def
                .tokens_before_last()
                .iter()
                .map(|t| t.image.as_str())
                .filter(|image| conventions.is_keyword_reference(image))
                .map(str::to_string)
                .collect(),
            NamedGrammarItem::LiteralToken(_) | NamedGrammarItem::Other(_) => {
                tracing::debug!(production = %item.name(), "object-name production without a token sequence");
                Vec::new()
            }
        };
        tracing::debug!(production = %name, labels = labels.len(), "whitelist bucket");
        buckets.insert(name.clone(), labels);
    }
    buckets
}
