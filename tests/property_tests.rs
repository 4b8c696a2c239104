//! Property-based tests for keyword extraction
//!
//! These tests use proptest to generate grammars with random keyword sets and random object-name productions, and
//! check the classification invariants against a direct model of the expected result.

use std::collections::BTreeSet;

use jjkw::Conventions;
use jjkw::extract::{build_catalog, loader};
use proptest::prelude::*;

// =============================================================================
// Grammar generation
// =============================================================================

/// A generated grammar: `keywords` labels `K_W0..`, each bucket references a subset of them.
#[derive(Debug, Clone)]
struct GeneratedGrammar {
    keywords: usize,
    buckets: Vec<Vec<usize>>,
    other: Vec<usize>,
}

impl GeneratedGrammar {
    fn label(i: usize) -> String {
        format!("K_W{i}")
    }

    fn alternatives(refs: &[usize]) -> String {
        if refs.is_empty() {
            return String::new();
        }
        let alts: Vec<String> = refs.iter().map(|&i| format!("<{}>", Self::label(i))).collect();
        format!("( {} )", alts.join(" | "))
    }

    fn source(&self) -> String {
        let tokens: Vec<String> = (0..self.keywords)
            .map(|i| format!("<{}: \"W{i}\">", Self::label(i)))
            .collect();
        let mut out = format!("TOKEN : {{ {} }}\n\n", tokens.join(" | "));
        for (j, refs) in self.buckets.iter().enumerate() {
            out.push_str(&format!(
                "String RelObjectNameB{j}() : {{}} {{ {} {{ return null; }} }}\n\n",
                Self::alternatives(refs)
            ));
        }
        out.push_str(&format!("void Statement() : {{}} {{ {} }}\n", Self::alternatives(&self.other)));
        out
    }

    fn expected_whitelisted(&self) -> BTreeSet<String> {
        self.buckets.iter().flatten().map(|&i| Self::label(i)).collect()
    }

    fn expected_restricted(&self) -> Vec<String> {
        let whitelisted = self.expected_whitelisted();
        let all: BTreeSet<String> = (0..self.keywords).map(Self::label).collect();
        all.difference(&whitelisted).cloned().collect()
    }
}

fn grammar_strategy() -> impl Strategy<Value = GeneratedGrammar> {
    (1usize..12).prop_flat_map(|keywords| {
        (
            Just(keywords),
            prop::collection::vec(prop::collection::vec(0..keywords, 0..keywords), 0..4),
            prop::collection::vec(0..keywords, 0..keywords),
        )
            .prop_map(|(keywords, buckets, other)| GeneratedGrammar {
                keywords,
                buckets,
                other,
            })
    })
}

// =============================================================================
// Classification Properties
// =============================================================================

#[cfg(test)]
mod classification {
    use super::*;

    proptest! {
        /// Property: restricted keywords are exactly the keywords no bucket references
        #[test]
        fn restricted_matches_model(grammar in grammar_strategy()) {
            let tables = loader::load_str("generated.jjt", &grammar.source()).expect("generated grammar is valid");
            let catalog = build_catalog(&tables, &Conventions::default());
            prop_assert_eq!(catalog.restricted_keywords(), grammar.expected_restricted());
        }

        /// Property: every keyword is either restricted or whitelisted, never both
        #[test]
        fn restricted_and_whitelisted_partition_keywords(grammar in grammar_strategy()) {
            let tables = loader::load_str("generated.jjt", &grammar.source()).expect("generated grammar is valid");
            let catalog = build_catalog(&tables, &Conventions::default());

            let restricted: BTreeSet<String> = catalog.restricted_keywords().into_iter().collect();
            let names: Vec<String> = catalog.bucket_names().map(str::to_string).collect();
            let whitelisted: BTreeSet<String> = catalog.whitelist_for(&names).into_iter().collect();
            let all: BTreeSet<String> = catalog.keywords().map(|k| k.label.clone()).collect();

            prop_assert!(restricted.is_disjoint(&whitelisted));
            prop_assert_eq!(restricted.union(&whitelisted).cloned().collect::<BTreeSet<_>>(), all);
            prop_assert_eq!(names.len(), grammar.buckets.len());
        }

        /// Property: whitelist_for never repeats a label
        #[test]
        fn whitelist_for_has_no_duplicates(grammar in grammar_strategy()) {
            let tables = loader::load_str("generated.jjt", &grammar.source()).expect("generated grammar is valid");
            let catalog = build_catalog(&tables, &Conventions::default());
            let names: Vec<String> = catalog.bucket_names().map(str::to_string).collect();
            let labels = catalog.whitelist_for(&names);
            let unique: BTreeSet<&String> = labels.iter().collect();
            prop_assert_eq!(unique.len(), labels.len());
            prop_assert_eq!(unique.len(), grammar.expected_whitelisted().len());
        }
    }
}

// =============================================================================
// Frontend robustness
// =============================================================================

#[cfg(test)]
mod robustness {
    use super::*;

    proptest! {
        /// Property: arbitrary text is accepted or rejected, never a panic
        #[test]
        fn compile_never_panics(source in "\\PC{0,200}") {
            let _ = jjkw_syntax::compile(&source);
        }

        /// Property: grammar-shaped noise never panics either
        #[test]
        fn compile_never_panics_on_grammar_fragments(
            parts in prop::collection::vec(
                prop::sample::select(vec![
                    "TOKEN", ":", "{", "}", "<", ">", "K_A", "\"A\"", "|", "(", ")", "*", "[", "]",
                    "void", "RelObjectName", "#", "LOOKAHEAD", "2", ";", "=", "try", "catch", ",",
                ]),
                0..60,
            )
        ) {
            let _ = jjkw_syntax::compile(&parts.join(" "));
        }
    }
}
