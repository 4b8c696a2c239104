//! Restricted keyword checks against the reference SQL grammar fixture.
//!
//! If someone adds a keyword without adding it to `RESTRICTED_KEYWORDS` or to one of the `RelObjectName*`
//! productions, `restricted_keywords_match` fails.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use jjkw::{Extractor, ExtractorConfig, KeywordCatalog};

const RESTRICTED_KEYWORDS: &[&str] = &[
    "DT_ZONE",
    "K_AND",
    "K_AS",
    "K_ASC",
    "K_BY",
    "K_CAST",
    "K_DISTINCT",
    "K_LIMIT",
    "K_NULL",
    "K_OR",
];

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn scratch_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("jjgrammar")
}

static EXTRACTOR: LazyLock<Extractor> =
    LazyLock::new(|| Extractor::new(ExtractorConfig::new(fixture("JSqlParserCC.jjt"), scratch_dir())));

fn catalog() -> Arc<KeywordCatalog> {
    EXTRACTOR.initialize().unwrap()
}

#[test]
fn restricted_keywords_match() {
    let catalog = catalog();
    let mut expected: Vec<&str> = RESTRICTED_KEYWORDS.to_vec();
    expected.sort_unstable();
    assert_eq!(
        catalog.restricted_keywords(),
        expected,
        "restricted keywords must be listed in RESTRICTED_KEYWORDS, whitelisted ones must be used in RelObjectName productions"
    );
    assert!(catalog.diff_restricted(RESTRICTED_KEYWORDS).is_empty());
}

#[test]
fn grammar_has_expected_object_name_productions() {
    let names: Vec<String> = catalog().bucket_names().map(str::to_string).collect();
    let mut expected = vec![
        "RelObjectNameWithoutStart",
        "RelObjectName",
        "RelObjectNameWithoutValue",
        "RelObjectNameExt",
        "RelObjectNameExt2",
    ];
    expected.sort_unstable();
    assert_eq!(names, expected);
}

#[test]
fn all_position_keywords_have_images_unless_complex() {
    let catalog = catalog();
    let labels = catalog.whitelist_for(&["RelObjectNameWithoutValue"]);
    assert_eq!(
        labels,
        vec![
            "K_DATE_LITERAL",
            "K_CASCADE",
            "K_COLUMN",
            "K_COMMENT",
            "K_INDEX",
            "K_KEY",
            "K_NEXTVAL",
            "K_TABLE",
            "K_VALUES"
        ]
    );
    for label in &labels {
        let image = catalog.image_for_label(label);
        match label.as_str() {
            // Not single literals: only literal strings have an image.
            "K_DATE_LITERAL" | "K_NEXTVAL" => assert_eq!(image, None),
            _ => assert_eq!(image, Some(&label[2..])),
        }
    }
}

#[test]
fn no_alias_keywords_are_deduplicated() {
    let labels = catalog().whitelist_for(&["RelObjectName", "RelObjectNameExt", "RelObjectNameExt2"]);
    assert_eq!(
        labels,
        vec![
            "K_GROUP", "K_INDEX", "K_SET", "K_VALUE", "K_ALL", "K_ANY", "K_FROM", "K_ORDER", "K_SELECT", "K_WHERE",
            "K_TABLE"
        ]
    );
}

#[test]
fn non_keyword_labels_are_not_restricted() {
    let catalog = catalog();
    // Choice of literals, not a keyword.
    assert!(!catalog.is_restricted("K_SELECT"));
    assert_eq!(catalog.image_for_label("K_SELECT"), None);
    // Referenced by a bucket production, but buckets only collect `K_` references.
    assert!(catalog.is_restricted("DT_ZONE"));
    assert_eq!(catalog.image_for_label("OPENING_BRACKET"), None);
    assert_eq!(catalog.image_for_label("K_LIMIT"), Some("LIMIT"));
}

#[test]
fn expanded_grammar_is_written_to_scratch_dir() {
    catalog();
    let expanded = fs::read_to_string(scratch_dir().join("JSqlParserCC.jj")).unwrap();
    let original = fs::read_to_string(fixture("JSqlParserCC.jjt")).unwrap();
    assert_eq!(expanded.len(), original.len());
    assert!(!expanded.contains("#Select"));
    assert!(!expanded.contains("#TableName"));
    assert!(expanded.contains("<#WHITESPACE"));
    assert!(expanded.contains("'#'"));
}
