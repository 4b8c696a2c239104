//! Read-only keyword classification queries.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use jjkw_core::Keyword;

/// Immutable snapshot of the collected keywords and whitelist buckets.
///
/// Every query is pure; the catalog is shared between threads behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordCatalog {
    keywords: BTreeMap<String, Keyword>,
    whitelist: BTreeMap<String, Vec<String>>,
}

/// Expected-vs-actual comparison of two label sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelDiff {
    /// Expected but not present
    pub missing: Vec<String>,
    /// Present but not expected
    pub unexpected: Vec<String>,
}

impl LabelDiff {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

impl KeywordCatalog {
    pub fn new(keywords: BTreeMap<String, Keyword>, whitelist: BTreeMap<String, Vec<String>>) -> Self {
        Self { keywords, whitelist }
    }

    /// All keywords, sorted by label.
    pub fn keywords(&self) -> impl Iterator<Item = &Keyword> {
        self.keywords.values()
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    /// Literal image of a keyword label, or `None` if the label is not a keyword.
    pub fn image_for_label(&self, label: &str) -> Option<&str> {
        let image = self.keywords.get(label).map(|k| k.image.as_str());
        if image.is_none() {
            tracing::debug!(label, "no keyword image for label");
        }
        image
    }

    /// Every whitelist bucket, keyed by production name.
    pub fn whitelist(&self) -> &BTreeMap<String, Vec<String>> {
        &self.whitelist
    }

    /// Names of the productions that form a bucket.
    pub fn bucket_names(&self) -> impl Iterator<Item = &str> {
        self.whitelist.keys().map(String::as_str)
    }

    /// Union of the named buckets' labels without duplicates.
    ///
    /// ## Notes
    /// - Labels keep their first-seen order, buckets are visited in name order regardless of argument order.
    /// - Unknown production names contribute nothing.
    pub fn whitelist_for<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        let wanted: HashSet<&str> = names.iter().map(AsRef::as_ref).collect();
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for (name, labels) in &self.whitelist {
            if !wanted.contains(name.as_str()) {
                continue;
            }
            for label in labels {
                if seen.insert(label.as_str()) {
                    out.push(label.clone());
                }
            }
        }
        out
    }

    /// Keyword labels that no bucket whitelists, sorted.
    pub fn restricted_keywords(&self) -> Vec<String> {
        let whitelisted: HashSet<&str> = self.whitelist.values().flatten().map(String::as_str).collect();
        self.keywords
            .keys()
            .filter(|label| !whitelisted.contains(label.as_str()))
            .cloned()
            .collect()
    }

    /// Return `true` if `label` is a keyword that no bucket whitelists.
    pub fn is_restricted(&self, label: &str) -> bool {
        self.keywords.contains_key(label) && !self.whitelist.values().flatten().any(|l| l == label)
    }

    /// Compare the restricted set with an expected set of labels.
    pub fn diff_restricted<S: AsRef<str>>(&self, expected: &[S]) -> LabelDiff {
        let expected: BTreeSet<&str> = expected.iter().map(AsRef::as_ref).collect();
        let restricted = self.restricted_keywords();
        let actual: BTreeSet<&str> = restricted.iter().map(String::as_str).collect();
        LabelDiff {
            missing: expected.difference(&actual).map(|s| s.to_string()).collect(),
            unexpected: actual.difference(&expected).map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> KeywordCatalog {
        let keywords = ["K_A", "K_B", "K_C", "K_D"]
            .into_iter()
            .map(|l| (l.to_string(), Keyword::new(l, &l[2..])))
            .collect();
        let whitelist = BTreeMap::from([
            ("RelObjectName".to_string(), vec!["K_B".to_string(), "K_A".to_string()]),
            ("RelObjectNameExt".to_string(), vec!["K_A".to_string(), "K_C".to_string()]),
            ("RelObjectNameWithoutValue".to_string(), Vec::new()),
        ]);
        KeywordCatalog::new(keywords, whitelist)
    }

    #[test]
    fn test_restricted_is_keywords_minus_buckets() {
        assert_eq!(catalog().restricted_keywords(), vec!["K_D"]);
        assert!(catalog().is_restricted("K_D"));
        assert!(!catalog().is_restricted("K_A"));
        assert!(!catalog().is_restricted("K_UNKNOWN"));
    }

    #[test]
    fn test_whitelist_for_dedups_in_bucket_order() {
        let c = catalog();
        assert_eq!(c.whitelist_for(&["RelObjectNameExt", "RelObjectName"]), vec!["K_B", "K_A", "K_C"]);
        assert_eq!(c.whitelist_for(&["RelObjectName", "Nope"]), vec!["K_B", "K_A"]);
        assert!(c.whitelist_for::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_image_lookup() {
        let c = catalog();
        assert_eq!(c.image_for_label("K_C"), Some("C"));
        assert_eq!(c.image_for_label("K_DOES_NOT_EXIST"), None);
    }

    #[test]
    fn test_diff_restricted() {
        let diff = catalog().diff_restricted(&["K_D", "K_Z"]);
        assert_eq!(diff.missing, vec!["K_Z"]);
        assert!(diff.unexpected.is_empty());
        assert!(!diff.is_empty());
        assert!(catalog().diff_restricted(&["K_D"]).is_empty());
    }

    #[test]
    fn test_bucket_names_include_empty_buckets() {
        assert_eq!(
            catalog().bucket_names().collect::<Vec<_>>(),
            vec!["RelObjectName", "RelObjectNameExt", "RelObjectNameWithoutValue"]
        );
    }
}
