//! Renderings of a keyword catalog for the CLI.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::extract::{KeywordCatalog, LabelDiff};

/// Serializable view of a catalog: keywords, whitelist buckets and the restricted set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractReport {
    pub keywords: Vec<KeywordEntry>,
    pub whitelist: BTreeMap<String, Vec<String>>,
    pub restricted: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordEntry {
    pub label: String,
    pub image: String,
}

/// Output format of `jjkw extract`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Json,
    Text,
}

impl ExtractReport {
    pub fn from_catalog(catalog: &KeywordCatalog) -> Self {
        Self {
            keywords: catalog
                .keywords()
                .map(|k| KeywordEntry {
                    label: k.label.clone(),
                    image: k.image.clone(),
                })
                .collect(),
            whitelist: catalog.whitelist().clone(),
            restricted: catalog.restricted_keywords(),
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, serde_json::Error> {
        match format {
            ReportFormat::Json => self.to_json(),
            ReportFormat::Text => Ok(self.to_text()),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "keywords ({}):", self.keywords.len());
        for k in &self.keywords {
            let _ = writeln!(out, "  {} = \"{}\"", k.label, k.image);
        }
        let _ = writeln!(out, "whitelist:");
        for (name, labels) in &self.whitelist {
            let _ = writeln!(out, "  {} ({}): {}", name, labels.len(), labels.join(", "));
        }
        let _ = writeln!(out, "restricted ({}):", self.restricted.len());
        for label in &self.restricted {
            let _ = writeln!(out, "  {}", label);
        }
        out
    }
}

/// Human-readable rendering of a restricted-set comparison.
pub fn render_diff(diff: &LabelDiff) -> String {
    if diff.is_empty() {
        return "restricted keywords match the expectation\n".to_string();
    }
    let mut out = String::new();
    for label in &diff.missing {
        let _ = writeln!(out, "- {label} (expected restricted, but whitelisted or not a keyword)");
    }
    for label in &diff.unexpected {
        let _ = writeln!(out, "+ {label} (restricted, but not expected)");
    }
    out
}
