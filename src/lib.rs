#![forbid(unsafe_code)]
//! Keyword extraction for JavaCC/JJTree SQL grammars
//!
//! Reads a `.jjt` grammar, collects its literal keyword tokens and, for every "object-name" production, the
//! keywords that production accepts as identifiers. The headline result is the set of restricted keywords: those
//! no object-name production whitelists.
//!
//! The grammar frontend lives in `jjkw_syntax`; the naming conventions and grammar vocabulary in `jjkw_core`.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod extract;
pub mod report;

pub use extract::{ExtractError, Extractor, ExtractorConfig, KeywordCatalog, LabelDiff};
pub use jjkw_core::{Conventions, Keyword};
pub use report::{ExtractReport, ReportFormat};
