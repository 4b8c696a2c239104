//! Grammar language vocabulary registries.
//!
//! This module is the “front door” for the vocabulary of the grammar language itself: the JavaCC reserved words
//! (`options`, `TOKEN`, `JAVACODE`, ...) and the punctuation the grammar structure is built from.
//!
//! Callers work with **stable IDs** (`DirectiveId`, `PunctuationId`) and look up spellings via the registry tables
//! instead of comparing strings.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - SQL keywords are *not* part of this vocabulary. They are data, discovered in the grammar being analyzed.
//!
//! ## Examples
//! ```rust
//! use jjkw_core::lang::directives::{self, DirectiveId};
//!
//! assert_eq!(directives::from_str("JAVACODE"), Some(DirectiveId::JavaCode));
//! assert_eq!(directives::as_str(DirectiveId::Options), "options");
//! ```

pub mod directives;
pub mod punctuation;
