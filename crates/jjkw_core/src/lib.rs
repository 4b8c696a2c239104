//! Provide the pure vocabulary shared by the grammar frontend and the keyword extractor.
//!
//! This crate is intentionally small and dependency-free. It contains:
//! - registry-backed vocabulary of the grammar language itself (JavaCC reserved words and punctuation), and
//! - the naming conventions the SQL grammar authors rely on to mark keywords and object-name productions.
//!
//! ## Notes
//!
//! - This is a “vocabulary core” crate: **no IO**, no global state, and no frontend-specific types.
//! - The naming conventions are string predicates by nature. Keep them here so every caller applies exactly the
//!   same test.

pub mod conventions;
pub mod keywords;
pub mod lang;

pub use conventions::Conventions;
pub use keywords::Keyword;
