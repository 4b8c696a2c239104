//! Grammar frontend for JavaCC/JJTree grammars: tree-annotation expansion, lexer, parser and semantic tables.
//!
//! This crate stands in for the external grammar toolchain. It reproduces the three stages keyword extraction
//! depends on:
//! 1. [`jjtree::expand`] strips JJTree node descriptors so the text is a plain JavaCC grammar,
//! 2. [`lexer::lex`] + [`parser::parse`] build the grammar [`ast`],
//! 3. [`semantics::analyze`] builds the named-token and production tables and rejects inconsistent grammars.
//!
//! ## Notes
//! - This crate is intentionally “frontend-only”: it does not know about keyword classification.
//! - Vocabulary identity (directives/punctuation) comes from `jjkw_core::lang` registries.
//! - Embedded Java is never interpreted; it is kept as balanced, opaque token runs.
//!
//! ## Examples
//! ```rust
//! use jjkw_syntax::{lexer, parser, semantics};
//!
//! let source = r#"
//! TOKEN : { <K_SELECT: "SELECT"> }
//! void Select() : {} { <K_SELECT> }
//! "#;
//! let tokens = lexer::lex(source).unwrap();
//! let grammar = parser::parse(&tokens).unwrap();
//! let tables = semantics::analyze(&grammar, &tokens).unwrap();
//! assert!(tables.tokens().contains_key("K_SELECT"));
//! assert!(tables.productions().contains_key("Select"));
//! ```

pub mod ast;
pub mod diagnostics;
pub mod jjtree;
pub mod lexer;
pub mod parser;
pub mod semantics;
pub mod token_helpers;

pub use diagnostics::{CompileError, ErrorKind};
pub use semantics::{GrammarTables, NamedGrammarItem};

/// Run the whole frontend on `.jjt` source text.
///
/// ## Returns
/// - The expanded `.jj` text together with the semantic tables built from it.
///
/// ## Errors
/// Returns every diagnostic of the first failing stage.
///
/// ## Notes
/// - Expansion blanks node descriptors with spaces, so spans in the returned errors are valid offsets into the
///   original `source` as well as into the expanded text.
pub fn compile(source: &str) -> Result<(String, GrammarTables), Vec<CompileError>> {
    let expanded = jjtree::expand(source)?;
    let tables = compile_expanded(&expanded)?;
    Ok((expanded, tables))
}

/// Run lexing, parsing and semantic analysis on already expanded `.jj` text.
pub fn compile_expanded(expanded: &str) -> Result<GrammarTables, Vec<CompileError>> {
    let tokens = lexer::lex(expanded)?;
    let grammar = parser::parse(&tokens)?;
    semantics::analyze(&grammar, &tokens)
}
