//! Parser for JavaCC grammar files
//!
//! Converts a token stream into a grammar [`Grammar`]: options, the parser class name, regular expression
//! productions, BNF productions and `JAVACODE` productions.
//!
//! ## Examples
//!
//! ```rust
//! use jjkw_syntax::{lexer, parser};
//!
//! let source = "TOKEN : { <K_AS: \"AS\"> }\nvoid Alias() : {} { <K_AS> }\n";
//! let tokens = lexer::lex(source).unwrap();
//! let grammar = parser::parse(&tokens).unwrap();
//! assert_eq!(grammar.declarations.len(), 2);
//! ```

use crate::ast::*;
use crate::diagnostics::CompileError;
use crate::lexer::{Token, TokenKind};
use jjkw_core::lang::directives::{self, DirectiveCategory, DirectiveId};
use jjkw_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/regex.rs");
include!("parser/expansion.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
