//! JJTree expansion: turn a `.jjt` tree grammar into a plain `.jj` grammar.
//!
//! JJTree annotates productions and expansion units with node descriptors:
//!
//! ```text
//! Table Table() #Table : { ... } { RelObjectName() ( "." RelObjectName() )* #Path(>1) }
//! void Statement() #void : { } { ... }
//! ```
//!
//! None of them matter for keyword extraction. Expansion removes every descriptor (`#` followed by a node name or
//! `void`, plus an immediately following parenthesized condition) and keeps everything else. Private regular
//! expression labels (`<#DIGIT: ...>`) are not descriptors and stay untouched.
//!
//! ## Notes
//! - Removed text is replaced by spaces (newlines are kept), so every byte offset of the expanded grammar is also a
//!   valid offset into the original file. Diagnostics from later stages therefore point into the `.jjt` source.
//! - The condition is taken greedily, like JJTree does: `#Name (A())` consumes `(A())` as the condition.

use crate::ast::Span;
use crate::diagnostics::CompileError;
use crate::lexer::{self, Token};
use jjkw_core::lang::punctuation::PunctuationId;

/// Strip JJTree node descriptors from grammar source text.
///
/// ## Errors
/// Returns lexical errors of the source, or a syntax error for a `#` that is neither a private label marker nor
/// followed by a node name, or for an unbalanced descriptor condition.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn expand(source: &str) -> Result<String, Vec<CompileError>> {
    let tokens = lexer::lex(source)?;
    let descriptors = node_descriptor_spans(&tokens)?;
    tracing::debug!(count = descriptors.len(), "removing node descriptors");

    let mut out = String::with_capacity(source.len());
    let mut pos = 0;
    for span in descriptors {
        out.push_str(&source[pos..span.start]);
        for c in source[span.start..span.end].chars() {
            blank_into(&mut out, c);
        }
        pos = span.end;
    }
    out.push_str(&source[pos..]);
    Ok(out)
}

/// Locate node descriptors in a token stream.
fn node_descriptor_spans(tokens: &[Token]) -> Result<Vec<Span>, Vec<CompileError>> {
    let mut spans = Vec::new();
    let mut errors = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        if !tokens[i].kind.is_punctuation(PunctuationId::Hash) {
            i += 1;
            continue;
        }
        // `<#NAME: ...>` declares a private regular expression.
        if i > 0 && tokens[i - 1].kind.is_punctuation(PunctuationId::Lt) {
            i += 1;
            continue;
        }

        let start = tokens[i].span.start;
        let Some(node) = tokens.get(i + 1).and_then(|t| t.kind.ident()) else {
            errors.push(
                CompileError::syntax("Expected node name or 'void' after '#'".to_string(), tokens[i].span)
                    .with_hint("node descriptors look like `#Name`, `#void` or `#Name(condition)`"),
            );
            i += 1;
            continue;
        };
        tracing::trace!(node, "node descriptor");
        let mut end = tokens[i + 1].span.end;
        i += 2;

        if tokens.get(i).is_some_and(|t| t.kind.is_punctuation(PunctuationId::LParen)) {
            match matching_paren(tokens, i) {
                Some(close) => {
                    end = tokens[close].span.end;
                    i = close + 1;
                }
                None => {
                    errors.push(CompileError::syntax(
                        "Unbalanced parentheses in node descriptor condition".to_string(),
                        Span::new(start, tokens[i].span.end),
                    ));
                    break;
                }
            }
        }
        spans.push(Span::new(start, end));
    }

    if errors.is_empty() { Ok(spans) } else { Err(errors) }
}

/// Index of the `)` matching the `(` at `open`.
fn matching_paren(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate().skip(open) {
        match token.kind.punctuation_id() {
            Some(PunctuationId::LParen) => depth += 1,
            Some(PunctuationId::RParen) => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Push the replacement of one removed char: line breaks stay, anything else becomes one space per byte.
fn blank_into(out: &mut String, c: char) {
    if c == '\n' || c == '\r' {
        out.push(c);
    } else {
        out.extend(std::iter::repeat_n(' ', c.len_utf8()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_production_descriptor() {
        let src = "Table Table() #Table : {} { <K_X> }";
        let out = expand(src).unwrap();
        assert_eq!(out, "Table Table()        : {} { <K_X> }");
        assert_eq!(out.len(), src.len());
    }

    #[test]
    fn test_strips_void_and_conditional_descriptors() {
        let src = "void A() #void : {} { ( B() \".\" B() )#Path(>1) }";
        let out = expand(src).unwrap();
        assert!(!out.contains('#'));
        assert!(!out.contains("Path"));
        assert!(out.contains("( B() \".\" B() )"));
    }

    #[test]
    fn test_keeps_private_labels() {
        let src = "TOKEN : { <#LETTER: [\"a\"-\"z\"]> | <S_ID: (<LETTER>)+> }";
        assert_eq!(expand(src).unwrap(), src);
    }

    #[test]
    fn test_hash_inside_strings_is_kept() {
        let src = "TOKEN : { <HASH: \"#\"> }";
        assert_eq!(expand(src).unwrap(), src);
    }

    #[test]
    fn test_preserves_newlines() {
        let src = "A()\n#Node(\ntrue\n) : {}";
        let out = expand(src).unwrap();
        assert_eq!(out.matches('\n').count(), 3);
        assert_eq!(out.len(), src.len());
    }

    #[test]
    fn test_non_ascii_descriptor_keeps_byte_offsets() {
        let src = "void A() #Näme : {} { <K_A> }";
        let out = expand(src).unwrap();
        assert_eq!(out.len(), src.len());
        assert!(!out.contains("Näme"));
        let brace = src.rfind('}').unwrap();
        assert_eq!(&out[brace..], "}");
    }

    #[test]
    fn test_non_ascii_condition_keeps_byte_offsets() {
        let src = "void A() : {} { B() #Node(\"ü€\".isEmpty()) }";
        let out = expand(src).unwrap();
        assert_eq!(out.len(), src.len());
        assert!(out.is_char_boundary(src.rfind('}').unwrap()));
    }

    #[test]
    fn test_later_diagnostics_point_into_original_source() {
        let src = "TOKEN : { <K_A: \"A\"> }\nvoid A() #Nä : {} { <K_MISSING> }";
        let errs = crate::compile(src).unwrap_err();
        assert_eq!(errs.len(), 1);
        let span = errs[0].span;
        assert!(src.is_char_boundary(span.start) && src.is_char_boundary(span.end));
        assert_eq!(&src[span.start..span.end], "<K_MISSING>");
    }

    #[test]
    fn test_dangling_hash_is_an_error() {
        let errs = expand("void A() # : {} {}").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("after '#'"));
    }

    #[test]
    fn test_unbalanced_condition_is_an_error() {
        let errs = expand("void A() #Node(true : {} {}").unwrap_err();
        assert!(errs[0].message.contains("Unbalanced"));
    }
}
