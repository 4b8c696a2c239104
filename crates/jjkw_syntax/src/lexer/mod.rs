//! Lexer for JavaCC grammar files
//!
//! Handles tokenization including:
//! - Directives (`options`, `TOKEN`, `JAVACODE`, `LOOKAHEAD`, ...)
//! - Identifiers (Java rules: letters, digits, `_`, `$`)
//! - String literals (Java escapes, including text blocks) and character literals
//! - Numbers (loosely; the grammar only uses them in repetition ranges and `LOOKAHEAD`)
//! - Structural punctuation and Java operator symbols
//!
//! Comments and whitespace are skipped; they never appear in a production's token sequence.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)

pub mod tokens;

pub use tokens::{Token, TokenKind, directive_id};

use crate::ast::Span;
use crate::diagnostics::CompileError;
use jjkw_core::lang::punctuation;

/// Lexer for grammar source text.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// Returns a vector of tokens on success, or a vector of errors on failure.
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<CompileError>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            "",
            Span::new(self.current_pos, self.current_pos),
        ));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        let source = self.source;
        let image = &source[start..self.current_pos];
        self.tokens
            .push(Token::new(kind, image, Span::new(start, self.current_pos)));
    }

    fn error(&mut self, message: String, start: usize) {
        self.errors
            .push(CompileError::new(message, Span::new(start, self.current_pos)));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            c if c.is_whitespace() => {}

            '/' if self.peek() == Some('/') => {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            }
            '/' if self.peek() == Some('*') => self.skip_block_comment(start),

            '"' => self.scan_string(start),
            '\'' => self.scan_char(start),

            '0'..='9' => self.scan_number(start),

            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => {
                if let Some(id) = punctuation::from_char(c) {
                    self.add_token(TokenKind::Punctuation(id), start);
                } else if is_java_symbol(c) {
                    self.add_token(TokenKind::Symbol(c), start);
                } else {
                    self.error(format!("Unexpected character '{}'", c), start);
                }
            }
        }
    }

    fn skip_block_comment(&mut self, start: usize) {
        self.advance(); // '*'
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return;
                }
                Some(_) => {}
                None => {
                    self.error("Unterminated block comment".to_string(), start);
                    return;
                }
            }
        }
    }

    // ========================================================================
    // Literals
    // ========================================================================

    /// Scan a string literal; the opening quote has been consumed.
    fn scan_string(&mut self, start: usize) {
        if self.peek() == Some('"') && self.peek_next() == Some('"') {
            self.advance();
            self.advance();
            self.scan_text_block(start);
            return;
        }

        let mut value = String::new();
        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => match self.scan_escape() {
                    Ok(c) => value.push(c),
                    Err(msg) => self.error(msg, start),
                },
                Some('\n') | None => {
                    self.error("Unterminated string literal".to_string(), start);
                    return;
                }
                Some(c) => value.push(c),
            }
        }
        self.add_token(TokenKind::String(value), start);
    }

    /// Scan a Java text block body; `"""` has been consumed.
    fn scan_text_block(&mut self, start: usize) {
        let body_start = self.current_pos;
        loop {
            match self.advance() {
                Some('"') if self.source[self.current_pos..].starts_with("\"\"") => {
                    let body = self.source[body_start..self.current_pos - 1].to_string();
                    self.advance();
                    self.advance();
                    self.add_token(TokenKind::String(body), start);
                    return;
                }
                Some('\\') => {
                    self.advance();
                }
                Some(_) => {}
                None => {
                    self.error("Unterminated text block".to_string(), start);
                    return;
                }
            }
        }
    }

    /// Scan a character literal; the opening quote has been consumed.
    fn scan_char(&mut self, start: usize) {
        match self.advance() {
            Some('\\') => {
                if let Err(msg) = self.scan_escape() {
                    self.error(msg, start);
                }
            }
            Some('\'') | Some('\n') | None => {
                self.error("Empty or unterminated character literal".to_string(), start);
                return;
            }
            Some(_) => {}
        }
        if !self.match_char('\'') {
            self.error("Unterminated character literal".to_string(), start);
            return;
        }
        self.add_token(TokenKind::Char, start);
    }

    /// Decode one escape sequence; the backslash has been consumed.
    fn scan_escape(&mut self) -> Result<char, String> {
        match self.advance() {
            Some('n') => Ok('\n'),
            Some('t') => Ok('\t'),
            Some('r') => Ok('\r'),
            Some('b') => Ok('\u{8}'),
            Some('f') => Ok('\u{c}'),
            Some('s') => Ok(' '),
            Some('\\') => Ok('\\'),
            Some('\'') => Ok('\''),
            Some('"') => Ok('"'),
            Some('u') => {
                while self.peek() == Some('u') {
                    self.advance();
                }
                let mut code = 0u32;
                for _ in 0..4 {
                    let digit = self
                        .advance()
                        .and_then(|c| c.to_digit(16))
                        .ok_or_else(|| "Invalid unicode escape".to_string())?;
                    code = code * 16 + digit;
                }
                char::from_u32(code).ok_or_else(|| format!("Invalid unicode escape \\u{:04x}", code))
            }
            Some(c @ '0'..='7') => {
                let mut code = c.to_digit(8).unwrap_or(0);
                let max_digits = if c <= '3' { 2 } else { 1 };
                for _ in 0..max_digits {
                    match self.peek().and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            self.advance();
                            code = code * 8 + d;
                        }
                        None => break,
                    }
                }
                char::from_u32(code).ok_or_else(|| "Invalid octal escape".to_string())
            }
            Some(c) => Err(format!("Invalid escape sequence '\\{}'", c)),
            None => Err("Unterminated escape sequence".to_string()),
        }
    }

    fn scan_number(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else if c == '.' && self.peek_next().is_some_and(|n| n.is_ascii_digit()) {
                self.advance();
            } else {
                break;
            }
        }
        self.add_token(TokenKind::Number, start);
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        if let Some(id) = directive_id(spelling) {
            self.add_token(TokenKind::Directive(id), start);
        } else {
            let name = spelling.to_string();
            self.add_token(TokenKind::Ident(name), start);
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (Java rules).
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

/// Check if a character can continue an identifier (Java rules).
fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Operator characters that only occur in embedded Java.
fn is_java_symbol(c: char) -> bool {
    matches!(c, '!' | '&' | '^' | '%' | '/' | '@' | '\\')
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<CompileError>> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use jjkw_core::lang::directives::{self, DirectiveId};
    use jjkw_core::lang::punctuation::PunctuationId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_directive_registry_parity() {
        for d in directives::DIRECTIVES {
            let tokens = lex(d.canonical).unwrap_or_else(|errs| panic!("lex({:?}) failed: {:?}", d.canonical, errs));
            assert_eq!(tokens.len(), 2, "expected token + EOF for directive {:?}", d.id);
            assert!(tokens[0].kind.is_directive(d.id));
        }
    }

    #[test]
    fn test_punctuation_registry_parity() {
        for p in punctuation::PUNCTUATION {
            let tokens = lex(p.canonical).unwrap_or_else(|errs| panic!("lex({:?}) failed: {:?}", p.canonical, errs));
            assert_eq!(tokens.len(), 2, "expected token + EOF for punctuation {:?}", p.id);
            assert!(tokens[0].kind.is_punctuation(p.id));
        }
    }

    #[test]
    fn test_token_definition() {
        let tokens = lex(r#"TOKEN: { <K_SELECT: "SELECT"> }"#).unwrap();
        assert!(tokens[0].kind.is_directive(DirectiveId::Token));
        assert!(tokens[1].kind.is_punctuation(PunctuationId::Colon));
        assert!(tokens[2].kind.is_punctuation(PunctuationId::LBrace));
        assert!(tokens[3].kind.is_punctuation(PunctuationId::Lt));
        assert!(matches!(&tokens[4].kind, TokenKind::Ident(s) if s == "K_SELECT"));
        assert!(matches!(&tokens[6].kind, TokenKind::String(s) if s == "SELECT"));
        assert_eq!(tokens[6].image, "\"SELECT\"");
        assert!(tokens[7].kind.is_punctuation(PunctuationId::Gt));
    }

    #[test]
    fn test_directives_are_case_sensitive() {
        let k = kinds("options OPTIONS token TOKEN");
        assert!(matches!(k[0], TokenKind::Directive(DirectiveId::Options)));
        assert!(matches!(&k[1], TokenKind::Ident(s) if s == "OPTIONS"));
        assert!(matches!(&k[2], TokenKind::Ident(s) if s == "token"));
        assert!(matches!(k[3], TokenKind::Directive(DirectiveId::Token)));
    }

    #[test]
    fn test_comments_are_skipped() {
        let k = kinds("A // K_HIDDEN\n/* K_ALSO_HIDDEN */ B");
        assert_eq!(k.len(), 3);
        assert!(matches!(&k[0], TokenKind::Ident(s) if s == "A"));
        assert!(matches!(&k[1], TokenKind::Ident(s) if s == "B"));
    }

    #[test]
    fn test_string_escapes() {
        let tokens = lex(r#""a\"b" "\n" "A" "\101""#).unwrap();
        assert!(matches!(&tokens[0].kind, TokenKind::String(s) if s == "a\"b"));
        assert!(matches!(&tokens[1].kind, TokenKind::String(s) if s == "\n"));
        assert!(matches!(&tokens[2].kind, TokenKind::String(s) if s == "A"));
        assert!(matches!(&tokens[3].kind, TokenKind::String(s) if s == "A"));
    }

    #[test]
    fn test_char_literals_and_java_symbols() {
        let k = kinds("c == '\\'' && !x");
        assert!(matches!(k[1], TokenKind::Punctuation(PunctuationId::Eq)));
        assert!(matches!(k[3], TokenKind::Char));
        assert!(matches!(k[4], TokenKind::Symbol('&')));
        assert!(matches!(k[6], TokenKind::Symbol('!')));
    }

    #[test]
    fn test_text_block() {
        let tokens = lex("String s = \"\"\"\n  K_X \"quoted\"\n\"\"\"; done").unwrap();
        assert!(matches!(&tokens[3].kind, TokenKind::String(s) if s.contains("K_X")));
        assert!(tokens[4].kind.is_punctuation(PunctuationId::Semi));
    }

    #[test]
    fn test_unterminated_string() {
        let errs = lex("\"abc\nTOKEN").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("Unterminated string literal"));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let errs = lex("/* never closed").unwrap_err();
        assert!(errs[0].message.contains("Unterminated block comment"));
    }

    #[test]
    fn test_unexpected_character() {
        let errs = lex("A ` B").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("Unexpected character '`'"));
    }

    #[test]
    fn test_spans_cover_images() {
        let source = "void  RelObjectName()";
        for t in lex(source).unwrap() {
            assert_eq!(&source[t.span.start..t.span.end], t.image);
        }
    }
}
