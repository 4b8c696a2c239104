/// Token-stream navigation helpers.
///
/// This chunk contains the cursor primitives (`peek`, `advance`, `expect_*`), balanced-block skipping for
/// embedded Java, and error recovery.
impl<'a> Parser<'a> {
    // ========================================================================
    // Cursor
    // ========================================================================

    fn peek(&self) -> &'a Token {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &'a Token {
        let idx = (self.pos + offset).min(self.tokens.len().saturating_sub(1));
        &self.tokens[idx]
    }

    fn previous(&self) -> &'a Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    // ========================================================================
    // Matching
    // ========================================================================

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check_directive(&self, id: DirectiveId) -> bool {
        self.peek().kind.is_directive(id)
    }

    fn expect_punct(&mut self, id: PunctuationId, context: &str) -> Result<&'a Token, CompileError> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("'{}' {}", jjkw_core::lang::punctuation::as_str(id), context)))
        }
    }

    fn expect_directive(&mut self, id: DirectiveId, context: &str) -> Result<&'a Token, CompileError> {
        if self.check_directive(id) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(format!("{} {}", directives::as_str(id), context).trim_end()))
        }
    }

    /// Build an "Expected X, found Y" error at the current token.
    fn unexpected(&self, expected: &str) -> CompileError {
        let found = match &self.peek().kind {
            TokenKind::Eof => "end of file".to_string(),
            _ => format!("'{}'", self.peek().image),
        };
        CompileError::syntax(format!("Expected {}, found {}", expected, found), self.current_span())
    }

    // ========================================================================
    // Embedded Java
    // ========================================================================

    /// Skip a balanced `open ... close` block starting at the current token.
    ///
    /// ## Returns
    /// - The index of the closing token.
    fn skip_balanced(&mut self, open: PunctuationId, close: PunctuationId, what: &str) -> Result<usize, CompileError> {
        let start = self.expect_punct(open, &format!("to open {}", what))?.span;
        let mut depth = 1usize;
        loop {
            if self.is_at_end() {
                return Err(CompileError::syntax(
                    format!("Unterminated {}", what),
                    start.merge(self.current_span()),
                )
                .with_note(format!("missing '{}'", jjkw_core::lang::punctuation::as_str(close))));
            }
            let token = self.advance();
            if token.kind.is_punctuation(open) {
                depth += 1;
            } else if token.kind.is_punctuation(close) {
                depth -= 1;
                if depth == 0 {
                    return Ok(self.pos - 1);
                }
            }
        }
    }

    /// Skip a Java block `{ ... }`.
    fn java_block(&mut self) -> Result<usize, CompileError> {
        self.skip_balanced(PunctuationId::LBrace, PunctuationId::RBrace, "Java block")
    }

    // ========================================================================
    // Error recovery
    // ========================================================================

    /// Skip to the start of the next top-level declaration.
    ///
    /// A declaration boundary is a section/regex-kind directive at brace depth zero, or the token following a
    /// closing brace at depth zero that does not open another block (a BNF production has two consecutive blocks).
    fn synchronize(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            let token = self.advance();
            match token.kind.punctuation_id() {
                Some(PunctuationId::LBrace) => depth += 1,
                Some(PunctuationId::RBrace) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 && !self.check_punct(PunctuationId::LBrace) {
                        return;
                    }
                }
                _ => {}
            }
            if depth == 0 && self.at_declaration_directive() {
                return;
            }
        }
    }

    fn at_declaration_directive(&self) -> bool {
        self.peek().directive_id().is_some_and(|id| {
            matches!(
                directives::category(id),
                DirectiveCategory::Section | DirectiveCategory::RegexKind
            ) && id != DirectiveId::ParserEnd
        })
    }
}
