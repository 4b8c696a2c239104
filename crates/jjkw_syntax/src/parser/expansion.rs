/// BNF expansion parsing.
impl<'a> Parser<'a> {
    /// `sequence ( | sequence )*`
    fn expansion_choices(&mut self) -> Result<Spanned<Expansion>, CompileError> {
        let first = self.expansion_sequence()?;
        if !self.check_punct(PunctuationId::Pipe) {
            return Ok(first);
        }
        let mut span = first.span;
        let mut choices = vec![first];
        while self.match_punct(PunctuationId::Pipe) {
            let next = self.expansion_sequence()?;
            span = span.merge(next.span);
            choices.push(next);
        }
        Ok(Spanned::new(Expansion::Choice(choices), span))
    }

    fn expansion_sequence(&mut self) -> Result<Spanned<Expansion>, CompileError> {
        let start = self.current_span();
        let mut units = Vec::new();
        while !self.at_sequence_end() {
            units.push(self.expansion_unit()?);
        }
        match units.len() {
            0 => Ok(Spanned::new(Expansion::Empty, Span::new(start.start, start.start))),
            1 => Ok(units.remove(0)),
            _ => {
                let span = units[0].span.merge(units[units.len() - 1].span);
                Ok(Spanned::new(Expansion::Sequence(units), span))
            }
        }
    }

    fn at_sequence_end(&self) -> bool {
        self.is_at_end()
            || matches!(
                self.peek().punctuation_id(),
                Some(
                    PunctuationId::Pipe
                        | PunctuationId::RParen
                        | PunctuationId::RBracket
                        | PunctuationId::RBrace
                        | PunctuationId::Comma
                )
            )
    }

    fn expansion_unit(&mut self) -> Result<Spanned<Expansion>, CompileError> {
        let start = self.current_span();
        let token = self.peek();

        match &token.kind {
            TokenKind::Directive(DirectiveId::Lookahead) => self.lookahead(),
            TokenKind::Punctuation(PunctuationId::LBrace) => {
                self.java_block()?;
                Ok(Spanned::new(Expansion::Action, start.merge(self.previous().span)))
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                self.advance();
                let inner = self.expansion_choices()?;
                self.expect_punct(PunctuationId::RBracket, "to close the optional expansion")?;
                Ok(Spanned::new(
                    Expansion::Optional(Box::new(inner)),
                    start.merge(self.previous().span),
                ))
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let inner = self.expansion_choices()?;
                self.expect_punct(PunctuationId::RParen, "to close the group")?;
                let node = if self.match_punct(PunctuationId::Star) {
                    Expansion::ZeroOrMore(Box::new(inner))
                } else if self.match_punct(PunctuationId::Plus) {
                    Expansion::OneOrMore(Box::new(inner))
                } else if self.match_punct(PunctuationId::Question) {
                    Expansion::Optional(Box::new(inner))
                } else {
                    return Ok(inner);
                };
                Ok(Spanned::new(node, start.merge(self.previous().span)))
            }
            TokenKind::String(_) | TokenKind::Punctuation(PunctuationId::Lt) => self.terminal(None, start),
            TokenKind::Ident(name) if name == "try" && self.peek_at(1).kind.is_punctuation(PunctuationId::LBrace) => {
                self.try_block()
            }
            TokenKind::Ident(_) => self.assignment_or_call(),
            _ => Err(self.unexpected("expansion unit")),
        }
    }

    /// `LOOKAHEAD( [amount] [,] [expansion] [,] [{ semantic }] )`
    fn lookahead(&mut self) -> Result<Spanned<Expansion>, CompileError> {
        let start = self.expect_directive(DirectiveId::Lookahead, "")?.span;
        self.expect_punct(PunctuationId::LParen, "after LOOKAHEAD")?;

        let amount = if matches!(self.peek().kind, TokenKind::Number) {
            let amount = self.number("lookahead amount")?;
            self.match_punct(PunctuationId::Comma);
            Some(amount)
        } else {
            None
        };

        let expansion = if self.check_punct(PunctuationId::LBrace) || self.check_punct(PunctuationId::RParen) {
            None
        } else {
            let e = self.expansion_choices()?;
            self.match_punct(PunctuationId::Comma);
            Some(Box::new(e))
        };

        if self.check_punct(PunctuationId::LBrace) {
            self.java_block()?;
        }
        self.expect_punct(PunctuationId::RParen, "to close LOOKAHEAD")?;

        Ok(Spanned::new(
            Expansion::Lookahead { amount, expansion },
            start.merge(self.previous().span),
        ))
    }

    /// `try { expansion } ( catch ( ... ) { java } )* [ finally { java } ]`
    fn try_block(&mut self) -> Result<Spanned<Expansion>, CompileError> {
        let start = self.advance().span;
        self.expect_punct(PunctuationId::LBrace, "after 'try'")?;
        let body = self.expansion_choices()?;
        self.expect_punct(PunctuationId::RBrace, "to close the try body")?;

        let mut catches = 0;
        while self.peek().kind.is_ident("catch") {
            self.advance();
            self.skip_balanced(PunctuationId::LParen, PunctuationId::RParen, "catch clause")?;
            self.java_block()?;
            catches += 1;
        }
        let has_finally = self.peek().kind.is_ident("finally");
        if has_finally {
            self.advance();
            self.java_block()?;
        }
        if catches == 0 && !has_finally {
            return Err(CompileError::syntax(
                "'try' expansion needs at least one 'catch' or a 'finally'".to_string(),
                start.merge(self.previous().span),
            ));
        }

        Ok(Spanned::new(
            Expansion::Try {
                body: Box::new(body),
                catches,
                has_finally,
            },
            start.merge(self.previous().span),
        ))
    }

    /// A regular expression terminal with an optional `.member` suffix.
    fn terminal(&mut self, lhs: Option<String>, start: Span) -> Result<Spanned<Expansion>, CompileError> {
        let regex = self.regular_expression()?;
        if self.match_punct(PunctuationId::Dot) {
            self.identifier("member name after '.'")?;
        }
        Ok(Spanned::new(
            Expansion::Terminal { lhs, regex },
            start.merge(self.previous().span),
        ))
    }

    /// `[lhs =] terminal`, `[lhs =] Name(args)`.
    fn assignment_or_call(&mut self) -> Result<Spanned<Expansion>, CompileError> {
        let start = self.current_span();

        if self.peek_at(1).kind.is_punctuation(PunctuationId::LParen) {
            return self.non_terminal(None, start);
        }

        let lhs = self.java_lvalue()?;
        self.expect_punct(PunctuationId::Eq, &format!("after '{}'", lhs))?;

        match &self.peek().kind {
            TokenKind::String(_) | TokenKind::Punctuation(PunctuationId::Lt) => self.terminal(Some(lhs), start),
            TokenKind::Ident(_) if self.peek_at(1).kind.is_punctuation(PunctuationId::LParen) => {
                self.non_terminal(Some(lhs), start)
            }
            _ => Err(self.unexpected(&format!("terminal or production call to assign to '{}'", lhs))),
        }
    }

    fn non_terminal(&mut self, lhs: Option<String>, start: Span) -> Result<Spanned<Expansion>, CompileError> {
        let name = self.identifier("production name")?;
        self.skip_balanced(PunctuationId::LParen, PunctuationId::RParen, "argument list")?;
        Ok(Spanned::new(
            Expansion::NonTerminal { lhs, name },
            start.merge(self.previous().span),
        ))
    }

    /// Java assignment target: `a`, `a.b`, `a[i]`, `this.a.b[i]`.
    fn java_lvalue(&mut self) -> Result<String, CompileError> {
        let mut text = self.identifier("assignment target")?.node;
        loop {
            if self.match_punct(PunctuationId::Dot) {
                text.push('.');
                text.push_str(&self.identifier("member name")?.node);
            } else if self.check_punct(PunctuationId::LBracket) {
                let open = self.pos;
                let close = self.skip_balanced(PunctuationId::LBracket, PunctuationId::RBracket, "index")?;
                let index: Vec<&str> = self.tokens[open + 1..close].iter().map(|t| t.image.as_str()).collect();
                text.push('[');
                text.push_str(&index.join(" "));
                text.push(']');
            } else {
                return Ok(text);
            }
        }
    }
}
