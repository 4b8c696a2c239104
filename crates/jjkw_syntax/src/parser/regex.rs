/// Regular expression parsing.
///
/// Covers regular expression productions (`TOKEN : { ... }`) and the regular expressions that appear as
/// terminals inside BNF expansions.
impl<'a> Parser<'a> {
    /// `TOKEN [ [IGNORE_CASE] ] : { spec | spec ... }`
    fn regex_block(&mut self, lexical_states: Vec<Ident>) -> Result<RegexBlock, CompileError> {
        let kind = match self.peek().directive_id() {
            Some(DirectiveId::Token) => RegexKind::Token,
            Some(DirectiveId::SpecialToken) => RegexKind::SpecialToken,
            Some(DirectiveId::Skip) => RegexKind::Skip,
            Some(DirectiveId::More) => RegexKind::More,
            _ => return Err(self.unexpected("TOKEN, SPECIAL_TOKEN, SKIP or MORE")),
        };
        let kind_image = self.advance().image.clone();

        let mut ignore_case = false;
        if self.match_punct(PunctuationId::LBracket) {
            self.expect_directive(DirectiveId::IgnoreCase, "inside '[...]'")?;
            self.expect_punct(PunctuationId::RBracket, "after IGNORE_CASE")?;
            ignore_case = true;
        }

        self.expect_punct(PunctuationId::Colon, &format!("after {}", kind_image))?;
        self.expect_punct(PunctuationId::LBrace, &format!("to open the {} block", kind_image))?;

        let mut specs = vec![self.regex_spec()?];
        while self.match_punct(PunctuationId::Pipe) {
            specs.push(self.regex_spec()?);
        }
        self.expect_punct(PunctuationId::RBrace, &format!("to close the {} block", kind_image))?;

        Ok(RegexBlock {
            lexical_states,
            kind,
            ignore_case,
            specs,
        })
    }

    /// `regular_expression [ { action } ] [ : NEXT_STATE ]`
    fn regex_spec(&mut self) -> Result<Spanned<RegexSpec>, CompileError> {
        let start = self.current_span();
        let regex = self.regular_expression()?;

        let has_action = self.check_punct(PunctuationId::LBrace);
        if has_action {
            self.java_block()?;
        }
        let next_state = if self.match_punct(PunctuationId::Colon) {
            Some(self.identifier("lexical state name")?.node)
        } else {
            None
        };

        Ok(Spanned::new(
            RegexSpec {
                regex,
                has_action,
                next_state,
            },
            start.merge(self.previous().span),
        ))
    }

    /// A top-level regular expression: `"lit"`, `<EOF>`, `<NAME>`, `<[#]LABEL: body>` or `<body>`.
    fn regular_expression(&mut self) -> Result<RegularExpression, CompileError> {
        if let TokenKind::String(value) = &self.peek().kind {
            self.advance();
            return Ok(RegularExpression {
                label: None,
                private: false,
                body: RegexExpr::Literal(value.clone()),
            });
        }

        self.expect_punct(PunctuationId::Lt, "regular expression")?;

        if self.check_directive(DirectiveId::Eof) && self.peek_at(1).kind.is_punctuation(PunctuationId::Gt) {
            self.advance();
            self.advance();
            return Ok(RegularExpression {
                label: None,
                private: false,
                body: RegexExpr::Eof,
            });
        }

        if matches!(self.peek().kind, TokenKind::Ident(_)) && self.peek_at(1).kind.is_punctuation(PunctuationId::Gt) {
            let name = self.identifier("token name")?;
            self.advance();
            return Ok(RegularExpression {
                label: None,
                private: false,
                body: RegexExpr::Reference(name.node),
            });
        }

        let labeled = {
            let at = if self.check_punct(PunctuationId::Hash) { 1 } else { 0 };
            matches!(self.peek_at(at).kind, TokenKind::Ident(_))
                && self.peek_at(at + 1).kind.is_punctuation(PunctuationId::Colon)
        };
        let (label, private) = if labeled {
            let private = self.match_punct(PunctuationId::Hash);
            let label = self.identifier("token label")?;
            self.advance();
            (Some(label), private)
        } else {
            (None, false)
        };

        let body = self.regex_choices()?;
        self.expect_punct(PunctuationId::Gt, "to close the regular expression")?;
        Ok(RegularExpression { label, private, body })
    }

    fn regex_choices(&mut self) -> Result<RegexExpr, CompileError> {
        let mut choices = vec![self.regex_sequence()?];
        while self.match_punct(PunctuationId::Pipe) {
            choices.push(self.regex_sequence()?);
        }
        Ok(collapse(choices, RegexExpr::Choice))
    }

    fn regex_sequence(&mut self) -> Result<RegexExpr, CompileError> {
        let mut units = Vec::new();
        while !(self.is_at_end()
            || self.check_punct(PunctuationId::Pipe)
            || self.check_punct(PunctuationId::Gt)
            || self.check_punct(PunctuationId::RParen))
        {
            units.push(self.regex_unit()?);
        }
        if units.is_empty() {
            return Err(self.unexpected("regular expression"));
        }
        Ok(collapse(units, RegexExpr::Sequence))
    }

    fn regex_unit(&mut self) -> Result<RegexExpr, CompileError> {
        let token = self.peek();
        match &token.kind {
            TokenKind::String(value) => {
                self.advance();
                Ok(RegexExpr::Literal(value.clone()))
            }
            TokenKind::Punctuation(PunctuationId::Lt) => {
                self.advance();
                let name = self.identifier("token name")?;
                self.expect_punct(PunctuationId::Gt, "after token reference")?;
                Ok(RegexExpr::Reference(name.node))
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => self.char_list(false),
            TokenKind::Punctuation(PunctuationId::Tilde) => {
                self.advance();
                self.char_list(true)
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let inner = self.regex_choices()?;
                self.expect_punct(PunctuationId::RParen, "to close the group")?;
                match self.regex_repetition()? {
                    Some(repetition) => Ok(RegexExpr::Repeat {
                        inner: Box::new(inner),
                        repetition,
                    }),
                    None => Ok(inner),
                }
            }
            _ => Err(self.unexpected("regular expression unit")),
        }
    }

    /// `[ "a", "0"-"9", ... ]`
    fn char_list(&mut self, negated: bool) -> Result<RegexExpr, CompileError> {
        self.expect_punct(PunctuationId::LBracket, "to open the character list")?;
        let mut items = Vec::new();
        if !self.check_punct(PunctuationId::RBracket) {
            loop {
                let low = self.char_descriptor()?;
                if self.match_punct(PunctuationId::Minus) {
                    let high = self.char_descriptor()?;
                    items.push(format!("{}-{}", low, high));
                } else {
                    items.push(low.to_string());
                }
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RBracket, "to close the character list")?;
        Ok(RegexExpr::CharList { negated, items })
    }

    fn char_descriptor(&mut self) -> Result<&'a str, CompileError> {
        match &self.peek().kind {
            TokenKind::String(value) => {
                if value.chars().count() != 1 {
                    return Err(CompileError::syntax(
                        "Character descriptor must be a single character".to_string(),
                        self.current_span(),
                    ));
                }
                Ok(self.advance().image.as_str())
            }
            _ => Err(self.unexpected("character literal in character list")),
        }
    }

    /// `*`, `+`, `?`, `{n}`, `{n,}` or `{n,m}` after a parenthesized group.
    fn regex_repetition(&mut self) -> Result<Option<Repetition>, CompileError> {
        if self.match_punct(PunctuationId::Star) {
            return Ok(Some(Repetition::ZeroOrMore));
        }
        if self.match_punct(PunctuationId::Plus) {
            return Ok(Some(Repetition::OneOrMore));
        }
        if self.match_punct(PunctuationId::Question) {
            return Ok(Some(Repetition::ZeroOrOne));
        }
        if !self.match_punct(PunctuationId::LBrace) {
            return Ok(None);
        }

        let min = self.number("repetition count")?;
        let max = if self.match_punct(PunctuationId::Comma) {
            if self.check_punct(PunctuationId::RBrace) {
                None
            } else {
                Some(self.number("repetition bound")?)
            }
        } else {
            Some(min)
        };
        self.expect_punct(PunctuationId::RBrace, "to close the repetition range")?;

        if max.is_some_and(|max| max < min) {
            return Err(CompileError::syntax(
                format!("Repetition range {{{},{}}} has upper bound below lower bound", min, max.unwrap_or(min)),
                self.previous().span,
            ));
        }
        Ok(Some(Repetition::Range { min, max }))
    }
}

/// Collapse a single-element sequence or choice into its element.
fn collapse(mut items: Vec<RegexExpr>, wrap: fn(Vec<RegexExpr>) -> RegexExpr) -> RegexExpr {
    if items.len() == 1 {
        items.remove(0)
    } else {
        wrap(items)
    }
}
