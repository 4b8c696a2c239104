/// Declaration parsing.
///
/// Options, the parser class, and the top-level productions: regular expression blocks, BNF productions,
/// `JAVACODE` productions and `TOKEN_MGR_DECLS`.
impl<'a> Parser<'a> {
    // ========================================================================
    // Prologue
    // ========================================================================

    /// `options { NAME = value; ... }`
    fn options_block(&mut self) -> Result<Vec<OptionBinding>, CompileError> {
        self.expect_directive(DirectiveId::Options, "to start the options block")?;
        self.expect_punct(PunctuationId::LBrace, "after 'options'")?;

        let mut options = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) {
            let token = self.peek();
            let name = match &token.kind {
                TokenKind::Ident(name) => name.clone(),
                // LOOKAHEAD, IGNORE_CASE ... are valid option names.
                TokenKind::Directive(_) => token.image.clone(),
                _ => return Err(self.unexpected("option name")),
            };
            self.advance();
            self.expect_punct(PunctuationId::Eq, "after option name")?;

            let mut value = Vec::new();
            while !self.check_punct(PunctuationId::Semi) {
                if self.is_at_end() || self.check_punct(PunctuationId::RBrace) {
                    return Err(self.unexpected("';' after option value"));
                }
                value.push(self.advance().image.as_str());
            }
            if value.is_empty() {
                return Err(self.unexpected("option value"));
            }
            self.advance();
            options.push(OptionBinding {
                name: Spanned::new(name, token.span),
                value: value.join(" "),
            });
        }
        self.advance();
        Ok(options)
    }

    /// `PARSER_BEGIN(Name) ... PARSER_END(Name)`; the Java compilation unit in between is skipped.
    fn parser_class(&mut self) -> Result<Spanned<Ident>, CompileError> {
        self.expect_directive(DirectiveId::ParserBegin, "")?;
        let begin = self.parenthesized_name("after PARSER_BEGIN")?;

        while !self.check_directive(DirectiveId::ParserEnd) {
            if self.is_at_end() {
                return Err(CompileError::syntax(
                    format!("Missing PARSER_END for parser class '{}'", begin.node),
                    begin.span,
                ));
            }
            self.advance();
        }
        self.advance();
        let end = self.parenthesized_name("after PARSER_END")?;

        if end.node != begin.node {
            return Err(CompileError::syntax(
                format!(
                    "Name passed to PARSER_END ('{}') does not match PARSER_BEGIN ('{}')",
                    end.node, begin.node
                ),
                end.span,
            )
            .with_note(format!("parser class declared as '{}'", begin.node)));
        }
        Ok(begin)
    }

    fn parenthesized_name(&mut self, context: &str) -> Result<Spanned<Ident>, CompileError> {
        self.expect_punct(PunctuationId::LParen, context)?;
        let name = self.identifier("parser class name")?;
        self.expect_punct(PunctuationId::RParen, "after parser class name")?;
        Ok(name)
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn declaration(&mut self) -> Result<Spanned<Declaration>, CompileError> {
        let start = self.current_span();

        if self.check_punct(PunctuationId::Lt) {
            let states = self.lexical_states()?;
            let block = self.regex_block(states)?;
            return Ok(Spanned::new(Declaration::Regex(block), start.merge(self.previous().span)));
        }

        match self.peek().directive_id() {
            Some(DirectiveId::Token | DirectiveId::SpecialToken | DirectiveId::Skip | DirectiveId::More) => {
                let block = self.regex_block(Vec::new())?;
                Ok(Spanned::new(Declaration::Regex(block), start.merge(self.previous().span)))
            }
            Some(DirectiveId::JavaCode) => {
                let production = self.javacode_production()?;
                Ok(Spanned::new(
                    Declaration::JavaCode(production),
                    start.merge(self.previous().span),
                ))
            }
            Some(DirectiveId::TokenMgrDecls) => {
                self.advance();
                self.expect_punct(PunctuationId::Colon, "after TOKEN_MGR_DECLS")?;
                self.java_block()?;
                Ok(Spanned::new(
                    Declaration::TokenManagerDecls,
                    start.merge(self.previous().span),
                ))
            }
            Some(DirectiveId::Options) | Some(DirectiveId::ParserBegin) => Err(CompileError::syntax(
                format!("'{}' must appear before any production", self.peek().image),
                start,
            )),
            _ => {
                let production = self.bnf_production()?;
                Ok(Spanned::new(Declaration::Bnf(production), start.merge(self.previous().span)))
            }
        }
    }

    /// `< * >` or `< STATE, STATE ... >` in front of a regular expression production.
    fn lexical_states(&mut self) -> Result<Vec<Ident>, CompileError> {
        self.expect_punct(PunctuationId::Lt, "to start lexical state list")?;
        if self.match_punct(PunctuationId::Star) {
            self.expect_punct(PunctuationId::Gt, "after '*'")?;
            return Ok(vec!["*".to_string()]);
        }
        let mut states = vec![self.identifier("lexical state name")?.node];
        while self.match_punct(PunctuationId::Comma) {
            states.push(self.identifier("lexical state name")?.node);
        }
        self.expect_punct(PunctuationId::Gt, "after lexical states")?;
        Ok(states)
    }

    /// `ResultType Name(params) [throws ...] : { decls } { expansion }`
    fn bnf_production(&mut self) -> Result<BnfProduction, CompileError> {
        let first_token = self.pos;
        let (result_type, name) = self.production_header()?;

        self.expect_punct(PunctuationId::Colon, &format!("after the header of production '{}'", name.node))?;
        self.java_block()?;

        let open = self.expect_punct(PunctuationId::LBrace, "to open the expansion body")?.span;
        let expansion = if self.check_punct(PunctuationId::RBrace) {
            Spanned::new(Expansion::Empty, Span::new(open.end, self.current_span().start))
        } else {
            self.expansion_choices()?
        };
        self.expect_punct(PunctuationId::RBrace, &format!("to close the body of production '{}'", name.node))?;
        let last_token = self.pos - 1;

        Ok(BnfProduction {
            result_type,
            name,
            expansion,
            first_token,
            last_token,
        })
    }

    /// `JAVACODE ResultType Name(params) [throws ...] { java }`
    fn javacode_production(&mut self) -> Result<JavaCodeProduction, CompileError> {
        self.expect_directive(DirectiveId::JavaCode, "")?;
        let (result_type, name) = self.production_header()?;
        self.java_block()?;
        Ok(JavaCodeProduction { result_type, name })
    }

    /// Result type, name, parameter list and optional `throws` clause of a production.
    fn production_header(&mut self) -> Result<(String, Spanned<Ident>), CompileError> {
        let mut result_type: Vec<&str> = Vec::new();
        loop {
            let token = self.peek();
            if matches!(token.kind, TokenKind::Ident(_)) && self.peek_at(1).kind.is_punctuation(PunctuationId::LParen)
            {
                break;
            }
            let stops = matches!(token.kind, TokenKind::Eof | TokenKind::Directive(_))
                || token.kind.is_punctuation(PunctuationId::Colon)
                || token.kind.is_punctuation(PunctuationId::LBrace);
            if stops {
                return Err(self.unexpected("production name followed by '('"));
            }
            result_type.push(self.advance().image.as_str());
        }

        if result_type.is_empty() {
            return Err(CompileError::syntax(
                format!("Production '{}' has no result type", self.peek().image),
                self.current_span(),
            )
            .with_hint("use `void` for productions that return nothing"));
        }

        let name = self.identifier("production name")?;
        self.skip_balanced(PunctuationId::LParen, PunctuationId::RParen, "parameter list")?;

        if self.peek().kind.is_ident("throws") {
            self.advance();
            self.qualified_name("exception type")?;
            while self.match_punct(PunctuationId::Comma) {
                self.qualified_name("exception type")?;
            }
        }

        Ok((join_type(&result_type), name))
    }
}
