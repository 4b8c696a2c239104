/// Small parsing utilities shared by the other parser chunks.
impl<'a> Parser<'a> {
    fn identifier(&mut self, what: &str) -> Result<Spanned<Ident>, CompileError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok(Spanned::new(name.clone(), span))
            }
            _ => Err(self.unexpected(what)),
        }
    }

    /// `a.b.C`
    fn qualified_name(&mut self, what: &str) -> Result<String, CompileError> {
        let mut name = self.identifier(what)?.node;
        while self.match_punct(PunctuationId::Dot) {
            name.push('.');
            name.push_str(&self.identifier(what)?.node);
        }
        Ok(name)
    }

    fn number(&mut self, what: &str) -> Result<u32, CompileError> {
        if !matches!(self.peek().kind, TokenKind::Number) {
            return Err(self.unexpected(what));
        }
        let token = self.advance();
        token.image.parse::<u32>().map_err(|_| {
            CompileError::syntax(
                format!("Invalid {} '{}': expected a non-negative integer", what, token.image),
                token.span,
            )
        })
    }
}

/// Join result type tokens, keeping generic and array punctuation tight (`List<String>`, `int[]`).
fn join_type(parts: &[&str]) -> String {
    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        let tight = matches!(*part, "<" | ">" | "[" | "]" | "," | ".")
            || (i > 0 && matches!(parts[i - 1], "<" | "[" | "."));
        if i > 0 && !tight {
            out.push(' ');
        }
        out.push_str(part);
    }
    out
}
