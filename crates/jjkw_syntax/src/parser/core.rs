/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and recovers from errors by synchronizing at declaration boundaries, so one run
///   reports every broken declaration.
/// - Token indices (not copies) are recorded for BNF production boundaries; the semantic pass materializes the
///   token sequence.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<CompileError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `jjkw_syntax::lexer`, ending with `Eof`.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`Grammar`].
    ///
    /// ## Errors
    /// Returns a list of [`CompileError`]s if parsing fails. The parser attempts
    /// to recover and continue after an error to report multiple issues in one pass.
    pub fn parse(mut self) -> Result<Grammar, Vec<CompileError>> {
        let mut grammar = Grammar::default();

        if self.check_directive(DirectiveId::Options) {
            match self.options_block() {
                Ok(options) => grammar.options = options,
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
        }

        if self.check_directive(DirectiveId::ParserBegin) {
            match self.parser_class() {
                Ok(name) => grammar.parser_name = Some(name),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
        }

        while !self.is_at_end() {
            match self.declaration() {
                Ok(decl) => grammar.declarations.push(decl),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
        }

        if self.errors.is_empty() {
            Ok(grammar)
        } else {
            Err(self.errors)
        }
    }
}
