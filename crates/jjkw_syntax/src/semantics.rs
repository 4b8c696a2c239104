//! Semantic analysis: named-token and production tables.
//!
//! Walks a parsed [`Grammar`] and builds the two tables keyword extraction reads:
//! - the **token table**: every labeled regular expression (from regular expression productions and from inline
//!   BNF terminals), keyed by label,
//! - the **production table**: every BNF and `JAVACODE` production, keyed by name.
//!
//! The grammar is rejected when a label or production name is defined twice, when `<NAME>` refers to an unknown
//! label, or when an expansion calls an unknown production.

use std::collections::{BTreeMap, HashSet};

use crate::ast::*;
use crate::diagnostics::CompileError;
use crate::lexer::Token;

/// A labeled regular expression that is exactly one string literal.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralTokenDef {
    pub label: String,
    /// Unquoted, unescaped text
    pub image: String,
    pub span: Span,
}

/// A BNF production together with its token sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionDef {
    pub name: String,
    /// Tokens from the first token of the production (access modifier or result type) to the closing `}` of the
    /// expansion body, inclusive
    pub tokens: Vec<Token>,
    pub span: Span,
}

impl ProductionDef {
    pub fn first_token(&self) -> Option<&Token> {
        self.tokens.first()
    }

    pub fn last_token(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Tokens from the first token up to, but excluding, the last one.
    pub fn tokens_before_last(&self) -> &[Token] {
        &self.tokens[..self.tokens.len().saturating_sub(1)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtherKind {
    /// Labeled regular expression that is not a single literal (choice, sequence, character list, ...)
    ComplexRegex,
    /// `JAVACODE` production
    JavaCode,
}

/// A table entry keyword extraction does not look into.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherDef {
    pub name: String,
    pub kind: OtherKind,
    pub span: Span,
}

/// Entry of a [`GrammarTables`] table.
#[derive(Debug, Clone, PartialEq)]
pub enum NamedGrammarItem {
    LiteralToken(LiteralTokenDef),
    Production(ProductionDef),
    Other(OtherDef),
}

impl NamedGrammarItem {
    /// Label or production name of this entry.
    pub fn name(&self) -> &str {
        match self {
            NamedGrammarItem::LiteralToken(def) => &def.label,
            NamedGrammarItem::Production(def) => &def.name,
            NamedGrammarItem::Other(def) => &def.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            NamedGrammarItem::LiteralToken(def) => def.span,
            NamedGrammarItem::Production(def) => def.span,
            NamedGrammarItem::Other(def) => def.span,
        }
    }
}

/// Result of semantic analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrammarTables {
    tokens: BTreeMap<String, NamedGrammarItem>,
    productions: BTreeMap<String, NamedGrammarItem>,
    options: BTreeMap<String, String>,
    parser_name: Option<String>,
}

impl GrammarTables {
    /// Named tokens keyed by label.
    pub fn tokens(&self) -> &BTreeMap<String, NamedGrammarItem> {
        &self.tokens
    }

    /// Productions keyed by name.
    pub fn productions(&self) -> &BTreeMap<String, NamedGrammarItem> {
        &self.productions
    }

    /// `options { ... }` bindings (name to raw value text).
    pub fn options(&self) -> &BTreeMap<String, String> {
        &self.options
    }

    pub fn parser_name(&self) -> Option<&str> {
        self.parser_name.as_deref()
    }
}

/// Build the token and production tables of a grammar.
///
/// ## Parameters
/// - `grammar`: the parsed grammar.
/// - `tokens`: the token stream `grammar` was parsed from; production token sequences are copied out of it.
///
/// ## Errors
/// Returns every semantic error found (duplicates and undefined references).
#[tracing::instrument(skip_all, fields(declarations = grammar.declarations.len()))]
pub fn analyze(grammar: &Grammar, tokens: &[Token]) -> Result<GrammarTables, Vec<CompileError>> {
    let mut analyzer = Analyzer::new(tokens);
    analyzer.collect(grammar);
    analyzer.check_references(grammar);

    if !analyzer.errors.is_empty() {
        return Err(analyzer.errors);
    }

    tracing::debug!(
        tokens = analyzer.tables.tokens.len(),
        productions = analyzer.tables.productions.len(),
        "grammar tables built"
    );
    let mut tables = analyzer.tables;
    tables.options = grammar
        .options
        .iter()
        .map(|o| (o.name.node.clone(), o.value.clone()))
        .collect();
    tables.parser_name = grammar.parser_name.as_ref().map(|n| n.node.clone());
    Ok(tables)
}

struct Analyzer<'a> {
    tokens: &'a [Token],
    tables: GrammarTables,
    errors: Vec<CompileError>,
}

impl<'a> Analyzer<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            tables: GrammarTables::default(),
            errors: Vec::new(),
        }
    }

    // ========================================================================
    // Definitions
    // ========================================================================

    fn collect(&mut self, grammar: &Grammar) {
        for decl in &grammar.declarations {
            match &decl.node {
                Declaration::Regex(block) => {
                    for spec in &block.specs {
                        self.define_token(&spec.node.regex);
                    }
                }
                Declaration::Bnf(production) => {
                    let def = ProductionDef {
                        name: production.name.node.clone(),
                        tokens: self.production_tokens(production),
                        span: decl.span,
                    };
                    self.define_production(&production.name, NamedGrammarItem::Production(def));

                    // Inline labeled terminals (`<K_X: "x">` inside an expansion) are named tokens too.
                    Expansion::walk(&production.expansion, &mut |e| {
                        if let Expansion::Terminal { regex, .. } = &e.node {
                            self.define_token(regex);
                        }
                    });
                }
                Declaration::JavaCode(production) => {
                    let def = OtherDef {
                        name: production.name.node.clone(),
                        kind: OtherKind::JavaCode,
                        span: decl.span,
                    };
                    self.define_production(&production.name, NamedGrammarItem::Other(def));
                }
                Declaration::TokenManagerDecls => {}
            }
        }
    }

    fn production_tokens(&self, production: &BnfProduction) -> Vec<Token> {
        let end = production.last_token.min(self.tokens.len().saturating_sub(1));
        self.tokens
            .get(production.first_token..=end)
            .map(<[Token]>::to_vec)
            .unwrap_or_default()
    }

    fn define_token(&mut self, regex: &RegularExpression) {
        let Some(label) = &regex.label else {
            return;
        };
        let item = match regex.body.as_literal() {
            Some(image) => NamedGrammarItem::LiteralToken(LiteralTokenDef {
                label: label.node.clone(),
                image: image.to_string(),
                span: label.span,
            }),
            None => NamedGrammarItem::Other(OtherDef {
                name: label.node.clone(),
                kind: OtherKind::ComplexRegex,
                span: label.span,
            }),
        };

        if let Some(previous) = self.tables.tokens.get(&label.node) {
            self.errors.push(
                CompileError::semantic(
                    format!("Multiply defined lexical token name \"{}\"", label.node),
                    label.span,
                )
                .with_note(format!("first defined at byte offset {}", previous.span().start)),
            );
            return;
        }
        self.tables.tokens.insert(label.node.clone(), item);
    }

    fn define_production(&mut self, name: &Spanned<Ident>, item: NamedGrammarItem) {
        if let Some(previous) = self.tables.productions.get(&name.node) {
            self.errors.push(
                CompileError::semantic(format!("Multiply defined production \"{}\"", name.node), name.span)
                    .with_note(format!("first defined at byte offset {}", previous.span().start)),
            );
            return;
        }
        self.tables.productions.insert(name.node.clone(), item);
    }

    // ========================================================================
    // References
    // ========================================================================

    fn check_references(&mut self, grammar: &Grammar) {
        let mut reported: HashSet<String> = HashSet::new();

        for decl in &grammar.declarations {
            match &decl.node {
                Declaration::Regex(block) => {
                    for spec in &block.specs {
                        self.check_regex(&spec.node.regex, spec.span, &mut reported);
                    }
                }
                Declaration::Bnf(production) => {
                    let mut found: Vec<(&RegularExpression, Span)> = Vec::new();
                    let mut calls: Vec<&Spanned<Ident>> = Vec::new();
                    Expansion::walk(&production.expansion, &mut |e| match &e.node {
                        Expansion::Terminal { regex, .. } => found.push((regex, e.span)),
                        Expansion::NonTerminal { name, .. } => calls.push(name),
                        _ => {}
                    });
                    for (regex, span) in found {
                        self.check_regex(regex, span, &mut reported);
                    }
                    for name in calls {
                        if !self.tables.productions.contains_key(&name.node) {
                            self.errors.push(
                                CompileError::semantic(
                                    format!("Non-terminal {} has not been defined", name.node),
                                    name.span,
                                )
                                .with_note(format!("called from production \"{}\"", production.name.node)),
                            );
                        }
                    }
                }
                Declaration::JavaCode(_) | Declaration::TokenManagerDecls => {}
            }
        }
    }

    fn check_regex(&mut self, regex: &RegularExpression, span: Span, reported: &mut HashSet<String>) {
        for name in regex.body.references() {
            if self.tables.tokens.contains_key(name) || !reported.insert(name.to_string()) {
                continue;
            }
            self.errors.push(
                CompileError::semantic(format!("Undefined lexical token name \"{}\"", name), span)
                    .with_hint("define it in a TOKEN block, e.g. `TOKEN : { <NAME: \"...\"> }`"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;
    use crate::{lexer, parser};

    fn analyze_str(source: &str) -> Result<GrammarTables, Vec<CompileError>> {
        let tokens = lexer::lex(source).unwrap();
        let grammar = parser::parse(&tokens).unwrap();
        analyze(&grammar, &tokens)
    }

    const GRAMMAR: &str = r#"
options { STATIC = false; }
PARSER_BEGIN(Demo) public class Demo {} PARSER_END(Demo)

SKIP : { " " }
TOKEN : {
    <K_SELECT: "SELECT">
  | <K_FROM: ("FROM")>
  | <#LETTER: ["a"-"z"]>
  | <S_IDENTIFIER: (<LETTER>)+>
  | <OP_PLUS: "+">
}

String RelObjectName() : { Token tk; }
{
    ( tk = <S_IDENTIFIER> | tk = <K_FROM> ) { return tk.image; }
}

void Select() : {}
{
    <K_SELECT> RelObjectName() [ <K_AS: "AS"> ] <EOF>
}

JAVACODE void skip() { getNextToken(); }
"#;

    #[test]
    fn test_token_table_classification() {
        let tables = analyze_str(GRAMMAR).unwrap();
        let tokens = tables.tokens();
        assert_eq!(
            tokens.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["K_AS", "K_FROM", "K_SELECT", "LETTER", "OP_PLUS", "S_IDENTIFIER"]
        );
        assert!(matches!(&tokens["K_SELECT"], NamedGrammarItem::LiteralToken(d) if d.image == "SELECT"));
        assert!(matches!(&tokens["K_FROM"], NamedGrammarItem::LiteralToken(d) if d.image == "FROM"));
        assert!(matches!(&tokens["K_AS"], NamedGrammarItem::LiteralToken(d) if d.image == "AS"));
        assert!(matches!(&tokens["OP_PLUS"], NamedGrammarItem::LiteralToken(d) if d.image == "+"));
        assert!(matches!(
            &tokens["S_IDENTIFIER"],
            NamedGrammarItem::Other(OtherDef { kind: OtherKind::ComplexRegex, .. })
        ));
        assert!(matches!(&tokens["LETTER"], NamedGrammarItem::Other(_)));
    }

    #[test]
    fn test_production_table_and_token_sequence() {
        let tables = analyze_str(GRAMMAR).unwrap();
        let productions = tables.productions();
        assert_eq!(productions.len(), 3);
        assert!(matches!(
            &productions["skip"],
            NamedGrammarItem::Other(OtherDef { kind: OtherKind::JavaCode, .. })
        ));

        let NamedGrammarItem::Production(def) = &productions["RelObjectName"] else {
            panic!("expected BNF production");
        };
        assert_eq!(def.first_token().unwrap().image, "String");
        assert_eq!(def.last_token().unwrap().image, "}");
        let walked: Vec<&str> = def.tokens_before_last().iter().map(|t| t.image.as_str()).collect();
        assert!(walked.contains(&"K_FROM"));
        assert!(walked.contains(&"S_IDENTIFIER"));
        assert_ne!(walked.last(), Some(&"}"));
        assert_eq!(def.tokens.len(), walked.len() + 1);
    }

    #[test]
    fn test_options_and_parser_name() {
        let tables = analyze_str(GRAMMAR).unwrap();
        assert_eq!(tables.options().get("STATIC").map(String::as_str), Some("false"));
        assert_eq!(tables.parser_name(), Some("Demo"));
    }

    #[test]
    fn test_duplicate_label_is_rejected() {
        let errs = analyze_str(r#"TOKEN : { <K_A: "A"> } TOKEN : { <K_A: "AA"> }"#).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ErrorKind::Semantic);
        assert!(errs[0].message.contains("Multiply defined lexical token name"));
        assert_eq!(errs[0].notes.len(), 1);
    }

    #[test]
    fn test_duplicate_production_is_rejected() {
        let errs = analyze_str("void A() : {} { \"a\" }\nvoid A() : {} { \"b\" }").unwrap_err();
        assert!(errs[0].message.contains("Multiply defined production"));
    }

    #[test]
    fn test_undefined_references_are_rejected() {
        let errs = analyze_str("TOKEN : { <K_A: \"A\"> }\nvoid A() : {} { <K_B> <K_B> Missing() }").unwrap_err();
        assert_eq!(errs.len(), 2, "{:?}", errs);
        assert!(errs[0].message.contains("Undefined lexical token name \"K_B\""));
        assert!(errs[1].message.contains("Non-terminal Missing has not been defined"));
    }

    #[test]
    fn test_unlabeled_literals_are_not_named() {
        let tables = analyze_str("void A() : {} { \"SELECT\" }").unwrap();
        assert!(tables.tokens().is_empty());
    }

    #[test]
    fn test_empty_body_production_has_brace_tokens() {
        let tables = analyze_str("void A() : {} {}").unwrap();
        let NamedGrammarItem::Production(def) = &tables.productions()["A"] else {
            panic!("expected BNF production");
        };
        let images: Vec<&str> = def.tokens.iter().map(|t| t.image.as_str()).collect();
        assert_eq!(images, vec!["void", "A", "(", ")", ":", "{", "}", "{", "}"]);
    }
}
