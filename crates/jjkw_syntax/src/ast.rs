//! Abstract syntax tree for JavaCC grammar files.
//!
//! Only the grammar structure is modelled. Embedded Java (parser class, declaration and action blocks, parameter
//! lists, result types) is recorded by token range or raw text, never parsed.

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

pub type Ident = String;

/// A grammar file is an options block, the parser class and a sequence of declarations
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grammar {
    pub options: Vec<OptionBinding>,
    pub parser_name: Option<Spanned<Ident>>,
    pub declarations: Vec<Spanned<Declaration>>,
}

/// `NAME = value;` inside `options { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct OptionBinding {
    pub name: Spanned<Ident>,
    /// Raw token text of the value, joined by single spaces
    pub value: String,
}

/// Top-level declarations after the parser class
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Regex(RegexBlock),
    Bnf(BnfProduction),
    JavaCode(JavaCodeProduction),
    TokenManagerDecls,
}

// ============================================================================
// Regular expression productions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexKind {
    Token,
    SpecialToken,
    Skip,
    More,
}

/// `[<STATES>] TOKEN [IGNORE_CASE] : { spec | spec ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct RegexBlock {
    /// Empty means the default state; `*` is recorded as a single `"*"` entry
    pub lexical_states: Vec<Ident>,
    pub kind: RegexKind,
    pub ignore_case: bool,
    pub specs: Vec<Spanned<RegexSpec>>,
}

/// One alternative of a regular expression production
#[derive(Debug, Clone, PartialEq)]
pub struct RegexSpec {
    pub regex: RegularExpression,
    pub has_action: bool,
    pub next_state: Option<Ident>,
}

/// A regular expression as it appears at the top level of a spec or as an expansion terminal.
///
/// - `"SELECT"` has no label and a literal body
/// - `<K_SELECT: "SELECT">` has a label and a literal body
/// - `<#DIGIT: ["0"-"9"]>` is a private label
/// - `<K_SELECT>` is an unlabeled reference
#[derive(Debug, Clone, PartialEq)]
pub struct RegularExpression {
    pub label: Option<Spanned<Ident>>,
    pub private: bool,
    pub body: RegexExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegexExpr {
    /// Unescaped literal text
    Literal(String),
    /// `<NAME>`
    Reference(Ident),
    /// `<EOF>`
    Eof,
    /// `[...]` or `~[...]`; items keep their raw text (`"a"`, `"0"-"9"`)
    CharList { negated: bool, items: Vec<String> },
    Sequence(Vec<RegexExpr>),
    Choice(Vec<RegexExpr>),
    Repeat { inner: Box<RegexExpr>, repetition: Repetition },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repetition {
    ZeroOrMore,
    OneOrMore,
    ZeroOrOne,
    Range { min: u32, max: Option<u32> },
}

impl RegexExpr {
    /// Return the literal text if this expression matches exactly one fixed string.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            RegexExpr::Literal(s) => Some(s),
            _ => None,
        }
    }

    /// Collect every `<NAME>` reference in this expression, in source order.
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            RegexExpr::Reference(name) => out.push(name),
            RegexExpr::Sequence(items) | RegexExpr::Choice(items) => {
                for item in items {
                    item.collect_references(out);
                }
            }
            RegexExpr::Repeat { inner, .. } => inner.collect_references(out),
            RegexExpr::Literal(_) | RegexExpr::Eof | RegexExpr::CharList { .. } => {}
        }
    }
}

// ============================================================================
// BNF and JAVACODE productions
// ============================================================================

/// `ResultType Name(params) [throws ...] : { decls } { expansion }`
#[derive(Debug, Clone, PartialEq)]
pub struct BnfProduction {
    /// Raw result type text including access modifiers (e.g. `public String`)
    pub result_type: String,
    pub name: Spanned<Ident>,
    pub expansion: Spanned<Expansion>,
    /// Index of the production's first token in the grammar token stream
    pub first_token: usize,
    /// Index of the closing `}` of the expansion body
    pub last_token: usize,
}

/// `JAVACODE ResultType Name(params) [throws ...] { java }`
#[derive(Debug, Clone, PartialEq)]
pub struct JavaCodeProduction {
    pub result_type: String,
    pub name: Spanned<Ident>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expansion {
    Choice(Vec<Spanned<Expansion>>),
    Sequence(Vec<Spanned<Expansion>>),
    /// `[ e ]` or `( e )?`
    Optional(Box<Spanned<Expansion>>),
    ZeroOrMore(Box<Spanned<Expansion>>),
    OneOrMore(Box<Spanned<Expansion>>),
    /// `LOOKAHEAD( [amount] [,] [expansion] [,] [{ semantic }] )`
    Lookahead {
        amount: Option<u32>,
        expansion: Option<Box<Spanned<Expansion>>>,
    },
    /// Java action block `{ ... }`
    Action,
    /// `try { e } catch (...) { ... } finally { ... }`
    Try {
        body: Box<Spanned<Expansion>>,
        catches: usize,
        has_finally: bool,
    },
    Terminal {
        lhs: Option<String>,
        regex: RegularExpression,
    },
    NonTerminal {
        lhs: Option<String>,
        name: Spanned<Ident>,
    },
    /// Empty sequence, e.g. `{}` as the whole body
    Empty,
}

impl Expansion {
    /// Visit every expansion node depth-first, parents before children.
    pub fn walk<'a>(this: &'a Spanned<Expansion>, f: &mut dyn FnMut(&'a Spanned<Expansion>)) {
        f(this);
        match &this.node {
            Expansion::Choice(items) | Expansion::Sequence(items) => {
                for item in items {
                    Expansion::walk(item, f);
                }
            }
            Expansion::Optional(inner) | Expansion::ZeroOrMore(inner) | Expansion::OneOrMore(inner) => {
                Expansion::walk(inner, f)
            }
            Expansion::Try { body, .. } => Expansion::walk(body, f),
            Expansion::Lookahead { expansion, .. } => {
                if let Some(e) = expansion {
                    Expansion::walk(e, f);
                }
            }
            Expansion::Action | Expansion::Terminal { .. } | Expansion::NonTerminal { .. } | Expansion::Empty => {}
        }
    }
}
