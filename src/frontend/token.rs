//! Token definitions for Tilwa

use std::fmt;

use crate::utils::Position;

/// Symbols that, when leading a block, quote the rest of it
pub const QUOTE_PREFIXES: [&str; 8] = ["'", "`", ",", ",@", "#'", "#,", "#`", "#,@"];

/// A lexeme produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal source text
    pub text: String,
    /// Position of the first character
    pub start: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, start: Position) -> Self {
        Self { kind, text: text.into(), start }
    }

    /// Column of the first character
    pub fn column(&self) -> usize {
        self.start.column
    }

    /// Classify a symbol by its text; `None` for every other kind
    pub fn symbol_class(&self) -> Option<SymbolClass> {
        match self.kind {
            TokenKind::Symbol => Some(SymbolClass::of(&self.text)),
            _ => None,
        }
    }
}

/// Formats as e.g. `Symbol<let>@1:2`
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if self.kind == TokenKind::Newline { "[NL]" } else { self.text.as_str() };
        write!(f, "{:?}<{}>@{}", self.kind, text, self.start)
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Run of spaces and tabs
    Whitespace,
    /// \n
    Newline,
    /// (
    OpenParen,
    /// [
    OpenBracket,
    /// {
    OpenBrace,
    /// )
    CloseParen,
    /// ]
    CloseBracket,
    /// }
    CloseBrace,
    /// Anything else that is not whitespace
    Symbol,
    /// ; up to the end of the line
    Comment,
    /// Double quoted, escapes kept verbatim
    String,
}

impl TokenKind {
    pub fn is_opener(self) -> bool {
        matches!(self, Self::OpenParen | Self::OpenBracket | Self::OpenBrace)
    }

    pub fn is_closer(self) -> bool {
        matches!(self, Self::CloseParen | Self::CloseBracket | Self::CloseBrace)
    }

    /// Whether this closer ends a group started by `opener`
    pub fn closes(self, opener: TokenKind) -> bool {
        matches!(
            (opener, self),
            (Self::OpenParen, Self::CloseParen)
                | (Self::OpenBracket, Self::CloseBracket)
                | (Self::OpenBrace, Self::CloseBrace)
        )
    }

    /// Tokens that carry no content for the indentation rules
    pub fn is_blank(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment | Self::Newline)
    }
}

/// How the grouping rules read a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    /// One or more `:` only, with the count
    Colon(usize),
    /// A lone `.`
    Dot,
    /// One of [`QUOTE_PREFIXES`]
    QuotePrefix,
    Plain,
}

impl SymbolClass {
    pub fn of(text: &str) -> Self {
        if !text.is_empty() && text.chars().all(|c| c == ':') {
            Self::Colon(text.len())
        } else if text == "." {
            Self::Dot
        } else if QUOTE_PREFIXES.contains(&text) {
            Self::QuotePrefix
        } else {
            Self::Plain
        }
    }
}
