//! Tilwa
//!
//! Translates wisp-style, indentation-sensitive Lisp syntax into fully
//! parenthesized S-expressions. Every stage is a lazy iterator:
//! characters → tokens → open/atom/close events → text.

pub mod config;
pub mod feedback;
pub mod frontend;
pub mod utils;

pub use config::Config;
pub use frontend::grouping::{Event, Grouper};
pub use frontend::lexer::Lexer;
pub use frontend::render::{translate, Renderer};
pub use frontend::token::{Token, TokenKind};
pub use utils::{Error, Position, Result};

use frontend::chars::Chars;

/// Tokens of `source`
pub fn tokens<'a>(source: &'a str, config: &Config) -> Lexer<'a> {
    Lexer::new(Chars::new(source, config.tab_width.get()))
}

/// Structural events of `source`
pub fn events<'a>(source: &'a str, config: &Config) -> Grouper<Lexer<'a>> {
    Grouper::new(tokens(source, config))
}
