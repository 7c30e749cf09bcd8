//! Lexer for Tilwa
//!
//! Splits the character stream into lexemes. Every character of the input ends
//! up in exactly one token, so concatenating token texts gives the input back.

use std::iter::Peekable;

use crate::frontend::chars::Chars;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Position, Result};

/// Characters that end a symbol and start the next token
fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '(' | '[' | '{' | '}' | ']' | ')' | ';')
}

/// The lexer state
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Set once an error has been returned
    failed: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer over a character stream
    pub fn new(chars: Chars<'a>) -> Self {
        Self {
            chars: chars.peekable(),
            failed: false,
        }
    }

    /// Append characters to `text` while `pred` holds for the next one
    fn take_while(&mut self, text: &mut String, pred: impl Fn(char) -> bool) {
        while let Some((c, _)) = self.chars.next_if(|&(c, _)| pred(c)) {
            text.push(c);
        }
    }

    /// Read the rest of a string literal; the opening quote is already in `text`
    fn read_string(&mut self, text: &mut String, start: Position) -> Result<()> {
        loop {
            match self.chars.next() {
                Some(('\\', _)) => {
                    text.push('\\');
                    // The escaped character is taken as is, even a quote
                    let (c, _) = self
                        .chars
                        .next()
                        .ok_or(Error::NonTerminatedString { position: start })?;
                    text.push(c);
                }
                Some(('"', _)) => {
                    text.push('"');
                    return Ok(());
                }
                Some((c, _)) => text.push(c),
                None => return Err(Error::NonTerminatedString { position: start }),
            }
        }
    }

    /// Get the next token, `None` at end of input
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        let Some((c, start)) = self.chars.next() else {
            return Ok(None);
        };
        let mut text = String::from(c);

        let kind = match c {
            ';' => {
                self.take_while(&mut text, |c| c != '\n');
                TokenKind::Comment
            }
            '\n' => TokenKind::Newline,
            '(' => TokenKind::OpenParen,
            '[' => TokenKind::OpenBracket,
            '{' => TokenKind::OpenBrace,
            ')' => TokenKind::CloseParen,
            ']' => TokenKind::CloseBracket,
            '}' => TokenKind::CloseBrace,
            ' ' | '\t' => {
                self.take_while(&mut text, |c| c == ' ' || c == '\t');
                TokenKind::Whitespace
            }
            '"' => {
                self.read_string(&mut text, start)?;
                TokenKind::String
            }
            _ => {
                self.take_while(&mut text, |c| !is_delimiter(c));
                TokenKind::Symbol
            }
        };

        let token = Token::new(kind, text, start);
        log::trace!("lexed {}", token);
        Ok(Some(token))
    }

    /// Tokenize the entire source and return all tokens
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        self.collect()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
