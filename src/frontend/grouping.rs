//! Grouping transducer
//!
//! Turns the token stream into open / atom / close events, adding the
//! parentheses implied by indentation, leading dots, quote prefixes and colons.
//!
//! The state machine advances one token per step and queues the events that
//! step produced. Whitespace, comments and newlines are held back in a buffer
//! until the next content token decides where closing parentheses go: closers
//! land before the buffered line break, openers after it.

use std::collections::VecDeque;
use std::fmt;
use std::mem;

use crate::frontend::token::{SymbolClass, Token, TokenKind};
use crate::utils::{Error, Position, Result};

/// A structural event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Start of a synthesized group
    Open,
    /// A token passed through unchanged
    Atom(Token),
    /// End of a synthesized group
    Close,
}

impl Event {
    /// Text this event renders to
    pub fn text(&self) -> &str {
        match self {
            Self::Open => "(",
            Self::Close => ")",
            Self::Atom(token) => &token.text,
        }
    }
}

/// What opened an indentation level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentKind {
    /// Indented block, closed with `)`
    Plain,
    /// Line led by `.`, no parentheses of its own
    SuppressedByDot,
    /// Line led by an explicit bracket, no parentheses of its own
    SuppressedByParens,
    /// Line led by a quote prefix, closed with `)`
    QuotePrefix,
    /// Colon at the end of a line whose group is decided by the next line
    PendingColon,
}

/// An entry of the indentation stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent {
    pub kind: IndentKind,
    pub column: usize,
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{:?} c{}}}", self.kind, self.column)
    }
}

/// Where the state machine is
enum Phase {
    /// Nothing read yet
    Start,
    /// `lex` holds the first content token of a line
    LineStart,
    /// Inside a line
    Body,
    /// Inside an explicit bracket group; holds the open brackets, innermost last
    Group(Vec<(TokenKind, Position)>),
    /// Input exhausted, everything left must be closed
    Closing,
    Done,
}

/// The grouping transducer, an iterator of events over a token iterator
pub struct Grouper<I> {
    tokens: I,
    /// Lookahead token, `None` at end of input
    lex: Option<Token>,
    indents: Vec<Indent>,
    /// Whitespace, comments and newlines not yet emitted
    buffer: Vec<Token>,
    /// Events produced but not yet handed out
    queue: VecDeque<Event>,
    phase: Phase,
}

impl<I> Grouper<I>
where
    I: Iterator<Item = Result<Token>>,
{
    pub fn new(tokens: I) -> Self {
        Self {
            tokens,
            lex: None,
            indents: Vec::new(),
            buffer: Vec::new(),
            queue: VecDeque::new(),
            phase: Phase::Start,
        }
    }

    // ==================== Helper Methods ====================

    /// Move the lookahead to the next token
    fn advance(&mut self) -> Result<()> {
        self.lex = self.tokens.next().transpose()?;
        Ok(())
    }

    /// Drop the lookahead if it is whitespace
    fn skip_whitespace(&mut self) -> Result<()> {
        if matches!(&self.lex, Some(t) if t.kind == TokenKind::Whitespace) {
            self.advance()?;
        }
        Ok(())
    }

    /// Buffer tokens while `keep` holds for their kind
    fn buffer_while(&mut self, keep: impl Fn(TokenKind) -> bool) -> Result<()> {
        while let Some(token) = self.lex.take() {
            if !keep(token.kind) {
                self.lex = Some(token);
                break;
            }
            self.buffer.push(token);
            self.advance()?;
        }
        Ok(())
    }

    fn emit(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    fn flush(&mut self) {
        self.queue.extend(self.buffer.drain(..).map(Event::Atom));
    }

    fn push(&mut self, kind: IndentKind, column: usize) {
        let indent = Indent { kind, column };
        log::debug!("push {} onto {} levels", indent, self.indents.len());
        self.indents.push(indent);
    }

    /// Open a plain group at `column`
    fn open(&mut self, column: usize) {
        self.emit(Event::Open);
        self.push(IndentKind::Plain, column);
    }

    /// Phase after a line break: the next line, or the end
    fn next_line(&self) -> Phase {
        if self.lex.is_some() {
            Phase::LineStart
        } else {
            Phase::Closing
        }
    }

    // ==================== Indentation ====================

    /// Close every level at or deeper than `column`
    fn close(&mut self, column: usize) {
        // Trailing colons nothing was indented under become nested empty groups
        let pending = self
            .indents
            .iter()
            .rev()
            .take_while(|i| i.kind == IndentKind::PendingColon && i.column >= column)
            .count();
        self.indents.truncate(self.indents.len() - pending);
        for _ in 0..pending {
            self.emit(Event::Open);
        }
        for _ in 0..pending {
            self.emit(Event::Close);
        }

        while let Some(&indent) = self.indents.last() {
            if indent.column < column {
                break;
            }
            self.indents.pop();
            log::debug!("pop {}", indent);

            match indent.kind {
                IndentKind::Plain | IndentKind::QuotePrefix => self.emit(Event::Close),
                IndentKind::PendingColon => {
                    self.emit(Event::Open);
                    self.emit(Event::Close);
                }
                IndentKind::SuppressedByDot | IndentKind::SuppressedByParens => {}
            }
        }
    }

    /// Open the block started by the line whose first token is in `lex`
    fn open_block(&mut self) -> Result<()> {
        // Colons still pending are resolved by this deeper line: the deepest is
        // replaced by the block itself, the others open now
        let first_pending = self
            .indents
            .iter()
            .rposition(|i| i.kind != IndentKind::PendingColon)
            .map_or(0, |p| p + 1);
        let pending = self.indents.split_off(first_pending);
        if let Some((_, outer)) = pending.split_last() {
            for indent in outer {
                self.open(indent.column);
            }
        }

        let Some(token) = self.lex.take() else {
            return Ok(());
        };
        let leading_column = token.column();

        let kind = if token.kind.is_opener() {
            self.lex = Some(token);
            IndentKind::SuppressedByParens
        } else {
            match token.symbol_class() {
                Some(SymbolClass::Dot) => {
                    self.advance()?;
                    self.skip_whitespace()?;
                    IndentKind::SuppressedByDot
                }
                Some(SymbolClass::QuotePrefix) => {
                    self.emit(Event::Atom(token));
                    self.emit(Event::Open);
                    self.advance()?;
                    self.skip_whitespace()?;
                    IndentKind::QuotePrefix
                }
                _ => {
                    self.lex = Some(token);
                    self.emit(Event::Open);
                    IndentKind::Plain
                }
            }
        };

        let column = self.lex.as_ref().map_or(leading_column, Token::column);
        self.push(kind, column);
        Ok(())
    }

    // ==================== Line Body ====================

    /// Handle one token of a line
    fn scan(&mut self) -> Result<Phase> {
        let Some(token) = self.lex.take() else {
            return Ok(Phase::Closing);
        };

        match token.kind {
            TokenKind::Whitespace | TokenKind::Comment => {
                self.buffer.push(token);
                self.advance()?;
                Ok(Phase::Body)
            }
            TokenKind::Newline => {
                self.buffer.push(token);
                self.advance()?;
                self.buffer_while(TokenKind::is_blank)?;
                Ok(self.next_line())
            }
            kind if kind.is_opener() => {
                self.flush();
                let opener = (kind, token.start);
                self.emit(Event::Atom(token));
                self.advance()?;
                Ok(Phase::Group(vec![opener]))
            }
            _ => match token.symbol_class() {
                Some(SymbolClass::Colon(count)) => self.colon(token.column(), count),
                _ => {
                    self.flush();
                    self.emit(Event::Atom(token));
                    self.advance()?;
                    Ok(Phase::Body)
                }
            },
        }
    }

    /// Apply the colon rule for `count` colons at `column`; the colon itself
    /// has been taken out of `lex`
    fn colon(&mut self, column: usize, count: usize) -> Result<Phase> {
        self.flush();
        self.advance()?;
        self.skip_whitespace()?;
        self.buffer_while(|kind| matches!(kind, TokenKind::Whitespace | TokenKind::Comment))?;

        let inline = matches!(&self.lex, Some(t) if t.kind != TokenKind::Newline);
        for offset in 0..count {
            if inline {
                self.open(column + offset);
            } else {
                self.push(IndentKind::PendingColon, column + offset);
            }
        }
        Ok(Phase::Body)
    }

    /// Pass one token of an explicit bracket group through
    fn pass_through(&mut self, mut open: Vec<(TokenKind, Position)>) -> Result<Phase> {
        let Some(token) = self.lex.take() else {
            let position = open.last().map(|&(_, p)| p).unwrap_or_default();
            return Err(Error::UnmatchedParens { position });
        };

        if token.kind.is_opener() {
            open.push((token.kind, token.start));
        } else if token.kind.is_closer() {
            match open.last() {
                Some(&(opener, _)) if token.kind.closes(opener) => {
                    open.pop();
                }
                _ => return Err(Error::UnmatchedParens { position: token.start }),
            }
        }

        self.emit(Event::Atom(token));
        self.advance()?;

        if open.is_empty() {
            Ok(Phase::Body)
        } else {
            Ok(Phase::Group(open))
        }
    }

    /// Run one step of the state machine
    fn step(&mut self, phase: Phase) -> Result<Phase> {
        match phase {
            Phase::Start => {
                self.advance()?;
                self.buffer_while(TokenKind::is_blank)?;
                Ok(self.next_line())
            }
            Phase::LineStart => {
                let column = self.lex.as_ref().map_or(0, Token::column);
                self.close(column);
                self.flush();
                self.open_block()?;
                Ok(Phase::Body)
            }
            Phase::Body => self.scan(),
            Phase::Group(open) => self.pass_through(open),
            Phase::Closing => {
                self.close(0);
                self.flush();
                Ok(Phase::Done)
            }
            Phase::Done => Ok(Phase::Done),
        }
    }
}

impl<I> Iterator for Grouper<I>
where
    I: Iterator<Item = Result<Token>>,
{
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Some(Ok(event));
            }
            if matches!(self.phase, Phase::Done) {
                return None;
            }

            let phase = mem::replace(&mut self.phase, Phase::Done);
            match self.step(phase) {
                Ok(next) => self.phase = next,
                Err(err) => {
                    self.queue.clear();
                    return Some(Err(err));
                }
            }
        }
    }
}
