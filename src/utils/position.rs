//! Source location tracking

use std::fmt;

/// A position in the source text, zero based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Line number
    pub row: usize,
    /// Column, with tabs expanded to the configured width
    pub column: usize,
}

impl Position {
    /// Create a new position
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Formats as `row:column`, e.g. `1:5`
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Position::new(1, 5).to_string(), "1:5");
        assert_eq!(Position::default().to_string(), "0:0");
    }
}
