//! Character stream with row/column tracking

use std::str;

use crate::utils::Position;

/// Iterator over the characters of a source text and their positions
pub struct Chars<'a> {
    inner: str::Chars<'a>,
    row: usize,
    column: usize,
    tab_width: usize,
}

impl<'a> Chars<'a> {
    /// Create a character stream over `source`
    pub fn new(source: &'a str, tab_width: usize) -> Self {
        Self {
            inner: source.chars(),
            row: 0,
            column: 0,
            tab_width,
        }
    }
}

impl Iterator for Chars<'_> {
    type Item = (char, Position);

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.inner.next()?;
        let position = Position::new(self.row, self.column);

        match c {
            '\n' => {
                self.row += 1;
                self.column = 0;
            }
            '\t' => self.column += self.tab_width,
            _ => self.column += 1,
        }

        Some((c, position))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn positions(source: &str, tab_width: usize) -> Vec<(char, usize, usize)> {
        Chars::new(source, tab_width)
            .map(|(c, p)| (c, p.row, p.column))
            .collect()
    }

    #[test]
    fn test_rows_and_columns() {
        assert_eq!(
            positions("ab\nc", 8),
            vec![('a', 0, 0), ('b', 0, 1), ('\n', 0, 2), ('c', 1, 0)]
        );
    }

    #[test]
    fn test_tab_width() {
        assert_eq!(
            positions("\tx\t y", 4),
            vec![('\t', 0, 0), ('x', 0, 4), ('\t', 0, 5), (' ', 0, 9), ('y', 0, 10)]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(Chars::new("", 8).next().is_none());
    }

    #[test]
    fn test_multibyte_counts_one_column() {
        assert_eq!(positions("λx", 8), vec![('λ', 0, 0), ('x', 0, 1)]);
    }
}
