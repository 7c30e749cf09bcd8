//! Translation settings

use std::num::NonZeroUsize;

/// Tab width used when none is given
pub const DEFAULT_TAB_WIDTH: NonZeroUsize = match NonZeroUsize::new(8) {
    Some(width) => width,
    None => panic!("tab width must be non-zero"),
};

/// Settings shared by every stage of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of columns a tab character advances
    pub tab_width: NonZeroUsize,
}

impl Config {
    pub fn new(tab_width: NonZeroUsize) -> Self {
        Self { tab_width }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tab_width() {
        assert_eq!(Config::default().tab_width, DEFAULT_TAB_WIDTH);
        assert_eq!(DEFAULT_TAB_WIDTH.get(), 8);
    }
}
