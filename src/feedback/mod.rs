//! Structured Feedback Module
//!
//! Machine-readable output for editors and scripts:
//! - JSON error reports with fix suggestions
//! - Translation statistics

use serde::{Deserialize, Serialize};

use crate::frontend::grouping::Event;
use crate::utils::Error;

// ==================== Structured Error Report ====================

/// A structured error report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error code (e.g., "E0001")
    pub code: String,

    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    pub location: Option<Location>,

    /// Suggested fixes
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    /// Zero based, like every position in the pipeline
    pub row: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Description of the fix
    pub message: String,

    /// Text to insert, if the fix is mechanical
    pub replacement: Option<String>,

    /// Confidence in this suggestion (0.0 - 1.0)
    pub confidence: f64,
}

impl ErrorReport {
    /// Create an error report from a translation error
    pub fn from_error(error: &Error, file_name: &str) -> Self {
        let (code, suggestions) = match error {
            Error::UnmatchedParens { .. } => (
                "E0001",
                vec![
                    Suggestion {
                        message: "Close the innermost open bracket with the same kind of bracket"
                            .to_string(),
                        replacement: None,
                        confidence: 0.8,
                    },
                    Suggestion {
                        message: "Remove the mismatched closer".to_string(),
                        replacement: None,
                        confidence: 0.4,
                    },
                ],
            ),
            Error::NonTerminatedString { .. } => (
                "E0002",
                vec![Suggestion {
                    message: "Add the closing quote".to_string(),
                    replacement: Some("\"".to_string()),
                    confidence: 0.9,
                }],
            ),
            Error::Io(_) => ("E0003", vec![]),
        };

        let location = error.position().map(|p| Location {
            file: file_name.to_string(),
            row: p.row,
            column: p.column,
        });

        Self {
            code: code.to_string(),
            severity: Severity::Error,
            message: error.to_string(),
            location,
            suggestions,
        }
    }

    /// Output as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// ==================== Translation Feedback ====================

/// Summary of one translation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationFeedback {
    pub success: bool,

    pub source_file: String,

    /// All errors
    pub diagnostics: Vec<ErrorReport>,

    pub stats: TranslationStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationStats {
    /// Synthesized groups
    pub groups: usize,

    /// Tokens passed through
    pub atoms: usize,

    /// Lines of input
    pub lines: usize,
}

impl TranslationStats {
    /// Account for one event
    pub fn record(&mut self, event: &Event) {
        match event {
            Event::Open => self.groups += 1,
            Event::Atom(token) => {
                self.atoms += 1;
                self.lines += token.text.matches('\n').count();
            }
            Event::Close => {}
        }
    }
}

impl TranslationFeedback {
    /// Create a successful feedback
    pub fn success(source_file: String, stats: TranslationStats) -> Self {
        Self {
            success: true,
            source_file,
            diagnostics: vec![],
            stats,
        }
    }

    /// Create a failed feedback
    pub fn failure(source_file: String, errors: Vec<ErrorReport>, stats: TranslationStats) -> Self {
        Self {
            success: false,
            source_file,
            diagnostics: errors,
            stats,
        }
    }

    /// Output as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::utils::Position;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_from_unmatched_parens() {
        let error = Error::UnmatchedParens { position: Position::new(2, 7) };
        let report = ErrorReport::from_error(&error, "main.w");

        assert_eq!(report.code, "E0001");
        assert_eq!(report.severity, Severity::Error);
        assert_eq!(report.message, "Unmatched parenthesis at 2:7");
        assert_eq!(
            report.location,
            Some(Location { file: "main.w".to_string(), row: 2, column: 7 })
        );
        assert_eq!(report.suggestions.len(), 2);
    }

    #[test]
    fn test_report_json() {
        let error = Error::NonTerminatedString { position: Position::new(0, 3) };
        let json = ErrorReport::from_error(&error, "<stdin>").to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["code"], "E0002");
        assert_eq!(value["severity"], "Error");
        assert_eq!(value["location"]["column"], 3);
        assert_eq!(value["suggestions"][0]["replacement"], "\"");
    }

    #[test]
    fn test_io_report_has_no_location() {
        let report = ErrorReport::from_error(&Error::Io("closed".into()), "out");
        assert_eq!(report.code, "E0003");
        assert_eq!(report.location, None);
    }

    #[test]
    fn test_stats() {
        let mut stats = TranslationStats::default();
        for event in crate::events("a\n  b c\n", &Config::default()) {
            stats.record(&event.unwrap());
        }
        assert_eq!(stats, TranslationStats { groups: 2, atoms: 7, lines: 2 });
    }

    #[test]
    fn test_feedback_round_trips() {
        let feedback = TranslationFeedback::success("x.w".to_string(), TranslationStats::default());
        let parsed: TranslationFeedback = serde_json::from_str(&feedback.to_json()).unwrap();
        assert_eq!(parsed, feedback);
    }
}
