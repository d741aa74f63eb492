//! Receipt line parsing.

mod parser;
pub mod rules;

pub use parser::{parse_line, parse_lines_rule_based, RuleBasedParser, ScanResult};

/// Trait for turning ordered OCR lines into transaction rows.
///
/// Implementations are total: unreadable lines contribute no rows
/// instead of producing an error.
pub trait LineParser {
    /// Parse one scan's lines.
    fn parse_lines<S: AsRef<str>>(&self, lines: &[S]) -> ScanResult;
}
