//! Rule-based receipt line parser.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::row::ParsedRow;

use super::rules::{dates::detect_date, derive_total, is_calendar_date, take_last_number};
use super::LineParser;

/// Result of parsing one scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Input lines, unchanged.
    pub lines: Vec<String>,
    /// Extracted rows in input order; a meta row, if any, comes last.
    pub parsed: Vec<ParsedRow>,
    /// First date found across all lines.
    pub detected_date: Option<String>,
    /// Number of lines that produced no row.
    pub discarded: usize,
    /// Extraction warnings.
    pub warnings: Vec<String>,
}

impl ScanResult {
    /// Rows that describe actual sales (everything except the meta row).
    pub fn sales(&self) -> impl Iterator<Item = &ParsedRow> {
        self.parsed.iter().filter(|r| !r.is_meta())
    }

    /// Sum of all known row totals.
    pub fn grand_total(&self) -> f64 {
        self.sales().filter_map(|r| r.total).sum()
    }
}

/// Lexical parser for lines shaped like `<item words> <qty> <price>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedParser;

impl RuleBasedParser {
    pub fn new() -> Self {
        Self
    }
}

impl LineParser for RuleBasedParser {
    fn parse_lines<S: AsRef<str>>(&self, lines: &[S]) -> ScanResult {
        let detected_date = detect_date(lines);
        let date = detected_date.as_deref();

        let mut parsed = lines.iter().enumerate().fold(Vec::new(), |mut rows, (index, line)| {
            match parse_line(line.as_ref(), date) {
                Some(row) => rows.push(row),
                None => debug!("Discarded line {}: {:?}", index, line.as_ref()),
            }
            rows
        });

        let discarded = lines.len() - parsed.len();
        let mut warnings = Vec::new();

        if parsed.is_empty() {
            match date {
                Some(d) => {
                    parsed.push(ParsedRow::meta(d));
                    warnings.push("Only a date could be extracted".to_string());
                }
                None => warnings.push("No usable rows extracted".to_string()),
            }
        }

        if let Some(d) = date {
            if !is_calendar_date(d) {
                warnings.push(format!("Detected date {} is not a valid calendar date", d));
            }
        }

        if discarded > 0 {
            warnings.push(format!("{} of {} lines produced no row", discarded, lines.len()));
        }

        info!(
            "Parsed {} rows from {} lines (date: {})",
            parsed.len(),
            lines.len(),
            date.unwrap_or("none")
        );

        ScanResult {
            lines: lines.iter().map(|l| l.as_ref().to_string()).collect(),
            parsed,
            detected_date,
            discarded,
            warnings,
        }
    }
}

/// Parse a single line into a sales row.
///
/// The rightmost number is the price and the next rightmost the quantity.
/// A lone number is always the price. Lines without numbers, or whose
/// remaining words are empty, yield nothing.
pub fn parse_line(line: &str, date: Option<&str>) -> Option<ParsedRow> {
    let mut tokens: Vec<&str> = line
        .split(is_separator)
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return None;
    }

    let price = take_last_number(&mut tokens);
    let qty = take_last_number(&mut tokens);

    if price.is_none() && qty.is_none() {
        return None;
    }

    let item = tokens.join(" ");
    let item = item.trim();
    if item.is_empty() {
        return None;
    }

    let total = derive_total(qty, price);

    Some(ParsedRow::sale(date, item, qty, price, total))
}

// Unicode whitespace plus the zero-width no-break space (U+FEFF).
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Parse lines with the rule-based parser and return only the rows.
pub fn parse_lines_rule_based<S: AsRef<str>>(lines: &[S]) -> Vec<ParsedRow> {
    RuleBasedParser::new().parse_lines(lines).parsed
}
