//! Receipt date detection.
//!
//! Dates are recognised lexically: a line counts only if it holds an
//! explicit `/` or `-` separated triple. Day/month/year is tried before
//! year/month/day on every line, and the first matching line wins.

use chrono::NaiveDate;
use tracing::debug;

use super::patterns::{DATE_DMY, DATE_YMD};
use super::{ExtractionMatch, FieldExtractor};

/// Date field extractor producing ISO `YYYY-MM-DD` strings.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        // DD/MM/YYYY, DD-MM-YY
        for caps in DATE_DMY.captures_iter(text) {
            let iso = normalize_dmy(&caps[1], &caps[2], &caps[3]);
            if let Some(m) = caps.get(0) {
                results.push(
                    ExtractionMatch::new(iso, m.as_str()).with_position(m.start(), m.end()),
                );
            }
        }

        // YYYY-MM-DD, YYYY/MM/DD
        for caps in DATE_YMD.captures_iter(text) {
            let iso = normalize_ymd(&caps[1], &caps[2], &caps[3]);
            if results.iter().any(|r| r.value == iso) {
                continue;
            }
            if let Some(m) = caps.get(0) {
                results.push(
                    ExtractionMatch::new(iso, m.as_str()).with_position(m.start(), m.end()),
                );
            }
        }

        results
    }
}

/// Find the first receipt date across lines, in input order.
pub fn detect_date<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    let extractor = DateExtractor::new();

    lines.iter().enumerate().find_map(|(index, line)| {
        extractor.extract(line.as_ref()).map(|m| {
            debug!("Detected date {} from {:?} on line {}", m.value, m.source, index);
            m.value
        })
    })
}

/// Format a day/month/year match. Two-digit years land in the 2000s.
pub fn normalize_dmy(day: &str, month: &str, year: &str) -> String {
    let year = if year.len() == 2 {
        format!("20{}", year)
    } else {
        year.to_string()
    };
    format!("{}-{:0>2}-{:0>2}", year, month, day)
}

/// Format a year/month/day match.
pub fn normalize_ymd(year: &str, month: &str, day: &str) -> String {
    format!("{}-{:0>2}-{:0>2}", year, month, day)
}

/// Check whether an ISO string names a real calendar day.
pub fn is_calendar_date(iso: &str) -> bool {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d").is_ok()
}
