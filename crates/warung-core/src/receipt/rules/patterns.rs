//! Fixed regex patterns for receipt line parsing.

use lazy_static::lazy_static;
use regex::Regex;

// Word boundaries are ASCII-only, so accented letters next to a date do
// not block a match.
lazy_static! {
    // Day/month/year: 12/08/2024, 7-11-24
    pub static ref DATE_DMY: Regex = Regex::new(
        r"(?-u:\b)([0-9]{1,2})[/\-]([0-9]{1,2})[/\-]([0-9]{4}|[0-9]{2})(?-u:\b)"
    ).unwrap();

    // Year/month/day: 2024-05-01, 2024/5/1
    pub static ref DATE_YMD: Regex = Regex::new(
        r"(?-u:\b)([0-9]{4})[/\-]([0-9]{1,2})[/\-]([0-9]{1,2})(?-u:\b)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dmy_requires_separator() {
        assert!(DATE_DMY.is_match("12/08/2024"));
        assert!(DATE_DMY.is_match("1-8-24"));
        assert!(!DATE_DMY.is_match("12 05 2024"));
        assert!(!DATE_DMY.is_match("12.05.2024"));
    }

    #[test]
    fn test_dmy_year_is_two_or_four_digits() {
        assert!(!DATE_DMY.is_match("12/08/202"));
        assert!(!DATE_DMY.is_match("12/08/20245"));
    }

    #[test]
    fn test_dmy_does_not_match_inside_ymd() {
        assert!(!DATE_DMY.is_match("2024-05-01"));
        assert!(DATE_YMD.is_match("2024-05-01"));
        assert!(DATE_YMD.is_match("Tgl 2024/5/1 10:32"));
    }

    #[test]
    fn test_boundaries_ignore_non_ascii_letters() {
        assert!(DATE_DMY.is_match("Tgl:é12/08/2024"));
        assert!(DATE_DMY.is_match("12/08/2024é"));
        assert!(DATE_YMD.is_match("Tanggal:ü2024-05-01"));
        assert!(!DATE_DMY.is_match("a12/08/2024"));
    }
}
