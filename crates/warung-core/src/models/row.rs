//! Structured transaction rows produced from receipt lines.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Item name used for the date-only placeholder row.
pub const META_ITEM: &str = "Tanggal";

/// Unit assigned to every sales row.
pub const DEFAULT_UNIT: &str = "pcs";

/// A single transaction row extracted from one receipt line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRow {
    /// Detected receipt date as `YYYY-MM-DD`, or empty when none was found.
    pub date: String,

    /// Item description, never empty.
    pub item: String,

    /// Quantity (1 when the line carried no quantity).
    pub qty: f64,

    /// Unit of measure ("pcs" for sales rows, empty for meta rows).
    pub unit: String,

    /// Unit price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Line total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,

    /// Row kind.
    #[serde(rename = "type")]
    pub row_type: RowType,

    /// Which extraction path produced the row.
    pub source: RowSource,
}

/// Kind of a parsed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowType {
    /// Normal sales line (penjualan).
    Penjualan,
    /// Date-only placeholder emitted when no sales line was readable.
    Meta,
}

impl RowType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Penjualan => "penjualan",
            Self::Meta => "meta",
        }
    }
}

/// Origin tag distinguishing rule-engine rows from other extraction paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowSource {
    /// Lexical rule engine.
    #[default]
    Rule,
}

impl RowSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rule => "rule",
        }
    }
}

impl ParsedRow {
    /// Build a sales row. `qty` defaults to 1 when absent.
    pub fn sale(
        date: Option<&str>,
        item: impl Into<String>,
        qty: Option<f64>,
        price: Option<f64>,
        total: Option<f64>,
    ) -> Self {
        Self {
            date: date.unwrap_or_default().to_string(),
            item: item.into(),
            qty: qty.unwrap_or(1.0),
            unit: DEFAULT_UNIT.to_string(),
            price,
            total,
            row_type: RowType::Penjualan,
            source: RowSource::Rule,
        }
    }

    /// Build the date-only placeholder row.
    pub fn meta(date: &str) -> Self {
        Self {
            date: date.to_string(),
            item: META_ITEM.to_string(),
            qty: 1.0,
            unit: String::new(),
            price: None,
            total: None,
            row_type: RowType::Meta,
            source: RowSource::Rule,
        }
    }

    /// Check if this is a date-only placeholder row.
    pub fn is_meta(&self) -> bool {
        self.row_type == RowType::Meta
    }

    /// Interpret `date` as a calendar day.
    ///
    /// Returns `None` for an empty date or one that names no real day
    /// (e.g. `2024-13-45`, which the lexical date rules can still produce).
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}
