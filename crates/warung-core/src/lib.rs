//! Core library for receipt OCR line parsing.
//!
//! This crate provides:
//! - Rule-based date detection across OCR lines
//! - Quantity and price extraction from single receipt lines
//! - Row assembly with a date-only fallback row
//! - Loading of OCR line files and CLI configuration models

pub mod error;
pub mod models;
pub mod receipt;

pub use error::{InputError, Result, WarungError};
pub use models::config::WarungConfig;
pub use models::row::{ParsedRow, RowSource, RowType};
pub use models::scan::{InputFormat, ScanInput};
pub use receipt::{parse_lines_rule_based, LineParser, RuleBasedParser, ScanResult};
