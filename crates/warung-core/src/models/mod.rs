//! Data models shared by the parser and its callers.

pub mod config;
pub mod row;
pub mod scan;
