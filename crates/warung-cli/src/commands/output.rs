//! Row rendering shared by `parse` and `batch`.

use clap::ValueEnum;
use warung_core::{ParsedRow, WarungConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON array of rows
    Json,
    /// CSV with a header row
    Csv,
    /// One line per row
    Text,
}

impl OutputFormat {
    /// Use the flag if given, otherwise the configured default.
    pub fn resolve(flag: Option<Self>, config: &WarungConfig) -> anyhow::Result<Self> {
        match flag {
            Some(format) => Ok(format),
            None => Self::from_str(&config.output.format, true)
                .map_err(|e| anyhow::anyhow!("Invalid output format in config: {}", e)),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub fn format_rows(
    rows: &[ParsedRow],
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Json => Ok(serde_json::to_string(rows)?),
        OutputFormat::Csv => format_csv(rows),
        OutputFormat::Text => Ok(format_text(rows)),
    }
}

fn format_csv(rows: &[ParsedRow]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["date", "item", "qty", "unit", "price", "total", "type", "source"])?;

    for row in rows {
        let qty = row.qty.to_string();
        let price = format_amount(row.price);
        let total = format_amount(row.total);

        wtr.write_record([
            row.date.as_str(),
            row.item.as_str(),
            qty.as_str(),
            row.unit.as_str(),
            price.as_str(),
            total.as_str(),
            row.row_type.as_str(),
            row.source.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(rows: &[ParsedRow]) -> String {
    let mut output = String::new();

    for row in rows {
        output.push_str(&format!(
            "{} | {} | qty {} {} | price {} | total {} | {}\n",
            row.date,
            row.item,
            row.qty,
            row.unit,
            format_amount(row.price),
            format_amount(row.total),
            row.row_type.as_str()
        ));
    }

    output
}

fn format_amount(amount: Option<f64>) -> String {
    amount.map(|a| a.to_string()).unwrap_or_default()
}
