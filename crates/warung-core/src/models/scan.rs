//! OCR line input as handed over by the recognition backend.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{InputError, Result};

/// Ordered OCR lines for one scanned receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanInput {
    /// Recognized lines, in reading order.
    pub lines: Vec<String>,
}

/// On-disk representation of OCR lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// One OCR line per text line.
    Text,
    /// A JSON array of strings, or an object with a `lines` array.
    Json,
}

impl InputFormat {
    /// Pick a format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" | "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Guess the format from content when the extension is unknown.
    pub fn sniff(content: &str) -> Self {
        match strip_bom(content).trim_start().chars().next() {
            Some('[') | Some('{') => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonLines {
    Bare(Vec<String>),
    Wrapped { lines: Vec<String> },
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

impl ScanInput {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Split plain text into lines, keeping blank lines and their order.
    pub fn from_text(text: &str) -> Self {
        Self::new(strip_bom(text).lines().map(str::to_string).collect())
    }

    /// Parse the JSON shapes the OCR backend produces.
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: JsonLines = serde_json::from_str(strip_bom(json)).map_err(|e| {
            InputError::Malformed(format!(
                "expected an array of strings or an object with `lines`: {}",
                e
            ))
        })?;

        Ok(match parsed {
            JsonLines::Bare(lines) => Self::new(lines),
            JsonLines::Wrapped { lines } => Self::new(lines),
        })
    }

    /// Parse content in the given format.
    pub fn parse(content: &str, format: InputFormat) -> Result<Self> {
        match format {
            InputFormat::Text => Ok(Self::from_text(content)),
            InputFormat::Json => Self::from_json(content),
        }
    }

    /// Load OCR lines from a file.
    ///
    /// The format follows the extension; files without one are sniffed
    /// by their first non-blank character.
    pub fn from_file(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str());
        let known = ext.and_then(InputFormat::from_extension);
        if let (Some(ext), None) = (ext, known) {
            return Err(InputError::UnsupportedFormat(ext.to_string()).into());
        }

        let bytes = std::fs::read(path)?;
        let content = String::from_utf8(bytes).map_err(|_| InputError::NotUtf8)?;
        let format = known.unwrap_or_else(|| InputFormat::sniff(&content));

        debug!("Loading {} as {:?}", path.display(), format);

        Self::parse(&content, format)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WarungError;

    #[test]
    fn test_from_text_keeps_order_and_blanks() {
        let input = ScanInput::from_text("12/08/2024\r\n\nIndomie Goreng 2 4500\n");

        assert_eq!(input.lines, vec!["12/08/2024", "", "Indomie Goreng 2 4500"]);
    }

    #[test]
    fn test_from_json_shapes() {
        let bare = ScanInput::from_json(r#"["Kopi 15000", "Gula 3 12000"]"#).unwrap();
        assert_eq!(bare.lines.len(), 2);

        let wrapped =
            ScanInput::from_json(r#"{"lines": ["Kopi 15000"], "used_llm": false}"#).unwrap();
        assert_eq!(wrapped.lines, vec!["Kopi 15000"]);
    }

    #[test]
    fn test_leading_byte_order_mark_is_dropped() {
        let text = ScanInput::from_text("\u{feff}Indomie Goreng 2 4500\nKopi 15000");
        assert_eq!(text.lines, vec!["Indomie Goreng 2 4500", "Kopi 15000"]);

        let json = ScanInput::from_json("\u{feff}[\"Kopi 15000\"]").unwrap();
        assert_eq!(json.lines, vec!["Kopi 15000"]);
    }

    #[test]
    fn test_from_json_malformed() {
        let err = ScanInput::from_json(r#"{"text": "Kopi"}"#).unwrap_err();
        assert!(matches!(err, WarungError::Input(InputError::Malformed(_))));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(InputFormat::from_extension("TXT"), Some(InputFormat::Text));
        assert_eq!(InputFormat::from_extension("json"), Some(InputFormat::Json));
        assert_eq!(InputFormat::from_extension("pdf"), None);

        assert_eq!(InputFormat::sniff("  [\"a\"]"), InputFormat::Json);
        assert_eq!(InputFormat::sniff("Kopi 15000"), InputFormat::Text);
        assert_eq!(InputFormat::sniff("\u{feff}{\"lines\": []}"), InputFormat::Json);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan");
        std::fs::write(&path, r#"{"lines": ["07-11-24", "Gula 3 12000"]}"#).unwrap();

        let input = ScanInput::from_file(&path).unwrap();
        assert_eq!(input.lines, vec!["07-11-24", "Gula 3 12000"]);

        let image = dir.path().join("receipt.jpg");
        std::fs::write(&image, [0xffu8, 0xd8]).unwrap();
        let err = ScanInput::from_file(&image).unwrap_err();
        assert!(matches!(err, WarungError::Input(InputError::UnsupportedFormat(_))));

        let binary = dir.path().join("garbage.txt");
        std::fs::write(&binary, [0xffu8, 0xfe, 0x00]).unwrap();
        let err = ScanInput::from_file(&binary).unwrap_err();
        assert!(matches!(err, WarungError::Input(InputError::NotUtf8)));
    }
}
