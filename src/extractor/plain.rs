use crate::constants::PLAIN_TEXT_TYPES;
use crate::error::Result;
use crate::extractor::r#trait::TextExtractor;
use std::io::Read;

const UTF8_BOM: &str = "\u{feff}";

/// Extractor for UTF-8 plain text
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &str {
        "plain"
    }

    fn content_types(&self) -> &[&str] {
        PLAIN_TEXT_TYPES
    }

    fn extract(&self, reader: &mut dyn Read) -> Result<String> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let text = std::str::from_utf8(&bytes)?;
        Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string())
    }
}
