use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque content-type identifier used as the extractor dispatch key.
/// Compared byte for byte: no case folding, no parameter stripping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentType(String);

impl ContentType {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentType {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ContentType {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ContentType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ContentType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One decompressed archive entry, alive only for the duration of an extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerEntry {
    /// Path of the entry inside the archive
    pub path: String,
    /// Decompressed bytes
    pub data: Vec<u8>,
}

impl ContainerEntry {
    pub fn new(path: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Outcome of a successful extraction, as reported by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Content type the extractor was selected by
    pub content_type: ContentType,
    /// Extracted text with its natural spacing
    pub text: String,
    /// Number of characters in `text`
    pub char_count: usize,
}

impl ExtractionReport {
    pub fn new(content_type: ContentType, text: String) -> Self {
        let char_count = text.chars().count();
        Self {
            content_type,
            text,
            char_count,
        }
    }
}
