use crate::error::Result;
use std::io::Read;

/// Trait for extractors turning one family of content types into plain text
pub trait TextExtractor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Content types this extractor registers itself under
    fn content_types(&self) -> &[&str];

    /// Check if this extractor declares the given content type
    fn supports(&self, content_type: &str) -> bool {
        self.content_types().contains(&content_type)
    }

    /// Extract the text content of a document.
    ///
    /// The reader is borrowed from the caller, who stays responsible for
    /// closing it. Implementations keep all state local to the call.
    fn extract(&self, reader: &mut dyn Read) -> Result<String>;
}
