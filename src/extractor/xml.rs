use crate::constants::{OPENDOCUMENT_FLAT_TYPES, XML_TYPES};
use crate::error::Result;
use crate::extractor::r#trait::TextExtractor;
use crate::markup::MarkupReducer;
use std::io::Read;

/// Extractor for single-file XML documents
pub struct XmlExtractor {
    name: &'static str,
    content_types: &'static [&'static str],
    reducer: MarkupReducer,
}

impl XmlExtractor {
    /// Generic XML: every text node, no structural rules
    pub fn generic() -> Self {
        Self {
            name: "xml",
            content_types: XML_TYPES,
            reducer: MarkupReducer::new(),
        }
    }

    /// Flat OpenDocument (`.fodt`, `.fods`, ...): whole package in one XML file
    pub fn opendocument_flat() -> Self {
        Self {
            name: "opendocument-flat",
            content_types: OPENDOCUMENT_FLAT_TYPES,
            reducer: MarkupReducer::opendocument(),
        }
    }

    /// Custom reducer under custom content types
    pub fn with_reducer(
        name: &'static str,
        content_types: &'static [&'static str],
        reducer: MarkupReducer,
    ) -> Self {
        Self {
            name,
            content_types,
            reducer,
        }
    }
}

impl TextExtractor for XmlExtractor {
    fn name(&self) -> &str {
        self.name
    }

    fn content_types(&self) -> &[&str] {
        self.content_types
    }

    fn extract(&self, reader: &mut dyn Read) -> Result<String> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.reducer.reduce(&bytes)
    }
}
