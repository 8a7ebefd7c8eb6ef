use crate::constants::{ODF_CONTENT_ENTRY, OPENDOCUMENT_TYPES};
use crate::container::{Container, ContainerLimits};
use crate::error::Result;
use crate::extractor::r#trait::TextExtractor;
use crate::markup::MarkupReducer;
use std::io::Read;
use tracing::debug;

/// OpenDocument (and OpenOffice.org 1.x) package extractor.
///
/// Opens the package as a ZIP container, reads `content.xml` and reduces
/// its markup to text. Text, spreadsheet and presentation documents all go
/// through the same pipeline.
pub struct OpenDocumentExtractor {
    limits: ContainerLimits,
    reducer: MarkupReducer,
}

impl OpenDocumentExtractor {
    pub fn new() -> Self {
        Self::with_limits(ContainerLimits::default())
    }

    pub fn with_limits(limits: ContainerLimits) -> Self {
        Self {
            limits,
            reducer: MarkupReducer::opendocument(),
        }
    }
}

impl Default for OpenDocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for OpenDocumentExtractor {
    fn name(&self) -> &str {
        "opendocument"
    }

    fn content_types(&self) -> &[&str] {
        OPENDOCUMENT_TYPES
    }

    fn extract(&self, reader: &mut dyn Read) -> Result<String> {
        let mut container = Container::open(reader, self.limits)?;

        if let Some(mimetype) = container.mimetype() {
            debug!("Package declares mimetype {}", mimetype);
        }

        let entry = container.read_entry(ODF_CONTENT_ENTRY)?;
        // Archive buffers are not needed past this point
        drop(container);

        self.reducer.reduce(&entry.data)
    }
}
