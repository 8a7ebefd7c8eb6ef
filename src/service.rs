use crate::config::Config;
use crate::error::Result;
use crate::extractor::{OpenDocumentExtractor, PlainTextExtractor, TextExtractor, XmlExtractor};
use crate::models::{ContentType, ExtractionReport};
use crate::registry::ExtractorRegistry;
use std::io::Read;
use std::sync::Arc;
use tracing::debug;

/// Document reader service: routes a stream to the extractor registered for
/// its declared content type.
///
/// The service is immutable once built. Share it across threads with `Arc`;
/// concurrent calls do not lock.
pub struct DocumentReaderService {
    registry: ExtractorRegistry,
}

impl DocumentReaderService {
    /// Wrap an already populated registry
    pub fn new(registry: ExtractorRegistry) -> Self {
        Self { registry }
    }

    /// Start from an empty registry configured from `config`
    pub fn builder(config: &Config) -> ServiceBuilder {
        ServiceBuilder {
            registry: ExtractorRegistry::new(config.reader.registration),
        }
    }

    /// Service with the bundled extractors: OpenDocument packages, flat
    /// OpenDocument XML, generic XML and plain text
    pub fn with_defaults(config: &Config) -> Result<Self> {
        let limits = config.reader.container_limits();
        Ok(Self::builder(config)
            .register_extractor(Arc::new(OpenDocumentExtractor::with_limits(limits)))?
            .register_extractor(Arc::new(XmlExtractor::opendocument_flat()))?
            .register_extractor(Arc::new(XmlExtractor::generic()))?
            .register_extractor(Arc::new(PlainTextExtractor::new()))?
            .build())
    }

    /// Extractor registered for `content_type`, or `UnsupportedFormat`
    pub fn get_document_reader(&self, content_type: &str) -> Result<Arc<dyn TextExtractor>> {
        self.registry.lookup(content_type)
    }

    /// Extract the text of `reader`, declared as `content_type`.
    ///
    /// The reader stays owned by the caller and is never closed here.
    /// Extractor failures are returned unchanged.
    pub fn get_content_as_text<R: Read + ?Sized>(
        &self,
        reader: &mut R,
        content_type: &str,
    ) -> Result<String> {
        let extractor = self.get_document_reader(content_type)?;
        debug!("Extracting {} with '{}'", content_type, extractor.name());

        let mut reader = reader;
        match extractor.extract(&mut reader) {
            Ok(text) => {
                debug!("Extracted {} bytes of text from {}", text.len(), content_type);
                Ok(text)
            }
            Err(e) => {
                debug!("Extraction of {} failed ({:?}): {}", content_type, e.kind(), e);
                Err(e)
            }
        }
    }

    /// Same as `get_content_as_text`, wrapped with the content type and counts
    pub fn extract_report<R: Read + ?Sized>(
        &self,
        reader: &mut R,
        content_type: &str,
    ) -> Result<ExtractionReport> {
        let text = self.get_content_as_text(reader, content_type)?;
        Ok(ExtractionReport::new(ContentType::from(content_type), text))
    }

    /// Check whether an extractor exists for `content_type`
    pub fn supports(&self, content_type: &str) -> bool {
        self.registry.contains(content_type)
    }

    /// Registered content types, sorted
    pub fn supported_content_types(&self) -> Vec<ContentType> {
        self.registry.content_types()
    }
}

/// Startup-phase handle for registering extractors before the service is frozen
pub struct ServiceBuilder {
    registry: ExtractorRegistry,
}

impl ServiceBuilder {
    /// Register an extractor for every content type it declares
    pub fn register_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Result<Self> {
        self.registry.register(extractor)?;
        Ok(self)
    }

    pub fn build(self) -> DocumentReaderService {
        DocumentReaderService::new(self.registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ExtractError};
    use crate::registry::RegistrationPolicy;
    use std::io::Cursor;

    #[test]
    fn test_defaults_cover_odf_text() {
        let service = DocumentReaderService::with_defaults(&Config::default()).unwrap();
        assert!(service.supports("application/vnd.oasis.opendocument.text"));
        assert!(service.supports("text/plain"));
        assert!(service.supports("application/xml"));
        assert!(service.supports("application/vnd.oasis.opendocument.text-flat-xml"));
    }

    #[test]
    fn test_defaults_register_under_reject_policy() {
        let mut config = Config::default();
        config.reader.registration = RegistrationPolicy::Reject;
        assert!(DocumentReaderService::with_defaults(&config).is_ok());
    }

    #[test]
    fn test_unknown_type_ignores_stream() {
        let service = DocumentReaderService::with_defaults(&Config::default()).unwrap();
        let mut reader = Cursor::new(b"whatever".to_vec());
        let err = service
            .get_content_as_text(&mut reader, "application/unknown-type")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
        // Lookup failed before anything was read
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_empty_stream_with_container_type() {
        let service = DocumentReaderService::with_defaults(&Config::default()).unwrap();
        let mut reader: &[u8] = b"";
        let err = service
            .get_content_as_text(&mut reader, "application/vnd.oasis.opendocument.text")
            .unwrap_err();
        assert!(matches!(err, ExtractError::MalformedContainer(_)));
    }

    #[test]
    fn test_plain_text_report() {
        let service = DocumentReaderService::with_defaults(&Config::default()).unwrap();
        let mut reader: &[u8] = b"hello";
        let report = service.extract_report(&mut reader, "text/plain").unwrap();
        assert_eq!(report.text, "hello");
        assert_eq!(report.char_count, 5);
        assert_eq!(report.content_type.as_str(), "text/plain");
    }

    #[test]
    fn test_builder_registration() {
        let service = DocumentReaderService::builder(&Config::default())
            .register_extractor(Arc::new(PlainTextExtractor::new()))
            .unwrap()
            .build();
        assert_eq!(
            service.supported_content_types(),
            vec![ContentType::from("text/plain")]
        );
        assert!(service.get_document_reader("application/xml").is_err());
    }

    #[test]
    fn test_service_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DocumentReaderService>();
    }
}
