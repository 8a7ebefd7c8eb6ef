pub mod odf;
pub mod plain;
pub mod r#trait;
pub mod xml;

pub use odf::OpenDocumentExtractor;
pub use plain::PlainTextExtractor;
pub use r#trait::TextExtractor;
pub use xml::XmlExtractor;
