pub mod config;
pub mod constants;
pub mod container;
pub mod error;
pub mod extractor;
pub mod lifecycle;
pub mod markup;
pub mod models;
pub mod registry;
pub mod service;
pub mod utils;

pub use config::Config;
pub use container::{Container, ContainerLimits};
pub use error::{ErrorKind, ExtractError, Result};
pub use extractor::{OpenDocumentExtractor, PlainTextExtractor, TextExtractor, XmlExtractor};
pub use lifecycle::{LifecycleListener, ListenerChain, ListenerError, Phase};
pub use markup::{normalize_whitespace, Boundary, MarkupReducer};
pub use models::{ContainerEntry, ContentType, ExtractionReport};
pub use registry::{ExtractorRegistry, RegistrationPolicy};
pub use service::{DocumentReaderService, ServiceBuilder};
