use thiserror::Error;

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while turning a document stream into text
#[derive(Error, Debug)]
pub enum ExtractError {
    /// No extractor is registered for the requested content type
    #[error("unsupported format: no extractor registered for '{0}'")]
    UnsupportedFormat(String),

    /// The stream is not a readable archive container
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// The archive opened but the expected entry is missing
    #[error("entry not found in container: {path}")]
    EntryNotFound { path: String },

    /// The payload is not parseable text or XML
    #[error("malformed markup: {0}")]
    MalformedMarkup(String),

    /// A decompressed entry is bigger than the configured limit
    #[error("entry {path} is too large: {size} bytes exceeds limit of {limit} bytes")]
    EntryTooLarge { path: String, size: u64, limit: u64 },

    /// Registration refused because the content type is already taken
    #[error("content type already registered: {0}")]
    DuplicateContentType(String),

    /// The caller's stream failed while being read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Payload-free classification of an [`ExtractError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnsupportedFormat,
    MalformedContainer,
    EntryNotFound,
    MalformedMarkup,
    EntryTooLarge,
    DuplicateContentType,
    Io,
}

impl ExtractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            ExtractError::MalformedContainer(_) => ErrorKind::MalformedContainer,
            ExtractError::EntryNotFound { .. } => ErrorKind::EntryNotFound,
            ExtractError::MalformedMarkup(_) => ErrorKind::MalformedMarkup,
            ExtractError::EntryTooLarge { .. } => ErrorKind::EntryTooLarge,
            ExtractError::DuplicateContentType(_) => ErrorKind::DuplicateContentType,
            ExtractError::Io(_) => ErrorKind::Io,
        }
    }
}

/// Missing entries are reported by `Container::read_entry`, which knows the path
impl From<zip::result::ZipError> for ExtractError {
    fn from(err: zip::result::ZipError) -> Self {
        ExtractError::MalformedContainer(err.to_string())
    }
}

impl From<quick_xml::Error> for ExtractError {
    fn from(err: quick_xml::Error) -> Self {
        ExtractError::MalformedMarkup(err.to_string())
    }
}

impl From<std::str::Utf8Error> for ExtractError {
    fn from(err: std::str::Utf8Error) -> Self {
        ExtractError::MalformedMarkup(format!("invalid UTF-8: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let err = ExtractError::UnsupportedFormat("application/x-foo".to_string());
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);

        let err = ExtractError::EntryNotFound {
            path: "content.xml".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::EntryNotFound);
    }

    #[test]
    fn test_zip_error_is_malformed_container() {
        let err: ExtractError = zip::result::ZipError::InvalidArchive("bad").into();
        assert_eq!(err.kind(), ErrorKind::MalformedContainer);

        let err: ExtractError = zip::result::ZipError::FileNotFound.into();
        assert_eq!(err.kind(), ErrorKind::MalformedContainer);
    }

    #[test]
    fn test_display_mentions_content_type() {
        let err = ExtractError::UnsupportedFormat("application/unknown-type".to_string());
        assert!(err.to_string().contains("application/unknown-type"));
    }
}
