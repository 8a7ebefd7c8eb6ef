use crate::constants::{DEFAULT_MAX_ENTRY_SIZE, ODF_MIMETYPE_ENTRY};
use crate::error::{ExtractError, Result};
use crate::models::ContainerEntry;
use std::io::{Cursor, Read};
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

/// Media types are capped at 127 + 1 + 127 bytes (RFC 6838)
const MAX_MIMETYPE_LEN: u64 = 255;

/// Bounds applied while decompressing entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerLimits {
    /// Largest decompressed entry accepted, in bytes
    pub max_entry_size: u64,
}

impl Default for ContainerLimits {
    fn default() -> Self {
        Self {
            max_entry_size: DEFAULT_MAX_ENTRY_SIZE,
        }
    }
}

/// ZIP container opened over an in-memory copy of the caller's stream.
/// Everything it holds is released when it is dropped.
pub struct Container {
    archive: ZipArchive<Cursor<Vec<u8>>>,
    limits: ContainerLimits,
}

impl Container {
    /// Read `reader` to the end and open it as a ZIP archive.
    ///
    /// The reader is only borrowed: it is neither closed nor dropped here,
    /// so the caller keeps full control of its lifetime.
    pub fn open<R: Read + ?Sized>(reader: &mut R, limits: ContainerLimits) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(bytes, limits)
    }

    /// Open an archive already held in memory
    pub fn from_bytes(bytes: Vec<u8>, limits: ContainerLimits) -> Result<Self> {
        if bytes.is_empty() {
            return Err(ExtractError::MalformedContainer("empty stream".to_string()));
        }

        let size = bytes.len();
        let archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| match e {
            // Seeking or reading inside our own buffer failing means the
            // directory points outside of it
            ZipError::Io(io) => {
                ExtractError::MalformedContainer(format!("truncated archive: {}", io))
            }
            other => ExtractError::from(other),
        })?;

        debug!("Opened container: {} bytes, {} entries", size, archive.len());

        Ok(Self { archive, limits })
    }

    /// Number of entries in the archive
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Entry paths in central-directory order
    pub fn entry_names(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    /// Check whether an entry with this exact path exists
    pub fn contains(&self, path: &str) -> bool {
        self.archive.file_names().any(|name| name == path)
    }

    /// Decompress one entry fully into memory
    pub fn read_entry(&mut self, path: &str) -> Result<ContainerEntry> {
        self.read_bounded(path, self.limits.max_entry_size)
    }

    fn read_bounded(&mut self, path: &str, limit: u64) -> Result<ContainerEntry> {
        let mut file = match self.archive.by_name(path) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => {
                return Err(ExtractError::EntryNotFound {
                    path: path.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        if file.is_dir() {
            return Err(ExtractError::EntryNotFound {
                path: path.to_string(),
            });
        }

        let declared = file.size();
        if declared > limit {
            return Err(ExtractError::EntryTooLarge {
                path: path.to_string(),
                size: declared,
                limit,
            });
        }

        // The header size is not trusted: read at most one byte past the limit
        let mut data = Vec::with_capacity(declared as usize);
        (&mut file)
            .take(limit.saturating_add(1))
            .read_to_end(&mut data)
            .map_err(|e| {
                ExtractError::MalformedContainer(format!("failed to decompress {}: {}", path, e))
            })?;

        if data.len() as u64 > limit {
            return Err(ExtractError::EntryTooLarge {
                path: path.to_string(),
                size: data.len() as u64,
                limit,
            });
        }

        debug!("Read entry {} ({} bytes)", path, data.len());
        Ok(ContainerEntry::new(path, data))
    }

    /// Declared package type from the `mimetype` entry, if present and readable.
    /// Entries longer than a media type can be are ignored.
    pub fn mimetype(&mut self) -> Option<String> {
        let entry = self.read_bounded(ODF_MIMETYPE_ENTRY, MAX_MIMETYPE_LEN).ok()?;
        let value = String::from_utf8(entry.data).ok()?;
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::build_zip;
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_open_and_read_entry() {
        let bytes = build_zip(&[("mimetype", b"application/test"), ("content.xml", b"<a>hi</a>")]);
        let mut container = Container::from_bytes(bytes, ContainerLimits::default()).unwrap();

        assert_eq!(container.len(), 2);
        assert!(container.contains("content.xml"));
        assert!(!container.contains("styles.xml"));

        let entry = container.read_entry("content.xml").unwrap();
        assert_eq!(entry.path, "content.xml");
        assert_eq!(entry.data, b"<a>hi</a>");
    }

    #[test]
    fn test_entry_names_in_order() {
        let bytes = build_zip(&[("mimetype", b"x"), ("content.xml", b"<a/>"), ("meta.xml", b"<m/>")]);
        let container = Container::from_bytes(bytes, ContainerLimits::default()).unwrap();
        assert_eq!(container.entry_names(), vec!["mimetype", "content.xml", "meta.xml"]);
    }

    #[test]
    fn test_empty_stream_is_malformed() {
        let err = Container::open(&mut std::io::empty(), ContainerLimits::default())
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::MalformedContainer);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let mut reader: &[u8] = b"this is definitely not a zip archive";
        let err = Container::open(&mut reader, ContainerLimits::default())
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::MalformedContainer);
    }

    #[test]
    fn test_truncated_archive_is_malformed() {
        let bytes = build_zip(&[("content.xml", b"<a>hello world</a>")]);
        let truncated = bytes[..bytes.len() / 2].to_vec();
        let err = Container::from_bytes(truncated, ContainerLimits::default())
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::MalformedContainer);
    }

    #[test]
    fn test_missing_entry() {
        let bytes = build_zip(&[("other.txt", b"nothing")]);
        let mut container = Container::from_bytes(bytes, ContainerLimits::default()).unwrap();
        match container.read_entry("content.xml") {
            Err(ExtractError::EntryNotFound { path }) => assert_eq!(path, "content.xml"),
            other => panic!("Expected EntryNotFound, got {:?}", other.map(|e| e.path)),
        }
    }

    #[test]
    fn test_entry_over_limit() {
        let payload = vec![b'a'; 4096];
        let bytes = build_zip(&[("content.xml", &payload)]);
        let limits = ContainerLimits { max_entry_size: 1024 };
        let mut container = Container::from_bytes(bytes, limits).unwrap();

        let err = container.read_entry("content.xml").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::EntryTooLarge);
    }

    #[test]
    fn test_mimetype_trimmed() {
        let bytes = build_zip(&[("mimetype", b"application/vnd.oasis.opendocument.text\n")]);
        let mut container = Container::from_bytes(bytes, ContainerLimits::default()).unwrap();
        assert_eq!(
            container.mimetype().as_deref(),
            Some("application/vnd.oasis.opendocument.text")
        );
    }

    #[test]
    fn test_oversized_mimetype_is_ignored() {
        let junk = vec![b'a'; 4096];
        let bytes = build_zip(&[("mimetype", junk.as_slice()), ("content.xml", b"<a/>")]);
        let mut container = Container::from_bytes(bytes, ContainerLimits::default()).unwrap();
        assert_eq!(container.mimetype(), None);
        // The package itself stays readable
        assert!(container.read_entry("content.xml").is_ok());
    }

    #[test]
    fn test_mimetype_absent() {
        let bytes = build_zip(&[("content.xml", b"<a/>")]);
        let mut container = Container::from_bytes(bytes, ContainerLimits::default()).unwrap();
        assert_eq!(container.mimetype(), None);
    }

    #[test]
    fn test_open_leaves_reader_usable() {
        let bytes = build_zip(&[("content.xml", b"<a/>")]);
        let mut cursor = std::io::Cursor::new(bytes.clone());
        Container::open(&mut cursor, ContainerLimits::default()).unwrap();

        // Still ours: rewind and read it again
        cursor.set_position(0);
        let mut again = Vec::new();
        cursor.read_to_end(&mut again).unwrap();
        assert_eq!(again, bytes);
    }
}
