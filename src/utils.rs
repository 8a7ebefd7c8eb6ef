use crate::constants::EXTENSION_CONTENT_TYPES;
use crate::container::{Container, ContainerLimits};
use std::fs::File;
use std::path::Path;

/// Get file extension from path (without the dot)
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

/// Content type conventionally used for a file extension
pub fn content_type_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.to_lowercase();
    EXTENSION_CONTENT_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, content_type)| *content_type)
}

/// Content type guessed from a path's extension
pub fn content_type_for_path(path: &Path) -> Option<&'static str> {
    get_extension(path).and_then(|ext| content_type_for_extension(&ext))
}

/// Read the `mimetype` entry of an OpenDocument package on disk.
///
/// For command-line callers that have no declared type; the reader service
/// itself never sniffs.
pub fn sniff_package_mimetype(path: &Path) -> Option<String> {
    let mut file = File::open(path).ok()?;
    let mut container = Container::open(&mut file, ContainerLimits::default()).ok()?;
    container.mimetype()
}
