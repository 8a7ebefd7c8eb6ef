/// Constants shared by the extractors, the registry and the CLI
/// Content types are exact-match dispatch keys; nothing here is parsed

/// Entry holding the document body inside every OpenDocument package
pub const ODF_CONTENT_ENTRY: &str = "content.xml";

/// Uncompressed first entry of an OpenDocument package naming its type
pub const ODF_MIMETYPE_ENTRY: &str = "mimetype";

pub const ODF_TEXT: &str = "application/vnd.oasis.opendocument.text";
pub const ODF_SPREADSHEET: &str = "application/vnd.oasis.opendocument.spreadsheet";
pub const ODF_PRESENTATION: &str = "application/vnd.oasis.opendocument.presentation";

/// Package-based OpenDocument and OpenOffice.org 1.x types.
/// All of them keep their body in `content.xml`.
pub const OPENDOCUMENT_TYPES: &[&str] = &[
    ODF_TEXT,
    ODF_SPREADSHEET,
    ODF_PRESENTATION,
    "application/vnd.oasis.opendocument.graphics",
    "application/vnd.oasis.opendocument.formula",
    "application/vnd.oasis.opendocument.chart",
    "application/vnd.oasis.opendocument.database",
    "application/vnd.oasis.opendocument.text-master",
    "application/vnd.oasis.opendocument.text-template",
    "application/vnd.oasis.opendocument.spreadsheet-template",
    "application/vnd.oasis.opendocument.presentation-template",
    "application/vnd.oasis.opendocument.graphics-template",
    // OpenOffice.org 1.x
    "application/vnd.sun.xml.writer",
    "application/vnd.sun.xml.writer.template",
    "application/vnd.sun.xml.calc",
    "application/vnd.sun.xml.calc.template",
    "application/vnd.sun.xml.impress",
    "application/vnd.sun.xml.impress.template",
    "application/vnd.sun.xml.draw",
    "application/vnd.sun.xml.draw.template",
    "application/vnd.sun.xml.math",
];

/// Single-file OpenDocument flavours, read with the OpenDocument rules
pub const OPENDOCUMENT_FLAT_TYPES: &[&str] = &[
    "application/vnd.oasis.opendocument.text-flat-xml",
    "application/vnd.oasis.opendocument.spreadsheet-flat-xml",
    "application/vnd.oasis.opendocument.presentation-flat-xml",
    "application/vnd.oasis.opendocument.graphics-flat-xml",
];

/// Generic XML, read without structural rules
pub const XML_TYPES: &[&str] = &["text/xml", "application/xml"];

pub const PLAIN_TEXT_TYPES: &[&str] = &["text/plain"];

/// Default ceiling for one decompressed archive entry (64 MiB)
pub const DEFAULT_MAX_ENTRY_SIZE: u64 = 64 * 1024 * 1024;

/// File extensions the CLI maps to content types when none is given
pub const EXTENSION_CONTENT_TYPES: &[(&str, &str)] = &[
    ("odt", ODF_TEXT),
    ("ods", ODF_SPREADSHEET),
    ("odp", ODF_PRESENTATION),
    ("odg", "application/vnd.oasis.opendocument.graphics"),
    ("odf", "application/vnd.oasis.opendocument.formula"),
    ("odc", "application/vnd.oasis.opendocument.chart"),
    ("odb", "application/vnd.oasis.opendocument.database"),
    ("odm", "application/vnd.oasis.opendocument.text-master"),
    ("ott", "application/vnd.oasis.opendocument.text-template"),
    ("ots", "application/vnd.oasis.opendocument.spreadsheet-template"),
    ("otp", "application/vnd.oasis.opendocument.presentation-template"),
    ("otg", "application/vnd.oasis.opendocument.graphics-template"),
    ("sxw", "application/vnd.sun.xml.writer"),
    ("stw", "application/vnd.sun.xml.writer.template"),
    ("sxc", "application/vnd.sun.xml.calc"),
    ("stc", "application/vnd.sun.xml.calc.template"),
    ("sxi", "application/vnd.sun.xml.impress"),
    ("sti", "application/vnd.sun.xml.impress.template"),
    ("sxd", "application/vnd.sun.xml.draw"),
    ("std", "application/vnd.sun.xml.draw.template"),
    ("sxm", "application/vnd.sun.xml.math"),
    ("fodt", "application/vnd.oasis.opendocument.text-flat-xml"),
    ("fods", "application/vnd.oasis.opendocument.spreadsheet-flat-xml"),
    ("fodp", "application/vnd.oasis.opendocument.presentation-flat-xml"),
    ("fodg", "application/vnd.oasis.opendocument.graphics-flat-xml"),
    ("xml", "application/xml"),
    ("txt", "text/plain"),
    ("text", "text/plain"),
];

/// OpenDocument elements whose end closes a block of text
pub const ODF_BLOCK_ELEMENTS: &[&str] = &[
    "text:p",
    "text:h",
    "text:list-item",
    "text:list-header",
    "table:table-row",
    "draw:page",
    "draw:frame",
];

/// OpenDocument elements whose end closes a table cell
pub const ODF_CELL_ELEMENTS: &[&str] = &["table:table-cell", "table:covered-table-cell"];

/// Subtrees holding text that is not part of the visible document
pub const ODF_SKIPPED_ELEMENTS: &[&str] = &["text:tracked-changes"];
