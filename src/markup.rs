use crate::constants::{ODF_BLOCK_ELEMENTS, ODF_CELL_ELEMENTS, ODF_SKIPPED_ELEMENTS};
use crate::error::{ExtractError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::{HashMap, HashSet};

/// Largest run a single spacing element may expand to
const MAX_SPACE_RUN: usize = 1024;

/// What an element contributes to the text stream besides its children
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundary {
    /// Ends a block: a newline is injected after it unless one is already there
    Block,
    /// Ends a table cell: a tab is injected unless whitespace is already there
    Cell,
    /// Literal line break
    LineBreak,
    /// Literal tab
    Tab,
    /// Literal run of spaces, the count read from an attribute (1 when absent)
    Spaces { count_attr: String },
}

/// Turns XML into plain text: text nodes in document order, tags dropped,
/// structural elements mapped to whitespace so neighbouring blocks never merge.
#[derive(Debug, Clone, Default)]
pub struct MarkupReducer {
    boundaries: HashMap<String, Boundary>,
    skipped: HashSet<String>,
}

impl MarkupReducer {
    /// Reducer with no structural rules: pure text-node concatenation
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules for OpenDocument `content.xml` and flat-XML documents
    pub fn opendocument() -> Self {
        let mut reducer = Self::new()
            .with_boundary("text:line-break", Boundary::LineBreak)
            .with_boundary("text:tab", Boundary::Tab)
            .with_boundary(
                "text:s",
                Boundary::Spaces {
                    count_attr: "text:c".to_string(),
                },
            );

        for name in ODF_BLOCK_ELEMENTS {
            reducer = reducer.with_boundary(name, Boundary::Block);
        }
        for name in ODF_CELL_ELEMENTS {
            reducer = reducer.with_boundary(name, Boundary::Cell);
        }
        for name in ODF_SKIPPED_ELEMENTS {
            reducer = reducer.skip(name);
        }
        reducer
    }

    /// Attach a boundary rule to a qualified element name (e.g. `text:p`)
    pub fn with_boundary(mut self, name: &str, boundary: Boundary) -> Self {
        self.boundaries.insert(name.to_string(), boundary);
        self
    }

    /// Drop the whole subtree of the named element
    pub fn skip(mut self, name: &str) -> Self {
        self.skipped.insert(name.to_string());
        self
    }

    /// Reduce a complete XML document to text.
    ///
    /// Any parse failure aborts the reduction: no partial text is returned.
    pub fn reduce(&self, xml: &[u8]) -> Result<String> {
        let mut reader = Reader::from_reader(xml);
        reader.trim_text(false);
        reader.check_end_names(true);

        let mut out = String::new();
        let mut buf = Vec::new();
        let mut depth = 0usize;
        let mut seen_root = false;
        // Depth at which a skipped subtree started
        let mut skipping: Option<usize> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if depth == 0 && seen_root {
                        return Err(multiple_roots(&reader));
                    }
                    depth += 1;
                    seen_root = true;
                    if skipping.is_some() {
                        // inside a dropped subtree
                    } else if self.skipped.contains(qualified_name(e)?) {
                        skipping = Some(depth);
                    } else if let Some(boundary) = self.boundaries.get(qualified_name(e)?) {
                        self.open(boundary, e, &mut out)?;
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    if depth == 0 && seen_root {
                        return Err(multiple_roots(&reader));
                    }
                    seen_root = true;
                    if skipping.is_none() && !self.skipped.contains(qualified_name(e)?) {
                        if let Some(boundary) = self.boundaries.get(qualified_name(e)?) {
                            self.open(boundary, e, &mut out)?;
                            close(boundary, &mut out);
                        }
                    }
                }
                Ok(Event::End(ref e)) => {
                    if depth == 0 {
                        return Err(ExtractError::MalformedMarkup(
                            "closing tag without matching opening tag".to_string(),
                        ));
                    }
                    if skipping == Some(depth) {
                        skipping = None;
                    } else if skipping.is_none() {
                        let name = std::str::from_utf8(e.name().into_inner())?;
                        if let Some(boundary) = self.boundaries.get(name) {
                            close(boundary, &mut out);
                        }
                    }
                    depth -= 1;
                }
                Ok(Event::Text(ref e)) => {
                    let text = e.unescape()?;
                    if depth == 0 {
                        if !text.trim().is_empty() {
                            return Err(ExtractError::MalformedMarkup(
                                "text outside of the root element".to_string(),
                            ));
                        }
                    } else if skipping.is_none() {
                        out.push_str(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if depth > 0 && skipping.is_none() {
                        let raw = e.into_inner();
                        out.push_str(std::str::from_utf8(&raw)?);
                    }
                }
                Ok(Event::Eof) => break,
                // Declarations, comments, processing instructions, doctypes
                Ok(_) => {}
                Err(e) => {
                    return Err(ExtractError::MalformedMarkup(format!(
                        "at byte {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
            }
            buf.clear();
        }

        if depth > 0 {
            return Err(ExtractError::MalformedMarkup(format!(
                "unexpected end of document with {} unclosed element(s)",
                depth
            )));
        }
        if !seen_root {
            return Err(ExtractError::MalformedMarkup(
                "document has no root element".to_string(),
            ));
        }

        Ok(out)
    }

    fn open(&self, boundary: &Boundary, e: &BytesStart<'_>, out: &mut String) -> Result<()> {
        match boundary {
            Boundary::LineBreak => out.push('\n'),
            Boundary::Tab => out.push('\t'),
            Boundary::Spaces { count_attr } => {
                let count = attribute(e, count_attr)?
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(1)
                    .min(MAX_SPACE_RUN);
                out.extend(std::iter::repeat(' ').take(count));
            }
            // A block may start inside inline content (notes, anchored frames)
            Boundary::Block => {
                if !out.is_empty() && !out.ends_with(char::is_whitespace) {
                    out.push('\n');
                }
            }
            Boundary::Cell => {}
        }
        Ok(())
    }
}

fn multiple_roots(reader: &Reader<&[u8]>) -> ExtractError {
    ExtractError::MalformedMarkup(format!(
        "at byte {}: multiple root elements",
        reader.buffer_position()
    ))
}

fn close(boundary: &Boundary, out: &mut String) {
    match boundary {
        Boundary::Block => {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
        }
        Boundary::Cell => {
            if !out.is_empty() && !out.ends_with(char::is_whitespace) {
                out.push('\t');
            }
        }
        _ => {}
    }
}

fn qualified_name<'a>(e: &'a BytesStart<'_>) -> Result<&'a str> {
    Ok(std::str::from_utf8(e.name().into_inner())?)
}

fn attribute(e: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ExtractError::MalformedMarkup(err.to_string()))?;
        if attr.key.as_ref() == name.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Collapse every whitespace run to one space and trim both ends.
///
/// Meant for comparisons; extractors return text with its natural spacing.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
