//! Streaming OSM XML reader.
//!
//! The extract is never materialized as a tree. [`ElementReader`] yields each
//! element (start or self-closing tag) in document order together with its
//! depth; [`OsmElements`] groups those into one top-level element plus its
//! children at a time.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Result, WrangleError};
use crate::osm::{OsmElement, RawElement};

use super::source::{HashingReader, SourceMetadata};

/// Name of the OSM document root element.
const ROOT_ELEMENT: &str = "osm";

/// Buffered, hashing reader over an extract on disk.
pub type FileSource = BufReader<HashingReader<File>>;

/// Open an extract for streaming.
pub fn open_extract(path: impl AsRef<Path>) -> Result<ElementReader<FileSource>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| WrangleError::io(path, e))?;
    Ok(ElementReader::new(BufReader::new(HashingReader::new(file))))
}

/// Pull-based reader yielding every element of the document in order.
pub struct ElementReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    depth: usize,
    done: bool,
}

impl<R: BufRead> ElementReader<R> {
    /// Create a reader over any buffered source.
    pub fn new(inner: R) -> Self {
        Self {
            reader: Reader::from_reader(inner),
            buf: Vec::new(),
            depth: 0,
            done: false,
        }
    }

    /// Read the next element, or `None` at end of document.
    pub fn next_element(&mut self) -> Result<Option<RawElement>> {
        if self.done {
            return Ok(None);
        }

        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(e) => {
                    self.done = true;
                    return Err(e.into());
                }
            };

            match event {
                Event::Start(start) => {
                    let element = decode_element(&start, self.reader.decoder(), self.depth)?;
                    self.depth += 1;
                    return Ok(Some(element));
                }
                Event::Empty(start) => {
                    return decode_element(&start, self.reader.decoder(), self.depth).map(Some);
                }
                Event::End(_) => {
                    self.depth = self.depth.saturating_sub(1);
                }
                Event::Eof => {
                    self.done = true;
                    return Ok(None);
                }
                _ => {}
            }
        }
    }

    /// Group elements into top-level elements with their children.
    pub fn grouped(self) -> OsmElements<R> {
        OsmElements {
            elements: self,
            pending: None,
        }
    }

    /// Recover the underlying source.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl ElementReader<FileSource> {
    /// Consume a fully read file source and describe it.
    pub fn into_metadata(self, path: &Path) -> SourceMetadata {
        let (hash, size_bytes) = self.into_inner().into_inner().finish();
        SourceMetadata::new(path, hash, size_bytes)
    }
}

impl<R: BufRead> Iterator for ElementReader<R> {
    type Item = Result<RawElement>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_element().transpose()
    }
}

/// Decode a start tag into an owned element.
fn decode_element(start: &BytesStart<'_>, decoder: Decoder, depth: usize) -> Result<RawElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = IndexMap::new();

    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.decode_and_unescape_value(decoder)?.into_owned();
        attributes.insert(key, value);
    }

    Ok(RawElement {
        name,
        attributes,
        depth,
    })
}

/// Iterator over top-level elements (node, way, relation, bounds, ...) with
/// their nested children.
pub struct OsmElements<R> {
    elements: ElementReader<R>,
    pending: Option<RawElement>,
}

impl<R: BufRead> OsmElements<R> {
    /// Read the next top-level element and its children.
    pub fn next_group(&mut self) -> Result<Option<OsmElement>> {
        loop {
            let head = match self.pending.take() {
                Some(element) => element,
                None => match self.elements.next_element()? {
                    Some(element) => element,
                    None => return Ok(None),
                },
            };

            if head.depth == 0 && head.name == ROOT_ELEMENT {
                continue;
            }

            let head_depth = head.depth;
            let mut group = OsmElement::new(head);
            while let Some(next) = self.elements.next_element()? {
                if next.depth > head_depth {
                    group.children.push(next);
                } else {
                    self.pending = Some(next);
                    break;
                }
            }

            return Ok(Some(group));
        }
    }

    /// Recover the flat reader.
    pub fn into_elements(self) -> ElementReader<R> {
        self.elements
    }
}

impl<R: BufRead> Iterator for OsmElements<R> {
    type Item = Result<OsmElement>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_group().transpose()
    }
}
