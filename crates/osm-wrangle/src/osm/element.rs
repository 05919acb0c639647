//! Element types read from an OSM XML extract.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WrangleError};

/// Kind of an OSM XML element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// A point with coordinates.
    Node,
    /// An ordered list of node references.
    Way,
    /// A group of members.
    Relation,
    /// A key/value pair owned by a node, way or relation.
    Tag,
    /// A node reference inside a way.
    Nd,
    /// Anything else (`osm`, `bounds`, `member`, `meta`, `note`, ...).
    Other(String),
}

impl ElementKind {
    /// Classify an element by its tag name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "node" => ElementKind::Node,
            "way" => ElementKind::Way,
            "relation" => ElementKind::Relation,
            "tag" => ElementKind::Tag,
            "nd" => ElementKind::Nd,
            other => ElementKind::Other(other.to_string()),
        }
    }

    /// The XML tag name for this kind.
    pub fn name(&self) -> &str {
        match self {
            ElementKind::Node => "node",
            ElementKind::Way => "way",
            ElementKind::Relation => "relation",
            ElementKind::Tag => "tag",
            ElementKind::Nd => "nd",
            ElementKind::Other(name) => name,
        }
    }

    /// Node, way or relation.
    pub fn is_entity(&self) -> bool {
        matches!(
            self,
            ElementKind::Node | ElementKind::Way | ElementKind::Relation
        )
    }

    /// Node or way, the kinds that become output documents.
    pub fn is_shaped(&self) -> bool {
        matches!(self, ElementKind::Node | ElementKind::Way)
    }
}

/// A single XML element with its attributes, as seen by the streaming reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawElement {
    /// Element tag name.
    pub name: String,
    /// Attributes in document order.
    pub attributes: IndexMap<String, String>,
    /// Nesting depth; the document root is at depth 0.
    pub depth: usize,
}

impl RawElement {
    /// Create an element with no attributes.
    pub fn new(name: impl Into<String>, depth: usize) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            depth,
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Kind of this element.
    pub fn kind(&self) -> ElementKind {
        ElementKind::from_name(&self.name)
    }

    /// Look up an attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Look up an attribute that must be present.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.attr(key)
            .ok_or_else(|| WrangleError::missing_attribute(&self.name, key))
    }
}

/// A top-level element together with its direct and nested children.
///
/// Holding one of these at a time is what keeps the transformer's memory use
/// bounded: only a single node, way or relation is ever buffered.
#[derive(Debug, Clone, PartialEq)]
pub struct OsmElement {
    /// The top-level element itself.
    pub element: RawElement,
    /// Child elements (`tag`, `nd`, `member`) in document order.
    pub children: Vec<RawElement>,
}

impl OsmElement {
    /// Wrap a top-level element with no children yet.
    pub fn new(element: RawElement) -> Self {
        Self {
            element,
            children: Vec::new(),
        }
    }

    /// Kind of the top-level element.
    pub fn kind(&self) -> ElementKind {
        self.element.kind()
    }

    /// Child `tag` elements.
    pub fn tags(&self) -> impl Iterator<Item = &RawElement> {
        self.children.iter().filter(|c| c.name == "tag")
    }

    /// `ref` attributes of child `nd` elements, in document order.
    pub fn node_refs(&self) -> impl Iterator<Item = &str> {
        self.children
            .iter()
            .filter(|c| c.name == "nd")
            .filter_map(|c| c.attr("ref"))
    }
}
