//! Output document for one node or way.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::osm::ElementKind;

/// Attributes grouped under `created`.
pub const CREATED_FIELDS: [&str; 5] = ["version", "changeset", "timestamp", "user", "uid"];

/// A value rewritten by a correction or by street normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChange {
    /// Tag key as written in the extract.
    pub key: String,
    pub original: String,
    pub corrected: String,
}

/// Nested document built from one `node` or `way`.
///
/// Serializes as a JSON object: plain fields first (attributes, then tags, in
/// document order), followed by `address`, `created`, `pos`, `node_refs` and
/// `type`. A plain field whose name collides with one of those structured
/// fields is dropped in favor of the structured one.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub kind: ElementKind,
    /// Top-level attributes and non-address tags.
    pub fields: IndexMap<String, String>,
    /// Provenance attributes.
    pub created: IndexMap<String, String>,
    /// `[lat, lon]`, when both parse.
    pub pos: Option<[f64; 2]>,
    /// Values of `addr:*` tags keyed by identifier.
    pub address: IndexMap<String, String>,
    /// `nd` references, in document order.
    pub node_refs: Vec<String>,
    /// Values changed while shaping; not serialized.
    pub changes: Vec<ValueChange>,
}

impl Document {
    /// Create an empty document.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            fields: IndexMap::new(),
            created: IndexMap::new(),
            pos: None,
            address: IndexMap::new(),
            node_refs: Vec::new(),
            changes: Vec::new(),
        }
    }

    /// Look up a top-level field.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Look up an address field.
    pub fn address_field(&self, key: &str) -> Option<&str> {
        self.address.get(key).map(String::as_str)
    }

    fn shadows(&self, key: &str) -> bool {
        match key {
            "type" => true,
            "address" => !self.address.is_empty(),
            "created" => !self.created.is_empty(),
            "pos" => self.pos.is_some(),
            "node_refs" => !self.node_refs.is_empty(),
            _ => false,
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        for (key, value) in &self.fields {
            if !self.shadows(key) {
                map.serialize_entry(key, value)?;
            }
        }
        if !self.address.is_empty() {
            map.serialize_entry("address", &self.address)?;
        }
        if !self.created.is_empty() {
            map.serialize_entry("created", &self.created)?;
        }
        if let Some(pos) = &self.pos {
            map.serialize_entry("pos", pos)?;
        }
        if !self.node_refs.is_empty() {
            map.serialize_entry("node_refs", &self.node_refs)?;
        }
        map.serialize_entry("type", self.kind.name())?;

        map.end()
    }
}
