//! Shaping a node or way into an output [`Document`].

use crate::corrections::CorrectionTable;
use crate::error::Result;
use crate::osm::{screen_tag, ElementKind, OsmElement, RawElement, TagKey, TagScreen};
use crate::rules::RuleSet;

use super::document::{Document, ValueChange, CREATED_FIELDS};

/// What became of one top-level element.
#[derive(Debug, Clone, PartialEq)]
pub enum Shaped {
    /// Write this document.
    Emit(Document),
    /// Shaped, then rejected by the QC-only filter.
    Filtered(Document),
    /// Not a node or way.
    Ignored,
}

/// Turns elements into documents, applying corrections and street normalization.
pub struct RecordShaper<'a> {
    corrections: &'a CorrectionTable,
    rules: &'a RuleSet,
    qc_only: bool,
}

impl<'a> RecordShaper<'a> {
    pub fn new(corrections: &'a CorrectionTable, rules: &'a RuleSet, qc_only: bool) -> Self {
        Self {
            corrections,
            rules,
            qc_only,
        }
    }

    /// Shape one top-level element.
    ///
    /// A `tag` without `k`/`v` or an `nd` without `ref` is an error; bad tags
    /// and unparseable coordinates are dropped quietly.
    pub fn shape(&self, element: &OsmElement) -> Result<Shaped> {
        let kind = element.kind();
        if !kind.is_shaped() {
            return Ok(Shaped::Ignored);
        }

        let mut doc = Document::new(kind);

        for (name, value) in &element.element.attributes {
            let name = name.as_str();
            if CREATED_FIELDS.contains(&name) {
                doc.created.insert(name.to_string(), value.clone());
            } else if name != "lat" && name != "lon" {
                doc.fields.insert(name.to_string(), value.clone());
            }
        }
        doc.pos = parse_position(element.element.attr("lat"), element.element.attr("lon"));

        for child in &element.children {
            match child.kind() {
                ElementKind::Tag => self.apply_tag(child, &mut doc)?,
                ElementKind::Nd => doc.node_refs.push(child.require("ref")?.to_string()),
                _ => {}
            }
        }

        if self.qc_only && !self.in_home_area(&doc) {
            return Ok(Shaped::Filtered(doc));
        }
        Ok(Shaped::Emit(doc))
    }

    fn apply_tag(&self, tag: &RawElement, doc: &mut Document) -> Result<()> {
        let TagScreen::Accepted { key, value } = screen_tag(tag.require("k")?, tag.require("v")?)
        else {
            return Ok(());
        };
        let Some(tag_key) = TagKey::parse(key) else {
            return Ok(());
        };

        let identifier = tag_key.identifier();
        let mut corrected = self
            .corrections
            .lookup(identifier, value)
            .unwrap_or(value)
            .to_string();

        if tag_key.is_address() && identifier == "street" {
            corrected = self.rules.correct_street_name(&corrected);
        }

        if corrected != value {
            doc.changes.push(ValueChange {
                key: key.to_string(),
                original: value.to_string(),
                corrected: corrected.clone(),
            });
        }

        if tag_key.is_address() {
            doc.address.insert(identifier.to_string(), corrected);
        } else {
            doc.fields.insert(key.to_string(), corrected);
        }

        Ok(())
    }

    /// False only when both postcode and city are present and neither places
    /// the element in the home area.
    fn in_home_area(&self, doc: &Document) -> bool {
        match (doc.address_field("postcode"), doc.address_field("city")) {
            (Some(postcode), Some(city)) => {
                self.rules.postcodes().is_valid(postcode) || self.rules.is_home_city(city)
            }
            _ => true,
        }
    }
}

/// `[lat, lon]` when both are present and parse as finite numbers.
fn parse_position(lat: Option<&str>, lon: Option<&str>) -> Option<[f64; 2]> {
    let lat: f64 = lat?.trim().parse().ok()?;
    let lon: f64 = lon?.trim().parse().ok()?;
    (lat.is_finite() && lon.is_finite()).then_some([lat, lon])
}
