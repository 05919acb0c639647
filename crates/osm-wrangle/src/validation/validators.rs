//! Attribute validators for OSM elements.

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::osm::{screen_tag, ElementKind, RawElement, TagScreen};

use super::violation::{InvalidEntry, Violation};

/// Format every entity timestamp must follow.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Attributes every node, way and relation must carry.
pub const REQUIRED_ENTITY_ATTRIBUTES: &[&str] =
    &["id", "version", "timestamp", "changeset", "uid", "user"];

/// Entity attributes that must parse as integers.
const INTEGER_ATTRIBUTES: &[&str] = &["id", "version", "changeset", "uid"];

/// True if the value is an optionally signed run of ASCII digits, of any width.
pub fn is_integer(value: &str) -> bool {
    let value = value.trim();
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// True if the value parses as a floating-point number.
pub fn is_float(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok()
}

/// True if the value is a `YYYY-MM-DDThh:mm:ssZ` timestamp.
pub fn is_timestamp(value: &str) -> bool {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).is_ok()
}

/// Trait for element validators.
pub trait Validator {
    /// Whether this validator inspects elements of the given kind.
    fn applies_to(&self, kind: &ElementKind) -> bool;

    /// Check an element. A missing required attribute is an error; anything
    /// else wrong with it is returned as violations.
    fn validate(&self, element: &RawElement) -> Result<Vec<Violation>>;
}

/// Validates node, way and relation provenance attributes (and node coordinates).
pub struct EntityValidator;

impl Validator for EntityValidator {
    fn applies_to(&self, kind: &ElementKind) -> bool {
        kind.is_entity()
    }

    fn validate(&self, element: &RawElement) -> Result<Vec<Violation>> {
        for attribute in REQUIRED_ENTITY_ATTRIBUTES {
            element.require(attribute)?;
        }

        let mut violations = Vec::new();

        for attribute in INTEGER_ATTRIBUTES {
            if !is_integer(element.require(attribute)?) {
                violations.push(Violation::NotInteger {
                    attribute: (*attribute).to_string(),
                });
            }
        }

        if !is_timestamp(element.require("timestamp")?) {
            violations.push(Violation::BadTimestamp);
        }

        if element.require("user")?.trim().is_empty() {
            violations.push(Violation::EmptyUser);
        }

        if element.kind() == ElementKind::Node {
            for attribute in ["lat", "lon"] {
                if !element.attr(attribute).is_some_and(is_float) {
                    violations.push(Violation::NotFloat {
                        attribute: attribute.to_string(),
                    });
                }
            }
        }

        Ok(violations)
    }
}

/// Validates `tag` key/value pairs.
pub struct TagValidator;

impl Validator for TagValidator {
    fn applies_to(&self, kind: &ElementKind) -> bool {
        *kind == ElementKind::Tag
    }

    fn validate(&self, element: &RawElement) -> Result<Vec<Violation>> {
        let key = element.require("k")?;
        let value = element.require("v")?;

        Ok(match screen_tag(key, value) {
            TagScreen::Accepted { .. } => Vec::new(),
            TagScreen::ProblemChars => vec![Violation::ProblemKeyChars],
            TagScreen::Empty => vec![Violation::EmptyKeyOrValue],
        })
    }
}

/// Runs every applicable validator over an element.
pub struct ValidationEngine {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidationEngine {
    /// Create a new validation engine with all default validators.
    pub fn new() -> Self {
        Self {
            validators: vec![Box::new(EntityValidator), Box::new(TagValidator)],
        }
    }

    /// Validate an element; returns an invalid entry if anything failed.
    pub fn validate(&self, element: &RawElement) -> Result<Option<InvalidEntry>> {
        let kind = element.kind();
        let mut violations = Vec::new();

        for validator in self.validators.iter().filter(|v| v.applies_to(&kind)) {
            violations.extend(validator.validate(element)?);
        }

        if violations.is_empty() {
            Ok(None)
        } else {
            Ok(Some(
                InvalidEntry::new(&element.name, element.attributes.clone())
                    .with_violations(violations),
            ))
        }
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}
