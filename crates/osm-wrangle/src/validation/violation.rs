//! Invalid-entry records produced by the structure audit.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Why an element failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Attribute should be an integer but isn't.
    NotInteger { attribute: String },
    /// Attribute should be a floating-point number but isn't (or is absent).
    NotFloat { attribute: String },
    /// `timestamp` doesn't match `YYYY-MM-DDThh:mm:ssZ`.
    BadTimestamp,
    /// `user` is empty after trimming.
    EmptyUser,
    /// Tag key contains reserved characters or whitespace.
    ProblemKeyChars,
    /// Tag key or value is empty after trimming.
    EmptyKeyOrValue,
}

impl Violation {
    /// Get a human-readable label.
    pub fn label(&self) -> String {
        match self {
            Violation::NotInteger { attribute } => format!("'{}' is not an integer", attribute),
            Violation::NotFloat { attribute } => format!("'{}' is not a number", attribute),
            Violation::BadTimestamp => "timestamp is not YYYY-MM-DDThh:mm:ssZ".to_string(),
            Violation::EmptyUser => "user is empty".to_string(),
            Violation::ProblemKeyChars => "key has problem characters".to_string(),
            Violation::EmptyKeyOrValue => "key or value is empty".to_string(),
        }
    }
}

/// An element that failed validation, with every attribute it carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidEntry {
    /// Element tag name.
    pub element: String,
    /// The element's full attribute mapping.
    pub attributes: IndexMap<String, String>,
    /// What was wrong with it.
    pub violations: Vec<Violation>,
}

impl InvalidEntry {
    /// Create an entry for an element.
    pub fn new(element: impl Into<String>, attributes: IndexMap<String, String>) -> Self {
        Self {
            element: element.into(),
            attributes,
            violations: Vec::new(),
        }
    }

    /// Set the violations.
    pub fn with_violations(mut self, violations: Vec<Violation>) -> Self {
        self.violations = violations;
        self
    }

    /// Comma-separated violation labels.
    pub fn describe(&self) -> String {
        self.violations
            .iter()
            .map(Violation::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
