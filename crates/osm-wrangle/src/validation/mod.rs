//! Attribute validation for the structure audit.

mod validators;
mod violation;

pub use validators::{
    is_float, is_integer, is_timestamp, EntityValidator, TagValidator, ValidationEngine,
    Validator, REQUIRED_ENTITY_ATTRIBUTES, TIMESTAMP_FORMAT,
};
pub use violation::{InvalidEntry, Violation};
