//! Audit stages: structural validation of the extract and heuristic checks on
//! tag values.

mod content;
mod structure;

pub use content::{
    write_review, write_review_to, AuditComment, AuditRow, ContentAudit, ContentAuditor,
    TagSource, DEFAULT_REVIEW_FILE,
};
pub use structure::{StructureAuditor, StructureReport};
