//! osm-wrangle: audit and clean OpenStreetMap XML extracts.
//!
//! Three stages, coordinated through files on disk:
//!
//! - **Structure audit**: one streaming pass that validates element
//!   attributes, finds unknown node references, counts elements and
//!   contributors, and caches every observed tag key/value pair.
//! - **Content audit**: heuristic checks on the cached tag values, written to
//!   a review sheet for a human to annotate with corrections.
//! - **Record transform**: a second streaming pass that applies the
//!   corrections and street-name normalization and writes one JSON document
//!   per node or way.
//!
//! # Example
//!
//! ```no_run
//! use osm_wrangle::{TagSource, Wrangler};
//!
//! let wrangler = Wrangler::new();
//! let report = wrangler.audit_structure("qc.osm").unwrap();
//! println!("Invalid entries: {}", report.invalid_entries.len());
//!
//! let cache = wrangler.cache_path_for("qc.osm");
//! let audit = wrangler.audit_content(&TagSource::Cache(cache)).unwrap();
//! println!("Flagged values: {}", audit.rows.len());
//! ```

pub mod audit;
pub mod cache;
pub mod corrections;
pub mod error;
pub mod input;
pub mod osm;
pub mod rules;
pub mod transform;
pub mod validation;

mod wrangle;

pub use crate::wrangle::{WrangleConfig, Wrangler};
pub use audit::{ContentAudit, ContentAuditor, StructureAuditor, StructureReport, TagSource};
pub use cache::TagCache;
pub use corrections::CorrectionTable;
pub use error::{Result, WrangleError};
pub use input::SourceMetadata;
pub use rules::{RuleConfig, RuleSet};
pub use transform::{RecordTransformer, TransformOptions, TransformSummary};
