//! Main Wrangler struct tying the three stages together.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::audit::{
    write_review, ContentAudit, ContentAuditor, StructureAuditor, StructureReport, TagSource,
    DEFAULT_REVIEW_FILE,
};
use crate::cache::cache_path;
use crate::corrections::CorrectionTable;
use crate::error::Result;
use crate::rules::RuleSet;
use crate::transform::{output_path, RecordTransformer, TransformOptions, TransformSummary};

/// Configuration shared by all stages.
#[derive(Debug, Clone)]
pub struct WrangleConfig {
    /// Rule tables for the content audit and transformer.
    pub rules: RuleSet,
    /// Where the structure audit writes the tag cache (None = next to the extract).
    pub cache_path: Option<PathBuf>,
    /// Where the content audit writes the review sheet.
    pub review_path: PathBuf,
    /// Transformer output switches.
    pub transform: TransformOptions,
}

impl Default for WrangleConfig {
    fn default() -> Self {
        Self {
            rules: RuleSet::default(),
            cache_path: None,
            review_path: PathBuf::from(DEFAULT_REVIEW_FILE),
            transform: TransformOptions::default(),
        }
    }
}

/// Runs the structure audit, content audit and record transformer.
pub struct Wrangler {
    config: WrangleConfig,
}

impl Wrangler {
    /// Create a Wrangler with the built-in rules.
    pub fn new() -> Self {
        Self::with_config(WrangleConfig::default())
    }

    pub fn with_config(config: WrangleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WrangleConfig {
        &self.config
    }

    /// Cache location for an extract under this configuration.
    pub fn cache_path_for(&self, extract: impl AsRef<Path>) -> PathBuf {
        self.config
            .cache_path
            .clone()
            .unwrap_or_else(|| cache_path(extract))
    }

    /// Audit the extract's structure and persist its tag cache.
    pub fn audit_structure(&self, extract: impl AsRef<Path>) -> Result<StructureReport> {
        let extract = extract.as_ref();
        let report = StructureAuditor::new().audit(extract)?;

        let path = self.cache_path_for(extract);
        report.tag_cache.save(&path)?;
        info!(path = %path.display(), keys = report.tag_cache.key_count(), "saved tag cache");

        Ok(report)
    }

    /// Audit tag values and write the review sheet.
    pub fn audit_content(&self, source: &TagSource) -> Result<ContentAudit> {
        let cache = source.load()?;
        let audit = ContentAuditor::new(self.config.rules.clone()).audit(&cache);
        write_review(&self.config.review_path, &audit.rows)?;
        Ok(audit)
    }

    /// Transform the extract using a reviewed correction sheet. Returns the
    /// output path along with the run's counts.
    pub fn transform(
        &self,
        extract: impl AsRef<Path>,
        corrections: impl AsRef<Path>,
        output: Option<PathBuf>,
    ) -> Result<(PathBuf, TransformSummary)> {
        let extract = extract.as_ref();
        let corrections = CorrectionTable::load(corrections)?;
        let output =
            output.unwrap_or_else(|| output_path(extract, self.config.transform.qc_only));

        let summary = RecordTransformer::new(self.config.rules.clone(), corrections)
            .with_options(self.config.transform)
            .run(extract, &output)?;

        Ok((output, summary))
    }
}

impl Default for Wrangler {
    fn default() -> Self {
        Self::new()
    }
}
