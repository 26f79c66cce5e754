//! Full-corpus export.
//!
//! Walks the whole catalog, extracts every component page, and writes the
//! aggregate as one JSON record. A page that fails to fetch is recorded as
//! `{name, error}` and the run carries on; only a missing catalog aborts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::Result;
use crate::detail::ComponentDetail;
use crate::fetch::PageSource;
use crate::harvest::Harvester;

/// Options for [`Harvester::export_all`].
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Refetch every page instead of reading the cache.
    pub force: bool,
    /// Output file; the harvester's default export path when `None`.
    pub destination: Option<PathBuf>,
    /// Drop failed entries before persisting.
    pub validate: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { force: false, destination: None, validate: true }
    }
}

/// A detail record tagged with the catalog name it was harvested for.
#[derive(Debug, Clone, Serialize)]
pub struct NamedDetail {
    pub name: String,
    #[serde(flatten)]
    pub detail: ComponentDetail,
}

/// One element of the exported `components` array.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ExportEntry {
    Component(Box<NamedDetail>),
    Failed { name: String, error: String },
}

impl ExportEntry {
    pub fn is_error(&self) -> bool {
        matches!(self, ExportEntry::Failed { .. })
    }
}

/// The persisted aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRecord {
    /// Epoch seconds at which the export was assembled.
    pub generated_at: f64,
    pub count: usize,
    pub components: Vec<ExportEntry>,
}

impl ExportRecord {
    /// Builds the record, dropping failed entries when `validate` is set.
    ///
    /// `count` always reflects the entries that end up in the record.
    pub fn new(mut components: Vec<ExportEntry>, validate: bool) -> Self {
        if validate {
            components.retain(|entry| !entry.is_error());
        }
        Self { generated_at: epoch_seconds(), count: components.len(), components }
    }

    /// Writes the record as indented JSON, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// What an export run reports back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub path: PathBuf,
    /// Entries persisted.
    pub count: usize,
    /// Failures encountered, whether or not they were persisted.
    pub error_count: usize,
}

fn epoch_seconds() -> f64 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() as f64 / 1_000_000_000.0
}

impl<S: PageSource> Harvester<S> {
    /// Harvests every catalog entry and persists the aggregate.
    ///
    /// # Errors
    ///
    /// Fails when the catalog cannot be obtained or the record cannot be
    /// written. Per-component failures never abort the run.
    pub async fn export_all(&self, options: ExportOptions) -> Result<ExportSummary> {
        let catalog = self.catalog(options.force).await?;

        let mut entries = Vec::with_capacity(catalog.len());
        let mut error_count = 0;

        for summary in &catalog {
            match self.summary_detail(summary, options.force).await {
                Ok(detail) => {
                    entries.push(ExportEntry::Component(Box::new(NamedDetail { name: summary.name.clone(), detail })))
                }
                Err(e) => {
                    warn!(component = %summary.name, error = %e, "component export failed");
                    error_count += 1;
                    entries.push(ExportEntry::Failed { name: summary.name.clone(), error: e.to_string() });
                }
            }
        }

        let record = ExportRecord::new(entries, options.validate);
        let path = options.destination.unwrap_or_else(|| self.config().default_export_path());
        record.write_to(&path)?;

        info!(path = %path.display(), count = record.count, errors = error_count, "export written");
        Ok(ExportSummary { path, count: record.count, error_count })
    }
}
