//! Structured metadata harvesting for the Ant Design component documentation.
//!
//! The crate discovers the component catalog from the overview page, parses
//! component pages into a canonical schema (classified API tables, normalized
//! property rows, code samples), and exports the whole corpus as JSON.

pub mod catalog;
pub mod detail;
pub mod error;
pub mod export;
pub mod fetch;
pub mod harvest;
pub mod keywords;
pub mod normalize;
pub mod parse;

pub use catalog::{ComponentSummary, SiteConfig, canonical_name, extract_catalog, extract_catalog_with, merge_summaries};
pub use detail::{ComponentDetail, RowRecord, TableKind, TableRecord, TableSummary, classify_header, extract_detail};
pub use error::{HarvestError, Result};
pub use export::{ExportEntry, ExportOptions, ExportRecord, ExportSummary, NamedDetail};
#[cfg(feature = "fetch")]
pub use fetch::CachedFetcher;
pub use fetch::{FetchConfig, PageSource, fetch_file, fetch_stdin};
pub use harvest::{DEFAULT_EXPORT_FILE, HarvestConfig, HarvestConfigBuilder, Harvester};
pub use normalize::{NormalizedPropertyRow, normalize_row, parse_required};
pub use parse::Document;
