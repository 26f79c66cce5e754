//! Harvesting API over a [`PageSource`].
//!
//! [`Harvester`] ties the extractors to a page source: it fetches the overview
//! page to build the catalog, fetches component pages for details, and drives
//! the full-corpus export.
//!
//! # Example
//!
//! ```rust,no_run
//! use antdoc_core::{CachedFetcher, FetchConfig, HarvestConfig, Harvester};
//!
//! # #[tokio::main]
//! # async fn main() -> antdoc_core::Result<()> {
//! let fetcher = CachedFetcher::new(FetchConfig::default())?;
//! let harvester = Harvester::new(fetcher, HarvestConfig::default());
//!
//! let catalog = harvester.catalog(false).await?;
//! if let Some(button) = catalog.iter().find(|c| c.matches_name("button")) {
//!     let detail = harvester.component_detail(&button.url, false).await?;
//!     println!("{} props", detail.props_flat.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tracing::debug;
use url::Url;

use crate::catalog::{ComponentSummary, SiteConfig, extract_catalog_with};
use crate::detail::{ComponentDetail, extract_detail};
use crate::fetch::PageSource;
use crate::{HarvestError, Result};

/// File name used when an export is not given a destination.
pub const DEFAULT_EXPORT_FILE: &str = "antd_components_all.json";

/// Configuration for a [`Harvester`].
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Site layout: base URL, overview page, component path marker.
    pub site: SiteConfig,
    /// Directory for exports written without an explicit destination.
    pub export_dir: PathBuf,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self { site: SiteConfig::default(), export_dir: default_export_dir() }
    }
}

impl HarvestConfig {
    /// Creates a new builder for HarvestConfig.
    ///
    /// # Example
    ///
    /// ```rust
    /// use antdoc_core::HarvestConfig;
    ///
    /// let config = HarvestConfig::builder().export_dir("/tmp/antdoc").path_marker("/components/").build();
    /// assert_eq!(config.default_export_path().file_name().unwrap(), "antd_components_all.json");
    /// ```
    pub fn builder() -> HarvestConfigBuilder {
        HarvestConfigBuilder::new()
    }

    /// Export path used when none is given.
    pub fn default_export_path(&self) -> PathBuf {
        self.export_dir.join(DEFAULT_EXPORT_FILE)
    }
}

/// Platform data directory for exports, falling back to the working directory.
pub fn default_export_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("antdoc"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("exports")
}

/// Builder for HarvestConfig.
pub struct HarvestConfigBuilder {
    config: HarvestConfig,
}

impl Default for HarvestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HarvestConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: HarvestConfig::default() }
    }

    /// Sets the site origin.
    pub fn base_url(mut self, value: Url) -> Self {
        self.config.site.base_url = value;
        self
    }

    /// Sets the overview page path.
    pub fn overview_path(mut self, value: impl Into<String>) -> Self {
        self.config.site.overview_path = value.into();
        self
    }

    /// Sets the fragment every component URL must contain.
    pub fn path_marker(mut self, value: impl Into<String>) -> Self {
        self.config.site.path_marker = value.into();
        self
    }

    /// Sets the default export directory.
    pub fn export_dir(mut self, value: impl Into<PathBuf>) -> Self {
        self.config.export_dir = value.into();
        self
    }

    /// Builds the HarvestConfig.
    pub fn build(self) -> HarvestConfig {
        self.config
    }
}

/// Catalog and detail harvesting over a page source.
#[derive(Debug, Clone)]
pub struct Harvester<S> {
    source: S,
    config: HarvestConfig,
}

impl<S: PageSource> Harvester<S> {
    pub fn new(source: S, config: HarvestConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches the overview page and extracts the catalog.
    ///
    /// # Errors
    ///
    /// Fails only when the overview page itself cannot be fetched.
    pub async fn catalog(&self, force: bool) -> Result<Vec<ComponentSummary>> {
        let url = self.config.site.overview_url();
        let markup = self.source.fetch(&url, force).await?;
        let catalog = extract_catalog_with(&markup, &self.config.site);
        debug!(url, components = catalog.len(), "catalog extracted");
        Ok(catalog)
    }

    /// Fetches one component page and extracts its detail record.
    pub async fn component_detail(&self, url: &str, force: bool) -> Result<ComponentDetail> {
        if url.trim().is_empty() {
            return Err(HarvestError::MissingUrl(url.to_string()));
        }
        let markup = self.source.fetch(url, force).await?;
        let mut detail = extract_detail(&markup);
        detail.source_url = Some(url.to_string());
        Ok(detail)
    }

    /// Detail for a catalog entry, failing with [`HarvestError::MissingUrl`]
    /// when the entry has no URL.
    pub async fn summary_detail(&self, summary: &ComponentSummary, force: bool) -> Result<ComponentDetail> {
        if summary.url.trim().is_empty() {
            return Err(HarvestError::MissingUrl(summary.name.clone()));
        }
        self.component_detail(&summary.url, force).await
    }
}
