//! Error types for harvesting operations.
//!
//! This module defines [`HarvestError`], which covers every failure that can
//! surface while fetching documentation pages, reading local markup, or
//! persisting an export. The extractors themselves never fail: a page that
//! lacks the expected structure simply yields fewer records.
//!
//! # Example
//!
//! ```rust
//! use antdoc_core::{HarvestError, Result};
//!
//! fn require_url(name: &str, url: Option<&str>) -> Result<String> {
//!     url.map(str::to_string).ok_or_else(|| HarvestError::MissingUrl(name.to_string()))
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for harvesting operations.
#[derive(Error, Debug)]
pub enum HarvestError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps DNS failures, connection resets, and body decoding problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The documentation site answered with a non-success status.
    ///
    /// Never retried automatically; callers record it against the affected
    /// component.
    #[error("Failed {url} status={status}")]
    FetchFailed { url: String, status: u16 },

    /// A catalog entry reached detail extraction without a URL.
    #[error("Missing URL for component {0}")]
    MissingUrl(String),

    /// Invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Cache and export I/O.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Export serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for HarvestError.
pub type Result<T> = std::result::Result<T, HarvestError>;
