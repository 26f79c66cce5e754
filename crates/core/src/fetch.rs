//! Page fetching through a local disk cache.
//!
//! [`PageSource`] is the seam between harvesting and I/O. [`CachedFetcher`]
//! is the production implementation: it keeps one HTML file per URL in a
//! cache directory, only goes to the network on a miss or a forced refresh,
//! and pauses after every live request so the documentation site is not
//! hammered during a full export.

use std::fs;
use std::future::Future;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::{HarvestError, Result};

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use std::path::Path;
#[cfg(feature = "fetch")]
use tracing::debug;
#[cfg(feature = "fetch")]
use url::Url;

static UNSAFE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]+").unwrap());

/// Something that can hand out page markup by URL.
///
/// `force` asks the source to bypass any cache it keeps and refresh it.
pub trait PageSource {
    fn fetch(&self, url: &str, force: bool) -> impl Future<Output = Result<String>> + Send;
}

/// HTTP and cache configuration for fetching documentation pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header sent with live requests.
    pub user_agent: String,
    /// Directory holding cached pages.
    pub cache_dir: PathBuf,
    /// Pause after each live request.
    pub delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 15,
            user_agent: "Mozilla/5.0 (compatible; antdoc/0.1)".to_string(),
            cache_dir: default_cache_dir(),
            delay: Duration::from_millis(500),
        }
    }
}

/// Platform cache directory for pages, falling back to the temp dir.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir().unwrap_or_else(std::env::temp_dir).join("antdoc")
}

/// Cache file name for a URL: every run of characters outside `[A-Za-z0-9]`
/// becomes a single underscore.
///
/// ```rust
/// use antdoc_core::fetch::cache_key;
///
/// assert_eq!(cache_key("https://4x.ant.design/components/button-cn/"), "https_4x_ant_design_components_button_cn_.html");
/// ```
pub fn cache_key(url: &str) -> String {
    format!("{}.html", UNSAFE_RUN.replace_all(url, "_"))
}

/// Disk-cache-backed HTTP fetcher.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct CachedFetcher {
    client: Client,
    config: FetchConfig,
}

#[cfg(feature = "fetch")]
impl CachedFetcher {
    /// Builds the HTTP client. The cache directory is created lazily on first write.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(HarvestError::HttpError)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Path of the cache entry for `url`.
    pub fn cache_path(&self, url: &str) -> PathBuf {
        self.config.cache_dir.join(cache_key(url))
    }

    /// Fetches `url` over the network without touching the cache or pausing.
    pub async fn fetch_live(&self, url: &str) -> Result<String> {
        let parsed_url = Url::parse(url).map_err(|e| HarvestError::InvalidUrl(format!("{url}: {e}")))?;

        let response = self
            .client
            .get(parsed_url)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "zh-CN,zh;q=0.9,en;q=0.8")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HarvestError::Timeout { timeout: self.config.timeout }
                } else {
                    HarvestError::HttpError(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::FetchFailed { url: url.to_string(), status: status.as_u16() });
        }

        Ok(response.text().await?)
    }
}

#[cfg(feature = "fetch")]
impl PageSource for CachedFetcher {
    async fn fetch(&self, url: &str, force: bool) -> Result<String> {
        let cache_file = self.cache_path(url);

        if !force && let Some(cached) = read_cached(&cache_file) {
            debug!(url, path = %cache_file.display(), "cache hit");
            return Ok(cached);
        }

        debug!(url, force, "fetching live");
        let text = self.fetch_live(url).await?;

        fs::create_dir_all(&self.config.cache_dir)?;
        fs::write(&cache_file, &text)?;

        tokio::time::sleep(self.config.delay).await;
        Ok(text)
    }
}

/// Reads a cache entry, tolerating invalid UTF-8.
#[cfg(feature = "fetch")]
fn read_cached(path: &Path) -> Option<String> {
    let bytes = fs::read(path).ok()?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(HarvestError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(HarvestError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(HarvestError::from)?;

    Ok(buffer)
}

#[cfg(all(test, feature = "fetch"))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fetcher(dir: &TempDir) -> CachedFetcher {
        let config = FetchConfig { cache_dir: dir.path().to_path_buf(), delay: Duration::ZERO, ..Default::default() };
        CachedFetcher::new(config).unwrap()
    }

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 15);
        assert_eq!(config.delay, Duration::from_millis(500));
        assert!(config.cache_dir.ends_with("antdoc"));
    }

    #[test]
    fn test_cache_key_collapses_runs() {
        assert_eq!(cache_key("https://a.b/c?d=e&f"), "https_a_b_c_d_e_f.html");
        assert_eq!(cache_key("abc123"), "abc123.html");
    }

    #[tokio::test]
    async fn test_cache_hit_skips_network() {
        let dir = TempDir::new().unwrap();
        let fetcher = fetcher(&dir);
        // Unroutable host: only the cache can answer.
        let url = "http://cache-only.invalid/components/button-cn/";
        fs::write(fetcher.cache_path(url), "<h1>Button</h1>").unwrap();

        let html = fetcher.fetch(url, false).await.unwrap();
        assert_eq!(html, "<h1>Button</h1>");
    }

    #[tokio::test]
    async fn test_force_bypasses_cache() {
        let dir = TempDir::new().unwrap();
        let fetcher = fetcher(&dir);
        let url = "not a url";
        fs::write(fetcher.cache_path(url), "cached").unwrap();

        assert_eq!(fetcher.fetch(url, false).await.unwrap(), "cached");
        assert!(matches!(fetcher.fetch(url, true).await, Err(HarvestError::InvalidUrl(_))));
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/file.html");
        assert!(matches!(result, Err(HarvestError::FileNotFound(_))));
    }
}
