//! Component catalog extraction from the overview page.
//!
//! The overview page lists every component twice: once as a card in the main
//! grid and once as an entry in the side menu. Both are scanned, canonical
//! names are derived from the (often bilingual) labels, and the two lists are
//! merged into one entry per component.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::parse::{Document, Element};

const CARD_SELECTOR: &str = ".components-overview-card";
const CARD_TITLE_SELECTOR: &str = ".components-overview-title";

/// Where the documentation site lives and how component links are recognised.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Origin that relative links are resolved against.
    pub base_url: Url,
    /// Path of the overview page, relative to `base_url`.
    pub overview_path: String,
    /// Fragment every component URL must contain.
    pub path_marker: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("https://4x.ant.design").expect("static base URL is valid"),
            overview_path: "/components/overview-cn/".to_string(),
            path_marker: "/components/".to_string(),
        }
    }
}

impl SiteConfig {
    /// Absolute URL of the overview page.
    pub fn overview_url(&self) -> String {
        self.resolve(&self.overview_path)
            .unwrap_or_else(|| format!("{}{}", self.base_url.as_str().trim_end_matches('/'), self.overview_path))
    }

    /// Resolves an `href` against the base origin.
    ///
    /// Absolute links are returned unchanged; relative ones are joined onto
    /// `base_url`. Returns `None` when the link cannot be resolved.
    pub fn resolve(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        if is_absolute(href) {
            return Some(href.to_string());
        }
        self.base_url.join(href).ok().map(String::from)
    }

    /// Whether `url` may stand in the catalog: absolute and under the path marker.
    pub fn accepts(&self, url: &str) -> bool {
        is_absolute(url) && url.contains(&self.path_marker)
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// One entry of the component catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSummary {
    /// Canonical ASCII identifier, e.g. `Button`.
    pub name: String,
    /// Label as shown on the site, e.g. `Button按钮`.
    pub display_name: String,
    /// Absolute URL of the component page.
    pub url: String,
    /// Short description; the overview page carries none, so usually empty.
    #[serde(default)]
    pub description: String,
}

impl ComponentSummary {
    /// Identity key used for deduplication and lookup.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Case-insensitive match against a requested component name.
    pub fn matches_name(&self, name: &str) -> bool {
        self.key() == name.to_lowercase()
    }
}

/// Derives the canonical name from a raw label.
///
/// Takes the leading run of ASCII letters and digits; when the label does not
/// start with one (purely localized labels), takes its first whitespace
/// separated token instead.
///
/// ```rust
/// use antdoc_core::canonical_name;
///
/// assert_eq!(canonical_name("Button 按钮"), "Button");
/// assert_eq!(canonical_name("DatePicker日期选择框"), "DatePicker");
/// assert_eq!(canonical_name("按钮 组件"), "按钮");
/// ```
pub fn canonical_name(raw: &str) -> String {
    let raw = raw.trim();
    let end = raw.find(|c: char| !c.is_ascii_alphanumeric()).unwrap_or(raw.len());
    if end > 0 {
        return raw[..end].to_string();
    }
    raw.split_whitespace().next().unwrap_or_default().to_string()
}

/// Extracts the catalog using the default site configuration.
pub fn extract_catalog(markup: &str) -> Vec<ComponentSummary> {
    extract_catalog_with(markup, &SiteConfig::default())
}

/// Extracts the deduplicated component catalog from overview-page markup.
///
/// Never fails; markup without the expected structure yields fewer entries.
pub fn extract_catalog_with(markup: &str, site: &SiteConfig) -> Vec<ComponentSummary> {
    let doc = Document::parse(markup);

    let cards = scan_cards(&doc, site);
    let menu = scan_menu(&doc, site);
    debug!(cards = cards.len(), menu = menu.len(), "scanned overview page");

    merge_summaries(cards.into_iter().chain(menu))
}

/// Keeps one summary per canonical key, preferring the longer display name.
///
/// Summaries whose URL is not absolute or lacks the path marker must already
/// have been dropped. On equal display-name length the first one seen wins.
/// Output order follows the first insertion of each key.
pub fn merge_summaries(summaries: impl IntoIterator<Item = ComponentSummary>) -> Vec<ComponentSummary> {
    let mut merged: Vec<ComponentSummary> = Vec::new();

    for summary in summaries {
        let key = summary.key();
        match merged.iter_mut().find(|kept| kept.key() == key) {
            Some(kept) => {
                if summary.display_name.chars().count() > kept.display_name.chars().count() {
                    *kept = summary;
                }
            }
            None => merged.push(summary),
        }
    }

    merged
}

/// Cards in the overview grid: label in a title element, link on the
/// enclosing anchor or on an anchor inside the card.
fn scan_cards(doc: &Document, site: &SiteConfig) -> Vec<ComponentSummary> {
    let Ok(cards) = doc.select(CARD_SELECTOR) else {
        return Vec::new();
    };

    cards
        .iter()
        .filter_map(|card| {
            let title = card.select_first(CARD_TITLE_SELECTOR)?;
            let label = title.stripped_text();
            let href = card_href(card);
            build_summary(&label, href, site)
        })
        .collect()
}

fn card_href<'a>(card: &Element<'a>) -> Option<&'a str> {
    card.closest("a")
        .and_then(|anchor| anchor.attr("href"))
        .or_else(|| card.select_first("a[href]").and_then(|anchor| anchor.attr("href")))
}

/// Side menu anchors pointing below the path marker. The label is the
/// concatenation of the anchor's spans, or its whole text when it has none.
fn scan_menu(doc: &Document, site: &SiteConfig) -> Vec<ComponentSummary> {
    let selector = format!("ul.ant-menu li a[href*=\"{}\"]", site.path_marker);
    let Ok(anchors) = doc.select(&selector) else {
        return Vec::new();
    };

    anchors
        .iter()
        .filter_map(|anchor| {
            let spans: String = anchor
                .select("span")
                .unwrap_or_default()
                .iter()
                .map(Element::stripped_text)
                .collect();
            let label = if spans.is_empty() { anchor.stripped_text() } else { spans };
            build_summary(&label, anchor.attr("href"), site)
        })
        .collect()
}

fn build_summary(label: &str, href: Option<&str>, site: &SiteConfig) -> Option<ComponentSummary> {
    let url = site.resolve(href?)?;
    if !site.accepts(&url) {
        return None;
    }

    Some(ComponentSummary {
        name: canonical_name(label),
        display_name: label.to_string(),
        url,
        description: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn summary(name: &str, display_name: &str) -> ComponentSummary {
        ComponentSummary {
            name: name.to_string(),
            display_name: display_name.to_string(),
            url: format!("https://4x.ant.design/components/{}-cn/", name.to_lowercase()),
            description: String::new(),
        }
    }

    #[rstest]
    #[case("Button 按钮", "Button")]
    #[case("  Table表格", "Table")]
    #[case("QRCode", "QRCode")]
    #[case("按钮 组件", "按钮")]
    #[case("-Affix 固钉", "-Affix")]
    #[case("", "")]
    fn test_canonical_name(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(canonical_name(raw), expected);
    }

    #[rstest]
    #[case("Button 按钮")]
    #[case("按钮 组件")]
    #[case("  -Affix 固钉 ")]
    #[case("Typography排版")]
    fn test_canonical_name_idempotent(#[case] raw: &str) {
        let once = canonical_name(raw);
        assert!(!once.is_empty());
        assert_eq!(canonical_name(&once), once);
    }

    #[test]
    fn test_merge_prefers_longer_display_name() {
        let merged = merge_summaries(vec![summary("Button", "Button"), summary("button", "Button按钮")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].display_name, "Button按钮");
    }

    #[test]
    fn test_merge_tie_keeps_first() {
        let first = summary("Tag", "Tag标签");
        let mut second = summary("Tag", "Tag徽章");
        second.url = "https://4x.ant.design/components/tag/".to_string();

        let merged = merge_summaries(vec![first.clone(), second]);
        assert_eq!(merged, vec![first]);
    }

    #[test]
    fn test_merge_keeps_first_insertion_order() {
        let merged = merge_summaries(vec![
            summary("Button", "Button"),
            summary("Table", "Table表格"),
            summary("Button", "Button按钮"),
        ]);
        let names: Vec<_> = merged.iter().map(|s| s.display_name.as_str()).collect();
        assert_eq!(names, vec!["Button按钮", "Table表格"]);
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let site = SiteConfig::default();
        assert_eq!(
            site.resolve("/components/button-cn/").as_deref(),
            Some("https://4x.ant.design/components/button-cn/")
        );
        assert_eq!(
            site.resolve("https://ant.design/components/table/").as_deref(),
            Some("https://ant.design/components/table/")
        );
        assert_eq!(site.resolve("  "), None);
    }

    #[test]
    fn test_overview_url() {
        assert_eq!(SiteConfig::default().overview_url(), "https://4x.ant.design/components/overview-cn/");
    }

    #[test]
    fn test_extract_cards_and_menu() {
        let html = r#"
            <ul class="ant-menu">
                <li><a href="/components/button-cn/"><span>Button</span><span class="chinese">按钮</span></a></li>
                <li><a href="/components/icon-cn/">Icon 图标</a></li>
                <li><a href="/docs/react/introduce-cn">介绍</a></li>
            </ul>
            <div class="components-overview">
                <a href="/components/button-cn/">
                    <div class="components-overview-card"><div class="components-overview-title">Button</div></div>
                </a>
                <div class="components-overview-card">
                    <div class="components-overview-title">Table 表格</div>
                    <a href="/components/table-cn/">查看</a>
                </div>
                <div class="components-overview-card">
                    <div class="components-overview-title">Orphan</div>
                </div>
            </div>
        "#;

        let catalog = extract_catalog(html);
        let names: Vec<_> = catalog.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Button", "Table", "Icon"]);

        let button = &catalog[0];
        assert_eq!(button.display_name, "Button按钮");
        assert_eq!(button.url, "https://4x.ant.design/components/button-cn/");

        let icon = &catalog[2];
        assert_eq!(icon.display_name, "Icon 图标");
    }

    #[test]
    fn test_extract_drops_links_outside_marker() {
        let html = r#"
            <div class="components-overview-card">
                <div class="components-overview-title">Guide</div>
                <a href="/docs/react/getting-started-cn">Guide</a>
            </div>
            <div class="components-overview-card">
                <div class="components-overview-title">Relative</div>
                <a href="javascript:void(0)">x</a>
            </div>
        "#;
        assert!(extract_catalog(html).is_empty());
    }

    #[test]
    fn test_extract_empty_markup() {
        assert!(extract_catalog("").is_empty());
        assert!(extract_catalog("<html><body><p>nothing here</p></body></html>").is_empty());
    }
}
