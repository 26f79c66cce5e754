//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types used by the
//! catalog and detail extractors. They wrap `scraper` so that the extractors
//! deal with text the way the documentation pages need it: whitespace-trimmed
//! fragments, joined either tightly (labels) or line by line (table cells).
//!
//! # Example
//!
//! ```rust
//! use antdoc_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Button 按钮</h1>
//!             <p class="intro">按钮用于开始一个即时操作。</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! let heading = doc.select_first("h1").unwrap();
//! assert_eq!(heading.stripped_text(), "Button 按钮");
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{HarvestError, Result};

/// Represents a parsed HTML document.
///
/// Parsing never fails: html5ever recovers from malformed markup the same way
/// a browser would, so a broken page only means fewer matches later on.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use antdoc_core::parse::Document;
    ///
    /// let doc = Document::parse("<table><tr><td>a</td></tr></table><table></table>");
    /// assert_eq!(doc.select("table").unwrap().len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(Element::from).collect())
    }

    /// Selects the first element matching a CSS selector, if any.
    ///
    /// Invalid selectors are treated as matching nothing.
    pub fn select_first(&'_ self, selector: &str) -> Option<Element<'_>> {
        let sel = parse_selector(selector).ok()?;
        self.html.select(&sel).next().map(Element::from)
    }
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use antdoc_core::parse::Document;
///
/// let html = r#"<a href="/components/button-cn/"><span>Button</span> <span>按钮</span></a>"#;
/// let doc = Document::parse(html);
/// let link = doc.select_first("a").unwrap();
///
/// assert_eq!(link.attr("href"), Some("/components/button-cn/"));
/// assert_eq!(link.stripped_text(), "Button按钮");
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> From<ElementRef<'a>> for Element<'a> {
    fn from(element: ElementRef<'a>) -> Self {
        Self { element }
    }
}

impl<'a> Element<'a> {
    /// Gets the raw text content of this element, text nodes concatenated as-is.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Text nodes trimmed individually, empty ones dropped, joined with no separator.
    pub fn stripped_text(&self) -> String {
        self.joined_text("")
    }

    /// Text nodes trimmed individually, empty ones dropped, joined with `separator`.
    ///
    /// Table cells use `"\n"` so that a name cell carrying an inline type
    /// annotation keeps the two on separate lines.
    pub fn joined_text(&self, separator: &str) -> String {
        self.element
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Finds the nearest ancestor element with the given tag name.
    pub fn closest(&self, tag: &str) -> Option<Element<'a>> {
        self.element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name().eq_ignore_ascii_case(tag))
            .map(Element::from)
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = parse_selector(selector)?;
        Ok(self.element.select(&sel).map(Element::from).collect())
    }

    /// Selects the first descendant matching a CSS selector, if any.
    pub fn select_first(&self, selector: &str) -> Option<Element<'a>> {
        let sel = parse_selector(selector).ok()?;
        self.element.select(&sel).next().map(Element::from)
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| HarvestError::HtmlParseError(format!("Invalid selector: {}", e)))
}
