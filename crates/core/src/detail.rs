//! Component page extraction.
//!
//! A component page carries a title, a few introductory paragraphs, code
//! samples, and any number of API tables whose shape varies from page to page.
//! [`extract_detail`] classifies each table by its header labels and flattens
//! property tables into [`NormalizedPropertyRow`]s.
//!
//! # Example
//!
//! ```rust
//! use antdoc_core::{TableKind, classify_header, extract_detail};
//!
//! let html = r#"
//!     <h1>Button 按钮</h1>
//!     <table>
//!         <thead><tr><th>参数</th><th>说明</th><th>类型</th><th>默认值</th></tr></thead>
//!         <tbody><tr><td>block</td><td>将按钮宽度调整为其父宽度的选项</td><td>boolean</td><td>false</td></tr></tbody>
//!     </table>
//! "#;
//!
//! let detail = extract_detail(html);
//! assert_eq!(detail.title.as_deref(), Some("Button 按钮"));
//! assert_eq!(detail.table_summary.props, 1);
//! assert_eq!(detail.props_flat[0].name.as_deref(), Some("block"));
//! assert_eq!(classify_header(&["事件名".to_string(), "说明".to_string()]), TableKind::Events);
//! ```

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::keywords::{API_MARKER, API_PROP_HINTS, EVENT_KEYWORDS, METHOD_KEYWORDS, PROP_KEYWORDS, contains_any};
use crate::normalize::{NormalizedPropertyRow, normalize_row};
use crate::parse::{Document, Element};

/// Number of leading paragraphs considered for the introduction.
pub const INTRO_PARAGRAPHS: usize = 5;

/// Semantic role of a table, decided from its header labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Props,
    Events,
    Methods,
    Other,
}

/// Classifies a table by its header labels.
///
/// Rules are applied in order and the first match wins: event keywords, then
/// method keywords, then property keywords, then `API` alongside a type,
/// default, or parameter column. Everything else is [`TableKind::Other`].
pub fn classify_header(header: &[String]) -> TableKind {
    let joined = header.join(" ");

    if contains_any(&joined, EVENT_KEYWORDS) {
        TableKind::Events
    } else if contains_any(&joined, METHOD_KEYWORDS) {
        TableKind::Methods
    } else if contains_any(&joined, PROP_KEYWORDS) {
        TableKind::Props
    } else if joined.contains(API_MARKER) && contains_any(&joined, API_PROP_HINTS) {
        TableKind::Props
    } else {
        TableKind::Other
    }
}

/// One data row of a table.
///
/// Rows whose cell count matches the header become a label to text mapping;
/// anything else (spanning cells, missing header) stays positional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRecord {
    Mapping(Vec<(String, String)>),
    Sequence(Vec<String>),
}

impl Default for RowRecord {
    fn default() -> Self {
        RowRecord::Sequence(Vec::new())
    }
}

impl RowRecord {
    /// Builds a row from cell texts and the table header.
    ///
    /// Repeated header labels keep their first position and their last value.
    pub fn from_cells(header: &[String], cells: Vec<String>) -> Self {
        if header.is_empty() || header.len() != cells.len() {
            return RowRecord::Sequence(cells);
        }

        let mut pairs: Vec<(String, String)> = Vec::with_capacity(cells.len());
        for (label, cell) in header.iter().zip(cells) {
            match pairs.iter_mut().find(|(key, _)| key == label) {
                Some(entry) => entry.1 = cell,
                None => pairs.push((label.clone(), cell)),
            }
        }
        RowRecord::Mapping(pairs)
    }

    /// Cell text under `label`, for mapping rows.
    pub fn get(&self, label: &str) -> Option<&str> {
        match self {
            RowRecord::Mapping(pairs) => pairs.iter().find(|(key, _)| key == label).map(|(_, v)| v.as_str()),
            RowRecord::Sequence(_) => None,
        }
    }
}

impl Serialize for RowRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RowRecord::Mapping(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (label, cell) in pairs {
                    map.serialize_entry(label, cell)?;
                }
                map.end()
            }
            RowRecord::Sequence(cells) => cells.serialize(serializer),
        }
    }
}

/// A table as found on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableRecord {
    pub header: Vec<String>,
    pub rows: Vec<RowRecord>,
}

/// Number of tables per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub props: usize,
    pub events: usize,
    pub methods: usize,
    pub other: usize,
}

/// Everything harvested from one component page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComponentDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub intro: Vec<String>,
    pub props: Vec<TableRecord>,
    pub events: Vec<TableRecord>,
    pub methods: Vec<TableRecord>,
    pub other_tables: Vec<TableRecord>,
    pub table_summary: TableSummary,
    pub examples: Vec<String>,
    pub props_flat: Vec<NormalizedPropertyRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl ComponentDetail {
    /// Files a table under its category and bumps the matching counter.
    fn push_table(&mut self, kind: TableKind, table: TableRecord) {
        match kind {
            TableKind::Props => {
                self.table_summary.props += 1;
                self.props.push(table);
            }
            TableKind::Events => {
                self.table_summary.events += 1;
                self.events.push(table);
            }
            TableKind::Methods => {
                self.table_summary.methods += 1;
                self.methods.push(table);
            }
            TableKind::Other => {
                self.table_summary.other += 1;
                self.other_tables.push(table);
            }
        }
    }
}

/// Extracts a [`ComponentDetail`] from component-page markup.
///
/// Never fails; a page lacking the expected structure yields empty collections.
/// `source_url` is left unset for the caller to fill in.
pub fn extract_detail(markup: &str) -> ComponentDetail {
    let doc = Document::parse(markup);
    let mut detail = ComponentDetail {
        title: doc.select_first("h1").map(|h1| h1.stripped_text()),
        intro: extract_intro(&doc),
        examples: extract_examples(&doc),
        ..Default::default()
    };

    for table in doc.select("table").unwrap_or_default() {
        let record = extract_table(&table);
        let kind = classify_header(&record.header);
        detail.push_table(kind, record);
    }

    detail.props_flat = detail
        .props
        .iter()
        .flat_map(|table| table.rows.iter().map(|row| normalize_row(row, &table.header)))
        .collect();

    detail
}

fn extract_intro(doc: &Document) -> Vec<String> {
    doc.select("p")
        .unwrap_or_default()
        .iter()
        .take(INTRO_PARAGRAPHS)
        .map(Element::stripped_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Code samples: each `pre code` block, text concatenated verbatim.
fn extract_examples(doc: &Document) -> Vec<String> {
    doc.select("pre code")
        .unwrap_or_default()
        .iter()
        .map(Element::text)
        .filter(|code| !code.is_empty())
        .collect()
}

fn extract_table(table: &Element<'_>) -> TableRecord {
    let header: Vec<String> = table
        .select("thead tr th")
        .unwrap_or_default()
        .iter()
        .map(Element::stripped_text)
        .collect();

    let rows = table
        .select("tbody tr")
        .unwrap_or_default()
        .iter()
        .filter_map(|tr| {
            let cells: Vec<String> = tr
                .select("td")
                .unwrap_or_default()
                .iter()
                .map(|td| td.joined_text("\n"))
                .collect();
            (!cells.is_empty()).then(|| RowRecord::from_cells(&header, cells))
        })
        .collect();

    TableRecord { header, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn labels(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[rstest]
    #[case(&["事件名", "说明"], TableKind::Events)]
    #[case(&["名称", "回调参数"], TableKind::Events)]
    #[case(&["方法名", "说明"], TableKind::Methods)]
    #[case(&["名称", "描述", "method"], TableKind::Methods)]
    #[case(&["参数", "说明", "类型", "默认值"], TableKind::Props)]
    #[case(&["属性", "描述"], TableKind::Props)]
    #[case(&["API", "类型"], TableKind::Props)]
    #[case(&["API", "默认"], TableKind::Props)]
    #[case(&["示例", "效果"], TableKind::Other)]
    #[case(&["API"], TableKind::Other)]
    #[case(&[], TableKind::Other)]
    fn test_classify_header(#[case] header: &[&str], #[case] expected: TableKind) {
        assert_eq!(classify_header(&labels(header)), expected);
    }

    #[test]
    fn test_events_checked_before_props() {
        // "参数" alone would be props; the callback column wins.
        assert_eq!(classify_header(&labels(&["参数", "回调"])), TableKind::Events);
    }

    #[test]
    fn test_substring_on_inside_english_word() {
        // Matching is not word-bounded: "Description" contains "on".
        assert_eq!(classify_header(&labels(&["Property", "Description", "Type"])), TableKind::Events);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let header = labels(&["参数", "说明", "类型", "默认值"]);
        let first = classify_header(&header);
        for _ in 0..10 {
            assert_eq!(classify_header(&header), first);
        }
    }

    #[test]
    fn test_row_from_cells_mapping() {
        let row = RowRecord::from_cells(&labels(&["参数", "说明"]), labels(&["size", "大小"]));
        assert_eq!(row.get("参数"), Some("size"));
        assert_eq!(row.get("说明"), Some("大小"));
    }

    #[test]
    fn test_row_from_cells_length_mismatch() {
        let row = RowRecord::from_cells(&labels(&["参数", "说明", "类型"]), labels(&["size", "大小"]));
        assert_eq!(row, RowRecord::Sequence(labels(&["size", "大小"])));
    }

    #[test]
    fn test_row_from_cells_without_header() {
        let row = RowRecord::from_cells(&[], labels(&["a"]));
        assert_eq!(row, RowRecord::Sequence(labels(&["a"])));
    }

    #[test]
    fn test_extract_tables_by_kind() {
        let html = r#"
            <h1>Modal 对话框</h1>
            <table>
                <thead><tr><th>参数</th><th>说明</th><th>类型</th><th>默认值</th></tr></thead>
                <tbody>
                    <tr><td>open</td><td>对话框是否可见</td><td>boolean</td><td>-</td></tr>
                    <tr><td colspan="4">以下为高级配置</td></tr>
                </tbody>
            </table>
            <table>
                <thead><tr><th>事件名</th><th>说明</th></tr></thead>
                <tbody><tr><td>onOk</td><td>点击确定回调</td></tr></tbody>
            </table>
            <table>
                <thead><tr><th>方法名</th><th>说明</th></tr></thead>
                <tbody><tr><td>Modal.info</td><td>信息提示</td></tr></tbody>
            </table>
            <table>
                <thead><tr><th>示例</th><th>效果</th></tr></thead>
                <tbody></tbody>
            </table>
        "#;

        let detail = extract_detail(html);
        assert_eq!(detail.table_summary, TableSummary { props: 1, events: 1, methods: 1, other: 1 });
        assert_eq!(detail.props[0].rows.len(), 2);
        assert_eq!(detail.props[0].rows[1], RowRecord::Sequence(labels(&["以下为高级配置"])));
        assert_eq!(detail.props_flat.len(), 2);
        assert_eq!(detail.props_flat[0].name.as_deref(), Some("open"));
        assert_eq!(detail.props_flat[1].name.as_deref(), Some("以下为高级配置"));
        assert!(detail.other_tables[0].rows.is_empty());
    }

    #[test]
    fn test_intro_takes_first_five_paragraphs() {
        let html = r#"
            <p>第一段</p><p>   </p><p>第三段</p><p>第四段</p><p>第五段</p><p>第六段</p>
        "#;
        let detail = extract_detail(html);
        assert_eq!(detail.intro, labels(&["第一段", "第三段", "第四段", "第五段"]));
    }

    #[test]
    fn test_examples_keep_line_breaks() {
        let html = "<pre><code><span>import</span> { Button } from 'antd';\n\n  &lt;Button /&gt;</code></pre>";
        let detail = extract_detail(html);
        assert_eq!(detail.examples, vec!["import { Button } from 'antd';\n\n  <Button />".to_string()]);
    }

    #[test]
    fn test_empty_page() {
        let detail = extract_detail("");
        assert_eq!(detail.title, None);
        assert!(detail.intro.is_empty());
        assert!(detail.examples.is_empty());
        assert_eq!(detail.table_summary, TableSummary::default());
        assert!(detail.props_flat.is_empty());
    }
}
