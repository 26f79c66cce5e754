//! Library API integration tests
use antdoc_core::*;
use serde_json::json;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

#[test]
fn test_catalog_from_overview() {
    let catalog = extract_catalog(&fixture("overview.html"));
    let names: Vec<_> = catalog.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Button", "Table", "Modal", "Icon", "Typography"]);
}

#[test]
fn test_catalog_keeps_longest_display_name() {
    let catalog = extract_catalog(&fixture("overview.html"));
    let button = catalog.iter().find(|c| c.matches_name("BUTTON")).unwrap();
    assert_eq!(button.display_name, "Button按钮");

    let table = catalog.iter().find(|c| c.matches_name("table")).unwrap();
    assert_eq!(table.display_name, "Table 表格");
}

#[test]
fn test_catalog_urls_are_absolute_component_links() {
    let site = SiteConfig::default();
    let catalog = extract_catalog(&fixture("overview.html"));
    assert!(!catalog.is_empty());
    for summary in &catalog {
        assert!(summary.url.starts_with("https://"), "{} is not absolute", summary.url);
        assert!(summary.url.contains(&site.path_marker));
        assert!(!summary.name.is_empty());
    }
}

#[test]
fn test_catalog_keys_are_unique() {
    let catalog = extract_catalog(&fixture("overview.html"));
    let mut keys: Vec<_> = catalog.iter().map(ComponentSummary::key).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), catalog.len());
}

#[test]
fn test_catalog_with_custom_site() {
    let site = SiteConfig {
        base_url: url::Url::parse("https://mirror.example.org").unwrap(),
        ..Default::default()
    };
    let catalog = extract_catalog_with(&fixture("overview.html"), &site);
    let button = catalog.iter().find(|c| c.name == "Button").unwrap();
    assert_eq!(button.url, "https://mirror.example.org/components/button-cn/");

    let table = catalog.iter().find(|c| c.name == "Table").unwrap();
    assert_eq!(table.url, "https://4x.ant.design/components/table-cn/");
}

#[test]
fn test_detail_button_page() {
    let detail = extract_detail(&fixture("button.html"));

    assert_eq!(detail.title.as_deref(), Some("Button 按钮"));
    assert_eq!(detail.intro.len(), 4);
    assert_eq!(detail.intro[0], "按钮用于开始一个即时操作。");
    assert_eq!(detail.table_summary, TableSummary { props: 1, events: 1, methods: 0, other: 1 });
    assert_eq!(detail.events[0].header, vec!["事件名称", "说明", "回调参数"]);
}

#[test]
fn test_detail_examples_verbatim() {
    let detail = extract_detail(&fixture("button.html"));
    assert_eq!(detail.examples.len(), 1);

    let example = &detail.examples[0];
    assert!(example.starts_with("import { Button, Space } from 'antd';\n\nconst App = () => ("));
    assert!(example.contains("\n    <Button type=\"primary\">Primary Button</Button>\n"));
}

#[test]
fn test_detail_props_flat() {
    let detail = extract_detail(&fixture("button.html"));
    let names: Vec<_> = detail.props_flat.iter().map(|p| p.name.as_deref().unwrap_or_default()).collect();
    assert_eq!(names, vec!["block", "danger", "htmlType", "支持原生 button 的其他所有属性。"]);

    let danger = &detail.props_flat[1];
    assert_eq!(danger.r#type.as_deref(), Some("boolean"));
    assert_eq!(danger.default.as_deref(), Some("false"));
    assert_eq!(danger.version.as_deref(), Some("4.0"));

    let html_type = &detail.props_flat[2];
    assert_eq!(html_type.raw.get("属性"), Some("htmlType\nstring"));
    assert_eq!(html_type.default.as_deref(), Some("button"));

    let spanning = &detail.props_flat[3];
    assert!(matches!(spanning.raw, RowRecord::Sequence(ref cells) if cells.len() == 1));
}

#[test]
fn test_detail_raw_matches_table_rows() {
    let detail = extract_detail(&fixture("form_item.html"));
    let rows: Vec<_> = detail.props.iter().flat_map(|t| t.rows.iter()).collect();
    assert_eq!(rows.len(), detail.props_flat.len());
    for (row, normalized) in rows.iter().zip(&detail.props_flat) {
        assert_eq!(*row, &normalized.raw);
    }
}

#[test]
fn test_detail_required_tri_state() {
    let detail = extract_detail(&fixture("form_item.html"));
    let required: Vec<_> = detail.props_flat.iter().map(|p| p.required).collect();
    assert_eq!(required, vec![Some(true), Some(false), None, None]);
}

#[test]
fn test_detail_api_table_and_passthrough() {
    let detail = extract_detail(&fixture("form_item.html"));
    assert_eq!(detail.table_summary, TableSummary { props: 2, events: 0, methods: 1, other: 0 });

    let value = serde_json::to_value(&detail.props_flat[0]).unwrap();
    assert_eq!(value["name"], "name");
    assert_eq!(value["type"], "NamePath");
    assert_eq!(value["全局配置"], "-");
    assert_eq!(value["required"], true);

    let api_row = serde_json::to_value(&detail.props_flat[3]).unwrap();
    assert_eq!(
        api_row,
        json!({
            "raw": {"API": "colon", "类型": "boolean", "默认": "true"},
            "type": "boolean",
            "default": "true",
            "API": "colon"
        })
    );
}

#[test]
fn test_detail_serialized_shape() {
    let value = serde_json::to_value(extract_detail(&fixture("button.html"))).unwrap();
    for key in ["title", "intro", "props", "events", "methods", "other_tables", "table_summary", "examples", "props_flat"] {
        assert!(value.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(value["table_summary"], json!({"props": 1, "events": 1, "methods": 0, "other": 1}));
}

#[test]
fn test_edge_case_empty() {
    let html = fixture("empty_content.html");
    assert!(extract_catalog(&html).is_empty());

    let detail = extract_detail(&html);
    assert!(detail.title.is_none());
    assert!(detail.props.is_empty() && detail.events.is_empty() && detail.methods.is_empty());
    assert!(detail.other_tables.is_empty());
}

#[test]
fn test_edge_case_malformed() {
    let html = "<table><thead><tr><th>参数<th>说明</thead><tbody><tr><td>size<td>大小<tr><td>only";
    let detail = extract_detail(html);
    assert_eq!(detail.props.len(), 1);
    assert_eq!(detail.props[0].rows.len(), 2);
    assert_eq!(detail.props_flat[1].name.as_deref(), Some("only"));
}
