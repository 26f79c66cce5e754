//! Tool catalogue and call arguments.

use std::path::PathBuf;

use antdoc_core::NormalizedPropertyRow;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::protocol::ToolDefinition;

/// Message returned when a component tool is called without a name.
pub const MISSING_NAME: &str = "Component name not provided in arguments";

/// The operations served over `tools/call`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    ListComponents,
    GetComponent,
    SearchComponents,
    ExportAll,
    GetComponentProps,
}

impl Tool {
    /// Every tool, in the order `tools/list` reports them.
    pub const ALL: [Tool; 5] =
        [Tool::ListComponents, Tool::GetComponent, Tool::SearchComponents, Tool::ExportAll, Tool::GetComponentProps];

    pub fn name(self) -> &'static str {
        match self {
            Tool::ListComponents => "list_components",
            Tool::GetComponent => "get_component",
            Tool::SearchComponents => "search_components",
            Tool::ExportAll => "export_all",
            Tool::GetComponentProps => "get_component_props",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::ListComponents => "List AntD components from overview page",
            Tool::GetComponent => "Get detailed info for a component by name",
            Tool::SearchComponents => "Search components by case-insensitive substring in name, display name or description",
            Tool::ExportAll => "Fetch all component pages and persist structured JSON locally",
            Tool::GetComponentProps => "Return flattened props list (props_flat) for a given component",
        }
    }

    pub fn definition(self) -> ToolDefinition {
        let input_schema = match self {
            Tool::ListComponents => json!({
                "type": "object",
                "properties": {"force": {"type": "boolean"}},
                "required": []
            }),
            Tool::GetComponent | Tool::GetComponentProps => json!({
                "type": "object",
                "properties": {"name": {"type": "string"}, "force": {"type": "boolean"}},
                "required": ["name"]
            }),
            Tool::SearchComponents => json!({
                "type": "object",
                "properties": {"query": {"type": "string"}},
                "required": ["query"]
            }),
            Tool::ExportAll => json!({
                "type": "object",
                "properties": {
                    "force": {"type": "boolean"},
                    "filepath": {"type": "string"},
                    "validate": {"type": "boolean", "description": "Drop failed entries before writing (default: true)"}
                },
                "required": []
            }),
        };

        ToolDefinition { name: self.name().to_string(), description: self.description().to_string(), input_schema }
    }
}

/// Definitions for every tool.
pub fn definitions() -> Vec<ToolDefinition> {
    Tool::ALL.into_iter().map(Tool::definition).collect()
}

/// Arguments of `list_components`.
#[derive(Debug, Default, Deserialize)]
pub struct ListArgs {
    #[serde(default)]
    pub force: Option<bool>,
}

/// Arguments of `get_component` and `get_component_props`.
#[derive(Debug, Default, Deserialize)]
pub struct ComponentArgs {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub force: Option<bool>,
}

impl ComponentArgs {
    /// The requested name, if one was given and is non-empty.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Arguments of `search_components`; `query` is required.
#[derive(Debug, Deserialize)]
pub struct SearchArgs {
    pub query: String,
}

/// Arguments of `export_all`.
#[derive(Debug, Default, Deserialize)]
pub struct ExportArgs {
    #[serde(default)]
    pub force: Option<bool>,
    #[serde(default)]
    pub filepath: Option<PathBuf>,
    #[serde(default)]
    pub validate: Option<bool>,
}

/// Result of `get_component_props`.
#[derive(Debug, Serialize)]
pub struct PropsResult {
    pub component: String,
    pub props_flat: Vec<NormalizedPropertyRow>,
    pub count: usize,
}

impl PropsResult {
    pub fn new(component: impl Into<String>, props_flat: Vec<NormalizedPropertyRow>) -> Self {
        Self { component: component.into(), count: props_flat.len(), props_flat }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_names_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
        }
        assert_eq!(Tool::from_name("List_Components"), None);
    }

    #[test]
    fn test_definitions_require_names() {
        let defs = definitions();
        assert_eq!(defs.len(), 5);

        let get = defs.iter().find(|d| d.name == "get_component").unwrap();
        assert_eq!(get.input_schema["required"], serde_json::json!(["name"]));

        let list = defs.iter().find(|d| d.name == "list_components").unwrap();
        assert_eq!(list.input_schema["required"], Value::Array(vec![]));
    }

    #[test]
    fn test_search_description_names_every_field() {
        let description = Tool::SearchComponents.description();
        for field in ["name", "display name", "description"] {
            assert!(description.contains(field), "{field}");
        }
    }

    #[test]
    fn test_component_args_tolerate_nulls() {
        let args: ComponentArgs = serde_json::from_str(r#"{"name": null, "force": null}"#).unwrap();
        assert!(args.name().is_none());
        assert!(args.force.is_none());

        let args: ComponentArgs = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert!(args.name().is_none());
    }

    #[test]
    fn test_search_args_require_query() {
        assert!(serde_json::from_str::<SearchArgs>("{}").is_err());
    }
}
