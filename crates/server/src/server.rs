//! Tool server implementation

use std::io::{BufRead, Write};

use antdoc_core::{ComponentDetail, ComponentSummary, ExportOptions, Harvester, PageSource};
use serde_json::{Value, json};
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

use crate::cache::LookupCache;
use crate::error::ToolError;
use crate::output::Emitter;
use crate::protocol::{Envelope, JsonRpcRequest, ToolListResponse};
use crate::tools::{self, ComponentArgs, ExportArgs, ListArgs, MISSING_NAME, PropsResult, SearchArgs, Tool};

/// Dispatches JSON-RPC requests to the harvesting tools.
///
/// Owns the [`Harvester`] and a [`LookupCache`], so repeated lookups within a
/// session are answered from memory until a call passes `force`.
pub struct ToolServer<S> {
    harvester: Harvester<S>,
    cache: LookupCache,
}

impl<S: PageSource> ToolServer<S> {
    pub fn new(harvester: Harvester<S>) -> Self {
        Self { harvester, cache: LookupCache::new() }
    }

    pub fn harvester(&self) -> &Harvester<S> {
        &self.harvester
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    /// Handles one raw request line. Never fails: problems become error envelopes.
    pub async fn handle_line(&mut self, line: &str) -> Envelope {
        match JsonRpcRequest::from_line(line) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                Envelope::error(Value::Null, &e)
            }
        }
    }

    /// Handle a JSON-RPC request
    pub async fn handle_request(&mut self, request: JsonRpcRequest) -> Envelope {
        let id = request.id;

        match request.method.as_str() {
            Some("tools/list") => {
                let response = ToolListResponse { tools: tools::definitions() };
                match serde_json::to_value(response) {
                    Ok(result) => Envelope::result(id, result),
                    Err(e) => Envelope::error(id, &ToolError::from(e)),
                }
            }
            Some("tools/call") => self.handle_tool_call(id, request.params).await,
            Some(other) => Envelope::error(id, &ToolError::MethodNotFound(other.to_string())),
            None => Envelope::error(id, &ToolError::MethodNotFound(request.method.to_string())),
        }
    }

    async fn handle_tool_call(&mut self, id: Value, params: Value) -> Envelope {
        let name = params.get("name").and_then(Value::as_str);
        let Some(tool) = name.and_then(Tool::from_name) else {
            return Envelope::error(id, &ToolError::ToolNotFound(name.unwrap_or("null").to_string()));
        };

        let arguments = match params.get("arguments") {
            None | Some(Value::Null) => json!({}),
            Some(arguments) => arguments.clone(),
        };

        match self.call_tool(tool, arguments).await {
            Ok(content) => Envelope::result(id, json!({ "content": content })),
            Err(e) => {
                warn!(tool = tool.name(), error = %e, "tool call failed");
                Envelope::error(id, &e)
            }
        }
    }

    /// Runs one tool and returns its `content` value.
    ///
    /// Lookup misses and a missing component name are ordinary results
    /// carrying an `error` field, not errors.
    pub async fn call_tool(&mut self, tool: Tool, arguments: Value) -> Result<Value, ToolError> {
        match tool {
            Tool::ListComponents => {
                let args: ListArgs = serde_json::from_value(arguments)?;
                let catalog = self.catalog(args.force.unwrap_or(false)).await?;
                Ok(serde_json::to_value(catalog)?)
            }
            Tool::GetComponent => {
                let args: ComponentArgs = serde_json::from_value(arguments)?;
                let Some(name) = args.name() else {
                    return Ok(json!({ "error": MISSING_NAME }));
                };
                match self.component(name, args.force.unwrap_or(false)).await? {
                    Some(detail) => Ok(serde_json::to_value(detail)?),
                    None => Ok(not_found(name)),
                }
            }
            Tool::SearchComponents => {
                let args: SearchArgs = serde_json::from_value(arguments)?;
                let query = args.query.to_lowercase();
                let hits: Vec<&ComponentSummary> =
                    self.catalog(false).await?.iter().filter(|summary| search_hit(summary, &query)).collect();
                Ok(serde_json::to_value(hits)?)
            }
            Tool::ExportAll => {
                let args: ExportArgs = serde_json::from_value(arguments)?;
                let options = ExportOptions {
                    force: args.force.unwrap_or(false),
                    destination: args.filepath,
                    validate: args.validate.unwrap_or(true),
                };
                let summary = self.harvester.export_all(options).await?;
                Ok(serde_json::to_value(summary)?)
            }
            Tool::GetComponentProps => {
                let args: ComponentArgs = serde_json::from_value(arguments)?;
                let Some(name) = args.name() else {
                    return Ok(json!({ "error": MISSING_NAME }));
                };
                match self.component(name, args.force.unwrap_or(false)).await? {
                    Some(detail) => Ok(serde_json::to_value(PropsResult::new(name, detail.props_flat))?),
                    None => Ok(not_found(name)),
                }
            }
        }
    }

    /// The cached catalog, fetched on first use or when `force` is set.
    ///
    /// A forced refresh drops every cached detail along with the old catalog.
    async fn catalog(&mut self, force: bool) -> Result<&[ComponentSummary], ToolError> {
        if force {
            debug!(details = self.cache.detail_count(), "clearing lookup cache");
            self.cache.clear();
        }
        if self.cache.catalog().is_none() {
            let catalog = self.harvester.catalog(force).await?;
            debug!(components = catalog.len(), "catalog cached");
            self.cache.set_catalog(catalog);
        }
        Ok(self.cache.catalog().unwrap_or_default())
    }

    /// Resolves `name` through the catalog and returns its detail record,
    /// or `None` when no catalog entry matches.
    async fn component(&mut self, name: &str, force: bool) -> Result<Option<ComponentDetail>, ToolError> {
        self.catalog(force).await?;
        let Some(summary) = self.cache.find(name).cloned() else {
            return Ok(None);
        };

        if force || self.cache.detail(&summary.url).is_none() {
            let detail = self.harvester.summary_detail(&summary, force).await?;
            self.cache.insert_detail(summary.url.clone(), detail);
        }
        Ok(self.cache.detail(&summary.url).cloned())
    }

    /// Reads newline-delimited requests until EOF, writing one response per request.
    ///
    /// Blank lines are skipped. Only transport failures end the loop early.
    /// A line that is not UTF-8 gets a parse error like any other unreadable
    /// request.
    pub fn serve<R: BufRead, W: Write>(
        &mut self, runtime: &Runtime, mut reader: R, writer: &mut W, emitter: &Emitter,
    ) -> Result<(), ToolError> {
        info!("tool server started");

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let envelope = match std::str::from_utf8(&buf) {
                Ok(line) => {
                    debug!(raw_line = ?line, "received");
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    runtime.block_on(self.handle_line(line))
                }
                Err(e) => {
                    error!("Failed to decode request: {}", e);
                    Envelope::error(Value::Null, &ToolError::Parse(e.to_string()))
                }
            };
            emitter.emit(writer, &envelope)?;
        }

        info!("tool server stopped");
        Ok(())
    }
}

fn not_found(name: &str) -> Value {
    json!({ "error": format!("Component {name} not found") })
}

fn search_hit(summary: &ComponentSummary, query: &str) -> bool {
    [&summary.name, &summary.display_name, &summary.description]
        .into_iter()
        .any(|field| field.to_lowercase().contains(query))
}
