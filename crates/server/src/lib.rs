//! JSON-RPC tool server over the Ant Design documentation harvester.
//!
//! Requests arrive one per line; each yields exactly one response envelope.
//! Tool failures are reported in-band and never stop the loop.

pub mod cache;
pub mod error;
pub mod output;
pub mod protocol;
pub mod server;
pub mod tools;

pub use cache::LookupCache;
pub use error::ToolError;
pub use output::Emitter;
pub use protocol::{Envelope, JsonRpcRequest, ToolDefinition};
pub use server::ToolServer;
pub use tools::Tool;
