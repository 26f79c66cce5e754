//! antdoc-mcp: serve the harvesting tools over stdio.

use std::io::{self, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use antdoc_core::{CachedFetcher, FetchConfig, HarvestConfig, Harvester};
use antdoc_server::{Emitter, ToolServer};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "antdoc-mcp")]
#[command(about = "AntD documentation tool server (JSON-RPC over stdio)", long_about = None)]
#[command(version)]
struct Args {
    /// Process a single JSON-RPC request string, then exit
    #[arg(long, value_name = "REQUEST")]
    once: Option<String>,

    /// Enable debug logging to stderr
    #[arg(long)]
    debug: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Colorize output (ANSI)
    #[arg(long)]
    color: bool,

    /// Page cache directory
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Directory for exports written without a filepath
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "15")]
    timeout: u64,

    /// Pause after each live request, in milliseconds
    #[arg(long, default_value = "500")]
    delay_ms: u64,
}

/// Any non-empty value switches a flag on.
fn env_flag(name: &str) -> bool {
    std::env::var_os(name).is_some_and(|value| !value.is_empty())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let debug = args.debug || env_flag("MCP_DEBUG");
    let emitter = Emitter::new(args.pretty || env_flag("MCP_PRETTY"), args.color || env_flag("MCP_COLOR"));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let mut fetch_config =
        FetchConfig { timeout: args.timeout, delay: Duration::from_millis(args.delay_ms), ..Default::default() };
    if let Some(dir) = args.cache_dir {
        fetch_config.cache_dir = dir;
    }

    let mut builder = HarvestConfig::builder();
    if let Some(dir) = args.export_dir {
        builder = builder.export_dir(dir);
    }

    let fetcher = CachedFetcher::new(fetch_config).context("Failed to build HTTP client")?;
    let mut server = ToolServer::new(Harvester::new(fetcher, builder.build()));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let mut stdout = io::stdout();

    if let Some(request) = args.once {
        tracing::debug!(raw_once = %request, "single request");
        let envelope = runtime.block_on(server.handle_line(&request));
        emitter.emit(&mut stdout, &envelope).context("Failed to write response")?;
        return Ok(());
    }

    server
        .serve(&runtime, BufReader::new(io::stdin()), &mut stdout, &emitter)
        .context("Tool server stopped")?;
    Ok(())
}
