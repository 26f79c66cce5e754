use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use antdoc_core::{
    CachedFetcher, ComponentSummary, ExportOptions, FetchConfig, HarvestConfig, Harvester, SiteConfig,
    extract_catalog_with, extract_detail, fetch_file, fetch_stdin,
};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use serde_json::json;
use url::Url;

mod echo;

use echo::{format_size, print_banner, print_field, print_info, print_step, print_success, print_timing, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Harvest structured metadata from the Ant Design component documentation
#[derive(Parser, Debug)]
#[command(name = "antdoc")]
#[command(version)]
#[command(about = "Harvest Ant Design component documentation as JSON", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Page cache directory
    #[arg(long, global = true, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Documentation site origin
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<Url>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value = "15", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, global = true, value_name = "UA")]
    user_agent: Option<String>,

    /// Pause after each live request, in milliseconds
    #[arg(long, global = true, default_value = "500", value_name = "MS")]
    delay_ms: u64,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Print progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List components from the overview page
    List {
        /// Refetch instead of reading the page cache
        #[arg(long)]
        force: bool,
    },
    /// Show the parsed documentation of one component
    Show {
        /// Component name, case-insensitive (e.g. "button")
        name: String,
        #[arg(long)]
        force: bool,
        /// Only print the flattened property rows
        #[arg(long)]
        props: bool,
    },
    /// Search components by name, label or description
    Search { query: String },
    /// Harvest every component page into one JSON file
    Export {
        /// Output file (default: platform data directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        #[arg(long)]
        force: bool,
        /// Keep `{name, error}` entries for pages that failed
        #[arg(long)]
        keep_errors: bool,
    },
    /// Parse markup from a URL, a local file, or "-" for stdin, bypassing the cache
    Parse {
        #[arg(value_name = "INPUT")]
        input: String,
        /// Treat the input as the overview page and print the catalog
        #[arg(long)]
        overview: bool,
    },
}

impl Args {
    fn fetch_config(&self) -> FetchConfig {
        let mut config = FetchConfig {
            timeout: self.timeout,
            delay: Duration::from_millis(self.delay_ms),
            ..Default::default()
        };
        if let Some(dir) = &self.cache_dir {
            config.cache_dir = dir.clone();
        }
        if let Some(agent) = &self.user_agent {
            config.user_agent = agent.clone();
        }
        config
    }

    fn harvest_config(&self) -> HarvestConfig {
        let mut builder = HarvestConfig::builder();
        if let Some(url) = &self.base_url {
            builder = builder.base_url(url.clone());
        }
        builder.build()
    }

    fn harvester(&self) -> anyhow::Result<Harvester<CachedFetcher>> {
        let fetcher = CachedFetcher::new(self.fetch_config()).context("Failed to build HTTP client")?;
        Ok(Harvester::new(fetcher, self.harvest_config()))
    }

    fn print_json<T: serde::Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let text = if self.pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
        println!("{}", text);
        Ok(())
    }
}

async fn find_component(
    harvester: &Harvester<CachedFetcher>, name: &str, force: bool,
) -> anyhow::Result<ComponentSummary> {
    let catalog = harvester.catalog(force).await.context("Failed to load the component catalog")?;
    match catalog.into_iter().find(|summary| summary.matches_name(name)) {
        Some(summary) => Ok(summary),
        None => bail!("Component {} not found", name),
    }
}

async fn read_input(args: &Args, input: &str) -> anyhow::Result<String> {
    if input == "-" {
        if args.verbose {
            print_step(1, 2, "Reading from stdin");
        }
        fetch_stdin().context("Failed to read from stdin")
    } else if input.starts_with("http://") || input.starts_with("https://") {
        if args.verbose {
            print_step(1, 2, &format!("Fetching from {}", input.bright_white().underline()));
        }
        let fetcher = CachedFetcher::new(args.fetch_config()).context("Failed to build HTTP client")?;
        fetcher.fetch_live(input).await.context("Failed to fetch URL")
    } else {
        if args.verbose {
            print_step(1, 2, &format!("Reading from file {}", input.bright_white()));
        }
        fetch_file(input).with_context(|| format!("Failed to read file: {}", input))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        print_banner();
    }

    match &args.command {
        Command::List { force } => {
            let catalog = args.harvester()?.catalog(*force).await.context("Failed to load the component catalog")?;
            if args.verbose {
                print_success(&format!("{} components", catalog.len()));
            }
            args.print_json(&catalog)?;
        }
        Command::Show { name, force, props } => {
            let harvester = args.harvester()?;
            let summary = find_component(&harvester, name, *force).await?;
            if args.verbose {
                print_info(&format!("{} -> {}", summary.display_name, summary.url));
            }

            let detail = harvester
                .summary_detail(&summary, *force)
                .await
                .with_context(|| format!("Failed to load {}", summary.url))?;

            if *props {
                let count = detail.props_flat.len();
                args.print_json(&json!({ "component": name, "props_flat": detail.props_flat, "count": count }))?;
            } else {
                args.print_json(&detail)?;
            }
        }
        Command::Search { query } => {
            let query = query.to_lowercase();
            let catalog = args.harvester()?.catalog(false).await.context("Failed to load the component catalog")?;
            let hits: Vec<_> = catalog
                .iter()
                .filter(|summary| {
                    [&summary.name, &summary.display_name, &summary.description]
                        .into_iter()
                        .any(|field| field.to_lowercase().contains(&query))
                })
                .collect();
            args.print_json(&hits)?;
        }
        Command::Export { output, force, keep_errors } => {
            let harvester = args.harvester()?;
            let started = Instant::now();
            if args.verbose {
                print_step(1, 1, "Harvesting every component page");
            }

            let options = ExportOptions { force: *force, destination: output.clone(), validate: !keep_errors };
            let summary = harvester.export_all(options).await.context("Export failed")?;

            if args.verbose {
                print_field("Components", &summary.count.to_string());
                print_timing("Elapsed", started.elapsed());
            }
            if summary.error_count > 0 {
                print_warning(&format!("{} component pages failed", summary.error_count));
            }
            print_success(&format!("Export written to {}", summary.path.display().bright_white()));
            args.print_json(&summary)?;
        }
        Command::Parse { input, overview } => {
            let markup = read_input(&args, input).await?;
            if args.verbose {
                print_field("Size", &format_size(markup.len()));
                print_step(2, 2, if *overview { "Extracting catalog" } else { "Extracting detail" });
            }

            if *overview {
                let site = args.base_url.clone().map_or_else(SiteConfig::default, |base_url| SiteConfig {
                    base_url,
                    ..Default::default()
                });
                args.print_json(&extract_catalog_with(&markup, &site))?;
            } else {
                args.print_json(&extract_detail(&markup))?;
            }
        }
    }

    Ok(())
}
