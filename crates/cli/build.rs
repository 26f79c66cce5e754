use std::{env, fs, path::PathBuf};

use clap::{Arg, Command, arg, value_parser};

fn force() -> Arg {
    arg!(--force "Refetch instead of reading the page cache")
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = Command::new("antdoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Harvest Ant Design component documentation as JSON")
        .subcommand_required(true)
        .arg(
            arg!(--"cache-dir" <DIR> "Page cache directory")
                .global(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(arg!(--"base-url" <URL> "Documentation site origin").global(true))
        .arg(arg!(--timeout <SECS> "HTTP timeout in seconds").global(true).default_value("15"))
        .arg(arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests").global(true))
        .arg(arg!(--"delay-ms" <MS> "Pause after each live request, in milliseconds").global(true).default_value("500"))
        .arg(arg!(--pretty "Pretty-print JSON output").global(true))
        .arg(arg!(-v --verbose "Print progress to stderr").global(true))
        .subcommand(Command::new("list").about("List components from the overview page").arg(force()))
        .subcommand(
            Command::new("show")
                .about("Show the parsed documentation of one component")
                .arg(arg!(<NAME> "Component name, case-insensitive"))
                .arg(force())
                .arg(arg!(--props "Only print the flattened property rows")),
        )
        .subcommand(
            Command::new("search")
                .about("Search components by name, label or description")
                .arg(arg!(<QUERY> "Case-insensitive substring")),
        )
        .subcommand(
            Command::new("export")
                .about("Harvest every component page into one JSON file")
                .arg(arg!(-o --output <FILE> "Output file").value_parser(value_parser!(PathBuf)))
                .arg(force())
                .arg(arg!(--"keep-errors" "Keep entries for pages that failed")),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse markup from a URL, a local file, or '-' for stdin, bypassing the cache")
                .arg(arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
                .arg(arg!(--overview "Treat the input as the overview page and print the catalog")),
        );

    for shell in [
        clap_complete::Shell::Bash,
        clap_complete::Shell::Zsh,
        clap_complete::Shell::Fish,
        clap_complete::Shell::PowerShell,
    ] {
        clap_complete::generate_to(shell, &mut cmd, "antdoc", &completions_dir).unwrap();
    }

    println!("cargo:warning=Shell completions generated in: {}", completions_dir.display());
}
