//! # specimen
//!
//! Specimen - live demos and copyable snippets for custom elements.
//!
//! ## Name Origin
//!
//! A **specimen** is a single example put on display so others can study
//! it. Each demo here is exactly that: one live instance of a custom
//! element, pinned down with knobs so every property can be examined, plus
//! the markup to reproduce it.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "specimen")]
#[command(about = "Live demos and snippets for custom elements", long_about = None)]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', short_alias = 'V', long, action = clap::ArgAction::Version)]
    version: (),

    /// Path to custom-elements.json (overrides the config file)
    #[arg(short, long, global = true)]
    manifest: Option<PathBuf>,

    /// Config file path (default: ./specimen.config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Only expose these tags (comma separated)
    #[arg(long, global = true)]
    only: Option<String>,

    /// Print debug logs to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the custom elements of the manifest
    Elements(commands::elements::ElementsArgs),

    /// Show the API documentation of an element
    Docs(commands::docs::DocsArgs),

    /// Show the knobs, slots and CSS custom properties of an element
    Knobs(commands::knobs::KnobsArgs),

    /// Render an element with knob values and print its snippet
    Snippet(commands::snippet::SnippetArgs),
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SPECIMEN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load_config(cli.config.as_deref());
    let ctx = commands::Context::new(config, cli.manifest, cli.only);

    let result = match cli.command {
        Commands::Elements(args) => commands::elements::run(&ctx, args),
        Commands::Docs(args) => commands::docs::run(&ctx, args),
        Commands::Knobs(args) => commands::knobs::run(&ctx, args),
        Commands::Snippet(args) => commands::snippet::run(&ctx, args),
    };

    if let Err(e) = result {
        eprintln!("\x1b[31mError:\x1b[0m {}", e);
        std::process::exit(1);
    }
}
