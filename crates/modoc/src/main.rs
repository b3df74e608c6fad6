//! modoc CLI entry point
//!
//! Renders a module snapshot into Markdown reference documentation:
//!
//! - `markdown compact <PATH>` - compact Markdown document
//! - `render --format <NAME> <PATH>` - any registered format
//! - `formats` - list registered formats
//!
//! Settings are layered: built-in defaults, then `.modoc.yml` (or
//! `--config`), then command-line flags.

mod cli;
mod config;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use modoc_render::FormatTable;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, MarkdownCommands, RenderArgs, MARKDOWN_COMPACT};
use crate::config::{load_module, Config};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never mix with a document printed to stdout.
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let table = FormatTable::builtin();
    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    let config = Config::load(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::Formats => {
            let mut stdout = io::stdout().lock();
            for name in table.names() {
                writeln!(stdout, "{}", name)?;
            }
            Ok(())
        }
        Commands::Markdown {
            command: MarkdownCommands::Compact(args),
        } => render(&table, MARKDOWN_COMPACT, &config, &args),
        Commands::Render { format, args } => {
            let name = format
                .or_else(|| config.formatter.clone())
                .unwrap_or_else(|| MARKDOWN_COMPACT.to_string());
            render(&table, &name, &config, &args)
        }
    }
}

fn render(table: &FormatTable, format: &str, config: &Config, args: &RenderArgs) -> Result<()> {
    let settings = args.apply(config.settings.clone());
    tracing::debug!(format, ?settings, "rendering");

    let module = load_module(&args.path)?;
    let printer = table.get(format, &settings)?;
    let document = printer
        .print(&module, &settings)
        .with_context(|| format!("failed to render {}", args.path.display()))?;

    match args.output_file.as_ref().or(config.output_file.as_ref()) {
        Some(path) => write_file(path, &document),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(with_final_newline(&document).as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn write_file(path: &Path, document: &str) -> Result<()> {
    fs::write(path, with_final_newline(document))
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

/// Documents end with exactly one newline; an empty document stays empty.
fn with_final_newline(document: &str) -> String {
    if document.is_empty() || document.ends_with('\n') {
        document.to_string()
    } else {
        format!("{}\n", document)
    }
}
