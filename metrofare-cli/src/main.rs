use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use metrofare_ingest::{FileYearResolver, is_revenue_line, parse_revenue_line};
use metrofare_revenue::{extract_loaded, load_documents, write_revenue_csv};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

mod config;
mod report;

use config::{Config, DEFAULT_CONFIG_PATH, init_config, load_config};

#[derive(Parser, Debug)]
#[command(name = "metrofare", version, about = "Monthly fare revenue extraction from report text")]
struct Cli {
    /// Config file (defaults to ./metrofare.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the revenue table from a directory of report text files
    Extract {
        /// Directory of extracted report text
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output CSV path
        #[arg(long)]
        output: Option<PathBuf>,

        /// File extension to read (without the dot)
        #[arg(long)]
        extension: Option<String>,

        /// Process files in parallel (output is identical)
        #[arg(long)]
        parallel: bool,

        /// Also write diagnostics as JSON to this path
        #[arg(long)]
        diagnostics: Option<PathBuf>,
    },

    /// Print the fiscal starting year encoded in a file name
    ResolveYear { file_name: String },

    /// Classify and parse a single line
    ParseLine {
        /// Calendar year in which the report's fiscal year starts
        #[arg(long)]
        start_year: i32,

        line: String,
    },

    /// Config file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file (never overwrites)
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    match cli.command {
        Command::Extract {
            input,
            output,
            extension,
            parallel,
            diagnostics,
        } => {
            let mut cfg = load_config(&config_path)?;
            apply_overrides(&mut cfg, input, output, extension, parallel);
            run_extract(&cfg, diagnostics)?;
        }

        Command::ResolveYear { file_name } => {
            let resolver = FileYearResolver::new()?;
            match resolver.starting_year(&file_name) {
                Some(year) => println!("{file_name}: fiscal year starts {year}"),
                None => println!("{file_name}: no four-digit year; file would be skipped"),
            }
        }

        Command::ParseLine { start_year, line } => {
            if !is_revenue_line(&line) {
                println!("not a revenue row");
                return Ok(());
            }
            match parse_revenue_line(&line, start_year) {
                Ok(r) => {
                    let row = metrofare_core::RevenueRow::from(&r.enriched());
                    println!("{}", serde_json::to_string_pretty(&row)?);
                }
                Err(e) => println!("rejected: {e}"),
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config(&config_path)?,
            ConfigCommand::Show => {
                let cfg = load_config(&config_path)?;
                println!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// Command-line flags win over the config file.
fn apply_overrides(
    cfg: &mut Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    extension: Option<String>,
    parallel: bool,
) {
    if let Some(dir) = input {
        cfg.input.dir = dir;
    }
    if let Some(path) = output {
        cfg.output.path = path;
    }
    if let Some(ext) = extension {
        cfg.input.extension = ext;
    }
    cfg.run.parallel |= parallel;
}

fn run_extract(cfg: &Config, diagnostics_path: Option<PathBuf>) -> Result<()> {
    let dir = &cfg.input.dir;
    if !dir.is_dir() {
        bail!("input directory not found: {} (pass --input <dir>)", dir.display());
    }
    let delimiter = cfg.output.delimiter_byte()?;

    let loaded = load_documents(dir, &cfg.input.extension, cfg.input.page_separator)
        .with_context(|| format!("loading reports from {}", dir.display()))?;
    if loaded.documents.is_empty() && loaded.undecodable == 0 {
        tracing::warn!(dir = %dir.display(), ext = %cfg.input.extension, "no input files");
    }

    let out = extract_loaded(loaded, cfg.run.parallel).context("extracting revenue table")?;

    write_revenue_csv(&cfg.output.path, &out.table, delimiter)?;
    if let Some(p) = diagnostics_path {
        report::write_diagnostics_json(&p, &out.diagnostics)?;
    }

    println!("{}", report::summary(&out, &cfg.output.path));
    Ok(())
}
