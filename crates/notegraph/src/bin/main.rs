//! notegraph CLI

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use notegraph::prelude::{AnalysisConfig, ExportFormat};
use notegraph::{Analysis, analyze, load_config};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Link graph analysis for exported Evernote notebooks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (YAML, TOML or JSON)
    #[arg(short, long, global = true, env = "NOTEGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a notebook export and write the result
    Analyze(AnalyzeArgs),
    /// Print the effective configuration as YAML
    Config,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Notebook directory or .zip archive
    input: PathBuf,

    /// Keep links to notes outside the table of contents
    #[arg(long)]
    include_external: bool,

    /// Render only the component around the first note whose title contains this text
    #[arg(short, long)]
    query: Option<String>,

    /// Output file (default depends on --format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "html")]
    format: FormatArg,

    /// Number of top-ranked notes to print
    #[arg(long, default_value = "10")]
    top: usize,

    /// Abort on the first note that cannot be read or parsed
    #[arg(long)]
    fail_fast: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Html,
    Json,
    Csv,
}

impl FormatArg {
    fn export_format(self) -> ExportFormat {
        match self {
            FormatArg::Html => ExportFormat::Html,
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }

    fn default_output(self) -> &'static str {
        match self {
            FormatArg::Html => "notegraph.html",
            FormatArg::Json => "notegraph.json",
            FormatArg::Csv => "notegraph.csv",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Config => {
            print!("{}", config.to_yaml()?);
            Ok(())
        }
        Command::Analyze(args) => {
            apply_flags(&mut config, &args);
            run_analyze(&args, &config)
        }
    }
}

fn init_logging(verbose: bool, format: LogFormat) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn apply_flags(config: &mut AnalysisConfig, args: &AnalyzeArgs) {
    if args.include_external {
        config.restrict = false;
    }
    if args.fail_fast {
        config.fail_fast = true;
    }
    if let Some(query) = &args.query {
        config.query = Some(query.clone());
    }
}

fn run_analyze(args: &AnalyzeArgs, config: &AnalysisConfig) -> Result<()> {
    log::info!("notegraph v{}", env!("CARGO_PKG_VERSION"));

    let analysis = analyze(&args.input, config)
        .with_context(|| format!("Failed to analyze {}", args.input.display()))?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(args.format.default_output()));
    let rendered = analysis.export(args.format.export_format(), &config.render)?;
    write_output(&output, &rendered)?;

    print_summary(&analysis, args.top);
    println!("Wrote {}", output.display());
    Ok(())
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn print_summary(analysis: &Analysis, top: usize) {
    let stats = analysis.graph.stats();
    println!(
        "{} notes ({} discovered), {} links, {} isolated, {} components",
        stats.total_notes,
        analysis.database.index.discovered_count(),
        stats.total_links,
        stats.isolated_notes,
        stats.components
    );

    if let Some(query) = &analysis.query {
        match query.target() {
            Some(target) => {
                let title = analysis
                    .database
                    .index
                    .title(target.as_str())
                    .map(|t| t.to_string())
                    .unwrap_or_default();
                println!(
                    "Query '{}' matched '{}': showing {} notes",
                    query.query,
                    title,
                    analysis.displayed_graph().node_count()
                );
            }
            None => println!("Query '{}': nothing found, showing the full graph", query.query),
        }
    }

    if top > 0 {
        println!("Top notes:");
        for note in analysis.ranked_notes().iter().take(top) {
            println!("{:>4}. {:.5}  {}", note.rank, note.score, note.title);
        }
    }

    if !analysis.unlisted_files.is_empty() {
        println!(
            "{} note files are not in the table of contents:",
            analysis.unlisted_files.len()
        );
        for path in &analysis.unlisted_files {
            println!("  {}", path.display());
        }
    }

    let warnings = &analysis.database.warnings;
    if !warnings.is_empty() {
        println!("{} notes skipped:", warnings.len());
        for warning in warnings {
            println!("  {}", warning);
        }
    }
}
