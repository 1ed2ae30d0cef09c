//! Breakpoint Crawler main entry point
//!
//! This is the command-line interface for the breadth-limited crawler.

use anyhow::{bail, Context};
use breakpoint_crawler::config::{load_config, validate_seeds, Config, CrawlMode};
use breakpoint_crawler::crawler::run_crawl;
use breakpoint_crawler::output::{print_statistics, write_json};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Breakpoint Crawler: a breadth-limited web crawler
///
/// Fetches each seed URL, summarizes it (title and meta description), and
/// follows the links it finds level by level, up to the given depth. The
/// summaries are printed as a JSON array.
#[derive(Parser, Debug)]
#[command(name = "breakpoint-crawler")]
#[command(version)]
#[command(about = "A breadth-limited web crawler", long_about = None)]
struct Cli {
    /// Seed URLs (added after any seeds from the config file)
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of link levels to follow beyond the seeds
    #[arg(short, long)]
    depth: Option<u32>,

    /// How each level is drained
    #[arg(short, long, value_enum)]
    mode: Option<CrawlMode>,

    /// Worker count for concurrent mode (default: available parallelism)
    #[arg(short = 'w', long, value_parser = clap::value_parser!(u16).range(1..))]
    concurrency: Option<u16>,

    /// Write JSON to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Print crawl statistics to stderr when done
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    if config.seeds.is_empty() {
        bail!("No seed URLs given; pass them as arguments or list them in the config file");
    }

    tracing::info!(
        "Crawling {} seed URL(s), depth {}, {} mode",
        config.seeds.len(),
        config.crawler.depth,
        config.crawler.mode
    );

    let report = run_crawl(&config).await.context("Crawl failed")?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_json(&mut BufWriter::new(file), &report.pages, cli.pretty)?;
            tracing::info!("Wrote {} page(s) to {}", report.pages.len(), path.display());
        }
        None => {
            write_json(&mut std::io::stdout().lock(), &report.pages, cli.pretty)?;
        }
    }

    if cli.stats {
        print_statistics(&report.stats);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so that JSON on stdout stays machine-readable.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("breakpoint_crawler=info,warn"),
            1 => EnvFilter::new("breakpoint_crawler=debug,info"),
            2 => EnvFilter::new("breakpoint_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file, if any, and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    validate_seeds(&cli.urls).context("Invalid seed URL on the command line")?;
    config.seeds.extend(cli.urls.iter().cloned());

    if let Some(depth) = cli.depth {
        config.crawler.depth = depth;
    }
    if let Some(mode) = cli.mode {
        config.crawler.mode = mode;
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawler.concurrency = Some(usize::from(concurrency));
    }

    Ok(config)
}
