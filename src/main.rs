//! Fairway-Scout main entry point
//!
//! This is the command-line interface for the Fairway-Scout golf event
//! scraper.

use clap::Parser;
use std::path::PathBuf;

use fairway_scout::config::{load_config, ScrapeOptions};
use fairway_scout::output::{write_results, write_summary};
use fairway_scout::scraper::Scraper;
use tracing_subscriber::EnvFilter;

/// Fairway-Scout: a golf course event scraper
///
/// Fairway-Scout fetches the configured courses' public pages, extracts
/// program/event candidates from their text, and writes the deduplicated
/// results as JSON plus an optional plain-text summary.
#[derive(Parser, Debug)]
#[command(name = "fairway-scout")]
#[command(version)]
#[command(about = "A golf course event scraper", long_about = None)]
struct Cli {
    /// Path to the JSON course configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Output JSON path (default: out/events-YYYYMMDD.json)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Also write a plain-text summary to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Maximum number of concurrent course jobs
    #[arg(long, default_value_t = 8)]
    concurrency: usize,

    /// Disable the HTTP response cache
    #[arg(long)]
    no_cache: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 15)]
    timeout: u64,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and normalize configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let courses = match load_config(&cli.config) {
        Ok(courses) => {
            tracing::info!("Configuration loaded: {} courses", courses.len());
            courses
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let options = ScrapeOptions {
        concurrency: cli.concurrency,
        enable_cache: !cli.no_cache,
        timeout_secs: cli.timeout,
    };

    if cli.dry_run {
        handle_dry_run(&courses, &options);
        return Ok(());
    }

    let scraper = Scraper::new(courses, &options)?;
    let result = scraper.run().await;

    let out_path = cli.out.unwrap_or_else(default_out_path);
    write_results(&result, &out_path)?;
    println!(
        "Wrote {} events ({} errors) to {}",
        result.events.len(),
        result.errors.len(),
        out_path.display()
    );

    if let Some(summary_path) = &cli.summary {
        write_summary(&result, summary_path)?;
        println!("Wrote summary to {}", summary_path.display());
    }

    Ok(())
}

/// Default output path: out/events-YYYYMMDD.json
fn default_out_path() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d");
    PathBuf::from(format!("out/events-{stamp}.json"))
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fairway_scout=info,warn"),
            1 => EnvFilter::new("fairway_scout=debug,info"),
            2 => EnvFilter::new("fairway_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be scraped
fn handle_dry_run(courses: &[fairway_scout::Course], options: &ScrapeOptions) {
    println!("=== Fairway-Scout Dry Run ===\n");

    println!("Options:");
    println!("  Concurrency: {}", options.concurrency);
    println!("  Cache: {}", if options.enable_cache { "on" } else { "off" });
    println!("  Timeout: {}s", options.timeout_secs);

    println!("\nCourses ({}):", courses.len());
    for course in courses {
        println!(
            "  - {} [{}] ({} URLs)",
            course.name,
            course.parser,
            course.urls.len()
        );
        for url in &course.urls {
            println!("    * {}", url);
        }
    }

    let url_count: usize = courses.iter().map(|c| c.urls.len()).sum();
    println!("\n✓ Configuration is valid");
    println!("✓ Would scrape {url_count} URLs across {} courses", courses.len());
}
