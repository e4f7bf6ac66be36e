//! Cardex main entry point
//!
//! This is the command-line interface for the cardex card-catalog scraper.

use cardex::config::load_config_with_hash;
use cardex::crawler::CrawlTarget;
use cardex::output::print_run_summary;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Cardex: an incremental card-catalog scraper
///
/// Cardex walks the configured tier and event index pages of a card
/// catalog, scrapes every detail page it has not stored yet, and upserts
/// the results into SQLite keyed by URL. Re-running resumes past whatever
/// is already stored.
#[derive(Parser, Debug)]
#[command(name = "cardex")]
#[command(version = "1.0.0")]
#[command(about = "An incremental card-catalog scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without scraping
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,

    /// Exit after the run instead of serving the keep-alive route
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config, cli.once).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cardex=info,warn"),
            1 => EnvFilter::new("cardex=debug,info"),
            2 => EnvFilter::new("cardex=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the target plan
fn handle_dry_run(config: &cardex::config::Config) {
    println!("=== Cardex Dry Run ===\n");

    println!("Site:");
    println!("  Origin: {}", config.site.origin);

    println!("\nCrawler:");
    println!("  Max attempts per card: {}", config.crawler.max_attempts);
    println!("  Record delay: {}ms", config.crawler.record_delay_ms);
    println!("  Page delay: {}ms", config.crawler.page_delay_ms);
    println!(
        "  Navigation timeout: {}s",
        config.crawler.navigation_timeout_secs
    );

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    let targets = CrawlTarget::from_config(config);
    println!("\nTargets ({}):", targets.len());
    let mut total_pages = 0u64;
    for target in &targets {
        let pages = target.pages();
        total_pages += u64::from(pages.end() - pages.start() + 1);
        println!(
            "  - {} pages {}..={}  e.g. {}",
            target.describe(),
            pages.start(),
            pages.end(),
            target.index_url(&config.site.origin, *pages.start())
        );
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would scrape {} index pages", total_pages);
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &cardex::config::Config) -> anyhow::Result<()> {
    use cardex::output::{load_statistics, print_statistics};
    use cardex::storage::open_storage;
    use std::path::Path;

    println!("Database: {}\n", config.output.database_path);

    // Open the database
    let storage = open_storage(Path::new(&config.output.database_path))?;

    // Load statistics
    let stats = load_statistics(&storage)?;

    // Print statistics
    print_statistics(&stats);

    Ok(())
}

/// Handles the main scrape operation
async fn handle_crawl(config: cardex::config::Config, once: bool) -> anyhow::Result<()> {
    // Bind the liveness route before anything else so the deployment host
    // sees the process as soon as it is up. A bind failure is fatal.
    let server = if once {
        None
    } else {
        Some(cardex::server::spawn_keepalive(config.server.port).await?)
    };

    match cardex::crawler::crawl(config).await {
        Ok(stats) => {
            print_run_summary(&stats);
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            return Err(e.into());
        }
    }

    if let Some(handle) = server {
        tracing::info!("run complete, keep-alive server still up");
        handle.await?;
    }

    Ok(())
}
