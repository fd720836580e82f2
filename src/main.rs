//! Site-Census main entry point
//!
//! This is the command-line interface for the Site-Census documentation surveyor.

use clap::Parser;
use site_census::config::{load_config, Config};
use site_census::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Census: a documentation site surveyor
///
/// Site-Census crawls a documentation site from one entrypoint, visits each
/// in-scope page once, sorts pages into categories by DOM selector, and
/// keeps a markdown report of the results up to date while it runs.
#[derive(Parser, Debug)]
#[command(name = "site-census")]
#[command(version)]
#[command(about = "A documentation site surveyor", long_about = None)]
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

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(cfg) => {
            tracing::info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_census=info,warn"),
            1 => EnvFilter::new("site_census=debug,info"),
            2 => EnvFilter::new("site_census=trace,debug"),
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

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) {
    println!("=== Site-Census Dry Run ===\n");

    println!("Crawl:");
    println!("  Entrypoint: {}", config.entrypoint);
    println!("  Scope: {}", config.scope_substring());
    println!(
        "  Excluded extensions: {}",
        config.excluded_extensions.join(", ")
    );

    println!("\nRenderer:");
    println!("  Timeout: {}ms", config.renderer.timeout_ms);
    if let Some(agent) = &config.renderer.user_agent {
        println!("  User agent: {}", agent);
    }
    if let Some(suffix) = &config.renderer.title_suffix {
        println!("  Title suffix: {:?}", suffix);
    }

    println!("\nOutput:");
    println!("  Report: {}", config.output.report_path);
    if let Some(titles) = &config.output.titles_path {
        println!("  Titles: {}", titles);
    }

    println!("\nCategories ({}), first match wins:", config.categories.len());
    for rule in &config.categories {
        println!("  - {}: {}", rule.id, rule.selector);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Entrypoint: {}, categories: {}",
        config.entrypoint,
        config.categories.len()
    );

    match crawl(config).await {
        Ok(summary) => {
            tracing::info!(
                "Crawl completed: {} pages visited, {} errors",
                summary.visited,
                summary.errors
            );
            for (name, count) in &summary.buckets {
                tracing::info!("  {}: {}", name, count);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
