mod cli;

use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use listing_scraper::config::ScraperConfig;
use listing_scraper::domain::{LocationRegistry, SearchSpec};
use listing_scraper::report::{days_posted_histogram, price_histogram};
use listing_scraper::scraper::{RunOutcome, SearchRunner};
use listing_scraper::templates;

use crate::cli::{Cli, Commands, SearchArgs};

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Locations => {
            let registry = LocationRegistry::builtin();
            println!("{} locations", registry.len());
            for (name, id) in registry.entries() {
                println!("  {name:<28} {id}");
            }
            Ok(())
        }
        Commands::Search(args) => search(args),
    }
}

fn search(args: SearchArgs) -> Result<()> {
    let registry = LocationRegistry::builtin();
    for location in &args.locations {
        registry.resolve(location)?;
    }

    let mut config = ScraperConfig::default();
    if let Some(base_url) = args.base_url.clone() {
        config = config.with_base_url(base_url);
    }
    if let Some(max_pages) = args.max_pages {
        config = config.with_max_pages(max_pages);
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let mut runner =
        SearchRunner::new(config, SearchSpec::default()).context("failed to build http client")?;
    let shared = args.overrides();

    for location in &args.locations {
        let mut overrides = shared.clone();
        overrides.insert(
            "locationIdentifier".to_string(),
            Value::String(location.clone()),
        );

        let (report, outcome) = runner
            .search(&Value::Object(overrides))
            .with_context(|| format!("invalid search for {location}"))?;

        if !report.rejected.is_empty() {
            println!("ignored parameters: {}", report.rejected.join(", "));
        }

        match outcome {
            RunOutcome::ProbeFailed(e) => println!("{location}: probe failed ({e})"),
            RunOutcome::NoResults => println!("{location}: no results"),
            RunOutcome::Completed(summary) => {
                println!(
                    "{location}: {} of {} pages, {} listings ({} rejected, {} duplicates), {} rows total",
                    summary.pages_fetched,
                    summary.pages_planned,
                    summary.listings_added,
                    summary.listings_rejected,
                    summary.duplicates_removed,
                    summary.table_len,
                );
                for skipped in &summary.skipped_pages {
                    println!("  page {} skipped: {}", skipped.page + 1, skipped.error);
                }
            }
        }
    }

    let table = runner.table();
    let title = args.locations.join(", ");

    println!();
    println!("{}", price_histogram(table, Some(&title)));
    println!("{}", days_posted_histogram(table));

    if args.show_rows {
        for (i, row) in table.iter() {
            println!(
                "{i:>4}  {:>9}  {:<20} {:>2} bed  {:>4}d  {}  ({})",
                row.price,
                row.price_qualifier.as_deref().unwrap_or(""),
                row.bedrooms,
                row.days_since_post,
                row.address,
                row.searched_location,
            );
        }
    }

    if let Some(path) = &args.html {
        let page = templates::report_page(&title, table);
        fs::write(path, page.into_string())
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), rows = table.len(), "wrote html report");
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
