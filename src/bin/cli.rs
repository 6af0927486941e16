//! paapi-search CLI
//!
//! Local execution entry point around the search pipeline: loads the
//! TOML configuration, assembles search items (from flags or from a
//! JSON file), runs the sequential batch, and prints results on stdout.
//! All logging goes to stderr.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use paapi_search::{
    error::Result,
    models::{Config, SearchCriteria, SearchFilters, SearchOptions, SortBy},
    pipeline::{ErrorMode, run_search_batch},
    services::PaapiClient,
};

/// Amazon product search from the command line
#[derive(Parser, Debug)]
#[command(
    name = "paapi-search",
    version,
    about = "Batch item search against the Amazon Product Advertising API"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a single search from command-line options
    Search {
        /// Keywords to search for
        #[arg(long)]
        keywords: Option<String>,

        /// Title of the item to search for
        #[arg(long)]
        title: Option<String>,

        /// Actor name (Movies & TV)
        #[arg(long)]
        actor: Option<String>,

        /// Artist name (Music)
        #[arg(long)]
        artist: Option<String>,

        /// Author name (Books)
        #[arg(long)]
        author: Option<String>,

        /// Brand name
        #[arg(long)]
        brand: Option<String>,

        /// Browse node ID restricting the category
        #[arg(long)]
        browse_node_id: Option<String>,

        /// Product category to search in (default: all categories)
        #[arg(long)]
        search_index: Option<String>,

        /// Minimum price in the smallest currency unit
        #[arg(long)]
        min_price: Option<u32>,

        /// Maximum price in the smallest currency unit
        #[arg(long)]
        max_price: Option<u32>,

        /// Number of items to return (1-10)
        #[arg(long)]
        item_count: Option<u8>,

        /// Results page to retrieve (1-10)
        #[arg(long)]
        item_page: Option<u8>,

        /// Sort order, e.g. AvgCustomerReviews or Price:LowToHigh
        #[arg(long, value_parser = SortBy::from_str)]
        sort_by: Option<SortBy>,

        /// Response resource to request (repeatable)
        #[arg(long = "resource")]
        resources: Vec<String>,

        /// Partner tag override for this request
        #[arg(long)]
        partner_tag: Option<String>,
    },

    /// Run a batch of searches from a JSON items file
    Run {
        /// Path to a JSON array of search option items
        #[arg(long)]
        items: PathBuf,

        /// Keep going when an item fails instead of aborting the batch
        #[arg(long)]
        continue_on_error: bool,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(&cli.config)?;
    log::info!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Search {
            keywords,
            title,
            actor,
            artist,
            author,
            brand,
            browse_node_id,
            search_index,
            min_price,
            max_price,
            item_count,
            item_page,
            sort_by,
            resources,
            partner_tag,
        } => {
            let mut options = SearchOptions {
                search_index,
                criteria: SearchCriteria {
                    keywords,
                    title,
                    actor,
                    artist,
                    author,
                    brand,
                    browse_node_id,
                },
                filters: SearchFilters {
                    min_price,
                    max_price,
                    ..SearchFilters::default()
                },
                item_count,
                item_page,
                sort_by,
                resources,
                partner_tag,
                ..SearchOptions::default()
            };
            if options.resources.is_empty() {
                options.resources = config.defaults.resources.clone();
            }

            let client = PaapiClient::new(config.credentials.clone(), &config.client)?;
            let outcome =
                run_search_batch(&client, &config.credentials, &[options], ErrorMode::Abort)
                    .await?;

            for item in outcome.results {
                if let Ok(value) = item.outcome {
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
            }
        }

        Command::Run {
            items,
            continue_on_error,
        } => {
            let content = std::fs::read_to_string(&items)?;
            let batch: Vec<SearchOptions> = serde_json::from_str(&content)?;

            if batch.is_empty() {
                log::warn!("No search items found in {}", items.display());
                return Ok(());
            }
            log::info!("Loaded {} search item(s) from {}", batch.len(), items.display());

            let mode = if continue_on_error {
                ErrorMode::Collect
            } else {
                ErrorMode::Abort
            };

            let client = PaapiClient::new(config.credentials.clone(), &config.client)?;
            let outcome = run_search_batch(&client, &config.credentials, &batch, mode).await?;

            let report: Vec<serde_json::Value> = outcome
                .results
                .iter()
                .map(|item| match &item.outcome {
                    Ok(value) => serde_json::json!({
                        "index": item.index,
                        "response": value,
                    }),
                    Err(error) => serde_json::json!({
                        "index": item.index,
                        "error": error.to_string(),
                    }),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);

            log::info!(
                "Batch finished: {} ok, {} failed",
                outcome.success_count,
                outcome.failure_count
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!(
                "✓ Config OK (marketplace {}, timeout {}s)",
                config.credentials.marketplace,
                config.client.timeout_secs
            );
        }
    }

    log::info!("Done!");

    Ok(())
}
