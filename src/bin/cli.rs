//! gazette CLI
//!
//! One invocation corresponds to one page load: the listing collection is
//! fetched, a single route (or search/keyword interaction) is dispatched,
//! and the rendered page is written to stdout or a file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gazette::{
    error::Result,
    models::Config,
    render::Page,
    services::{Browser, HttpFetcher},
};

/// gazette - Client-Side Article Browser
#[derive(Parser, Debug)]
#[command(name = "gazette", version, about = "Client-side article browser")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "gazette.toml")]
    config: PathBuf,

    /// Override the article server base URL
    #[arg(short, long)]
    base_url: Option<String>,

    /// Write the rendered page to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the view selected by a query string (default: latest article)
    View {
        /// Query string, e.g. "?name=<id>", "?by=date", "?by=keyword"
        query: Option<String>,
    },

    /// Search listings by keyword terms
    Search {
        /// Free-text search terms
        terms: Vec<String>,
    },

    /// Render the keyword index with listings for one keyword appended
    Keyword {
        /// Keyword label, matched exactly
        keyword: String,
    },

    /// Validate the configuration file
    Validate,

    /// Show listing collection info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Write the rendered page to the requested destination.
fn write_page(page: &Page, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, page.to_html())?;
            log::info!("Page written to {}", path.display());
        }
        None => print!("{}", page.to_html()),
    }
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("gazette starting...");

    let mut config = Config::load_or_default(&cli.config);
    if let Some(base_url) = cli.base_url {
        config.site.base_url = base_url;
    }

    match cli.command {
        Command::View { query } => {
            let fetcher = HttpFetcher::new(&config.http)?;
            let browser = Browser::open(&config, &fetcher).await?;
            let page = browser.dispatch(query.as_deref().unwrap_or("")).await?;
            write_page(&page, cli.output.as_ref())?;
        }

        Command::Search { terms } => {
            let fetcher = HttpFetcher::new(&config.http)?;
            let browser = Browser::open(&config, &fetcher).await?;
            let page = browser.submit_search(&terms.join(" ")).await?;
            write_page(&page, cli.output.as_ref())?;
        }

        Command::Keyword { keyword } => {
            let fetcher = HttpFetcher::new(&config.http)?;
            let browser = Browser::open(&config, &fetcher).await?;
            let page = browser.click_keyword(&keyword).await?;
            write_page(&page, cli.output.as_ref())?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }

        Command::Info => {
            let fetcher = HttpFetcher::new(&config.http)?;
            let browser = Browser::open(&config, &fetcher).await?;
            let store = browser.store();

            log::info!("Server: {}", config.site.base_url);
            log::info!("Articles: {}", store.len());
            log::info!("Distinct keywords: {}", store.keyword_index().len());
            if let Some(latest) = store.latest() {
                log::info!(
                    "Most recent: '{}' ({})",
                    latest.title,
                    latest.format_date(&config.site.date_format)
                );
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
