use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod assemble;
mod catalog;
mod config;
mod crawl;
mod detail;
mod listing;
mod render;
mod tags;
mod types;
mod utils;

use config::Config;
use render::HttpRenderer;
use utils::osc8_file_link;

#[derive(Parser)]
#[command(name = "storefront-catalog")]
#[command(about = "Storefront collection crawler and product catalog builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl every configured collection and write the product catalog
    Crawl {
        /// CONL config file (defaults to the built-in collections)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Vendor identifier stamped on every product
        #[arg(long)]
        vendor_id: Option<String>,
        /// Stop each collection after this many listing pages
        #[arg(long)]
        max_pages: Option<u32>,
        /// Quiet mode - only warnings and errors
        #[arg(short, long)]
        quiet: bool,
    },
    /// List the configured collections and their category tags
    Collections {
        /// CONL config file (defaults to the built-in collections)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_logging(quiet: bool) {
    let default_filter = if quiet { "warn" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn run_crawl(config: Config) -> Result<()> {
    let mut renderer = HttpRenderer::new(&config.user_agent, config.request_timeout())?;
    let products = catalog::build_catalog(
        &mut renderer,
        &config.collections,
        &config.vendor_id,
        config.max_pages,
    )?;

    catalog::write_catalog(&config.output, &products)?;
    info!(
        "Scraped {} products and saved to {}",
        products.len(),
        osc8_file_link(&config.output, &config.output.display().to_string())
    );
    Ok(())
}

fn run_collections(config: &Config) {
    println!("{} collections (vendor {}):", config.collections.len(), config.vendor_id);
    for collection in &config.collections {
        println!("  {}", collection.url);
        println!("    tags: {}", collection.category_tags.join(", "));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            config,
            output,
            vendor_id,
            max_pages,
            quiet,
        } => {
            init_logging(quiet);
            let mut config = Config::load(config.as_deref())?;
            if let Some(output) = output {
                config.output = output;
            }
            if let Some(vendor_id) = vendor_id {
                config.vendor_id = vendor_id;
            }
            if max_pages.is_some() {
                config.max_pages = max_pages;
            }
            config.validate()?;
            run_crawl(config)
        }
        Commands::Collections { config } => {
            run_collections(&Config::load(config.as_deref())?);
            Ok(())
        }
    }
}
