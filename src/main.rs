use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use serp_scraper::{configuration::get_configuration, services::GoogleScraper};

/// Scrape organic Google results for a query.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Search term. Only used together with NUM_PAGES.
    query: Option<String>,
    /// Number of result pages to fetch. Only used together with QUERY.
    num_pages: Option<u32>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let args = Args::parse();

    let (query, num_pages) = match (args.query, args.num_pages) {
        (Some(query), Some(num_pages)) => (query, num_pages),
        _ => (
            configuration.search.default_query,
            configuration.search.default_num_pages,
        ),
    };

    let scraper = GoogleScraper::new(&configuration.scraper)?;
    let output = scraper
        .scrape(&query, num_pages)
        .await
        .with_context(|| format!("Failed to scrape results for query: {}", query))?;

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
