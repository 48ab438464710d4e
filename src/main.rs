use std::path::Path;

use obuv_scraper::app::{read_query, report};
use obuv_scraper::{parse_search, ScraperConfig};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

#[tokio::main]
async fn main() -> obuv_scraper::Result<()> {
    init_logging();

    let query = read_query(std::io::stdin().lock(), std::io::stdout())?;
    let products = parse_search(&query, &ScraperConfig::default()).await?;
    report(&query, &products, Path::new("."), std::io::stdout())?;

    Ok(())
}
