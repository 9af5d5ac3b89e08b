//! Daily briefing news fetcher
//!
//! Loads credentials, runs one aggregation and prints the result envelope.

mod cli;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use briefing_core::{NewsQuery, ResultEnvelope};
use briefing_news::NewsConfig;
use briefing_services::{HeadlineService, NewsAggregator};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,briefing_cli=debug")),
        )
        .init();

    let cli = Cli::parse();
    let config = NewsConfig::from_env()?;

    info!("Configured providers: {:?}", config.keys.configured());

    let envelope = if cli.headlines {
        fetch_headlines(&config, &cli).await?
    } else {
        let aggregator = NewsAggregator::from_config(&config);
        aggregator
            .fetch_news(&cli.category, &cli.region, cli.max_articles)
            .await
    };

    if !envelope.is_success() {
        warn!(
            "Aggregation failed: {}",
            envelope.error.as_deref().unwrap_or("unknown error")
        );
    }

    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

async fn fetch_headlines(config: &NewsConfig, cli: &Cli) -> anyhow::Result<ResultEnvelope> {
    let service = HeadlineService::from_config(config)?;
    let query = NewsQuery::parse(&cli.category, &cli.region, cli.max_articles);

    Ok(service
        .fetch_headlines(query.category, query.region.country_code(), query.max_articles)
        .await)
}
