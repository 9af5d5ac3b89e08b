//! Command-line arguments for the briefing binary

use clap::Parser;

/// Fetch an aggregated news envelope and print it as JSON
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// News category (technology, business, health, sports, general, entertainment, science)
    #[arg(short, long, default_value = "general")]
    pub category: String,

    /// Region name or country code (global, us, india, uk, au, ca)
    #[arg(short, long, default_value = "global")]
    pub region: String,

    /// Maximum number of articles to return
    #[arg(short, long, default_value_t = 5)]
    pub max_articles: usize,

    /// Use the NewsAPI headline path with category and country fallbacks
    #[arg(long)]
    pub headlines: bool,
}
