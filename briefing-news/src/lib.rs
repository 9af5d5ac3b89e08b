//! News provider adapters for the daily briefing aggregator
//!
//! This crate provides:
//! - Keyed provider clients: GNews, NewsAPI, NewsData.io, MediaStack,
//!   Currents, World News API and NewsCatcher
//! - An RSS/Atom fallback over curated feeds
//! - Normalization, validity filtering and near-duplicate removal

pub mod config;
pub mod currents;
pub mod error;
pub mod gnews;
pub mod mediastack;
pub mod newsapi;
pub mod newscatcher;
pub mod newsdata;
pub mod normalize;
pub mod provider;
pub mod rss_client;
pub mod types;
pub mod worldnews;

pub use config::{AggregationPolicy, ApiKeys, ConfigError, NewsConfig};
pub use currents::CurrentsClient;
pub use error::NewsError;
pub use gnews::GNewsClient;
pub use mediastack::MediaStackClient;
pub use newsapi::{broad_search_terms, enhanced_search_terms, NewsApiClient};
pub use newscatcher::NewsCatcherClient;
pub use newsdata::NewsDataClient;
pub use normalize::{dedupe, filter_valid, finalize, is_valid, sort_by_recency, title_similarity, RawArticle};
pub use provider::{build_providers, FeedFallback, HeadlineSource, NewsProvider, ProviderRequest};
pub use rss_client::{curated_feeds, RssClient};
pub use worldnews::WorldNewsClient;
