//! Aggregation services for the daily briefing
//!
//! This crate orchestrates the provider clients from `briefing-news`:
//! the multi-provider [`NewsAggregator`] with its RSS fallback ladder and
//! the country-oriented [`HeadlineService`].

pub mod headline_service;
pub mod news_aggregator;

pub use headline_service::HeadlineService;
pub use news_aggregator::NewsAggregator;
