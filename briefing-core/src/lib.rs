//! Core types for the daily briefing news aggregator
//!
//! This crate defines the shared data structures used across the workspace:
//! the common article shape every provider normalizes into, the logical
//! query/region vocabulary, and the result envelope handed to callers.

pub mod error;
pub mod news;
pub mod region;

pub use error::BriefingError;
pub use news::{Article, ArticleSource, Category, EnvelopeStatus, NewsQuery, ResultEnvelope};
pub use region::Region;
