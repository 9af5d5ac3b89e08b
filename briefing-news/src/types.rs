//! API-specific response types for each news provider
//!
//! Only the fields the aggregator maps are modelled. Every field is optional
//! because providers routinely send `null` or omit keys on free plans.

use serde::Deserialize;

// ============================================================================
// GNews Types
// ============================================================================

/// GNews top-headlines response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GNewsResponse {
    /// Total articles matching the query
    #[serde(rename = "totalArticles")]
    pub total_articles: Option<u64>,
    /// Returned articles
    pub articles: Vec<GNewsArticle>,
}

/// A single GNews article
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GNewsArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub source: Option<NamedSource>,
}

/// `{ "name": ... }` source object shared by GNews and NewsAPI
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NamedSource {
    pub name: Option<String>,
}

// ============================================================================
// NewsAPI Types
// ============================================================================

/// NewsAPI top-headlines / everything response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewsApiResponse {
    /// "ok" or "error"
    pub status: Option<String>,
    #[serde(rename = "totalResults")]
    pub total_results: Option<u64>,
    pub articles: Vec<NewsApiArticle>,
    /// Error code when status is "error"
    pub code: Option<String>,
    /// Error message when status is "error"
    pub message: Option<String>,
}

/// A single NewsAPI article
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewsApiArticle {
    pub source: Option<NamedSource>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub content: Option<String>,
}

// ============================================================================
// NewsData.io Types
// ============================================================================

/// NewsData.io latest-news response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewsDataResponse {
    pub status: Option<String>,
    #[serde(rename = "totalResults")]
    pub total_results: Option<u64>,
    pub results: Vec<NewsDataArticle>,
}

/// A single NewsData.io article
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewsDataArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    #[serde(rename = "pubDate")]
    pub pub_date: Option<String>,
    pub source_id: Option<String>,
    pub content: Option<String>,
}

// ============================================================================
// MediaStack Types
// ============================================================================

/// MediaStack news response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MediaStackResponse {
    pub data: Vec<MediaStackArticle>,
}

/// A single MediaStack article
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MediaStackArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
    pub published_at: Option<String>,
}

// ============================================================================
// Currents Types
// ============================================================================

/// Currents search response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CurrentsResponse {
    pub status: Option<String>,
    pub news: Vec<CurrentsArticle>,
}

/// A single Currents article
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CurrentsArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub author: Option<String>,
    pub published: Option<String>,
}

// ============================================================================
// World News API Types
// ============================================================================

/// World News API search response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WorldNewsResponse {
    pub available: Option<u64>,
    pub news: Vec<WorldNewsArticle>,
}

/// A single World News API article
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WorldNewsArticle {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub text: Option<String>,
    pub url: Option<String>,
    pub publish_date: Option<String>,
    pub source_country: Option<String>,
}

// ============================================================================
// NewsCatcher Types
// ============================================================================

/// NewsCatcher search response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewsCatcherResponse {
    pub status: Option<String>,
    pub total_hits: Option<u64>,
    pub articles: Vec<NewsCatcherArticle>,
}

/// A single NewsCatcher article
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewsCatcherArticle {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub summary: Option<String>,
    pub link: Option<String>,
    pub published_date: Option<String>,
    pub clean_url: Option<String>,
}
