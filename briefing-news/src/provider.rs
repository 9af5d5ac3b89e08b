//! Provider capabilities and shared HTTP plumbing
//!
//! Each external news source implements [`NewsProvider`] on its own; the
//! syndication fallback implements [`FeedFallback`] and the request-oriented
//! headline path uses [`HeadlineSource`]. New providers are added by adding an
//! implementation, never by branching on response shape in shared code.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use briefing_core::{Article, Category, Region};

use crate::config::ApiKeys;
use crate::currents::CurrentsClient;
use crate::error::NewsError;
use crate::gnews::GNewsClient;
use crate::mediastack::MediaStackClient;
use crate::newsapi::NewsApiClient;
use crate::newscatcher::NewsCatcherClient;
use crate::newsdata::NewsDataClient;
use crate::worldnews::WorldNewsClient;

/// Parameters handed to a single adapter call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderRequest {
    pub category: Category,
    pub region: Region,
    /// Soft upper bound; adapters clamp to their own API limits
    pub max_articles: usize,
}

impl ProviderRequest {
    pub fn new(category: Category, region: Region, max_articles: usize) -> Self {
        Self {
            category,
            region,
            max_articles,
        }
    }
}

/// A paid or keyed news API
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Display name reported in `apis_used`
    fn name(&self) -> &'static str;

    /// Fetch and normalize articles for one request
    async fn fetch(&self, request: &ProviderRequest) -> Result<Vec<Article>, NewsError>;
}

/// Credential-free syndication feeds used as the last-resort source
#[async_trait]
pub trait FeedFallback: Send + Sync {
    async fn fetch_feeds(
        &self,
        category: Category,
        region: Region,
        max_articles: usize,
    ) -> Result<Vec<Article>, NewsError>;
}

/// Country-oriented headline search used by the request fallback path
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    /// Top headlines for a country code and category
    async fn top_headlines(
        &self,
        country: &str,
        category: Category,
        max_articles: usize,
    ) -> Result<Vec<Article>, NewsError>;

    /// Keyword search over recent articles
    async fn search_everything(
        &self,
        terms: &str,
        max_articles: usize,
        days_back: i64,
    ) -> Result<Vec<Article>, NewsError>;
}

/// Build a client with a hard per-request timeout
pub(crate) fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent("DailyBriefing/1.0")
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Send a request and decode a JSON body, mapping failures onto [`NewsError`]
///
/// The response is consumed on every path, so the connection goes back to
/// the pool (or is closed) whether the call succeeds, errors or times out.
pub(crate) async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, NewsError> {
    let response = request
        .send()
        .await
        .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(NewsError::from_status(status.as_u16(), body));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

    serde_json::from_slice(&body).map_err(|e| NewsError::ParseError(e.to_string()))
}

/// Instantiate an adapter for every provider that has a credential
///
/// Order is fixed and determines merge priority during deduplication.
pub fn build_providers(keys: &ApiKeys, timeout: Duration) -> Vec<Arc<dyn NewsProvider>> {
    let mut providers: Vec<Arc<dyn NewsProvider>> = Vec::new();

    if let Some(key) = &keys.gnews {
        providers.push(Arc::new(GNewsClient::new(key.clone(), timeout)));
    }
    if let Some(key) = &keys.newsapi {
        providers.push(Arc::new(NewsApiClient::new(key.clone(), timeout)));
    }
    if let Some(key) = &keys.newsdata {
        providers.push(Arc::new(NewsDataClient::new(key.clone(), timeout)));
    }
    if let Some(key) = &keys.mediastack {
        providers.push(Arc::new(MediaStackClient::new(key.clone(), timeout)));
    }
    if let Some(key) = &keys.currents {
        providers.push(Arc::new(CurrentsClient::new(key.clone(), timeout)));
    }
    if let Some(key) = &keys.worldnews {
        providers.push(Arc::new(WorldNewsClient::new(key.clone(), timeout)));
    }
    if let Some(key) = &keys.newscatcher {
        providers.push(Arc::new(NewsCatcherClient::new(key.clone(), timeout)));
    }

    providers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_providers_skips_missing_keys() {
        let keys = ApiKeys {
            gnews: Some("g".to_string()),
            worldnews: Some("w".to_string()),
            newsapi: Some("n".to_string()),
            ..ApiKeys::default()
        };

        let providers = build_providers(&keys, Duration::from_secs(5));
        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["GNews", "NewsAPI", "WorldNews"]);

        assert!(build_providers(&ApiKeys::default(), Duration::from_secs(5)).is_empty());
    }
}
