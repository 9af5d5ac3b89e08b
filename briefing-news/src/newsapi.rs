//! NewsAPI.org client
//!
//! Serves two roles: a fan-out provider (top headlines) and the
//! country-oriented [`HeadlineSource`] behind the request fallback path,
//! which additionally uses the `/everything` keyword search.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::{debug, instrument};

use briefing_core::{Article, Category};

use crate::error::NewsError;
use crate::normalize::RawArticle;
use crate::provider::{get_json, http_client, HeadlineSource, NewsProvider, ProviderRequest};
use crate::types::NewsApiResponse;

/// Headline path over-fetches to survive filtering, up to this cap
const HEADLINE_PAGE_CAP: usize = 20;

/// NewsAPI.org client
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsApiClient {
    /// Create a new NewsAPI client
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            api_key,
            base_url: "https://newsapi.org/v2".to_string(),
        }
    }

    fn provider_params(&self, request: &ProviderRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("apiKey", self.api_key.clone()),
            ("country", request.region.country_code().to_string()),
            ("pageSize", request.max_articles.to_string()),
        ];
        if !request.category.is_general() {
            params.push(("category", request.category.as_str().to_string()));
        }
        params
    }

    fn headline_params(
        &self,
        country: &str,
        category: Category,
        max_articles: usize,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("apiKey", self.api_key.clone()),
            ("country", country.to_string()),
            ("pageSize", (max_articles * 2).min(HEADLINE_PAGE_CAP).to_string()),
            ("sortBy", "publishedAt".to_string()),
            ("category", category.as_str().to_string()),
        ]
    }

    fn search_params(
        &self,
        terms: &str,
        max_articles: usize,
        days_back: i64,
    ) -> Vec<(&'static str, String)> {
        let from = (Utc::now() - chrono::Duration::days(days_back))
            .format("%Y-%m-%d")
            .to_string();
        vec![
            ("apiKey", self.api_key.clone()),
            ("q", terms.to_string()),
            ("sortBy", "publishedAt".to_string()),
            ("pageSize", (max_articles * 2).min(HEADLINE_PAGE_CAP).to_string()),
            ("language", "en".to_string()),
            ("from", from),
        ]
    }

    async fn request(
        &self,
        endpoint: &str,
        params: &[(&'static str, String)],
    ) -> Result<Vec<Article>, NewsError> {
        let response: NewsApiResponse = get_json(
            self.client
                .get(format!("{}/{}", self.base_url, endpoint))
                .query(params),
        )
        .await?;

        if response.status.as_deref() == Some("error") {
            return Err(NewsError::ApiError {
                status: 200,
                message: response
                    .message
                    .or(response.code)
                    .unwrap_or_else(|| "unknown NewsAPI error".to_string()),
            });
        }

        Ok(map_response(response))
    }
}

/// Map articles, dropping the "[Removed]" placeholders NewsAPI emits for
/// withdrawn stories
fn map_response(response: NewsApiResponse) -> Vec<Article> {
    response
        .articles
        .into_iter()
        .filter(|a| {
            a.title
                .as_deref()
                .is_some_and(|t| !t.is_empty() && !t.contains("[Removed]"))
        })
        .map(|a| {
            RawArticle {
                title: a.title,
                description: a.description,
                url: a.url,
                published_at: a.published_at,
                source: a
                    .source
                    .and_then(|s| s.name)
                    .unwrap_or_else(|| "NewsAPI".to_string()),
                content: a.content,
            }
            .into_article()
        })
        .collect()
}

/// Keyword set for the focused `/everything` retry
pub fn enhanced_search_terms(country: &str, category: Category) -> String {
    let mut terms: Vec<&str> = vec![if category.is_general() {
        "news"
    } else {
        category.as_str()
    }];

    let country_terms: &[&str] = match country {
        "in" => &["India", "Indian"],
        "us" => &["USA", "America"],
        "gb" => &["UK", "Britain"],
        "au" => &["Australia", "Australian"],
        "ca" => &["Canada", "Canadian"],
        _ => &[],
    };
    terms.extend_from_slice(country_terms);

    match category {
        Category::Technology => terms.extend_from_slice(&["tech", "innovation", "startup", "digital"]),
        Category::Business => terms.extend_from_slice(&["economy", "market", "finance", "corporate"]),
        Category::Health => terms.extend_from_slice(&["medical", "healthcare", "medicine"]),
        _ => {}
    }

    terms.join(" OR ")
}

/// Keyword set for the broadest `/everything` retry
pub fn broad_search_terms(country: &str, category: Category) -> String {
    match category {
        Category::Technology => "technology OR tech OR innovation OR digital OR startup".to_string(),
        Category::Business => "business OR economy OR market OR finance OR corporate".to_string(),
        Category::Health => "health OR medical OR healthcare OR medicine".to_string(),
        _ => format!("{} OR news OR breaking OR latest", country),
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    fn name(&self) -> &'static str {
        "NewsAPI"
    }

    #[instrument(skip(self), fields(provider = "NewsAPI"))]
    async fn fetch(&self, request: &ProviderRequest) -> Result<Vec<Article>, NewsError> {
        let articles = self
            .request("top-headlines", &self.provider_params(request))
            .await?;
        debug!("NewsAPI returned {} articles", articles.len());
        Ok(articles)
    }
}

#[async_trait]
impl HeadlineSource for NewsApiClient {
    #[instrument(skip(self))]
    async fn top_headlines(
        &self,
        country: &str,
        category: Category,
        max_articles: usize,
    ) -> Result<Vec<Article>, NewsError> {
        self.request(
            "top-headlines",
            &self.headline_params(country, category, max_articles),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn search_everything(
        &self,
        terms: &str,
        max_articles: usize,
        days_back: i64,
    ) -> Result<Vec<Article>, NewsError> {
        self.request(
            "everything",
            &self.search_params(terms, max_articles, days_back),
        )
        .await
    }
}
