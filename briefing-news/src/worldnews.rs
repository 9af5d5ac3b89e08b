//! World News API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use briefing_core::Article;

use crate::error::NewsError;
use crate::normalize::RawArticle;
use crate::provider::{get_json, http_client, NewsProvider, ProviderRequest};
use crate::types::WorldNewsResponse;

const MAX_PER_REQUEST: usize = 100;

/// World News API client
pub struct WorldNewsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WorldNewsClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            api_key,
            base_url: "https://api.worldnewsapi.com".to_string(),
        }
    }

    fn query_params(&self, request: &ProviderRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("api-key", self.api_key.clone()),
            ("number", request.max_articles.min(MAX_PER_REQUEST).to_string()),
            ("language", "en".to_string()),
            ("sort", "publish-time".to_string()),
            ("sort-direction", "DESC".to_string()),
        ];
        if let Some(location) = request.region.location_filter() {
            params.push(("location-filter", location.to_string()));
        }
        if !request.category.is_general() {
            params.push(("text", request.category.as_str().to_string()));
        }
        params
    }
}

fn map_response(response: WorldNewsResponse) -> Vec<Article> {
    response
        .news
        .into_iter()
        .map(|a| {
            RawArticle {
                title: a.title,
                description: a.summary,
                url: a.url,
                published_at: a.publish_date,
                source: a.source_country.unwrap_or_else(|| "WorldNews".to_string()),
                content: a.text,
            }
            .into_article()
        })
        .collect()
}

#[async_trait]
impl NewsProvider for WorldNewsClient {
    fn name(&self) -> &'static str {
        "WorldNews"
    }

    #[instrument(skip(self), fields(provider = "WorldNews"))]
    async fn fetch(&self, request: &ProviderRequest) -> Result<Vec<Article>, NewsError> {
        let response: WorldNewsResponse = get_json(
            self.client
                .get(format!("{}/search-news", self.base_url))
                .query(&self.query_params(request)),
        )
        .await?;

        let articles = map_response(response);
        debug!("WorldNews returned {} articles", articles.len());
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use briefing_core::{Category, Region};

    #[test]
    fn test_query_params() {
        let client = WorldNewsClient::new("w".to_string(), Duration::from_secs(5));

        let params = client.query_params(&ProviderRequest::new(Category::Business, Region::Uk, 8));
        assert!(params.contains(&("api-key", "w".to_string())));
        assert!(params.contains(&("location-filter", "GB".to_string())));
        assert!(params.contains(&("text", "business".to_string())));
        assert!(params.contains(&("sort-direction", "DESC".to_string())));

        let params = client.query_params(&ProviderRequest::new(Category::General, Region::Global, 8));
        assert!(!params.iter().any(|(k, _)| *k == "location-filter" || *k == "text"));
    }

    #[test]
    fn test_map_response() {
        let json = r#"{
            "offset": 0,
            "number": 1,
            "available": 120,
            "news": [{
                "id": 42,
                "title": "Bank of England holds interest rates steady",
                "text": "The Monetary Policy Committee voted to keep rates unchanged...",
                "summary": "Policymakers kept borrowing costs unchanged for a sixth meeting.",
                "url": "https://example.co.uk/boe",
                "publish_date": "2024-05-01 10:00:00",
                "source_country": "gb"
            }]
        }"#;

        let response: WorldNewsResponse = serde_json::from_str(json).unwrap();
        let articles = map_response(response);
        assert_eq!(
            articles[0].description,
            "Policymakers kept borrowing costs unchanged for a sixth meeting."
        );
        assert!(articles[0].content.starts_with("The Monetary Policy Committee"));
        assert_eq!(articles[0].source.name, "gb");
        assert_eq!(articles[0].published_at, "2024-05-01T10:00:00Z");
    }
}
