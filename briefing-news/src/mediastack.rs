//! MediaStack client
//!
//! The free plan only serves plain HTTP, hence the `http://` base URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use briefing_core::Article;

use crate::error::NewsError;
use crate::normalize::RawArticle;
use crate::provider::{get_json, http_client, NewsProvider, ProviderRequest};
use crate::types::MediaStackResponse;

const MAX_PER_REQUEST: usize = 25;

/// MediaStack client
pub struct MediaStackClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl MediaStackClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            api_key,
            base_url: "http://api.mediastack.com/v1".to_string(),
        }
    }

    fn query_params(&self, request: &ProviderRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("access_key", self.api_key.clone()),
            ("countries", request.region.mediastack_countries().to_string()),
            ("limit", request.max_articles.min(MAX_PER_REQUEST).to_string()),
            ("languages", "en".to_string()),
            ("sort", "published_desc".to_string()),
        ];
        if !request.category.is_general() {
            params.push(("categories", request.category.as_str().to_string()));
        }
        params
    }
}

/// MediaStack has no body field; the description doubles as content
fn map_response(response: MediaStackResponse) -> Vec<Article> {
    response
        .data
        .into_iter()
        .map(|a| {
            let content = a.description.clone();
            RawArticle {
                title: a.title,
                description: a.description,
                url: a.url,
                published_at: a.published_at,
                source: a.source.unwrap_or_else(|| "MediaStack".to_string()),
                content,
            }
            .into_article()
        })
        .collect()
}

#[async_trait]
impl NewsProvider for MediaStackClient {
    fn name(&self) -> &'static str {
        "MediaStack"
    }

    #[instrument(skip(self), fields(provider = "MediaStack"))]
    async fn fetch(&self, request: &ProviderRequest) -> Result<Vec<Article>, NewsError> {
        let response: MediaStackResponse = get_json(
            self.client
                .get(format!("{}/news", self.base_url))
                .query(&self.query_params(request)),
        )
        .await?;

        let articles = map_response(response);
        debug!("MediaStack returned {} articles", articles.len());
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use briefing_core::{Category, Region};

    #[test]
    fn test_query_params() {
        let client = MediaStackClient::new("ms".to_string(), Duration::from_secs(5));

        let params = client.query_params(&ProviderRequest::new(Category::Sports, Region::Global, 40));
        assert!(params.contains(&("countries", "us,gb,in,au,ca".to_string())));
        assert!(params.contains(&("limit", "25".to_string())));
        assert!(params.contains(&("categories", "sports".to_string())));
        assert!(params.contains(&("sort", "published_desc".to_string())));

        let params = client.query_params(&ProviderRequest::new(Category::General, Region::Canada, 5));
        assert!(params.contains(&("countries", "ca".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "categories"));
    }

    #[test]
    fn test_description_doubles_as_content() {
        let json = r#"{
            "pagination": { "limit": 25, "offset": 0, "count": 1, "total": 1 },
            "data": [{
                "author": null,
                "title": "Wildfire season starts early in Alberta",
                "description": "Crews are already battling several blazes in the north.",
                "url": "https://example.ca/fires",
                "source": "CBC",
                "published_at": "2024-05-01T10:00:00+00:00"
            }]
        }"#;

        let response: MediaStackResponse = serde_json::from_str(json).unwrap();
        let articles = map_response(response);
        assert_eq!(articles[0].content, articles[0].description);
        assert_eq!(articles[0].source.name, "CBC");
        assert_eq!(articles[0].published_at, "2024-05-01T10:00:00Z");
    }
}
