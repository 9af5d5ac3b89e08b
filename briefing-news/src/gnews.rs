//! GNews API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use briefing_core::Article;

use crate::error::NewsError;
use crate::normalize::RawArticle;
use crate::provider::{get_json, http_client, NewsProvider, ProviderRequest};
use crate::types::GNewsResponse;

/// GNews caps free-plan requests at 10 articles
const MAX_PER_REQUEST: usize = 10;

/// GNews API client
pub struct GNewsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GNewsClient {
    /// Create a new GNews client
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            api_key,
            base_url: "https://gnews.io/api/v4".to_string(),
        }
    }

    fn query_params(&self, request: &ProviderRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("token", self.api_key.clone()),
            ("lang", "en".to_string()),
            ("country", request.region.country_code().to_string()),
            ("max", request.max_articles.min(MAX_PER_REQUEST).to_string()),
        ];
        if !request.category.is_general() {
            params.push(("q", request.category.as_str().to_string()));
        }
        params
    }
}

fn map_response(response: GNewsResponse) -> Vec<Article> {
    response
        .articles
        .into_iter()
        .map(|a| {
            RawArticle {
                title: a.title,
                description: a.description,
                url: a.url,
                published_at: a.published_at,
                source: a
                    .source
                    .and_then(|s| s.name)
                    .unwrap_or_else(|| "GNews".to_string()),
                content: a.content,
            }
            .into_article()
        })
        .collect()
}

#[async_trait]
impl NewsProvider for GNewsClient {
    fn name(&self) -> &'static str {
        "GNews"
    }

    #[instrument(skip(self), fields(provider = "GNews"))]
    async fn fetch(&self, request: &ProviderRequest) -> Result<Vec<Article>, NewsError> {
        let response: GNewsResponse = get_json(
            self.client
                .get(format!("{}/top-headlines", self.base_url))
                .query(&self.query_params(request)),
        )
        .await?;

        let articles = map_response(response);
        debug!("GNews returned {} articles", articles.len());
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use briefing_core::{Category, Region};

    fn client() -> GNewsClient {
        GNewsClient::new("test-key".to_string(), Duration::from_secs(5))
    }

    #[test]
    fn test_query_params() {
        let params = client().query_params(&ProviderRequest::new(
            Category::Technology,
            Region::India,
            25,
        ));
        assert!(params.contains(&("token", "test-key".to_string())));
        assert!(params.contains(&("country", "in".to_string())));
        assert!(params.contains(&("max", "10".to_string())));
        assert!(params.contains(&("q", "technology".to_string())));

        let params = client().query_params(&ProviderRequest::new(
            Category::General,
            Region::Global,
            3,
        ));
        assert!(params.contains(&("country", "us".to_string())));
        assert!(params.contains(&("max", "3".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "q"));
    }

    #[test]
    fn test_map_response() {
        let json = r#"{
            "totalArticles": 2,
            "articles": [
                {
                    "title": "ISRO schedules next lunar mission launch",
                    "description": "The space agency confirmed the launch window for the mission.",
                    "content": "Full text...",
                    "url": "https://example.in/isro",
                    "publishedAt": "2024-05-01T10:00:00Z",
                    "source": { "name": "The Hindu", "url": "https://thehindu.com" }
                },
                {
                    "title": "Untitled source story here",
                    "description": null,
                    "url": "https://example.in/other",
                    "publishedAt": "2024-05-01T09:00:00Z",
                    "source": null
                }
            ]
        }"#;

        let response: GNewsResponse = serde_json::from_str(json).unwrap();
        let articles = map_response(response);
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].source.name, "The Hindu");
        assert_eq!(articles[0].content, "Full text...");
        assert_eq!(articles[1].source.name, "GNews");
        assert_eq!(articles[1].description, "");
    }
}
