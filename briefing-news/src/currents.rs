//! Currents API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use briefing_core::Article;

use crate::error::NewsError;
use crate::normalize::RawArticle;
use crate::provider::{get_json, http_client, NewsProvider, ProviderRequest};
use crate::types::CurrentsResponse;

const MAX_PER_REQUEST: usize = 200;

/// Currents API client
pub struct CurrentsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl CurrentsClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            api_key,
            base_url: "https://api.currentsapi.services/v1".to_string(),
        }
    }

    fn query_params(&self, request: &ProviderRequest) -> Vec<(&'static str, String)> {
        let category = request.category.as_str();
        let keywords = match request.region.country_name() {
            Some(country) => format!("{} OR {}", country, category),
            None => category.to_string(),
        };

        vec![
            ("apiKey", self.api_key.clone()),
            ("language", "en".to_string()),
            ("page_size", request.max_articles.min(MAX_PER_REQUEST).to_string()),
            ("keywords", keywords),
        ]
    }
}

fn map_response(response: CurrentsResponse) -> Vec<Article> {
    response
        .news
        .into_iter()
        .map(|a| {
            RawArticle {
                title: a.title,
                description: a.description,
                url: a.url,
                published_at: a.published,
                source: a.author.unwrap_or_else(|| "Currents".to_string()),
                content: None,
            }
            .into_article()
        })
        .collect()
}

#[async_trait]
impl NewsProvider for CurrentsClient {
    fn name(&self) -> &'static str {
        "Currents"
    }

    #[instrument(skip(self), fields(provider = "Currents"))]
    async fn fetch(&self, request: &ProviderRequest) -> Result<Vec<Article>, NewsError> {
        let response: CurrentsResponse = get_json(
            self.client
                .get(format!("{}/search", self.base_url))
                .query(&self.query_params(request)),
        )
        .await?;

        let articles = map_response(response);
        debug!("Currents returned {} articles", articles.len());
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use briefing_core::{Category, Region};

    #[test]
    fn test_keywords_include_country_name() {
        let client = CurrentsClient::new("c".to_string(), Duration::from_secs(5));

        let params = client.query_params(&ProviderRequest::new(Category::Health, Region::India, 500));
        assert!(params.contains(&("keywords", "India OR health".to_string())));
        assert!(params.contains(&("page_size", "200".to_string())));

        let params = client.query_params(&ProviderRequest::new(Category::Science, Region::Global, 5));
        assert!(params.contains(&("keywords", "science".to_string())));
    }

    #[test]
    fn test_map_response() {
        let json = r#"{
            "status": "ok",
            "news": [{
                "id": "x1",
                "title": "New vaccine trial shows promising results",
                "description": "Researchers report strong immune response in early phase.",
                "url": "https://example.com/vaccine",
                "author": "Reuters",
                "image": "None",
                "language": "en",
                "category": ["health"],
                "published": "2024-05-01 10:00:00 +0000"
            }]
        }"#;

        let response: CurrentsResponse = serde_json::from_str(json).unwrap();
        let articles = map_response(response);
        assert_eq!(articles[0].source.name, "Reuters");
        assert_eq!(articles[0].published_at, "2024-05-01T10:00:00Z");
        assert_eq!(articles[0].content, "");
    }
}
