//! NewsCatcher client
//!
//! Unlike the other providers, the key travels in the `x-api-key` header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use briefing_core::Article;

use crate::error::NewsError;
use crate::normalize::RawArticle;
use crate::provider::{get_json, http_client, NewsProvider, ProviderRequest};
use crate::types::NewsCatcherResponse;

const MAX_PER_REQUEST: usize = 100;

/// NewsCatcher client
pub struct NewsCatcherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsCatcherClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            api_key,
            base_url: "https://api.newscatcherapi.com/v2".to_string(),
        }
    }

    fn query_params(&self, request: &ProviderRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("lang", "en".to_string()),
            ("page_size", request.max_articles.min(MAX_PER_REQUEST).to_string()),
            ("sort_by", "date".to_string()),
        ];
        if let Some(code) = request.region.location_filter() {
            params.push(("countries", code.to_string()));
        }
        if !request.category.is_general() {
            params.push(("q", request.category.as_str().to_string()));
        }
        params
    }
}

fn map_response(response: NewsCatcherResponse) -> Vec<Article> {
    response
        .articles
        .into_iter()
        .map(|a| {
            RawArticle {
                title: a.title,
                description: a.excerpt,
                url: a.link,
                published_at: a.published_date,
                source: a.clean_url.unwrap_or_else(|| "NewsCatcher".to_string()),
                content: a.summary,
            }
            .into_article()
        })
        .collect()
}

#[async_trait]
impl NewsProvider for NewsCatcherClient {
    fn name(&self) -> &'static str {
        "NewsCatcher"
    }

    #[instrument(skip(self), fields(provider = "NewsCatcher"))]
    async fn fetch(&self, request: &ProviderRequest) -> Result<Vec<Article>, NewsError> {
        let response: NewsCatcherResponse = get_json(
            self.client
                .get(format!("{}/search", self.base_url))
                .header("x-api-key", &self.api_key)
                .query(&self.query_params(request)),
        )
        .await?;

        let articles = map_response(response);
        debug!("NewsCatcher returned {} articles", articles.len());
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use briefing_core::{Category, Region};

    #[test]
    fn test_key_not_in_query() {
        let client = NewsCatcherClient::new("secret".to_string(), Duration::from_secs(5));
        let params = client.query_params(&ProviderRequest::new(Category::Technology, Region::Us, 250));

        assert!(!params.iter().any(|(_, v)| v == "secret"));
        assert!(params.contains(&("page_size", "100".to_string())));
        assert!(params.contains(&("countries", "US".to_string())));
        assert!(params.contains(&("q", "technology".to_string())));
    }

    #[test]
    fn test_global_sends_no_country_filter() {
        let client = NewsCatcherClient::new("secret".to_string(), Duration::from_secs(5));
        let params = client.query_params(&ProviderRequest::new(Category::General, Region::Global, 5));

        assert!(!params.iter().any(|(k, _)| *k == "countries"));
        assert!(!params.iter().any(|(k, _)| *k == "q"));
    }

    #[test]
    fn test_map_response() {
        let json = r#"{
            "status": "ok",
            "total_hits": 1,
            "articles": [{
                "title": "Chipmaker announces new fab in Arizona",
                "excerpt": "The plant is expected to create thousands of jobs by 2027.",
                "summary": "Longer body text about the fab.",
                "link": "https://example.com/fab",
                "published_date": "2024-05-01 10:00:00",
                "clean_url": "example.com"
            }]
        }"#;

        let response: NewsCatcherResponse = serde_json::from_str(json).unwrap();
        let articles = map_response(response);
        assert_eq!(articles[0].source.name, "example.com");
        assert_eq!(articles[0].content, "Longer body text about the fab.");
        assert_eq!(articles[0].url, "https://example.com/fab");
    }
}
