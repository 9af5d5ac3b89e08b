//! NewsData.io client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use briefing_core::Article;

use crate::error::NewsError;
use crate::normalize::RawArticle;
use crate::provider::{get_json, http_client, NewsProvider, ProviderRequest};
use crate::types::NewsDataResponse;

/// NewsData.io client
pub struct NewsDataClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsDataClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            api_key,
            base_url: "https://newsdata.io/api/1".to_string(),
        }
    }

    // NewsData accepts "top" style categories including general, so the
    // category is always sent
    fn query_params(&self, request: &ProviderRequest) -> Vec<(&'static str, String)> {
        vec![
            ("apikey", self.api_key.clone()),
            ("country", request.region.country_code().to_string()),
            ("category", request.category.as_str().to_string()),
            ("language", "en".to_string()),
            ("size", request.max_articles.to_string()),
        ]
    }
}

fn map_response(response: NewsDataResponse) -> Vec<Article> {
    response
        .results
        .into_iter()
        .map(|a| {
            RawArticle {
                title: a.title,
                description: a.description,
                url: a.link,
                published_at: a.pub_date,
                source: a.source_id.unwrap_or_else(|| "NewsData".to_string()),
                content: a.content,
            }
            .into_article()
        })
        .collect()
}

#[async_trait]
impl NewsProvider for NewsDataClient {
    fn name(&self) -> &'static str {
        "NewsData"
    }

    #[instrument(skip(self), fields(provider = "NewsData"))]
    async fn fetch(&self, request: &ProviderRequest) -> Result<Vec<Article>, NewsError> {
        let response: NewsDataResponse = get_json(
            self.client
                .get(format!("{}/news", self.base_url))
                .query(&self.query_params(request)),
        )
        .await?;

        if response.status.as_deref() == Some("error") {
            return Err(NewsError::ApiError {
                status: 200,
                message: "NewsData reported an error status".to_string(),
            });
        }

        let articles = map_response(response);
        debug!("NewsData returned {} articles", articles.len());
        Ok(articles)
    }
}
