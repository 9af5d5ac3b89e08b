//! Country-oriented headline service
//!
//! A request-oriented path over a single [`HeadlineSource`], separate from the
//! provider fan-out. Strategies are tried in order until one yields usable
//! articles: the requested country and category, a broad keyword search,
//! the general category, then alternate countries.

use std::future::Future;
use std::sync::Arc;

use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use briefing_core::{Article, Category, ResultEnvelope};
use briefing_news::{
    broad_search_terms, enhanced_search_terms, filter_valid, finalize, AggregationPolicy,
    HeadlineSource, NewsApiClient, NewsConfig, NewsError,
};

const NO_ARTICLES: &str = "No news articles found despite multiple search strategies";

/// Look-back window for the focused keyword search
const ENHANCED_DAYS_BACK: i64 = 2;
/// Look-back window for the broad keyword search
const BROAD_DAYS_BACK: i64 = 3;

/// Headline service with category and country fallbacks
pub struct HeadlineService {
    source: Arc<dyn HeadlineSource>,
    policy: AggregationPolicy,
}

impl HeadlineService {
    pub fn new(source: Arc<dyn HeadlineSource>, policy: AggregationPolicy) -> Self {
        Self { source, policy }
    }

    /// Backed by NewsAPI; requires its key
    pub fn from_config(config: &NewsConfig) -> Result<Self, NewsError> {
        let key = config
            .keys
            .newsapi
            .clone()
            .ok_or_else(|| NewsError::MissingCredential("NewsAPI".to_string()))?;
        let client = NewsApiClient::new(key, config.policy.request_timeout);
        Ok(Self::new(Arc::new(client), config.policy.clone()))
    }

    /// Fetch headlines for a country code, escalating through fallbacks
    #[instrument(skip(self))]
    pub async fn fetch_headlines(
        &self,
        category: Category,
        country: &str,
        max_articles: usize,
    ) -> ResultEnvelope {
        let country = country.trim().to_lowercase();
        let max_articles = max_articles.max(1);

        if let Some((articles, strategy)) = self.country_attempt(category, &country, max_articles).await {
            return self.envelope(articles, strategy.to_string(), max_articles);
        }

        let terms = broad_search_terms(&country, category);
        let articles = self
            .attempt(
                "broad-search",
                self.source.search_everything(&terms, max_articles, BROAD_DAYS_BACK),
            )
            .await;
        if !articles.is_empty() {
            return self.envelope(articles, "broad-search".to_string(), max_articles);
        }

        if !category.is_general() {
            if let Some((articles, _)) = self
                .country_attempt(Category::General, &country, max_articles)
                .await
            {
                return self.envelope(articles, "general-category".to_string(), max_articles);
            }
        }

        for alternate in self.alternate_countries(&country) {
            if let Some((articles, _)) = self.country_attempt(category, &alternate, max_articles).await {
                return self.envelope(articles, format!("country-{}", alternate), max_articles);
            }
        }

        warn!("Headline strategies exhausted for {}/{}", country, category);
        ResultEnvelope::failure(NO_ARTICLES)
    }

    /// Top headlines, then the focused keyword search, for one country
    async fn country_attempt(
        &self,
        category: Category,
        country: &str,
        max_articles: usize,
    ) -> Option<(Vec<Article>, &'static str)> {
        let articles = self
            .attempt(
                "top-headlines",
                self.source.top_headlines(country, category, max_articles),
            )
            .await;
        if !articles.is_empty() {
            return Some((articles, "top-headlines"));
        }

        let terms = enhanced_search_terms(country, category);
        let articles = self
            .attempt(
                "everything",
                self.source.search_everything(&terms, max_articles, ENHANCED_DAYS_BACK),
            )
            .await;
        if !articles.is_empty() {
            return Some((articles, "everything"));
        }

        None
    }

    /// Own country first, then the configured list, without repeats; the own
    /// country itself is excluded since it has already been tried
    fn alternate_countries(&self, country: &str) -> Vec<String> {
        let mut ordered: Vec<String> = vec![country.to_string()];
        for code in &self.policy.fallback_countries {
            let code = code.to_lowercase();
            if !ordered.contains(&code) {
                ordered.push(code);
            }
        }
        ordered.into_iter().filter(|c| c != country).collect()
    }

    async fn attempt<F>(&self, strategy: &str, call: F) -> Vec<Article>
    where
        F: Future<Output = Result<Vec<Article>, NewsError>>,
    {
        match timeout(self.policy.request_timeout, call).await {
            Ok(Ok(items)) => {
                let valid = filter_valid(items, &self.policy);
                debug!("{} yielded {} valid articles", strategy, valid.len());
                valid
            }
            Ok(Err(e)) => {
                warn!("{} failed: {}", strategy, e);
                Vec::new()
            }
            Err(_) => {
                warn!(
                    "{} timed out after {}s",
                    strategy,
                    self.policy.request_timeout.as_secs()
                );
                Vec::new()
            }
        }
    }

    fn envelope(&self, articles: Vec<Article>, strategy: String, max_articles: usize) -> ResultEnvelope {
        let (total_results, articles) = finalize(articles, &self.policy, max_articles);
        info!("{} produced {} headlines", strategy, articles.len());
        ResultEnvelope::success(
            total_results,
            articles,
            vec!["NewsAPI".to_string()],
            vec![strategy],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct NoSource;

    #[async_trait]
    impl HeadlineSource for NoSource {
        async fn top_headlines(&self, _: &str, _: Category, _: usize) -> Result<Vec<Article>, NewsError> {
            Ok(Vec::new())
        }

        async fn search_everything(&self, _: &str, _: usize, _: i64) -> Result<Vec<Article>, NewsError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_alternate_countries() {
        let service = HeadlineService::new(Arc::new(NoSource), AggregationPolicy::default());
        assert_eq!(service.alternate_countries("in"), vec!["us", "gb", "au", "ca"]);
        assert_eq!(
            service.alternate_countries("fr"),
            vec!["us", "in", "gb", "au", "ca"]
        );
    }

    #[test]
    fn test_from_config_requires_newsapi_key() {
        assert!(matches!(
            HeadlineService::from_config(&NewsConfig::default()),
            Err(NewsError::MissingCredential(_))
        ));
    }
}
