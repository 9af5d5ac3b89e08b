//! News Aggregator Service
//!
//! Runs the provider fan-out and the RSS fallback ladder for one query:
//!
//! 1. every configured provider, concurrently, each asked for an equal share
//! 2. RSS for the requested region when the merged yield is short
//! 3. RSS for alternate regions when the yield is below half the request
//!
//! The merged list is then filtered, deduplicated, sorted and truncated.

use std::sync::Arc;

use futures::future::join_all;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use briefing_core::{Article, Category, NewsQuery, Region, ResultEnvelope};
use briefing_news::{
    build_providers, filter_valid, finalize, AggregationPolicy, FeedFallback, NewsConfig,
    NewsError, NewsProvider, ProviderRequest, RssClient,
};

const NO_ARTICLES: &str = "No news articles found from any source";

/// Multi-provider news aggregator
pub struct NewsAggregator {
    providers: Vec<Arc<dyn NewsProvider>>,
    rss: Arc<dyn FeedFallback>,
    policy: AggregationPolicy,
}

impl NewsAggregator {
    /// Create an aggregator over an explicit provider list
    ///
    /// Provider order is merge order: earlier providers win deduplication ties.
    pub fn new(
        providers: Vec<Arc<dyn NewsProvider>>,
        rss: Arc<dyn FeedFallback>,
        policy: AggregationPolicy,
    ) -> Self {
        info!(
            "Initializing NewsAggregator with {} providers: {:?}",
            providers.len(),
            providers.iter().map(|p| p.name()).collect::<Vec<_>>()
        );
        Self {
            providers,
            rss,
            policy,
        }
    }

    /// Build providers for every configured key plus the curated RSS client
    pub fn from_config(config: &NewsConfig) -> Self {
        Self::new(
            build_providers(&config.keys, config.policy.request_timeout),
            Arc::new(RssClient::with_policy(&config.policy)),
            config.policy.clone(),
        )
    }

    /// Names of the providers this aggregator fans out to
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Aggregate news from loosely-typed input
    #[instrument(skip(self))]
    pub async fn fetch_news(&self, category: &str, region: &str, max_articles: usize) -> ResultEnvelope {
        self.fetch(&NewsQuery::parse(category, region, max_articles)).await
    }

    /// Aggregate news for a query
    ///
    /// Never fails: provider errors are absorbed by the fallback ladder and a
    /// fruitless call yields an error-status envelope.
    #[instrument(skip(self), fields(category = %query.category, region = %query.region))]
    pub async fn fetch(&self, query: &NewsQuery) -> ResultEnvelope {
        let max_articles = query.max_articles;
        let mut articles: Vec<Article> = Vec::new();
        let mut apis_used: Vec<String> = Vec::new();
        let mut sources_used: Vec<String> = Vec::new();

        // Stage 1: provider fan-out
        if !self.providers.is_empty() {
            let request = ProviderRequest::new(
                query.category,
                query.region,
                per_provider_budget(max_articles, self.providers.len()),
            );

            let results = join_all(
                self.providers
                    .iter()
                    .map(|provider| self.call_provider(provider.as_ref(), &request)),
            )
            .await;

            for (provider, result) in self.providers.iter().zip(results) {
                match result {
                    Ok(items) => {
                        let valid = filter_valid(items, &self.policy);
                        debug!("{} contributed {} valid articles", provider.name(), valid.len());
                        if !valid.is_empty() {
                            apis_used.push(provider.name().to_string());
                            articles.extend(valid);
                        }
                    }
                    Err(e) => {
                        warn!("Provider {} failed: {}", provider.name(), e);
                    }
                }
            }
        }

        info!(
            "Provider fan-out yielded {} articles from {:?}",
            articles.len(),
            apis_used
        );

        // Stage 2: RSS for the requested region
        if articles.len() < max_articles {
            let shortfall = max_articles - articles.len();
            let items = self.fetch_rss(query.category, query.region, shortfall).await;
            if !items.is_empty() {
                info!("RSS topped up {} articles", items.len());
                sources_used.push("RSS".to_string());
                articles.extend(items);
            }
        }

        // Stage 3: RSS for alternate regions, first one that yields wins
        if articles.len() * 2 < max_articles {
            for region in self
                .policy
                .fallback_regions
                .iter()
                .filter(|r| **r != query.region)
            {
                let shortfall = max_articles - articles.len();
                let items = self.fetch_rss(query.category, *region, shortfall).await;
                if !items.is_empty() {
                    info!("RSS fallback region {} yielded {} articles", region, items.len());
                    sources_used.push(format!("RSS-{}", region));
                    articles.extend(items);
                    break;
                }
            }
        }

        let (total_results, articles) = finalize(articles, &self.policy, max_articles);

        if articles.is_empty() {
            warn!("All sources exhausted without usable articles");
            return ResultEnvelope::failure(NO_ARTICLES);
        }

        info!(
            "Returning {} of {} articles (apis: {:?}, fallbacks: {:?})",
            articles.len(),
            total_results,
            apis_used,
            sources_used
        );
        ResultEnvelope::success(total_results, articles, apis_used, sources_used)
    }

    async fn call_provider(
        &self,
        provider: &dyn NewsProvider,
        request: &ProviderRequest,
    ) -> Result<Vec<Article>, NewsError> {
        match timeout(self.policy.request_timeout, provider.fetch(request)).await {
            Ok(result) => result,
            Err(_) => Err(NewsError::Timeout {
                provider: provider.name().to_string(),
                secs: self.policy.request_timeout.as_secs(),
            }),
        }
    }

    /// RSS articles that pass the validity filter; failures count as empty
    async fn fetch_rss(&self, category: Category, region: Region, max_articles: usize) -> Vec<Article> {
        match self.rss.fetch_feeds(category, region, max_articles).await {
            Ok(items) => filter_valid(items, &self.policy),
            Err(e) => {
                warn!("RSS fetch for {} failed: {}", region, e);
                Vec::new()
            }
        }
    }
}

/// Equal share of the request per provider, never zero
fn per_provider_budget(max_articles: usize, providers: usize) -> usize {
    (max_articles / providers.max(1)).max(1)
}
