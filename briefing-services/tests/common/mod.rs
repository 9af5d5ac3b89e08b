//! In-memory providers for orchestration tests

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use briefing_core::{Article, ArticleSource, Category, Region};
use briefing_news::{FeedFallback, HeadlineSource, NewsError, NewsProvider, ProviderRequest};

/// A valid article whose title shares no token with any other `(tag, i)`
pub fn story(tag: &str, i: usize) -> Article {
    Article {
        title: format!("{tag}{i} {tag}alpha{i} {tag}beta{i} {tag}gamma{i}"),
        description: "A description long enough to pass the validity filter.".to_string(),
        url: format!("https://{tag}.example.com/{i}"),
        published_at: format!("2024-05-01T{:02}:{:02}:00Z", (i / 60) % 24, i % 60),
        source: ArticleSource::new(tag),
        content: String::new(),
    }
}

pub fn stories(tag: &str, count: usize) -> Vec<Article> {
    (0..count).map(|i| story(tag, i)).collect()
}

/// Provider returning a fixed list after an optional delay
pub struct StaticProvider {
    name: &'static str,
    articles: Vec<Article>,
    delay: Duration,
    pub requests: Mutex<Vec<usize>>,
}

impl StaticProvider {
    pub fn new(name: &'static str, articles: Vec<Article>) -> Self {
        Self {
            name,
            articles,
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl NewsProvider for StaticProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, request: &ProviderRequest) -> Result<Vec<Article>, NewsError> {
        self.requests.lock().unwrap().push(request.max_articles);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.articles.clone())
    }
}

/// Provider that always fails
pub struct FailingProvider(pub &'static str);

#[async_trait]
impl NewsProvider for FailingProvider {
    fn name(&self) -> &'static str {
        self.0
    }

    async fn fetch(&self, _request: &ProviderRequest) -> Result<Vec<Article>, NewsError> {
        Err(NewsError::RequestFailed("connection refused".to_string()))
    }
}

/// Feed fallback with canned articles per region
#[derive(Default)]
pub struct StaticFeeds {
    by_region: Vec<(Region, Vec<Article>)>,
    pub calls: Mutex<Vec<(Region, usize)>>,
}

impl StaticFeeds {
    pub fn with_region(mut self, region: Region, articles: Vec<Article>) -> Self {
        self.by_region.push((region, articles));
        self
    }

    pub fn calls(&self) -> Vec<(Region, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedFallback for StaticFeeds {
    async fn fetch_feeds(
        &self,
        _category: Category,
        region: Region,
        max_articles: usize,
    ) -> Result<Vec<Article>, NewsError> {
        self.calls.lock().unwrap().push((region, max_articles));
        Ok(self
            .by_region
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, articles)| articles.iter().take(max_articles).cloned().collect())
            .unwrap_or_default())
    }
}

/// Headline source that answers only the call whose key starts with `answer_on`
///
/// Keys are `top:<country>:<category>` and `search:<days>:<terms>`.
pub struct ScriptedHeadlines {
    answer_on: Option<String>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedHeadlines {
    pub fn answering(key: &str) -> Self {
        Self {
            answer_on: Some(key.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn silent() -> Self {
        Self {
            answer_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, key: String) -> Vec<Article> {
        let hit = self
            .answer_on
            .as_deref()
            .is_some_and(|prefix| key.starts_with(prefix));
        self.calls.lock().unwrap().push(key);
        if hit {
            stories("headline", 3)
        } else {
            Vec::new()
        }
    }
}

#[async_trait]
impl HeadlineSource for ScriptedHeadlines {
    async fn top_headlines(
        &self,
        country: &str,
        category: Category,
        _max_articles: usize,
    ) -> Result<Vec<Article>, NewsError> {
        Ok(self.respond(format!("top:{}:{}", country, category)))
    }

    async fn search_everything(
        &self,
        terms: &str,
        _max_articles: usize,
        days_back: i64,
    ) -> Result<Vec<Article>, NewsError> {
        Ok(self.respond(format!("search:{}:{}", days_back, terms)))
    }
}
