//! RSS/Atom fallback client
//!
//! Credential-free last resort. Feeds come from a curated table keyed by
//! category and region; a handful are fetched concurrently per request.

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use briefing_core::{Article, Category, Region};

use crate::config::AggregationPolicy;
use crate::error::NewsError;
use crate::normalize::RawArticle;
use crate::provider::{http_client, FeedFallback};

/// Source name used when a feed has no title
const DEFAULT_SOURCE: &str = "RSS Source";

// ============================================================================
// Curated feeds
// ============================================================================

const GENERAL_GLOBAL: &[&str] = &[
    "https://feeds.bbci.co.uk/news/rss.xml",
    "https://rss.cnn.com/rss/edition.rss",
    "https://feeds.reuters.com/reuters/topNews",
    "https://feeds.nbcnews.com/nbcnews/public/news",
    "https://feeds.skynews.com/feeds/rss/world.xml",
    "https://feeds.feedburner.com/time/world",
    "https://feeds.washingtonpost.com/rss/world",
];

const GENERAL_INDIA: &[&str] = &[
    "https://feeds.feedburner.com/ndtvnews-top-stories",
    "https://timesofindia.indiatimes.com/rssfeedstopstories.cms",
    "https://www.thehindu.com/news/national/?service=rss",
    "https://indianexpress.com/feed/",
    "https://www.hindustantimes.com/feeds/rss/india-news/index.xml",
    "https://www.business-standard.com/rss/latest.rss",
];

const GENERAL_US: &[&str] = &[
    "https://feeds.washingtonpost.com/rss/national",
    "https://rss.nytimes.com/services/xml/rss/nyt/US.xml",
    "https://feeds.usatoday.com/usatoday-NewsTopStories",
    "https://feeds.foxnews.com/foxnews/politics",
];

const GENERAL_UK: &[&str] = &[
    "https://feeds.bbci.co.uk/news/uk/rss.xml",
    "https://www.theguardian.com/uk/rss",
    "https://feeds.skynews.com/feeds/rss/uk.xml",
];

const TECHNOLOGY_GLOBAL: &[&str] = &[
    "https://feeds.feedburner.com/TechCrunch",
    "https://feeds.arstechnica.com/arstechnica/index",
    "https://www.wired.com/feed/rss",
    "https://feeds.reuters.com/reuters/technologyNews",
    "https://feeds.feedburner.com/venturebeat/SZYF",
    "https://www.theverge.com/rss/index.xml",
    "https://feeds.mashable.com/Mashable",
    "https://techcrunch.com/feed/",
];

const TECHNOLOGY_INDIA: &[&str] = &[
    "https://economictimes.indiatimes.com/tech/rssfeeds/13357270.cms",
    "https://www.financialexpress.com/industry/technology/feed/",
];

const BUSINESS_GLOBAL: &[&str] = &[
    "https://feeds.reuters.com/reuters/businessNews",
    "https://feeds.bloomberg.com/markets/news.rss",
    "https://feeds.cnbc.com/cnbc/news",
    "https://feeds.fortune.com/fortune/feed",
    "https://feeds.feedburner.com/entrepreneur/latest",
    "https://feeds.forbes.com/forbesbusiness/feed2.xml",
];

const BUSINESS_INDIA: &[&str] = &[
    "https://economictimes.indiatimes.com/rssfeedstopstories.cms",
    "https://www.business-standard.com/rss/home_page_top_stories.rss",
    "https://www.financialexpress.com/market/feed/",
];

const HEALTH_GLOBAL: &[&str] = &[
    "https://feeds.reuters.com/reuters/health",
    "https://www.who.int/rss-feeds/news-english.xml",
    "https://feeds.webmd.com/rss/rss.aspx?RSSSource=RSS_PUBLIC",
];

const SPORTS_GLOBAL: &[&str] = &[
    "https://feeds.bbci.co.uk/sport/rss.xml",
    "https://feeds.reuters.com/reuters/sportsNews",
    "http://rss.espn.com/rss/news",
];

/// Table entry for an exact (category, region) pair
fn table_entry(category: Category, region: Region) -> Option<&'static [&'static str]> {
    match (category, region) {
        (Category::General, Region::Global) => Some(GENERAL_GLOBAL),
        (Category::General, Region::India) => Some(GENERAL_INDIA),
        (Category::General, Region::Us) => Some(GENERAL_US),
        (Category::General, Region::Uk) => Some(GENERAL_UK),
        (Category::Technology, Region::Global) => Some(TECHNOLOGY_GLOBAL),
        (Category::Technology, Region::India) => Some(TECHNOLOGY_INDIA),
        (Category::Business, Region::Global) => Some(BUSINESS_GLOBAL),
        (Category::Business, Region::India) => Some(BUSINESS_INDIA),
        (Category::Health, Region::Global) => Some(HEALTH_GLOBAL),
        (Category::Sports, Region::Global) => Some(SPORTS_GLOBAL),
        _ => None,
    }
}

/// Feed URLs for a category and region
///
/// Exact match first. India borrows the category's global feeds when it has
/// none of its own; everything else falls back to the general feeds of the
/// region, then to general/global.
pub fn curated_feeds(category: Category, region: Region) -> &'static [&'static str] {
    if let Some(feeds) = table_entry(category, region) {
        return feeds;
    }
    if region == Region::India {
        if let Some(feeds) = table_entry(category, Region::Global) {
            return feeds;
        }
    }
    table_entry(Category::General, region).unwrap_or(GENERAL_GLOBAL)
}

// ============================================================================
// Client
// ============================================================================

/// RSS/Atom feed client
pub struct RssClient {
    client: Client,
    feeds_per_request: usize,
}

impl RssClient {
    /// Create a client with the default feed budget
    pub fn new() -> Self {
        Self::with_policy(&AggregationPolicy::default())
    }

    /// Create a client using the feed timeout and per-request feed count of a policy
    pub fn with_policy(policy: &AggregationPolicy) -> Self {
        Self {
            client: http_client(policy.feed_timeout),
            feeds_per_request: policy.feeds_per_request,
        }
    }

    /// Fetch a single feed, keeping at most `max_articles` entries
    async fn fetch_feed(&self, url: &str, max_articles: usize) -> Result<Vec<Article>, NewsError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NewsError::ApiError {
                status: response.status().as_u16(),
                message: format!("Failed to fetch {}", url),
            });
        }

        let content = response
            .bytes()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        parse_feed(&content, max_articles)
            .ok_or_else(|| NewsError::ParseError(format!("Failed to parse feed: {}", url)))
    }
}

impl Default for RssClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedFallback for RssClient {
    #[instrument(skip(self))]
    async fn fetch_feeds(
        &self,
        category: Category,
        region: Region,
        max_articles: usize,
    ) -> Result<Vec<Article>, NewsError> {
        let feeds: Vec<&str> = curated_feeds(category, region)
            .iter()
            .take(self.feeds_per_request)
            .copied()
            .collect();

        let results = join_all(feeds.iter().map(|url| self.fetch_feed(url, max_articles))).await;

        let mut articles = Vec::new();
        for (url, result) in feeds.iter().zip(results) {
            match result {
                Ok(items) => {
                    debug!("Fetched {} items from {}", items.len(), url);
                    articles.extend(items);
                }
                Err(e) => {
                    warn!("Failed to fetch feed {}: {}", url, e);
                }
            }
        }

        info!(
            "Fetched {} RSS items for {}/{}",
            articles.len(),
            category,
            region
        );
        Ok(articles)
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse an RSS 2.0 or Atom document; `None` when it is neither
pub fn parse_feed(content: &[u8], max_articles: usize) -> Option<Vec<Article>> {
    if let Ok(channel) = rss::Channel::read_from(content) {
        return Some(parse_rss_channel(&channel, max_articles));
    }

    if let Ok(feed) = atom_syndication::Feed::read_from(content) {
        return Some(parse_atom_feed(&feed, max_articles));
    }

    None
}

fn parse_rss_channel(channel: &rss::Channel, max_articles: usize) -> Vec<Article> {
    let source = non_empty(channel.title()).unwrap_or(DEFAULT_SOURCE);

    channel
        .items()
        .iter()
        .take(max_articles)
        .map(|item| {
            RawArticle {
                title: item.title().map(str::to_string),
                description: item.description().map(strip_html),
                url: item.link().map(str::to_string),
                published_at: item.pub_date().map(str::to_string),
                source: source.to_string(),
                content: item.content().map(str::to_string),
            }
            .into_article()
        })
        .collect()
}

fn parse_atom_feed(feed: &atom_syndication::Feed, max_articles: usize) -> Vec<Article> {
    let source = non_empty(feed.title().as_str()).unwrap_or(DEFAULT_SOURCE);

    feed.entries()
        .iter()
        .take(max_articles)
        .map(|entry| {
            let published = entry.published().unwrap_or_else(|| entry.updated());
            RawArticle {
                title: Some(entry.title().to_string()),
                description: entry.summary().map(|s| strip_html(s.as_str())),
                url: entry.links().first().map(|l| l.href().to_string()),
                published_at: Some(published.to_rfc3339()),
                source: source.to_string(),
                content: entry.content().and_then(|c| c.value()).map(str::to_string),
            }
            .into_article()
        })
        .collect()
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Strip HTML tags and common entities from text
fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
