//! Credentials and aggregation policy
//!
//! Credentials are read once, when the configuration is built, and passed
//! explicitly to whatever constructs the adapters.

use std::env;
use std::fmt;
use std::time::Duration;

use briefing_core::Region;

/// Optional API keys, one per paid provider
#[derive(Clone, Default)]
pub struct ApiKeys {
    pub gnews: Option<String>,
    pub newsapi: Option<String>,
    pub newsdata: Option<String>,
    pub mediastack: Option<String>,
    pub currents: Option<String>,
    pub worldnews: Option<String>,
    pub newscatcher: Option<String>,
}

impl ApiKeys {
    /// Read keys from the process environment
    ///
    /// Blank values count as absent. The World News key is accepted under
    /// both `WORLDNEWS_API_KEY` and `WORLD_NEWS_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            gnews: read_key("GNEWS_API_KEY"),
            newsapi: read_key("NEWS_API_KEY"),
            newsdata: read_key("NEWSDATA_API_KEY"),
            mediastack: read_key("MEDIASTACK_API_KEY"),
            currents: read_key("CURRENTS_API_KEY"),
            worldnews: read_key("WORLDNEWS_API_KEY").or_else(|| read_key("WORLD_NEWS_API_KEY")),
            newscatcher: read_key("NEWSCATCHER_API_KEY"),
        }
    }

    /// Names of providers that have a credential, in fan-out order
    pub fn configured(&self) -> Vec<&'static str> {
        [
            ("GNews", &self.gnews),
            ("NewsAPI", &self.newsapi),
            ("NewsData", &self.newsdata),
            ("MediaStack", &self.mediastack),
            ("Currents", &self.currents),
            ("WorldNews", &self.worldnews),
            ("NewsCatcher", &self.newscatcher),
        ]
        .into_iter()
        .filter(|(_, key)| key.is_some())
        .map(|(name, _)| name)
        .collect()
    }
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeys")
            .field("configured", &self.configured())
            .finish()
    }
}

fn read_key(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Tunable constants of the aggregation pipeline
#[derive(Debug, Clone)]
pub struct AggregationPolicy {
    /// Titles sharing more than this fraction of tokens are duplicates
    pub duplicate_threshold: f64,
    /// Minimum title length in characters
    pub min_title_len: usize,
    /// Minimum description length in characters
    pub min_description_len: usize,
    /// Case-insensitive markers of unavailable content
    pub blocked_phrases: Vec<String>,
    /// Per-call budget for paid providers
    pub request_timeout: Duration,
    /// Per-call budget for syndication feeds
    pub feed_timeout: Duration,
    /// Maximum feeds fetched per RSS request
    pub feeds_per_request: usize,
    /// Alternate RSS regions walked when yield stays below half the request
    pub fallback_regions: Vec<Region>,
    /// Alternate country codes for the headline fallback path
    pub fallback_countries: Vec<String>,
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        Self {
            duplicate_threshold: 0.7,
            min_title_len: 10,
            min_description_len: 30,
            blocked_phrases: ["[removed]", "removed", "unavailable", "access denied", "subscribe to read"]
                .into_iter()
                .map(String::from)
                .collect(),
            request_timeout: Duration::from_secs(15),
            feed_timeout: Duration::from_secs(10),
            feeds_per_request: 3,
            fallback_regions: vec![Region::Global, Region::Us, Region::India, Region::Uk],
            fallback_countries: ["us", "in", "gb", "au", "ca"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl AggregationPolicy {
    /// Defaults overridden by `NEWS_*` environment variables
    ///
    /// Recognized: NEWS_DUPLICATE_THRESHOLD, NEWS_MIN_TITLE_LEN,
    /// NEWS_MIN_DESCRIPTION_LEN, NEWS_REQUEST_TIMEOUT_SECS.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut policy = Self::default();

        if let Some(threshold) = parse_var::<f64>("NEWS_DUPLICATE_THRESHOLD")? {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::OutOfRange {
                    field: "NEWS_DUPLICATE_THRESHOLD".to_string(),
                    value: threshold.to_string(),
                });
            }
            policy.duplicate_threshold = threshold;
        }
        if let Some(len) = parse_var::<usize>("NEWS_MIN_TITLE_LEN")? {
            policy.min_title_len = len;
        }
        if let Some(len) = parse_var::<usize>("NEWS_MIN_DESCRIPTION_LEN")? {
            policy.min_description_len = len;
        }
        if let Some(secs) = parse_var::<u64>("NEWS_REQUEST_TIMEOUT_SECS")? {
            if secs == 0 {
                return Err(ConfigError::OutOfRange {
                    field: "NEWS_REQUEST_TIMEOUT_SECS".to_string(),
                    value: secs.to_string(),
                });
            }
            policy.request_timeout = Duration::from_secs(secs);
        }

        Ok(policy)
    }
}

fn parse_var<T: std::str::FromStr>(var: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field: var.to_string(),
                error: e.to_string(),
            }),
        _ => Ok(None),
    }
}

/// Full configuration of the news aggregation layer
#[derive(Debug, Clone, Default)]
pub struct NewsConfig {
    pub keys: ApiKeys,
    pub policy: AggregationPolicy,
}

impl NewsConfig {
    /// Load credentials and policy overrides from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            keys: ApiKeys::from_env(),
            policy: AggregationPolicy::from_env()?,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value in {field}: {error}")]
    InvalidValue { field: String, error: String },

    #[error("{field} out of range: {value}")]
    OutOfRange { field: String, value: String },
}
