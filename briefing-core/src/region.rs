//! Logical regions and their per-provider renderings
//!
//! Providers disagree on how a geography is spelled: some want an ISO
//! country code, some a country name, MediaStack a CSV of codes for global
//! coverage. All of that vocabulary lives here so adapters never carry
//! their own string tables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A logical geography token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Global,
    Us,
    India,
    Uk,
    Australia,
    Canada,
}

impl Region {
    /// Resolve a logical name ("india") or ISO code ("in", "gb")
    ///
    /// Unknown tokens resolve to `Global`.
    pub fn parse(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "us" | "usa" | "united states" => Region::Us,
            "in" | "india" => Region::India,
            "uk" | "gb" | "united kingdom" => Region::Uk,
            "au" | "australia" => Region::Australia,
            "ca" | "canada" => Region::Canada,
            _ => Region::Global,
        }
    }

    /// Logical name, also the key used by the RSS feed table
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Global => "global",
            Region::Us => "us",
            Region::India => "india",
            Region::Uk => "uk",
            Region::Australia => "australia",
            Region::Canada => "canada",
        }
    }

    /// Lower-case ISO country code; global coverage defaults to the US edition
    pub fn country_code(&self) -> &'static str {
        match self {
            Region::Global | Region::Us => "us",
            Region::India => "in",
            Region::Uk => "gb",
            Region::Australia => "au",
            Region::Canada => "ca",
        }
    }

    /// Country name for keyword-search providers
    pub fn country_name(&self) -> Option<&'static str> {
        match self {
            Region::Global => None,
            Region::Us => Some("United States"),
            Region::India => Some("India"),
            Region::Uk => Some("United Kingdom"),
            Region::Australia => Some("Australia"),
            Region::Canada => Some("Canada"),
        }
    }

    /// MediaStack `countries` parameter
    pub fn mediastack_countries(&self) -> &'static str {
        match self {
            Region::Global => "us,gb,in,au,ca",
            other => other.country_code(),
        }
    }

    /// Upper-case ISO code for location filters; global applies no filter
    pub fn location_filter(&self) -> Option<&'static str> {
        match self {
            Region::Global => None,
            Region::Us => Some("US"),
            Region::India => Some("IN"),
            Region::Uk => Some("GB"),
            Region::Australia => Some("AU"),
            Region::Canada => Some("CA"),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_codes() {
        assert_eq!(Region::parse("india"), Region::India);
        assert_eq!(Region::parse("IN"), Region::India);
        assert_eq!(Region::parse("gb"), Region::Uk);
        assert_eq!(Region::parse("uk"), Region::Uk);
        assert_eq!(Region::parse("mars"), Region::Global);
    }

    #[test]
    fn test_provider_renderings() {
        assert_eq!(Region::Global.country_code(), "us");
        assert_eq!(Region::Uk.country_code(), "gb");
        assert_eq!(Region::Global.country_name(), None);
        assert_eq!(Region::India.country_name(), Some("India"));
        assert_eq!(Region::Global.mediastack_countries(), "us,gb,in,au,ca");
        assert_eq!(Region::India.mediastack_countries(), "in");
        assert_eq!(Region::Uk.location_filter(), Some("GB"));
        assert_eq!(Region::Global.location_filter(), None);
    }
}
