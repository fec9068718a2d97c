use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::scoring;

/// Type of content
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Series,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Series => "series",
        }
    }
}

/// A single recommendation card as served to the client
///
/// Constructed fresh on every generation request, either from a validated
/// provider response or from the fallback catalog. Never mutated in place;
/// each generation replaces the prior list wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub year: Option<i32>,
    /// Display string, not a structured duration ("2h 12m" or "45m/episode")
    pub duration: Option<String>,
    pub genres: Vec<String>,
    pub mood_tags: Vec<String>,
    pub rating: Option<f64>,
    /// Heuristic affinity score in [70, 99]
    pub match_score: u8,
    pub poster_url: Option<String>,
    pub is_premium_recommendation: bool,
    pub director: Option<String>,
    pub cast: Vec<String>,
    pub streaming_platforms: Vec<String>,
    pub is_niche: bool,
    pub why_recommended: Option<String>,
}

/// Untrusted recommendation object as returned by the text-generation provider
///
/// Every field is optional on the wire; [`ProviderRecommendation::into_item`]
/// applies the documented per-field defaults. A response that fails to parse
/// into a list of these is treated as a provider failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecommendation {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub content_type: Option<ContentType>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub mood_tags: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub match_score: Option<u8>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub is_premium_recommendation: bool,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub streaming_platforms: Vec<String>,
    #[serde(default)]
    pub is_niche: bool,
    #[serde(default)]
    pub why_recommended: Option<String>,
}

impl ProviderRecommendation {
    /// Converts a validated provider object into a [`CatalogItem`]
    ///
    /// Missing title becomes "Unknown Title", a missing match score is drawn
    /// uniformly from [70, 99], and the premium flag is only honored for
    /// premium users.
    pub fn into_item<R: Rng>(self, is_premium: bool, rng: &mut R) -> CatalogItem {
        CatalogItem {
            title: self.title.unwrap_or_else(|| "Unknown Title".to_string()),
            description: self
                .description
                .unwrap_or_else(|| "No description available".to_string()),
            content_type: self.content_type.unwrap_or(ContentType::Movie),
            year: self.year,
            duration: self.duration,
            genres: self.genres,
            mood_tags: self.mood_tags,
            rating: self.rating,
            match_score: self
                .match_score
                .filter(|s| (scoring::BASE_SCORE..=scoring::MAX_SCORE).contains(s))
                .unwrap_or_else(|| scoring::random_match_score(rng)),
            poster_url: self.poster_url,
            is_premium_recommendation: is_premium && self.is_premium_recommendation,
            director: self.director,
            cast: self.cast,
            streaming_platforms: self.streaming_platforms,
            is_niche: self.is_niche,
            why_recommended: self.why_recommended,
        }
    }
}
