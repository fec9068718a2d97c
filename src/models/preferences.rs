use serde::{Deserialize, Serialize};

/// A user's stated taste, gathered during onboarding
///
/// Each field is a set of display labels. Labels are unique within a set
/// (case-insensitive) and toggling is idempotent: toggling a label that is
/// already present removes it, toggling an absent one adds it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceSet {
    pub genres: Vec<String>,
    pub moods: Vec<String>,
    pub time_preferences: Vec<String>,
    pub streaming_platforms: Vec<String>,
}

impl PreferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_genre(&mut self, label: &str) {
        toggle(&mut self.genres, label);
    }

    pub fn toggle_mood(&mut self, label: &str) {
        toggle(&mut self.moods, label);
    }

    pub fn toggle_time_preference(&mut self, label: &str) {
        toggle(&mut self.time_preferences, label);
    }

    pub fn toggle_platform(&mut self, label: &str) {
        toggle(&mut self.streaming_platforms, label);
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
            && self.moods.is_empty()
            && self.time_preferences.is_empty()
            && self.streaming_platforms.is_empty()
    }
}

fn toggle(labels: &mut Vec<String>, label: &str) {
    if let Some(pos) = labels.iter().position(|l| l.eq_ignore_ascii_case(label)) {
        labels.remove(pos);
    } else {
        labels.push(label.to_string());
    }
}

/// Active dashboard filters
///
/// Empty string means "no constraint" for that field; it is never treated as
/// a literal match target.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSet {
    pub genre: String,
    pub mood: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub search: String,
    pub time_available: String,
}

impl FilterSet {
    /// True when every field is the empty-string wildcard
    pub fn is_unconstrained(&self) -> bool {
        self.genre.is_empty()
            && self.mood.is_empty()
            && self.content_type.is_empty()
            && self.search.is_empty()
            && self.time_available.is_empty()
    }
}
