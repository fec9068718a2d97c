use crate::models::{FilterSet, PreferenceSet, UserRating};

/// System instructions sent with every generation request
pub const SYSTEM_PROMPT: &str = "You are CineMatch AI, an expert movie and TV show \
recommendation engine. Generate personalized recommendations based on user preferences. \
Always respond with valid JSON containing an array of recommendations.";

/// Number of recommendations requested per generation
pub const RECOMMENDATION_COUNT: usize = 6;

/// Ratings at or above this (on a 1-5 scale) are quoted back to the model
const HIGHLY_RATED_THRESHOLD: i16 = 4;

fn labels_or(labels: &[String], fallback: &str) -> String {
    if labels.is_empty() {
        fallback.to_string()
    } else {
        labels.join(", ")
    }
}

fn value_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Builds the natural-language prompt embedding the preference set, active
/// filters, rating history, and the tier-conditioned instruction block
pub fn build_user_prompt(
    prefs: &PreferenceSet,
    filters: &FilterSet,
    is_premium: bool,
    ratings: &[UserRating],
) -> String {
    let highly_rated: Vec<&str> = ratings
        .iter()
        .filter(|r| r.rating >= HIGHLY_RATED_THRESHOLD)
        .map(|r| r.title.as_str())
        .collect();

    let ratings_block = if highly_rated.is_empty() {
        String::new()
    } else {
        format!(
            "\nTitles the user rated highly: {}\n",
            highly_rated.join(", ")
        )
    };

    let premium_block = if is_premium {
        "\nThis is a PREMIUM user, so provide:\n\
         - More niche and sophisticated recommendations\n\
         - Hidden gems and critically acclaimed content\n\
         - Detailed analysis of why each recommendation matches their taste\n\
         - Higher quality, curated suggestions\n"
    } else {
        ""
    };

    format!(
        r#"Generate {count} movie and TV show recommendations for a user with these preferences:

User Preferences:
- Favorite Genres: {genres}
- Preferred Moods: {moods}
- Time Preferences: {times}
- Streaming Platforms: {platforms}

Current Filters:
- Mood: {filter_mood}
- Time: {filter_time}
- Genre: {filter_genre}
- Type: {filter_type}
- Search: {filter_search}
{ratings_block}{premium_block}
Return a JSON array of {count} recommendations with this exact structure:
[
  {{
    "title": "Movie/Show Title",
    "description": "Brief engaging description (2-3 sentences)",
    "type": "movie" or "series",
    "year": 2023,
    "duration": "1h 45m" or "45m/episode",
    "genres": ["Genre1", "Genre2"],
    "moodTags": ["Mood1"],
    "rating": 8.5,
    "matchScore": 85,
    "posterUrl": null,
    "isPremiumRecommendation": {is_premium},
    "whyRecommended": "One sentence on the match"
  }}
]

Focus on variety and ensure each recommendation genuinely matches the user's stated preferences."#,
        count = RECOMMENDATION_COUNT,
        genres = labels_or(&prefs.genres, "Various"),
        moods = labels_or(&prefs.moods, "Various"),
        times = labels_or(&prefs.time_preferences, "Any"),
        platforms = labels_or(&prefs.streaming_platforms, "Any"),
        filter_mood = value_or(&filters.mood, "Any"),
        filter_time = value_or(&filters.time_available, "Any"),
        filter_genre = value_or(&filters.genre, "Any"),
        filter_type = value_or(&filters.content_type, "Any"),
        filter_search = value_or(&filters.search, "None"),
        ratings_block = ratings_block,
        premium_block = premium_block,
        is_premium = is_premium,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn prefs() -> PreferenceSet {
        PreferenceSet {
            genres: vec!["Comedy".to_string(), "Drama".to_string()],
            moods: vec!["Cozy".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_prompt_embeds_preferences_and_filters() {
        let filters = FilterSet {
            genre: "comedy".to_string(),
            search: "hotel".to_string(),
            ..Default::default()
        };
        let prompt = build_user_prompt(&prefs(), &filters, false, &[]);

        assert!(prompt.contains("Favorite Genres: Comedy, Drama"));
        assert!(prompt.contains("Preferred Moods: Cozy"));
        assert!(prompt.contains("Genre: comedy"));
        assert!(prompt.contains("Search: hotel"));
    }

    #[test]
    fn test_empty_fields_fall_back_to_wildcard_text() {
        let prompt = build_user_prompt(&PreferenceSet::default(), &FilterSet::default(), false, &[]);

        assert!(prompt.contains("Favorite Genres: Various"));
        assert!(prompt.contains("Time Preferences: Any"));
        assert!(prompt.contains("Search: None"));
    }

    #[test]
    fn test_premium_block_only_for_premium_users() {
        let free = build_user_prompt(&prefs(), &FilterSet::default(), false, &[]);
        let premium = build_user_prompt(&prefs(), &FilterSet::default(), true, &[]);

        assert!(!free.contains("PREMIUM user"));
        assert!(premium.contains("PREMIUM user"));
        assert!(premium.contains("niche"));
    }

    #[test]
    fn test_only_highly_rated_titles_are_quoted() {
        let user_id = Uuid::new_v4();
        let ratings = vec![
            UserRating {
                user_id,
                title: "Parasite".to_string(),
                rating: 5,
            },
            UserRating {
                user_id,
                title: "Cats".to_string(),
                rating: 1,
            },
        ];
        let prompt = build_user_prompt(&prefs(), &FilterSet::default(), false, &ratings);

        assert!(prompt.contains("rated highly: Parasite"));
        assert!(!prompt.contains("Cats"));
    }
}
