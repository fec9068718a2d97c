use crate::models::{CatalogItem, FilterSet};

/// Applies the active filters to a recommendation list
///
/// All active (non-empty) fields combine with AND semantics; order is
/// preserved. An empty result is returned as-is rather than silently
/// widening back to the unfiltered list, so the user's filter intent is
/// never discarded.
///
/// The time-availability field participates only in prompt construction,
/// since item durations are free-text display strings.
pub fn apply_filters(items: &[CatalogItem], filters: &FilterSet) -> Vec<CatalogItem> {
    items
        .iter()
        .filter(|item| matches_filters(item, filters))
        .cloned()
        .collect()
}

fn matches_filters(item: &CatalogItem, filters: &FilterSet) -> bool {
    if !filters.genre.is_empty()
        && !item.genres.iter().any(|g| contains_ci(g, &filters.genre))
    {
        return false;
    }

    if !filters.mood.is_empty()
        && !item.mood_tags.iter().any(|m| contains_ci(m, &filters.mood))
    {
        return false;
    }

    if !filters.content_type.is_empty() && item.content_type.as_str() != filters.content_type {
        return false;
    }

    if !filters.search.is_empty() {
        let term = &filters.search;
        let hit = contains_ci(&item.title, term)
            || contains_ci(&item.description, term)
            || item.genres.iter().any(|g| contains_ci(g, term));
        if !hit {
            return false;
        }
    }

    true
}

/// Removes premium-flagged items for free users
///
/// Premium users see the list unchanged.
pub fn apply_tier(items: Vec<CatalogItem>, is_premium: bool) -> Vec<CatalogItem> {
    if is_premium {
        return items;
    }
    items
        .into_iter()
        .filter(|item| !item.is_premium_recommendation)
        .collect()
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
