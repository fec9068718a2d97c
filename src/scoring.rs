use std::ops::RangeInclusive;

use rand::Rng;

use crate::models::{CatalogItem, PreferenceSet};

/// Floor of every match score
pub const BASE_SCORE: u8 = 70;

/// Ceiling of every match score
pub const MAX_SCORE: u8 = 99;

/// Bonus per genre shared between the item and the user's preferences
pub const GENRE_MATCH_BONUS: i32 = 5;

/// Jitter added to emulate organic variance in the displayed score
pub const JITTER: RangeInclusive<i32> = -5..=4;

/// Computes the heuristic affinity score between an item and a preference set
///
/// Base 70, plus 5 per exact case-insensitive genre match (uncapped), plus
/// uniform jitter in [-5, +4], clamped to [70, 99]. The RNG is injected so
/// tests can pin exact scores with a seeded source. Never fails; an empty
/// preference set just contributes no bonus.
pub fn match_score<R: Rng>(item: &CatalogItem, prefs: &PreferenceSet, rng: &mut R) -> u8 {
    let genre_matches = item
        .genres
        .iter()
        .filter(|genre| {
            prefs
                .genres
                .iter()
                .any(|preferred| preferred.eq_ignore_ascii_case(genre))
        })
        .count() as i32;

    let score = BASE_SCORE as i32 + genre_matches * GENRE_MATCH_BONUS + rng.gen_range(JITTER);
    score.clamp(BASE_SCORE as i32, MAX_SCORE as i32) as u8
}

/// Draws a score uniformly from the valid range
///
/// Used when the provider omits a match score entirely.
pub fn random_match_score<R: Rng>(rng: &mut R) -> u8 {
    rng.gen_range(BASE_SCORE..=MAX_SCORE)
}
