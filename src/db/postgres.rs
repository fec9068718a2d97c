use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::db::ProfileStore;
use crate::error::AppResult;
use crate::models::{PreferenceSet, Subscription, UserRating};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// One row of the `user_preferences` table
///
/// Preferences are stored label-per-row as
/// `{user_id, preference_type, preference_value, score}`.
#[derive(Debug, Clone, sqlx::FromRow)]
struct PreferenceRow {
    preference_type: String,
    preference_value: String,
}

const PREF_TYPE_GENRE: &str = "genre";
const PREF_TYPE_MOOD: &str = "mood";
const PREF_TYPE_TIME: &str = "time";
const PREF_TYPE_PLATFORM: &str = "platform";

fn fold_preferences(rows: Vec<PreferenceRow>) -> PreferenceSet {
    let mut prefs = PreferenceSet::new();
    for row in rows {
        let labels = match row.preference_type.as_str() {
            PREF_TYPE_GENRE => &mut prefs.genres,
            PREF_TYPE_MOOD => &mut prefs.moods,
            PREF_TYPE_TIME => &mut prefs.time_preferences,
            PREF_TYPE_PLATFORM => &mut prefs.streaming_platforms,
            other => {
                tracing::warn!(preference_type = %other, "Skipping unknown preference type");
                continue;
            }
        };
        // Duplicate rows must not violate the no-duplicate-labels invariant
        if !labels
            .iter()
            .any(|l| l.eq_ignore_ascii_case(&row.preference_value))
        {
            labels.push(row.preference_value);
        }
    }
    prefs
}

fn unfold_preferences(prefs: &PreferenceSet) -> Vec<(&'static str, &str)> {
    let mut rows = Vec::new();
    rows.extend(prefs.genres.iter().map(|v| (PREF_TYPE_GENRE, v.as_str())));
    rows.extend(prefs.moods.iter().map(|v| (PREF_TYPE_MOOD, v.as_str())));
    rows.extend(
        prefs
            .time_preferences
            .iter()
            .map(|v| (PREF_TYPE_TIME, v.as_str())),
    );
    rows.extend(
        prefs
            .streaming_platforms
            .iter()
            .map(|v| (PREF_TYPE_PLATFORM, v.as_str())),
    );
    rows
}

/// Postgres-backed profile store
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProfileStore for PgProfileStore {
    async fn get_preferences(&self, user_id: Uuid) -> AppResult<PreferenceSet> {
        let rows: Vec<PreferenceRow> = sqlx::query_as(
            "SELECT preference_type, preference_value \
             FROM user_preferences WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(fold_preferences(rows))
    }

    async fn get_ratings(&self, user_id: Uuid) -> AppResult<Vec<UserRating>> {
        let ratings: Vec<UserRating> = sqlx::query_as(
            "SELECT user_id, title, rating \
             FROM user_ratings WHERE user_id = $1 ORDER BY rating DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ratings)
    }

    async fn get_subscription(&self, user_id: Uuid) -> AppResult<Option<Subscription>> {
        let subscription: Option<Subscription> = sqlx::query_as(
            "SELECT user_id, stripe_price_id, status, current_period_start, \
                    current_period_end, cancel_at_period_end \
             FROM subscriptions WHERE user_id = $1 AND status = 'active'",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subscription)
    }

    async fn put_preferences(&self, user_id: Uuid, prefs: &PreferenceSet) -> AppResult<()> {
        // Preferences are replaced wholesale, matching how the onboarding
        // flow submits them.
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM user_preferences WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for (preference_type, preference_value) in unfold_preferences(prefs) {
            sqlx::query(
                "INSERT INTO user_preferences (user_id, preference_type, preference_value, score) \
                 VALUES ($1, $2, $3, 1.0)",
            )
            .bind(user_id)
            .bind(preference_type)
            .bind(preference_value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(preference_type: &str, preference_value: &str) -> PreferenceRow {
        PreferenceRow {
            preference_type: preference_type.to_string(),
            preference_value: preference_value.to_string(),
        }
    }

    #[test]
    fn test_fold_preferences_by_type() {
        let rows = vec![
            row("genre", "Comedy"),
            row("genre", "Drama"),
            row("mood", "Cozy"),
            row("time", "Under 1 hour"),
            row("platform", "Netflix"),
        ];

        let prefs = fold_preferences(rows);
        assert_eq!(prefs.genres, vec!["Comedy", "Drama"]);
        assert_eq!(prefs.moods, vec!["Cozy"]);
        assert_eq!(prefs.time_preferences, vec!["Under 1 hour"]);
        assert_eq!(prefs.streaming_platforms, vec!["Netflix"]);
    }

    #[test]
    fn test_fold_preferences_skips_unknown_types() {
        let rows = vec![row("genre", "Comedy"), row("favorite_color", "blue")];
        let prefs = fold_preferences(rows);
        assert_eq!(prefs.genres, vec!["Comedy"]);
        assert!(prefs.moods.is_empty());
    }

    #[test]
    fn test_fold_preferences_deduplicates() {
        let rows = vec![row("genre", "Comedy"), row("genre", "comedy")];
        let prefs = fold_preferences(rows);
        assert_eq!(prefs.genres, vec!["Comedy"]);
    }

    #[test]
    fn test_unfold_round_trips_fold() {
        let mut prefs = PreferenceSet::new();
        prefs.toggle_genre("Comedy");
        prefs.toggle_mood("Cozy");
        prefs.toggle_platform("Netflix");

        let rows: Vec<PreferenceRow> = unfold_preferences(&prefs)
            .into_iter()
            .map(|(t, v)| row(t, v))
            .collect();

        assert_eq!(fold_preferences(rows), prefs);
    }
}
