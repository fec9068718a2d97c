use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{PreferenceSet, Subscription, UserRating};

pub mod postgres;
pub mod redis;

pub use postgres::{create_pool, PgProfileStore};
pub use redis::create_redis_client;
pub use redis::Cache;
pub use redis::CacheKey;

/// Read/write access to user profile records
///
/// The generation path only needs the three reads; failures there degrade to
/// defaults rather than aborting generation. The preference write backs the
/// onboarding flow.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_preferences(&self, user_id: Uuid) -> AppResult<PreferenceSet>;

    async fn get_ratings(&self, user_id: Uuid) -> AppResult<Vec<UserRating>>;

    async fn get_subscription(&self, user_id: Uuid) -> AppResult<Option<Subscription>>;

    async fn put_preferences(&self, user_id: Uuid, prefs: &PreferenceSet) -> AppResult<()>;
}
