use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    cached,
    db::{Cache, CacheKey, ProfileStore},
    error::AppResult,
    models::{plan_for, Plan, Subscription, UsageStats},
};

const SUBSCRIPTION_CACHE_TTL: u64 = 60;
// The date lives in the counter key, so the TTL only needs to outlast the day
const USAGE_COUNTER_TTL: u64 = 2 * 86_400;

/// Classifies users into plans and tracks daily recommendation usage
///
/// Subscription lookups go through the short-TTL cache; the usage counters
/// live in Redis keyed by user and UTC date. Every failure here degrades
/// toward the free plan or an unmetered request rather than failing the
/// generation, except for the daily cap itself which the caller surfaces.
#[derive(Clone)]
pub struct SubscriptionService {
    store: Arc<dyn ProfileStore>,
    cache: Cache,
}

impl SubscriptionService {
    pub fn new(store: Arc<dyn ProfileStore>, cache: Cache) -> Self {
        Self { store, cache }
    }

    async fn lookup_subscription(&self, user_id: Uuid) -> AppResult<Option<Subscription>> {
        let store = self.store.clone();
        cached!(
            self.cache,
            CacheKey::Subscription(user_id),
            SUBSCRIPTION_CACHE_TTL,
            async move { store.get_subscription(user_id).await }
        )
    }

    /// Resolves the user's plan, defaulting to free on any lookup failure
    pub async fn plan_for_user(&self, user_id: Uuid) -> Plan {
        match self.lookup_subscription(user_id).await {
            Ok(subscription) => plan_for(subscription.as_ref()),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    user_id = %user_id,
                    "Subscription lookup failed, defaulting to free plan"
                );
                Plan::free()
            }
        }
    }

    pub async fn has_premium(&self, user_id: Uuid) -> bool {
        self.plan_for_user(user_id).await.is_premium()
    }

    /// Reads today's usage against the plan's cap
    ///
    /// A counter read failure fails open: the user is treated as unmetered
    /// for this request rather than locked out by an infrastructure problem.
    pub async fn usage_for(&self, user_id: Uuid, plan: &Plan) -> UsageStats {
        let key = CacheKey::DailyUsage(user_id, Utc::now().date_naive());
        let used = match self.cache.get_count(&key).await {
            Ok(count) => count.max(0) as u32,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    user_id = %user_id,
                    "Usage counter read failed, treating request as unmetered"
                );
                0
            }
        };

        UsageStats {
            used,
            limit: plan.daily_recommendation_limit,
        }
    }

    /// Counts one generation against today's usage
    pub async fn record_usage(&self, user_id: Uuid) {
        let key = CacheKey::DailyUsage(user_id, Utc::now().date_naive());
        if let Err(e) = self.cache.increment(&key, USAGE_COUNTER_TTL).await {
            tracing::warn!(error = %e, user_id = %user_id, "Failed to record recommendation usage");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_redis_client, MockProfileStore};
    use crate::models::PREMIUM_MONTHLY_PRICE_ID;
    use chrono::TimeZone;

    // Redis is intentionally unreachable in these tests; the service must
    // degrade instead of erroring.
    async fn unreachable_cache() -> Cache {
        let client = create_redis_client("redis://127.0.0.1:1").unwrap();
        let (cache, _handle) = Cache::new(client).await;
        cache
    }

    fn premium_subscription(user_id: Uuid) -> Subscription {
        Subscription {
            user_id,
            stripe_price_id: PREMIUM_MONTHLY_PRICE_ID.to_string(),
            status: "active".to_string(),
            current_period_start: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            current_period_end: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
            cancel_at_period_end: false,
        }
    }

    #[tokio::test]
    async fn test_plan_defaults_to_free_when_cache_unreachable() {
        let user_id = Uuid::new_v4();
        let mut store = MockProfileStore::new();
        store
            .expect_get_subscription()
            .returning(move |id| Ok(Some(premium_subscription(id))));

        let service = SubscriptionService::new(Arc::new(store), unreachable_cache().await);
        // The cached lookup path cannot complete, so the premium record is
        // never observed and the plan degrades to free.
        let plan = service.plan_for_user(user_id).await;
        assert!(!plan.is_premium());
    }

    #[tokio::test]
    async fn test_usage_fails_open_when_counter_unreachable() {
        let store = MockProfileStore::new();
        let service = SubscriptionService::new(Arc::new(store), unreachable_cache().await);

        let usage = service.usage_for(Uuid::new_v4(), &Plan::free()).await;
        assert_eq!(usage.used, 0);
        assert!(!usage.limit_reached());
    }

    #[tokio::test]
    async fn test_record_usage_never_panics_on_failure() {
        let store = MockProfileStore::new();
        let service = SubscriptionService::new(Arc::new(store), unreachable_cache().await);
        service.record_usage(Uuid::new_v4()).await;
    }
}
