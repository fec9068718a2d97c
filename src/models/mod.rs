mod catalog;
mod preferences;
mod subscription;

pub use catalog::{CatalogItem, ContentType, ProviderRecommendation};
pub use preferences::{FilterSet, PreferenceSet};
pub use subscription::{plan_for, Plan, PlanId, Subscription, UsageStats, UserRating};
pub use subscription::{FREE_DAILY_RECOMMENDATION_LIMIT, PREMIUM_MONTHLY_PRICE_ID};
