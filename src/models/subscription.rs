use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stripe price ID that maps a subscription record to the premium plan
pub const PREMIUM_MONTHLY_PRICE_ID: &str = "price_premium_monthly";

/// Daily recommendation cap for the free tier
pub const FREE_DAILY_RECOMMENDATION_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    Free,
    Premium,
}

/// A subscription plan with its feature limits
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Plan {
    pub id: PlanId,
    pub name: &'static str,
    pub monthly_price_cents: u32,
    /// None means unlimited
    pub daily_recommendation_limit: Option<u32>,
    pub premium_content: bool,
    pub advanced_filters: bool,
    pub curated_lists: bool,
}

impl Plan {
    pub fn free() -> Self {
        Self {
            id: PlanId::Free,
            name: "Free",
            monthly_price_cents: 0,
            daily_recommendation_limit: Some(FREE_DAILY_RECOMMENDATION_LIMIT),
            premium_content: false,
            advanced_filters: false,
            curated_lists: false,
        }
    }

    pub fn premium() -> Self {
        Self {
            id: PlanId::Premium,
            name: "Premium",
            monthly_price_cents: 499,
            daily_recommendation_limit: None,
            premium_content: true,
            advanced_filters: true,
            curated_lists: true,
        }
    }

    pub fn is_premium(&self) -> bool {
        self.id == PlanId::Premium
    }
}

/// A user's subscription record as stored by the persistence collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Subscription {
    pub user_id: Uuid,
    pub stripe_price_id: String,
    pub status: String,
    pub current_period_start: DateTime<Utc>,
    pub current_period_end: DateTime<Utc>,
    pub cancel_at_period_end: bool,
}

/// Classifies a subscription record into a plan
///
/// Anything other than an active premium-priced subscription is the free
/// plan, including a missing record.
pub fn plan_for(subscription: Option<&Subscription>) -> Plan {
    match subscription {
        Some(sub) if sub.status == "active" && sub.stripe_price_id == PREMIUM_MONTHLY_PRICE_ID => {
            Plan::premium()
        }
        _ => Plan::free(),
    }
}

/// A rating the user gave a title, on a 1-5 scale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct UserRating {
    pub user_id: Uuid,
    pub title: String,
    pub rating: i16,
}

/// Daily recommendation usage against the plan's cap
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UsageStats {
    pub used: u32,
    /// None means unlimited
    pub limit: Option<u32>,
}

impl UsageStats {
    pub fn limit_reached(&self) -> bool {
        match self.limit {
            Some(limit) => self.used >= limit,
            None => false,
        }
    }
}
