pub mod prompt;
pub mod providers;
pub mod recommendations;
pub mod subscriptions;

pub use providers::RecommendationProvider;
pub use recommendations::RecommendationService;
pub use subscriptions::SubscriptionService;
