//! Text-generation provider abstraction
//!
//! The recommendation generator treats the model behind this trait as a
//! best-effort enhancement: a single attempt per generation, any failure
//! (transport, non-success status, malformed JSON) triggers the
//! deterministic catalog fallback in the caller.

use crate::{error::AppResult, models::ProviderRecommendation};

pub mod openrouter;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Requests a batch of recommendations for the given prompts
    ///
    /// Returns the provider's objects unvalidated; the caller applies the
    /// per-field defaults.
    async fn generate_recommendations(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> AppResult<Vec<ProviderRecommendation>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
