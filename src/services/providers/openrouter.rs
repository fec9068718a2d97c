//! OpenRouter chat-completions provider
//!
//! Sends the system and user prompts to a configured model and expects the
//! completion content to be a JSON array of recommendation objects. Any
//! schema violation is reported as a provider error so the caller can fall
//! back; partial or malformed objects are never propagated.

use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    models::ProviderRecommendation,
    services::providers::RecommendationProvider,
};

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 2000;

#[derive(Clone)]
pub struct OpenRouterProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl OpenRouterProvider {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Strips a Markdown code fence if the model wrapped its JSON in one
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[async_trait::async_trait]
impl RecommendationProvider for OpenRouterProvider {
    async fn generate_recommendations(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> AppResult<Vec<ProviderRecommendation>> {
        let url = format!("{}/chat/completions", self.api_url);

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt },
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "OpenRouter returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw OpenRouter response");

        let completion: ChatCompletionResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                AppError::Provider(format!("Failed to parse OpenRouter response: {}", e))
            })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Provider("No completion content in response".to_string()))?;

        let recommendations: Vec<ProviderRecommendation> =
            serde_json::from_str(strip_code_fences(&content)).map_err(|e| {
                tracing::warn!(error = %e, "Model returned non-conforming JSON");
                AppError::Provider(format!("Model response is not a recommendation array: {}", e))
            })?;

        tracing::info!(
            count = recommendations.len(),
            model = %self.model,
            provider = "openrouter",
            "Recommendations generated"
        );

        Ok(recommendations)
    }

    fn name(&self) -> &'static str {
        "openrouter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences_plain_json() {
        assert_eq!(strip_code_fences("[{\"title\":\"x\"}]"), "[{\"title\":\"x\"}]");
    }

    #[test]
    fn test_strip_code_fences_json_fence() {
        let fenced = "```json\n[{\"title\":\"x\"}]\n```";
        assert_eq!(strip_code_fences(fenced), "[{\"title\":\"x\"}]");
    }

    #[test]
    fn test_strip_code_fences_bare_fence() {
        let fenced = "```\n[]\n```";
        assert_eq!(strip_code_fences(fenced), "[]");
    }

    #[test]
    fn test_completion_content_parses_into_recommendations() {
        let content = r#"[
            {"title": "Parasite", "matchScore": 90, "genres": ["Thriller"]},
            {"description": "A show with no title"}
        ]"#;

        let parsed: Vec<ProviderRecommendation> =
            serde_json::from_str(strip_code_fences(content)).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].title.as_deref(), Some("Parasite"));
        assert_eq!(parsed[1].title, None);
    }

    #[test]
    fn test_schema_violation_is_an_error() {
        let content = r#"{"not": "an array"}"#;
        let parsed: Result<Vec<ProviderRecommendation>, _> = serde_json::from_str(content);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_chat_completion_response_shape() {
        let json = r#"{
            "choices": [
                { "message": { "role": "assistant", "content": "[]" } }
            ]
        }"#;

        let completion: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(completion.choices[0].message.content.as_deref(), Some("[]"));
    }
}
