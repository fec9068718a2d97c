use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{CatalogItem, FilterSet, Plan, PreferenceSet, UsageStats};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Known users get their stored profile, plan, and daily cap applied
    pub user_id: Option<Uuid>,
    /// Inline preferences for guest sessions without a stored profile
    #[serde(default)]
    pub preferences: PreferenceSet,
    #[serde(default)]
    pub filters: FilterSet,
    /// Client-asserted tier, honored only for guest sessions
    #[serde(default)]
    pub is_premium: bool,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub token: u64,
    pub recommendations: Vec<CatalogItem>,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub plan: Plan,
    pub usage: UsageStats,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Runs one recommendation generation and commits it to the shared board
///
/// The response always carries this request's own result; the board only
/// keeps it if no newer generation finished first.
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> AppResult<Json<RecommendationsResponse>> {
    let token = state.begin_generation();

    let items = match request.user_id {
        Some(user_id) => {
            state
                .recommendations
                .generate_for_user(user_id, &request.filters)
                .await?
        }
        None => {
            state
                .recommendations
                .generate(
                    &request.preferences,
                    &request.filters,
                    request.is_premium,
                    &[],
                )
                .await
        }
    };

    if !state.commit_generation(token, items.clone()).await {
        tracing::debug!(token = token, "Discarded stale generation result");
    }

    Ok(Json(RecommendationsResponse {
        token,
        recommendations: items,
    }))
}

/// Returns the current recommendation board
pub async fn current_recommendations(
    State(state): State<AppState>,
) -> Json<RecommendationsResponse> {
    let board = state.current_board().await;
    Json(RecommendationsResponse {
        token: board.token,
        recommendations: board.items,
    })
}

/// Reads a user's stored preference set
pub async fn get_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<PreferenceSet>> {
    let prefs = state.store.get_preferences(user_id).await?;
    Ok(Json(prefs))
}

/// Replaces a user's stored preference set
pub async fn put_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(prefs): Json<PreferenceSet>,
) -> AppResult<StatusCode> {
    state.store.put_preferences(user_id, &prefs).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reads a user's plan and today's recommendation usage
pub async fn get_subscription(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Json<SubscriptionResponse> {
    let plan = state.subscriptions.plan_for_user(user_id).await;
    let usage = state.subscriptions.usage_for(user_id, &plan).await;
    Json(SubscriptionResponse { plan, usage })
}
