use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{
    interest::interest_catalog, InterestOption, InterestSelection, InterestTag, TripId,
};
use crate::services::PersonalizationSnapshot;

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct SetInterestsRequest {
    pub interests: Vec<String>,
}

impl SetInterestsRequest {
    /// Resolves tag ids against the interest catalog
    fn selection(&self) -> AppResult<InterestSelection> {
        self.interests
            .iter()
            .map(|id| id.parse::<InterestTag>().map_err(AppError::InvalidInput))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordViewRequest {
    pub trip_id: TripId,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List the interest catalog
pub async fn get_interest_options() -> Json<Vec<InterestOption>> {
    Json(interest_catalog())
}

/// Current interests, recommendations and recently viewed trips
pub async fn get_personalization(
    State(state): State<AppState>,
) -> Json<PersonalizationSnapshot> {
    Json(state.recommendations.snapshot().await)
}

/// Replace the visitor's interests and rerank locally
pub async fn set_interests(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SetInterestsRequest>,
) -> AppResult<Json<PersonalizationSnapshot>> {
    let interests = request.selection()?;
    tracing::info!(
        request_id = %request_id,
        interest_count = interests.len(),
        "Updating interests"
    );

    state.recommendations.set_interests(interests).await;
    Ok(Json(state.recommendations.snapshot().await))
}

/// Record that the visitor opened a trip
pub async fn record_view(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecordViewRequest>,
) -> Json<PersonalizationSnapshot> {
    tracing::info!(
        request_id = %request_id,
        trip_id = %request.trip_id,
        "Recording trip view"
    );

    state.recommendations.record_view(request.trip_id).await;
    Json(state.recommendations.snapshot().await)
}

/// Reload the trip catalog in the background
pub async fn refresh_catalog(State(state): State<AppState>) -> StatusCode {
    let recommendations = state.recommendations.clone();
    tokio::spawn(async move { recommendations.refresh_catalog().await });
    StatusCode::ACCEPTED
}
