use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppResult, middleware::request_id::RequestId, models::RecommendationResponse,
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "healthy", "movies": state.catalog().len() })),
    )
}

/// List every known title in table order
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog().titles().map(str::to_string).collect())
}

/// Recommend movies similar to `?title=`
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        title = %query.title,
        "Processing recommendation request"
    );

    let response = state.recommender.recommend(&query.title).await?;

    tracing::info!(
        request_id = %request_id,
        results = response.recommendations.len(),
        "Recommendation completed"
    );

    Ok(Json(response))
}
