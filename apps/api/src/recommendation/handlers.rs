use axum::{extract::State, Json};
use jobmatch::{Recommendation, RecommendationRequest};

use crate::errors::AppError;
use crate::recommendation::models::{ArbitrationBody, RecommendationBody};
use crate::state::AppState;

/// POST /api/v1/recommendations
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(body): Json<RecommendationBody>,
) -> Result<Json<Recommendation>, AppError> {
    let request = RecommendationRequest::try_from(body)?;
    let recommendation = state.engine.recommend(&request)?;
    Ok(Json(recommendation))
}

/// POST /api/v1/recommendations/arbitrate
///
/// Recomputes the engine's ranking for the same request, then lets the
/// external re-rank replace it once every candidate has passed the guard.
pub async fn handle_arbitrate(
    State(state): State<AppState>,
    Json(body): Json<ArbitrationBody>,
) -> Result<Json<Recommendation>, AppError> {
    let request = RecommendationRequest::try_from(body.request)?;
    let recommendation = state.engine.recommend(&request)?;
    let arbitrated = state.engine.apply_arbitration(recommendation, body.rerank)?;
    Ok(Json(arbitrated))
}
