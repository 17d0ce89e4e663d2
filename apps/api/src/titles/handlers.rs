use axum::{extract::State, Json};
use jobmatch::{SectorSummary, TitleCheck, Variant};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SectorListResponse {
    pub sectors: Vec<SectorSummary>,
}

#[derive(Deserialize)]
pub struct TitleCheckRequest {
    pub sector: String,
    #[serde(default)]
    pub variant: Variant,
    pub title: String,
}

/// GET /api/v1/sectors
pub async fn handle_list_sectors(State(state): State<AppState>) -> Json<SectorListResponse> {
    Json(SectorListResponse {
        sectors: state.engine.sector_summaries(),
    })
}

/// POST /api/v1/titles/check
pub async fn handle_check_title(
    State(state): State<AppState>,
    Json(req): Json<TitleCheckRequest>,
) -> Result<Json<TitleCheck>, AppError> {
    let check = state
        .engine
        .guard()
        .is_allowed(&req.sector, req.variant, &req.title)?;
    Ok(Json(check))
}
