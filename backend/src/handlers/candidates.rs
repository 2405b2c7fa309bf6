use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use crate::{errors::AppError, models::Plant, services::candidates, Config};

#[derive(Debug, Deserialize)]
pub struct CandidateQuery {
    pub user_id: Uuid,
    pub max_count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CandidateResponse {
    pub candidates: Vec<Plant>,
}

/// GET /api/candidates?user_id=...&max_count=...
pub async fn get_candidates(
    Query(params): Query<CandidateQuery>,
    State((pool, _config)): State<(PgPool, Config)>,
) -> Result<Json<CandidateResponse>, AppError> {
    let candidates = candidates::find_candidates(&pool, params.user_id, params.max_count).await?;
    Ok(Json(CandidateResponse { candidates }))
}
