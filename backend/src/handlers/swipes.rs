use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use crate::{
    errors::AppError,
    services::swipes::{self, SwipeDecision, SwipeOutcome},
    Config,
};

#[derive(Debug, Deserialize)]
pub struct SwipeBatchRequest {
    pub acting_user_id: Uuid,
    pub swipes: Vec<SwipeDecision>,
}

#[derive(Debug, Serialize)]
pub struct SwipeBatchResponse {
    pub results: Vec<SwipeOutcome>,
}

/// POST /api/swipes
///
/// Clients typically submit one decision per owned plant against a single
/// candidate in one batch. Results come back one per input, in input order.
pub async fn record_swipes(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(req): Json<SwipeBatchRequest>,
) -> Result<Json<SwipeBatchResponse>, AppError> {
    let results = swipes::record_swipe_batch(&pool, req.acting_user_id, &req.swipes).await?;
    Ok(Json(SwipeBatchResponse { results }))
}
