use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use crate::{
    errors::AppError,
    models::{ProposalStatus, TradeProposal},
    services::proposals,
    Config,
};

#[derive(Debug, Deserialize)]
pub struct CreateProposalRequest {
    pub acting_user_id: Uuid,
    pub my_plant_ids: Vec<Uuid>,
    pub other_plant_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub acting_user_id: Uuid,
    pub new_status: String,
}

#[derive(Debug, Deserialize)]
pub struct ProposalListQuery {
    pub user_id: Uuid,
}

/// POST /api/connections/{connection_id}/proposals
pub async fn create_proposal(
    Path(connection_id): Path<Uuid>,
    State((pool, _config)): State<(PgPool, Config)>,
    Json(req): Json<CreateProposalRequest>,
) -> Result<(StatusCode, Json<TradeProposal>), AppError> {
    let proposal = proposals::create_proposal(
        &pool,
        connection_id,
        req.acting_user_id,
        req.my_plant_ids,
        req.other_plant_ids,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(proposal)))
}

/// PUT /api/connections/{connection_id}/proposals/{proposal_id}/status
///
/// The target status arrives as a string so that unknown values surface as
/// the state machine's own "unknown status" error instead of a decode
/// rejection.
pub async fn update_proposal_status(
    Path((connection_id, proposal_id)): Path<(Uuid, Uuid)>,
    State((pool, _config)): State<(PgPool, Config)>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<StatusCode, AppError> {
    let new_status = req
        .new_status
        .parse::<ProposalStatus>()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    proposals::update_status(&pool, connection_id, proposal_id, req.acting_user_id, new_status)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/connections/{connection_id}/proposals?user_id=...
pub async fn list_proposals(
    Path(connection_id): Path<Uuid>,
    Query(params): Query<ProposalListQuery>,
    State((pool, _config)): State<(PgPool, Config)>,
) -> Result<Json<Vec<TradeProposal>>, AppError> {
    let list = proposals::list_proposals(&pool, connection_id, params.user_id).await?;
    Ok(Json(list))
}
