use crate::models::{ProposalStatus, TradeProposal};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

const PROPOSAL_COLUMNS: &str = "id, connection_id, proposed_by_user_1, proposed_by_user_2, \
     status, created_at, accepted_at, declined_at, completed_at";

pub async fn insert_proposal(
    pool: &PgPool,
    connection_id: Uuid,
    proposed_by_user_1: &[Uuid],
    proposed_by_user_2: &[Uuid],
) -> Result<TradeProposal, sqlx::Error> {
    sqlx::query_as::<_, TradeProposal>(&format!(
        r#"
        INSERT INTO trade_proposals (connection_id, proposed_by_user_1, proposed_by_user_2)
        VALUES ($1, $2, $3)
        RETURNING {PROPOSAL_COLUMNS}
        "#
    ))
    .bind(connection_id)
    .bind(proposed_by_user_1)
    .bind(proposed_by_user_2)
    .fetch_one(pool)
    .await
}

/// Lookup scoped to the owning connection; a proposal id under a different
/// connection does not resolve.
pub async fn get_proposal(
    pool: &PgPool,
    connection_id: Uuid,
    proposal_id: Uuid,
) -> Result<Option<TradeProposal>, sqlx::Error> {
    sqlx::query_as::<_, TradeProposal>(&format!(
        "SELECT {PROPOSAL_COLUMNS} FROM trade_proposals WHERE id = $1 AND connection_id = $2"
    ))
    .bind(proposal_id)
    .bind(connection_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_proposals_for_connection(
    pool: &PgPool,
    connection_id: Uuid,
) -> Result<Vec<TradeProposal>, sqlx::Error> {
    sqlx::query_as::<_, TradeProposal>(&format!(
        "SELECT {PROPOSAL_COLUMNS} FROM trade_proposals \
         WHERE connection_id = $1 ORDER BY created_at DESC"
    ))
    .bind(connection_id)
    .fetch_all(pool)
    .await
}

/// Apply a validated transition. The target's lifecycle timestamp is stamped
/// and the other two nulled in the same statement, keeping the three
/// mutually exclusive whatever states the proposal moved through before.
pub async fn set_proposal_status(
    conn: &mut PgConnection,
    proposal_id: Uuid,
    status: ProposalStatus,
) -> Result<TradeProposal, sqlx::Error> {
    sqlx::query_as::<_, TradeProposal>(&format!(
        r#"
        UPDATE trade_proposals
        SET status = $2,
            accepted_at  = CASE WHEN $2 = 'accepted'  THEN NOW() END,
            declined_at  = CASE WHEN $2 = 'rejected'  THEN NOW() END,
            completed_at = CASE WHEN $2 = 'completed' THEN NOW() END
        WHERE id = $1
        RETURNING {PROPOSAL_COLUMNS}
        "#
    ))
    .bind(proposal_id)
    .bind(status.as_str())
    .fetch_one(conn)
    .await
}
