use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use crate::{db, errors::AppError, models::ConnectionWithMatches, Config};

#[derive(Debug, Deserialize)]
pub struct ConnectionListQuery {
    pub user_id: Uuid,
}

/// GET /api/connections?user_id=...
///
/// The user's connections with their matches, newest connection first. The
/// messaging subsystem keys its threads off these connection ids.
pub async fn list_connections(
    Query(params): Query<ConnectionListQuery>,
    State((pool, _config)): State<(PgPool, Config)>,
) -> Result<Json<Vec<ConnectionWithMatches>>, AppError> {
    let connections = db::connections::list_connections_for_user(&pool, params.user_id).await?;

    let mut result = Vec::with_capacity(connections.len());
    for connection in connections {
        let matches = db::connections::list_matches_for_connection(&pool, connection.id).await?;
        result.push(ConnectionWithMatches { connection, matches });
    }

    Ok(Json(result))
}
