use crate::models::{Connection, PlantMatch};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub async fn get_connection_by_id(
    pool: &PgPool,
    connection_id: Uuid,
) -> Result<Option<Connection>, sqlx::Error> {
    sqlx::query_as::<_, Connection>(
        r#"
        SELECT id, user_id_1, user_id_2, is_active, created_at
        FROM connections
        WHERE id = $1
        "#,
    )
    .bind(connection_id)
    .fetch_optional(pool)
    .await
}

/// Connection lookup for an unordered user pair. Slot assignment is
/// historical, so both orderings must be checked.
pub async fn find_between_users(
    conn: &mut PgConnection,
    user_a: Uuid,
    user_b: Uuid,
) -> Result<Option<Connection>, sqlx::Error> {
    sqlx::query_as::<_, Connection>(
        r#"
        SELECT id, user_id_1, user_id_2, is_active, created_at
        FROM connections
        WHERE (user_id_1 = $1 AND user_id_2 = $2)
           OR (user_id_1 = $2 AND user_id_2 = $1)
        "#,
    )
    .bind(user_a)
    .bind(user_b)
    .fetch_optional(conn)
    .await
}

/// Resolve the single connection for a user pair, creating it on first
/// mutual like with the swiper in slot one.
///
/// Two swipe calls can race here, each convinced it completes the match.
/// The insert targets the unordered-pair unique index with DO NOTHING, so
/// the loser's insert returns no row and the follow-up lookup fetches the
/// winner instead of surfacing a constraint violation.
pub async fn get_or_create_connection(
    conn: &mut PgConnection,
    swiper_user_id: Uuid,
    other_user_id: Uuid,
) -> Result<Connection, sqlx::Error> {
    if let Some(existing) = find_between_users(conn, swiper_user_id, other_user_id).await? {
        return Ok(existing);
    }

    let inserted = sqlx::query_as::<_, Connection>(
        r#"
        INSERT INTO connections (user_id_1, user_id_2)
        VALUES ($1, $2)
        ON CONFLICT ((LEAST(user_id_1, user_id_2)), (GREATEST(user_id_1, user_id_2)))
        DO NOTHING
        RETURNING id, user_id_1, user_id_2, is_active, created_at
        "#,
    )
    .bind(swiper_user_id)
    .bind(other_user_id)
    .fetch_optional(&mut *conn)
    .await?;

    match inserted {
        Some(connection) => Ok(connection),
        // Lost the race: a concurrent call created it between our lookup and
        // insert. Fetch the winner.
        None => find_between_users(conn, swiper_user_id, other_user_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound),
    }
}

pub async fn list_connections_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Connection>, sqlx::Error> {
    sqlx::query_as::<_, Connection>(
        r#"
        SELECT id, user_id_1, user_id_2, is_active, created_at
        FROM connections
        WHERE user_id_1 = $1 OR user_id_2 = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn get_match_by_plants(
    conn: &mut PgConnection,
    plant_id_1: Uuid,
    plant_id_2: Uuid,
) -> Result<Option<PlantMatch>, sqlx::Error> {
    sqlx::query_as::<_, PlantMatch>(
        r#"
        SELECT id, connection_id, plant_id_1, plant_id_2, created_at
        FROM matches
        WHERE plant_id_1 = $1 AND plant_id_2 = $2
        "#,
    )
    .bind(plant_id_1)
    .bind(plant_id_2)
    .fetch_optional(conn)
    .await
}

/// Record a mutual-like plant pair, idempotently. Re-processing the same
/// pair (or losing a race against the opposite swipe's call) lands on the
/// plant-pair unique constraint and resolves to the existing row.
///
/// `plant_id_1`/`plant_id_2` must already be oriented to the connection's
/// user slots by the caller.
pub async fn get_or_create_match(
    conn: &mut PgConnection,
    connection_id: Uuid,
    plant_id_1: Uuid,
    plant_id_2: Uuid,
) -> Result<PlantMatch, sqlx::Error> {
    let inserted = sqlx::query_as::<_, PlantMatch>(
        r#"
        INSERT INTO matches (connection_id, plant_id_1, plant_id_2)
        VALUES ($1, $2, $3)
        ON CONFLICT (plant_id_1, plant_id_2) DO NOTHING
        RETURNING id, connection_id, plant_id_1, plant_id_2, created_at
        "#,
    )
    .bind(connection_id)
    .bind(plant_id_1)
    .bind(plant_id_2)
    .fetch_optional(&mut *conn)
    .await?;

    match inserted {
        Some(plant_match) => Ok(plant_match),
        None => get_match_by_plants(conn, plant_id_1, plant_id_2)
            .await?
            .ok_or(sqlx::Error::RowNotFound),
    }
}

pub async fn list_matches_for_connection(
    pool: &PgPool,
    connection_id: Uuid,
) -> Result<Vec<PlantMatch>, sqlx::Error> {
    sqlx::query_as::<_, PlantMatch>(
        r#"
        SELECT id, connection_id, plant_id_1, plant_id_2, created_at
        FROM matches
        WHERE connection_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(connection_id)
    .fetch_all(pool)
    .await
}
