use crate::models::Swipe;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Write one swipe decision for an ordered plant pair.
///
/// First swipe inserts the row. A re-swipe hits the ordered-pair unique
/// constraint and folds into the stored row with `is_like OR EXCLUDED.is_like`,
/// which is exactly the ledger's mutation rule in one atomic statement: a
/// dislike upgrades to a like, a like never downgrades, identical re-swipes
/// change nothing.
pub async fn upsert_swipe(
    conn: &mut PgConnection,
    swiper_plant_id: Uuid,
    swiped_plant_id: Uuid,
    is_like: bool,
) -> Result<Swipe, sqlx::Error> {
    sqlx::query_as::<_, Swipe>(
        r#"
        INSERT INTO swipes (swiper_plant_id, swiped_plant_id, is_like)
        VALUES ($1, $2, $3)
        ON CONFLICT (swiper_plant_id, swiped_plant_id)
        DO UPDATE SET is_like = swipes.is_like OR EXCLUDED.is_like, updated_at = NOW()
        RETURNING id, swiper_plant_id, swiped_plant_id, is_like, created_at, updated_at
        "#,
    )
    .bind(swiper_plant_id)
    .bind(swiped_plant_id)
    .bind(is_like)
    .fetch_one(conn)
    .await
}

/// Lookup of the exact ordered pair. Used for the opposite-direction read of
/// the mutual-like check, which must run on the same connection as the write
/// that preceded it.
pub async fn get_swipe(
    conn: &mut PgConnection,
    swiper_plant_id: Uuid,
    swiped_plant_id: Uuid,
) -> Result<Option<Swipe>, sqlx::Error> {
    sqlx::query_as::<_, Swipe>(
        r#"
        SELECT id, swiper_plant_id, swiped_plant_id, is_like, created_at, updated_at
        FROM swipes
        WHERE swiper_plant_id = $1 AND swiped_plant_id = $2
        "#,
    )
    .bind(swiper_plant_id)
    .bind(swiped_plant_id)
    .fetch_optional(conn)
    .await
}

/// Per candidate plant, how many distinct plants of `owner_id` have already
/// swiped on it (like or dislike). Candidates absent from the result have
/// not been swiped by any of the owner's plants.
pub async fn count_owner_swipes_per_candidate(
    pool: &PgPool,
    owner_id: Uuid,
    candidate_ids: &[Uuid],
) -> Result<Vec<(Uuid, i64)>, sqlx::Error> {
    sqlx::query_as::<_, (Uuid, i64)>(
        r#"
        SELECT s.swiped_plant_id, COUNT(DISTINCT s.swiper_plant_id)
        FROM swipes s
        JOIN plants p ON p.id = s.swiper_plant_id
        WHERE p.owner_id = $1 AND s.swiped_plant_id = ANY($2)
        GROUP BY s.swiped_plant_id
        "#,
    )
    .bind(owner_id)
    .bind(candidate_ids)
    .fetch_all(pool)
    .await
}
