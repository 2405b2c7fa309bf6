use crate::models::Plant;
use crate::utils::geo;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

const PLANT_COLUMNS: &str = "id, owner_id, name, stage, category, watering_need, \
     light_requirement, size, environment, propagation_difficulty, pet_friendly, \
     tags, latitude, longitude, is_traded, created_at";

pub async fn get_plant_by_id(pool: &PgPool, plant_id: Uuid) -> Result<Option<Plant>, sqlx::Error> {
    sqlx::query_as::<_, Plant>(&format!(
        "SELECT {PLANT_COLUMNS} FROM plants WHERE id = $1"
    ))
    .bind(plant_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_plants_by_ids(pool: &PgPool, plant_ids: &[Uuid]) -> Result<Vec<Plant>, sqlx::Error> {
    sqlx::query_as::<_, Plant>(&format!(
        "SELECT {PLANT_COLUMNS} FROM plants WHERE id = ANY($1)"
    ))
    .bind(plant_ids)
    .fetch_all(pool)
    .await
}

pub async fn get_plants_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Plant>, sqlx::Error> {
    sqlx::query_as::<_, Plant>(&format!(
        "SELECT {PLANT_COLUMNS} FROM plants WHERE owner_id = $1 ORDER BY created_at ASC"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// Untraded plants within `radius_km` of the given point, excluding a
/// specific owner's listings. A coarse bounding box narrows the scan in SQL;
/// the exact haversine check trims the corners it lets through.
pub async fn get_plants_within_radius(
    pool: &PgPool,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
    exclude_owner: Uuid,
) -> Result<Vec<Plant>, sqlx::Error> {
    let (lat_min, lat_max, lon_min, lon_max) = geo::bounding_box(latitude, longitude, radius_km);

    let mut plants = sqlx::query_as::<_, Plant>(&format!(
        r#"
        SELECT {PLANT_COLUMNS}
        FROM plants
        WHERE owner_id <> $1
          AND is_traded = FALSE
          AND latitude BETWEEN $2 AND $3
          AND longitude BETWEEN $4 AND $5
        "#
    ))
    .bind(exclude_owner)
    .bind(lat_min)
    .bind(lat_max)
    .bind(lon_min)
    .bind(lon_max)
    .fetch_all(pool)
    .await?;

    plants.retain(|plant| match (plant.latitude, plant.longitude) {
        (Some(lat), Some(lon)) => geo::haversine_km(latitude, longitude, lat, lon) <= radius_km,
        _ => false,
    });

    Ok(plants)
}

/// Terminal flag set when a completed trade consumes the plants. Runs on the
/// proposal-completion transaction.
pub async fn mark_plants_traded(
    conn: &mut PgConnection,
    plant_ids: &[Uuid],
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE plants SET is_traded = TRUE WHERE id = ANY($1)")
        .bind(plant_ids)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
