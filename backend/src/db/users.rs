use crate::models::{User, Preferences};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn get_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, display_name, latitude, longitude, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_preferences(pool: &PgPool, user_id: Uuid) -> Result<Option<Preferences>, sqlx::Error> {
    sqlx::query_as::<_, Preferences>(
        r#"
        SELECT user_id, search_radius_km, stages, categories, watering_needs,
               light_requirements, sizes, environments, propagation_difficulties,
               pet_friendly_only, extras, updated_at
        FROM preferences
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
