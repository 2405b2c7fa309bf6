use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Read-side projection of a user. Profile editing is owned by another
/// service; the engine only needs identity and location.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub display_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-user discovery preferences. Every list is a restriction that is
/// skipped when empty: an empty list means "no restriction", never
/// "exclude everything".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Preferences {
    pub user_id: Uuid,
    pub search_radius_km: f64,
    pub stages: Vec<String>,
    pub categories: Vec<String>,
    pub watering_needs: Vec<String>,
    pub light_requirements: Vec<String>,
    pub sizes: Vec<String>,
    pub environments: Vec<String>,
    pub propagation_difficulties: Vec<String>,
    pub pet_friendly_only: bool,
    pub extras: Vec<String>,
    pub updated_at: DateTime<Utc>,
}
