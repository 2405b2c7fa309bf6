use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A listed plant. The attribute columns exist purely as filter predicates
/// for candidate discovery; the engine never interprets them beyond
/// equality/membership checks.
///
/// `is_traded` flips exactly once, when a completed trade consumes the
/// plant, and is never cleared.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plant {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub stage: String,
    pub category: String,
    pub watering_need: String,
    pub light_requirement: String,
    pub size: String,
    pub environment: String,
    pub propagation_difficulty: String,
    pub pet_friendly: bool,
    pub tags: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_traded: bool,
    pub created_at: DateTime<Utc>,
}
