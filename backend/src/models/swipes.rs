use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One directional swipe decision. At most one row exists per ordered
/// `(swiper_plant_id, swiped_plant_id)` pair; a stored dislike may be
/// upgraded to a like in place, a like never downgrades, and rows are
/// never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Swipe {
    pub id: Uuid,
    pub swiper_plant_id: Uuid,
    pub swiped_plant_id: Uuid,
    pub is_like: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
