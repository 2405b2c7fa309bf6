use crate::constants::MAX_SWIPES_PER_BATCH;
use crate::db;
use crate::errors::AppError;
use crate::models::{Connection, Plant, PlantMatch, Swipe};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// One client swipe decision, as submitted in a batch.
#[derive(Debug, Clone, Deserialize)]
pub struct SwipeDecision {
    pub swiper_plant_id: Uuid,
    pub swiped_plant_id: Uuid,
    pub is_like: bool,
}

/// Per-decision result. `connection` and `match` are populated only when the
/// swipe completed a mutual like; `error` only when the decision itself was
/// rejected (the rest of the batch still runs).
#[derive(Debug, Clone, Serialize)]
pub struct SwipeOutcome {
    pub is_match: bool,
    pub connection: Option<Connection>,
    #[serde(rename = "match")]
    pub plant_match: Option<PlantMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SwipeOutcome {
    fn no_match() -> Self {
        Self { is_match: false, connection: None, plant_match: None, error: None }
    }

    fn matched(connection: Connection, plant_match: PlantMatch) -> Self {
        Self {
            is_match: true,
            connection: Some(connection),
            plant_match: Some(plant_match),
            error: None,
        }
    }

    fn failed(message: String) -> Self {
        Self { is_match: false, connection: None, plant_match: None, error: Some(message) }
    }
}

/// Record one swipe and, if it completes a mutual like, form the connection
/// and match.
///
/// The ledger write, the opposite-direction read and the connection/match
/// upserts all run on one transaction: the read sees the write that preceded
/// it, and when two users swipe each other's plants at the same instant the
/// uniqueness constraints (plus fetch-the-winner in the db layer) leave
/// exactly one connection and one match visible, whichever call gets there
/// first.
pub async fn record_swipe(
    pool: &PgPool,
    acting_user_id: Uuid,
    decision: &SwipeDecision,
) -> Result<SwipeOutcome, AppError> {
    let swiper = db::plants::get_plant_by_id(pool, decision.swiper_plant_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("plant {} not found", decision.swiper_plant_id)))?;
    let swiped = db::plants::get_plant_by_id(pool, decision.swiped_plant_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("plant {} not found", decision.swiped_plant_id)))?;

    if swiper.owner_id != acting_user_id {
        return Err(AppError::Unauthorized(format!(
            "plant {} does not belong to user {}",
            swiper.id, acting_user_id
        )));
    }
    if swiped.owner_id == acting_user_id {
        return Err(AppError::Validation("cannot swipe on your own plant".to_string()));
    }

    let mut tx = pool.begin().await?;

    let recorded = db::swipes::upsert_swipe(
        &mut tx,
        decision.swiper_plant_id,
        decision.swiped_plant_id,
        decision.is_like,
    )
    .await?;

    let opposite =
        db::swipes::get_swipe(&mut tx, decision.swiped_plant_id, decision.swiper_plant_id).await?;

    if !is_mutual_like(&recorded, opposite.as_ref()) {
        tx.commit().await?;
        return Ok(SwipeOutcome::no_match());
    }

    let connection =
        db::connections::get_or_create_connection(&mut tx, swiper.owner_id, swiped.owner_id)
            .await?;

    let (plant_id_1, plant_id_2) = orient_match_plants(&connection, &swiper, &swiped);
    let plant_match =
        db::connections::get_or_create_match(&mut tx, connection.id, plant_id_1, plant_id_2)
            .await?;

    tx.commit().await?;

    tracing::info!(
        "🎉 mutual like: connection {} matched plants ({}, {})",
        connection.id,
        plant_match.plant_id_1,
        plant_match.plant_id_2
    );

    Ok(SwipeOutcome::matched(connection, plant_match))
}

/// Process a batch of decisions independently, in input order. A rejected
/// decision lands in its own result slot; only infrastructure faults abort
/// the batch.
pub async fn record_swipe_batch(
    pool: &PgPool,
    acting_user_id: Uuid,
    decisions: &[SwipeDecision],
) -> Result<Vec<SwipeOutcome>, AppError> {
    if decisions.len() > MAX_SWIPES_PER_BATCH {
        return Err(AppError::Validation(format!(
            "batch of {} swipes exceeds the limit of {}",
            decisions.len(),
            MAX_SWIPES_PER_BATCH
        )));
    }

    let mut results = Vec::with_capacity(decisions.len());
    for decision in decisions {
        match record_swipe(pool, acting_user_id, decision).await {
            Ok(outcome) => results.push(outcome),
            Err(AppError::Store(e)) => return Err(AppError::Store(e)),
            Err(domain) => results.push(SwipeOutcome::failed(domain.to_string())),
        }
    }

    Ok(results)
}

/// A match exists iff the row just recorded is a like and the
/// opposite-direction row exists and is a like.
fn is_mutual_like(recorded: &Swipe, opposite: Option<&Swipe>) -> bool {
    recorded.is_like && opposite.is_some_and(|swipe| swipe.is_like)
}

/// Slot the two plants to match the connection's user slots. The connection
/// is the source of truth here, not the swipe direction: when the connection
/// predates this match (created by an earlier mutual like in whatever
/// historical order), plant one must still belong to user one.
fn orient_match_plants(connection: &Connection, swiper: &Plant, swiped: &Plant) -> (Uuid, Uuid) {
    if connection.user_id_1 == swiper.owner_id {
        (swiper.id, swiped.id)
    } else {
        (swiped.id, swiper.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn plant(owner_id: Uuid) -> Plant {
        Plant {
            id: Uuid::new_v4(),
            owner_id,
            name: "Monstera deliciosa".to_string(),
            stage: "mature".to_string(),
            category: "foliage".to_string(),
            watering_need: "weekly".to_string(),
            light_requirement: "indirect".to_string(),
            size: "medium".to_string(),
            environment: "indoor".to_string(),
            propagation_difficulty: "easy".to_string(),
            pet_friendly: false,
            tags: vec![],
            latitude: Some(52.52),
            longitude: Some(13.405),
            is_traded: false,
            created_at: Utc::now(),
        }
    }

    fn swipe(swiper_plant_id: Uuid, swiped_plant_id: Uuid, is_like: bool) -> Swipe {
        Swipe {
            id: Uuid::new_v4(),
            swiper_plant_id,
            swiped_plant_id,
            is_like,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn connection(user_id_1: Uuid, user_id_2: Uuid) -> Connection {
        Connection {
            id: Uuid::new_v4(),
            user_id_1,
            user_id_2,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_mutual_like_requires_both_directions() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        let like = swipe(a, b, true);
        let dislike = swipe(a, b, false);
        let opposite_like = swipe(b, a, true);
        let opposite_dislike = swipe(b, a, false);

        assert!(is_mutual_like(&like, Some(&opposite_like)));
        assert!(!is_mutual_like(&like, Some(&opposite_dislike)));
        assert!(!is_mutual_like(&like, None));
        assert!(!is_mutual_like(&dislike, Some(&opposite_like)));
        assert!(!is_mutual_like(&dislike, None));
    }

    #[test]
    fn test_orientation_follows_connection_when_swiper_is_user_one() {
        let (owner_a, owner_b) = (Uuid::new_v4(), Uuid::new_v4());
        let swiper = plant(owner_a);
        let swiped = plant(owner_b);

        let conn = connection(owner_a, owner_b);
        assert_eq!(orient_match_plants(&conn, &swiper, &swiped), (swiper.id, swiped.id));
    }

    #[test]
    fn test_orientation_flips_when_connection_was_formed_the_other_way() {
        let (owner_a, owner_b) = (Uuid::new_v4(), Uuid::new_v4());
        let swiper = plant(owner_a);
        let swiped = plant(owner_b);

        // Connection formed historically with owner_b in slot one, e.g. by an
        // earlier match between different plants. Slot one must keep winning.
        let conn = connection(owner_b, owner_a);
        assert_eq!(orient_match_plants(&conn, &swiper, &swiped), (swiped.id, swiper.id));
    }

    #[test]
    fn test_outcome_serialization_shape() {
        let json = serde_json::to_value(SwipeOutcome::no_match()).unwrap();
        assert_eq!(json["is_match"], false);
        assert!(json["connection"].is_null());
        assert!(json["match"].is_null());
        assert!(json.get("error").is_none());

        let failed = serde_json::to_value(SwipeOutcome::failed("nope".into())).unwrap();
        assert_eq!(failed["error"], "nope");
    }
}
