use crate::db;
use crate::errors::AppError;
use crate::models::{Connection, ProposalStatus, TradeProposal};
use sqlx::PgPool;
use uuid::Uuid;

/// Open a trade proposal on a connection. The actor must be a participant;
/// every listed plant must belong to the side proposing it and still be
/// untraded. Proposals always start out pending.
pub async fn create_proposal(
    pool: &PgPool,
    connection_id: Uuid,
    acting_user_id: Uuid,
    my_plant_ids: Vec<Uuid>,
    other_plant_ids: Vec<Uuid>,
) -> Result<TradeProposal, AppError> {
    let connection = require_connection(pool, connection_id).await?;

    let other_user_id = connection.other_participant(acting_user_id).ok_or_else(|| {
        AppError::Unauthorized(format!(
            "user {} is not a participant of connection {}",
            acting_user_id, connection_id
        ))
    })?;

    if my_plant_ids.is_empty() && other_plant_ids.is_empty() {
        return Err(AppError::Validation(
            "a trade proposal must include at least one plant".to_string(),
        ));
    }

    validate_proposed_plants(pool, acting_user_id, &my_plant_ids).await?;
    validate_proposed_plants(pool, other_user_id, &other_plant_ids).await?;

    // The stored lists line up with the connection's slots, not with who
    // happened to create the proposal.
    let (by_user_1, by_user_2) = slot_plant_lists(
        &connection,
        acting_user_id,
        my_plant_ids,
        other_plant_ids,
    );

    let proposal = db::proposals::insert_proposal(pool, connection_id, &by_user_1, &by_user_2).await?;

    tracing::info!(
        "trade proposal {} opened on connection {} by user {}",
        proposal.id,
        connection_id,
        acting_user_id
    );

    Ok(proposal)
}

/// Drive a proposal through its lifecycle. The transition table is enforced
/// before any write; completing a proposal marks every plant it references
/// as traded in the same transaction.
pub async fn update_status(
    pool: &PgPool,
    connection_id: Uuid,
    proposal_id: Uuid,
    acting_user_id: Uuid,
    new_status: ProposalStatus,
) -> Result<TradeProposal, AppError> {
    let connection = require_connection(pool, connection_id).await?;
    require_participant(&connection, acting_user_id)?;

    let proposal = db::proposals::get_proposal(pool, connection_id, proposal_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "proposal {} not found on connection {}",
                proposal_id, connection_id
            ))
        })?;

    validate_transition(proposal.status, new_status)?;

    let mut tx = pool.begin().await?;
    let updated = db::proposals::set_proposal_status(&mut tx, proposal_id, new_status).await?;
    if new_status == ProposalStatus::Completed {
        db::plants::mark_plants_traded(&mut tx, &updated.all_plant_ids()).await?;
    }
    tx.commit().await?;

    tracing::info!(
        "trade proposal {} moved to {} by user {}",
        proposal_id,
        new_status,
        acting_user_id
    );

    Ok(updated)
}

/// Proposals on a connection, newest first. Participant-only.
pub async fn list_proposals(
    pool: &PgPool,
    connection_id: Uuid,
    acting_user_id: Uuid,
) -> Result<Vec<TradeProposal>, AppError> {
    let connection = require_connection(pool, connection_id).await?;
    require_participant(&connection, acting_user_id)?;

    Ok(db::proposals::list_proposals_for_connection(pool, connection_id).await?)
}

async fn require_connection(pool: &PgPool, connection_id: Uuid) -> Result<Connection, AppError> {
    db::connections::get_connection_by_id(pool, connection_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("connection {} not found", connection_id)))
}

fn require_participant(connection: &Connection, user_id: Uuid) -> Result<(), AppError> {
    if connection.has_participant(user_id) {
        Ok(())
    } else {
        Err(AppError::Unauthorized(format!(
            "user {} is not a participant of connection {}",
            user_id, connection.id
        )))
    }
}

/// Every proposed plant must exist, belong to the expected side, and still
/// be up for trade.
async fn validate_proposed_plants(
    pool: &PgPool,
    expected_owner: Uuid,
    plant_ids: &[Uuid],
) -> Result<(), AppError> {
    if plant_ids.is_empty() {
        return Ok(());
    }

    let plants = db::plants::get_plants_by_ids(pool, plant_ids).await?;

    for plant_id in plant_ids {
        let plant = plants
            .iter()
            .find(|plant| plant.id == *plant_id)
            .ok_or_else(|| AppError::NotFound(format!("plant {} not found", plant_id)))?;

        if plant.owner_id != expected_owner {
            return Err(AppError::Validation(format!(
                "plant {} does not belong to user {}",
                plant_id, expected_owner
            )));
        }
        if plant.is_traded {
            return Err(AppError::Validation(format!(
                "plant {} has already been traded",
                plant_id
            )));
        }
    }

    Ok(())
}

/// Route the actor's list into the slot they occupy on the connection.
fn slot_plant_lists(
    connection: &Connection,
    acting_user_id: Uuid,
    my_plant_ids: Vec<Uuid>,
    other_plant_ids: Vec<Uuid>,
) -> (Vec<Uuid>, Vec<Uuid>) {
    if connection.user_id_1 == acting_user_id {
        (my_plant_ids, other_plant_ids)
    } else {
        (other_plant_ids, my_plant_ids)
    }
}

/// The proposal state machine: pending may be accepted or rejected,
/// only an accepted proposal completes, and rejected/completed are terminal.
fn validate_transition(current: ProposalStatus, target: ProposalStatus) -> Result<(), AppError> {
    use crate::models::ProposalStatus::*;

    match (current, target) {
        (Pending, Accepted) | (Pending, Rejected) | (Accepted, Completed) => Ok(()),
        (_, Pending) => Err(AppError::InvalidTransition(
            "a proposal cannot be moved back to pending".to_string(),
        )),
        (Pending, Completed) | (Rejected, Completed) => Err(AppError::InvalidTransition(
            "cannot complete a proposal that has not been accepted".to_string(),
        )),
        (Accepted, Accepted) | (Accepted, Rejected) => Err(AppError::InvalidTransition(format!(
            "an accepted proposal cannot move to {}",
            target
        ))),
        (Rejected, _) => Err(AppError::InvalidTransition(
            "no transitions are defined out of a rejected proposal".to_string(),
        )),
        (Completed, _) => Err(AppError::InvalidTransition(
            "no transitions are defined out of a completed proposal".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::models::ProposalStatus::*;

    const ALL_STATUSES: [ProposalStatus; 4] = [Pending, Accepted, Rejected, Completed];

    #[test]
    fn test_transition_table_is_exactly_the_allowed_set() {
        let allowed = [(Pending, Accepted), (Pending, Rejected), (Accepted, Completed)];

        for current in ALL_STATUSES {
            for target in ALL_STATUSES {
                let result = validate_transition(current, target);
                if allowed.contains(&(current, target)) {
                    assert!(result.is_ok(), "{current} -> {target} should be allowed");
                } else {
                    assert!(result.is_err(), "{current} -> {target} should be rejected");
                }
            }
        }
    }

    #[test]
    fn test_completing_an_unaccepted_proposal_names_the_reason() {
        let err = validate_transition(Pending, Completed).unwrap_err();
        assert!(err.to_string().contains("has not been accepted"));
    }

    #[test]
    fn test_terminal_states_stay_terminal() {
        for target in ALL_STATUSES {
            assert!(validate_transition(Rejected, target).is_err());
            assert!(validate_transition(Completed, target).is_err());
        }
    }

    #[test]
    fn test_plant_lists_follow_connection_slots() {
        let (u1, u2) = (Uuid::new_v4(), Uuid::new_v4());
        let connection = Connection {
            id: Uuid::new_v4(),
            user_id_1: u1,
            user_id_2: u2,
            is_active: true,
            created_at: Utc::now(),
        };
        let mine = vec![Uuid::new_v4()];
        let theirs = vec![Uuid::new_v4(), Uuid::new_v4()];

        // Actor sits in slot one: lists pass through.
        let (by_1, by_2) = slot_plant_lists(&connection, u1, mine.clone(), theirs.clone());
        assert_eq!((by_1.len(), by_2.len()), (1, 2));

        // Actor sits in slot two: lists swap.
        let (by_1, by_2) = slot_plant_lists(&connection, u2, mine, theirs);
        assert_eq!((by_1.len(), by_2.len()), (2, 1));
    }
}
