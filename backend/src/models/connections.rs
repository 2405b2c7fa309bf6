use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Durable relationship between two users, created lazily on their first
/// mutual like. `user_id_1` is the user whose swipe completed that first
/// mutual like — slot assignment is historical, not canonical, and every
/// consumer that needs an orientation must derive it from this row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Connection {
    pub id: Uuid,
    pub user_id_1: Uuid,
    pub user_id_2: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Connection {
    /// Whether the given user occupies either slot of this connection.
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.user_id_1 == user_id || self.user_id_2 == user_id
    }

    /// The other participant, if `user_id` is one of the two.
    pub fn other_participant(&self, user_id: Uuid) -> Option<Uuid> {
        if self.user_id_1 == user_id {
            Some(self.user_id_2)
        } else if self.user_id_2 == user_id {
            Some(self.user_id_1)
        } else {
            None
        }
    }
}

/// One mutual-like plant pair within a connection. `plant_id_1` always
/// belongs to the connection's `user_id_1`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlantMatch {
    pub id: Uuid,
    pub connection_id: Uuid,
    pub plant_id_1: Uuid,
    pub plant_id_2: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Listing shape for a user's connections overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionWithMatches {
    pub connection: Connection,
    pub matches: Vec<PlantMatch>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(u1: Uuid, u2: Uuid) -> Connection {
        Connection {
            id: Uuid::new_v4(),
            user_id_1: u1,
            user_id_2: u2,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_participant_checks() {
        let (u1, u2, stranger) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let conn = connection(u1, u2);

        assert!(conn.has_participant(u1));
        assert!(conn.has_participant(u2));
        assert!(!conn.has_participant(stranger));
    }

    #[test]
    fn test_other_participant() {
        let (u1, u2, stranger) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let conn = connection(u1, u2);

        assert_eq!(conn.other_participant(u1), Some(u2));
        assert_eq!(conn.other_participant(u2), Some(u1));
        assert_eq!(conn.other_participant(stranger), None);
    }
}
