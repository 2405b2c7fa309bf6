use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Lifecycle of a trade proposal. `Pending` is the only creation state;
/// `Rejected` and `Completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

#[derive(Debug, Error)]
#[error("unknown status '{0}', expected one of: pending, accepted, rejected, completed")]
pub struct UnknownStatus(String);

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::Rejected => "rejected",
            ProposalStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for ProposalStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ProposalStatus::Pending),
            "accepted" => Ok(ProposalStatus::Accepted),
            "rejected" => Ok(ProposalStatus::Rejected),
            "completed" => Ok(ProposalStatus::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for ProposalStatus {
    type Error = UnknownStatus;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An offer exchanging specific plants between the two participants of a
/// connection. The plant-id lists line up with the connection's user slots,
/// not with who created the proposal.
///
/// Of the three lifecycle timestamps only the one matching the current
/// status is ever set; a transition nulls the ones it leaves behind.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TradeProposal {
    pub id: Uuid,
    pub connection_id: Uuid,
    pub proposed_by_user_1: Vec<Uuid>,
    pub proposed_by_user_2: Vec<Uuid>,
    #[sqlx(try_from = "String")]
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub declined_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TradeProposal {
    /// Every plant referenced by this proposal, both sides.
    pub fn all_plant_ids(&self) -> Vec<Uuid> {
        self.proposed_by_user_1
            .iter()
            .chain(self.proposed_by_user_2.iter())
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trip() {
        for status in [
            ProposalStatus::Pending,
            ProposalStatus::Accepted,
            ProposalStatus::Rejected,
            ProposalStatus::Completed,
        ] {
            assert_eq!(ProposalStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = ProposalStatus::from_str("cancelled").unwrap_err();
        assert!(err.to_string().contains("unknown status 'cancelled'"));
    }

    #[test]
    fn test_status_json_uses_lowercase() {
        let json = serde_json::to_string(&ProposalStatus::Accepted).unwrap();
        assert_eq!(json, "\"accepted\"");
    }
}
