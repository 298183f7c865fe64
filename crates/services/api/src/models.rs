use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

/// Flat role set; no rank ordering exists, route guards enumerate the roles
/// they accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum)]
#[ExistingTypePath = "crate::schema::sql_types::UserRole"]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Basic,
    Gameadder,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Basic => "basic",
            UserRole::Gameadder => "gameadder",
            UserRole::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum)]
#[ExistingTypePath = "crate::schema::sql_types::RequestStatus"]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Approved and rejected are terminal; the only legal moves are out of
    /// pending.
    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Approved)
                | (RequestStatus::Pending, RequestStatus::Rejected)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum)]
#[ExistingTypePath = "crate::schema::sql_types::TicketStatus"]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Completed,
}

impl TicketStatus {
    pub fn can_transition_to(self, next: TicketStatus) -> bool {
        matches!(
            (self, next),
            (TicketStatus::Open, TicketStatus::InProgress)
                | (TicketStatus::Open, TicketStatus::Completed)
                | (TicketStatus::InProgress, TicketStatus::Completed)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum)]
#[ExistingTypePath = "crate::schema::sql_types::TicketPriority"]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};

    #[test]
    fn pending_requests_move_to_approved_or_rejected_only() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Approved));
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Rejected));
        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Pending));
    }

    #[test]
    fn approved_and_rejected_requests_are_terminal() {
        for terminal in [RequestStatus::Approved, RequestStatus::Rejected] {
            for next in [
                RequestStatus::Pending,
                RequestStatus::Approved,
                RequestStatus::Rejected,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn open_tickets_can_start_progress_or_complete() {
        assert!(TicketStatus::Open.can_transition_to(TicketStatus::InProgress));
        assert!(TicketStatus::Open.can_transition_to(TicketStatus::Completed));
        assert!(TicketStatus::InProgress.can_transition_to(TicketStatus::Completed));
    }

    #[test]
    fn completed_tickets_are_terminal() {
        for next in [
            TicketStatus::Open,
            TicketStatus::InProgress,
            TicketStatus::Completed,
        ] {
            assert!(!TicketStatus::Completed.can_transition_to(next));
        }
    }

    #[test]
    fn tickets_never_move_backwards() {
        assert!(!TicketStatus::InProgress.can_transition_to(TicketStatus::Open));
    }

    #[test]
    fn status_strings_deserialize_through_the_enum_only() {
        assert_ok!(serde_json::from_str::<RequestStatus>(r#""approved""#));
        assert_ok!(serde_json::from_str::<TicketStatus>(r#""in_progress""#));
        assert_err!(serde_json::from_str::<RequestStatus>(r#""banana""#));
        assert_err!(serde_json::from_str::<TicketStatus>(r#""closed""#));
    }

    #[test]
    fn roles_serialize_to_their_wire_names() {
        assert_eq!(
            serde_json::to_string(&UserRole::Gameadder).unwrap(),
            r#""gameadder""#
        );
        assert_eq!(UserRole::Admin.as_str(), "admin");
    }
}
