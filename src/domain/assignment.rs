use crate::domain::{Id, Ticket};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Client-side state of a ticket offered to an engineer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AssignmentState {
    PendingAcceptance,
    Accepted,
    Declined,
    Rescheduled,
}

impl AssignmentState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AssignmentState::PendingAcceptance)
    }
}

impl Display for AssignmentState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AssignmentState::PendingAcceptance => "pending acceptance",
            AssignmentState::Accepted => "accepted",
            AssignmentState::Declined => "declined",
            AssignmentState::Rescheduled => "rescheduled",
        };
        write!(f, "{}", label)
    }
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct DeclineReason {
    pub code: String,
    pub label: String,
    #[serde(default)]
    pub requires_detail: bool,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct EngineerDashboard {
    #[serde(default)]
    pub pending_assignments: Vec<Ticket>,
    #[serde(default)]
    pub active_tickets: Vec<Ticket>,
    #[serde(default)]
    pub stats: EngineerStats,
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub struct EngineerStats {
    #[serde(default)]
    pub visits_today: u32,
    #[serde(default)]
    pub completed_this_week: u32,
    #[serde(default)]
    pub open_tickets: u32,
}

#[derive(PartialEq, Debug, Serialize)]
pub struct AcceptRequest<'a> {
    pub ticket_id: &'a Id,
}

#[derive(PartialEq, Debug, Serialize)]
pub struct DeclineRequest<'a> {
    pub ticket_id: &'a Id,
    pub reason_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_detail: Option<&'a str>,
}

#[derive(PartialEq, Debug, Serialize)]
pub struct RescheduleRequest<'a> {
    pub ticket_id: &'a Id,
    pub proposed_start: chrono::NaiveDateTime,
    pub proposed_end: chrono::NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn only_pending_acceptance_is_not_terminal() {
        assert!(!AssignmentState::PendingAcceptance.is_terminal());
        assert!(AssignmentState::Accepted.is_terminal());
        assert!(AssignmentState::Declined.is_terminal());
        assert!(AssignmentState::Rescheduled.is_terminal());
    }

    #[test]
    fn reschedule_request_sends_local_iso_datetimes() {
        let id = Id::Number(5);
        let start = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap().and_hms_opt(23, 30, 0).unwrap();
        let request = RescheduleRequest {
            ticket_id: &id,
            proposed_start: start,
            proposed_end: start + chrono::TimeDelta::hours(1),
            notes: None,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "ticket_id": 5,
                "proposed_start": "2026-05-04T23:30:00",
                "proposed_end": "2026-05-05T00:30:00"
            })
        );
    }
}
