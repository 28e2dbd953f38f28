use crate::domain::Id;
use crate::validation::{Validate, ValidationError, required};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// An on-site visit performed by an engineer for a ticket.
#[allow(dead_code)]
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Visit {
    pub id: Id,
    pub ticket_id: Id,
    #[serde(default)]
    pub engineer_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub scheduled_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub timer_started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_minutes: u32,
    #[serde(default)]
    pub actions: Vec<VisitAction>,
}

impl Visit {
    pub fn timer_running(&self) -> bool {
        self.timer_started_at.is_some()
    }

    /// Logged minutes plus the running timer, if any.
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> i64 {
        let running = self
            .timer_started_at
            .map(|started| now.signed_duration_since(started).num_minutes().max(0))
            .unwrap_or(0);
        i64::from(self.total_minutes) + running
    }
}

#[allow(dead_code)]
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct VisitAction {
    pub action_type: String,
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct VisitActionForm {
    pub action_type: String,
    pub description: String,
}

impl Validate for VisitActionForm {
    fn validate(&self) -> Result<(), ValidationError> {
        required("action_type", &self.action_type)?;
        required("description", &self.description)
    }
}

/// Request from an engineer for a spare part needed on a ticket.
#[allow(dead_code)]
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct PartRequest {
    pub id: Id,
    pub ticket_id: Id,
    pub part_name: String,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default)]
    pub status: PartRequestStatus,
    #[serde(default)]
    pub requested_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn one() -> u32 {
    1
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PartRequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Fulfilled,
}

impl Display for PartRequestStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PartRequestStatus::Pending => "pending",
            PartRequestStatus::Approved => "approved",
            PartRequestStatus::Rejected => "rejected",
            PartRequestStatus::Fulfilled => "fulfilled",
        };
        write!(f, "{}", label)
    }
}
