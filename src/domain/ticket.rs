use crate::domain::Id;
use crate::filter::{Searchable, fields};
use crate::validation::{Validate, ValidationError, required};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[allow(dead_code)]
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Ticket {
    pub id: Id,
    #[serde(default)]
    pub ticket_number: Option<String>,
    pub subject: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub site_address: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// The number shown to users, falling back to the id.
    pub fn reference(&self) -> String {
        self.ticket_number.clone().unwrap_or_else(|| self.id.to_string())
    }
}

impl Searchable for Ticket {
    fn search_fields(&self) -> Vec<&str> {
        fields([
            Some(self.subject.as_str()),
            self.ticket_number.as_deref(),
            self.device_name.as_deref(),
            self.company_name.as_deref(),
        ])
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    Assigned,
    PendingAcceptance,
    InProgress,
    OnHold,
    Resolved,
    Closed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl TicketStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::Assigned => "assigned",
            TicketStatus::PendingAcceptance => "pending acceptance",
            TicketStatus::InProgress => "in progress",
            TicketStatus::OnHold => "on hold",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
            TicketStatus::Cancelled => "cancelled",
            TicketStatus::Unknown => "unknown",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            TicketStatus::Open => "blue",
            TicketStatus::Assigned | TicketStatus::PendingAcceptance => "purple",
            TicketStatus::InProgress => "yellow",
            TicketStatus::OnHold => "orange",
            TicketStatus::Resolved | TicketStatus::Closed => "green",
            TicketStatus::Cancelled | TicketStatus::Unknown => "gray",
        }
    }
}

impl Display for TicketStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
    #[serde(other)]
    #[value(skip)]
    Unknown,
}

impl Priority {
    pub fn color(&self) -> &'static str {
        match self {
            Priority::Low => "gray",
            Priority::Medium => "blue",
            Priority::High => "orange",
            Priority::Critical => "red",
            Priority::Unknown => "gray",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
            Priority::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

/// Ticket raised from the company portal.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct NewTicket {
    pub subject: String,
    pub description: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<Id>,
}

impl Validate for NewTicket {
    fn validate(&self) -> Result<(), ValidationError> {
        required("subject", &self.subject)?;
        required("description", &self.description)
    }
}
