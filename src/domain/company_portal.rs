use crate::domain::Id;
use crate::filter::{Searchable, fields};
use crate::validation::{Validate, ValidationError, at_least, required};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub struct CompanyDashboard {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub total_devices: u32,
    #[serde(default)]
    pub open_tickets: u32,
    #[serde(default)]
    pub active_amc_contracts: u32,
    #[serde(default)]
    pub expiring_warranties: u32,
    #[serde(default)]
    pub pending_quotations: u32,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Quotation {
    pub id: Id,
    #[serde(default)]
    pub quotation_number: Option<String>,
    #[serde(default)]
    pub ticket_id: Option<Id>,
    pub total_amount: f64,
    #[serde(default)]
    pub status: QuotationStatus,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
}

impl Quotation {
    pub fn awaiting_response(&self, today: NaiveDate) -> bool {
        self.status == QuotationStatus::Sent && self.valid_until.is_none_or(|valid_until| today <= valid_until)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotationStatus {
    Draft,
    #[default]
    Sent,
    Approved,
    Rejected,
    Expired,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum QuotationDecision {
    Approve,
    Reject,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct QuotationResponse {
    pub action: QuotationDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Validate for QuotationResponse {
    fn validate(&self) -> Result<(), ValidationError> {
        // A rejection needs a reason for the service team.
        match (&self.action, &self.comment) {
            (QuotationDecision::Reject, Some(comment)) => required("comment", comment),
            (QuotationDecision::Reject, None) => Err(ValidationError::Required { field: "comment" }),
            _ => Ok(()),
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct ConsumableOrder {
    pub consumable_id: Id,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Validate for ConsumableOrder {
    fn validate(&self) -> Result<(), ValidationError> {
        at_least("quantity", self.quantity, 1)
    }
}

/// Stored access details for a device or service managed on behalf of the
/// company. The secret is never part of the listing.
#[allow(dead_code)]
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Credential {
    pub id: Id,
    pub label: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Searchable for Credential {
    fn search_fields(&self) -> Vec<&str> {
        fields([
            Some(self.label.as_str()),
            self.username.as_deref(),
            self.device_name.as_deref(),
        ])
    }
}
