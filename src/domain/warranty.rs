use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Warranty bucket of a device, derived from the days left until the
/// warranty end date.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarrantyStatus {
    Expired,
    Critical,
    Warning,
    Attention,
    Active,
    Unknown,
}

impl WarrantyStatus {
    pub fn from_days_remaining(days: i64) -> Self {
        match days {
            i64::MIN..=-1 => WarrantyStatus::Expired,
            0..=30 => WarrantyStatus::Critical,
            31..=60 => WarrantyStatus::Warning,
            61..=90 => WarrantyStatus::Attention,
            _ => WarrantyStatus::Active,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WarrantyStatus::Expired => "expired",
            WarrantyStatus::Critical => "critical",
            WarrantyStatus::Warning => "warning",
            WarrantyStatus::Attention => "attention",
            WarrantyStatus::Active => "active",
            WarrantyStatus::Unknown => "unknown",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            WarrantyStatus::Expired => "red",
            WarrantyStatus::Critical => "orange",
            WarrantyStatus::Warning => "yellow",
            WarrantyStatus::Attention => "blue",
            WarrantyStatus::Active => "green",
            WarrantyStatus::Unknown => "gray",
        }
    }
}

impl Display for WarrantyStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

pub fn days_remaining(warranty_end_date: NaiveDate, today: NaiveDate) -> i64 {
    warranty_end_date.signed_duration_since(today).num_days()
}

pub fn warranty_status(warranty_end_date: Option<NaiveDate>, today: NaiveDate) -> WarrantyStatus {
    match warranty_end_date {
        Some(end) => WarrantyStatus::from_days_remaining(days_remaining(end, today)),
        None => WarrantyStatus::Unknown,
    }
}
