use crate::domain::Id;
use crate::filter::{Searchable, fields};
use crate::validation::{Validate, ValidationError, at_least, email, hex_color, required};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A tenant on the platform.
#[allow(dead_code)]
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Organization {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default = "active")]
    pub is_active: bool,
    #[serde(default)]
    pub user_count: u32,
    #[serde(default)]
    pub features: BTreeMap<String, bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn active() -> bool {
    true
}

impl Organization {
    pub fn feature_enabled(&self, feature: &str) -> bool {
        self.features.get(feature).copied().unwrap_or(false)
    }
}

impl Searchable for Organization {
    fn search_fields(&self) -> Vec<&str> {
        fields([Some(self.name.as_str()), self.slug.as_deref(), self.plan.as_deref()])
    }
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct PlanChange {
    pub plan: String,
}

impl Validate for PlanChange {
    fn validate(&self) -> Result<(), ValidationError> {
        required("plan", &self.plan)
    }
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct FeatureToggle {
    pub feature: String,
    pub enabled: bool,
}

impl Validate for FeatureToggle {
    fn validate(&self) -> Result<(), ValidationError> {
        required("feature", &self.feature)
    }
}

#[allow(dead_code)]
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct AuditLogEntry {
    pub id: Id,
    pub action: String,
    #[serde(default)]
    pub actor_email: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub resource_id: Option<Id>,
    #[serde(default)]
    pub details: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize)]
pub struct AuditLogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<Id>,
    pub page: u32,
    pub page_size: u32,
}

impl Validate for AuditLogQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        at_least("page", i64::from(self.page), 1)?;
        at_least("page_size", i64::from(self.page_size), 1)
    }
}

/// Platform-wide settings edited from the operator console.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PlatformSettings {
    pub platform_name: String,
    #[serde(default)]
    pub support_email: Option<String>,
    #[serde(default)]
    pub default_plan: Option<String>,
    #[serde(default)]
    pub accent_color: Option<String>,
    #[serde(default)]
    pub maintenance_mode: bool,
}

impl Validate for PlatformSettings {
    fn validate(&self) -> Result<(), ValidationError> {
        required("platform_name", &self.platform_name)?;
        if let Some(support_email) = &self.support_email {
            email("support_email", support_email)?;
        }
        if let Some(accent_color) = &self.accent_color {
            hex_color("accent_color", accent_color)?;
        }
        Ok(())
    }
}
