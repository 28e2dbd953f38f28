use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::resource::ListResponse;
use crate::domain::Id;
use crate::domain::platform::{AuditLogEntry, AuditLogQuery, FeatureToggle, Organization, PlanChange, PlatformSettings};
use crate::validation::Validate;
use tracing::{info, instrument};

#[instrument(skip(api))]
pub async fn organizations(api: &ApiClient) -> Result<Vec<Organization>, ApiError> {
    info!("Retrieving tenants...");
    let organizations = api
        .get::<ListResponse<Organization>>("/api/platform/organizations")
        .await?
        .into_items();
    info!("Retrieving tenants... OK, {} found", organizations.len());
    Ok(organizations)
}

#[instrument(skip(api))]
pub async fn organization(api: &ApiClient, organization_id: &Id) -> Result<Organization, ApiError> {
    api.get(&format!("/api/platform/organizations/{}", organization_id)).await
}

#[instrument(skip(api))]
pub async fn change_plan(api: &ApiClient, organization_id: &Id, change: &PlanChange) -> Result<Organization, ApiError> {
    change.validate()?;
    let organization = api
        .put::<Organization, _>(&format!("/api/platform/organizations/{}/plan", organization_id), change)
        .await?;
    info!("🟢 Moved tenant '{}' to plan '{}'", organization.name, change.plan);
    Ok(organization)
}

#[instrument(skip(api))]
pub async fn toggle_feature(api: &ApiClient, organization_id: &Id, toggle: &FeatureToggle) -> Result<Organization, ApiError> {
    toggle.validate()?;
    let organization = api
        .put::<Organization, _>(&format!("/api/platform/organizations/{}/features", organization_id), toggle)
        .await?;
    let state = if toggle.enabled { "on" } else { "off" };
    info!("🟢 Turned feature '{}' {} for tenant '{}'", toggle.feature, state, organization.name);
    Ok(organization)
}

#[instrument(skip(api))]
pub async fn audit_logs(api: &ApiClient, query: &AuditLogQuery) -> Result<Vec<AuditLogEntry>, ApiError> {
    query.validate()?;
    let entries = api
        .get_with_query::<ListResponse<AuditLogEntry>, _>("/api/platform/audit-logs", query)
        .await?
        .into_items();
    Ok(entries)
}

#[instrument(skip(api))]
pub async fn settings(api: &ApiClient) -> Result<PlatformSettings, ApiError> {
    api.get("/api/platform/settings").await
}

#[instrument(skip(api))]
pub async fn update_settings(api: &ApiClient, settings: &PlatformSettings) -> Result<PlatformSettings, ApiError> {
    settings.validate()?;
    api.put("/api/platform/settings", settings).await
}
