use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::app_config::AppConfig;
use crate::domain::branding::{Branding, BrandingPayload};
use tracing::{instrument, warn};

#[instrument(skip_all)]
pub async fn branding(api: &ApiClient, config: &AppConfig) -> Result<Branding, ApiError> {
    let payload = api.get::<BrandingPayload>("/api/settings/branding").await?;
    Ok(Branding::from_payload(payload, config))
}

/// Branding never blocks a page: on failure the defaults are used.
pub async fn branding_or_default(api: &ApiClient, config: &AppConfig) -> Branding {
    branding(api, config).await.unwrap_or_else(|err| {
        warn!("⚠️ Unable to load branding, using defaults: {}", err);
        Branding::defaults(config)
    })
}
