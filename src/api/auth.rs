use crate::api::client::new_client;
use crate::api::error::ApiError;
use crate::app_config::AppConfig;
use crate::portal::Portal;
use crate::validation::{email, required};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
}

/// Exchanges credentials for the portal's bearer token.
#[instrument(skip(config, password))]
pub async fn login(config: &AppConfig, portal: Portal, user_email: &str, password: &str) -> Result<String, ApiError> {
    required("email", user_email)?;
    email("email", user_email)?;
    required("password", password)?;

    let api = new_client(config, portal, None)?;
    let request = LoginRequest {
        email: user_email.trim(),
        password,
    };
    let response = api.post::<LoginResponse, _>(&portal.login_endpoint(), &request).await?;

    info!("🔑 Logged in to the {} portal as '{}'", portal, user_email.trim());
    Ok(response.access_token)
}
