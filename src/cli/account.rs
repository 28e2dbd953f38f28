use crate::api::{auth, new_client, settings};
use crate::app_config::AppConfig;
use crate::cli::CliError;
use crate::notice::Notice;
use crate::portal::Portal;
use crate::session::SessionStore;
use std::path::Path;

pub async fn login(
    config: &AppConfig,
    session: &mut SessionStore,
    path: &Path,
    portal: Portal,
    email: &str,
    password: &str,
) -> Result<(), CliError> {
    let token = auth::login(config, portal, email, password).await?;
    session.set_token(portal, token);
    session.save(path).await?;
    Notice::success(format!("Logged in to the {} portal", portal)).emit();
    Ok(())
}

pub async fn logout(session: &mut SessionStore, path: &Path, portal: Portal) -> Result<(), CliError> {
    if session.clear(portal) {
        session.save(path).await?;
        Notice::success(format!("Logged out of the {} portal", portal)).emit();
    } else {
        Notice::success(format!("Not logged in to the {} portal", portal)).emit();
    }
    Ok(())
}

pub fn status(session: &SessionStore) {
    let authenticated = session.authenticated_portals();
    for portal in Portal::all() {
        let state = if authenticated.contains(&portal) {
            "logged in"
        } else {
            "logged out"
        };
        println!("{:<10}{}", portal.name(), state);
    }
}

/// Branding is public, so no token is needed.
pub async fn branding(config: &AppConfig) -> Result<(), CliError> {
    let api = new_client(config, Portal::Company, None)?;
    let branding = settings::branding_or_default(&api, config).await;

    println!("{}", branding.company_name);
    println!("accent  {}", branding.accent_color);
    if let Some(logo_url) = branding.logo_url {
        println!("logo    {}", logo_url);
    }
    Ok(())
}
