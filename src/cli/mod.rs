use crate::api::{ApiClient, ApiError, authenticated_client};
use crate::app_config::AppConfig;
use crate::domain::slot::hh_mm;
use crate::portal::{GuardOutcome, Portal, guard};
use crate::session::{SessionError, SessionStore};
use crate::workflow::assignment::WorkflowError;
use chrono::{Local, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

mod account;
mod admin;
mod company;
mod engineer;
mod platform;

pub use admin::AdminCommand;
pub use company::CompanyCommand;
pub use engineer::EngineerCommand;
pub use platform::PlatformCommand;

/// Service desk client for the admin, company, engineer and platform portals.
#[derive(Parser, Debug)]
#[command(name = "assetdesk", version, about)]
pub struct Cli {
    /// Date used for warranty and contract checks (YYYY-MM-DD), defaults to today.
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in to a portal and store its token.
    Login {
        #[arg(long, value_enum)]
        portal: Portal,
        #[arg(long)]
        email: String,
        #[arg(long, env = "ASSETDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the token of a portal.
    Logout {
        #[arg(long, value_enum)]
        portal: Portal,
    },

    /// Show the portals with a stored token.
    Status,

    /// Show the company name and accent color.
    Branding,

    /// Ticket triage for field engineers.
    Engineer {
        #[command(subcommand)]
        command: EngineerCommand,
    },

    /// Self service for customer companies.
    Company {
        #[command(subcommand)]
        command: CompanyCommand,
    },

    /// Back office administration.
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },

    /// Tenant management for platform operators.
    Platform {
        #[command(subcommand)]
        command: PlatformCommand,
    },
}

/// Commands that run against a portal's API once its route is allowed.
enum PortalCommand {
    Engineer(EngineerCommand),
    Company(CompanyCommand),
    Admin(AdminCommand),
    Platform(PlatformCommand),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Invalid JSON body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("Log in to the {portal} portal first (see {login})")]
    LoginRequired { portal: Portal, login: String },
    #[error("Your {portal} session has expired, please log in again")]
    SessionExpired { portal: Portal },
    #[error("No page at '{route}'")]
    UnknownRoute { route: String },
}

impl CliError {
    pub fn user_message(&self) -> String {
        match self {
            CliError::Api(err) => err.user_message(),
            CliError::Workflow(err) => err.user_message(),
            err => err.to_string(),
        }
    }

    fn is_unauthorized(&self) -> bool {
        match self {
            CliError::Api(err) => err.is_unauthorized(),
            CliError::Workflow(WorkflowError::Api(err)) => err.is_unauthorized(),
            _ => false,
        }
    }
}

pub async fn run(cli: Cli, config: &AppConfig) -> Result<(), CliError> {
    let path = config.session().path();
    let mut session = SessionStore::load(path).await?;
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    let (route, command) = match cli.command {
        Command::Login { portal, email, password } => {
            return account::login(config, &mut session, path, portal, &email, &password).await;
        }
        Command::Logout { portal } => return account::logout(&mut session, path, portal).await,
        Command::Status => {
            account::status(&session);
            return Ok(());
        }
        Command::Branding => return account::branding(config).await,
        Command::Engineer { command } => ("/engineer/dashboard", PortalCommand::Engineer(command)),
        Command::Company { command } => ("/company/dashboard", PortalCommand::Company(command)),
        Command::Admin { command } => ("/admin/dashboard", PortalCommand::Admin(command)),
        Command::Platform { command } => ("/platform/organizations", PortalCommand::Platform(command)),
    };

    let api = client(config, &session, route)?;
    let result = match command {
        PortalCommand::Engineer(command) => engineer::run(command, api.clone(), today).await,
        PortalCommand::Company(command) => company::run(command, &api, today).await,
        PortalCommand::Admin(command) => admin::run(command, &api, today).await,
        PortalCommand::Platform(command) => platform::run(command, &api, today).await,
    };

    match result {
        Err(err) if err.is_unauthorized() => expire(&mut session, path, api.portal()).await,
        result => result,
    }
}

/// Resolves the client for a route, refusing routes whose portal has no
/// token.
fn client(config: &AppConfig, session: &SessionStore, route: &str) -> Result<ApiClient, CliError> {
    match guard(route, session) {
        GuardOutcome::Allowed { portal } => Ok(authenticated_client(config, session, portal)?),
        GuardOutcome::Redirect { login } => Err(CliError::LoginRequired {
            portal: Portal::for_route(route).unwrap_or(Portal::Company),
            login,
        }),
        GuardOutcome::NotFound => Err(CliError::UnknownRoute {
            route: route.to_string(),
        }),
    }
}

/// A rejected token is dropped so the next command asks for a login.
async fn expire(session: &mut SessionStore, path: &Path, portal: Portal) -> Result<(), CliError> {
    if session.clear(portal) {
        warn!("🔑 Token for the {} portal was rejected, clearing it", portal);
        session.save(path).await?;
    }
    Err(CliError::SessionExpired { portal })
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    hh_mm::parse(value).ok_or_else(|| format!("'{}' is not a time in HH:MM format", value))
}
