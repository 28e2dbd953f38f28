use crate::api::{ApiClient, platform};
use crate::cli::CliError;
use crate::domain::Id;
use crate::domain::platform::{AuditLogQuery, FeatureToggle, PlanChange, PlatformSettings};
use crate::filter::search;
use crate::notice::Notice;
use crate::render::table;
use chrono::NaiveDate;
use clap::{ArgAction, Subcommand};

#[derive(Subcommand, Debug)]
pub enum PlatformCommand {
    /// All tenant organizations.
    Tenants {
        #[arg(long)]
        search: Option<String>,
    },

    Tenant { organization: Id },

    /// Move a tenant to another subscription plan.
    SetPlan { organization: Id, plan: String },

    /// Turn a feature flag on or off for a tenant.
    Feature {
        organization: Id,
        feature: String,
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },

    AuditLogs {
        #[arg(long)]
        action: Option<String>,
        #[arg(long)]
        organization: Option<Id>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 25)]
        page_size: u32,
    },

    Settings,

    /// Change platform settings; fields left out keep their current value.
    UpdateSettings {
        #[arg(long)]
        platform_name: Option<String>,
        #[arg(long)]
        support_email: Option<String>,
        #[arg(long)]
        default_plan: Option<String>,
        #[arg(long)]
        accent_color: Option<String>,
        #[arg(long)]
        maintenance_mode: Option<bool>,
    },
}

pub async fn run(command: PlatformCommand, api: &ApiClient, today: NaiveDate) -> Result<(), CliError> {
    match command {
        PlatformCommand::Tenants { search: query } => {
            let organizations = platform::organizations(api).await?;
            println!("{}", table(search(&organizations, query.as_deref().unwrap_or_default()), today));
        }
        PlatformCommand::Tenant { organization } => {
            let organization = platform::organization(api, &organization).await?;
            println!("{}", table([&organization], today));
        }
        PlatformCommand::SetPlan { organization, plan } => {
            let organization = platform::change_plan(api, &organization, &PlanChange { plan }).await?;
            Notice::success(format!(
                "{} is now on the {} plan",
                organization.name,
                organization.plan.as_deref().unwrap_or("-")
            ))
            .emit();
        }
        PlatformCommand::Feature {
            organization,
            feature,
            enabled,
        } => {
            let toggle = FeatureToggle { feature, enabled };
            let organization = platform::toggle_feature(api, &organization, &toggle).await?;
            let state = if organization.feature_enabled(&toggle.feature) { "on" } else { "off" };
            Notice::success(format!("Feature {} is {} for {}", toggle.feature, state, organization.name)).emit();
        }
        PlatformCommand::AuditLogs {
            action,
            organization,
            page,
            page_size,
        } => {
            let query = AuditLogQuery {
                action,
                organization_id: organization,
                page,
                page_size,
            };
            let entries = platform::audit_logs(api, &query).await?;
            println!("{}", table(&entries, today));
        }
        PlatformCommand::Settings => {
            print_settings(&platform::settings(api).await?);
        }
        PlatformCommand::UpdateSettings {
            platform_name,
            support_email,
            default_plan,
            accent_color,
            maintenance_mode,
        } => {
            let current = platform::settings(api).await?;
            let settings = PlatformSettings {
                platform_name: platform_name.unwrap_or(current.platform_name),
                support_email: support_email.or(current.support_email),
                default_plan: default_plan.or(current.default_plan),
                accent_color: accent_color.or(current.accent_color),
                maintenance_mode: maintenance_mode.unwrap_or(current.maintenance_mode),
            };
            print_settings(&platform::update_settings(api, &settings).await?);
            Notice::success("Platform settings saved").emit();
        }
    }

    Ok(())
}

fn print_settings(settings: &PlatformSettings) {
    println!("Platform name     {}", settings.platform_name);
    println!("Support email     {}", settings.support_email.as_deref().unwrap_or("-"));
    println!("Default plan      {}", settings.default_plan.as_deref().unwrap_or("-"));
    println!("Accent color      {}", settings.accent_color.as_deref().unwrap_or("-"));
    println!("Maintenance mode  {}", if settings.maintenance_mode { "on" } else { "off" });
}
