use crate::api::resource::{
    Accessories, AmcContracts, Companies, Devices, Licenses, Parts, Resource, ResourceClient, Users,
};
use crate::api::{ApiClient, admin};
use crate::cli::CliError;
use crate::domain::Id;
use crate::domain::accessory::{AccessoryForm, AccessoryStatus};
use crate::domain::visit::{PartRequestStatus, VisitActionForm};
use crate::notice::Notice;
use crate::render::{TableRow, table};
use chrono::{NaiveDate, Utc};
use clap::{Subcommand, ValueEnum};
use serde::de::DeserializeOwned;

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum AdminResource {
    Companies,
    Devices,
    Users,
    Accessories,
    AmcContracts,
    Parts,
    Licenses,
}

/// The generic CRUD commands shared by every collection.
#[derive(Subcommand, Debug)]
pub enum ResourceCommand {
    /// List a collection, optionally narrowed by a search term.
    List {
        #[arg(value_enum)]
        resource: AdminResource,
        #[arg(long)]
        search: Option<String>,
    },

    Show {
        #[arg(value_enum)]
        resource: AdminResource,
        id: Id,
    },

    /// Create an entry from a JSON form.
    Create {
        #[arg(value_enum)]
        resource: AdminResource,
        #[arg(long)]
        json: String,
    },

    /// Replace an entry with a JSON form.
    Update {
        #[arg(value_enum)]
        resource: AdminResource,
        id: Id,
        #[arg(long)]
        json: String,
    },

    Delete {
        #[arg(value_enum)]
        resource: AdminResource,
        id: Id,
    },
}

impl ResourceCommand {
    fn resource(&self) -> AdminResource {
        match self {
            ResourceCommand::List { resource, .. }
            | ResourceCommand::Show { resource, .. }
            | ResourceCommand::Create { resource, .. }
            | ResourceCommand::Update { resource, .. }
            | ResourceCommand::Delete { resource, .. } => *resource,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    #[command(flatten)]
    Resource(ResourceCommand),

    /// Hand an accessory to an employee, or take it back when no employee is given.
    AssignAccessory {
        accessory: Id,
        #[arg(long)]
        employee: Option<Id>,
    },

    /// Change the status of an accessory.
    AccessoryStatus {
        accessory: Id,
        #[arg(value_enum)]
        status: AccessoryStatus,
    },

    /// Show a visit with its timer and logged actions.
    Visit { visit: Id },

    StartTimer { visit: Id },

    StopTimer { visit: Id },

    /// Log an action performed during a visit.
    AddAction {
        visit: Id,
        #[arg(long = "type")]
        action_type: String,
        #[arg(long)]
        description: String,
    },

    /// Parts requested by engineers.
    PartRequests {
        #[arg(long, value_enum)]
        status: Option<PartRequestStatus>,
    },

    ApprovePart { request: Id },

    RejectPart {
        request: Id,
        #[arg(long)]
        reason: String,
    },
}

async fn dispatch_resource(command: ResourceCommand, api: &ApiClient, today: NaiveDate) -> Result<(), CliError> {
    match command.resource() {
        AdminResource::Companies => run_resource::<Companies>(api, command, today).await,
        AdminResource::Devices => run_resource::<Devices>(api, command, today).await,
        AdminResource::Users => run_resource::<Users>(api, command, today).await,
        AdminResource::Accessories => run_resource::<Accessories>(api, command, today).await,
        AdminResource::AmcContracts => run_resource::<AmcContracts>(api, command, today).await,
        AdminResource::Parts => run_resource::<Parts>(api, command, today).await,
        AdminResource::Licenses => run_resource::<Licenses>(api, command, today).await,
    }
}

async fn run_resource<R>(api: &ApiClient, command: ResourceCommand, today: NaiveDate) -> Result<(), CliError>
where
    R: Resource,
    R::Item: TableRow,
    R::Form: DeserializeOwned,
{
    let client = ResourceClient::<R>::new(api);

    match command {
        ResourceCommand::List { search, .. } => {
            let items = match search {
                Some(query) => client.search(&query).await?,
                None => client.list().await?,
            };
            println!("{}", table(&items, today));
        }
        ResourceCommand::Show { id, .. } => {
            let item = client.get(&id).await?;
            println!("{}", table([&item], today));
        }
        ResourceCommand::Create { json, .. } => {
            let form = serde_json::from_str::<R::Form>(&json)?;
            let item = client.create(&form).await?;
            println!("{}", table([&item], today));
            Notice::success(format!("Created {} entry", R::LABEL)).emit();
        }
        ResourceCommand::Update { id, json, .. } => {
            let form = serde_json::from_str::<R::Form>(&json)?;
            client.update(&id, &form).await?;
            Notice::success(format!("Updated {} entry {}", R::LABEL, id)).emit();
        }
        ResourceCommand::Delete { id, .. } => {
            client.delete(&id).await?;
            Notice::success(format!("Deleted {} entry {}", R::LABEL, id)).emit();
        }
    }

    Ok(())
}

pub async fn run(command: AdminCommand, api: &ApiClient, today: NaiveDate) -> Result<(), CliError> {
    let message = match command {
        AdminCommand::Resource(command) => return dispatch_resource(command, api, today).await,
        AdminCommand::AssignAccessory { accessory, employee } => {
            let accessories = ResourceClient::<Accessories>::new(api);
            let mut form = AccessoryForm::from(&accessories.get(&accessory).await?);
            form.set_employee(employee);
            let updated = accessories.update(&accessory, &form).await?;
            format!("Accessory {} is now {}", updated.name, updated.status)
        }
        AdminCommand::AccessoryStatus { accessory, status } => {
            let accessories = ResourceClient::<Accessories>::new(api);
            let mut form = AccessoryForm::from(&accessories.get(&accessory).await?);
            form.set_status(status);
            let updated = accessories.update(&accessory, &form).await?;
            format!("Accessory {} is now {}", updated.name, updated.status)
        }
        AdminCommand::Visit { visit } => {
            let visit = admin::visit(api, &visit).await?;
            let timer = if visit.timer_running() { "running" } else { "stopped" };
            println!("Visit {} for ticket {}", visit.id, visit.ticket_id);
            println!("Timer {}, {} minutes logged", timer, visit.elapsed_minutes(Utc::now()));
            for action in &visit.actions {
                println!("  [{}] {}", action.action_type, action.description);
            }
            return Ok(());
        }
        AdminCommand::StartTimer { visit } => {
            admin::start_timer(api, &visit).await?;
            format!("Timer started for visit {}", visit)
        }
        AdminCommand::StopTimer { visit } => {
            admin::stop_timer(api, &visit).await?;
            format!("Timer stopped for visit {}", visit)
        }
        AdminCommand::AddAction {
            visit,
            action_type,
            description,
        } => {
            let action = VisitActionForm {
                action_type,
                description,
            };
            admin::add_action(api, &visit, &action).await?;
            format!("Action logged on visit {}", visit)
        }
        AdminCommand::PartRequests { status } => {
            let requests = admin::part_requests(api, status).await?;
            println!("{}", table(&requests, today));
            return Ok(());
        }
        AdminCommand::ApprovePart { request } => {
            admin::approve_part_request(api, &request).await?;
            format!("Part request {} approved", request)
        }
        AdminCommand::RejectPart { request, reason } => {
            admin::reject_part_request(api, &request, &reason).await?;
            format!("Part request {} rejected", request)
        }
    };

    Notice::success(message).emit();
    Ok(())
}
