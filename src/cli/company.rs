use crate::api::{ApiClient, company};
use crate::cli::CliError;
use crate::domain::Id;
use crate::domain::company_portal::{ConsumableOrder, QuotationDecision, QuotationResponse};
use crate::domain::ticket::{NewTicket, Priority};
use crate::filter::search;
use crate::notice::Notice;
use crate::render::table;
use chrono::NaiveDate;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum CompanyCommand {
    /// Dashboard counters and the device list.
    Overview,

    /// Devices with their warranty status.
    Devices {
        #[arg(long)]
        search: Option<String>,
    },

    /// AMC contracts covering the company's devices.
    Amc,

    Tickets {
        #[arg(long)]
        search: Option<String>,
    },

    /// Raise a support ticket.
    NewTicket {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        description: String,
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        #[arg(long)]
        device: Option<Id>,
    },

    Quotations,

    /// Approve or reject a quotation.
    Respond {
        quotation: Id,
        #[arg(long, value_enum)]
        decision: QuotationDecision,
        #[arg(long)]
        comment: Option<String>,
    },

    /// Order a consumable such as toner or a battery.
    Order {
        consumable: Id,
        #[arg(long, default_value_t = 1)]
        quantity: i64,
        #[arg(long)]
        device: Option<Id>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Stored credentials for the company's systems.
    Credentials {
        #[arg(long)]
        search: Option<String>,
    },
}

pub async fn run(command: CompanyCommand, api: &ApiClient, today: NaiveDate) -> Result<(), CliError> {
    match command {
        CompanyCommand::Overview => {
            let (dashboard, devices) = company::overview(api).await?;
            if let Some(company_name) = &dashboard.company_name {
                println!("{}", company_name);
            }
            println!("Devices              {}", dashboard.total_devices);
            println!("Open tickets         {}", dashboard.open_tickets);
            println!("Active AMC contracts {}", dashboard.active_amc_contracts);
            println!("Expiring warranties  {}", dashboard.expiring_warranties);
            println!("Pending quotations   {}", dashboard.pending_quotations);
            println!();
            println!("{}", table(&devices, today));
        }
        CompanyCommand::Devices { search: query } => {
            let devices = company::devices(api).await?;
            println!("{}", table(search(&devices, query.as_deref().unwrap_or_default()), today));
        }
        CompanyCommand::Amc => {
            let contracts = company::amc_contracts(api).await?;
            println!("{}", table(&contracts, today));
        }
        CompanyCommand::Tickets { search: query } => {
            let tickets = company::tickets(api).await?;
            println!("{}", table(search(&tickets, query.as_deref().unwrap_or_default()), today));
        }
        CompanyCommand::NewTicket {
            subject,
            description,
            priority,
            device,
        } => {
            let ticket = NewTicket {
                subject,
                description,
                priority,
                device_id: device,
            };
            let created = company::create_ticket(api, &ticket).await?;
            Notice::success(format!("Ticket {} created", created.reference())).emit();
        }
        CompanyCommand::Quotations => {
            let quotations = company::quotations(api).await?;
            println!("{}", table(&quotations, today));
        }
        CompanyCommand::Respond {
            quotation,
            decision,
            comment,
        } => {
            let response = QuotationResponse {
                action: decision,
                comment,
            };
            company::respond_to_quotation(api, &quotation, &response).await?;
            let verb = match decision {
                QuotationDecision::Approve => "approved",
                QuotationDecision::Reject => "rejected",
            };
            Notice::success(format!("Quotation {} {}", quotation, verb)).emit();
        }
        CompanyCommand::Order {
            consumable,
            quantity,
            device,
            notes,
        } => {
            let order = ConsumableOrder {
                consumable_id: consumable,
                quantity,
                device_id: device,
                notes,
            };
            company::order_consumable(api, &order).await?;
            Notice::success("Order placed").emit();
        }
        CompanyCommand::Credentials { search: query } => {
            let credentials = company::credentials(api).await?;
            println!("{}", table(search(&credentials, query.as_deref().unwrap_or_default()), today));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::new_client;
    use crate::app_config::AppConfigBuilder;
    use crate::portal::Portal;
    use mockito::Matcher;
    use serde_json::json;
    use test_log::test;

    #[test(tokio::test)]
    async fn new_ticket_posts_the_form() -> Result<(), CliError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/ticketing/portal/tickets")
            .match_body(Matcher::Json(json!({
                "subject": "Printer jams",
                "description": "Tray 2 jams on every job",
                "priority": "high",
                "device_id": 11
            })))
            .with_status(201)
            .with_body(r#"{"id": 321, "ticket_number": "TKT-0321", "subject": "Printer jams", "status": "open"}"#)
            .create_async()
            .await;

        let config = AppConfigBuilder::new().base_url(server.url()).build();
        let api = new_client(&config, Portal::Company, Some("token"))?;
        let command = CompanyCommand::NewTicket {
            subject: "Printer jams".to_string(),
            description: "Tray 2 jams on every job".to_string(),
            priority: Priority::High,
            device: Some(Id::Number(11)),
        };

        run(command, &api, NaiveDate::from_ymd_opt(2026, 4, 10).unwrap()).await?;

        mock.assert_async().await;
        Ok(())
    }

    #[test(tokio::test)]
    async fn rejecting_without_a_comment_never_reaches_the_server() -> Result<(), CliError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let config = AppConfigBuilder::new().base_url(server.url()).build();
        let api = new_client(&config, Portal::Company, Some("token"))?;
        let command = CompanyCommand::Respond {
            quotation: Id::Number(4),
            decision: QuotationDecision::Reject,
            comment: None,
        };

        let result = run(command, &api, NaiveDate::from_ymd_opt(2026, 4, 10).unwrap()).await;

        assert!(matches!(result, Err(CliError::Api(_))));
        mock.assert_async().await;
        Ok(())
    }
}
