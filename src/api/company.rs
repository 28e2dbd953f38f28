use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::resource::ListResponse;
use crate::domain::Id;
use crate::domain::Ticket;
use crate::domain::amc_contract::AmcContract;
use crate::domain::company_portal::{CompanyDashboard, ConsumableOrder, Credential, Quotation, QuotationResponse};
use crate::domain::device::Device;
use crate::domain::ticket::NewTicket;
use crate::validation::Validate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, instrument};

async fn list<T: DeserializeOwned>(api: &ApiClient, path: &str, label: &str) -> Result<Vec<T>, ApiError> {
    info!("Retrieving {}...", label);
    let items = api.get::<ListResponse<T>>(path).await?.into_items();
    info!("Retrieving {}... OK, {} found", label, items.len());
    Ok(items)
}

#[instrument(skip(api))]
pub async fn dashboard(api: &ApiClient) -> Result<CompanyDashboard, ApiError> {
    api.get("/api/company/dashboard").await
}

#[instrument(skip(api))]
pub async fn devices(api: &ApiClient) -> Result<Vec<Device>, ApiError> {
    list(api, "/api/company/devices", "devices").await
}

/// The landing page: dashboard counters and the device list, fetched in
/// parallel.
#[instrument(skip(api))]
pub async fn overview(api: &ApiClient) -> Result<(CompanyDashboard, Vec<Device>), ApiError> {
    futures::try_join!(dashboard(api), devices(api))
}

#[instrument(skip(api))]
pub async fn amc_contracts(api: &ApiClient) -> Result<Vec<AmcContract>, ApiError> {
    list(api, "/api/company/amc-contracts", "AMC contracts").await
}

#[instrument(skip(api))]
pub async fn tickets(api: &ApiClient) -> Result<Vec<Ticket>, ApiError> {
    list(api, "/api/ticketing/portal/tickets", "tickets").await
}

#[instrument(skip(api))]
pub async fn create_ticket(api: &ApiClient, ticket: &NewTicket) -> Result<Ticket, ApiError> {
    ticket.validate()?;
    let created = api.post::<Ticket, _>("/api/ticketing/portal/tickets", ticket).await?;
    info!("🟢 Created ticket '{}'", created.reference());
    Ok(created)
}

#[instrument(skip(api))]
pub async fn quotations(api: &ApiClient) -> Result<Vec<Quotation>, ApiError> {
    list(api, "/api/company/quotations", "quotations").await
}

#[instrument(skip(api))]
pub async fn respond_to_quotation(api: &ApiClient, quotation_id: &Id, response: &QuotationResponse) -> Result<(), ApiError> {
    response.validate()?;
    api.post::<Value, _>(&format!("/api/company/quotations/{}/respond", quotation_id), response)
        .await?;
    Ok(())
}

#[instrument(skip(api))]
pub async fn order_consumable(api: &ApiClient, order: &ConsumableOrder) -> Result<(), ApiError> {
    order.validate()?;
    api.post::<Value, _>("/api/company/consumables/orders", order).await?;
    info!("🟢 Ordered {} x consumable '{}'", order.quantity, order.consumable_id);
    Ok(())
}

#[instrument(skip(api))]
pub async fn credentials(api: &ApiClient) -> Result<Vec<Credential>, ApiError> {
    list(api, "/api/company/credentials", "credentials").await
}
