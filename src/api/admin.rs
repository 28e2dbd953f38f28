use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::resource::ListResponse;
use crate::domain::Id;
use crate::domain::visit::{PartRequest, PartRequestStatus, Visit, VisitActionForm};
use crate::validation::{Validate, required};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

#[instrument(skip(api))]
pub async fn visit(api: &ApiClient, visit_id: &Id) -> Result<Visit, ApiError> {
    api.get(&format!("/api/admin/visits/{}", visit_id)).await
}

#[instrument(skip(api))]
pub async fn start_timer(api: &ApiClient, visit_id: &Id) -> Result<(), ApiError> {
    api.post_empty::<Value>(&format!("/api/admin/visits/{}/start-timer", visit_id)).await?;
    info!("⏱️ Started timer for visit '{}'", visit_id);
    Ok(())
}

#[instrument(skip(api))]
pub async fn stop_timer(api: &ApiClient, visit_id: &Id) -> Result<(), ApiError> {
    api.post_empty::<Value>(&format!("/api/admin/visits/{}/stop-timer", visit_id)).await?;
    info!("⏱️ Stopped timer for visit '{}'", visit_id);
    Ok(())
}

#[instrument(skip(api))]
pub async fn add_action(api: &ApiClient, visit_id: &Id, action: &VisitActionForm) -> Result<(), ApiError> {
    action.validate()?;
    api.post::<Value, _>(&format!("/api/admin/visits/{}/add-action", visit_id), action).await?;
    Ok(())
}

#[derive(Serialize)]
struct PartRequestQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<PartRequestStatus>,
}

#[instrument(skip(api))]
pub async fn part_requests(api: &ApiClient, status: Option<PartRequestStatus>) -> Result<Vec<PartRequest>, ApiError> {
    info!("Retrieving part requests...");
    let requests = api
        .get_with_query::<ListResponse<PartRequest>, _>("/api/admin/ticket-parts/requests", &PartRequestQuery { status })
        .await?
        .into_items();
    info!("Retrieving part requests... OK, {} found", requests.len());
    Ok(requests)
}

#[instrument(skip(api))]
pub async fn approve_part_request(api: &ApiClient, request_id: &Id) -> Result<(), ApiError> {
    api.post_empty::<Value>(&format!("/api/admin/ticket-parts/requests/{}/approve", request_id))
        .await?;
    Ok(())
}

#[derive(Serialize)]
struct RejectBody<'a> {
    reason: &'a str,
}

#[instrument(skip(api))]
pub async fn reject_part_request(api: &ApiClient, request_id: &Id, reason: &str) -> Result<(), ApiError> {
    required("reason", reason)?;
    api.post::<Value, _>(
        &format!("/api/admin/ticket-parts/requests/{}/reject", request_id),
        &RejectBody { reason: reason.trim() },
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::new_client;
    use crate::app_config::AppConfigBuilder;
    use crate::portal::Portal;
    use crate::validation::ValidationError;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn client(server: &mockito::ServerGuard) -> ApiClient {
        let config = AppConfigBuilder::new().base_url(server.url()).build();
        new_client(&config, Portal::Admin, Some("admin-token")).unwrap()
    }

    #[tokio::test]
    async fn timers_post_to_the_visit() -> Result<(), ApiError> {
        let mut server = mockito::Server::new_async().await;
        let start = server
            .mock("POST", "/api/admin/visits/12/start-timer")
            .with_status(200)
            .with_body(r#"{"timer_started_at": "2026-04-01T10:00:00Z"}"#)
            .create_async()
            .await;
        let stop = server.mock("POST", "/api/admin/visits/12/stop-timer").with_status(200).create_async().await;

        let api = client(&server);
        start_timer(&api, &Id::Number(12)).await?;
        stop_timer(&api, &Id::Number(12)).await?;

        start.assert_async().await;
        stop.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn add_action_validates_the_form() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/api/admin/visits/12/add-action").expect(0).create_async().await;

        let action = VisitActionForm {
            action_type: "repair".to_string(),
            description: " ".to_string(),
        };
        let result = add_action(&client(&server), &Id::Number(12), &action).await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(ApiError::Validation(ValidationError::Required { field: "description" }))
        ));
    }

    #[tokio::test]
    async fn part_requests_filter_by_status() -> Result<(), ApiError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/admin/ticket-parts/requests")
            .match_query(Matcher::UrlEncoded("status".into(), "pending".into()))
            .with_status(200)
            .with_body(r#"[{"id": 1, "ticket_id": 101, "part_name": "Fuser unit", "quantity": 2, "status": "pending", "requested_by": "Ravi"}]"#)
            .create_async()
            .await;

        let requests = part_requests(&client(&server), Some(PartRequestStatus::Pending)).await?;

        mock.assert_async().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].quantity, 2);
        Ok(())
    }

    #[tokio::test]
    async fn reject_part_request_sends_the_reason() -> Result<(), ApiError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/admin/ticket-parts/requests/5/reject")
            .match_body(Matcher::Json(json!({ "reason": "Out of stock" })))
            .with_status(200)
            .create_async()
            .await;

        reject_part_request(&client(&server), &Id::Number(5), " Out of stock ").await?;

        mock.assert_async().await;
        Ok(())
    }
}
