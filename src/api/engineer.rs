use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::domain::Id;
use crate::domain::assignment::{AcceptRequest, DeclineReason, DeclineRequest, EngineerDashboard, RescheduleRequest};
use crate::domain::slot::{SlotGrid, SlotSelection};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

/// The engineer endpoints the assignment workflow depends on.
#[async_trait]
pub trait EngineerApi: Send + Sync {
    async fn dashboard(&self) -> Result<EngineerDashboard, ApiError>;
    async fn decline_reasons(&self) -> Result<Vec<DeclineReason>, ApiError>;
    async fn accept(&self, ticket_id: &Id) -> Result<(), ApiError>;
    async fn decline(&self, ticket_id: &Id, reason_code: &str, reason_detail: Option<&str>) -> Result<(), ApiError>;
    async fn available_slots(&self, date: NaiveDate) -> Result<SlotGrid, ApiError>;
    async fn reschedule(&self, ticket_id: &Id, selection: &SlotSelection, notes: Option<&str>) -> Result<(), ApiError>;
}

#[derive(Serialize)]
struct SlotQuery {
    date: NaiveDate,
}

#[async_trait]
impl EngineerApi for ApiClient {
    #[instrument(skip(self))]
    async fn dashboard(&self) -> Result<EngineerDashboard, ApiError> {
        info!("Retrieving engineer dashboard...");
        let dashboard = self.get::<EngineerDashboard>("/api/engineer/dashboard").await?;
        info!(
            "Retrieving engineer dashboard... OK, {} pending, {} active",
            dashboard.pending_assignments.len(),
            dashboard.active_tickets.len()
        );
        Ok(dashboard)
    }

    #[instrument(skip(self))]
    async fn decline_reasons(&self) -> Result<Vec<DeclineReason>, ApiError> {
        self.get("/api/engineer/decline-reasons").await
    }

    #[instrument(skip(self))]
    async fn accept(&self, ticket_id: &Id) -> Result<(), ApiError> {
        self.post::<Value, _>("/api/engineer/assignment/accept", &AcceptRequest { ticket_id })
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn decline(&self, ticket_id: &Id, reason_code: &str, reason_detail: Option<&str>) -> Result<(), ApiError> {
        let request = DeclineRequest {
            ticket_id,
            reason_code,
            reason_detail,
        };
        self.post::<Value, _>("/api/engineer/assignment/decline", &request).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn available_slots(&self, date: NaiveDate) -> Result<SlotGrid, ApiError> {
        info!("Retrieving slots for {}...", date);
        let grid = self
            .get_with_query::<SlotGrid, _>("/api/engineer/available-slots", &SlotQuery { date })
            .await?;
        info!("Retrieving slots for {}... OK, {} available", date, grid.available().count());
        Ok(grid)
    }

    #[instrument(skip(self))]
    async fn reschedule(&self, ticket_id: &Id, selection: &SlotSelection, notes: Option<&str>) -> Result<(), ApiError> {
        let request = RescheduleRequest {
            ticket_id,
            proposed_start: selection.start,
            proposed_end: selection.end,
            notes,
        };
        self.post::<Value, _>("/api/engineer/assignment/reschedule", &request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::new_client;
    use crate::app_config::AppConfigBuilder;
    use crate::domain::slot::SlotStatus;
    use crate::portal::Portal;
    use chrono::NaiveTime;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn client(server: &mockito::ServerGuard) -> ApiClient {
        let config = AppConfigBuilder::new().base_url(server.url()).build();
        new_client(&config, Portal::Engineer, Some("engineer-token")).unwrap()
    }

    #[tokio::test]
    async fn dashboard_returns_pending_and_active_tickets() -> Result<(), ApiError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/engineer/dashboard")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/engineer_dashboard_response.json"))
            .create_async()
            .await;

        let dashboard = client(&server).dashboard().await?;

        mock.assert_async().await;
        assert_eq!(dashboard.pending_assignments.len(), 2);
        assert_eq!(dashboard.pending_assignments[0].reference(), "TKT-0101");
        assert_eq!(dashboard.active_tickets.len(), 1);
        assert_eq!(dashboard.stats.completed_this_week, 7);
        Ok(())
    }

    #[tokio::test]
    async fn available_slots_sends_the_date_as_a_query() -> Result<(), ApiError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/engineer/available-slots")
            .match_query(Matcher::UrlEncoded("date".into(), "2026-05-04".into()))
            .with_status(200)
            .with_body(include_str!("../../tests/resources/available_slots_response.json"))
            .create_async()
            .await;

        let grid = client(&server).available_slots(NaiveDate::from_ymd_opt(2026, 5, 4).unwrap()).await?;

        mock.assert_async().await;
        assert_eq!(grid.slots.len(), 5);
        assert_eq!(grid.slots[0].status, SlotStatus::Blocked);
        assert_eq!(grid.slots[0].blocked_by.as_deref(), Some("TKT-0095"));
        assert_eq!(grid.available().count(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn decline_posts_the_reason() -> Result<(), ApiError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/engineer/assignment/decline")
            .match_body(Matcher::Json(json!({
                "ticket_id": 101,
                "reason_code": "out_of_area",
                "reason_detail": "Site moved to the north campus"
            })))
            .with_status(200)
            .with_body(r#"{"message": "Assignment declined"}"#)
            .create_async()
            .await;

        client(&server)
            .decline(&Id::Number(101), "out_of_area", Some("Site moved to the north campus"))
            .await?;

        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn reschedule_posts_a_one_hour_window() -> Result<(), ApiError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/engineer/assignment/reschedule")
            .match_body(Matcher::Json(json!({
                "ticket_id": 102,
                "proposed_start": "2026-05-04T14:30:00",
                "proposed_end": "2026-05-04T15:30:00",
                "notes": "Customer asked for the afternoon"
            })))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let selection = SlotSelection::starting_at(
            NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
            NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        );
        client(&server)
            .reschedule(&Id::Number(102), &selection, Some("Customer asked for the afternoon"))
            .await?;

        mock.assert_async().await;
        Ok(())
    }
}
