use crate::api::error::{ApiError, extract_detail};
use crate::app_config::AppConfig;
use crate::portal::Portal;
use crate::session::SessionStore;
use reqwest::header::HeaderValue;
use reqwest::{Client, RequestBuilder, Response, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, instrument, warn};

/// HTTP client bound to one portal: base URL, bearer token and the retry
/// policy for reads. Mutations are sent exactly once.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    portal: Portal,
    read_retries: usize,
    retry_base_ms: u64,
    retry_max_delay: Duration,
}

pub fn new_client(config: &AppConfig, portal: Portal, token: Option<&str>) -> Result<ApiClient, ApiError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(token) = token {
        let mut authorization_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
        authorization_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, authorization_value);
    }

    let client = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(config.api().timeout())
        .default_headers(headers)
        .build()?;

    Ok(ApiClient {
        client,
        base_url: config.api().base_url().to_string(),
        portal,
        read_retries: config.api().read_retries(),
        retry_base_ms: config.api().retry_base_ms(),
        retry_max_delay: config.api().retry_max_delay(),
    })
}

/// Builds a client for a portal the user is logged in to.
pub fn authenticated_client(config: &AppConfig, session: &SessionStore, portal: Portal) -> Result<ApiClient, ApiError> {
    let token = session.token(portal).ok_or(ApiError::Unauthenticated { portal })?;
    new_client(config, portal, Some(token))
}

impl ApiClient {
    pub fn portal(&self) -> Portal {
        self.portal
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(skip(self), fields(portal = %self.portal))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.retry_read(path, || self.client.get(self.url(path))).await
    }

    #[instrument(skip(self, query), fields(portal = %self.portal))]
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.retry_read(path, || self.client.get(self.url(path)).query(query)).await
    }

    async fn retry_read<T, F>(&self, path: &str, request: F) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        // base_ms * 2^n, capped
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(self.retry_base_ms)
            .max_delay(self.retry_max_delay)
            .map(jitter)
            .take(self.read_retries);

        RetryIf::spawn(
            strategy,
            || send(request()),
            |error: &ApiError| {
                let retry = is_transient(error);
                if retry {
                    warn!("⚠️ GET {} failed: {}. Retrying...", path, error);
                }
                retry
            },
        )
        .await
    }

    #[instrument(skip(self, body), fields(portal = %self.portal))]
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        send(self.client.post(self.url(path)).json(body)).await
    }

    #[instrument(skip(self), fields(portal = %self.portal))]
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        send(self.client.post(self.url(path))).await
    }

    #[instrument(skip(self, body), fields(portal = %self.portal))]
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        send(self.client.put(self.url(path)).json(body)).await
    }

    #[instrument(skip(self), fields(portal = %self.portal))]
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        send::<serde_json::Value>(self.client.delete(self.url(path))).await?;
        Ok(())
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request.send().await?;
    decode(response).await
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let detail = extract_detail(&body);
        debug!(status_code = %status, "Request failed. Response: {:?}", body);
        return Err(ApiError::Status { status, detail });
    }

    // Some endpoints answer a mutation with an empty body.
    let body = if body.trim().is_empty() { "null" } else { body.as_str() };
    Ok(serde_json::from_str(body)?)
}

fn is_transient(error: &ApiError) -> bool {
    match error {
        ApiError::Request(err) => err.is_timeout() || err.is_connect(),
        ApiError::Status { status, .. } => status.is_server_error(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn new_client_sets_the_bearer_token() -> Result<(), ApiError> {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/api/engineer/dashboard")
            .with_status(200)
            .with_body("{}")
            .match_header("authorization", "Bearer secret-token")
            .create_async()
            .await;

        let config = AppConfigBuilder::new().base_url(server.url()).build();
        let client = new_client(&config, Portal::Engineer, Some("secret-token"))?;

        client.get::<Value>("/api/engineer/dashboard").await?;

        // Verify that the call came in and that the header is set
        mock.assert_async().await;

        Ok(())
    }

    #[test]
    fn authenticated_client_requires_a_token() {
        let config = AppConfigBuilder::new().build();

        let result = authenticated_client(&config, &SessionStore::default(), Portal::Platform);

        assert!(matches!(result, Err(ApiError::Unauthenticated { portal: Portal::Platform })));
    }

    #[tokio::test]
    async fn errors_carry_the_server_detail() -> Result<(), ApiError> {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/engineer/assignment/accept")
            .with_status(409)
            .with_body(r#"{"detail": "Ticket already accepted"}"#)
            .create_async()
            .await;

        let config = AppConfigBuilder::new().base_url(server.url()).build();
        let client = new_client(&config, Portal::Engineer, Some("token"))?;

        let error = client
            .post::<Value, _>("/api/engineer/assignment/accept", &json!({ "ticket_id": 1 }))
            .await
            .unwrap_err();

        assert_eq!(error.user_message(), "Ticket already accepted");
        Ok(())
    }

    #[tokio::test]
    async fn empty_bodies_decode_as_unit() -> Result<(), ApiError> {
        let mut server = mockito::Server::new_async().await;
        server.mock("POST", "/api/admin/visits/3/start-timer").with_status(204).create_async().await;

        let config = AppConfigBuilder::new().base_url(server.url()).build();
        let client = new_client(&config, Portal::Admin, Some("token"))?;

        client.post_empty::<()>("/api/admin/visits/3/start-timer").await?;
        Ok(())
    }

    #[tokio::test]
    async fn get_retries_server_errors() -> Result<(), ApiError> {
        let mut server = mockito::Server::new_async().await;
        let failing = server
            .mock("GET", "/api/company/devices")
            .with_status(503)
            .expect(2)
            .create_async()
            .await;
        let succeeding = server
            .mock("GET", "/api/company/devices")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let config = AppConfigBuilder::new().base_url(server.url()).read_retries(2).build();
        let client = new_client(&config, Portal::Company, Some("token"))?;

        // The first matching mock still missing hits wins, so the 503 is
        // served twice before the 200.
        let result = client.get::<Vec<Value>>("/api/company/devices").await;

        failing.assert_async().await;
        succeeding.assert_async().await;
        assert_eq!(result?, Vec::<Value>::new());
        Ok(())
    }

    #[tokio::test]
    async fn post_is_not_retried() -> Result<(), ApiError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/company/consumables/orders")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let config = AppConfigBuilder::new().base_url(server.url()).read_retries(3).build();
        let client = new_client(&config, Portal::Company, Some("token"))?;

        let result = client.post::<Value, _>("/api/company/consumables/orders", &json!({})).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(ApiError::Status { .. })));
        Ok(())
    }
}
