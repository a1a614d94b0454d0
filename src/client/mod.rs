//! Engage API client
//!
//! `EngageClient` issues one request per call, classifies the response
//! status, decodes JSON, and remembers the most recent response body.

use crate::config::{ClientConfig, API_KEY_HEADER};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::options::RequestOptions;
use crate::pagination::{PageAggregator, PageEnvelope};
use crate::resources::{MembershipsResource, Resource, ResourceHandle, UsersResource};
use crate::types::{JsonValue, Method};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Path of the health check endpoint
pub const TEST_PATH: &str = "test";

/// Message returned by a healthy `test` endpoint
pub const HEALTHY_MESSAGE: &str = "Success";

/// Decoded result of a successful request
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// 200 response with a JSON body
    Json(JsonValue),
    /// DELETE answered with 204; there is no body
    Deleted,
}

impl ApiResponse {
    /// Convert to a JSON value (`Deleted` becomes `true`)
    pub fn into_value(self) -> JsonValue {
        match self {
            ApiResponse::Json(value) => value,
            ApiResponse::Deleted => JsonValue::Bool(true),
        }
    }

    /// Check if this is the 204 delete success
    pub fn is_deleted(&self) -> bool {
        matches!(self, ApiResponse::Deleted)
    }
}

/// Most recent response recorded by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw body
    pub body: String,
}

/// Last response body, decoded or raw
#[derive(Debug, Clone, PartialEq)]
pub enum LastResponseBody {
    /// JSON-decoded body
    Decoded(JsonValue),
    /// Body as received
    Raw(String),
}

/// Client for the Engage REST API
///
/// Holds the state of the last response; every successful call overwrites
/// it. Sharing one client between concurrent tasks makes that state
/// last-writer-wins.
pub struct EngageClient {
    http: HttpClient,
    config: ClientConfig,
    last_response: RwLock<Option<LastResponse>>,
}

impl EngageClient {
    /// Create a client
    ///
    /// With `debug` enabled, calls the `test` endpoint and fails unless it
    /// reports success.
    pub async fn new(config: ClientConfig) -> Result<Self> {
        let client = Self::build(config)?;
        if client.config.debug {
            client.test_api().await?;
        }
        Ok(client)
    }

    /// Create a client without running the health check
    pub fn build(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut http_config = HttpClientConfig::builder()
            .base_url(config.base_url.clone())
            .timeout(config.timeout())
            .header(API_KEY_HEADER, config.api_key.clone())
            .verbose(config.debug);
        if let Some(agent) = &config.user_agent {
            http_config = http_config.user_agent(agent.clone());
        }

        let http = HttpClient::with_config(http_config.build())?;

        Ok(Self {
            http,
            config,
            last_response: RwLock::new(None),
        })
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Enable or disable debug mode
    pub fn set_debug_mode(&mut self, debug: bool) {
        self.config.debug = debug;
        self.http.set_verbose(debug);
    }

    /// Call the `test` endpoint
    ///
    /// Fails with `HealthCheckFailed` unless the first message of the first
    /// item is `"Success"`.
    pub async fn test_api(&self) -> Result<()> {
        let response = self
            .execute(Method::GET, TEST_PATH, &RequestOptions::new())
            .await?
            .into_value();

        let message = response
            .pointer("/items/0/messages/0")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::health_check("missing health check message"))?;

        if message != HEALTHY_MESSAGE {
            return Err(Error::health_check(message));
        }

        info!("Engage API health check passed");
        Ok(())
    }

    /// Issue a single request
    ///
    /// GET options become the query string; POST, PUT and DELETE options
    /// become the JSON body. Only 200 (and 204 for DELETE) count as success;
    /// a 200 with an empty body decodes to `null`.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        options: &RequestOptions,
    ) -> Result<ApiResponse> {
        if !matches!(
            method,
            Method::GET | Method::POST | Method::PUT | Method::DELETE
        ) {
            return Err(Error::invalid_verb(method.as_str()));
        }

        let response = self.http.send(method, path, options).await?;

        if method == Method::DELETE && response.status == 204 {
            debug!("Delete of {} succeeded", path);
            self.record(204, String::new()).await;
            return Ok(ApiResponse::Deleted);
        }

        if response.status != 200 {
            debug!("{} {} returned {}", method, path, response.status);
            return Err(Error::unexpected_status(response.status, response.body));
        }

        let value = if response.body.trim().is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_str(&response.body)?
        };
        self.record(response.status, response.body).await;
        Ok(ApiResponse::Json(value))
    }

    /// Issue a single request with the verb given as text
    pub async fn execute_str(
        &self,
        verb: &str,
        path: &str,
        options: &RequestOptions,
    ) -> Result<ApiResponse> {
        let method: Method = verb.parse()?;
        self.execute(method, path, options).await
    }

    /// GET a path and decode the JSON body
    pub async fn get_json(&self, path: &str, options: &RequestOptions) -> Result<JsonValue> {
        Ok(self.execute(Method::GET, path, options).await?.into_value())
    }

    /// Fetch one page of a collection
    pub async fn list(&self, resource: Resource, options: &RequestOptions) -> Result<PageEnvelope> {
        let value = self.get_json(resource.collection_path(), options).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch every page of a collection as one envelope
    ///
    /// The synthesized envelope becomes the last response.
    pub async fn list_all(
        &self,
        resource: Resource,
        options: &RequestOptions,
    ) -> Result<PageEnvelope> {
        let client = self;
        let envelope = PageAggregator::with_page_size(self.config.page_size)
            .collect(
                move |page_options| async move { client.list(resource, &page_options).await },
                options,
            )
            .await?;

        info!(
            "Collected {} {} across all pages",
            envelope.items.len(),
            resource
        );

        self.record(200, serde_json::to_string(&envelope)?).await;
        Ok(envelope)
    }

    /// Handle for one resource collection
    pub fn resource(&self, resource: Resource) -> ResourceHandle<'_> {
        ResourceHandle::new(self, resource)
    }

    /// Attendees collection
    pub fn attendees(&self) -> ResourceHandle<'_> {
        self.resource(Resource::Attendees)
    }

    /// Events collection
    pub fn events(&self) -> ResourceHandle<'_> {
        self.resource(Resource::Events)
    }

    /// Memberships collection
    pub fn memberships(&self) -> MembershipsResource<'_> {
        MembershipsResource::new(self)
    }

    /// Organizations collection
    pub fn organizations(&self) -> ResourceHandle<'_> {
        self.resource(Resource::Organizations)
    }

    /// Positions collection
    pub fn positions(&self) -> ResourceHandle<'_> {
        self.resource(Resource::Positions)
    }

    /// Users collection
    pub fn users(&self) -> UsersResource<'_> {
        UsersResource::new(self)
    }

    /// Status and body of the most recent successful call
    pub async fn last(&self) -> Option<LastResponse> {
        self.last_response.read().await.clone()
    }

    /// Status of the most recent successful call
    pub async fn last_status(&self) -> Option<u16> {
        self.last_response.read().await.as_ref().map(|r| r.status)
    }

    /// Raw body of the most recent successful call
    pub async fn last_response_raw(&self) -> Option<String> {
        self.last_response.read().await.as_ref().map(|r| r.body.clone())
    }

    /// Decoded body of the most recent successful call
    ///
    /// `None` before the first call and after a response with no body.
    pub async fn last_response(&self) -> Result<Option<JsonValue>> {
        match self.last_response_raw().await {
            Some(body) if !body.trim().is_empty() => Ok(Some(serde_json::from_str(&body)?)),
            _ => Ok(None),
        }
    }

    /// Most recent body, decoded when `decode` is set
    pub async fn get_last_response(&self, decode: bool) -> Result<Option<LastResponseBody>> {
        if decode {
            Ok(self.last_response().await?.map(LastResponseBody::Decoded))
        } else {
            Ok(self.last_response_raw().await.map(LastResponseBody::Raw))
        }
    }

    async fn record(&self, status: u16, body: String) {
        *self.last_response.write().await = Some(LastResponse { status, body });
    }
}

impl std::fmt::Debug for EngageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngageClient")
            .field("config", &self.config)
            .field("http", &self.http)
            .finish_non_exhaustive()
    }
}
