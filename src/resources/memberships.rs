//! Memberships collection

use super::{Resource, ResourceHandle};
use crate::client::{ApiResponse, EngageClient};
use crate::error::{Error, Result};
use crate::options::RequestOptions;
use crate::types::{JsonValue, Method};
use serde_json::json;
use std::ops::Deref;
use tracing::warn;

/// Memberships collection with create and end support
#[derive(Debug, Clone, Copy)]
pub struct MembershipsResource<'c> {
    handle: ResourceHandle<'c>,
    client: &'c EngageClient,
}

impl<'c> MembershipsResource<'c> {
    pub(crate) fn new(client: &'c EngageClient) -> Self {
        Self {
            handle: ResourceHandle::new(client, Resource::Memberships),
            client,
        }
    }

    /// Create a membership from the given fields
    pub async fn create(&self, options: &RequestOptions) -> Result<JsonValue> {
        let response = self
            .client
            .execute(Method::POST, Resource::Memberships.collection_path(), options)
            .await?;
        Ok(response.into_value())
    }

    /// End a membership
    ///
    /// Client errors are returned as `TransportFailure` whose body is the
    /// server's JSON with a `statusCode` field added.
    pub async fn end(&self, id: u64) -> Result<ApiResponse> {
        let path = Resource::Memberships.item_path(id);
        match self
            .client
            .execute(Method::DELETE, &path, &RequestOptions::new())
            .await
        {
            Err(Error::UnexpectedStatus { status, body }) if (400..500).contains(&status) => {
                warn!("Ending membership {} failed with {}", id, status);
                Err(Error::transport_failure(
                    status,
                    failure_body(status, &body).to_string(),
                ))
            }
            other => other,
        }
    }
}

impl<'c> Deref for MembershipsResource<'c> {
    type Target = ResourceHandle<'c>;

    fn deref(&self) -> &Self::Target {
        &self.handle
    }
}

/// Server body with the status code attached
fn failure_body(status: u16, body: &str) -> JsonValue {
    match serde_json::from_str::<JsonValue>(body) {
        Ok(JsonValue::Object(mut map)) => {
            map.insert("statusCode".to_string(), status.into());
            JsonValue::Object(map)
        }
        Ok(other) => json!({"message": other, "statusCode": status}),
        Err(_) => json!({"message": body, "statusCode": status}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_body_adds_status_code() {
        let body = failure_body(404, r#"{"message":"Membership not found"}"#);
        assert_eq!(
            body,
            json!({"message": "Membership not found", "statusCode": 404})
        );
    }

    #[test]
    fn test_failure_body_wraps_plain_text() {
        let body = failure_body(400, "Bad Request");
        assert_eq!(body, json!({"message": "Bad Request", "statusCode": 400}));

        let body = failure_body(409, r#"["conflict"]"#);
        assert_eq!(body, json!({"message": ["conflict"], "statusCode": 409}));
    }
}
