//! Users collection

use super::{Resource, ResourceHandle};
use crate::client::EngageClient;
use crate::error::{Error, Result};
use crate::options::RequestOptions;
use crate::types::{JsonObject, JsonValue, Method};
use std::ops::Deref;
use tracing::debug;

/// Fields the update endpoint needs on every PUT
pub const USER_IDENTITY_FIELDS: [&str; 7] = [
    "campusEmail",
    "institutionProvidedFirstName",
    "institutionProvidedLastName",
    "legalFirstName",
    "legalLastName",
    "cardId",
    "sisId",
];

/// Users collection with update support
#[derive(Debug, Clone, Copy)]
pub struct UsersResource<'c> {
    handle: ResourceHandle<'c>,
    client: &'c EngageClient,
}

impl<'c> UsersResource<'c> {
    pub(crate) fn new(client: &'c EngageClient) -> Self {
        Self {
            handle: ResourceHandle::new(client, Resource::Users),
            client,
        }
    }

    /// Update a user
    ///
    /// `patch` must be a JSON object. Identity fields missing from it (or
    /// null) are filled from the stored record before the PUT.
    pub async fn update(&self, id: u64, patch: JsonValue) -> Result<JsonValue> {
        let JsonValue::Object(patch) = patch else {
            return Err(Error::invalid_argument("user patch must be a JSON object"));
        };

        let current = self.handle.get(id).await?;
        let merged = merge_identity_fields(patch, &current);
        debug!("Updating user {} with {} fields", id, merged.len());

        let response = self
            .client
            .execute(
                Method::PUT,
                &Resource::Users.item_path(id),
                &RequestOptions::from_object(merged),
            )
            .await?;
        Ok(response.into_value())
    }
}

impl<'c> Deref for UsersResource<'c> {
    type Target = ResourceHandle<'c>;

    fn deref(&self) -> &Self::Target {
        &self.handle
    }
}

/// Copy identity fields from `current` where `patch` leaves them unset
pub fn merge_identity_fields(mut patch: JsonObject, current: &JsonValue) -> JsonObject {
    for field in USER_IDENTITY_FIELDS {
        let unset = patch.get(field).map_or(true, JsonValue::is_null);
        if unset {
            let stored = current.get(field).cloned().unwrap_or(JsonValue::Null);
            patch.insert(field.to_string(), stored);
        }
    }
    patch
}
