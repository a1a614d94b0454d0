//! Resource collections
//!
//! Every Engage collection supports `get`, `list` and `list_all` through
//! [`ResourceHandle`]. Memberships and Users add their own operations on
//! top of it.

mod memberships;
mod users;

pub use memberships::MembershipsResource;
pub use users::{UsersResource, USER_IDENTITY_FIELDS};

use crate::client::EngageClient;
use crate::error::{Error, Result};
use crate::options::RequestOptions;
use crate::pagination::PageEnvelope;
use crate::types::JsonValue;
use std::fmt;
use std::str::FromStr;

/// An Engage API collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Attendees,
    Events,
    Memberships,
    Organizations,
    Positions,
    Users,
}

impl Resource {
    /// All collections
    pub const ALL: [Resource; 6] = [
        Resource::Attendees,
        Resource::Events,
        Resource::Memberships,
        Resource::Organizations,
        Resource::Positions,
        Resource::Users,
    ];

    /// Path of the collection (e.g. `Events`)
    pub fn collection_path(self) -> &'static str {
        match self {
            Resource::Attendees => "Attendees",
            Resource::Events => "Events",
            Resource::Memberships => "Memberships",
            Resource::Organizations => "Organizations",
            Resource::Positions => "Positions",
            Resource::Users => "Users",
        }
    }

    /// Path of a single item (e.g. `Events/12`)
    pub fn item_path(self, id: u64) -> String {
        format!("{}/{id}", self.collection_path())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection_path())
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Resource::ALL
            .into_iter()
            .find(|r| r.collection_path().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid_argument(format!("unknown resource '{s}'")))
    }
}

/// Operations shared by every collection
#[derive(Debug, Clone, Copy)]
pub struct ResourceHandle<'c> {
    client: &'c EngageClient,
    resource: Resource,
}

impl<'c> ResourceHandle<'c> {
    pub(crate) fn new(client: &'c EngageClient, resource: Resource) -> Self {
        Self { client, resource }
    }

    /// The collection this handle targets
    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Fetch one item by id
    pub async fn get(&self, id: u64) -> Result<JsonValue> {
        self.client
            .get_json(&self.resource.item_path(id), &RequestOptions::new())
            .await
    }

    /// Fetch one page
    pub async fn list(&self, options: &RequestOptions) -> Result<PageEnvelope> {
        self.client.list(self.resource, options).await
    }

    /// Fetch every page as one envelope
    pub async fn list_all(&self, options: &RequestOptions) -> Result<PageEnvelope> {
        self.client.list_all(self.resource, options).await
    }
}
