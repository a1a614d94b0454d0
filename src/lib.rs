//! # Engage API client
//!
//! An async client for the Engage membership and engagement REST API:
//! organizations, users, events, memberships, positions and attendees.
//!
//! ## Features
//!
//! - **API key authentication**: every request carries `X-Engage-Api-Key`
//! - **Uniform status handling**: one executor for GET, POST, PUT and DELETE
//! - **Page aggregation**: `list_all` walks every page into one envelope
//! - **Last response**: the most recent body stays available on the client
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use engage_api::{ClientConfig, EngageClient, RequestOptions, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::new("https://example.campuslabs.com/engage/api", "api-key");
//!     let client = EngageClient::new(config).await?;
//!
//!     // One page
//!     let page = client.events().list(&RequestOptions::new().page_size(50)).await?;
//!
//!     // Every page, merged
//!     let all = client
//!         .memberships()
//!         .list_all(&RequestOptions::new().param("organizationId", 42))
//!         .await?;
//!
//!     println!("{} of {} memberships", page.len(), all.total_items);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      Resource handles                     │
//! │  get(id)   list(options)   list_all(options)              │
//! │  users().update   memberships().create / end              │
//! └───────────────────────────────────────────────────────────┘
//!                │                           │
//! ┌──────────────┴────────────┐  ┌───────────┴───────────────┐
//! │     Request executor      │◄─┤      Page aggregator      │
//! │  verb check, status,      │  │  page 1 → totalPages,     │
//! │  decode, last response    │  │  pages 2..N, synthesize   │
//! └──────────────┬────────────┘  └───────────────────────────┘
//!                │
//! ┌──────────────┴────────────┐
//! │   HTTP transport (reqwest)│
//! └───────────────────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Per-request options
pub mod options;

/// HTTP transport
pub mod http;

/// Page envelopes and aggregation
pub mod pagination;

/// Client configuration
pub mod config;

/// Request executor and client state
pub mod client;

/// Resource collections
pub mod resources;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{ApiResponse, EngageClient, LastResponse, LastResponseBody};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use options::RequestOptions;
pub use pagination::{PageAggregator, PageEnvelope};
pub use resources::{MembershipsResource, Resource, ResourceHandle, UsersResource};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
