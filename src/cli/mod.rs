//! CLI module
//!
//! Command-line interface over the API client.
//!
//! # Commands
//!
//! - `test` - Call the health check endpoint
//! - `get` / `list` / `list-all` - Read collections
//! - `create-membership` / `end-membership` - Manage memberships
//! - `update-user` - Update a user record
//! - `raw` - Send a request to any path

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
