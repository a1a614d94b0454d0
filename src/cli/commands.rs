//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Engage API command-line client
#[derive(Parser, Debug)]
#[command(name = "engage-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Engage API endpoint (overrides config and ENGAGE_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// API key (overrides config and ENGAGE_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Run the health check before the command
    #[arg(long, global = true)]
    pub debug: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Call the test endpoint
    Test,

    /// Fetch one item of a collection
    Get {
        /// Collection (Users, Events, Memberships, Organizations, Positions, Attendees)
        resource: String,

        /// Item id
        id: u64,
    },

    /// Fetch one page of a collection
    List {
        /// Collection name
        resource: String,

        /// Page number
        #[arg(long)]
        page: Option<u32>,

        /// Page size
        #[arg(long)]
        page_size: Option<u32>,

        /// Filter parameter as key=value (repeatable)
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// Fetch every page of a collection
    ListAll {
        /// Collection name
        resource: String,

        /// Page size used for each request
        #[arg(long)]
        page_size: Option<u32>,

        /// Filter parameter as key=value (repeatable)
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// Create a membership
    CreateMembership {
        /// Membership fields as a JSON object
        #[arg(long)]
        json: String,
    },

    /// End a membership
    EndMembership {
        /// Membership id
        id: u64,
    },

    /// Update a user
    UpdateUser {
        /// User id
        id: u64,

        /// Fields to change as a JSON object
        #[arg(long)]
        json: String,
    },

    /// Send a request to an arbitrary path
    Raw {
        /// HTTP verb (GET, POST, PUT, DELETE)
        verb: String,

        /// Path relative to the endpoint
        path: String,

        /// Options as a JSON object
        #[arg(long)]
        json: Option<String>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}
