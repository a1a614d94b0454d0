//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::EngageClient;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::options::RequestOptions;
use crate::resources::Resource;
use crate::types::JsonValue;
use serde_json::json;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command and print its result
    pub async fn run(&self) -> Result<()> {
        let output = self.execute().await?;
        println!("{}", self.render(&output)?);
        Ok(())
    }

    /// Run the CLI command and return its result
    pub async fn execute(&self) -> Result<JsonValue> {
        let client = EngageClient::new(self.load_config()?).await?;

        match &self.cli.command {
            Commands::Test => {
                client.test_api().await?;
                Ok(json!({"status": "Success"}))
            }
            Commands::Get { resource, id } => {
                let resource: Resource = resource.parse()?;
                client.resource(resource).get(*id).await
            }
            Commands::List {
                resource,
                page,
                page_size,
                params,
            } => {
                let resource: Resource = resource.parse()?;
                let mut options = parse_params(params)?;
                options.page = page.or(options.page);
                options.page_size = page_size.or(options.page_size);
                let envelope = client.resource(resource).list(&options).await?;
                Ok(serde_json::to_value(envelope)?)
            }
            Commands::ListAll {
                resource,
                page_size,
                params,
            } => {
                let resource: Resource = resource.parse()?;
                let mut options = parse_params(params)?;
                options.page_size = page_size.or(options.page_size);
                let envelope = client.resource(resource).list_all(&options).await?;
                Ok(serde_json::to_value(envelope)?)
            }
            Commands::CreateMembership { json } => {
                let options = parse_object(json)?;
                client.memberships().create(&options).await
            }
            Commands::EndMembership { id } => {
                Ok(client.memberships().end(*id).await?.into_value())
            }
            Commands::UpdateUser { id, json } => {
                let patch: JsonValue = serde_json::from_str(json)?;
                client.users().update(*id, patch).await
            }
            Commands::Raw { verb, path, json } => {
                let options = match json {
                    Some(json) => parse_object(json)?,
                    None => RequestOptions::new(),
                };
                Ok(client.execute_str(verb, path, &options).await?.into_value())
            }
        }
    }

    /// Build the client config: file, then environment, then flags
    pub fn load_config(&self) -> Result<ClientConfig> {
        self.load_config_with(|name| std::env::var(name).ok())
    }

    /// Build the client config with `lookup` standing in for the environment
    pub fn load_config_with<F>(&self, lookup: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match &self.cli.config {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                ClientConfig::from_file(path)?
            }
            None => ClientConfig::default(),
        };

        let mut config = config.merge_vars(lookup)?;
        if let Some(url) = &self.cli.base_url {
            config.base_url.clone_from(url);
        }
        if let Some(key) = &self.cli.api_key {
            config.api_key.clone_from(key);
        }
        if self.cli.debug {
            config.debug = true;
        }
        Ok(config)
    }

    fn render(&self, value: &JsonValue) -> Result<String> {
        Ok(match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        })
    }
}

/// Parse `key=value` pairs; values that parse as JSON keep their type
fn parse_params(params: &[String]) -> Result<RequestOptions> {
    let mut options = RequestOptions::new();
    for param in params {
        let (key, raw) = param.split_once('=').ok_or_else(|| {
            Error::invalid_argument(format!("expected KEY=VALUE, got '{param}'"))
        })?;
        let value =
            serde_json::from_str(raw).unwrap_or_else(|_| JsonValue::String(raw.to_string()));
        options.insert(key, value);
    }
    Ok(options)
}

/// Parse a JSON object argument into options
fn parse_object(json: &str) -> Result<RequestOptions> {
    match serde_json::from_str(json)? {
        JsonValue::Object(map) => Ok(RequestOptions::from_object(map)),
        _ => Err(Error::invalid_argument("expected a JSON object")),
    }
}
