//! Connection configuration
//!
//! Read from a TOML file, then overridden by environment variables:
//!
//! ```toml
//! [connection]
//! api_token = "..."
//! # or
//! email = "ops@example.com"
//! api_key = "..."
//! base_url = "https://api.cloudflare.com/client/v4"
//! max_retries = 3
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use hostname_connector_provider::{ClientOptions, Credentials};
use serde::Deserialize;

pub const ENV_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";
pub const ENV_EMAIL: &str = "CLOUDFLARE_EMAIL";
pub const ENV_API_KEY: &str = "CLOUDFLARE_API_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub connection: ConnectionConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    pub api_token: Option<String>,
    pub email: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub max_retries: Option<u32>,
}

impl ConnectionConfig {
    /// Environment values win over file values.
    #[must_use]
    pub fn with_overrides(mut self, env: ConnectionConfig) -> Self {
        self.api_token = env.api_token.or(self.api_token);
        self.email = env.email.or(self.email);
        self.api_key = env.api_key.or(self.api_key);
        self.base_url = env.base_url.or(self.base_url);
        self.max_retries = env.max_retries.or(self.max_retries);
        self
    }

    /// Picks the credentials to use. A token wins over email + key.
    pub fn credentials(&self) -> Result<Credentials> {
        if let Some(api_token) = non_empty(self.api_token.as_deref()) {
            return Ok(Credentials::ApiToken {
                api_token: api_token.to_string(),
            });
        }

        match (
            non_empty(self.email.as_deref()),
            non_empty(self.api_key.as_deref()),
        ) {
            (Some(email), Some(api_key)) => Ok(Credentials::ApiKey {
                email: email.to_string(),
                api_key: api_key.to_string(),
            }),
            (None, Some(_)) => bail!("api_key is set but email is missing"),
            (Some(_), None) => bail!("email is set but api_key is missing"),
            (None, None) => bail!(
                "no Cloudflare credentials configured (set {ENV_API_TOKEN}, or {ENV_EMAIL} and {ENV_API_KEY})"
            ),
        }
    }

    pub fn client_options(&self) -> ClientOptions {
        let defaults = ClientOptions::default();
        ClientOptions {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
            ..defaults
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hostname-connector").join("config.toml"))
}

pub fn parse(contents: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(contents)?)
}

/// Loads `path`, or the default location when none is given.
///
/// A missing default file is not an error; a missing explicit file is.
pub fn load(path: Option<&Path>) -> Result<ConnectionConfig> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => match default_config_path() {
            Some(path) => (path, false),
            None => return Ok(ConnectionConfig::default()),
        },
    };

    if !path.exists() {
        if explicit {
            bail!("Config file not found: {}", path.display());
        }
        tracing::debug!("No config file at {}", path.display());
        return Ok(ConnectionConfig::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let file = parse(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    tracing::debug!("Loaded config from {}", path.display());
    Ok(file.connection)
}

pub fn env_overrides() -> ConnectionConfig {
    let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
    ConnectionConfig {
        api_token: var(ENV_API_TOKEN),
        email: var(ENV_EMAIL),
        api_key: var(ENV_API_KEY),
        ..ConnectionConfig::default()
    }
}
