//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::bricklink::images::ImageScheme;
use crate::error::BricklinkError;
use crate::oauth::Credentials;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.bricklink.com/api/store/v1";

/// Client configuration with layered loading.
///
/// Built once and handed to the client, which never mutates it.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// OAuth consumer key
    #[serde(default)]
    pub consumer_key: Option<String>,

    /// OAuth consumer secret
    #[serde(default)]
    pub consumer_secret: Option<String>,

    /// Access token value
    #[serde(default)]
    pub token_value: Option<String>,

    /// Access token secret
    #[serde(default)]
    pub token_secret: Option<String>,

    /// API root, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Scheme used when building image URLs
    #[serde(default)]
    pub image_scheme: ImageScheme,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            consumer_key: None,
            consumer_secret: None,
            token_value: None,
            token_secret: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            proxy: None,
            image_scheme: ImageScheme::Https,
            format: OutputFormat::Table,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Config")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &redacted(&self.consumer_secret))
            .field("token_value", &self.token_value)
            .field("token_secret", &redacted(&self.token_secret))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("proxy", &self.proxy)
            .field("image_scheme", &self.image_scheme)
            .field("format", &self.format)
            .finish()
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration holding the four OAuth secrets.
    pub fn with_credentials(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token_value: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: Some(consumer_key.into()),
            consumer_secret: Some(consumer_secret.into()),
            token_value: Some(token_value.into()),
            token_secret: Some(token_secret.into()),
            ..Self::default()
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("bricklink.toml");
        if local_config.exists() {
            debug!("Found bricklink.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("bricklink").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        for (var, field) in [
            ("BRICKLINK_CONSUMER_KEY", &mut self.consumer_key),
            ("BRICKLINK_CONSUMER_SECRET", &mut self.consumer_secret),
            ("BRICKLINK_TOKEN_VALUE", &mut self.token_value),
            ("BRICKLINK_TOKEN_SECRET", &mut self.token_secret),
            ("BRICKLINK_PROXY", &mut self.proxy),
        ] {
            if let Ok(value) = std::env::var(var) {
                *field = Some(value);
            }
        }

        if let Ok(base_url) = std::env::var("BRICKLINK_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("BRICKLINK_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }

        self
    }

    /// Checks that all four secrets are present and returns them.
    pub fn credentials(&self) -> std::result::Result<Credentials, BricklinkError> {
        let value = |v: &Option<String>| v.clone().unwrap_or_default();
        Credentials::new(
            value(&self.consumer_key),
            value(&self.consumer_secret),
            value(&self.token_value),
            value(&self.token_secret),
        )
    }

    /// Validates the whole configuration.
    pub fn validate(&self) -> std::result::Result<(), BricklinkError> {
        self.credentials()?;

        let base = url::Url::parse(&self.base_url).map_err(|e| {
            BricklinkError::configuration(format!("Invalid base_url {}: {}", self.base_url, e))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(BricklinkError::configuration(format!(
                "base_url must be http or https: {}",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(BricklinkError::configuration("timeout_secs must be greater than zero"));
        }

        Ok(())
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use: table, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
