//! # Workflow Configuration
//!
//! Loads the listing workflow configuration from a YAML file and hands it
//! around as an explicit value. Nothing in the workspace reads credentials
//! from process-wide state.
//!
//! ## Secret Handling
//!
//! `client_secret` and `refresh_token` are redacted by the manual `Debug`
//! implementation so they never reach log output.

use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::identity::{MarketplaceId, SellerId, Sku};

/// Configuration for one listing workflow run.
#[derive(Clone)]
pub struct WorkflowConfig {
    /// OAuth client identifier issued by the vendor.
    pub client_id: String,
    /// OAuth client secret. Redacted in `Debug`.
    pub client_secret: String,
    /// Long-lived refresh token for the token exchange. Redacted in `Debug`.
    pub refresh_token: String,
    /// Token-exchange endpoint.
    pub auth_endpoint: Url,
    /// Base URL of the selling-partner API.
    pub endpoint: Url,
    /// Marketplaces the workflow operates in.
    pub marketplace_ids: Vec<MarketplaceId>,
    /// Selling-partner identifier.
    pub seller_id: SellerId,
    /// SKU the listing is submitted under.
    pub sku: Sku,
    /// Schema keywords treated as annotation-only during validation.
    /// `None` means "use the built-in default set".
    pub excluded_keywords: Option<Vec<String>>,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for WorkflowConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("auth_endpoint", &self.auth_endpoint)
            .field("endpoint", &self.endpoint)
            .field("marketplace_ids", &self.marketplace_ids)
            .field("seller_id", &self.seller_id)
            .field("sku", &self.sku)
            .field("excluded_keywords", &self.excluded_keywords)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// On-disk shape of the configuration file. URLs are kept as strings so
/// that parse failures surface as [`ConfigError::InvalidUrl`] with the
/// offending field name, not as an opaque YAML error.
#[derive(Debug, Deserialize)]
struct RawConfig {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    #[serde(default = "default_auth_endpoint")]
    auth_endpoint: String,
    endpoint: String,
    marketplace_ids: Vec<MarketplaceId>,
    seller_id: SellerId,
    sku: Sku,
    #[serde(default)]
    excluded_keywords: Option<Vec<String>>,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

fn default_auth_endpoint() -> String {
    "https://api.amazon.com/auth/o2/token".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl WorkflowConfig {
    /// Load and validate the configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid YAML for the expected
    /// shape, and [`ConfigError::InvalidUrl`] if an endpoint field does
    /// not parse as a URL.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let raw: RawConfig = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let auth_endpoint = parse_url("auth_endpoint", &raw.auth_endpoint)?;
        let endpoint = parse_url("endpoint", &raw.endpoint)?;
        Ok(Self {
            client_id: raw.client_id,
            client_secret: raw.client_secret,
            refresh_token: raw.refresh_token,
            auth_endpoint,
            endpoint,
            marketplace_ids: raw.marketplace_ids,
            seller_id: raw.seller_id,
            sku: raw.sku,
            excluded_keywords: raw.excluded_keywords,
            timeout_secs: raw.timeout_secs,
        })
    }
}

fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for the expected shape.
    #[error("cannot parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// An endpoint field is not a valid URL.
    #[error("invalid URL in config field '{field}': {reason}")]
    InvalidUrl { field: String, reason: String },
}
