//! Configuration loading and management

use crate::core::error::{ConfigError, FanoutError, FanoutResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Endpoint of a remote backend service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    /// URL of the service (e.g., "http://account:8080")
    pub url: String,
}

impl ServiceEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Complete configuration for the fan-out layer
///
/// Every key is optional in YAML; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanoutConfig {
    /// Timeout applied to every backend call, in seconds
    pub call_timeout_secs: u64,

    /// Account service endpoint
    pub account_service: ServiceEndpoint,

    /// Catalog service endpoint
    pub catalog_service: ServiceEndpoint,

    /// Address the query API listens on
    pub listen_addr: String,
}

impl Default for FanoutConfig {
    fn default() -> Self {
        Self {
            call_timeout_secs: 3,
            account_service: ServiceEndpoint::new("http://127.0.0.1:8080"),
            catalog_service: ServiceEndpoint::new("http://127.0.0.1:8081"),
            listen_addr: "0.0.0.0:8000".to_string(),
        }
    }
}

impl FanoutConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> FanoutResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            FanoutError::Config(ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            })
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> FanoutResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the resolvers cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.call_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "call_timeout_secs".to_string(),
                value: "0".to_string(),
                message: "backend calls need a non-zero deadline".to_string(),
            });
        }

        for (field, endpoint) in [
            ("account_service.url", &self.account_service),
            ("catalog_service.url", &self.catalog_service),
        ] {
            if endpoint.url.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: endpoint.url.clone(),
                    message: "endpoint URL must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}
