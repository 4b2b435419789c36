use std::env;

use thiserror::Error;

/// Region used when `AWS_REGION` is not set.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("TABLE_NAME must be set to a non-empty table name")]
    MissingTableName,
}

/// Store configuration, loaded once at startup and passed to constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name of the single table holding color records.
    pub table_name: String,
    /// AWS region (default: "us-east-1").
    pub region: String,
    /// Custom endpoint URL, for local DynamoDB.
    pub endpoint_url: Option<String>,
}

impl Config {
    /// Creates a configuration for the given table with default region and
    /// no endpoint override.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
        }
    }

    /// Sets the AWS region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Points the client at a custom endpoint (e.g. `http://localhost:8000`).
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLE_NAME` - Table holding color records (required)
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `AWS_ENDPOINT_URL` - Custom endpoint URL (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            table_name: lookup("TABLE_NAME").unwrap_or_default(),
            region: lookup("AWS_REGION")
                .filter(|region| !region.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            endpoint_url: lookup("AWS_ENDPOINT_URL").filter(|url| !url.trim().is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_name.trim().is_empty() {
            return Err(ConfigError::MissingTableName);
        }
        Ok(())
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({url}), table {}", self.table_name),
            None => format!(
                "AWS DynamoDB (region: {}), table {}",
                self.region, self.table_name
            ),
        }
    }
}
