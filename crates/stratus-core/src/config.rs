//! Client configuration and provider settings

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::retry::RetryConfig;

/// Environment variable prefix used by [`ProviderSettings::load`]
pub const ENV_PREFIX: &str = "STRATUS";

const DEFAULT_USER_AGENT: &str = concat!("stratus/", env!("CARGO_PKG_VERSION"));

/// Configuration for the HTTP layer shared by all bindings
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds
    pub read_timeout_ms: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Retry policy for transient failures
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 5000,
            read_timeout_ms: 60000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Set timeouts
    pub fn with_timeouts(mut self, connect_ms: u64, read_ms: u64) -> Self {
        self.connect_timeout_ms = connect_ms;
        self.read_timeout_ms = read_ms;
        self
    }

    /// Set the retry policy
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }
}

/// Provider endpoint and credentials, loaded from a file and/or `STRATUS_*` variables
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Identity (Keystone) or service endpoint
    pub endpoint: Option<String>,
    /// User name or access key id
    pub identity: Option<String>,
    /// Password or secret key
    pub credential: Option<String>,
    /// Region to operate in
    pub region: Option<String>,
    /// Tenant (project) name for OpenStack
    pub tenant: Option<String>,
    pub connect_timeout_ms: Option<u64>,
    pub read_timeout_ms: Option<u64>,
    pub max_retries: Option<u32>,
}

impl ProviderSettings {
    /// Load settings from an optional file, overridden by environment variables.
    ///
    /// The file format is picked from its extension (toml, yaml, json).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }
        let settings = builder
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize::<ProviderSettings>()?;
        Ok(settings)
    }

    /// Load settings from the environment only
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Derive the HTTP configuration from these settings
    pub fn client_config(&self) -> ClientConfig {
        let defaults = ClientConfig::default();
        let mut config = defaults.clone().with_timeouts(
            self.connect_timeout_ms.unwrap_or(defaults.connect_timeout_ms),
            self.read_timeout_ms.unwrap_or(defaults.read_timeout_ms),
        );
        if let Some(max_retries) = self.max_retries {
            config.retry = config.retry.with_max_attempts(max_retries.saturating_add(1));
        }
        config
    }

    /// Whether endpoint and credentials are present
    pub fn is_complete(&self) -> bool {
        self.endpoint.is_some() && self.identity.is_some() && self.credential.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.connect_timeout_ms, 5000);
        assert_eq!(config.read_timeout_ms, 60000);
        assert!(config.user_agent.starts_with("stratus/"));
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::default()
            .with_timeouts(1000, 2000)
            .with_user_agent("test-agent")
            .with_retry(RetryConfig::none());

        assert_eq!(config.connect_timeout_ms, 1000);
        assert_eq!(config.read_timeout_ms, 2000);
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.retry.max_attempts, 1);
    }

    #[test]
    fn test_settings_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
endpoint = "http://keystone.example.com:5000/v2.0"
identity = "demo"
credential = "secret"
region = "RegionOne"
tenant = "demo-project"
read_timeout_ms = 1500
max_retries = 2
"#
        )
        .unwrap();

        let settings = ProviderSettings::load(Some(file.path())).unwrap();
        assert_eq!(
            settings.endpoint.as_deref(),
            Some("http://keystone.example.com:5000/v2.0")
        );
        assert_eq!(settings.identity.as_deref(), Some("demo"));
        assert_eq!(settings.region.as_deref(), Some("RegionOne"));
        assert_eq!(settings.tenant.as_deref(), Some("demo-project"));
        assert!(settings.is_complete());

        let client = settings.client_config();
        assert_eq!(client.read_timeout_ms, 1500);
        assert_eq!(client.connect_timeout_ms, 5000);
        assert_eq!(client.retry.max_attempts, 3);
    }

    #[test]
    fn test_settings_missing_file_is_not_fatal() {
        let result = ProviderSettings::load_with(
            Some(Path::new("/nonexistent/stratus-settings.toml")),
            Environment::with_prefix("STRATUS_UNSET_TEST_PREFIX"),
        );
        assert!(result.is_ok());

        let settings = result.unwrap();
        assert!(settings.endpoint.is_none());
        assert!(settings.region.is_none());
        assert!(!settings.is_complete());
        assert_eq!(settings.client_config().read_timeout_ms, 60000);
    }

    #[test]
    fn test_max_retries_saturates() {
        let settings = ProviderSettings {
            max_retries: Some(u32::MAX),
            ..Default::default()
        };
        assert_eq!(settings.client_config().retry.max_attempts, u32::MAX);
    }
}
