//! EC2 client configuration and credentials

use std::fmt;

use stratus_core::{Error, ProviderSettings};

use crate::error::Result;

/// API version sent as `Version` with every call
pub const DEFAULT_API_VERSION: &str = "2016-11-15";

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Clone, Debug, PartialEq)]
pub struct Ec2Config {
    /// Region used when a call passes `None`
    pub default_region: String,
    /// Fixed endpoint for every region (EC2-compatible clouds, tests)
    pub endpoint: Option<String>,
    pub api_version: String,
}

impl Default for Ec2Config {
    fn default() -> Self {
        Self {
            default_region: DEFAULT_REGION.to_string(),
            endpoint: None,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl Ec2Config {
    pub fn with_default_region(mut self, region: &str) -> Self {
        self.default_region = region.to_string();
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.trim_end_matches('/').to_string());
        self
    }

    pub fn with_api_version(mut self, api_version: &str) -> Self {
        self.api_version = api_version.to_string();
        self
    }

    /// `https://ec2.{region}.amazonaws.com` unless an endpoint override is set
    pub fn endpoint_for(&self, region: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://ec2.{}.amazonaws.com", region),
        }
    }

    /// Region from the settings, endpoint override when the settings name one
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        let mut config = Self::default();
        if let Some(region) = &settings.region {
            config = config.with_default_region(region);
        }
        if let Some(endpoint) = &settings.endpoint {
            config = config.with_endpoint(endpoint);
        }
        config
    }
}

#[derive(Clone, PartialEq)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Present for temporary (STS) credentials
    pub session_token: Option<String>,
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .finish_non_exhaustive()
    }
}

impl AwsCredentials {
    pub fn new(access_key_id: &str, secret_access_key: &str) -> Self {
        Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            session_token: None,
        }
    }

    pub fn with_session_token(mut self, session_token: &str) -> Self {
        self.session_token = Some(session_token.to_string());
        self
    }

    /// `identity` is the access key id, `credential` the secret key
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self> {
        match (&settings.identity, &settings.credential) {
            (Some(identity), Some(credential)) => Ok(Self::new(identity, credential)),
            _ => Err(Error::InvalidConfig(
                "EC2 needs an access key id (identity) and a secret key (credential)".to_string(),
            )
            .into()),
        }
    }
}
