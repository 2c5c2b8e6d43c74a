//! Keystone v2.0 session
//!
//! Logs in once, caches the token until shortly before it expires and
//! resolves service endpoints from the catalog returned at login.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use reqwest::header::HeaderValue;
use stratus_core::{
    Authenticator, ClientConfig, Error, NoAuth, RestClient, RestRequest, Result, RetryConfig,
};
use tracing::{debug, info};

use crate::config::{Credentials, Interface, KeystoneConfig};
use crate::model::{
    Access, AccessResponse, ApiAccessKeyCredentials, AuthBody, AuthRequest, Endpoint,
    PasswordCredentials,
};

/// Header carrying the token on every OpenStack request
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Refresh the token this long before it expires
const TOKEN_REFRESH_BUFFER_SECS: i64 = 60;

/// An authenticated Identity v2.0 session.
///
/// Shared as `Arc<KeystoneSession>` by every service client created from it.
pub struct KeystoneSession {
    config: KeystoneConfig,
    client_config: ClientConfig,
    identity: RestClient,
    access: RwLock<Access>,
    invalidated: AtomicBool,
    refresh_lock: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for KeystoneSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeystoneSession")
            .field("auth_url", &self.config.auth_url)
            .field("interface", &self.config.interface)
            .finish_non_exhaustive()
    }
}

impl KeystoneSession {
    /// Log in and return a session ready to authorize service requests
    pub async fn authenticate(
        config: KeystoneConfig,
        client_config: ClientConfig,
    ) -> Result<Arc<Self>> {
        // Login is not retried on auth failures; the caller sees the 401 directly
        let identity_config = client_config.clone().with_retry(RetryConfig::none());
        let identity = RestClient::new(&config.auth_url, identity_config, Arc::new(NoAuth))?;

        let access = login(&identity, &config).await?;
        info!(
            "Authenticated against {} (tenant: {})",
            config.auth_url,
            access
                .token
                .tenant
                .as_ref()
                .map(|t| t.name.as_str())
                .unwrap_or("<none>")
        );

        Ok(Arc::new(Self {
            config,
            client_config,
            identity,
            access: RwLock::new(access),
            invalidated: AtomicBool::new(false),
            refresh_lock: tokio::sync::Mutex::new(()),
        }))
    }

    pub fn config(&self) -> &KeystoneConfig {
        &self.config
    }

    pub fn client_config(&self) -> &ClientConfig {
        &self.client_config
    }

    /// Snapshot of the current login result
    pub fn access(&self) -> Access {
        self.access.read().clone()
    }

    /// Tenant id of the current token, if the login was tenant-scoped
    pub fn tenant_id(&self) -> Option<String> {
        self.access
            .read()
            .token
            .tenant
            .as_ref()
            .map(|t| t.id.clone())
    }

    /// A valid token id, logging in again when the cached one is about to expire
    pub async fn token(&self) -> Result<String> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;
        // Another task may have refreshed while we waited
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }

        debug!("Refreshing token from {}", self.config.auth_url);
        let access = login(&self.identity, &self.config).await?;
        let token = access.token.id.clone();
        *self.access.write() = access;
        self.invalidated.store(false, Ordering::SeqCst);
        Ok(token)
    }

    fn cached_token(&self) -> Option<String> {
        if self.invalidated.load(Ordering::SeqCst) {
            return None;
        }
        let access = self.access.read();
        let deadline = Utc::now() + Duration::seconds(TOKEN_REFRESH_BUFFER_SECS);
        (access.token.expires > deadline).then(|| access.token.id.clone())
    }

    /// Resolve the URL of `service_type` for the configured interface.
    ///
    /// Without a region the catalog must offer exactly one candidate.
    pub fn endpoint_for(&self, service_type: &str, region: Option<&str>) -> Result<String> {
        let access = self.access.read();
        let mut candidates: Vec<(Option<&str>, &str)> = access
            .service_catalog
            .iter()
            .filter(|service| service.service_type == service_type)
            .flat_map(|service| service.endpoints.iter())
            .filter(|endpoint| match region {
                Some(region) => endpoint.region.as_deref() == Some(region),
                None => true,
            })
            .filter_map(|endpoint| {
                interface_url(endpoint, self.config.interface)
                    .map(|url| (endpoint.region.as_deref(), url))
            })
            .collect();
        candidates.sort_by(|a, b| a.1.cmp(b.1));
        candidates.dedup_by(|a, b| a.1 == b.1);

        match candidates.as_slice() {
            [] => Err(Error::NoEndpoint {
                service_type: service_type.to_string(),
                region: region.map(str::to_string),
            }),
            [(_, url)] => Ok(url.trim_end_matches('/').to_string()),
            many => Err(Error::InvalidConfig(format!(
                "service type {} is offered in several regions ({}), pick one",
                service_type,
                many.iter()
                    .map(|(region, _)| region.unwrap_or("<none>"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }

    /// Regions that offer `service_type`
    pub fn regions(&self, service_type: &str) -> BTreeSet<String> {
        self.access
            .read()
            .service_catalog
            .iter()
            .filter(|service| service.service_type == service_type)
            .flat_map(|service| service.endpoints.iter())
            .filter_map(|endpoint| endpoint.region.clone())
            .collect()
    }

    /// A client for `service_type` that authorizes requests with this session
    pub fn client_for(
        self: &Arc<Self>,
        service_type: &str,
        region: Option<&str>,
    ) -> Result<RestClient> {
        let endpoint = self.endpoint_for(service_type, region)?;
        debug!("Using {} endpoint {}", service_type, endpoint);
        Ok(RestClient::with_http_client(
            self.identity.http_client().clone(),
            &endpoint,
            self.client_config.clone(),
            self.clone(),
        ))
    }
}

#[async_trait]
impl Authenticator for KeystoneSession {
    async fn authorize(&self, request: &mut reqwest::Request) -> Result<()> {
        let token = self.token().await?;
        let value = HeaderValue::from_str(&token)
            .map_err(|e| Error::AuthenticationFailed(format!("unusable token: {e}")))?;
        request.headers_mut().insert(AUTH_TOKEN_HEADER, value);
        Ok(())
    }

    async fn invalidate(&self) {
        debug!("Dropping cached token for {}", self.config.auth_url);
        self.invalidated.store(true, Ordering::SeqCst);
    }
}

fn interface_url(endpoint: &Endpoint, interface: Interface) -> Option<&str> {
    match interface {
        Interface::Public => endpoint.public_url.as_deref(),
        Interface::Internal => endpoint.internal_url.as_deref(),
        Interface::Admin => endpoint.admin_url.as_deref(),
    }
}

async fn login(identity: &RestClient, config: &KeystoneConfig) -> Result<Access> {
    let (password_credentials, api_access_key_credentials) = match &config.credentials {
        Credentials::Password { username, password } => (
            Some(PasswordCredentials {
                username: username.as_str(),
                password: password.as_str(),
            }),
            None,
        ),
        Credentials::ApiAccessKey {
            access_key,
            secret_key,
        } => (
            None,
            Some(ApiAccessKeyCredentials {
                access_key: access_key.as_str(),
                secret_key: secret_key.as_str(),
            }),
        ),
    };

    let body = AuthRequest {
        auth: AuthBody {
            password_credentials,
            api_access_key_credentials,
            tenant_name: config.tenant_name.as_deref(),
            tenant_id: config.tenant_id.as_deref(),
        },
    };

    let request = RestRequest::post("/tokens")
        .header("Accept", "application/json")?
        .json(&body)?;

    match identity.execute_json::<AccessResponse>(request).await {
        Ok(response) => Ok(response.access),
        Err(Error::Authorization(failure)) => Err(Error::AuthenticationFailed(format!(
            "identity service rejected credentials: {failure}"
        ))),
        Err(e) => Err(e),
    }
}

/// Authorizes requests with a token obtained elsewhere
#[derive(Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticToken").finish_non_exhaustive()
    }
}

#[async_trait]
impl Authenticator for StaticToken {
    async fn authorize(&self, request: &mut reqwest::Request) -> Result<()> {
        let value = HeaderValue::from_str(&self.token)
            .map_err(|e| Error::InvalidConfig(format!("unusable token: {e}")))?;
        request.headers_mut().insert(AUTH_TOKEN_HEADER, value);
        Ok(())
    }
}
