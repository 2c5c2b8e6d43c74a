//! Neutron entry point and extension discovery

use std::sync::Arc;

use serde_json::Value;
use stratus_core::{Fallback, RestClient, RestRequest, Result, encode_component};
use stratus_keystone::KeystoneSession;
use tracing::debug;

use crate::common::unwrap;
use crate::constants::{SERVICE_TYPE, extension_alias, path};
use crate::floating_ip::FloatingIpApi;
use crate::fwaas::FwaasApi;
use crate::lbaas::LbaasApi;
use crate::model::Extension;
use crate::router::RouterApi;
use crate::security_group::SecurityGroupApi;

/// Neutron v2.0 client.
///
/// Extension APIs are only handed out when the server advertises them; the
/// `*_unchecked` accessors skip the lookup.
#[derive(Clone, Debug)]
pub struct NeutronApi {
    client: Arc<RestClient>,
}

impl NeutronApi {
    pub fn new(client: RestClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Resolve the `network` endpoint from a Keystone session
    pub fn from_session(session: &Arc<KeystoneSession>, region: Option<&str>) -> Result<Self> {
        Ok(Self::new(session.client_for(SERVICE_TYPE, region)?))
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }

    // ========================================================================
    // Extensions
    // ========================================================================

    pub async fn list_extensions(&self) -> Result<Vec<Extension>> {
        let value: Option<Value> = self
            .client
            .execute_json(RestRequest::get(path::EXTENSIONS))
            .await
            .or_none_on_not_found()?;
        match value {
            Some(value) => unwrap("extensions", value),
            None => Ok(Vec::new()),
        }
    }

    pub async fn get_extension(&self, alias: &str) -> Result<Option<Extension>> {
        let request = RestRequest::get(format!("{}/{}", path::EXTENSIONS, encode_component(alias)));
        let value: Option<Value> = self
            .client
            .execute_json(request)
            .await
            .or_none_on_not_found()?;
        value.map(|v| unwrap("extension", v)).transpose()
    }

    pub async fn has_extension(&self, alias: &str) -> Result<bool> {
        let present = self
            .list_extensions()
            .await?
            .iter()
            .any(|extension| extension.alias == alias);
        debug!("Extension {} advertised: {}", alias, present);
        Ok(present)
    }

    // ========================================================================
    // Extension APIs
    // ========================================================================

    pub async fn fwaas(&self) -> Result<Option<FwaasApi>> {
        Ok(self
            .has_extension(extension_alias::FWAAS)
            .await?
            .then(|| self.fwaas_unchecked()))
    }

    pub fn fwaas_unchecked(&self) -> FwaasApi {
        FwaasApi::new(self.client.clone())
    }

    pub async fn lbaas(&self) -> Result<Option<LbaasApi>> {
        Ok(self
            .has_extension(extension_alias::LBAAS)
            .await?
            .then(|| self.lbaas_unchecked()))
    }

    pub fn lbaas_unchecked(&self) -> LbaasApi {
        LbaasApi::new(self.client.clone())
    }

    pub async fn routers(&self) -> Result<Option<RouterApi>> {
        Ok(self
            .has_extension(extension_alias::ROUTER)
            .await?
            .then(|| self.routers_unchecked()))
    }

    pub fn routers_unchecked(&self) -> RouterApi {
        RouterApi::new(self.client.clone())
    }

    /// Floating IPs ship with the `router` extension
    pub async fn floating_ips(&self) -> Result<Option<FloatingIpApi>> {
        Ok(self
            .has_extension(extension_alias::ROUTER)
            .await?
            .then(|| self.floating_ips_unchecked()))
    }

    pub fn floating_ips_unchecked(&self) -> FloatingIpApi {
        FloatingIpApi::new(self.client.clone())
    }

    pub async fn security_groups(&self) -> Result<Option<SecurityGroupApi>> {
        Ok(self
            .has_extension(extension_alias::SECURITY_GROUP)
            .await?
            .then(|| self.security_groups_unchecked()))
    }

    pub fn security_groups_unchecked(&self) -> SecurityGroupApi {
        SecurityGroupApi::new(self.client.clone())
    }
}
