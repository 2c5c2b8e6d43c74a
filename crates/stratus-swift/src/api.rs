//! Swift entry point

use std::sync::Arc;

use stratus_core::RestClient;
use stratus_keystone::KeystoneSession;

use crate::account::AccountApi;
use crate::bulk::BulkApi;
use crate::container::ContainerApi;
use crate::error::Result;
use crate::large_object::{DynamicLargeObjectApi, StaticLargeObjectApi};
use crate::object::ObjectApi;
use crate::temp_url::TemporaryUrlSigner;

/// Keystone service type of Swift endpoints
pub const SERVICE_TYPE: &str = "object-store";

/// Swift v1 client bound to one account endpoint (`.../v1/AUTH_<tenant>`)
#[derive(Clone, Debug)]
pub struct SwiftApi {
    client: Arc<RestClient>,
}

impl SwiftApi {
    pub fn new(client: RestClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Resolve the `object-store` endpoint from a Keystone session
    pub fn from_session(session: &Arc<KeystoneSession>, region: Option<&str>) -> Result<Self> {
        Ok(Self::new(session.client_for(SERVICE_TYPE, region)?))
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }

    pub fn account_api(&self) -> AccountApi {
        AccountApi::new(self.client.clone())
    }

    pub fn container_api(&self) -> ContainerApi {
        ContainerApi::new(self.client.clone())
    }

    pub fn object_api(&self, container: &str) -> ObjectApi {
        ObjectApi::new(self.client.clone(), container)
    }

    pub fn bulk_api(&self) -> BulkApi {
        BulkApi::new(self.client.clone())
    }

    pub fn static_large_object_api(&self, container: &str) -> StaticLargeObjectApi {
        StaticLargeObjectApi::new(self.client.clone(), container)
    }

    pub fn dynamic_large_object_api(&self, container: &str) -> DynamicLargeObjectApi {
        DynamicLargeObjectApi::new(self.client.clone(), container)
    }

    /// A signer using the account's temporary URL key, if one is set
    pub async fn temporary_url_signer(&self) -> Result<Option<TemporaryUrlSigner>> {
        let account = self.account_api().get().await?;
        Ok(account.temporary_url_key().map(TemporaryUrlSigner::new))
    }
}
