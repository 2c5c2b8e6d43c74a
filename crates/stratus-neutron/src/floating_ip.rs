//! Floating IPs (part of the `router` extension)

use std::sync::Arc;

use futures::Stream;
use stratus_core::{Page, PaginationOptions, RestClient, Result};

use crate::common::Collection;
use crate::constants::path;
use crate::model::{CreateFloatingIp, FloatingIp, UpdateFloatingIp};

const FLOATING_IPS: Collection = Collection::new(path::FLOATING_IPS, "floatingip", "floatingips");

#[derive(Clone, Debug)]
pub struct FloatingIpApi {
    client: Arc<RestClient>,
}

impl FloatingIpApi {
    pub(crate) fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    pub async fn create(&self, options: &CreateFloatingIp) -> Result<FloatingIp> {
        FLOATING_IPS.create(&self.client, options).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<FloatingIp>> {
        FLOATING_IPS.get(&self.client, id).await
    }

    /// Associate with or disassociate from a port
    pub async fn update(&self, id: &str, options: &UpdateFloatingIp) -> Result<Option<FloatingIp>> {
        FLOATING_IPS.update(&self.client, id, options).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        FLOATING_IPS.delete(&self.client, id).await
    }

    pub async fn list(&self, options: &PaginationOptions) -> Result<Page<FloatingIp>> {
        FLOATING_IPS.list(&self.client, options).await
    }

    pub fn list_all(&self) -> impl Stream<Item = Result<FloatingIp>> + Send + use<> {
        FLOATING_IPS.list_all(self.client.clone(), PaginationOptions::new())
    }
}
