//! Load-Balancing-as-a-Service v1: pools, members, VIPs and health monitors

use std::sync::Arc;

use futures::Stream;
use serde_json::Value;
use stratus_core::{
    BoolFallback, Fallback, Page, PaginationOptions, RestClient, RestRequest, Result,
    encode_component,
};

use crate::common::{Collection, unwrap_lenient, wrap};
use crate::constants::path;
use crate::model::{
    CreateHealthMonitor, CreateMember, CreatePool, CreateVip, HealthMonitor, Member, MonitorRef,
    Pool, UpdateHealthMonitor, UpdateMember, UpdatePool, UpdateVip, Vip,
};

const POOLS: Collection = Collection::new(path::POOLS, "pool", "pools");
const MEMBERS: Collection = Collection::new(path::MEMBERS, "member", "members");
const VIPS: Collection = Collection::new(path::VIPS, "vip", "vips");
const HEALTH_MONITORS: Collection =
    Collection::new(path::HEALTH_MONITORS, "health_monitor", "health_monitors");

/// LBaaS v1 extension (`lbaas`)
#[derive(Clone, Debug)]
pub struct LbaasApi {
    client: Arc<RestClient>,
}

impl LbaasApi {
    pub(crate) fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    // ========================================================================
    // Pools
    // ========================================================================

    pub async fn create_pool(&self, options: &CreatePool) -> Result<Pool> {
        POOLS.create(&self.client, options).await
    }

    pub async fn get_pool(&self, id: &str) -> Result<Option<Pool>> {
        POOLS.get(&self.client, id).await
    }

    pub async fn update_pool(&self, id: &str, options: &UpdatePool) -> Result<Option<Pool>> {
        POOLS.update(&self.client, id, options).await
    }

    pub async fn delete_pool(&self, id: &str) -> Result<bool> {
        POOLS.delete(&self.client, id).await
    }

    pub async fn list_pools(&self, options: &PaginationOptions) -> Result<Page<Pool>> {
        POOLS.list(&self.client, options).await
    }

    pub fn list_all_pools(&self) -> impl Stream<Item = Result<Pool>> + Send + use<> {
        POOLS.list_all(self.client.clone(), PaginationOptions::new())
    }

    /// Attach an existing health monitor to a pool
    pub async fn associate_health_monitor(
        &self,
        pool_id: &str,
        health_monitor_id: &str,
    ) -> Result<Option<HealthMonitor>> {
        let body = wrap(
            HEALTH_MONITORS.singular,
            &MonitorRef {
                id: health_monitor_id,
            },
        )?;
        let request =
            RestRequest::post(format!("{}/health_monitors", POOLS.item_path(pool_id))).json(&body)?;
        let value: Option<Value> = self
            .client
            .execute_json(request)
            .await
            .or_none_on_not_found()?;
        value
            .map(|v| unwrap_lenient(HEALTH_MONITORS.singular, v))
            .transpose()
    }

    pub async fn disassociate_health_monitor(
        &self,
        pool_id: &str,
        health_monitor_id: &str,
    ) -> Result<bool> {
        let path = format!(
            "{}/health_monitors/{}",
            POOLS.item_path(pool_id),
            encode_component(health_monitor_id)
        );
        self.client
            .execute(RestRequest::delete(path))
            .await
            .or_false_on_not_found()
    }

    // ========================================================================
    // Members
    // ========================================================================

    pub async fn create_member(&self, options: &CreateMember) -> Result<Member> {
        MEMBERS.create(&self.client, options).await
    }

    pub async fn get_member(&self, id: &str) -> Result<Option<Member>> {
        MEMBERS.get(&self.client, id).await
    }

    pub async fn update_member(&self, id: &str, options: &UpdateMember) -> Result<Option<Member>> {
        MEMBERS.update(&self.client, id, options).await
    }

    pub async fn delete_member(&self, id: &str) -> Result<bool> {
        MEMBERS.delete(&self.client, id).await
    }

    pub async fn list_members(&self, options: &PaginationOptions) -> Result<Page<Member>> {
        MEMBERS.list(&self.client, options).await
    }

    pub fn list_all_members(&self) -> impl Stream<Item = Result<Member>> + Send + use<> {
        MEMBERS.list_all(self.client.clone(), PaginationOptions::new())
    }

    // ========================================================================
    // VIPs
    // ========================================================================

    pub async fn create_vip(&self, options: &CreateVip) -> Result<Vip> {
        VIPS.create(&self.client, options).await
    }

    pub async fn get_vip(&self, id: &str) -> Result<Option<Vip>> {
        VIPS.get(&self.client, id).await
    }

    pub async fn update_vip(&self, id: &str, options: &UpdateVip) -> Result<Option<Vip>> {
        VIPS.update(&self.client, id, options).await
    }

    pub async fn delete_vip(&self, id: &str) -> Result<bool> {
        VIPS.delete(&self.client, id).await
    }

    pub async fn list_vips(&self, options: &PaginationOptions) -> Result<Page<Vip>> {
        VIPS.list(&self.client, options).await
    }

    pub fn list_all_vips(&self) -> impl Stream<Item = Result<Vip>> + Send + use<> {
        VIPS.list_all(self.client.clone(), PaginationOptions::new())
    }

    // ========================================================================
    // Health monitors
    // ========================================================================

    pub async fn create_health_monitor(
        &self,
        options: &CreateHealthMonitor,
    ) -> Result<HealthMonitor> {
        HEALTH_MONITORS.create(&self.client, options).await
    }

    pub async fn get_health_monitor(&self, id: &str) -> Result<Option<HealthMonitor>> {
        HEALTH_MONITORS.get(&self.client, id).await
    }

    pub async fn update_health_monitor(
        &self,
        id: &str,
        options: &UpdateHealthMonitor,
    ) -> Result<Option<HealthMonitor>> {
        HEALTH_MONITORS.update(&self.client, id, options).await
    }

    pub async fn delete_health_monitor(&self, id: &str) -> Result<bool> {
        HEALTH_MONITORS.delete(&self.client, id).await
    }

    pub async fn list_health_monitors(
        &self,
        options: &PaginationOptions,
    ) -> Result<Page<HealthMonitor>> {
        HEALTH_MONITORS.list(&self.client, options).await
    }

    pub fn list_all_health_monitors(
        &self,
    ) -> impl Stream<Item = Result<HealthMonitor>> + Send + use<> {
        HEALTH_MONITORS.list_all(self.client.clone(), PaginationOptions::new())
    }
}
