//! Routers and router interfaces (`router` extension)

use std::sync::Arc;

use futures::Stream;
use serde_json::Value;
use stratus_core::{
    BoolFallback, Fallback, Page, PaginationOptions, RestClient, RestRequest, Result,
};

use crate::common::{Collection, unwrap_lenient};
use crate::constants::path;
use crate::model::{CreateRouter, InterfaceBody, Router, RouterInterface, UpdateRouter};

const ROUTERS: Collection = Collection::new(path::ROUTERS, "router", "routers");

#[derive(Clone, Debug)]
pub struct RouterApi {
    client: Arc<RestClient>,
}

impl RouterApi {
    pub(crate) fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    pub async fn create(&self, options: &CreateRouter) -> Result<Router> {
        ROUTERS.create(&self.client, options).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Router>> {
        ROUTERS.get(&self.client, id).await
    }

    pub async fn update(&self, id: &str, options: &UpdateRouter) -> Result<Option<Router>> {
        ROUTERS.update(&self.client, id, options).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        ROUTERS.delete(&self.client, id).await
    }

    pub async fn list(&self, options: &PaginationOptions) -> Result<Page<Router>> {
        ROUTERS.list(&self.client, options).await
    }

    pub fn list_all(&self) -> impl Stream<Item = Result<Router>> + Send + use<> {
        ROUTERS.list_all(self.client.clone(), PaginationOptions::new())
    }

    pub async fn add_interface_for_subnet(
        &self,
        router_id: &str,
        subnet_id: &str,
    ) -> Result<Option<RouterInterface>> {
        let body = InterfaceBody {
            subnet_id: Some(subnet_id),
            port_id: None,
        };
        self.add_interface(router_id, &body).await
    }

    pub async fn add_interface_for_port(
        &self,
        router_id: &str,
        port_id: &str,
    ) -> Result<Option<RouterInterface>> {
        let body = InterfaceBody {
            subnet_id: None,
            port_id: Some(port_id),
        };
        self.add_interface(router_id, &body).await
    }

    pub async fn remove_interface_for_subnet(&self, router_id: &str, subnet_id: &str) -> Result<bool> {
        let body = InterfaceBody {
            subnet_id: Some(subnet_id),
            port_id: None,
        };
        self.remove_interface(router_id, &body).await
    }

    pub async fn remove_interface_for_port(&self, router_id: &str, port_id: &str) -> Result<bool> {
        let body = InterfaceBody {
            subnet_id: None,
            port_id: Some(port_id),
        };
        self.remove_interface(router_id, &body).await
    }

    async fn add_interface(
        &self,
        router_id: &str,
        body: &InterfaceBody<'_>,
    ) -> Result<Option<RouterInterface>> {
        let request = RestRequest::put(format!(
            "{}/add_router_interface",
            ROUTERS.item_path(router_id)
        ))
        .json(body)?;
        let value: Option<Value> = self
            .client
            .execute_json(request)
            .await
            .or_none_on_not_found()?;
        value
            .map(|v| unwrap_lenient("router_interface", v))
            .transpose()
    }

    async fn remove_interface(&self, router_id: &str, body: &InterfaceBody<'_>) -> Result<bool> {
        let request = RestRequest::put(format!(
            "{}/remove_router_interface",
            ROUTERS.item_path(router_id)
        ))
        .json(body)?;
        self.client.execute(request).await.or_false_on_not_found()
    }
}
