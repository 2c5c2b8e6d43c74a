//! Internet gateways

use std::sync::Arc;

use serde::Deserialize;

use crate::client::Ec2Client;
use crate::error::{Ec2Fallback, Result};
use crate::form::FormParams;
use crate::model::InternetGateway;
use crate::xml::item_set;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateInternetGatewayResponse {
    internet_gateway: InternetGateway,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeInternetGatewaysResponse {
    #[serde(default, deserialize_with = "item_set")]
    internet_gateway_set: Vec<InternetGateway>,
}

#[derive(Clone, Debug)]
pub struct InternetGatewayApi {
    client: Arc<Ec2Client>,
}

impl InternetGatewayApi {
    pub(crate) fn new(client: Arc<Ec2Client>) -> Self {
        Self { client }
    }

    pub async fn create_internet_gateway(&self, region: Option<&str>) -> Result<InternetGateway> {
        let response: CreateInternetGatewayResponse = self
            .client
            .call(region, FormParams::new("CreateInternetGateway"))
            .await?;
        Ok(response.internet_gateway)
    }

    pub async fn attach_internet_gateway(&self, region: Option<&str>, gateway_id: &str, vpc_id: &str) -> Result<bool> {
        let params = FormParams::new("AttachInternetGateway")
            .param("InternetGatewayId", gateway_id)
            .param("VpcId", vpc_id);
        self.client.call_return(region, params).await
    }

    pub async fn detach_internet_gateway(&self, region: Option<&str>, gateway_id: &str, vpc_id: &str) -> Result<bool> {
        let params = FormParams::new("DetachInternetGateway")
            .param("InternetGatewayId", gateway_id)
            .param("VpcId", vpc_id);
        self.client.call_return(region, params).await.or_false_on_not_found()
    }

    pub async fn delete_internet_gateway(&self, region: Option<&str>, gateway_id: &str) -> Result<bool> {
        let params = FormParams::new("DeleteInternetGateway").param("InternetGatewayId", gateway_id);
        self.client.call_return(region, params).await.or_false_on_not_found()
    }

    pub async fn describe_internet_gateways(
        &self,
        region: Option<&str>,
        gateway_ids: &[&str],
    ) -> Result<Vec<InternetGateway>> {
        let params = FormParams::new("DescribeInternetGateways").list("InternetGatewayId", gateway_ids);
        self.client
            .call::<DescribeInternetGatewaysResponse>(region, params)
            .await
            .map(|response| response.internet_gateway_set)
            .or_empty_on_not_found()
    }
}
