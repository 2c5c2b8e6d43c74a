//! VPCs

use std::sync::Arc;

use serde::Deserialize;

use crate::client::Ec2Client;
use crate::error::{Ec2Fallback, Result};
use crate::form::FormParams;
use crate::model::{CreateVpcOptions, Vpc};
use crate::xml::item_set;

#[derive(Deserialize)]
struct CreateVpcResponse {
    vpc: Vpc,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeVpcsResponse {
    #[serde(default, deserialize_with = "item_set")]
    vpc_set: Vec<Vpc>,
}

#[derive(Clone, Debug)]
pub struct VpcApi {
    client: Arc<Ec2Client>,
}

impl VpcApi {
    pub(crate) fn new(client: Arc<Ec2Client>) -> Self {
        Self { client }
    }

    pub async fn create_vpc(&self, region: Option<&str>, cidr_block: &str, options: &CreateVpcOptions) -> Result<Vpc> {
        let params = FormParams::new("CreateVpc")
            .param("CidrBlock", cidr_block)
            .opt_param("InstanceTenancy", options.instance_tenancy.as_ref());
        let response: CreateVpcResponse = self.client.call(region, params).await?;
        Ok(response.vpc)
    }

    pub async fn delete_vpc(&self, region: Option<&str>, vpc_id: &str) -> Result<bool> {
        let params = FormParams::new("DeleteVpc").param("VpcId", vpc_id);
        self.client.call_return(region, params).await.or_false_on_not_found()
    }

    /// All VPCs when `vpc_ids` is empty
    pub async fn describe_vpcs(&self, region: Option<&str>, vpc_ids: &[&str]) -> Result<Vec<Vpc>> {
        let params = FormParams::new("DescribeVpcs").list("VpcId", vpc_ids);
        self.client
            .call::<DescribeVpcsResponse>(region, params)
            .await
            .map(|response| response.vpc_set)
            .or_empty_on_not_found()
    }
}
