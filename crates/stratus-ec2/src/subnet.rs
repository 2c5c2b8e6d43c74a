//! Subnets

use std::sync::Arc;

use serde::Deserialize;

use crate::client::Ec2Client;
use crate::error::{Ec2Fallback, Result};
use crate::form::FormParams;
use crate::model::{CreateSubnetOptions, Filters, Subnet};
use crate::xml::item_set;

#[derive(Deserialize)]
struct CreateSubnetResponse {
    subnet: Subnet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeSubnetsResponse {
    #[serde(default, deserialize_with = "item_set")]
    subnet_set: Vec<Subnet>,
}

#[derive(Clone, Debug)]
pub struct SubnetApi {
    client: Arc<Ec2Client>,
}

impl SubnetApi {
    pub(crate) fn new(client: Arc<Ec2Client>) -> Self {
        Self { client }
    }

    pub async fn create_subnet(
        &self,
        region: Option<&str>,
        vpc_id: &str,
        cidr_block: &str,
        options: &CreateSubnetOptions,
    ) -> Result<Subnet> {
        let params = FormParams::new("CreateSubnet")
            .param("VpcId", vpc_id)
            .param("CidrBlock", cidr_block)
            .opt_param("AvailabilityZone", options.availability_zone.as_deref());
        let response: CreateSubnetResponse = self.client.call(region, params).await?;
        Ok(response.subnet)
    }

    pub async fn delete_subnet(&self, region: Option<&str>, subnet_id: &str) -> Result<bool> {
        let params = FormParams::new("DeleteSubnet").param("SubnetId", subnet_id);
        self.client.call_return(region, params).await.or_false_on_not_found()
    }

    pub async fn describe_subnets(&self, region: Option<&str>, subnet_ids: &[&str]) -> Result<Vec<Subnet>> {
        self.describe(region, FormParams::new("DescribeSubnets").list("SubnetId", subnet_ids))
            .await
    }

    /// Subnets matching `filters`, e.g. `vpc-id` or `availability-zone`
    pub async fn filter(&self, region: Option<&str>, filters: &Filters) -> Result<Vec<Subnet>> {
        self.describe(region, FormParams::new("DescribeSubnets").filters(filters))
            .await
    }

    async fn describe(&self, region: Option<&str>, params: FormParams) -> Result<Vec<Subnet>> {
        self.client
            .call::<DescribeSubnetsResponse>(region, params)
            .await
            .map(|response| response.subnet_set)
            .or_empty_on_not_found()
    }
}
