//! Route tables, their subnet associations and routes

use std::sync::Arc;

use serde::Deserialize;

use crate::client::Ec2Client;
use crate::error::{Ec2Fallback, Result};
use crate::form::FormParams;
use crate::model::{Filters, RouteOptions, RouteTable};
use crate::xml::item_set;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRouteTableResponse {
    route_table: RouteTable,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeRouteTablesResponse {
    #[serde(default, deserialize_with = "item_set")]
    route_table_set: Vec<RouteTable>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssociateRouteTableResponse {
    association_id: String,
}

#[derive(Clone, Debug)]
pub struct RouteTableApi {
    client: Arc<Ec2Client>,
}

impl RouteTableApi {
    pub(crate) fn new(client: Arc<Ec2Client>) -> Self {
        Self { client }
    }

    pub async fn create_route_table(&self, region: Option<&str>, vpc_id: &str) -> Result<RouteTable> {
        let params = FormParams::new("CreateRouteTable").param("VpcId", vpc_id);
        let response: CreateRouteTableResponse = self.client.call(region, params).await?;
        Ok(response.route_table)
    }

    pub async fn delete_route_table(&self, region: Option<&str>, route_table_id: &str) -> Result<bool> {
        let params = FormParams::new("DeleteRouteTable").param("RouteTableId", route_table_id);
        self.client.call_return(region, params).await.or_false_on_not_found()
    }

    pub async fn describe_route_tables(&self, region: Option<&str>, route_table_ids: &[&str]) -> Result<Vec<RouteTable>> {
        self.describe(
            region,
            FormParams::new("DescribeRouteTables").list("RouteTableId", route_table_ids),
        )
        .await
    }

    pub async fn filter(&self, region: Option<&str>, filters: &Filters) -> Result<Vec<RouteTable>> {
        self.describe(region, FormParams::new("DescribeRouteTables").filters(filters))
            .await
    }

    /// Returns the association id needed to undo the association
    pub async fn associate_route_table(
        &self,
        region: Option<&str>,
        route_table_id: &str,
        subnet_id: &str,
    ) -> Result<String> {
        let params = FormParams::new("AssociateRouteTable")
            .param("RouteTableId", route_table_id)
            .param("SubnetId", subnet_id);
        let response: AssociateRouteTableResponse = self.client.call(region, params).await?;
        Ok(response.association_id)
    }

    pub async fn disassociate_route_table(&self, region: Option<&str>, association_id: &str) -> Result<bool> {
        let params = FormParams::new("DisassociateRouteTable").param("AssociationId", association_id);
        self.client.call_return(region, params).await.or_false_on_not_found()
    }

    pub async fn create_route(&self, region: Option<&str>, route_table_id: &str, route: &RouteOptions) -> Result<bool> {
        let params = route_params(FormParams::new("CreateRoute"), route_table_id, route);
        self.client.call_return(region, params).await
    }

    pub async fn replace_route(&self, region: Option<&str>, route_table_id: &str, route: &RouteOptions) -> Result<bool> {
        let params = route_params(FormParams::new("ReplaceRoute"), route_table_id, route);
        self.client.call_return(region, params).await
    }

    pub async fn delete_route(
        &self,
        region: Option<&str>,
        route_table_id: &str,
        destination_cidr_block: &str,
    ) -> Result<bool> {
        let params = FormParams::new("DeleteRoute")
            .param("RouteTableId", route_table_id)
            .param("DestinationCidrBlock", destination_cidr_block);
        self.client.call_return(region, params).await.or_false_on_not_found()
    }

    async fn describe(&self, region: Option<&str>, params: FormParams) -> Result<Vec<RouteTable>> {
        self.client
            .call::<DescribeRouteTablesResponse>(region, params)
            .await
            .map(|response| response.route_table_set)
            .or_empty_on_not_found()
    }
}

fn route_params(params: FormParams, route_table_id: &str, route: &RouteOptions) -> FormParams {
    params
        .param("RouteTableId", route_table_id)
        .opt_param("DestinationCidrBlock", route.destination_cidr_block.as_deref())
        .opt_param("GatewayId", route.gateway_id.as_deref())
        .opt_param("InstanceId", route.instance_id.as_deref())
        .opt_param("NetworkInterfaceId", route.network_interface_id.as_deref())
        .opt_param("VpcPeeringConnectionId", route.vpc_peering_connection_id.as_deref())
}
