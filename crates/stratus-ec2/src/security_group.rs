//! Security groups and rule authorization

use std::sync::Arc;

use serde::Deserialize;

use crate::client::Ec2Client;
use crate::error::{Ec2Fallback, Result};
use crate::form::FormParams;
use crate::model::{CreateSecurityGroupOptions, Filters, IpPermission, SecurityGroup};
use crate::xml::item_set;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSecurityGroupResponse {
    group_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeSecurityGroupsResponse {
    #[serde(default, deserialize_with = "item_set")]
    security_group_info: Vec<SecurityGroup>,
}

#[derive(Clone, Debug)]
pub struct SecurityGroupApi {
    client: Arc<Ec2Client>,
}

impl SecurityGroupApi {
    pub(crate) fn new(client: Arc<Ec2Client>) -> Self {
        Self { client }
    }

    /// Returns the new group id
    pub async fn create_security_group(
        &self,
        region: Option<&str>,
        name: &str,
        description: &str,
        options: &CreateSecurityGroupOptions,
    ) -> Result<String> {
        let params = FormParams::new("CreateSecurityGroup")
            .param("GroupName", name)
            .param("GroupDescription", description)
            .opt_param("VpcId", options.vpc_id.as_deref());
        let response: CreateSecurityGroupResponse = self.client.call(region, params).await?;
        Ok(response.group_id)
    }

    pub async fn delete_security_group_by_id(&self, region: Option<&str>, group_id: &str) -> Result<bool> {
        let params = FormParams::new("DeleteSecurityGroup").param("GroupId", group_id);
        self.client.call_return(region, params).await.or_false_on_not_found()
    }

    pub async fn describe_security_groups_by_id(
        &self,
        region: Option<&str>,
        group_ids: &[&str],
    ) -> Result<Vec<SecurityGroup>> {
        self.describe(region, FormParams::new("DescribeSecurityGroups").list("GroupId", group_ids))
            .await
    }

    pub async fn describe_security_groups(&self, region: Option<&str>, filters: &Filters) -> Result<Vec<SecurityGroup>> {
        self.describe(region, FormParams::new("DescribeSecurityGroups").filters(filters))
            .await
    }

    pub async fn authorize_ingress(
        &self,
        region: Option<&str>,
        group_id: &str,
        permissions: &[IpPermission],
    ) -> Result<bool> {
        self.rules(region, "AuthorizeSecurityGroupIngress", group_id, permissions)
            .await
    }

    pub async fn revoke_ingress(&self, region: Option<&str>, group_id: &str, permissions: &[IpPermission]) -> Result<bool> {
        self.rules(region, "RevokeSecurityGroupIngress", group_id, permissions)
            .await
    }

    /// VPC groups only
    pub async fn authorize_egress(
        &self,
        region: Option<&str>,
        group_id: &str,
        permissions: &[IpPermission],
    ) -> Result<bool> {
        self.rules(region, "AuthorizeSecurityGroupEgress", group_id, permissions)
            .await
    }

    pub async fn revoke_egress(&self, region: Option<&str>, group_id: &str, permissions: &[IpPermission]) -> Result<bool> {
        self.rules(region, "RevokeSecurityGroupEgress", group_id, permissions)
            .await
    }

    async fn rules(
        &self,
        region: Option<&str>,
        action: &str,
        group_id: &str,
        permissions: &[IpPermission],
    ) -> Result<bool> {
        let params = FormParams::new(action)
            .param("GroupId", group_id)
            .ip_permissions(permissions);
        self.client.call_return(region, params).await
    }

    async fn describe(&self, region: Option<&str>, params: FormParams) -> Result<Vec<SecurityGroup>> {
        self.client
            .call::<DescribeSecurityGroupsResponse>(region, params)
            .await
            .map(|response| response.security_group_info)
            .or_empty_on_not_found()
    }
}
