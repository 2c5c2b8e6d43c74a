//! Security groups and their rules (`security-group` extension)

use std::sync::Arc;

use futures::Stream;
use stratus_core::{Page, PaginationOptions, RestClient, Result};

use crate::common::Collection;
use crate::constants::path;
use crate::model::{CreateRule, CreateSecurityGroup, Rule, SecurityGroup};

const GROUPS: Collection = Collection::new(path::SECURITY_GROUPS, "security_group", "security_groups");
const RULES: Collection = Collection::new(
    path::SECURITY_GROUP_RULES,
    "security_group_rule",
    "security_group_rules",
);

#[derive(Clone, Debug)]
pub struct SecurityGroupApi {
    client: Arc<RestClient>,
}

impl SecurityGroupApi {
    pub(crate) fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    pub async fn create_security_group(&self, options: &CreateSecurityGroup) -> Result<SecurityGroup> {
        GROUPS.create(&self.client, options).await
    }

    pub async fn get_security_group(&self, id: &str) -> Result<Option<SecurityGroup>> {
        GROUPS.get(&self.client, id).await
    }

    pub async fn delete_security_group(&self, id: &str) -> Result<bool> {
        GROUPS.delete(&self.client, id).await
    }

    pub async fn list_security_groups(
        &self,
        options: &PaginationOptions,
    ) -> Result<Page<SecurityGroup>> {
        GROUPS.list(&self.client, options).await
    }

    pub fn list_all_security_groups(
        &self,
    ) -> impl Stream<Item = Result<SecurityGroup>> + Send + use<> {
        GROUPS.list_all(self.client.clone(), PaginationOptions::new())
    }

    pub async fn create_rule(&self, options: &CreateRule) -> Result<Rule> {
        RULES.create(&self.client, options).await
    }

    pub async fn get_rule(&self, id: &str) -> Result<Option<Rule>> {
        RULES.get(&self.client, id).await
    }

    pub async fn delete_rule(&self, id: &str) -> Result<bool> {
        RULES.delete(&self.client, id).await
    }

    pub async fn list_rules(&self, options: &PaginationOptions) -> Result<Page<Rule>> {
        RULES.list(&self.client, options).await
    }

    pub fn list_all_rules(&self) -> impl Stream<Item = Result<Rule>> + Send + use<> {
        RULES.list_all(self.client.clone(), PaginationOptions::new())
    }
}
