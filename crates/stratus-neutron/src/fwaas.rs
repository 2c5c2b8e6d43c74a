//! Firewall-as-a-Service: firewalls, policies and rules

use std::sync::Arc;

use futures::Stream;
use serde_json::Value;
use stratus_core::{Fallback, Page, PaginationOptions, RestClient, RestRequest, Result};

use crate::common::{Collection, unwrap_lenient};
use crate::constants::path;
use crate::model::{
    CreateFirewall, Firewall, FirewallPolicy, FirewallPolicyOptions, FirewallRule,
    FirewallRuleOptions, InsertPosition, InsertRuleBody, RemoveRuleBody, UpdateFirewall,
};

const FIREWALLS: Collection = Collection::new(path::FIREWALLS, "firewall", "firewalls");
const POLICIES: Collection = Collection::new(
    path::FIREWALL_POLICIES,
    "firewall_policy",
    "firewall_policies",
);
const RULES: Collection = Collection::new(path::FIREWALL_RULES, "firewall_rule", "firewall_rules");

/// FWaaS extension (`fwaas`)
#[derive(Clone, Debug)]
pub struct FwaasApi {
    client: Arc<RestClient>,
}

impl FwaasApi {
    pub(crate) fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    // ========================================================================
    // Firewalls
    // ========================================================================

    pub async fn create_firewall(&self, options: &CreateFirewall) -> Result<Firewall> {
        FIREWALLS.create(&self.client, options).await
    }

    pub async fn get_firewall(&self, id: &str) -> Result<Option<Firewall>> {
        FIREWALLS.get(&self.client, id).await
    }

    pub async fn update_firewall(
        &self,
        id: &str,
        options: &UpdateFirewall,
    ) -> Result<Option<Firewall>> {
        FIREWALLS.update(&self.client, id, options).await
    }

    pub async fn delete_firewall(&self, id: &str) -> Result<bool> {
        FIREWALLS.delete(&self.client, id).await
    }

    pub async fn list_firewalls(&self, options: &PaginationOptions) -> Result<Page<Firewall>> {
        FIREWALLS.list(&self.client, options).await
    }

    pub fn list_all_firewalls(&self) -> impl Stream<Item = Result<Firewall>> + Send + use<> {
        FIREWALLS.list_all(self.client.clone(), PaginationOptions::new())
    }

    // ========================================================================
    // Policies
    // ========================================================================

    pub async fn create_firewall_policy(
        &self,
        options: &FirewallPolicyOptions,
    ) -> Result<FirewallPolicy> {
        POLICIES.create(&self.client, options).await
    }

    pub async fn get_firewall_policy(&self, id: &str) -> Result<Option<FirewallPolicy>> {
        POLICIES.get(&self.client, id).await
    }

    pub async fn update_firewall_policy(
        &self,
        id: &str,
        options: &FirewallPolicyOptions,
    ) -> Result<Option<FirewallPolicy>> {
        POLICIES.update(&self.client, id, options).await
    }

    pub async fn delete_firewall_policy(&self, id: &str) -> Result<bool> {
        POLICIES.delete(&self.client, id).await
    }

    pub async fn list_firewall_policies(
        &self,
        options: &PaginationOptions,
    ) -> Result<Page<FirewallPolicy>> {
        POLICIES.list(&self.client, options).await
    }

    pub fn list_all_firewall_policies(
        &self,
    ) -> impl Stream<Item = Result<FirewallPolicy>> + Send + use<> {
        POLICIES.list_all(self.client.clone(), PaginationOptions::new())
    }

    /// Insert a rule into a policy relative to another rule of that policy
    pub async fn insert_rule(
        &self,
        policy_id: &str,
        rule_id: &str,
        position: &InsertPosition,
    ) -> Result<Option<FirewallPolicy>> {
        let body = InsertRuleBody {
            firewall_rule_id: rule_id,
            insert_before: position.insert_before.as_deref().unwrap_or_default(),
            insert_after: position.insert_after.as_deref().unwrap_or_default(),
        };
        self.policy_action(policy_id, "insert_rule", &body).await
    }

    pub async fn remove_rule(
        &self,
        policy_id: &str,
        rule_id: &str,
    ) -> Result<Option<FirewallPolicy>> {
        let body = RemoveRuleBody {
            firewall_rule_id: rule_id,
        };
        self.policy_action(policy_id, "remove_rule", &body).await
    }

    async fn policy_action<B: serde::Serialize>(
        &self,
        policy_id: &str,
        action: &str,
        body: &B,
    ) -> Result<Option<FirewallPolicy>> {
        let request =
            RestRequest::put(format!("{}/{}", POLICIES.item_path(policy_id), action)).json(body)?;
        let value: Option<Value> = self
            .client
            .execute_json(request)
            .await
            .or_none_on_not_found()?;
        value
            .map(|v| unwrap_lenient(POLICIES.singular, v))
            .transpose()
    }

    // ========================================================================
    // Rules
    // ========================================================================

    pub async fn create_firewall_rule(&self, options: &FirewallRuleOptions) -> Result<FirewallRule> {
        RULES.create(&self.client, options).await
    }

    pub async fn get_firewall_rule(&self, id: &str) -> Result<Option<FirewallRule>> {
        RULES.get(&self.client, id).await
    }

    pub async fn update_firewall_rule(
        &self,
        id: &str,
        options: &FirewallRuleOptions,
    ) -> Result<Option<FirewallRule>> {
        RULES.update(&self.client, id, options).await
    }

    pub async fn delete_firewall_rule(&self, id: &str) -> Result<bool> {
        RULES.delete(&self.client, id).await
    }

    pub async fn list_firewall_rules(
        &self,
        options: &PaginationOptions,
    ) -> Result<Page<FirewallRule>> {
        RULES.list(&self.client, options).await
    }

    pub fn list_all_firewall_rules(
        &self,
    ) -> impl Stream<Item = Result<FirewallRule>> + Send + use<> {
        RULES.list_all(self.client.clone(), PaginationOptions::new())
    }
}
