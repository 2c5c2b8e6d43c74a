//! Firewall-as-a-Service models

use serde::{Deserialize, Serialize};

use super::{Status, option_setters};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Firewall {
    pub id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub admin_state_up: Option<bool>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub shared: Option<bool>,
    #[serde(default)]
    pub firewall_policy_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FirewallPolicy {
    pub id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub shared: Option<bool>,
    /// Rule ids in evaluation order
    #[serde(default)]
    pub firewall_rules: Vec<String>,
    #[serde(default)]
    pub audited: Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirewallProtocol {
    Tcp,
    Udp,
    Icmp,
    #[serde(other)]
    Unrecognized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirewallAction {
    Allow,
    Deny,
    #[serde(other)]
    Unrecognized,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FirewallRule {
    pub id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub firewall_policy_id: Option<String>,
    #[serde(default)]
    pub shared: Option<bool>,
    #[serde(default)]
    pub protocol: Option<FirewallProtocol>,
    #[serde(default)]
    pub ip_version: Option<u8>,
    #[serde(default)]
    pub source_ip_address: Option<String>,
    #[serde(default)]
    pub destination_ip_address: Option<String>,
    /// A single port or a `low:high` range
    #[serde(default)]
    pub source_port: Option<String>,
    #[serde(default)]
    pub destination_port: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub action: Option<FirewallAction>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CreateFirewall {
    pub firewall_policy_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,
}

impl CreateFirewall {
    pub fn new(firewall_policy_id: &str) -> Self {
        Self {
            firewall_policy_id: firewall_policy_id.to_string(),
            ..Default::default()
        }
    }
}

option_setters!(CreateFirewall {
    tenant_id: String,
    name: String,
    description: String,
    admin_state_up: bool,
    shared: bool,
});

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdateFirewall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_policy_id: Option<String>,
}

option_setters!(UpdateFirewall {
    name: String,
    description: String,
    admin_state_up: bool,
    shared: bool,
    firewall_policy_id: String,
});

/// Body for creating or updating a policy
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FirewallPolicyOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_rules: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audited: Option<bool>,
}

option_setters!(FirewallPolicyOptions {
    tenant_id: String,
    name: String,
    description: String,
    shared: bool,
    firewall_rules: Vec<String>,
    audited: bool,
});

/// Body for creating or updating a rule
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FirewallRuleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<FirewallProtocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<FirewallAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

option_setters!(FirewallRuleOptions {
    tenant_id: String,
    name: String,
    description: String,
    shared: bool,
    protocol: FirewallProtocol,
    ip_version: u8,
    source_ip_address: String,
    destination_ip_address: String,
    source_port: String,
    destination_port: String,
    action: FirewallAction,
    enabled: bool,
});

/// Where to place a rule inside a policy.
///
/// Both unset appends the rule at the end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InsertPosition {
    pub insert_before: Option<String>,
    pub insert_after: Option<String>,
}

impl InsertPosition {
    pub fn before(rule_id: &str) -> Self {
        Self {
            insert_before: Some(rule_id.to_string()),
            insert_after: None,
        }
    }

    pub fn after(rule_id: &str) -> Self {
        Self {
            insert_before: None,
            insert_after: Some(rule_id.to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct InsertRuleBody<'a> {
    pub firewall_rule_id: &'a str,
    pub insert_before: &'a str,
    pub insert_after: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct RemoveRuleBody<'a> {
    pub firewall_rule_id: &'a str,
}
