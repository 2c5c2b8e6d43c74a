use serde::{Deserialize, Serialize};

use super::option_setters;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroup {
    pub id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub security_group_rules: Vec<Rule>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ingress,
    Egress,
    #[serde(other)]
    Unrecognized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EtherType {
    IPv4,
    IPv6,
    #[serde(other)]
    Unrecognized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleProtocol {
    Tcp,
    Udp,
    Icmp,
    #[serde(other)]
    Unrecognized,
}

/// A security group rule
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    pub direction: Direction,
    pub security_group_id: String,
    #[serde(default)]
    pub ethertype: Option<EtherType>,
    #[serde(default)]
    pub port_range_min: Option<u16>,
    #[serde(default)]
    pub port_range_max: Option<u16>,
    #[serde(default)]
    pub protocol: Option<RuleProtocol>,
    #[serde(default)]
    pub remote_group_id: Option<String>,
    #[serde(default)]
    pub remote_ip_prefix: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CreateSecurityGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

option_setters!(CreateSecurityGroup {
    name: String,
    description: String,
    tenant_id: String,
});

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateRule {
    pub security_group_id: String,
    pub direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ethertype: Option<EtherType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_range_min: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_range_max: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<RuleProtocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_ip_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

impl CreateRule {
    pub fn new(security_group_id: &str, direction: Direction) -> Self {
        Self {
            security_group_id: security_group_id.to_string(),
            direction,
            ethertype: None,
            port_range_min: None,
            port_range_max: None,
            protocol: None,
            remote_group_id: None,
            remote_ip_prefix: None,
            tenant_id: None,
        }
    }

    /// Limit the rule to `min..=max`
    pub fn port_range(mut self, min: u16, max: u16) -> Self {
        self.port_range_min = Some(min);
        self.port_range_max = Some(max);
        self
    }
}

option_setters!(CreateRule {
    ethertype: EtherType,
    protocol: RuleProtocol,
    remote_group_id: String,
    remote_ip_prefix: String,
    tenant_id: String,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_group_deserialization() {
        let json = r#"{
            "description": "default",
            "id": "85cc3048-abc3-43cc-89b3-377341426ac5",
            "name": "default",
            "security_group_rules": [
                {
                    "direction": "egress",
                    "ethertype": "IPv6",
                    "id": "3c0e45ff-adaf-4124-b083-bf390e5482ff",
                    "port_range_max": null,
                    "port_range_min": null,
                    "protocol": null,
                    "remote_group_id": null,
                    "remote_ip_prefix": null,
                    "security_group_id": "85cc3048-abc3-43cc-89b3-377341426ac5",
                    "tenant_id": "e4f50856753b4dc6afee5fa6b9b6c550"
                },
                {
                    "direction": "ingress",
                    "ethertype": "IPv4",
                    "id": "c0b09f00-1d49-4e64-a0a7-8a186d928138",
                    "port_range_max": 22,
                    "port_range_min": 22,
                    "protocol": "tcp",
                    "remote_group_id": null,
                    "remote_ip_prefix": "0.0.0.0/0",
                    "security_group_id": "85cc3048-abc3-43cc-89b3-377341426ac5",
                    "tenant_id": "e4f50856753b4dc6afee5fa6b9b6c550"
                }
            ],
            "tenant_id": "e4f50856753b4dc6afee5fa6b9b6c550"
        }"#;
        let group: SecurityGroup = serde_json::from_str(json).unwrap();
        assert_eq!(group.security_group_rules.len(), 2);
        let egress = &group.security_group_rules[0];
        assert_eq!(egress.direction, Direction::Egress);
        assert_eq!(egress.ethertype, Some(EtherType::IPv6));
        let ssh = &group.security_group_rules[1];
        assert_eq!(ssh.protocol, Some(RuleProtocol::Tcp));
        assert_eq!(ssh.port_range_min, Some(22));
    }

    #[test]
    fn test_create_rule_serialization() {
        let body = CreateRule::new("sg-1", Direction::Ingress)
            .ethertype(EtherType::IPv4)
            .protocol(RuleProtocol::Tcp)
            .port_range(80, 80)
            .remote_ip_prefix("0.0.0.0/0");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "security_group_id": "sg-1",
                "direction": "ingress",
                "ethertype": "IPv4",
                "port_range_min": 80,
                "port_range_max": 80,
                "protocol": "tcp",
                "remote_ip_prefix": "0.0.0.0/0"
            })
        );
    }
}
