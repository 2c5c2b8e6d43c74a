//! Security groups and their rules

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::xml::{item_set, tag_set};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserIdGroupPair {
    pub user_id: Option<String>,
    pub group_id: Option<String>,
    pub group_name: Option<String>,
}

impl UserIdGroupPair {
    /// Refer to a group by id, the only form VPC groups accept
    pub fn id(group_id: &str) -> Self {
        Self {
            group_id: Some(group_id.to_string()),
            ..Default::default()
        }
    }

    /// Refer to another account's group by name (EC2-Classic)
    pub fn named(user_id: &str, group_name: &str) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
            group_name: Some(group_name.to_string()),
            ..Default::default()
        }
    }
}

/// One rule: a protocol and port range opened to CIDR blocks and/or groups.
///
/// Protocol `-1` is every protocol; ICMP rules carry type and code in the
/// port fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IpPermission {
    pub ip_protocol: String,
    pub from_port: Option<i32>,
    pub to_port: Option<i32>,
    #[serde(deserialize_with = "cidr_set")]
    pub ip_ranges: Vec<String>,
    #[serde(deserialize_with = "item_set")]
    pub groups: Vec<UserIdGroupPair>,
}

impl IpPermission {
    pub fn new(ip_protocol: &str) -> Self {
        Self {
            ip_protocol: ip_protocol.to_string(),
            ..Default::default()
        }
    }

    pub fn tcp(from_port: i32, to_port: i32) -> Self {
        Self::new("tcp").ports(from_port, to_port)
    }

    pub fn udp(from_port: i32, to_port: i32) -> Self {
        Self::new("udp").ports(from_port, to_port)
    }

    /// `-1` for either value matches every ICMP type or code
    pub fn icmp(icmp_type: i32, icmp_code: i32) -> Self {
        Self::new("icmp").ports(icmp_type, icmp_code)
    }

    pub fn all_traffic() -> Self {
        Self::new("-1")
    }

    pub fn ports(mut self, from_port: i32, to_port: i32) -> Self {
        self.from_port = Some(from_port);
        self.to_port = Some(to_port);
        self
    }

    pub fn cidr(mut self, cidr: &str) -> Self {
        self.ip_ranges.push(cidr.to_string());
        self
    }

    pub fn group(mut self, group: UserIdGroupPair) -> Self {
        self.groups.push(group);
        self
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpRange {
    cidr_ip: String,
}

fn cidr_set<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let ranges: Vec<IpRange> = item_set(deserializer)?;
    Ok(ranges.into_iter().map(|range| range.cidr_ip).collect())
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityGroup {
    pub owner_id: String,
    pub group_id: String,
    pub group_name: String,
    pub group_description: String,
    pub vpc_id: Option<String>,
    #[serde(deserialize_with = "item_set")]
    pub ip_permissions: Vec<IpPermission>,
    #[serde(deserialize_with = "item_set")]
    pub ip_permissions_egress: Vec<IpPermission>,
    #[serde(rename = "tagSet", deserialize_with = "tag_set")]
    pub tags: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateSecurityGroupOptions {
    pub vpc_id: Option<String>,
}

impl CreateSecurityGroupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vpc_id(mut self, vpc_id: &str) -> Self {
        self.vpc_id = Some(vpc_id.to_string());
        self
    }
}
