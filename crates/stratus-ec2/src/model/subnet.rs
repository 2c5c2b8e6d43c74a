//! VPC subnets

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::xml::tag_set;

string_enum!(SubnetState {
    Pending => "pending",
    Available => "available",
});

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Subnet {
    pub subnet_id: String,
    pub state: Option<SubnetState>,
    pub vpc_id: String,
    pub cidr_block: String,
    pub available_ip_address_count: u32,
    pub availability_zone: Option<String>,
    pub default_for_az: bool,
    pub map_public_ip_on_launch: bool,
    #[serde(rename = "tagSet", deserialize_with = "tag_set")]
    pub tags: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateSubnetOptions {
    pub availability_zone: Option<String>,
}

impl CreateSubnetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn availability_zone(mut self, zone: &str) -> Self {
        self.availability_zone = Some(zone.to_string());
        self
    }
}
