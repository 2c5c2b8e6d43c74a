//! Route tables and routes

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::xml::{item_set, tag_set};

string_enum!(RouteState {
    Active => "active",
    Blackhole => "blackhole",
});

string_enum!(RouteOrigin {
    CreateRouteTable => "CreateRouteTable",
    CreateRoute => "CreateRoute",
    EnableVgwRoutePropagation => "EnableVgwRoutePropagation",
});

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Route {
    pub destination_cidr_block: Option<String>,
    pub gateway_id: Option<String>,
    pub instance_id: Option<String>,
    pub network_interface_id: Option<String>,
    pub vpc_peering_connection_id: Option<String>,
    pub state: Option<RouteState>,
    pub origin: Option<RouteOrigin>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteTableAssociation {
    pub route_table_association_id: String,
    pub route_table_id: String,
    pub subnet_id: Option<String>,
    pub main: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteTable {
    pub route_table_id: String,
    pub vpc_id: String,
    #[serde(rename = "routeSet", deserialize_with = "item_set")]
    pub routes: Vec<Route>,
    #[serde(rename = "associationSet", deserialize_with = "item_set")]
    pub associations: Vec<RouteTableAssociation>,
    pub owner_id: Option<String>,
    #[serde(rename = "tagSet", deserialize_with = "tag_set")]
    pub tags: BTreeMap<String, String>,
}

/// Target of a route; exactly one target is normally set
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteOptions {
    pub destination_cidr_block: Option<String>,
    pub gateway_id: Option<String>,
    pub instance_id: Option<String>,
    pub network_interface_id: Option<String>,
    pub vpc_peering_connection_id: Option<String>,
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destination_cidr_block(mut self, cidr: &str) -> Self {
        self.destination_cidr_block = Some(cidr.to_string());
        self
    }

    pub fn gateway_id(mut self, gateway_id: &str) -> Self {
        self.gateway_id = Some(gateway_id.to_string());
        self
    }

    pub fn instance_id(mut self, instance_id: &str) -> Self {
        self.instance_id = Some(instance_id.to_string());
        self
    }

    pub fn network_interface_id(mut self, network_interface_id: &str) -> Self {
        self.network_interface_id = Some(network_interface_id.to_string());
        self
    }

    pub fn vpc_peering_connection_id(mut self, connection_id: &str) -> Self {
        self.vpc_peering_connection_id = Some(connection_id.to_string());
        self
    }
}
