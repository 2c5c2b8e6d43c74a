//! Resource tags

use serde::Deserialize;

string_enum!(ResourceType {
    CustomerGateway => "customer-gateway",
    DhcpOptions => "dhcp-options",
    Image => "image",
    Instance => "instance",
    InternetGateway => "internet-gateway",
    NetworkAcl => "network-acl",
    NetworkInterface => "network-interface",
    ReservedInstances => "reserved-instances",
    RouteTable => "route-table",
    SecurityGroup => "security-group",
    Snapshot => "snapshot",
    SpotInstancesRequest => "spot-instances-request",
    Subnet => "subnet",
    Volume => "volume",
    Vpc => "vpc",
    VpnConnection => "vpn-connection",
    VpnGateway => "vpn-gateway",
});

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDescription {
    pub resource_id: String,
    pub resource_type: ResourceType,
    pub key: String,
    #[serde(default)]
    pub value: String,
}
