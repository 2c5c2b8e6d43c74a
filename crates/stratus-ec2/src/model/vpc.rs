//! Virtual private clouds

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::xml::tag_set;

string_enum!(VpcState {
    Pending => "pending",
    Available => "available",
});

string_enum!(InstanceTenancy {
    Default => "default",
    Dedicated => "dedicated",
    Host => "host",
});

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vpc {
    pub vpc_id: String,
    pub state: Option<VpcState>,
    pub cidr_block: String,
    pub dhcp_options_id: Option<String>,
    pub instance_tenancy: Option<InstanceTenancy>,
    pub is_default: bool,
    pub owner_id: Option<String>,
    #[serde(rename = "tagSet", deserialize_with = "tag_set")]
    pub tags: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateVpcOptions {
    pub instance_tenancy: Option<InstanceTenancy>,
}

impl CreateVpcOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instance_tenancy(mut self, tenancy: InstanceTenancy) -> Self {
        self.instance_tenancy = Some(tenancy);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::from_xml;

    #[derive(Deserialize)]
    struct Response {
        vpc: Vpc,
    }

    #[test]
    fn test_parse_vpc() {
        let response: Response = from_xml(
            br#"<CreateVpcResponse xmlns="http://ec2.amazonaws.com/doc/2016-11-15/">
   <requestId>7a62c49f-347e-4fc4-9331-6e8eEXAMPLE</requestId>
   <vpc>
      <vpcId>vpc-1a2b3c4d</vpcId>
      <state>pending</state>
      <cidrBlock>10.0.0.0/16</cidrBlock>
      <dhcpOptionsId>dopt-1a2b3c4d2</dhcpOptionsId>
      <instanceTenancy>dedicated</instanceTenancy>
      <tagSet/>
   </vpc>
</CreateVpcResponse>"#,
        )
        .unwrap();
        let vpc = response.vpc;
        assert_eq!(vpc.vpc_id, "vpc-1a2b3c4d");
        assert_eq!(vpc.state, Some(VpcState::Pending));
        assert_eq!(vpc.cidr_block, "10.0.0.0/16");
        assert_eq!(vpc.instance_tenancy, Some(InstanceTenancy::Dedicated));
        assert!(!vpc.is_default);
        assert!(vpc.tags.is_empty());
    }
}
