//! Internet gateways

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::xml::{item_set, tag_set};

string_enum!(AttachmentState {
    Attaching => "attaching",
    Attached => "attached",
    Detaching => "detaching",
    Detached => "detached",
    Available => "available",
});

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InternetGatewayAttachment {
    pub vpc_id: String,
    pub state: Option<AttachmentState>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InternetGateway {
    pub internet_gateway_id: String,
    #[serde(rename = "attachmentSet", deserialize_with = "item_set")]
    pub attachments: Vec<InternetGatewayAttachment>,
    pub owner_id: Option<String>,
    #[serde(rename = "tagSet", deserialize_with = "tag_set")]
    pub tags: BTreeMap<String, String>,
}
