//! Spot instance requests and price history

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::Filters;
use crate::xml::{item_set, tag_set};

string_enum!(SpotInstanceState {
    Open => "open",
    Active => "active",
    Closed => "closed",
    Cancelled => "cancelled",
    Failed => "failed",
});

string_enum!(SpotInstanceType {
    OneTime => "one-time",
    Persistent => "persistent",
});

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpotFault {
    pub code: String,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpotStatus {
    pub code: String,
    pub update_time: Option<DateTime<Utc>>,
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LaunchSpecification {
    pub image_id: Option<String>,
    pub key_name: Option<String>,
    pub instance_type: Option<String>,
    pub kernel_id: Option<String>,
    pub ramdisk_id: Option<String>,
    pub subnet_id: Option<String>,
    #[serde(rename = "groupSet", deserialize_with = "group_ids")]
    pub security_group_ids: Vec<String>,
    #[serde(deserialize_with = "monitoring_enabled")]
    pub monitoring: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupIdentifier {
    group_id: String,
}

fn group_ids<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let groups: Vec<GroupIdentifier> = item_set(deserializer)?;
    Ok(groups.into_iter().map(|group| group.group_id).collect())
}

#[derive(Deserialize)]
struct MonitoringFlag {
    #[serde(default)]
    enabled: bool,
}

fn monitoring_enabled<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag: Option<MonitoringFlag> = Option::deserialize(deserializer)?;
    Ok(flag.is_some_and(|flag| flag.enabled))
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpotInstanceRequest {
    pub spot_instance_request_id: String,
    pub spot_price: Option<String>,
    #[serde(rename = "type")]
    pub request_type: Option<SpotInstanceType>,
    pub state: Option<SpotInstanceState>,
    pub status: Option<SpotStatus>,
    pub fault: Option<SpotFault>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub launch_group: Option<String>,
    pub availability_zone_group: Option<String>,
    pub launched_availability_zone: Option<String>,
    pub launch_specification: Option<LaunchSpecification>,
    pub instance_id: Option<String>,
    pub create_time: Option<DateTime<Utc>>,
    pub product_description: Option<String>,
    #[serde(rename = "tagSet", deserialize_with = "tag_set")]
    pub tags: BTreeMap<String, String>,
}

/// State of a request after `CancelSpotInstanceRequests`
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledSpotInstanceRequest {
    pub spot_instance_request_id: String,
    pub state: SpotInstanceState,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotPrice {
    pub instance_type: String,
    pub product_description: String,
    #[serde(deserialize_with = "decimal")]
    pub spot_price: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub availability_zone: Option<String>,
}

fn decimal<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    text.trim().parse().map_err(serde::de::Error::custom)
}

// ============================================================================
// Options
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestSpotInstancesOptions {
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub request_type: Option<SpotInstanceType>,
    pub launch_group: Option<String>,
    pub availability_zone_group: Option<String>,
    pub instance_type: Option<String>,
    pub key_name: Option<String>,
    pub security_group_ids: Vec<String>,
    pub availability_zone: Option<String>,
    pub subnet_id: Option<String>,
    pub user_data: Option<Vec<u8>>,
    pub monitoring: bool,
}

impl RequestSpotInstancesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn valid_from(mut self, from: DateTime<Utc>) -> Self {
        self.valid_from = Some(from);
        self
    }

    pub fn valid_until(mut self, until: DateTime<Utc>) -> Self {
        self.valid_until = Some(until);
        self
    }

    pub fn request_type(mut self, request_type: SpotInstanceType) -> Self {
        self.request_type = Some(request_type);
        self
    }

    /// Launch or terminate all instances of the group together
    pub fn launch_group(mut self, group: &str) -> Self {
        self.launch_group = Some(group.to_string());
        self
    }

    pub fn availability_zone_group(mut self, group: &str) -> Self {
        self.availability_zone_group = Some(group.to_string());
        self
    }

    pub fn instance_type(mut self, instance_type: &str) -> Self {
        self.instance_type = Some(instance_type.to_string());
        self
    }

    pub fn key_name(mut self, key_name: &str) -> Self {
        self.key_name = Some(key_name.to_string());
        self
    }

    pub fn security_group_id(mut self, group_id: &str) -> Self {
        self.security_group_ids.push(group_id.to_string());
        self
    }

    pub fn availability_zone(mut self, zone: &str) -> Self {
        self.availability_zone = Some(zone.to_string());
        self
    }

    pub fn subnet_id(mut self, subnet_id: &str) -> Self {
        self.subnet_id = Some(subnet_id.to_string());
        self
    }

    pub fn user_data(mut self, user_data: impl Into<Vec<u8>>) -> Self {
        self.user_data = Some(user_data.into());
        self
    }

    pub fn enable_monitoring(mut self) -> Self {
        self.monitoring = true;
        self
    }

    /// Base64 user data as sent on the wire
    pub fn encoded_user_data(&self) -> Option<String> {
        self.user_data.as_ref().map(|data| STANDARD.encode(data))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DescribeSpotPriceHistoryOptions {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub instance_types: Vec<String>,
    pub product_descriptions: Vec<String>,
    pub availability_zone: Option<String>,
    pub filters: Filters,
    pub max_results: Option<u32>,
}

impl DescribeSpotPriceHistoryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, start: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self
    }

    pub fn to(mut self, end: DateTime<Utc>) -> Self {
        self.end_time = Some(end);
        self
    }

    pub fn instance_type(mut self, instance_type: &str) -> Self {
        self.instance_types.push(instance_type.to_string());
        self
    }

    /// e.g. `Linux/UNIX`, `Windows`
    pub fn product_description(mut self, description: &str) -> Self {
        self.product_descriptions.push(description.to_string());
        self
    }

    pub fn availability_zone(mut self, zone: &str) -> Self {
        self.availability_zone = Some(zone.to_string());
        self
    }

    pub fn filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::xml::from_xml;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct RequestsResponse {
        #[serde(deserialize_with = "item_set")]
        spot_instance_request_set: Vec<SpotInstanceRequest>,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct PriceResponse {
        #[serde(deserialize_with = "item_set")]
        spot_price_history_set: Vec<SpotPrice>,
    }

    #[test]
    fn test_parse_spot_request() {
        let response: RequestsResponse = from_xml(
            br#"<DescribeSpotInstanceRequestsResponse xmlns="http://ec2.amazonaws.com/doc/2016-11-15/">
  <requestId>d9da716e-1ee9-48c2-8dd6-8fd8EXAMPLE</requestId>
  <spotInstanceRequestSet>
    <item>
      <spotInstanceRequestId>sir-1a2b3c4d</spotInstanceRequestId>
      <spotPrice>0.090000</spotPrice>
      <type>one-time</type>
      <state>active</state>
      <status>
        <code>fulfilled</code>
        <updateTime>2014-04-30T18:16:21.000Z</updateTime>
        <message>Your Spot request is fulfilled.</message>
      </status>
      <launchSpecification>
        <imageId>ami-7aba833f</imageId>
        <keyName>my-key-pair</keyName>
        <groupSet>
          <item>
            <groupId>sg-1a2b3c4d</groupId>
            <groupName>websrv</groupName>
          </item>
        </groupSet>
        <instanceType>m1.small</instanceType>
        <monitoring>
          <enabled>false</enabled>
        </monitoring>
      </launchSpecification>
      <instanceId>i-1a2b3c4d</instanceId>
      <createTime>2014-04-30T18:14:55.000Z</createTime>
      <productDescription>Linux/UNIX</productDescription>
      <launchedAvailabilityZone>us-west-2a</launchedAvailabilityZone>
    </item>
  </spotInstanceRequestSet>
</DescribeSpotInstanceRequestsResponse>"#,
        )
        .unwrap();

        let request = &response.spot_instance_request_set[0];
        assert_eq!(request.spot_instance_request_id, "sir-1a2b3c4d");
        assert_eq!(request.request_type, Some(SpotInstanceType::OneTime));
        assert_eq!(request.state, Some(SpotInstanceState::Active));
        assert_eq!(request.status.as_ref().unwrap().code, "fulfilled");
        let launch = request.launch_specification.as_ref().unwrap();
        assert_eq!(launch.image_id.as_deref(), Some("ami-7aba833f"));
        assert_eq!(launch.security_group_ids, vec!["sg-1a2b3c4d"]);
        assert!(!launch.monitoring);
        assert_eq!(
            request.create_time,
            Some(Utc.with_ymd_and_hms(2014, 4, 30, 18, 14, 55).unwrap())
        );
    }

    #[test]
    fn test_parse_spot_price() {
        let response: PriceResponse = from_xml(
            br#"<DescribeSpotPriceHistoryResponse xmlns="http://ec2.amazonaws.com/doc/2016-11-15/">
  <requestId>59dbff89-35bd-4eac-99ed-be587EXAMPLE</requestId>
  <spotPriceHistorySet>
    <item>
      <instanceType>m3.medium</instanceType>
      <productDescription>Linux/UNIX</productDescription>
      <spotPrice>0.0320</spotPrice>
      <timestamp>2014-01-06T04:32:53.000Z</timestamp>
      <availabilityZone>us-west-2a</availabilityZone>
    </item>
  </spotPriceHistorySet>
  <nextToken/>
</DescribeSpotPriceHistoryResponse>"#,
        )
        .unwrap();

        let price = &response.spot_price_history_set[0];
        assert_eq!(price.instance_type, "m3.medium");
        assert!((price.spot_price - 0.032).abs() < f64::EPSILON);
        assert_eq!(price.availability_zone.as_deref(), Some("us-west-2a"));
    }

    #[test]
    fn test_user_data_is_base64() {
        let options = RequestSpotInstancesOptions::new().user_data("#!/bin/sh\necho hi");
        assert_eq!(
            options.encoded_user_data().as_deref(),
            Some("IyEvYmluL3NoCmVjaG8gaGk=")
        );
    }
}
