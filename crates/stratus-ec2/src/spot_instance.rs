//! Spot instance requests and price history

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use crate::client::Ec2Client;
use crate::error::{Ec2Fallback, Result};
use crate::form::FormParams;
use crate::model::{
    CancelledSpotInstanceRequest, DescribeSpotPriceHistoryOptions, RequestSpotInstancesOptions, SpotInstanceRequest,
    SpotPrice,
};
use crate::xml::item_set;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpotInstanceRequestsResponse {
    #[serde(default, deserialize_with = "item_set")]
    spot_instance_request_set: Vec<SpotInstanceRequest>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CancelSpotInstanceRequestsResponse {
    #[serde(default, deserialize_with = "item_set")]
    spot_instance_request_set: Vec<CancelledSpotInstanceRequest>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpotPriceHistoryResponse {
    #[serde(default, deserialize_with = "item_set")]
    spot_price_history_set: Vec<SpotPrice>,
}

fn timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Clone, Debug)]
pub struct SpotInstanceApi {
    client: Arc<Ec2Client>,
}

impl SpotInstanceApi {
    pub(crate) fn new(client: Arc<Ec2Client>) -> Self {
        Self { client }
    }

    /// Bid `spot_price` (USD per hour) for `instance_count` instances of `image_id`
    pub async fn request_spot_instances(
        &self,
        region: Option<&str>,
        spot_price: f64,
        image_id: &str,
        instance_count: u32,
        options: &RequestSpotInstancesOptions,
    ) -> Result<Vec<SpotInstanceRequest>> {
        let params = FormParams::new("RequestSpotInstances")
            .param("SpotPrice", spot_price.to_string())
            .param("InstanceCount", instance_count.to_string())
            .param("LaunchSpecification.ImageId", image_id)
            .opt_param("Type", options.request_type.as_ref())
            .opt_param("ValidFrom", options.valid_from.as_ref().map(timestamp))
            .opt_param("ValidUntil", options.valid_until.as_ref().map(timestamp))
            .opt_param("LaunchGroup", options.launch_group.as_deref())
            .opt_param("AvailabilityZoneGroup", options.availability_zone_group.as_deref())
            .opt_param("LaunchSpecification.InstanceType", options.instance_type.as_deref())
            .opt_param("LaunchSpecification.KeyName", options.key_name.as_deref())
            .list("LaunchSpecification.SecurityGroupId", &options.security_group_ids)
            .opt_param(
                "LaunchSpecification.Placement.AvailabilityZone",
                options.availability_zone.as_deref(),
            )
            .opt_param("LaunchSpecification.SubnetId", options.subnet_id.as_deref())
            .opt_param("LaunchSpecification.UserData", options.encoded_user_data())
            .flag("LaunchSpecification.Monitoring.Enabled", options.monitoring);
        let response: SpotInstanceRequestsResponse = self.client.call(region, params).await?;
        Ok(response.spot_instance_request_set)
    }

    pub async fn describe_spot_instance_requests(
        &self,
        region: Option<&str>,
        request_ids: &[&str],
    ) -> Result<Vec<SpotInstanceRequest>> {
        let params = FormParams::new("DescribeSpotInstanceRequests").list("SpotInstanceRequestId", request_ids);
        self.client
            .call::<SpotInstanceRequestsResponse>(region, params)
            .await
            .map(|response| response.spot_instance_request_set)
            .or_empty_on_not_found()
    }

    /// Cancelling leaves launched instances running
    pub async fn cancel_spot_instance_requests(
        &self,
        region: Option<&str>,
        request_ids: &[&str],
    ) -> Result<Vec<CancelledSpotInstanceRequest>> {
        let params = FormParams::new("CancelSpotInstanceRequests").list("SpotInstanceRequestId", request_ids);
        let response: CancelSpotInstanceRequestsResponse = self.client.call(region, params).await?;
        Ok(response.spot_instance_request_set)
    }

    pub async fn describe_spot_price_history(
        &self,
        region: Option<&str>,
        options: &DescribeSpotPriceHistoryOptions,
    ) -> Result<Vec<SpotPrice>> {
        let params = FormParams::new("DescribeSpotPriceHistory")
            .opt_param("StartTime", options.start_time.as_ref().map(timestamp))
            .opt_param("EndTime", options.end_time.as_ref().map(timestamp))
            .list("InstanceType", &options.instance_types)
            .list("ProductDescription", &options.product_descriptions)
            .opt_param("AvailabilityZone", options.availability_zone.as_deref())
            .opt_param("MaxResults", options.max_results)
            .filters(&options.filters);
        let response: SpotPriceHistoryResponse = self.client.call(region, params).await?;
        Ok(response.spot_price_history_set)
    }
}
