//! Detailed (one-minute) CloudWatch monitoring of instances

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::client::Ec2Client;
use crate::error::Result;
use crate::form::FormParams;
use crate::model::{InstanceMonitoring, MonitoringState};
use crate::xml::item_set;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonitorInstancesResponse {
    #[serde(default, deserialize_with = "item_set")]
    instances_set: Vec<InstanceMonitoring>,
}

#[derive(Clone, Debug)]
pub struct MonitoringApi {
    client: Arc<Ec2Client>,
}

impl MonitoringApi {
    pub(crate) fn new(client: Arc<Ec2Client>) -> Self {
        Self { client }
    }

    /// New monitoring state per instance id
    pub async fn monitor_instances(
        &self,
        region: Option<&str>,
        instance_ids: &[&str],
    ) -> Result<BTreeMap<String, MonitoringState>> {
        self.call(region, "MonitorInstances", instance_ids).await
    }

    pub async fn unmonitor_instances(
        &self,
        region: Option<&str>,
        instance_ids: &[&str],
    ) -> Result<BTreeMap<String, MonitoringState>> {
        self.call(region, "UnmonitorInstances", instance_ids).await
    }

    async fn call(
        &self,
        region: Option<&str>,
        action: &str,
        instance_ids: &[&str],
    ) -> Result<BTreeMap<String, MonitoringState>> {
        let params = FormParams::new(action).list("InstanceId", instance_ids);
        let response: MonitorInstancesResponse = self.client.call(region, params).await?;
        Ok(response
            .instances_set
            .into_iter()
            .map(|instance| (instance.instance_id, instance.state))
            .collect())
    }
}
