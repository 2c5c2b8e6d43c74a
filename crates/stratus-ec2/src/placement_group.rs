//! Placement groups

use std::sync::Arc;

use serde::Deserialize;

use crate::client::Ec2Client;
use crate::error::{Ec2Fallback, Result};
use crate::form::FormParams;
use crate::model::{PlacementGroup, PlacementStrategy};
use crate::xml::item_set;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribePlacementGroupsResponse {
    #[serde(default, deserialize_with = "item_set")]
    placement_group_set: Vec<PlacementGroup>,
}

#[derive(Clone, Debug)]
pub struct PlacementGroupApi {
    client: Arc<Ec2Client>,
}

impl PlacementGroupApi {
    pub(crate) fn new(client: Arc<Ec2Client>) -> Self {
        Self { client }
    }

    pub async fn create_placement_group(
        &self,
        region: Option<&str>,
        name: &str,
        strategy: PlacementStrategy,
    ) -> Result<()> {
        let params = FormParams::new("CreatePlacementGroup")
            .param("GroupName", name)
            .param("Strategy", strategy.as_str());
        self.client.call_return(region, params).await?;
        Ok(())
    }

    pub async fn delete_placement_group(&self, region: Option<&str>, name: &str) -> Result<bool> {
        let params = FormParams::new("DeletePlacementGroup").param("GroupName", name);
        self.client.call_return(region, params).await.or_false_on_not_found()
    }

    pub async fn describe_placement_groups(&self, region: Option<&str>, names: &[&str]) -> Result<Vec<PlacementGroup>> {
        let params = FormParams::new("DescribePlacementGroups").list("GroupName", names);
        self.client
            .call::<DescribePlacementGroupsResponse>(region, params)
            .await
            .map(|response| response.placement_group_set)
            .or_empty_on_not_found()
    }
}
