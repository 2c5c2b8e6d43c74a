//! Resource tags

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::client::Ec2Client;
use crate::error::{Ec2Fallback, Result};
use crate::form::FormParams;
use crate::model::{Filters, TagDescription};
use crate::xml::item_set;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeTagsResponse {
    #[serde(default, deserialize_with = "item_set")]
    tag_set: Vec<TagDescription>,
}

#[derive(Clone, Debug)]
pub struct TagApi {
    client: Arc<Ec2Client>,
}

impl TagApi {
    pub(crate) fn new(client: Arc<Ec2Client>) -> Self {
        Self { client }
    }

    /// Add or overwrite `tags` on every resource
    pub async fn create_tags(
        &self,
        region: Option<&str>,
        resource_ids: &[&str],
        tags: &BTreeMap<String, String>,
    ) -> Result<()> {
        let params = FormParams::new("CreateTags")
            .list("ResourceId", resource_ids)
            .tags(tags);
        self.client.call_return(region, params).await?;
        Ok(())
    }

    /// An empty value removes the key whatever its value
    pub async fn delete_tags(
        &self,
        region: Option<&str>,
        resource_ids: &[&str],
        tags: &BTreeMap<String, String>,
    ) -> Result<()> {
        let params = FormParams::new("DeleteTags")
            .list("ResourceId", resource_ids)
            .tags(tags);
        self.client.call_return(region, params).await?;
        Ok(())
    }

    pub async fn describe_tags(&self, region: Option<&str>, filters: &Filters) -> Result<Vec<TagDescription>> {
        let params = FormParams::new("DescribeTags").filters(filters);
        self.client
            .call::<DescribeTagsResponse>(region, params)
            .await
            .map(|response| response.tag_set)
            .or_empty_on_not_found()
    }
}
