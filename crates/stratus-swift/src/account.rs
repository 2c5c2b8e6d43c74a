//! Account level operations

use std::collections::BTreeMap;
use std::sync::Arc;

use stratus_core::{RestClient, RestRequest};

use crate::error::Result;
use crate::metadata::{MetadataKind, parse_metadata, with_metadata, with_metadata_removal};
use crate::model::{Account, TEMP_URL_KEY};

#[derive(Clone, Debug)]
pub struct AccountApi {
    client: Arc<RestClient>,
}

impl AccountApi {
    pub(crate) fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    /// Account statistics and metadata
    pub async fn get(&self) -> Result<Account> {
        let response = self.client.execute(RestRequest::head("")).await?;
        Ok(Account {
            container_count: response
                .header_u64("X-Account-Container-Count")
                .unwrap_or_default(),
            object_count: response.header_u64("X-Account-Object-Count").unwrap_or_default(),
            bytes_used: response.header_u64("X-Account-Bytes-Used").unwrap_or_default(),
            metadata: parse_metadata(&response, MetadataKind::Account),
        })
    }

    pub async fn update_metadata(&self, metadata: &BTreeMap<String, String>) -> Result<bool> {
        let request = with_metadata(RestRequest::post(""), MetadataKind::Account, metadata)?;
        self.client.execute(request).await?;
        Ok(true)
    }

    pub async fn delete_metadata(&self, metadata: &BTreeMap<String, String>) -> Result<bool> {
        let request = with_metadata_removal(RestRequest::post(""), MetadataKind::Account, metadata)?;
        self.client.execute(request).await?;
        Ok(true)
    }

    /// Set the key temporary URLs are signed with
    pub async fn update_temporary_url_key(&self, key: &str) -> Result<bool> {
        let metadata = BTreeMap::from([(TEMP_URL_KEY.to_string(), key.to_string())]);
        self.update_metadata(&metadata).await
    }
}
