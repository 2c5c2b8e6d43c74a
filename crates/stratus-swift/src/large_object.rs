//! Static and dynamic large objects
//!
//! A static large object is a manifest listing its segments explicitly. A
//! dynamic one is a zero-length object whose `X-Object-Manifest` header names
//! a `container/prefix`; every object under the prefix is a segment, joined
//! in name order.

use std::collections::BTreeMap;
use std::sync::Arc;

use stratus_core::{
    BoolFallback, Fallback, Payload, RestClient, RestRequest, encode_component, encode_path,
};
use tracing::debug;

use crate::error::Result;
use crate::metadata::{MetadataKind, with_metadata};
use crate::model::Segment;
use crate::object::{ObjectApi, etag_of, object_path, or_container_not_found};
use crate::options::PutOptions;

const MULTIPART_MANIFEST: &str = "multipart-manifest";
const OBJECT_MANIFEST: &str = "X-Object-Manifest";

// ============================================================================
// Static large objects
// ============================================================================

#[derive(Clone, Debug)]
pub struct StaticLargeObjectApi {
    client: Arc<RestClient>,
    container: String,
}

impl StaticLargeObjectApi {
    pub(crate) fn new(client: Arc<RestClient>, container: impl Into<String>) -> Self {
        Self {
            client,
            container: container.into(),
        }
    }

    /// Upload or replace the manifest of `name` and return its ETag
    pub async fn replace_manifest(
        &self,
        name: &str,
        segments: &[Segment],
        metadata: &BTreeMap<String, String>,
    ) -> Result<String> {
        let request = RestRequest::put(object_path(&self.container, name))
            .query(MULTIPART_MANIFEST, "put")
            .json(segments)?;
        let request = with_metadata(request, MetadataKind::Object, metadata)?;

        let response = or_container_not_found(self.client.execute(request).await, &self.container)?;
        debug!(
            "Stored manifest {}/{} with {} segments",
            self.container,
            name,
            segments.len()
        );
        Ok(etag_of(&response))
    }

    pub async fn get_manifest(&self, name: &str) -> Result<Option<Vec<Segment>>> {
        let request = RestRequest::get(object_path(&self.container, name)).query(MULTIPART_MANIFEST, "get");
        Ok(self
            .client
            .execute_json(request)
            .await
            .or_none_on_not_found()?)
    }

    /// Delete the manifest together with its segments; a missing manifest is not an error
    pub async fn delete(&self, name: &str) -> Result<()> {
        let request = RestRequest::delete(object_path(&self.container, name))
            .query(MULTIPART_MANIFEST, "delete");
        self.client.execute(request).await.or_false_on_not_found()?;
        Ok(())
    }
}

// ============================================================================
// Dynamic large objects
// ============================================================================

#[derive(Clone, Debug)]
pub struct DynamicLargeObjectApi {
    objects: ObjectApi,
}

impl DynamicLargeObjectApi {
    pub(crate) fn new(client: Arc<RestClient>, container: impl Into<String>) -> Self {
        Self {
            objects: ObjectApi::new(client, container),
        }
    }

    /// Upload one segment and return its ETag
    pub async fn upload_part(
        &self,
        segment_name: &str,
        payload: Payload,
        metadata: &BTreeMap<String, String>,
    ) -> Result<String> {
        let options = PutOptions {
            metadata: metadata.clone(),
            ..PutOptions::default()
        };
        self.objects.put(segment_name, payload, &options).await
    }

    /// Write the zero-length manifest joining every segment under `segment_prefix`
    pub async fn put_manifest(
        &self,
        name: &str,
        segment_prefix: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<String> {
        let container = self.objects.container();
        let manifest = format!("{}/{}", encode_component(container), encode_path(segment_prefix));
        let options = PutOptions {
            metadata: metadata.clone(),
            headers: BTreeMap::from([(OBJECT_MANIFEST.to_string(), manifest)]),
            verify_checksum: false,
        };
        self.objects.put(name, Payload::new(Vec::new()), &options).await
    }
}
