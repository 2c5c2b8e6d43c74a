//! Bulk middleware: archive extraction and multi-object delete

use std::sync::Arc;

use bytes::Bytes;
use stratus_core::{Payload, RestClient, RestRequest, encode_path};
use tracing::debug;

use crate::error::Result;
use crate::model::{ArchiveFormat, BulkDeleteResponse, ExtractArchiveResponse};

const ACCEPT_JSON: &str = "application/json";

#[derive(Clone, Debug)]
pub struct BulkApi {
    client: Arc<RestClient>,
}

impl BulkApi {
    pub(crate) fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    /// Unpack an archive under `path`.
    ///
    /// An empty `path` extracts into the account, using the top-level
    /// directories of the archive as container names.
    pub async fn extract_archive(
        &self,
        path: &str,
        archive: impl Into<Bytes>,
        format: ArchiveFormat,
    ) -> Result<ExtractArchiveResponse> {
        let request = RestRequest::put(format!("/{}", encode_path(path.trim_start_matches('/'))))
            .query("extract-archive", format.as_str())
            .header("Accept", ACCEPT_JSON)?
            .body(Payload::new(archive));
        let response: ExtractArchiveResponse = self.client.execute_json(request).await?;
        debug!(
            "Extracted {} files into /{} ({} errors)",
            response.created,
            path.trim_start_matches('/'),
            response.errors.len()
        );
        Ok(response)
    }

    /// Delete many `container/object` (or bare `container`) paths in one request
    pub async fn bulk_delete<I, S>(&self, paths: I) -> Result<BulkDeleteResponse>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let request = RestRequest::delete("")
            .query("bulk-delete", "")
            .header("Accept", ACCEPT_JSON)?
            .body(Payload::new(bulk_delete_body(paths)).with_content_type("text/plain"));
        Ok(self.client.execute_json(request).await?)
    }
}

fn bulk_delete_body<I, S>(paths: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paths
        .into_iter()
        .map(|path| format!("/{}", encode_path(path.as_ref().trim_start_matches('/'))))
        .collect::<Vec<_>>()
        .join("\n")
}
