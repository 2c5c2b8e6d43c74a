//! Object operations within one container

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::{Stream, TryStreamExt};
use md5::{Digest, Md5};
use reqwest::StatusCode;
use stratus_core::pagination::next_marker_from_last;
use stratus_core::{
    BoolFallback, Fallback, Page, PaginationOptions, Payload, RestClient, RestRequest,
    RestResponse, encode_component, encode_path, paginate,
};
use tracing::debug;

use crate::container::{container_from_headers, container_path, parse_listing};
use crate::error::{Result, SwiftError};
use crate::metadata::{
    MetadataKind, parse_metadata, with_headers, with_metadata, with_metadata_removal,
};
use crate::model::{ListEntry, ObjectList, SwiftObject, parse_http_date};
use crate::options::{CopyOptions, GetOptions, ListContainerOptions, PutOptions};

const COPY_FROM: &str = "X-Copy-From";

pub(crate) fn object_path(container: &str, name: &str) -> String {
    format!("/{}/{}", encode_component(container), encode_path(name))
}

/// The `ETag` response header without its quotes
pub(crate) fn etag_of(response: &RestResponse) -> String {
    response
        .header("ETag")
        .map(|etag| etag.trim_matches('"').to_string())
        .unwrap_or_default()
}

pub(crate) fn md5_hex(bytes: &[u8]) -> String {
    const_hex::encode(Md5::digest(bytes))
}

/// Writes into a missing container answer 404
pub(crate) fn or_container_not_found<T>(result: stratus_core::Result<T>, container: &str) -> Result<T> {
    match result {
        Err(e) if e.is_not_found() => Err(SwiftError::ContainerNotFound(container.to_string())),
        other => Ok(other?),
    }
}

#[derive(Clone, Debug)]
pub struct ObjectApi {
    client: Arc<RestClient>,
    container: String,
}

impl ObjectApi {
    pub(crate) fn new(client: Arc<RestClient>, container: impl Into<String>) -> Self {
        Self {
            client,
            container: container.into(),
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    fn path(&self, name: &str) -> String {
        object_path(&self.container, name)
    }

    // ========================================================================
    // Listing
    // ========================================================================

    /// One page of the container listing; `None` when the container is missing
    pub async fn list(&self, options: &ListContainerOptions) -> Result<Option<ObjectList>> {
        let listing = list_page(
            &self.client,
            &self.container,
            options.page_size(),
            options.to_pagination(),
        )
        .await?;
        Ok(listing.map(|(list, _)| list))
    }

    /// Lazily walk every object of the container
    pub fn list_all(
        &self,
        options: &ListContainerOptions,
    ) -> impl Stream<Item = Result<SwiftObject>> + Send + use<> {
        let client = self.client.clone();
        let container = self.container.clone();
        let page_size = options.page_size();
        paginate(options.to_pagination(), move |opts| {
            let client = client.clone();
            let container = container.clone();
            async move {
                Ok(match list_page(&client, &container, page_size, opts).await? {
                    Some((list, next)) => Page::new(list.objects, next),
                    None => Page::default(),
                })
            }
        })
        .map_err(SwiftError::from)
    }

    // ========================================================================
    // Content
    // ========================================================================

    /// Upload an object and return its ETag
    pub async fn put(&self, name: &str, payload: Payload, options: &PutOptions) -> Result<String> {
        let mut request = RestRequest::put(self.path(name));
        request = with_metadata(request, MetadataKind::Object, &options.metadata)?;
        request = with_headers(request, &options.headers)?;
        if options.verify_checksum {
            request = request.header("ETag", &md5_hex(&payload.bytes))?;
        }

        let response = or_container_not_found(
            self.client.execute(request.body(payload)).await,
            &self.container,
        )?;
        let etag = etag_of(&response);
        debug!("Uploaded {}/{} with etag {}", self.container, name, etag);
        Ok(etag)
    }

    /// Download an object.
    ///
    /// `None` when the object is missing or, for conditional requests, unchanged.
    pub async fn get(&self, name: &str, options: &GetOptions) -> Result<Option<SwiftObject>> {
        let mut request = RestRequest::get(self.path(name));
        for (header, value) in options.to_headers() {
            request = request.header(header, &value)?;
        }

        match self.client.execute(request).await {
            Ok(response) => Ok(Some(self.object_from_response(name, response, true))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) if e.status() == Some(StatusCode::NOT_MODIFIED) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Object metadata and headers via `HEAD`
    pub async fn get_without_body(&self, name: &str) -> Result<Option<SwiftObject>> {
        let response = self
            .client
            .execute(RestRequest::head(self.path(name)))
            .await
            .or_none_on_not_found()?;
        Ok(response.map(|response| self.object_from_response(name, response, false)))
    }

    /// Delete an object; a missing one is not an error
    pub async fn delete(&self, name: &str) -> Result<()> {
        let deleted = self
            .client
            .execute(RestRequest::delete(self.path(name)))
            .await
            .or_false_on_not_found()?;
        if !deleted {
            debug!("Object {}/{} was already gone", self.container, name);
        }
        Ok(())
    }

    /// Server-side copy of `source_container/source_object` to `destination` in this container
    pub async fn copy(
        &self,
        destination: &str,
        source_container: &str,
        source_object: &str,
        options: &CopyOptions,
    ) -> Result<bool> {
        let mut request = RestRequest::put(self.path(destination)).header(
            COPY_FROM,
            &object_path(source_container, source_object),
        )?;
        request = with_metadata(request, MetadataKind::Object, &options.metadata)?;
        request = with_headers(request, &options.headers)?;

        match self.client.execute(request).await {
            Ok(_) => Ok(true),
            Err(cause) if cause.is_not_found() => Err(SwiftError::CopyObject {
                source_path: format!("/{}/{}", source_container, source_object),
                destination_path: format!("/{}/{}", self.container, destination),
                cause,
            }),
            Err(e) => Err(e.into()),
        }
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    /// Replace the object's metadata
    pub async fn update_metadata(&self, name: &str, metadata: &BTreeMap<String, String>) -> Result<bool> {
        let request = with_metadata(RestRequest::post(self.path(name)), MetadataKind::Object, metadata)?;
        Ok(self.client.execute(request).await.or_false_on_not_found()?)
    }

    pub async fn delete_metadata(&self, name: &str, metadata: &BTreeMap<String, String>) -> Result<bool> {
        let request = with_metadata_removal(
            RestRequest::post(self.path(name)),
            MetadataKind::Object,
            metadata,
        )?;
        Ok(self.client.execute(request).await.or_false_on_not_found()?)
    }

    /// Set system headers such as `Content-Type` or `X-Delete-At`
    pub async fn update_headers(&self, name: &str, headers: &BTreeMap<String, String>) -> Result<bool> {
        let request = with_headers(RestRequest::post(self.path(name)), headers)?;
        Ok(self.client.execute(request).await.or_false_on_not_found()?)
    }

    fn object_from_response(&self, name: &str, response: RestResponse, with_body: bool) -> SwiftObject {
        let meta_prefix = MetadataKind::Object.meta_prefix().to_ascii_lowercase();
        let headers = response
            .headers
            .iter()
            .filter(|(header, _)| !header.as_str().starts_with(meta_prefix.as_str()))
            .filter_map(|(header, value)| {
                Some((header.as_str().to_string(), value.to_str().ok()?.to_string()))
            })
            .collect();
        let content_type = response.header("Content-Type").map(str::to_string);
        let payload = with_body.then(|| Payload {
            bytes: response.body.clone(),
            content_type: content_type.clone(),
        });

        SwiftObject {
            name: name.to_string(),
            uri: format!("{}{}", self.client.endpoint(), self.path(name)),
            etag: etag_of(&response),
            last_modified: response.header("Last-Modified").and_then(parse_http_date),
            content_length: response.header_u64("Content-Length"),
            content_type,
            metadata: parse_metadata(&response, MetadataKind::Object),
            headers,
            payload,
        }
    }
}

async fn list_page(
    client: &RestClient,
    container: &str,
    page_size: u32,
    options: PaginationOptions,
) -> stratus_core::Result<Option<(ObjectList, Option<String>)>> {
    let request = RestRequest::get(container_path(container)).query_pairs(options.to_query());
    let Some(response) = client.execute(request).await.or_none_on_not_found()? else {
        return Ok(None);
    };
    let entries: Vec<ListEntry> = parse_listing(&response)?;
    let next = next_marker_from_last(&entries, Some(page_size), ListEntry::name);

    let mut list = ObjectList {
        container: container_from_headers(container, &response),
        ..ObjectList::default()
    };
    for entry in entries {
        match entry {
            ListEntry::Subdir { subdir } => list.subdirs.push(subdir),
            ListEntry::Object {
                name,
                hash,
                bytes,
                content_type,
                last_modified,
            } => list.objects.push(SwiftObject {
                uri: format!("{}{}", client.endpoint(), object_path(container, &name)),
                name,
                etag: hash,
                last_modified,
                content_type,
                content_length: Some(bytes),
                ..SwiftObject::default()
            }),
        }
    }
    Ok(Some((list, next)))
}
