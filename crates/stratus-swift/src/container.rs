//! Container operations

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::{Stream, TryStreamExt};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use stratus_core::pagination::next_marker_from_last;
use stratus_core::{
    BoolFallback, Fallback, Page, PaginationOptions, RestClient, RestRequest, RestResponse,
    encode_component, paginate,
};
use tracing::debug;

use crate::error::{Result, SwiftError};
use crate::metadata::{
    MetadataKind, parse_metadata, with_headers, with_metadata, with_metadata_removal,
};
use crate::model::Container;
use crate::options::{
    CreateContainerOptions, ListContainerOptions, PUBLIC_READ_ACL, UpdateContainerOptions,
};

pub(crate) const CONTAINER_READ: &str = "X-Container-Read";
const CONTAINER_REMOVE_READ: &str = "X-Remove-Container-Read";
const VERSIONS_LOCATION: &str = "X-Versions-Location";

pub(crate) fn container_path(name: &str) -> String {
    format!("/{}", encode_component(name))
}

/// Build a container from the headers of a `HEAD` or listing response
pub(crate) fn container_from_headers(name: &str, response: &RestResponse) -> Container {
    Container {
        name: name.to_string(),
        object_count: response
            .header_u64("X-Container-Object-Count")
            .unwrap_or_default(),
        bytes_used: response.header_u64("X-Container-Bytes-Used").unwrap_or_default(),
        anybody_read: Some(
            response
                .header(CONTAINER_READ)
                .is_some_and(|acl| acl.split(',').any(|grant| grant.trim() == ".r:*")),
        ),
        metadata: parse_metadata(response, MetadataKind::Container),
    }
}

/// Parse a JSON listing; an empty account or container may answer `204` with no body
pub(crate) fn parse_listing<T: DeserializeOwned>(response: &RestResponse) -> stratus_core::Result<Vec<T>> {
    if response.status == StatusCode::NO_CONTENT || response.body.is_empty() {
        return Ok(Vec::new());
    }
    response.json()
}

#[derive(Clone, Debug)]
pub struct ContainerApi {
    client: Arc<RestClient>,
}

impl ContainerApi {
    pub(crate) fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    /// One page of the account's containers
    pub async fn list(&self, options: &ListContainerOptions) -> Result<Vec<Container>> {
        Ok(list_page(&self.client, options.page_size(), options.to_pagination())
            .await?
            .items)
    }

    /// Lazily walk every container, one listing request per page
    pub fn list_all(
        &self,
        options: &ListContainerOptions,
    ) -> impl Stream<Item = Result<Container>> + Send + use<> {
        let client = self.client.clone();
        let page_size = options.page_size();
        paginate(options.to_pagination(), move |opts| {
            let client = client.clone();
            async move { list_page(&client, page_size, opts).await }
        })
        .map_err(SwiftError::from)
    }

    /// Create a container; `false` when it already existed
    pub async fn create(&self, name: &str, options: &CreateContainerOptions) -> Result<bool> {
        let mut request = RestRequest::put(container_path(name));
        request = with_metadata(request, MetadataKind::Container, &options.metadata)?;
        if options.anybody_read {
            request = request.header(CONTAINER_READ, PUBLIC_READ_ACL)?;
        }
        if let Some(location) = &options.versions_location {
            request = request.header(VERSIONS_LOCATION, location)?;
        }
        request = with_headers(request, &options.headers)?;

        let response = self.client.execute(request).await?;
        let created = response.status == StatusCode::CREATED;
        debug!("Container {} created: {}", name, created);
        Ok(created)
    }

    pub async fn get(&self, name: &str) -> Result<Option<Container>> {
        let response = self
            .client
            .execute(RestRequest::head(container_path(name)))
            .await
            .or_none_on_not_found()?;
        Ok(response.map(|response| container_from_headers(name, &response)))
    }

    pub async fn update(&self, name: &str, options: &UpdateContainerOptions) -> Result<bool> {
        let mut request = RestRequest::post(container_path(name));
        match options.anybody_read {
            Some(true) => request = request.header(CONTAINER_READ, PUBLIC_READ_ACL)?,
            Some(false) => request = request.header(CONTAINER_REMOVE_READ, "x")?,
            None => {}
        }
        if let Some(location) = &options.versions_location {
            request = request.header(VERSIONS_LOCATION, location)?;
        }
        request = with_headers(request, &options.headers)?;
        Ok(self.client.execute(request).await.or_false_on_not_found()?)
    }

    pub async fn update_metadata(&self, name: &str, metadata: &BTreeMap<String, String>) -> Result<bool> {
        let request = with_metadata(
            RestRequest::post(container_path(name)),
            MetadataKind::Container,
            metadata,
        )?;
        Ok(self.client.execute(request).await.or_false_on_not_found()?)
    }

    pub async fn delete_metadata(&self, name: &str, metadata: &BTreeMap<String, String>) -> Result<bool> {
        let request = with_metadata_removal(
            RestRequest::post(container_path(name)),
            MetadataKind::Container,
            metadata,
        )?;
        Ok(self.client.execute(request).await.or_false_on_not_found()?)
    }

    /// Delete an empty container.
    ///
    /// A missing container counts as deleted; `false` means it still holds objects.
    pub async fn delete_if_empty(&self, name: &str) -> Result<bool> {
        match self.client.execute(RestRequest::delete(container_path(name))).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(true),
            Err(e) if e.is_conflict() => {
                debug!("Container {} is not empty", name);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

async fn list_page(
    client: &RestClient,
    page_size: u32,
    options: PaginationOptions,
) -> stratus_core::Result<Page<Container>> {
    let request = RestRequest::get("").query_pairs(options.to_query());
    let Some(response) = client.execute(request).await.or_none_on_not_found()? else {
        return Ok(Page::default());
    };
    let containers: Vec<Container> = parse_listing(&response)?;
    let next = next_marker_from_last(&containers, Some(page_size), |c| c.name.as_str());
    Ok(Page::new(containers, next))
}
