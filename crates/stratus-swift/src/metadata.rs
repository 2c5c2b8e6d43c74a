//! Header-encoded metadata
//!
//! Swift stores user metadata as `X-<Kind>-Meta-<key>` headers and removes it
//! with `X-Remove-<Kind>-Meta-<key>`. Header names are case-insensitive, so
//! parsed keys are always lower-cased.

use std::collections::BTreeMap;

use stratus_core::{RestRequest, RestResponse, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MetadataKind {
    Account,
    Container,
    Object,
}

impl MetadataKind {
    pub fn meta_prefix(self) -> &'static str {
        match self {
            MetadataKind::Account => "X-Account-Meta-",
            MetadataKind::Container => "X-Container-Meta-",
            MetadataKind::Object => "X-Object-Meta-",
        }
    }

    pub fn remove_prefix(self) -> &'static str {
        match self {
            MetadataKind::Account => "X-Remove-Account-Meta-",
            MetadataKind::Container => "X-Remove-Container-Meta-",
            MetadataKind::Object => "X-Remove-Object-Meta-",
        }
    }
}

/// Add `metadata` as `X-<Kind>-Meta-*` headers
pub(crate) fn with_metadata(
    mut request: RestRequest,
    kind: MetadataKind,
    metadata: &BTreeMap<String, String>,
) -> Result<RestRequest> {
    for (key, value) in metadata {
        request = request.header(&format!("{}{}", kind.meta_prefix(), key), value)?;
    }
    Ok(request)
}

/// Add `X-Remove-<Kind>-Meta-*` headers for every key of `metadata`
pub(crate) fn with_metadata_removal(
    mut request: RestRequest,
    kind: MetadataKind,
    metadata: &BTreeMap<String, String>,
) -> Result<RestRequest> {
    for (key, value) in metadata {
        // Swift ignores the value, but an empty one is dropped by some proxies
        let value = if value.is_empty() { "x" } else { value.as_str() };
        request = request.header(&format!("{}{}", kind.remove_prefix(), key), value)?;
    }
    Ok(request)
}

/// Add arbitrary headers
pub(crate) fn with_headers(
    mut request: RestRequest,
    headers: &BTreeMap<String, String>,
) -> Result<RestRequest> {
    for (name, value) in headers {
        request = request.header(name, value)?;
    }
    Ok(request)
}

pub(crate) fn parse_metadata(response: &RestResponse, kind: MetadataKind) -> BTreeMap<String, String> {
    response
        .headers_with_prefix(kind.meta_prefix())
        .into_iter()
        .collect()
}
