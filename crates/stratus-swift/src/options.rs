//! Request options for Swift calls

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use stratus_core::PaginationOptions;

use crate::model::format_http_date;

/// Largest page a Swift listing returns when no `limit` is sent
pub const DEFAULT_LISTING_LIMIT: u32 = 10_000;

/// Listing options shared by account and container listings
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListContainerOptions {
    pub limit: Option<u32>,
    pub marker: Option<String>,
    pub end_marker: Option<String>,
    pub prefix: Option<String>,
    pub delimiter: Option<char>,
    pub path: Option<String>,
}

impl ListContainerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn end_marker(mut self, end_marker: impl Into<String>) -> Self {
        self.end_marker = Some(end_marker.into());
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// The effective page size, used to tell a full page from the last one
    pub(crate) fn page_size(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LISTING_LIMIT)
    }

    /// Listing query, always asking for JSON
    pub(crate) fn to_pagination(&self) -> PaginationOptions {
        let mut options = PaginationOptions::new().param("format", "json");
        if let Some(end_marker) = &self.end_marker {
            options = options.param("end_marker", end_marker.as_str());
        }
        if let Some(prefix) = &self.prefix {
            options = options.param("prefix", prefix.as_str());
        }
        if let Some(delimiter) = self.delimiter {
            options = options.param("delimiter", delimiter.to_string());
        }
        if let Some(path) = &self.path {
            options = options.param("path", path.as_str());
        }
        options.limit = self.limit;
        options.marker = self.marker.clone();
        options
    }
}

// ============================================================================
// Containers
// ============================================================================

/// ACL granting anonymous reads and listings
pub const PUBLIC_READ_ACL: &str = ".r:*,.rlistings";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateContainerOptions {
    pub metadata: BTreeMap<String, String>,
    pub anybody_read: bool,
    pub versions_location: Option<String>,
    pub headers: BTreeMap<String, String>,
}

impl CreateContainerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn anybody_read(mut self) -> Self {
        self.anybody_read = true;
        self
    }

    /// Keep old versions of overwritten objects in `container`
    pub fn versions_location(mut self, container: impl Into<String>) -> Self {
        self.versions_location = Some(container.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateContainerOptions {
    /// `Some(false)` removes the read ACL
    pub anybody_read: Option<bool>,
    pub versions_location: Option<String>,
    pub headers: BTreeMap<String, String>,
}

impl UpdateContainerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anybody_read(mut self, anybody_read: bool) -> Self {
        self.anybody_read = Some(anybody_read);
        self
    }

    pub fn versions_location(mut self, container: impl Into<String>) -> Self {
        self.versions_location = Some(container.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

// ============================================================================
// Objects
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PutOptions {
    pub metadata: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    /// Send the MD5 of the payload as `ETag` so Swift rejects corrupted uploads
    pub verify_checksum: bool,
}

impl PutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn verify_checksum(mut self) -> Self {
        self.verify_checksum = true;
        self
    }
}

/// Conditional and ranged download options
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetOptions {
    pub ranges: Vec<String>,
    pub if_modified_since: Option<DateTime<Utc>>,
    pub if_unmodified_since: Option<DateTime<Utc>>,
    pub if_match: Option<String>,
    pub if_none_match: Option<String>,
}

impl GetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes `start..=end`
    pub fn range(mut self, start: u64, end: u64) -> Self {
        self.ranges.push(format!("{}-{}", start, end));
        self
    }

    /// Everything from `offset` on
    pub fn starting_at(mut self, offset: u64) -> Self {
        self.ranges.push(format!("{}-", offset));
        self
    }

    /// The last `count` bytes
    pub fn tail(mut self, count: u64) -> Self {
        self.ranges.push(format!("-{}", count));
        self
    }

    pub fn if_modified_since(mut self, date: DateTime<Utc>) -> Self {
        self.if_modified_since = Some(date);
        self
    }

    pub fn if_unmodified_since(mut self, date: DateTime<Utc>) -> Self {
        self.if_unmodified_since = Some(date);
        self
    }

    pub fn if_match(mut self, etag: impl Into<String>) -> Self {
        self.if_match = Some(etag.into());
        self
    }

    pub fn if_none_match(mut self, etag: impl Into<String>) -> Self {
        self.if_none_match = Some(etag.into());
        self
    }

    pub(crate) fn to_headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::new();
        if !self.ranges.is_empty() {
            headers.push(("Range", format!("bytes={}", self.ranges.join(","))));
        }
        if let Some(date) = &self.if_modified_since {
            headers.push(("If-Modified-Since", format_http_date(date)));
        }
        if let Some(date) = &self.if_unmodified_since {
            headers.push(("If-Unmodified-Since", format_http_date(date)));
        }
        if let Some(etag) = &self.if_match {
            headers.push(("If-Match", etag.clone()));
        }
        if let Some(etag) = &self.if_none_match {
            headers.push(("If-None-Match", etag.clone()));
        }
        headers
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CopyOptions {
    pub metadata: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
}

impl CopyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_listing_query() {
        let options = ListContainerOptions::new()
            .prefix("photos/")
            .delimiter('/')
            .limit(100)
            .marker("photos/a.jpg");
        assert_eq!(
            options.to_pagination().to_query(),
            vec![
                ("format".to_string(), "json".to_string()),
                ("prefix".to_string(), "photos/".to_string()),
                ("delimiter".to_string(), "/".to_string()),
                ("limit".to_string(), "100".to_string()),
                ("marker".to_string(), "photos/a.jpg".to_string()),
            ]
        );
        assert_eq!(options.page_size(), 100);
        assert_eq!(ListContainerOptions::new().page_size(), DEFAULT_LISTING_LIMIT);
    }

    #[test]
    fn test_get_headers() {
        let date = Utc.with_ymd_and_hms(2014, 6, 30, 17, 34, 15).unwrap();
        let headers = GetOptions::new()
            .range(0, 5)
            .tail(10)
            .if_modified_since(date)
            .if_none_match("abc")
            .to_headers();
        assert_eq!(
            headers,
            vec![
                ("Range", "bytes=0-5,-10".to_string()),
                ("If-Modified-Since", "Mon, 30 Jun 2014 17:34:15 GMT".to_string()),
                ("If-None-Match", "abc".to_string()),
            ]
        );
        assert!(GetOptions::new().to_headers().is_empty());
    }
}
