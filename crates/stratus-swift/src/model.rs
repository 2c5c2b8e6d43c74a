//! Swift data model

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use stratus_core::Payload;

// ============================================================================
// Timestamps
// ============================================================================

const LISTING_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Listing timestamps carry no zone and are always UTC: `2014-06-30T17:34:15.640240`
pub fn parse_listing_timestamp(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, LISTING_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// `Last-Modified` and friends use HTTP-date: `Mon, 30 Jun 2014 17:34:15 GMT`
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

pub fn format_http_date(date: &DateTime<Utc>) -> String {
    date.format(HTTP_DATE_FORMAT).to_string()
}

fn deserialize_listing_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(parse_listing_timestamp))
}

// ============================================================================
// Account
// ============================================================================

pub const TEMP_URL_KEY: &str = "temp-url-key";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Account {
    pub container_count: u64,
    pub object_count: u64,
    pub bytes_used: u64,
    pub metadata: BTreeMap<String, String>,
}

impl Account {
    /// The key used to sign temporary URLs, if one is set
    pub fn temporary_url_key(&self) -> Option<&str> {
        self.metadata.get(TEMP_URL_KEY).map(String::as_str)
    }
}

// ============================================================================
// Container
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Container {
    pub name: String,
    #[serde(rename = "count", default)]
    pub object_count: u64,
    #[serde(rename = "bytes", default)]
    pub bytes_used: u64,
    /// Only known from a `HEAD`, listings do not carry the ACL
    #[serde(skip)]
    pub anybody_read: Option<bool>,
    #[serde(skip)]
    pub metadata: BTreeMap<String, String>,
}

// ============================================================================
// Objects
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct SwiftObject {
    pub name: String,
    pub uri: String,
    pub etag: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub metadata: BTreeMap<String, String>,
    /// Response headers other than user metadata, lower-cased
    pub headers: BTreeMap<String, String>,
    /// Present on `get`, absent on `HEAD` and in listings
    pub payload: Option<Payload>,
}

/// One page of a container listing
#[derive(Clone, Debug, Default)]
pub struct ObjectList {
    pub container: Container,
    pub objects: Vec<SwiftObject>,
    /// Pseudo-directories returned when listing with a delimiter
    pub subdirs: Vec<String>,
}

/// Raw entry of a JSON container listing
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListEntry {
    Subdir {
        subdir: String,
    },
    Object {
        name: String,
        #[serde(default)]
        hash: String,
        #[serde(default)]
        bytes: u64,
        #[serde(default)]
        content_type: Option<String>,
        #[serde(default, deserialize_with = "deserialize_listing_timestamp")]
        last_modified: Option<DateTime<Utc>>,
    },
}

impl ListEntry {
    pub fn name(&self) -> &str {
        match self {
            ListEntry::Subdir { subdir } => subdir,
            ListEntry::Object { name, .. } => name,
        }
    }
}

// ============================================================================
// Bulk operations
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    Tar,
    TarGz,
    TarBz2,
}

impl ArchiveFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::TarBz2 => "tar.bz2",
        }
    }
}

fn deserialize_bulk_errors<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    // [[path, status], ...]
    let pairs: Option<Vec<Vec<String>>> = Option::deserialize(deserializer)?;
    Ok(pairs
        .unwrap_or_default()
        .into_iter()
        .filter_map(|pair| {
            let mut pair = pair.into_iter();
            Some((pair.next()?, pair.next().unwrap_or_default()))
        })
        .collect())
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ExtractArchiveResponse {
    #[serde(rename = "Number Files Created", default)]
    pub created: u64,
    /// Failed paths and their status lines
    #[serde(rename = "Errors", default, deserialize_with = "deserialize_bulk_errors")]
    pub errors: BTreeMap<String, String>,
    #[serde(rename = "Response Status", default)]
    pub response_status: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BulkDeleteResponse {
    #[serde(rename = "Number Deleted", default)]
    pub deleted: u64,
    #[serde(rename = "Number Not Found", default)]
    pub not_found: u64,
    #[serde(rename = "Errors", default, deserialize_with = "deserialize_bulk_errors")]
    pub errors: BTreeMap<String, String>,
    #[serde(rename = "Response Status", default)]
    pub response_status: String,
}

// ============================================================================
// Large objects
// ============================================================================

/// A segment of a static large object manifest.
///
/// Manifests are uploaded as `{path, etag, size_bytes}` but read back as
/// `{name, hash, bytes}`; both spellings are accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(alias = "name")]
    pub path: String,
    #[serde(alias = "hash")]
    pub etag: String,
    #[serde(alias = "bytes")]
    pub size_bytes: u64,
}

impl Segment {
    /// A segment stored as `/{container}/{object}`
    pub fn new(container: &str, object: &str, etag: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            path: format!("/{}/{}", container, object),
            etag: etag.into(),
            size_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_parse_listing_timestamp() {
        let date = parse_listing_timestamp("2014-06-30T17:34:15.640240").unwrap();
        assert_eq!(date.year(), 2014);
        assert_eq!(date.second(), 15);
        assert_eq!(date.timestamp_subsec_micros(), 640240);

        assert!(parse_listing_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_http_date() {
        let date = parse_http_date("Mon, 30 Jun 2014 17:34:15 GMT").unwrap();
        assert_eq!(date.hour(), 17);
        assert_eq!(format_http_date(&date), "Mon, 30 Jun 2014 17:34:15 GMT");
    }

    #[test]
    fn test_list_entries() {
        let entries: Vec<ListEntry> = serde_json::from_str(
            r#"[
                {"subdir": "photos/2014/"},
                {
                    "hash": "b9f8e4a7bc4d2c5b4aa07b1e8ce98a6a",
                    "last_modified": "2014-06-30T17:34:15.640240",
                    "bytes": 512,
                    "name": "photos/cat.jpg",
                    "content_type": "image/jpeg"
                }
            ]"#,
        )
        .unwrap();
        assert_eq!(entries[0].name(), "photos/2014/");
        match &entries[1] {
            ListEntry::Object {
                name,
                bytes,
                last_modified,
                ..
            } => {
                assert_eq!(name, "photos/cat.jpg");
                assert_eq!(*bytes, 512);
                assert!(last_modified.is_some());
            }
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_bulk_delete_response() {
        let response: BulkDeleteResponse = serde_json::from_str(
            r#"{
                "Number Not Found": 1,
                "Response Status": "400 Bad Request",
                "Errors": [["/photos/locked.jpg", "409 Conflict"]],
                "Number Deleted": 2,
                "Response Body": ""
            }"#,
        )
        .unwrap();
        assert_eq!(response.deleted, 2);
        assert_eq!(response.not_found, 1);
        assert_eq!(
            response.errors.get("/photos/locked.jpg").map(String::as_str),
            Some("409 Conflict")
        );
    }

    #[test]
    fn test_extract_archive_response() {
        let response: ExtractArchiveResponse = serde_json::from_str(
            r#"{"Number Files Created": 10, "Errors": [], "Response Status": "201 Created", "Response Body": ""}"#,
        )
        .unwrap();
        assert_eq!(response.created, 10);
        assert!(response.errors.is_empty());
    }

    #[test]
    fn test_segment_spellings() {
        let uploaded = serde_json::to_value(Segment::new("segments", "big/1", "abc", 1024)).unwrap();
        assert_eq!(
            uploaded,
            serde_json::json!({"path": "/segments/big/1", "etag": "abc", "size_bytes": 1024})
        );

        let read_back: Segment =
            serde_json::from_str(r#"{"name": "/segments/big/1", "hash": "abc", "bytes": 1024, "content_type": "application/octet-stream"}"#)
                .unwrap();
        assert_eq!(read_back, Segment::new("segments", "big/1", "abc", 1024));
    }
}
