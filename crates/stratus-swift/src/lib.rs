//! Stratus Swift - OpenStack Object Storage v1 bindings
//!
//! This crate provides:
//! - Account, container and object operations with header-encoded metadata
//! - Lazy container and object listings
//! - Bulk archive extraction and bulk delete
//! - Static and dynamic large objects
//! - Temporary URL signing
//!
//! # Example
//!
//! ```ignore
//! use stratus_core::Payload;
//! use stratus_swift::SwiftApi;
//! use stratus_swift::options::{CreateContainerOptions, PutOptions};
//!
//! let swift = SwiftApi::from_session(&session, Some("RegionOne"))?;
//! swift.container_api().create("photos", &CreateContainerOptions::new()).await?;
//! let etag = swift
//!     .object_api("photos")
//!     .put("cat.jpg", Payload::new(bytes), &PutOptions::new().verify_checksum())
//!     .await?;
//! ```

mod api;
mod metadata;
pub mod account;
pub mod bulk;
pub mod container;
pub mod error;
pub mod large_object;
pub mod model;
pub mod object;
pub mod options;
pub mod temp_url;

pub use account::AccountApi;
pub use api::{SERVICE_TYPE, SwiftApi};
pub use bulk::BulkApi;
pub use container::ContainerApi;
pub use error::{Result, SwiftError};
pub use large_object::{DynamicLargeObjectApi, StaticLargeObjectApi};
pub use object::ObjectApi;
pub use temp_url::TemporaryUrlSigner;
