//! Stratus Core - REST dispatch shared by the cloud API bindings
//!
//! This crate provides:
//! - `RestClient` with pluggable authentication, retries, and error translation
//! - Typed errors and 404/409 fallback conventions
//! - Lazy marker/limit pagination
//! - Client configuration and provider settings loading

pub mod config;
pub mod error;
pub mod fallback;
pub mod http;
pub mod pagination;
pub mod retry;

pub use crate::config::{ClientConfig, ProviderSettings};
pub use error::{Error, HttpFailure, Result};
pub use fallback::{BoolFallback, Fallback};
pub use crate::http::{
    Authenticator, NoAuth, Payload, RestClient, RestRequest, RestResponse, encode_component,
    encode_path,
};
pub use pagination::{Page, PaginationOptions, paginate};
pub use retry::RetryConfig;
