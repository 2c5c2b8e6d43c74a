//! Temporary URL signing
//!
//! A temporary URL grants time-limited access to one object without a token.
//! The signature is an HMAC-SHA256, keyed with the account's
//! `Temp-Url-Key`, over `"{METHOD}\n{expires}\n{path}"` where `path` is the
//! decoded object path, as Swift compares it.

use std::fmt;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use percent_encoding::percent_decode_str;
use reqwest::Method;
use sha2::Sha256;
use stratus_core::Error;

use crate::error::Result;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct TemporaryUrlSigner {
    key: String,
}

impl fmt::Debug for TemporaryUrlSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryUrlSigner").finish_non_exhaustive()
    }
}

impl TemporaryUrlSigner {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// `object_url` with `temp_url_sig` and `temp_url_expires` appended
    pub fn sign(&self, method: &Method, object_url: &str, expires_at: DateTime<Utc>) -> Result<String> {
        let url = url::Url::parse(object_url)
            .map_err(|e| Error::InvalidConfig(format!("invalid object URL {object_url}: {e}")))?;
        let path = percent_decode_str(url.path())
            .decode_utf8()
            .map_err(|e| Error::InvalidConfig(format!("object path is not UTF-8: {e}")))?;
        let expires = expires_at.timestamp();
        let signature = self.signature(method, expires, &path)?;

        let separator = if object_url.contains('?') { '&' } else { '?' };
        Ok(format!(
            "{object_url}{separator}temp_url_sig={signature}&temp_url_expires={expires}"
        ))
    }

    fn signature(&self, method: &Method, expires: i64, path: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.key.as_bytes())
            .map_err(|e| Error::InvalidConfig(format!("invalid temporary URL key: {e}")))?;
        mac.update(format!("{}\n{}\n{}", method.as_str(), expires, path).as_bytes());
        Ok(const_hex::encode(mac.finalize().into_bytes()))
    }
}
