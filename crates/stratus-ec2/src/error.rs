//! EC2 error types and fallbacks
//!
//! EC2 reports most failures as `400 Bad Request` with an XML body naming
//! the error code, so not-found is recognised by code rather than status.

use reqwest::StatusCode;
use serde::Deserialize;

/// Errors returned by the EC2 bindings
#[derive(Debug, thiserror::Error)]
pub enum Ec2Error {
    #[error("EC2 returned {code} ({}): {message}", .status.as_u16())]
    Aws {
        status: StatusCode,
        code: String,
        message: String,
        request_id: Option<String>,
    },

    #[error("failed to parse EC2 response: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error(transparent)]
    Core(stratus_core::Error),
}

pub type Result<T> = std::result::Result<T, Ec2Error>;

impl Ec2Error {
    /// The AWS error code, if the service sent one
    pub fn code(&self) -> Option<&str> {
        match self {
            Ec2Error::Aws { code, .. } => Some(code),
            _ => None,
        }
    }

    /// `InvalidVpcID.NotFound`, `InvalidAMIID.NotFound`, a bare 404 and so on
    pub fn is_not_found(&self) -> bool {
        match self {
            Ec2Error::Aws { code, status, .. } => {
                code.ends_with("NotFound") || *status == StatusCode::NOT_FOUND
            }
            Ec2Error::Core(e) => e.is_not_found(),
            Ec2Error::Xml(_) => false,
        }
    }
}

impl From<stratus_core::Error> for Ec2Error {
    fn from(error: stratus_core::Error) -> Self {
        let parsed = error
            .failure()
            .and_then(|failure| parse_error_response(&failure.body).map(|e| (failure.status, e)));
        match parsed {
            Some((status, response)) => {
                let detail = response.errors.error.into_iter().next().unwrap_or_default();
                Ec2Error::Aws {
                    status,
                    code: detail.code,
                    message: detail.message,
                    request_id: response.request_id,
                }
            }
            None => Ec2Error::Core(error),
        }
    }
}

// ============================================================================
// Error document
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorResponse {
    #[serde(rename = "Errors")]
    errors: ErrorList,
    #[serde(rename = "RequestID", alias = "RequestId")]
    request_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorList {
    #[serde(rename = "Error")]
    error: Vec<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ErrorDetail {
    code: String,
    message: String,
}

fn parse_error_response(body: &str) -> Option<ErrorResponse> {
    let response: ErrorResponse = quick_xml::de::from_str(body).ok()?;
    if response.errors.error.is_empty() {
        None
    } else {
        Some(response)
    }
}

// ============================================================================
// Fallbacks
// ============================================================================

/// Not-found translation for EC2 results, matching error codes as well as 404
pub trait Ec2Fallback<T> {
    /// Not-found becomes the default value (an empty list, usually)
    fn or_empty_on_not_found(self) -> Result<T>
    where
        T: Default;

    /// Not-found becomes `false`
    fn or_false_on_not_found(self) -> Result<bool>
    where
        T: Into<bool>;
}

impl<T> Ec2Fallback<T> for Result<T> {
    fn or_empty_on_not_found(self) -> Result<T>
    where
        T: Default,
    {
        match self {
            Err(e) if e.is_not_found() => Ok(T::default()),
            other => other,
        }
    }

    fn or_false_on_not_found(self) -> Result<bool>
    where
        T: Into<bool>,
    {
        match self {
            Ok(value) => Ok(value.into()),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
