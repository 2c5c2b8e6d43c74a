//! Error types shared by every stratus binding

use std::fmt;

use reqwest::{Method, StatusCode};

/// A non-2xx response, kept with enough context to explain the failed call
#[derive(Clone, Debug)]
pub struct HttpFailure {
    pub method: Method,
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

impl fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} failed with status {}",
            self.method,
            self.url,
            self.status.as_u16()
        )?;
        if !self.body.is_empty() {
            write!(f, ": {}", self.body)?;
        }
        Ok(())
    }
}

/// Errors that can occur while talking to a cloud provider
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("resource not found: {0}")]
    ResourceNotFound(HttpFailure),

    #[error("authorization failed: {0}")]
    Authorization(HttpFailure),

    #[error("illegal state: {0}")]
    IllegalState(HttpFailure),

    #[error("request failed: {0}")]
    Response(HttpFailure),

    #[error("no endpoint for service type {service_type} in region {}", .region.as_deref().unwrap_or("<any>"))]
    NoEndpoint {
        service_type: String,
        region: Option<String>,
    },

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Classify a failed response the way every binding expects
    pub fn from_failure(failure: HttpFailure) -> Self {
        match failure.status {
            StatusCode::NOT_FOUND => Error::ResourceNotFound(failure),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Authorization(failure),
            StatusCode::CONFLICT => Error::IllegalState(failure),
            _ => Error::Response(failure),
        }
    }

    /// The failed response behind this error, if there was one
    pub fn failure(&self) -> Option<&HttpFailure> {
        match self {
            Error::ResourceNotFound(f)
            | Error::Authorization(f)
            | Error::IllegalState(f)
            | Error::Response(f) => Some(f),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.failure().map(|f| f.status)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ResourceNotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::IllegalState(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(status: u16, body: &str) -> HttpFailure {
        HttpFailure {
            method: Method::GET,
            url: "http://localhost/v2.0/routers/r1".to_string(),
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_from_failure_classification() {
        assert!(Error::from_failure(failure(404, "")).is_not_found());
        assert!(Error::from_failure(failure(409, "")).is_conflict());
        assert!(matches!(
            Error::from_failure(failure(401, "")),
            Error::Authorization(_)
        ));
        assert!(matches!(
            Error::from_failure(failure(403, "")),
            Error::Authorization(_)
        ));
        assert!(matches!(
            Error::from_failure(failure(500, "")),
            Error::Response(_)
        ));
    }

    #[test]
    fn test_error_display() {
        let err = Error::from_failure(failure(404, "no such router"));
        assert_eq!(
            err.to_string(),
            "resource not found: GET http://localhost/v2.0/routers/r1 failed with status 404: no such router"
        );

        let err = Error::NoEndpoint {
            service_type: "network".to_string(),
            region: None,
        };
        assert_eq!(
            err.to_string(),
            "no endpoint for service type network in region <any>"
        );
    }

    #[test]
    fn test_status_accessor() {
        let err = Error::from_failure(failure(503, "busy"));
        assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(Error::Parse("bad".to_string()).status(), None);
    }
}
