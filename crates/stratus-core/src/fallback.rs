//! Conventions for turning "absent" responses into ordinary values
//!
//! Provider APIs treat a 404 on GET as "no such resource", a 404 on DELETE as
//! "nothing to delete" and a 409 on DELETE as "still in use". These helpers
//! keep that translation in one place.

use crate::error::{Error, Result};

pub trait Fallback<T> {
    /// 404 becomes `None`
    fn or_none_on_not_found(self) -> Result<Option<T>>;

    /// 404 becomes the default value (an empty list, usually)
    fn or_empty_on_not_found(self) -> Result<T>
    where
        T: Default;
}

impl<T> Fallback<T> for Result<T> {
    fn or_none_on_not_found(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn or_empty_on_not_found(self) -> Result<T>
    where
        T: Default,
    {
        match self {
            Ok(value) => Ok(value),
            Err(e) if e.is_not_found() => Ok(T::default()),
            Err(e) => Err(e),
        }
    }
}

/// Success flag for calls whose response body carries nothing of interest
pub trait BoolFallback {
    /// Success becomes `true`, 404 becomes `false`
    fn or_false_on_not_found(self) -> Result<bool>;

    /// Success becomes `true`, 409 becomes `false`
    fn or_false_on_conflict(self) -> Result<bool>;
}

impl<T> BoolFallback for Result<T> {
    fn or_false_on_not_found(self) -> Result<bool> {
        match self {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn or_false_on_conflict(self) -> Result<bool> {
        match self {
            Ok(_) => Ok(true),
            Err(Error::IllegalState(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::{Method, StatusCode};

    use super::*;
    use crate::error::HttpFailure;

    fn err(status: StatusCode) -> Error {
        Error::from_failure(HttpFailure {
            method: Method::DELETE,
            url: "http://localhost/x".to_string(),
            status,
            body: String::new(),
        })
    }

    #[test]
    fn test_none_on_not_found() {
        let ok: Result<u32> = Ok(7);
        assert_eq!(ok.or_none_on_not_found().unwrap(), Some(7));

        let missing: Result<u32> = Err(err(StatusCode::NOT_FOUND));
        assert_eq!(missing.or_none_on_not_found().unwrap(), None);

        let broken: Result<u32> = Err(err(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(broken.or_none_on_not_found().is_err());
    }

    #[test]
    fn test_empty_on_not_found() {
        let missing: Result<Vec<String>> = Err(err(StatusCode::NOT_FOUND));
        assert!(missing.or_empty_on_not_found().unwrap().is_empty());
    }

    #[test]
    fn test_false_on_not_found() {
        let ok: Result<()> = Ok(());
        assert!(ok.or_false_on_not_found().unwrap());

        let missing: Result<()> = Err(err(StatusCode::NOT_FOUND));
        assert!(!missing.or_false_on_not_found().unwrap());

        let conflict: Result<()> = Err(err(StatusCode::CONFLICT));
        assert!(conflict.or_false_on_not_found().is_err());
    }

    #[test]
    fn test_false_on_conflict() {
        let conflict: Result<()> = Err(err(StatusCode::CONFLICT));
        assert!(!conflict.or_false_on_conflict().unwrap());

        let missing: Result<()> = Err(err(StatusCode::NOT_FOUND));
        assert!(missing.or_false_on_conflict().is_err());
    }
}
