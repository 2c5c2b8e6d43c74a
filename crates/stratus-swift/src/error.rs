//! Swift error types

/// Errors returned by the Swift bindings
#[derive(Debug, thiserror::Error)]
pub enum SwiftError {
    #[error("container {0} not found")]
    ContainerNotFound(String),

    #[error("failed to copy {source_path} to {destination_path}: {cause}")]
    CopyObject {
        source_path: String,
        destination_path: String,
        #[source]
        cause: stratus_core::Error,
    },

    #[error(transparent)]
    Core(#[from] stratus_core::Error),
}

pub type Result<T> = std::result::Result<T, SwiftError>;

impl SwiftError {
    pub fn is_not_found(&self) -> bool {
        match self {
            SwiftError::ContainerNotFound(_) | SwiftError::CopyObject { .. } => true,
            SwiftError::Core(e) => e.is_not_found(),
        }
    }
}
