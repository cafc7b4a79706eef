//! Platform error types

use thiserror::Error;

use crate::geometry::ElementId;

/// Errors reported by a scroll surface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The container is no longer part of the document
    #[error("Scroll container is detached from the document")]
    Detached,

    /// A thumb element handle does not refer to a live element
    #[error("Unknown element: {0}")]
    UnknownElement(ElementId),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
