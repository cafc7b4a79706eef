//! Error types for poc_scrollbar

use poc_core::EventError;
use poc_platform::PlatformError;
use thiserror::Error;

/// Errors returned to callers of a scrollbar
///
/// Only usage and setup problems surface here. Input handling and timer
/// work never fail; they log and carry on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScrollbarError {
    /// Listener registration with an unrecognized event name
    #[error(transparent)]
    Event(#[from] EventError),

    /// Options that could not be parsed
    #[error("Invalid scrollbar options: {0}")]
    Config(String),

    /// The process-wide input environment was already installed
    #[error("Input environment already initialized")]
    EnvironmentAlreadySet,

    /// The host surface refused an operation during setup
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Result type for poc_scrollbar operations
pub type Result<T> = std::result::Result<T, ScrollbarError>;
