//! Process-wide input environment
//!
//! Host capabilities detected once at startup: how tall a wheel "line" is
//! and whether the host can report structural mutations. Scrollbars read
//! the global value at construction unless one is injected with
//! [`Scrollbar::with_environment`](crate::Scrollbar::with_environment).

use std::sync::OnceLock;

use crate::error::{Result, ScrollbarError};

// ============================================================================
// Global Input Environment
// ============================================================================

static GLOBAL_ENVIRONMENT: OnceLock<InputEnvironment> = OnceLock::new();

/// Install the process-wide input environment
///
/// Call once at startup, before creating scrollbars. A second call fails
/// with [`ScrollbarError::EnvironmentAlreadySet`] and leaves the first
/// value in place.
pub fn set_global_environment(environment: InputEnvironment) -> Result<()> {
    GLOBAL_ENVIRONMENT
        .set(environment)
        .map_err(|_| ScrollbarError::EnvironmentAlreadySet)
}

/// Check if the global environment has been installed
pub fn is_environment_initialized() -> bool {
    GLOBAL_ENVIRONMENT.get().is_some()
}

/// Host capabilities relevant to input conversion
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputEnvironment {
    /// Pixels per line for line-mode wheel deltas
    pub line_height: f32,
    /// Whether the host can deliver mutation notifications
    pub supports_mutation_observer: bool,
}

impl Default for InputEnvironment {
    fn default() -> Self {
        Self {
            line_height: 16.0,
            supports_mutation_observer: true,
        }
    }
}

impl InputEnvironment {
    /// The installed global environment, or the default one
    pub fn current() -> Self {
        GLOBAL_ENVIRONMENT.get().copied().unwrap_or_default()
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_mutation_observer(mut self, supported: bool) -> Self {
        self.supports_mutation_observer = supported;
        self
    }
}
