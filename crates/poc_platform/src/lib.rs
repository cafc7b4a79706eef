//! poc Platform Abstraction Layer
//!
//! This crate provides the host-facing types a scrollbar overlay needs:
//! a scrollable container, the thumb elements drawn over it, and the
//! input events that move it.
//!
//! # Architecture
//!
//! - [`ScrollSurface`] - The scroll container and its child elements
//! - [`InputEvent`] - Wheel, mouse and touch input pushed in by the host
//! - [`InputContext`] / [`EventResponse`] - Routing in, default-prevention out
//!
//! # Hosts
//!
//! - [`HeadlessSurface`] - In-memory container for tests and tooling
//! - Browser and native toolkits implement [`ScrollSurface`] on their own
//!   container handle
//!
//! # Example
//!
//! ```
//! use poc_platform::{Axis, HeadlessSurface, ScrollSurface};
//!
//! let mut surface = HeadlessSurface::new(100.0, 100.0, 100.0, 300.0);
//! surface.set_scroll_offset(Axis::Vertical, 500.0);
//! assert_eq!(surface.scroll_offset(Axis::Vertical), 200.0);
//! ```

mod error;
mod geometry;
mod headless;
mod input;
mod surface;

// Re-export all public types
pub use error::{PlatformError, Result};
pub use geometry::{Axis, ElementId, ViewportGeometry};
pub use headless::{HeadlessElement, HeadlessSurface};
pub use input::{
    DeltaMode, EventResponse, InputContext, InputEvent, InputTarget, Modifiers, MouseButton,
    MouseEvent, PointerId, TouchAction, TouchEvent, WheelEvent,
};
pub use surface::ScrollSurface;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::geometry::{Axis, ElementId, ViewportGeometry};
    pub use crate::input::{
        DeltaMode, EventResponse, InputContext, InputEvent, InputTarget, Modifiers, MouseButton,
        MouseEvent, PointerId, TouchAction, TouchEvent, WheelEvent,
    };
    pub use crate::surface::ScrollSurface;
}
