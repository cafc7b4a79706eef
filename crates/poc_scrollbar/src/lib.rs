//! poc Overlay Scrollbars
//!
//! Synthetic scrollbar thumbs drawn over a scroll container whose native
//! scrollbars are hidden, kept in sync with wheel, touch and thumb-drag
//! input and with changes to the container's content.
//!
//! # Architecture
//!
//! - [`Scrollbar`] - Owns the offsets, routes input, runs geometry checks
//! - [`ThumbView`] - Sizes and positions the thumbs, turns drags into offset requests
//! - [`geometry`] - Thumb length, scale factor, track position and wheel delta math
//! - [`ScrollbarOptions`] - Every recognized option with its default
//! - [`InputEnvironment`] - Process-wide host capabilities
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use poc_platform::{Axis, HeadlessSurface};
//! use poc_scrollbar::prelude::*;
//!
//! let surface = HeadlessSurface::new(100.0, 100.0, 200.0, 200.0);
//! let options = ScrollbarOptions::default().element_class(Axis::Vertical, "scrollbar");
//! let mut scrollbar = Scrollbar::new(surface, options).unwrap();
//!
//! scrollbar
//!     .add_event_listener("scrollTopChanged", |event| {
//!         if event.new_value() > 80.0 {
//!             event.prevent_default();
//!         }
//!     })
//!     .unwrap();
//!
//! assert_eq!(scrollbar.set_scroll_top(50.0), 50.0);
//! assert_eq!(scrollbar.set_scroll_top(90.0), 90.0);
//! assert_eq!(scrollbar.scroll_top(), 50.0);
//!
//! // content grew; the next poll picks it up
//! scrollbar.surface_mut().set_content_size(200.0, 400.0);
//! scrollbar.tick(Duration::from_millis(300));
//! assert_eq!(scrollbar.view().thumb(Axis::Vertical).unwrap().length(), 25.0);
//! ```

pub mod config;
pub mod controller;
pub mod environment;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod style;
pub mod view;

pub use config::{ClassList, ScrollbarOptions, ThumbOptions, DEFAULT_CHECK_INTERVAL_MS};
pub use controller::{Lifecycle, Scrollbar};
pub use environment::{is_environment_initialized, set_global_environment, InputEnvironment};
pub use error::{Result, ScrollbarError};
pub use geometry::ScrollOffsets;
pub use gesture::{GestureId, GestureMove, GestureTracker, OffsetRequest};
pub use view::{Thumb, ThumbView};

pub use poc_core::{ListenerId, ScrollChangedEvent, ScrollEventType};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ClassList, ScrollbarOptions};
    pub use crate::controller::{Lifecycle, Scrollbar};
    pub use crate::environment::InputEnvironment;
    pub use crate::error::{Result, ScrollbarError};
    pub use crate::view::ThumbView;
    pub use poc_core::{ListenerId, ScrollChangedEvent, ScrollEventType};
}
