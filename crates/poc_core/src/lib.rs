//! poc Core Runtime
//!
//! This crate provides the primitives a scrollbar overlay is assembled from:
//!
//! - **Change Events**: `scrollTopChanged` / `scrollLeftChanged` events with
//!   veto and propagation control, dispatched to ordered listener lists
//! - **Timers**: Virtual-time interval and one-shot timers plus a debouncer,
//!   driven by the host's frame ticks
//! - **Teardown**: A registry of disposable handles so that destroying an
//!   owner reaches every outstanding timer and gesture
//!
//! # Example
//!
//! ```rust
//! use poc_core::events::{EventDispatcher, ScrollChangedEvent, ScrollEventType};
//! use poc_platform::ElementId;
//!
//! let mut dispatcher = EventDispatcher::new();
//! dispatcher.add(ScrollEventType::ScrollTopChanged, |event| {
//!     if event.new_value() > 100.0 {
//!         event.prevent_default();
//!     }
//! });
//!
//! let mut event = ScrollChangedEvent::new(
//!     ScrollEventType::ScrollTopChanged,
//!     None,
//!     ElementId::CONTAINER,
//!     0.0,
//!     150.0,
//!     0,
//! );
//! dispatcher.dispatch(&mut event);
//! assert!(event.default_prevented());
//! ```

pub mod events;
pub mod teardown;
pub mod timer;

pub use events::{
    EventDispatcher, EventError, ListenerId, ScrollChangedEvent, ScrollEventType, ScrollListener,
};
pub use teardown::{TeardownKey, TeardownList};
pub use timer::{Debouncer, TimerId, TimerQueue};
