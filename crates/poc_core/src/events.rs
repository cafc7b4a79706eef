//! Scroll change events
//!
//! A [`ScrollChangedEvent`] is created for every offset change a scrollbar
//! is about to apply and handed to the listeners registered for its type.
//! Listeners can veto the change with [`ScrollChangedEvent::prevent_default`]
//! and hide it from later listeners with
//! [`ScrollChangedEvent::stop_propagation`]. The two flags are independent.

use std::fmt;
use std::str::FromStr;

use poc_platform::{Axis, ElementId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

/// Errors raised to callers registering listeners
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The event name is not one of the recognized scroll events
    #[error("Unknown scroll event: {0:?}")]
    UnknownEvent(String),
}

/// The two recognized change event types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollEventType {
    /// Vertical offset changed
    ScrollTopChanged,
    /// Horizontal offset changed
    ScrollLeftChanged,
}

impl ScrollEventType {
    /// Canonical event name
    pub fn name(self) -> &'static str {
        match self {
            ScrollEventType::ScrollTopChanged => "scrollTopChanged",
            ScrollEventType::ScrollLeftChanged => "scrollLeftChanged",
        }
    }

    /// The event type reporting changes along an axis
    pub fn for_axis(axis: Axis) -> Self {
        match axis {
            Axis::Vertical => ScrollEventType::ScrollTopChanged,
            Axis::Horizontal => ScrollEventType::ScrollLeftChanged,
        }
    }
}

impl FromStr for ScrollEventType {
    type Err = EventError;

    /// Names match case-insensitively
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if name.eq_ignore_ascii_case("scrollTopChanged") {
            Ok(ScrollEventType::ScrollTopChanged)
        } else if name.eq_ignore_ascii_case("scrollLeftChanged") {
            Ok(ScrollEventType::ScrollLeftChanged)
        } else {
            Err(EventError::UnknownEvent(name.to_string()))
        }
    }
}

impl fmt::Display for ScrollEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An attempted offset change, passed to listeners
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollChangedEvent {
    event_type: ScrollEventType,
    target: Option<ElementId>,
    src_element: ElementId,
    old_value: f32,
    new_value: f32,
    timestamp: u64,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl ScrollChangedEvent {
    /// Create an event for a change from `old_value` to `new_value`
    ///
    /// `target` is the thumb of the changed axis (if one exists) and
    /// `src_element` the scroll container. `timestamp` is in milliseconds.
    pub fn new(
        event_type: ScrollEventType,
        target: Option<ElementId>,
        src_element: ElementId,
        old_value: f32,
        new_value: f32,
        timestamp: u64,
    ) -> Self {
        Self {
            event_type,
            target,
            src_element,
            old_value,
            new_value,
            timestamp,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn event_type(&self) -> ScrollEventType {
        self.event_type
    }

    pub fn target(&self) -> Option<ElementId> {
        self.target
    }

    pub fn src_element(&self) -> ElementId {
        self.src_element
    }

    pub fn old_value(&self) -> f32 {
        self.old_value
    }

    pub fn new_value(&self) -> f32 {
        self.new_value
    }

    /// `new_value - old_value`
    pub fn delta(&self) -> f32 {
        self.new_value - self.old_value
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Veto the offset change
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Skip the remaining listeners for this dispatch
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Handle returned by listener registration, used for removal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener callback
pub type ScrollListener = Box<dyn FnMut(&mut ScrollChangedEvent)>;

/// Ordered listener lists per event type
#[derive(Default)]
pub struct EventDispatcher {
    listeners: FxHashMap<ScrollEventType, SmallVec<[(ListenerId, ScrollListener); 2]>>,
    next_id: u64,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; listeners run in registration order
    pub fn add<F>(&mut self, event_type: ScrollEventType, listener: F) -> ListenerId
    where
        F: FnMut(&mut ScrollChangedEvent) + 'static,
    {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners
            .entry(event_type)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Remove a listener, returning whether it was registered
    pub fn remove(&mut self, event_type: ScrollEventType, id: ListenerId) -> bool {
        let Some(list) = self.listeners.get_mut(&event_type) else {
            return false;
        };
        let before = list.len();
        list.retain(|(listener_id, _)| *listener_id != id);
        before != list.len()
    }

    /// Number of listeners for an event type
    pub fn len(&self, event_type: ScrollEventType) -> usize {
        self.listeners.get(&event_type).map_or(0, |list| list.len())
    }

    /// Whether no listener is registered for any type
    pub fn is_empty(&self) -> bool {
        self.listeners.values().all(|list| list.is_empty())
    }

    /// Run the listeners for `event`'s type until one stops propagation
    pub fn dispatch(&mut self, event: &mut ScrollChangedEvent) {
        let Some(list) = self.listeners.get_mut(&event.event_type) else {
            return;
        };
        for (_, listener) in list.iter_mut() {
            if event.propagation_stopped {
                break;
            }
            listener(event);
        }
        if event.default_prevented {
            tracing::debug!(
                event = %event.event_type,
                old = event.old_value,
                new = event.new_value,
                "scroll change vetoed by listener"
            );
        }
    }

    /// Drop every listener
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}
