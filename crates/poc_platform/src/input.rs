//! Input event types for wheel, mouse, and touch

use serde::Deserialize;

use crate::geometry::ElementId;

/// Input events delivered to a scrollbar
#[derive(Clone, Debug)]
pub enum InputEvent {
    /// Wheel event
    Wheel(WheelEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Touch event (mobile/touchscreen)
    Touch(TouchEvent),
}

// ============================================================================
// Wheel Events
// ============================================================================

/// Unit of a wheel event's deltas
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaMode {
    /// Deltas are pixels
    #[default]
    Pixel,
    /// Deltas are text lines
    Line,
    /// Deltas are whole pages
    Page,
}

/// Wheel / trackpad scroll event
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelEvent {
    /// Horizontal delta
    pub delta_x: f32,
    /// Vertical delta
    pub delta_y: f32,
    /// Unit of both deltas
    pub delta_mode: DeltaMode,
    /// Modifier keys held during this event
    pub modifiers: Modifiers,
}

impl WheelEvent {
    /// Create a pixel-mode wheel event
    pub fn pixels(delta_x: f32, delta_y: f32) -> Self {
        Self {
            delta_x,
            delta_y,
            ..Default::default()
        }
    }

    /// Set the delta unit
    pub fn with_mode(mut self, delta_mode: DeltaMode) -> Self {
        self.delta_mode = delta_mode;
        self
    }

    /// Set modifier keys
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Modifier key state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key is held
    pub shift: bool,
    /// Control key is held
    pub ctrl: bool,
    /// Alt key is held (Option on macOS)
    pub alt: bool,
    /// Meta key is held (Command on macOS, Windows key on Windows)
    pub meta: bool,
}

impl Modifiers {
    /// Only shift held
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

// ============================================================================
// Mouse Events
// ============================================================================

/// Mouse events
#[derive(Clone, Debug)]
pub enum MouseEvent {
    /// Mouse moved to position
    Moved {
        /// X position in client coordinates
        x: f32,
        /// Y position in client coordinates
        y: f32,
    },
    /// Mouse button pressed
    ButtonPressed {
        /// Which button was pressed
        button: MouseButton,
        /// X position when pressed
        x: f32,
        /// Y position when pressed
        y: f32,
    },
    /// Mouse button released
    ButtonReleased {
        /// Which button was released
        button: MouseButton,
        /// X position when released
        x: f32,
        /// Y position when released
        y: f32,
    },
    /// Mouse left the document
    Left,
}

/// Mouse buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (scroll wheel click)
    Middle,
    /// Other button with index
    Other(u16),
}

// ============================================================================
// Touch Events
// ============================================================================

/// Touch events for touchscreens
#[derive(Clone, Debug)]
pub enum TouchEvent {
    /// A touch started
    Started {
        /// Unique identifier for this touch
        id: u64,
        /// X position in client coordinates
        x: f32,
        /// Y position in client coordinates
        y: f32,
    },
    /// A touch moved
    Moved {
        /// Unique identifier for this touch
        id: u64,
        /// X position in client coordinates
        x: f32,
        /// Y position in client coordinates
        y: f32,
    },
    /// A touch ended
    Ended {
        /// Unique identifier for this touch
        id: u64,
    },
    /// A touch left the touch surface
    Left {
        /// Unique identifier for this touch
        id: u64,
    },
    /// A touch was cancelled (e.g., by system gesture)
    Cancelled {
        /// Unique identifier for this touch
        id: u64,
    },
}

impl TouchEvent {
    /// Get the touch ID
    pub fn id(&self) -> u64 {
        match self {
            TouchEvent::Started { id, .. }
            | TouchEvent::Moved { id, .. }
            | TouchEvent::Ended { id }
            | TouchEvent::Left { id }
            | TouchEvent::Cancelled { id } => *id,
        }
    }

    /// Whether this event terminates the touch
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TouchEvent::Ended { .. } | TouchEvent::Left { .. } | TouchEvent::Cancelled { .. }
        )
    }
}

/// Computed `touch-action` of the touched surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TouchAction {
    #[default]
    Auto,
    Manipulation,
    PanX,
    PanY,
    None,
}

impl TouchAction {
    /// Whether panning along x may scroll the container
    pub fn allows_pan_x(self) -> bool {
        matches!(
            self,
            TouchAction::Auto | TouchAction::Manipulation | TouchAction::PanX
        )
    }

    /// Whether panning along y may scroll the container
    pub fn allows_pan_y(self) -> bool {
        matches!(
            self,
            TouchAction::Auto | TouchAction::Manipulation | TouchAction::PanY
        )
    }
}

// ============================================================================
// Routing
// ============================================================================

/// Identifies one pointer across a press-move-release sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerId {
    /// The mouse
    Mouse,
    /// A touch point
    Touch(u64),
}

/// Where the host's hit test placed an input event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputTarget {
    /// The scroll container (or one of its content descendants)
    Container,
    /// A specific element, e.g. a thumb
    Element(ElementId),
    /// Anywhere else in the document (global move/release listeners)
    #[default]
    Document,
}

/// Routing information accompanying an input event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputContext {
    /// Hit-test target
    pub target: InputTarget,
    /// Whether an earlier handler already suppressed the default action
    pub default_prevented: bool,
}

impl InputContext {
    /// Event hit the container
    pub fn container() -> Self {
        Self {
            target: InputTarget::Container,
            default_prevented: false,
        }
    }

    /// Event hit a specific element
    pub fn element(id: ElementId) -> Self {
        Self {
            target: InputTarget::Element(id),
            default_prevented: false,
        }
    }

    /// Event delivered to a document-level listener
    pub fn document() -> Self {
        Self::default()
    }

    /// Mark the event as already default-prevented
    pub fn prevented(mut self) -> Self {
        self.default_prevented = true;
        self
    }
}

/// What the host should do with the native event after a handler ran
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventResponse {
    /// Let the native default action happen
    #[default]
    Ignored,
    /// Suppress the native default action (scroll, text selection, drag)
    PreventDefault,
}

impl EventResponse {
    /// Combine two responses; prevention wins
    pub fn or(self, other: EventResponse) -> EventResponse {
        if self == EventResponse::PreventDefault || other == EventResponse::PreventDefault {
            EventResponse::PreventDefault
        } else {
            EventResponse::Ignored
        }
    }

    /// Whether the native default must be suppressed
    pub fn is_prevented(self) -> bool {
        self == EventResponse::PreventDefault
    }
}
