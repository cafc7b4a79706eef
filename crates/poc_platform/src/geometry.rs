//! Axes, element handles, and viewport measurements

use std::fmt;

use serde::Deserialize;

/// A scroll axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal axis (left / width)
    #[serde(alias = "x", alias = "left")]
    Horizontal,
    /// Vertical axis (top / height)
    #[serde(alias = "y", alias = "top")]
    Vertical,
}

impl Axis {
    /// Both axes, vertical first
    pub const ALL: [Axis; 2] = [Axis::Vertical, Axis::Horizontal];

    /// The perpendicular axis
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Pick the coordinate along this axis from an (x, y) pair
    pub fn component(self, x: f32, y: f32) -> f32 {
        match self {
            Axis::Horizontal => x,
            Axis::Vertical => y,
        }
    }

    /// Style property holding the thumb's position along this axis
    pub fn position_property(self) -> &'static str {
        match self {
            Axis::Horizontal => "left",
            Axis::Vertical => "top",
        }
    }

    /// Style property holding the thumb's extent along this axis
    pub fn length_property(self) -> &'static str {
        match self {
            Axis::Horizontal => "width",
            Axis::Vertical => "height",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontal"),
            Axis::Vertical => f.write_str("vertical"),
        }
    }
}

/// Opaque handle to an element owned by a scroll surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Handle reserved for the scroll container itself
    pub const CONTAINER: ElementId = ElementId(0);
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Snapshot of a container's visible and scrollable extents
///
/// `client_*` is the visible window, `scroll_*` the full content size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportGeometry {
    pub client_width: f32,
    pub client_height: f32,
    pub scroll_width: f32,
    pub scroll_height: f32,
}

impl ViewportGeometry {
    /// Create a geometry snapshot
    pub fn new(client_width: f32, client_height: f32, scroll_width: f32, scroll_height: f32) -> Self {
        Self {
            client_width,
            client_height,
            scroll_width,
            scroll_height,
        }
    }

    /// Visible size along an axis
    pub fn client(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.client_width,
            Axis::Vertical => self.client_height,
        }
    }

    /// Content size along an axis
    pub fn scroll(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.scroll_width,
            Axis::Vertical => self.scroll_height,
        }
    }

    /// Largest valid offset along an axis (0 when the content fits)
    pub fn max_offset(&self, axis: Axis) -> f32 {
        (self.scroll(axis) - self.client(axis)).max(0.0)
    }

    /// Whether content overflows the viewport along an axis
    pub fn overflows(&self, axis: Axis) -> bool {
        self.client(axis) < self.scroll(axis)
    }
}
