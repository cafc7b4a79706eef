//! Scroll surface abstraction

use crate::error::Result;
use crate::geometry::{Axis, ElementId, ViewportGeometry};
use crate::input::TouchAction;

/// A scrollable container as seen by a scrollbar
///
/// Implemented by each host (browser DOM binding, native toolkit, the
/// in-memory [`HeadlessSurface`](crate::HeadlessSurface)). The scrollbar
/// controller is the only caller of [`set_scroll_offset`](Self::set_scroll_offset);
/// the thumb view only creates and restyles its own elements.
pub trait ScrollSurface {
    /// Measure the container's visible and content extents
    fn geometry(&self) -> ViewportGeometry;

    /// Live scroll offset along an axis
    fn scroll_offset(&self, axis: Axis) -> f32;

    /// Write the live scroll offset along an axis
    ///
    /// Hosts clamp to their own valid range, the way a browser does.
    fn set_scroll_offset(&mut self, axis: Axis, value: f32);

    /// Whether the container still has a path to the document root
    fn is_attached(&self) -> bool;

    /// Computed touch-action of the container's touched content
    fn touch_action(&self) -> TouchAction {
        TouchAction::Auto
    }

    /// Hide native scrollbars and make the container a positioning
    /// ancestor for absolutely placed thumbs
    fn prepare_container(&mut self) {}

    /// Create a new child element of the container
    fn create_element(&mut self) -> Result<ElementId>;

    /// Set one inline style property on an element
    fn set_style(&mut self, element: ElementId, property: &str, value: &str) -> Result<()>;

    /// Append a class name to an element
    fn add_class(&mut self, element: ElementId, class: &str) -> Result<()>;

    /// Remove an element from the container
    fn remove_element(&mut self, element: ElementId) -> Result<()>;
}
