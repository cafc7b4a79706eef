//! In-memory scroll surface
//!
//! Behaves like a DOM container with fixed client and content sizes:
//! offsets are clamped the way a browser clamps `scrollTop`/`scrollLeft`,
//! elements keep their inline styles and classes for inspection.

use indexmap::IndexMap;

use crate::error::{PlatformError, Result};
use crate::geometry::{Axis, ElementId, ViewportGeometry};
use crate::input::TouchAction;
use crate::surface::ScrollSurface;

/// An element created on a [`HeadlessSurface`]
#[derive(Clone, Debug, Default)]
pub struct HeadlessElement {
    /// Inline styles in insertion order
    pub styles: IndexMap<String, String>,
    /// Class list
    pub classes: Vec<String>,
}

impl HeadlessElement {
    /// Inline style value for a property
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    /// Whether the class list contains a class
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Scroll surface backed by plain memory
#[derive(Clone, Debug)]
pub struct HeadlessSurface {
    client_width: f32,
    client_height: f32,
    content_width: f32,
    content_height: f32,
    scroll_top: f32,
    scroll_left: f32,
    attached: bool,
    prepared: bool,
    touch_action: TouchAction,
    elements: IndexMap<ElementId, HeadlessElement>,
    next_element: u64,
    offset_writes: usize,
}

impl HeadlessSurface {
    /// Create a surface with a viewport and content size
    pub fn new(client_width: f32, client_height: f32, content_width: f32, content_height: f32) -> Self {
        Self {
            client_width,
            client_height,
            content_width,
            content_height,
            scroll_top: 0.0,
            scroll_left: 0.0,
            attached: true,
            prepared: false,
            touch_action: TouchAction::Auto,
            elements: IndexMap::new(),
            next_element: 1,
            offset_writes: 0,
        }
    }

    /// Change the content size, re-clamping offsets like a browser reflow
    pub fn set_content_size(&mut self, width: f32, height: f32) {
        self.content_width = width;
        self.content_height = height;
        self.reclamp();
    }

    /// Change the viewport size
    pub fn set_client_size(&mut self, width: f32, height: f32) {
        self.client_width = width;
        self.client_height = height;
        self.reclamp();
    }

    /// Scroll without going through any scrollbar (e.g. `element.scrollTop = v`
    /// from unrelated code)
    pub fn scroll_externally(&mut self, axis: Axis, value: f32) {
        self.write_offset(axis, value);
    }

    /// Remove the container from the document
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Set the computed touch-action
    pub fn set_touch_action(&mut self, touch_action: TouchAction) {
        self.touch_action = touch_action;
    }

    /// Whether `prepare_container` ran
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Look up a live element
    pub fn element(&self, id: ElementId) -> Option<&HeadlessElement> {
        self.elements.get(&id)
    }

    /// Inline style of a live element
    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.elements.get(&id).and_then(|e| e.style(property))
    }

    /// Live elements carrying a class, in creation order
    pub fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|(_, element)| element.has_class(class))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of live elements
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// How many times an offset was written through the surface
    pub fn offset_writes(&self) -> usize {
        self.offset_writes
    }

    fn write_offset(&mut self, axis: Axis, value: f32) {
        let max = self.geometry().max_offset(axis);
        let clamped = if value.is_finite() { value.clamp(0.0, max) } else { 0.0 };
        match axis {
            Axis::Horizontal => self.scroll_left = clamped,
            Axis::Vertical => self.scroll_top = clamped,
        }
    }

    fn reclamp(&mut self) {
        let top = self.scroll_top;
        let left = self.scroll_left;
        self.write_offset(Axis::Vertical, top);
        self.write_offset(Axis::Horizontal, left);
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut HeadlessElement> {
        self.elements
            .get_mut(&id)
            .ok_or(PlatformError::UnknownElement(id))
    }
}

impl ScrollSurface for HeadlessSurface {
    fn geometry(&self) -> ViewportGeometry {
        ViewportGeometry {
            client_width: self.client_width,
            client_height: self.client_height,
            scroll_width: self.content_width.max(self.client_width),
            scroll_height: self.content_height.max(self.client_height),
        }
    }

    fn scroll_offset(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.scroll_left,
            Axis::Vertical => self.scroll_top,
        }
    }

    fn set_scroll_offset(&mut self, axis: Axis, value: f32) {
        self.offset_writes += 1;
        self.write_offset(axis, value);
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn touch_action(&self) -> TouchAction {
        self.touch_action
    }

    fn prepare_container(&mut self) {
        self.prepared = true;
    }

    fn create_element(&mut self) -> Result<ElementId> {
        if !self.attached {
            return Err(PlatformError::Detached);
        }
        let id = ElementId(self.next_element);
        self.next_element += 1;
        self.elements.insert(id, HeadlessElement::default());
        Ok(id)
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) -> Result<()> {
        self.element_mut(element)?
            .styles
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn add_class(&mut self, element: ElementId, class: &str) -> Result<()> {
        let element = self.element_mut(element)?;
        for name in class.split_whitespace() {
            if !element.has_class(name) {
                element.classes.push(name.to_string());
            }
        }
        Ok(())
    }

    fn remove_element(&mut self, element: ElementId) -> Result<()> {
        self.elements
            .shift_remove(&element)
            .map(|_| ())
            .ok_or(PlatformError::UnknownElement(element))
    }
}
