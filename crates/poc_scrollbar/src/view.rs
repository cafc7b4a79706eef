//! Thumb view
//!
//! Renders one thumb element per enabled axis inside the scroll container
//! and keeps its size and position in step with the controller's offsets.
//! The view never writes scroll offsets: thumb drags come back out of
//! [`ThumbView::drag_move`] as [`OffsetRequest`]s for the controller to
//! apply.
//!
//! Thumbs are created once, in [`ThumbView::new`], and removed in
//! [`ThumbView::destroy`]. Everything in between is restyling.

use poc_core::TeardownList;
use poc_platform::{Axis, ElementId, PointerId, ScrollSurface, ViewportGeometry};
use slotmap::SlotMap;

use crate::config::ScrollbarOptions;
use crate::error::Result;
use crate::geometry::{scale_factor, thumb_length, track_position, ScrollOffsets};
use crate::gesture::{GestureId, GestureMove, GestureTracker, OffsetRequest};
use crate::style::{apply_base_style, apply_thumb_options, px};

/// A rendered thumb
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thumb {
    element: ElementId,
    length: f32,
    visible: bool,
    min_size: Option<f32>,
}

impl Thumb {
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Length along its axis in pixels (0 while hidden)
    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Resources released when the view is destroyed
#[derive(Clone, Copy, Debug)]
enum ViewResource {
    Element(ElementId),
    Drag(GestureId),
}

/// The two thumbs of one scroll container
pub struct ThumbView {
    horizontal: Option<Thumb>,
    vertical: Option<Thumb>,
    geometry: ViewportGeometry,
    interactive: bool,
    drags: SlotMap<GestureId, GestureTracker>,
    resources: TeardownList<ViewResource>,
}

impl ThumbView {
    /// Measure the container and create a thumb for each enabled axis
    ///
    /// Thumbs start collapsed; call [`on_geometry_changed`](Self::on_geometry_changed)
    /// to size and place them.
    pub fn new<S: ScrollSurface + ?Sized>(surface: &mut S, options: &ScrollbarOptions) -> Result<Self> {
        let mut view = Self {
            horizontal: None,
            vertical: None,
            geometry: surface.geometry(),
            interactive: !options.disable_interaction_with_scrollbars,
            drags: SlotMap::with_key(),
            resources: TeardownList::new(),
        };

        for axis in Axis::ALL {
            if options.axis_disabled(axis) {
                continue;
            }
            match view.create_thumb(surface, axis, options) {
                Ok(thumb) => *view.slot_mut(axis) = Some(thumb),
                Err(err) => {
                    view.destroy(surface);
                    return Err(err);
                }
            }
        }

        Ok(view)
    }

    fn create_thumb<S: ScrollSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        axis: Axis,
        options: &ScrollbarOptions,
    ) -> Result<Thumb> {
        let element = surface.create_element()?;
        self.resources.register(ViewResource::Element(element));

        let thumb_options = options.thumb(axis);
        apply_base_style(surface, element)?;
        apply_thumb_options(surface, element, &thumb_options)?;

        tracing::debug!(%axis, %element, "created thumb");
        Ok(Thumb {
            element,
            length: 0.0,
            visible: false,
            min_size: thumb_options.min_size,
        })
    }

    fn slot(&self, axis: Axis) -> Option<&Thumb> {
        match axis {
            Axis::Horizontal => self.horizontal.as_ref(),
            Axis::Vertical => self.vertical.as_ref(),
        }
    }

    fn slot_mut(&mut self, axis: Axis) -> &mut Option<Thumb> {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    /// Thumb of an axis, if that axis is enabled
    pub fn thumb(&self, axis: Axis) -> Option<&Thumb> {
        self.slot(axis)
    }

    /// Element of an axis's thumb
    pub fn thumb_element(&self, axis: Axis) -> Option<ElementId> {
        self.slot(axis).map(Thumb::element)
    }

    /// Axis whose thumb is `element`
    pub fn thumb_axis(&self, element: ElementId) -> Option<Axis> {
        Axis::ALL
            .into_iter()
            .find(|axis| self.thumb_element(*axis) == Some(element))
    }

    /// Geometry the thumbs were last laid out for
    pub fn geometry(&self) -> ViewportGeometry {
        self.geometry
    }

    // =========================================================================
    // Layout hooks
    // =========================================================================

    /// Reposition thumbs after the offset along `axis` changed
    ///
    /// The axis's own thumb moves within its track; the other thumb is
    /// pinned flush against the scrolled edge.
    pub fn on_offset_changed<S: ScrollSurface + ?Sized>(&mut self, surface: &mut S, axis: Axis, offset: f32) {
        let client = self.geometry.client(axis);
        let scroll = self.geometry.scroll(axis);

        if let Some(thumb) = self.slot(axis).copied() {
            if self.geometry.overflows(axis) {
                let position = track_position(offset, client, scroll, thumb.length);
                write_style(surface, thumb.element, axis.position_property(), &px(position));
            }
        }

        if let Some(cross) = self.slot(axis.cross()).copied() {
            let edge = (offset + client).floor();
            write_style(surface, cross.element, axis.position_property(), &px(edge));
        }
    }

    /// Resize, show or hide thumbs for new container geometry, then
    /// reposition them for `offsets`
    pub fn on_geometry_changed<S: ScrollSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        geometry: ViewportGeometry,
        offsets: ScrollOffsets,
    ) {
        if geometry != self.geometry {
            tracing::debug!(
                client_width = geometry.client_width,
                client_height = geometry.client_height,
                scroll_width = geometry.scroll_width,
                scroll_height = geometry.scroll_height,
                "thumb geometry changed"
            );
        }
        self.geometry = geometry;

        for axis in Axis::ALL {
            let Some(thumb) = self.slot_mut(axis).as_mut() else {
                continue;
            };
            match thumb_length(geometry.client(axis), geometry.scroll(axis), thumb.min_size) {
                Some(length) => {
                    thumb.length = length;
                    thumb.visible = true;
                    let element = thumb.element;
                    write_style(surface, element, "display", "block");
                    write_style(surface, element, axis.length_property(), &px(length));
                }
                None => {
                    thumb.length = 0.0;
                    thumb.visible = false;
                    let element = thumb.element;
                    write_style(surface, element, "display", "none");
                }
            }
        }

        self.on_offset_changed(surface, Axis::Vertical, offsets.top);
        self.on_offset_changed(surface, Axis::Horizontal, offsets.left);
    }

    // =========================================================================
    // Thumb drag
    // =========================================================================

    /// Start dragging the thumb of `axis` from `(x, y)` at the current offset
    ///
    /// A pointer can drive only one drag; a second press restarts it.
    pub fn begin_drag(&mut self, axis: Axis, pointer: PointerId, x: f32, y: f32, offset: f32) -> Option<GestureId> {
        if !self.interactive || self.slot(axis).is_none() {
            return None;
        }
        let scale = scale_factor(self.geometry.client(axis), self.geometry.scroll(axis))?;

        self.end_drag(pointer);
        let id = self.drags.insert(GestureTracker::drag(pointer, x, y, axis, scale, offset));
        let key = self.resources.register(ViewResource::Drag(id));
        if let Some(tracker) = self.drags.get_mut(id) {
            tracker.set_teardown(key);
        }

        tracing::debug!(%axis, ?pointer, scale, offset, "thumb drag started");
        Some(id)
    }

    /// Feed a pointer move; returns the offset the drag asks for
    pub fn drag_move(&mut self, pointer: PointerId, x: f32, y: f32) -> Option<OffsetRequest> {
        let tracker = self.drags.values_mut().find(|t| t.pointer() == pointer)?;
        match tracker.advance(x, y) {
            GestureMove::Drag(request) => Some(request),
            GestureMove::Pan { .. } => None,
        }
    }

    /// Finish the drag of `pointer`, returning whether one was active
    pub fn end_drag(&mut self, pointer: PointerId) -> bool {
        let Some(id) = self
            .drags
            .iter()
            .find(|(_, t)| t.pointer() == pointer)
            .map(|(id, _)| id)
        else {
            return false;
        };
        if let Some(tracker) = self.drags.remove(id) {
            if let Some(key) = tracker.teardown() {
                self.resources.release(key);
            }
        }
        tracing::debug!(?pointer, "thumb drag ended");
        true
    }

    /// Number of drags in flight
    pub fn active_drags(&self) -> usize {
        self.drags.len()
    }

    /// Remove thumbs and abandon in-flight drags
    ///
    /// Safe to call more than once.
    pub fn destroy<S: ScrollSurface + ?Sized>(&mut self, surface: &mut S) {
        for resource in self.resources.drain() {
            match resource {
                ViewResource::Element(element) => {
                    if let Err(err) = surface.remove_element(element) {
                        tracing::warn!(%element, %err, "failed to remove thumb");
                    }
                }
                ViewResource::Drag(id) => {
                    self.drags.remove(id);
                }
            }
        }
        self.horizontal = None;
        self.vertical = None;
    }
}

fn write_style<S: ScrollSurface + ?Sized>(surface: &mut S, element: ElementId, property: &str, value: &str) {
    tracing::trace!(%element, property, value, "restyle thumb");
    if let Err(err) = surface.set_style(element, property, value) {
        tracing::warn!(%element, property, %err, "failed to style thumb");
    }
}
