//! Scroll state controller
//!
//! [`Scrollbar`] owns the authoritative offsets of one scroll container.
//! Every offset change goes through [`Scrollbar::set_offset`]: it is
//! clamped, offered to `scrollTopChanged` / `scrollLeftChanged` listeners
//! (which may veto it), and only then written to the container and shown
//! by the thumbs.
//!
//! The host feeds input with [`Scrollbar::handle_input`], reports content
//! mutations with [`Scrollbar::notify_mutation`], and advances time with
//! [`Scrollbar::tick`]. Geometry checks run from the poll interval or,
//! when mutation notifications are in use, after a quiet period.
//!
//! # Example
//!
//! ```rust
//! use poc_platform::{EventResponse, HeadlessSurface, InputContext, InputEvent, WheelEvent};
//! use poc_scrollbar::{Scrollbar, ScrollbarOptions};
//!
//! let surface = HeadlessSurface::new(100.0, 100.0, 100.0, 200.0);
//! let mut scrollbar = Scrollbar::new(surface, ScrollbarOptions::default()).unwrap();
//!
//! let wheel = InputEvent::Wheel(WheelEvent::pixels(0.0, 25.0));
//! let response = scrollbar.handle_input(&wheel, InputContext::container());
//! assert_eq!(response, EventResponse::PreventDefault);
//! assert_eq!(scrollbar.scroll_top(), 25.0);
//! ```

use std::time::Duration;

use poc_core::{
    Debouncer, EventDispatcher, ListenerId, ScrollChangedEvent, ScrollEventType, TeardownList,
    TimerId, TimerQueue,
};
use poc_platform::{
    Axis, ElementId, EventResponse, InputContext, InputEvent, InputTarget, MouseButton,
    MouseEvent, PointerId, ScrollSurface, TouchEvent, ViewportGeometry, WheelEvent,
};
use slotmap::SlotMap;

use crate::config::ScrollbarOptions;
use crate::environment::InputEnvironment;
use crate::error::Result;
use crate::geometry::{clamp_offset, wheel_delta_pixels, ScrollOffsets};
use crate::gesture::{GestureId, GestureMove, GestureTracker};
use crate::view::ThumbView;

/// Controller lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Handling input and timers
    Active,
    /// Torn down; every operation is inert
    Destroyed,
}

/// Timer work
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    Poll,
    MutationSettled,
}

/// Resources released on teardown
#[derive(Clone, Copy, Debug)]
enum ControllerResource {
    Timer(TimerId),
    Debounce,
    Touch(GestureId),
}

/// Overlay scrollbars for one scroll container
pub struct Scrollbar<S: ScrollSurface> {
    surface: S,
    options: ScrollbarOptions,
    environment: InputEnvironment,
    view: ThumbView,
    offsets: ScrollOffsets,
    geometry: ViewportGeometry,
    listeners: EventDispatcher,
    timers: TimerQueue<Task>,
    debouncer: Option<Debouncer>,
    touches: SlotMap<GestureId, GestureTracker>,
    resources: TeardownList<ControllerResource>,
    lifecycle: Lifecycle,
}

impl<S: ScrollSurface> Scrollbar<S> {
    /// Attach scrollbars to `surface` using the global input environment
    pub fn new(surface: S, options: ScrollbarOptions) -> Result<Self> {
        Self::with_environment(surface, options, InputEnvironment::current())
    }

    /// Attach scrollbars with an explicit input environment
    pub fn with_environment(
        mut surface: S,
        options: ScrollbarOptions,
        environment: InputEnvironment,
    ) -> Result<Self> {
        let options = options.sanitized();

        surface.prepare_container();
        let mut view = ThumbView::new(&mut surface, &options)?;

        let geometry = surface.geometry();
        let live = ScrollOffsets {
            top: surface.scroll_offset(Axis::Vertical),
            left: surface.scroll_offset(Axis::Horizontal),
        };
        view.on_geometry_changed(&mut surface, geometry, live);

        let mut timers = TimerQueue::new();
        let mut resources = TeardownList::new();
        let interval = options.check_interval_duration();
        let debouncer = if options.use_mutation_observer && environment.supports_mutation_observer {
            resources.register(ControllerResource::Debounce);
            Some(Debouncer::new(interval))
        } else {
            if options.use_mutation_observer {
                tracing::debug!("mutation notifications unavailable, polling instead");
            }
            let poll = timers.set_interval(interval, Task::Poll);
            resources.register(ControllerResource::Timer(poll));
            None
        };

        tracing::debug!(?interval, polling = debouncer.is_none(), "scrollbar attached");

        Ok(Self {
            surface,
            options,
            environment,
            view,
            offsets: ScrollOffsets::default(),
            geometry,
            listeners: EventDispatcher::new(),
            timers,
            debouncer,
            touches: SlotMap::with_key(),
            resources,
            lifecycle: Lifecycle::Active,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for host-side changes (content resizes, detaching)
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn view(&self) -> &ThumbView {
        &self.view
    }

    /// Options after sanitizing
    pub fn options(&self) -> &ScrollbarOptions {
        &self.options
    }

    pub fn environment(&self) -> &InputEnvironment {
        &self.environment
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle == Lifecycle::Destroyed
    }

    /// Container touches currently panning
    pub fn active_touches(&self) -> usize {
        self.touches.len()
    }

    /// Time elapsed through [`tick`](Self::tick)
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    // =========================================================================
    // Offsets
    // =========================================================================

    /// Current offset along an axis
    ///
    /// Reads the container while active; after teardown returns the last
    /// applied offset.
    pub fn offset(&self, axis: Axis) -> f32 {
        match self.lifecycle {
            Lifecycle::Active => self.surface.scroll_offset(axis),
            Lifecycle::Destroyed => self.offsets.get(axis),
        }
    }

    pub fn scroll_top(&self) -> f32 {
        self.offset(Axis::Vertical)
    }

    pub fn scroll_left(&self) -> f32 {
        self.offset(Axis::Horizontal)
    }

    /// Request a new offset along an axis
    ///
    /// Non-finite values and disabled axes change nothing and return the
    /// current offset. Otherwise the value is clamped to the scrollable
    /// range; if that differs from the stored offset, listeners are asked
    /// first. A vetoed change leaves every offset untouched but still
    /// returns the clamped value that was attempted.
    pub fn set_offset(&mut self, axis: Axis, value: f32) -> f32 {
        if self.is_destroyed() {
            return self.offsets.get(axis);
        }
        if !value.is_finite() || self.options.axis_disabled(axis) {
            return self.surface.scroll_offset(axis);
        }

        let geometry = self.surface.geometry();
        let clamped = clamp_offset(value, &geometry, axis);
        let stored = self.offsets.get(axis);
        if clamped == stored {
            return clamped;
        }

        let mut event = ScrollChangedEvent::new(
            ScrollEventType::for_axis(axis),
            self.view.thumb_element(axis),
            ElementId::CONTAINER,
            stored,
            clamped,
            self.timers.now().as_millis() as u64,
        );
        self.listeners.dispatch(&mut event);
        if event.default_prevented() {
            return clamped;
        }

        self.view.on_offset_changed(&mut self.surface, axis, clamped);
        self.surface.set_scroll_offset(axis, clamped);
        self.offsets.set(axis, clamped);
        tracing::trace!(%axis, old = stored, new = clamped, "offset applied");
        clamped
    }

    pub fn set_scroll_top(&mut self, value: f32) -> f32 {
        self.set_offset(Axis::Vertical, value)
    }

    pub fn set_scroll_left(&mut self, value: f32) -> f32 {
        self.set_offset(Axis::Horizontal, value)
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Register a change listener by event name (case-insensitive)
    ///
    /// Fails with an unknown-event error for anything other than
    /// `scrollTopChanged` or `scrollLeftChanged`.
    pub fn add_event_listener<F>(&mut self, name: &str, listener: F) -> Result<ListenerId>
    where
        F: FnMut(&mut ScrollChangedEvent) + 'static,
    {
        let event_type: ScrollEventType = name.parse()?;
        Ok(self.listeners.add(event_type, listener))
    }

    /// Remove a listener, returning whether it was registered for `name`
    pub fn remove_event_listener(&mut self, name: &str, id: ListenerId) -> Result<bool> {
        let event_type: ScrollEventType = name.parse()?;
        Ok(self.listeners.remove(event_type, id))
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Route a host input event
    ///
    /// The returned response tells the host whether to suppress the native
    /// default action.
    pub fn handle_input(&mut self, event: &InputEvent, context: InputContext) -> EventResponse {
        if self.is_destroyed() {
            return EventResponse::Ignored;
        }
        match event {
            InputEvent::Wheel(wheel) => self.handle_wheel(wheel, context),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse, context),
            InputEvent::Touch(touch) => self.handle_touch(touch, context),
        }
    }

    /// Scroll by a wheel event over the container
    ///
    /// Shift turns a purely vertical wheel into horizontal scrolling.
    pub fn handle_wheel(&mut self, wheel: &WheelEvent, context: InputContext) -> EventResponse {
        if self.is_destroyed() || context.default_prevented || context.target == InputTarget::Document {
            return EventResponse::Ignored;
        }

        let (delta_x, delta_y) = if wheel.modifiers.shift && wheel.delta_x == 0.0 {
            (wheel.delta_y, 0.0)
        } else {
            (wheel.delta_x, wheel.delta_y)
        };

        let geometry = self.surface.geometry();
        let size = self.options.wheel_delta_size;
        let pixels_x = wheel_delta_pixels(delta_x, wheel.delta_mode, Axis::Horizontal, size, &geometry, &self.environment);
        let pixels_y = wheel_delta_pixels(delta_y, wheel.delta_mode, Axis::Vertical, size, &geometry, &self.environment);

        let before_top = self.surface.scroll_offset(Axis::Vertical);
        let before_left = self.surface.scroll_offset(Axis::Horizontal);
        self.set_offset(Axis::Vertical, before_top + pixels_y);
        self.set_offset(Axis::Horizontal, before_left + pixels_x);

        if self.surface.scroll_offset(Axis::Vertical) != before_top
            || self.surface.scroll_offset(Axis::Horizontal) != before_left
        {
            EventResponse::PreventDefault
        } else {
            EventResponse::Ignored
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, context: InputContext) -> EventResponse {
        match *mouse {
            MouseEvent::ButtonPressed {
                button: MouseButton::Left,
                x,
                y,
            } => self.begin_thumb_drag(PointerId::Mouse, x, y, context),
            MouseEvent::Moved { x, y } => self.thumb_drag_move(PointerId::Mouse, x, y),
            MouseEvent::ButtonReleased {
                button: MouseButton::Left,
                ..
            }
            | MouseEvent::Left => {
                self.view.end_drag(PointerId::Mouse);
                EventResponse::Ignored
            }
            _ => EventResponse::Ignored,
        }
    }

    fn handle_touch(&mut self, touch: &TouchEvent, context: InputContext) -> EventResponse {
        if touch.is_terminal() {
            let id = touch.id();
            self.view.end_drag(PointerId::Touch(id));
            self.close_pan(id);
            return EventResponse::Ignored;
        }
        match *touch {
            TouchEvent::Started { id, x, y } => {
                if context.default_prevented {
                    return EventResponse::Ignored;
                }
                let response = self.begin_thumb_drag(PointerId::Touch(id), x, y, context);
                if !response.is_prevented()
                    && context.target != InputTarget::Document
                    && !self.options.disable_touch_scrolling_on_container
                {
                    self.open_pan(id, x, y);
                }
                response
            }
            TouchEvent::Moved { id, x, y } => {
                let response = self.thumb_drag_move(PointerId::Touch(id), x, y);
                if response.is_prevented() || context.default_prevented {
                    return response;
                }
                self.pan_move(id, x, y)
            }
            _ => EventResponse::Ignored,
        }
    }

    fn begin_thumb_drag(&mut self, pointer: PointerId, x: f32, y: f32, context: InputContext) -> EventResponse {
        let InputTarget::Element(element) = context.target else {
            return EventResponse::Ignored;
        };
        let Some(axis) = self.view.thumb_axis(element) else {
            return EventResponse::Ignored;
        };
        let offset = self.offset(axis);
        match self.view.begin_drag(axis, pointer, x, y, offset) {
            Some(_) => EventResponse::PreventDefault,
            None => EventResponse::Ignored,
        }
    }

    fn thumb_drag_move(&mut self, pointer: PointerId, x: f32, y: f32) -> EventResponse {
        match self.view.drag_move(pointer, x, y) {
            Some(request) => {
                self.set_offset(request.axis, request.value);
                EventResponse::PreventDefault
            }
            None => EventResponse::Ignored,
        }
    }

    fn open_pan(&mut self, touch: u64, x: f32, y: f32) {
        self.close_pan(touch);

        let touch_action = self.surface.touch_action();
        let tracker = GestureTracker::pan(
            PointerId::Touch(touch),
            x,
            y,
            touch_action.allows_pan_x(),
            touch_action.allows_pan_y(),
        );
        let id = self.touches.insert(tracker);
        let key = self.resources.register(ControllerResource::Touch(id));
        if let Some(tracker) = self.touches.get_mut(id) {
            tracker.set_teardown(key);
        }
        tracing::debug!(touch, ?touch_action, "touch pan started");
    }

    fn pan_move(&mut self, touch: u64, x: f32, y: f32) -> EventResponse {
        let pointer = PointerId::Touch(touch);
        let Some(tracker) = self.touches.values_mut().find(|t| t.pointer() == pointer) else {
            return EventResponse::Ignored;
        };
        let GestureMove::Pan { dx, dy } = tracker.advance(x, y) else {
            return EventResponse::Ignored;
        };

        let mut response = EventResponse::Ignored;
        if let Some(dx) = dx {
            let current = self.surface.scroll_offset(Axis::Horizontal);
            self.set_offset(Axis::Horizontal, current + dx);
            response = EventResponse::PreventDefault;
        }
        if let Some(dy) = dy {
            let current = self.surface.scroll_offset(Axis::Vertical);
            self.set_offset(Axis::Vertical, current + dy);
            response = EventResponse::PreventDefault;
        }
        response
    }

    fn close_pan(&mut self, touch: u64) {
        let pointer = PointerId::Touch(touch);
        let Some(id) = self
            .touches
            .iter()
            .find(|(_, t)| t.pointer() == pointer)
            .map(|(id, _)| id)
        else {
            return;
        };
        if let Some(tracker) = self.touches.remove(id) {
            if let Some(key) = tracker.teardown() {
                self.resources.release(key);
            }
        }
        tracing::debug!(touch, "touch pan ended");
    }

    // =========================================================================
    // Geometry tracking
    // =========================================================================

    /// Report that the container's content or size may have changed
    ///
    /// With mutation notifications in use this (re)starts the debounce
    /// wait; while polling it is a no-op.
    pub fn notify_mutation(&mut self) {
        if self.is_destroyed() {
            return;
        }
        if let Some(debouncer) = self.debouncer.as_mut() {
            debouncer.trigger(&mut self.timers, Task::MutationSettled);
        }
    }

    /// Advance time, running due polls and settled mutation checks
    pub fn tick(&mut self, elapsed: Duration) {
        if self.is_destroyed() {
            return;
        }
        let deadline = self.timers.deadline_after(elapsed);
        while let Some(task) = self.timers.pop_due(deadline) {
            if task == Task::MutationSettled {
                if let Some(debouncer) = self.debouncer.as_mut() {
                    debouncer.fired();
                }
            }
            self.check_geometry();
            if self.is_destroyed() {
                break;
            }
        }
    }

    /// Re-measure the container and resync thumbs and offsets
    ///
    /// Tears the scrollbar down if the container left the document.
    pub fn check_geometry(&mut self) {
        if self.is_destroyed() {
            return;
        }

        // measure with thumbs at the origin so they don't stretch the content
        self.view.on_offset_changed(&mut self.surface, Axis::Vertical, 0.0);
        self.view.on_offset_changed(&mut self.surface, Axis::Horizontal, 0.0);

        if !self.surface.is_attached() {
            tracing::info!("scroll container detached, tearing down scrollbar");
            self.destroy();
            return;
        }

        let geometry = self.surface.geometry();
        if geometry != self.geometry {
            self.geometry = geometry;
            self.view.on_geometry_changed(&mut self.surface, geometry, self.offsets);
        }

        for axis in Axis::ALL {
            let live = self.surface.scroll_offset(axis);
            if !self.options.axis_disabled(axis) && live != self.offsets.get(axis) {
                tracing::debug!(%axis, stored = self.offsets.get(axis), live, "external scroll detected");
                self.set_offset(axis, live);
            }
            let offset = self.offsets.get(axis);
            self.view.on_offset_changed(&mut self.surface, axis, offset);
        }
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Release timers, gestures, thumbs and listeners
    ///
    /// Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.is_destroyed() {
            return;
        }
        self.lifecycle = Lifecycle::Destroyed;

        for resource in self.resources.drain() {
            match resource {
                ControllerResource::Timer(id) => {
                    self.timers.cancel(id);
                }
                ControllerResource::Debounce => {
                    if let Some(debouncer) = self.debouncer.as_mut() {
                        debouncer.cancel(&mut self.timers);
                    }
                }
                ControllerResource::Touch(id) => {
                    self.touches.remove(id);
                }
            }
        }
        self.debouncer = None;
        self.timers.clear();
        self.view.destroy(&mut self.surface);
        self.listeners.clear();

        tracing::debug!("scrollbar destroyed");
    }
}

impl<S: ScrollSurface> Drop for Scrollbar<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrollbarError;
    use poc_core::EventError;
    use poc_platform::{DeltaMode, HeadlessSurface, Modifiers, TouchAction};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn scrollbar(
        client: (f32, f32),
        content: (f32, f32),
        options: ScrollbarOptions,
    ) -> Scrollbar<HeadlessSurface> {
        let surface = HeadlessSurface::new(client.0, client.1, content.0, content.1);
        Scrollbar::with_environment(surface, options, InputEnvironment::default()).unwrap()
    }

    fn square() -> Scrollbar<HeadlessSurface> {
        scrollbar((100.0, 100.0), (200.0, 200.0), ScrollbarOptions::default())
    }

    fn wheel(scrollbar: &mut Scrollbar<HeadlessSurface>, event: WheelEvent) -> EventResponse {
        scrollbar.handle_input(&InputEvent::Wheel(event), InputContext::container())
    }

    fn thumb_style(scrollbar: &Scrollbar<HeadlessSurface>, axis: Axis, property: &str) -> Option<String> {
        let element = scrollbar.view().thumb_element(axis)?;
        scrollbar.surface().style(element, property).map(str::to_string)
    }

    fn record_events(scrollbar: &mut Scrollbar<HeadlessSurface>, name: &str) -> Rc<RefCell<Vec<(f32, f32)>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        scrollbar
            .add_event_listener(name, move |event| {
                sink.borrow_mut().push((event.old_value(), event.new_value()))
            })
            .unwrap();
        seen
    }

    #[test]
    fn test_both_thumbs_sized_from_ratio() {
        let scrollbar = square();
        assert!(scrollbar.surface().is_prepared());
        for axis in Axis::ALL {
            let thumb = scrollbar.view().thumb(axis).unwrap();
            assert!(thumb.is_visible());
            assert_eq!(thumb.length(), 50.0);
        }
        assert_eq!(thumb_style(&scrollbar, Axis::Vertical, "height").as_deref(), Some("50px"));
        assert_eq!(thumb_style(&scrollbar, Axis::Horizontal, "width").as_deref(), Some("50px"));
    }

    #[test]
    fn test_pixel_wheel_scrolls() {
        let mut scrollbar = scrollbar((100.0, 100.0), (100.0, 200.0), ScrollbarOptions::default());
        let response = wheel(&mut scrollbar, WheelEvent::pixels(0.0, 25.0));
        assert_eq!(response, EventResponse::PreventDefault);
        assert_eq!(scrollbar.scroll_top(), 25.0);
        assert_eq!(scrollbar.scroll_left(), 0.0);
    }

    #[test]
    fn test_thumb_drag_is_scaled() {
        let mut scrollbar = scrollbar((100.0, 100.0), (100.0, 200.0), ScrollbarOptions::default());
        let thumb = scrollbar.view().thumb_element(Axis::Vertical).unwrap();

        let press = InputEvent::Mouse(MouseEvent::ButtonPressed {
            button: MouseButton::Left,
            x: 0.0,
            y: 10.0,
        });
        assert!(scrollbar.handle_input(&press, InputContext::element(thumb)).is_prevented());

        let moved = InputEvent::Mouse(MouseEvent::Moved { x: 0.0, y: 20.0 });
        assert!(scrollbar.handle_input(&moved, InputContext::document()).is_prevented());
        assert_eq!(scrollbar.scroll_top(), 20.0);

        let release = InputEvent::Mouse(MouseEvent::ButtonReleased {
            button: MouseButton::Left,
            x: 0.0,
            y: 20.0,
        });
        scrollbar.handle_input(&release, InputContext::document());
        assert_eq!(scrollbar.view().active_drags(), 0);

        let after = InputEvent::Mouse(MouseEvent::Moved { x: 0.0, y: 60.0 });
        assert_eq!(
            scrollbar.handle_input(&after, InputContext::document()),
            EventResponse::Ignored
        );
        assert_eq!(scrollbar.scroll_top(), 20.0);
    }

    #[test]
    fn test_mouse_leaving_ends_thumb_drag() {
        let mut scrollbar = square();
        let thumb = scrollbar.view().thumb_element(Axis::Horizontal).unwrap();
        let press = InputEvent::Mouse(MouseEvent::ButtonPressed {
            button: MouseButton::Left,
            x: 0.0,
            y: 0.0,
        });
        scrollbar.handle_input(&press, InputContext::element(thumb));
        scrollbar.handle_input(&InputEvent::Mouse(MouseEvent::Moved { x: 10.0, y: 0.0 }), InputContext::document());
        assert_eq!(scrollbar.scroll_left(), 20.0);

        scrollbar.handle_input(&InputEvent::Mouse(MouseEvent::Left), InputContext::document());
        assert_eq!(scrollbar.view().active_drags(), 0);

        let moved = InputEvent::Mouse(MouseEvent::Moved { x: 40.0, y: 0.0 });
        assert_eq!(scrollbar.handle_input(&moved, InputContext::document()), EventResponse::Ignored);
        assert_eq!(scrollbar.scroll_left(), 20.0);
    }

    #[test]
    fn test_detached_container_self_destroys() {
        let mut scrollbar = square();
        scrollbar.set_scroll_top(30.0);
        scrollbar.surface_mut().detach();
        scrollbar.tick(Duration::from_millis(300));

        assert!(scrollbar.is_destroyed());
        assert_eq!(scrollbar.surface().element_count(), 0);
        assert_eq!(scrollbar.set_scroll_top(50.0), 30.0);
        assert_eq!(scrollbar.scroll_top(), 30.0);
        assert_eq!(
            wheel(&mut scrollbar, WheelEvent::pixels(0.0, 10.0)),
            EventResponse::Ignored
        );
        scrollbar.tick(Duration::from_secs(5));
    }

    #[test]
    fn test_disabled_axis() {
        let options = ScrollbarOptions::from_json(r#"{ "disableYScrolling": true }"#).unwrap();
        let mut scrollbar = scrollbar((100.0, 100.0), (200.0, 200.0), options);

        assert!(scrollbar.view().thumb(Axis::Vertical).is_none());
        assert_eq!(scrollbar.surface().element_count(), 1);
        assert_eq!(scrollbar.set_scroll_top(50.0), 0.0);
        assert_eq!(scrollbar.scroll_top(), 0.0);
        assert_eq!(
            wheel(&mut scrollbar, WheelEvent::pixels(0.0, 25.0)),
            EventResponse::Ignored
        );
    }

    #[test]
    fn test_offsets_clamped_to_range() {
        let mut scrollbar = scrollbar((100.0, 100.0), (300.0, 100.0), ScrollbarOptions::default());
        assert_eq!(scrollbar.set_scroll_left(-20.0), 0.0);
        assert_eq!(scrollbar.set_scroll_left(10_000.0), 200.0);
        assert_eq!(scrollbar.scroll_left(), 200.0);
        // content fits vertically
        assert_eq!(scrollbar.set_scroll_top(40.0), 0.0);
    }

    #[test]
    fn test_non_finite_offset_is_ignored() {
        let mut scrollbar = square();
        scrollbar.set_scroll_top(10.0);
        assert_eq!(scrollbar.set_scroll_top(f32::NAN), 10.0);
        assert_eq!(scrollbar.set_scroll_top(f32::INFINITY), 10.0);
        assert_eq!(scrollbar.scroll_top(), 10.0);
    }

    #[test]
    fn test_same_offset_dispatches_once() {
        let mut scrollbar = square();
        let seen = record_events(&mut scrollbar, "scrollTopChanged");
        scrollbar.set_scroll_top(10.0);
        scrollbar.set_scroll_top(10.0);
        assert_eq!(*seen.borrow(), vec![(0.0, 10.0)]);
        assert_eq!(scrollbar.scroll_top(), 10.0);
    }

    #[test]
    fn test_veto_keeps_offset() {
        let mut scrollbar = square();
        scrollbar
            .add_event_listener("scrollTopChanged", |event| event.prevent_default())
            .unwrap();
        let writes = scrollbar.surface().offset_writes();

        assert_eq!(scrollbar.set_scroll_top(10.0), 10.0);
        assert_eq!(scrollbar.scroll_top(), 0.0);
        assert_eq!(scrollbar.surface().offset_writes(), writes);
        assert_eq!(
            wheel(&mut scrollbar, WheelEvent::pixels(0.0, 25.0)),
            EventResponse::Ignored
        );
    }

    #[test]
    fn test_stop_propagation_is_per_dispatch() {
        let mut scrollbar = square();
        let later = Rc::new(RefCell::new(Vec::new()));
        scrollbar
            .add_event_listener("scrollTopChanged", |event| {
                if event.new_value() == 10.0 {
                    event.stop_propagation();
                }
            })
            .unwrap();
        {
            let later = Rc::clone(&later);
            scrollbar
                .add_event_listener("scrollTopChanged", move |event| {
                    later.borrow_mut().push(event.new_value())
                })
                .unwrap();
        }

        scrollbar.set_scroll_top(10.0);
        assert_eq!(scrollbar.scroll_top(), 10.0);
        assert!(later.borrow().is_empty());

        scrollbar.set_scroll_top(20.0);
        assert_eq!(*later.borrow(), vec![20.0]);
    }

    #[test]
    fn test_event_names() {
        let mut scrollbar = square();
        assert_eq!(
            scrollbar.add_event_listener("scroll", |_| {}),
            Err(ScrollbarError::Event(EventError::UnknownEvent("scroll".into())))
        );

        let seen = record_events(&mut scrollbar, "SCROLLLEFTCHANGED");
        scrollbar.set_scroll_left(5.0);
        assert_eq!(*seen.borrow(), vec![(0.0, 5.0)]);

        let id = scrollbar
            .add_event_listener("scrollleftchanged", |event| event.prevent_default())
            .unwrap();
        assert_eq!(scrollbar.remove_event_listener("scrollTopChanged", id), Ok(false));
        assert_eq!(scrollbar.remove_event_listener("scrollLeftChanged", id), Ok(true));
        assert!(scrollbar.remove_event_listener("nope", id).is_err());
        scrollbar.set_scroll_left(15.0);
        assert_eq!(scrollbar.scroll_left(), 15.0);
    }

    #[test]
    fn test_event_payload() {
        let mut scrollbar = square();
        let thumb = scrollbar.view().thumb_element(Axis::Vertical);
        let captured = Rc::new(RefCell::new(None));
        {
            let captured = Rc::clone(&captured);
            scrollbar
                .add_event_listener("scrollTopChanged", move |event| {
                    *captured.borrow_mut() = Some(event.clone())
                })
                .unwrap();
        }
        scrollbar.tick(Duration::from_millis(120));
        scrollbar.set_scroll_top(40.0);

        let event = captured.borrow().clone().unwrap();
        assert_eq!(event.event_type(), ScrollEventType::ScrollTopChanged);
        assert_eq!(event.target(), thumb);
        assert_eq!(event.src_element(), ElementId::CONTAINER);
        assert_eq!(event.delta(), 40.0);
        assert_eq!(event.timestamp(), 120);
    }

    #[test]
    fn test_wheel_units() {
        let mut scrollbar = scrollbar((100.0, 100.0), (100.0, 1000.0), ScrollbarOptions::default());
        wheel(&mut scrollbar, WheelEvent::pixels(0.0, 3.0).with_mode(DeltaMode::Line));
        assert_eq!(scrollbar.scroll_top(), 48.0);
        wheel(&mut scrollbar, WheelEvent::pixels(0.0, 1.0).with_mode(DeltaMode::Page));
        assert_eq!(scrollbar.scroll_top(), 148.0);
    }

    #[test]
    fn test_wheel_delta_size_override() {
        let options = ScrollbarOptions::default().wheel_delta_size(40.0);
        let mut scrollbar = scrollbar((100.0, 100.0), (100.0, 1000.0), options);
        wheel(&mut scrollbar, WheelEvent::pixels(0.0, 3.0).with_mode(DeltaMode::Line));
        assert_eq!(scrollbar.scroll_top(), 40.0);
        wheel(&mut scrollbar, WheelEvent::pixels(0.0, -0.2));
        assert_eq!(scrollbar.scroll_top(), 0.0);
    }

    #[test]
    fn test_shift_wheel_scrolls_horizontally() {
        let mut scrollbar = square();
        wheel(&mut scrollbar, WheelEvent::pixels(0.0, 30.0).with_modifiers(Modifiers::SHIFT));
        assert_eq!(scrollbar.scroll_left(), 30.0);
        assert_eq!(scrollbar.scroll_top(), 0.0);

        // an explicit horizontal delta wins
        wheel(&mut scrollbar, WheelEvent::pixels(5.0, 30.0).with_modifiers(Modifiers::SHIFT));
        assert_eq!(scrollbar.scroll_left(), 35.0);
        assert_eq!(scrollbar.scroll_top(), 30.0);
    }

    #[test]
    fn test_wheel_ignored_when_prevented_or_stuck() {
        let mut scrollbar = square();
        let event = InputEvent::Wheel(WheelEvent::pixels(0.0, 25.0));
        assert_eq!(
            scrollbar.handle_input(&event, InputContext::container().prevented()),
            EventResponse::Ignored
        );
        assert_eq!(scrollbar.scroll_top(), 0.0);
        assert_eq!(
            wheel(&mut scrollbar, WheelEvent::pixels(0.0, -10.0)),
            EventResponse::Ignored
        );
    }

    fn touch(scrollbar: &mut Scrollbar<HeadlessSurface>, event: TouchEvent, context: InputContext) -> EventResponse {
        scrollbar.handle_input(&InputEvent::Touch(event), context)
    }

    #[test]
    fn test_touch_pan_scrolls_container() {
        let mut scrollbar = square();
        touch(&mut scrollbar, TouchEvent::Started { id: 0, x: 50.0, y: 50.0 }, InputContext::container());
        assert_eq!(scrollbar.active_touches(), 1);

        let response = touch(&mut scrollbar, TouchEvent::Moved { id: 0, x: 40.0, y: 20.0 }, InputContext::document());
        assert!(response.is_prevented());
        assert_eq!(scrollbar.scroll_top(), 30.0);
        assert_eq!(scrollbar.scroll_left(), 10.0);

        // other touches are not tracked
        touch(&mut scrollbar, TouchEvent::Moved { id: 1, x: 0.0, y: 0.0 }, InputContext::document());
        assert_eq!(scrollbar.scroll_top(), 30.0);

        touch(&mut scrollbar, TouchEvent::Ended { id: 0 }, InputContext::document());
        assert_eq!(scrollbar.active_touches(), 0);
        let response = touch(&mut scrollbar, TouchEvent::Moved { id: 0, x: 0.0, y: 0.0 }, InputContext::document());
        assert_eq!(response, EventResponse::Ignored);
        assert_eq!(scrollbar.scroll_top(), 30.0);
    }

    #[test]
    fn test_touch_leaving_closes_pan() {
        let mut scrollbar = square();
        let resources = scrollbar.resources.len();
        touch(&mut scrollbar, TouchEvent::Started { id: 2, x: 50.0, y: 50.0 }, InputContext::container());
        assert_eq!(scrollbar.resources.len(), resources + 1);

        touch(&mut scrollbar, TouchEvent::Moved { id: 2, x: 50.0, y: 40.0 }, InputContext::document());
        assert_eq!(scrollbar.scroll_top(), 10.0);

        touch(&mut scrollbar, TouchEvent::Left { id: 2 }, InputContext::document());
        assert_eq!(scrollbar.active_touches(), 0);
        assert_eq!(scrollbar.resources.len(), resources);

        let response = touch(&mut scrollbar, TouchEvent::Moved { id: 2, x: 50.0, y: 0.0 }, InputContext::document());
        assert_eq!(response, EventResponse::Ignored);
        assert_eq!(scrollbar.scroll_top(), 10.0);
    }

    #[test]
    fn test_touch_action_gates_axes() {
        let mut scrollbar = square();
        scrollbar.surface_mut().set_touch_action(TouchAction::PanY);
        touch(&mut scrollbar, TouchEvent::Started { id: 0, x: 50.0, y: 50.0 }, InputContext::container());
        touch(&mut scrollbar, TouchEvent::Moved { id: 0, x: 20.0, y: 20.0 }, InputContext::document());
        assert_eq!(scrollbar.scroll_top(), 30.0);
        assert_eq!(scrollbar.scroll_left(), 0.0);
        touch(&mut scrollbar, TouchEvent::Cancelled { id: 0 }, InputContext::document());

        scrollbar.surface_mut().set_touch_action(TouchAction::None);
        touch(&mut scrollbar, TouchEvent::Started { id: 1, x: 50.0, y: 50.0 }, InputContext::container());
        let response = touch(&mut scrollbar, TouchEvent::Moved { id: 1, x: 0.0, y: 0.0 }, InputContext::document());
        assert_eq!(response, EventResponse::Ignored);
        assert_eq!(scrollbar.scroll_top(), 30.0);
    }

    #[test]
    fn test_container_touch_scrolling_disabled() {
        let options = ScrollbarOptions::default().disable_touch_scrolling_on_container();
        let mut scrollbar = scrollbar((100.0, 100.0), (200.0, 200.0), options);
        touch(&mut scrollbar, TouchEvent::Started { id: 0, x: 50.0, y: 50.0 }, InputContext::container());
        touch(&mut scrollbar, TouchEvent::Moved { id: 0, x: 0.0, y: 0.0 }, InputContext::document());
        assert_eq!(scrollbar.active_touches(), 0);
        assert_eq!(scrollbar.scroll_top(), 0.0);
    }

    #[test]
    fn test_touch_on_thumb_drags_thumb() {
        let mut scrollbar = square();
        let thumb = scrollbar.view().thumb_element(Axis::Vertical).unwrap();

        let response = touch(&mut scrollbar, TouchEvent::Started { id: 0, x: 0.0, y: 10.0 }, InputContext::element(thumb));
        assert!(response.is_prevented());
        assert_eq!(scrollbar.active_touches(), 0);

        touch(&mut scrollbar, TouchEvent::Moved { id: 0, x: 10.0, y: 35.0 }, InputContext::document());
        assert_eq!(scrollbar.scroll_top(), 50.0);
        assert_eq!(scrollbar.scroll_left(), 0.0);

        touch(&mut scrollbar, TouchEvent::Ended { id: 0 }, InputContext::document());
        assert_eq!(scrollbar.view().active_drags(), 0);
    }

    #[test]
    fn test_drag_resumes_after_overshoot() {
        let mut scrollbar = square();
        let thumb = scrollbar.view().thumb_element(Axis::Vertical).unwrap();
        let press = InputEvent::Mouse(MouseEvent::ButtonPressed {
            button: MouseButton::Left,
            x: 0.0,
            y: 0.0,
        });
        scrollbar.handle_input(&press, InputContext::element(thumb));

        let drag_to = |scrollbar: &mut Scrollbar<HeadlessSurface>, y: f32| {
            let moved = InputEvent::Mouse(MouseEvent::Moved { x: 0.0, y });
            scrollbar.handle_input(&moved, InputContext::document());
            scrollbar.scroll_top()
        };
        assert_eq!(drag_to(&mut scrollbar, 70.0), 100.0);
        assert_eq!(drag_to(&mut scrollbar, 60.0), 100.0);
        assert_eq!(drag_to(&mut scrollbar, 40.0), 80.0);
    }

    #[test]
    fn test_interaction_disabled() {
        let options = ScrollbarOptions::default().disable_interaction_with_scrollbars();
        let mut scrollbar = scrollbar((100.0, 100.0), (200.0, 200.0), options);
        let thumb = scrollbar.view().thumb_element(Axis::Vertical).unwrap();
        let press = InputEvent::Mouse(MouseEvent::ButtonPressed {
            button: MouseButton::Left,
            x: 0.0,
            y: 0.0,
        });
        assert_eq!(
            scrollbar.handle_input(&press, InputContext::element(thumb)),
            EventResponse::Ignored
        );
        scrollbar.handle_input(&InputEvent::Mouse(MouseEvent::Moved { x: 0.0, y: 30.0 }), InputContext::document());
        assert_eq!(scrollbar.scroll_top(), 0.0);
    }

    #[test]
    fn test_polling_detects_resize() {
        let mut scrollbar = square();
        scrollbar.surface_mut().set_content_size(200.0, 400.0);

        scrollbar.tick(Duration::from_millis(299));
        assert_eq!(thumb_style(&scrollbar, Axis::Vertical, "height").as_deref(), Some("50px"));
        scrollbar.tick(Duration::from_millis(1));
        assert_eq!(thumb_style(&scrollbar, Axis::Vertical, "height").as_deref(), Some("25px"));
    }

    #[test]
    fn test_mutations_are_debounced() {
        let options = ScrollbarOptions::default().use_mutation_observer(true);
        let mut scrollbar = scrollbar((100.0, 100.0), (200.0, 200.0), options);

        scrollbar.surface_mut().set_content_size(200.0, 400.0);
        scrollbar.tick(Duration::from_secs(2));
        assert_eq!(thumb_style(&scrollbar, Axis::Vertical, "height").as_deref(), Some("50px"));

        scrollbar.notify_mutation();
        scrollbar.tick(Duration::from_millis(200));
        scrollbar.notify_mutation();
        scrollbar.tick(Duration::from_millis(200));
        assert_eq!(thumb_style(&scrollbar, Axis::Vertical, "height").as_deref(), Some("50px"));
        scrollbar.tick(Duration::from_millis(100));
        assert_eq!(thumb_style(&scrollbar, Axis::Vertical, "height").as_deref(), Some("25px"));
    }

    #[test]
    fn test_missing_mutation_support_falls_back_to_polling() {
        let surface = HeadlessSurface::new(100.0, 100.0, 200.0, 200.0);
        let environment = InputEnvironment::default().with_mutation_observer(false);
        let options = ScrollbarOptions::default().use_mutation_observer(true);
        let mut scrollbar = Scrollbar::with_environment(surface, options, environment).unwrap();

        scrollbar.surface_mut().set_content_size(400.0, 200.0);
        scrollbar.tick(Duration::from_millis(300));
        assert_eq!(thumb_style(&scrollbar, Axis::Horizontal, "width").as_deref(), Some("25px"));
    }

    #[test]
    fn test_invalid_interval_uses_default() {
        let options = ScrollbarOptions::default().check_interval_ms(0.0);
        let mut scrollbar = scrollbar((100.0, 100.0), (200.0, 200.0), options);
        scrollbar.surface_mut().set_content_size(200.0, 400.0);
        scrollbar.tick(Duration::from_millis(1));
        assert_eq!(thumb_style(&scrollbar, Axis::Vertical, "height").as_deref(), Some("50px"));
        scrollbar.tick(Duration::from_millis(299));
        assert_eq!(thumb_style(&scrollbar, Axis::Vertical, "height").as_deref(), Some("25px"));
    }

    #[test]
    fn test_external_scroll_resynced() {
        let mut scrollbar = square();
        let seen = record_events(&mut scrollbar, "scrollTopChanged");

        scrollbar.surface_mut().scroll_externally(Axis::Vertical, 40.0);
        scrollbar.tick(Duration::from_millis(300));

        assert_eq!(*seen.borrow(), vec![(0.0, 40.0)]);
        assert_eq!(scrollbar.scroll_top(), 40.0);
        // 40 + 40 / 100 * (100 - 50)
        assert_eq!(thumb_style(&scrollbar, Axis::Vertical, "top").as_deref(), Some("60px"));
        assert_eq!(thumb_style(&scrollbar, Axis::Horizontal, "top").as_deref(), Some("140px"));
    }

    #[test]
    fn test_long_tick_polls_once() {
        let mut scrollbar = square();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        scrollbar
            .add_event_listener("scrollTopChanged", move |event| {
                *counter.borrow_mut() += 1;
                event.prevent_default();
            })
            .unwrap();

        scrollbar.surface_mut().scroll_externally(Axis::Vertical, 40.0);
        scrollbar.tick(Duration::from_secs(60));
        assert_eq!(*calls.borrow(), 1);

        scrollbar.tick(Duration::from_millis(300));
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn test_oversized_interval_polls_at_default() {
        let options = ScrollbarOptions::from_json(r#"{ "checkInterval": 1e30 }"#).unwrap();
        let mut scrollbar = scrollbar((100.0, 100.0), (200.0, 200.0), options);
        scrollbar.surface_mut().set_content_size(200.0, 400.0);
        scrollbar.tick(Duration::from_millis(300));
        assert_eq!(thumb_style(&scrollbar, Axis::Vertical, "height").as_deref(), Some("25px"));
    }

    #[test]
    fn test_external_scroll_on_disabled_axis_not_resynced() {
        let options = ScrollbarOptions::default().disable_axis(Axis::Vertical);
        let mut scrollbar = scrollbar((100.0, 100.0), (200.0, 200.0), options);
        let seen = record_events(&mut scrollbar, "scrollTopChanged");

        scrollbar.surface_mut().scroll_externally(Axis::Vertical, 40.0);
        scrollbar.tick(Duration::from_millis(300));
        scrollbar.tick(Duration::from_millis(300));

        assert!(seen.borrow().is_empty());
        assert_eq!(scrollbar.offsets.top, 0.0);
        assert!(scrollbar.view().thumb(Axis::Vertical).is_none());
    }

    #[test]
    fn test_geometry_check_restores_thumb_positions() {
        let mut scrollbar = square();
        scrollbar.set_scroll_top(100.0);
        scrollbar.check_geometry();
        assert_eq!(thumb_style(&scrollbar, Axis::Vertical, "top").as_deref(), Some("150px"));
        assert_eq!(thumb_style(&scrollbar, Axis::Horizontal, "top").as_deref(), Some("200px"));
    }

    #[test]
    fn test_destroy_releases_in_flight_gestures() {
        let mut scrollbar = square();
        let thumb = scrollbar.view().thumb_element(Axis::Horizontal).unwrap();
        touch(&mut scrollbar, TouchEvent::Started { id: 7, x: 50.0, y: 50.0 }, InputContext::container());
        let press = InputEvent::Mouse(MouseEvent::ButtonPressed {
            button: MouseButton::Left,
            x: 0.0,
            y: 0.0,
        });
        scrollbar.handle_input(&press, InputContext::element(thumb));
        assert_eq!(scrollbar.active_touches(), 1);
        assert_eq!(scrollbar.view().active_drags(), 1);

        scrollbar.destroy();
        assert!(scrollbar.is_destroyed());
        assert_eq!(scrollbar.active_touches(), 0);
        assert_eq!(scrollbar.view().active_drags(), 0);
        assert_eq!(scrollbar.surface().element_count(), 0);

        let moved = InputEvent::Mouse(MouseEvent::Moved { x: 40.0, y: 0.0 });
        assert_eq!(scrollbar.handle_input(&moved, InputContext::document()), EventResponse::Ignored);
        touch(&mut scrollbar, TouchEvent::Moved { id: 7, x: 0.0, y: 0.0 }, InputContext::document());
        touch(&mut scrollbar, TouchEvent::Ended { id: 7 }, InputContext::document());
        assert_eq!(scrollbar.scroll_left(), 0.0);
        assert_eq!(scrollbar.scroll_top(), 0.0);

        scrollbar.destroy();
    }

    #[test]
    fn test_setup_on_detached_container_fails() {
        let mut surface = HeadlessSurface::new(100.0, 100.0, 200.0, 200.0);
        surface.detach();
        let result = Scrollbar::with_environment(surface, ScrollbarOptions::default(), InputEnvironment::default());
        assert!(matches!(
            result,
            Err(ScrollbarError::Platform(poc_platform::PlatformError::Detached))
        ));
    }

    #[test]
    fn test_initial_layout_uses_live_offsets() {
        let mut surface = HeadlessSurface::new(100.0, 100.0, 200.0, 200.0);
        surface.scroll_externally(Axis::Vertical, 40.0);
        let scrollbar = Scrollbar::with_environment(surface, ScrollbarOptions::default(), InputEnvironment::default()).unwrap();
        assert_eq!(thumb_style(&scrollbar, Axis::Vertical, "top").as_deref(), Some("60px"));
        assert_eq!(scrollbar.scroll_top(), 40.0);
    }
}
