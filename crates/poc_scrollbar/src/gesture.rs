//! Pointer gesture tracking
//!
//! A [`GestureTracker`] follows one pointer from press to release. Two
//! kinds exist:
//!
//! - **Container pan**: a touch dragged across the content scrolls it 1:1,
//!   opposite to the finger's direction.
//! - **Thumb drag**: a pointer dragging a thumb moves the content by the
//!   pointer distance times the axis scale factor. The intended position
//!   is accumulated as a float and never corrected by clamping, so dragging
//!   past an end and back resumes exactly where the pointer is.

use poc_core::TeardownKey;
use poc_platform::{Axis, PointerId};
use slotmap::new_key_type;

new_key_type! {
    /// Handle to an open gesture
    pub struct GestureId;
}

/// An absolute offset a gesture asks the controller to apply
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetRequest {
    pub axis: Axis,
    pub value: f32,
}

/// What a pointer move means for the scroll offsets
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureMove {
    /// Scroll by relative distances; `None` where the axis may not pan
    Pan {
        dx: Option<f32>,
        dy: Option<f32>,
    },
    /// Move one axis to an absolute offset
    Drag(OffsetRequest),
}

/// Gesture kind with its per-kind state
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureKind {
    ContainerPan {
        pan_x: bool,
        pan_y: bool,
    },
    ThumbDrag {
        axis: Axis,
        scale: f32,
        accumulator: f32,
    },
}

/// One tracked pointer
#[derive(Clone, Debug)]
pub struct GestureTracker {
    pointer: PointerId,
    last_x: f32,
    last_y: f32,
    kind: GestureKind,
    teardown: Option<TeardownKey>,
}

impl GestureTracker {
    /// Track a touch panning the container
    pub fn pan(pointer: PointerId, x: f32, y: f32, pan_x: bool, pan_y: bool) -> Self {
        Self {
            pointer,
            last_x: x,
            last_y: y,
            kind: GestureKind::ContainerPan { pan_x, pan_y },
            teardown: None,
        }
    }

    /// Track a pointer dragging the thumb of `axis`, starting at `offset`
    pub fn drag(pointer: PointerId, x: f32, y: f32, axis: Axis, scale: f32, offset: f32) -> Self {
        Self {
            pointer,
            last_x: x,
            last_y: y,
            kind: GestureKind::ThumbDrag {
                axis,
                scale,
                accumulator: offset,
            },
            teardown: None,
        }
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    /// Remember the teardown registration owning this gesture
    pub fn set_teardown(&mut self, key: TeardownKey) {
        self.teardown = Some(key);
    }

    pub fn teardown(&self) -> Option<TeardownKey> {
        self.teardown
    }

    /// Feed the pointer's new position
    pub fn advance(&mut self, x: f32, y: f32) -> GestureMove {
        let (last_x, last_y) = (self.last_x, self.last_y);
        self.last_x = x;
        self.last_y = y;

        match &mut self.kind {
            GestureKind::ContainerPan { pan_x, pan_y } => GestureMove::Pan {
                dx: pan_x.then_some(last_x - x),
                dy: pan_y.then_some(last_y - y),
            },
            GestureKind::ThumbDrag {
                axis,
                scale,
                accumulator,
            } => {
                let delta = axis.component(x, y) - axis.component(last_x, last_y);
                *accumulator += delta * *scale;
                GestureMove::Drag(OffsetRequest {
                    axis: *axis,
                    value: accumulator.round(),
                })
            }
        }
    }
}
