//! Offset, thumb, and wheel-delta arithmetic
//!
//! Pure functions of a [`ViewportGeometry`] snapshot. Nothing here can
//! produce NaN: degenerate sizes yield `None` or zero.

use poc_platform::{Axis, DeltaMode, ViewportGeometry};

use crate::environment::InputEnvironment;

/// Authoritative scroll offsets of a container
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollOffsets {
    pub top: f32,
    pub left: f32,
}

impl ScrollOffsets {
    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.left = value,
            Axis::Vertical => self.top = value,
        }
    }
}

/// Clamp an offset into `[0, scroll - client]`
pub fn clamp_offset(value: f32, geometry: &ViewportGeometry, axis: Axis) -> f32 {
    value.clamp(0.0, geometry.max_offset(axis))
}

/// Convert one wheel delta to pixels along `axis`
///
/// A fixed `delta_size` replaces unit conversion: the result is
/// `sign(delta) * delta_size`, and zero stays zero.
pub fn wheel_delta_pixels(
    delta: f32,
    mode: DeltaMode,
    axis: Axis,
    delta_size: Option<f32>,
    geometry: &ViewportGeometry,
    environment: &InputEnvironment,
) -> f32 {
    if !delta.is_finite() || delta == 0.0 {
        return 0.0;
    }
    if let Some(size) = delta_size {
        return delta.signum() * size;
    }
    match mode {
        DeltaMode::Pixel => delta,
        DeltaMode::Line => delta * environment.line_height,
        DeltaMode::Page => delta * geometry.client(axis),
    }
}

/// Thumb length `client² / scroll`, floored at `min_size`
///
/// `None` when the axis has nothing to scroll or a size is unusable.
pub fn thumb_length(client: f32, scroll: f32, min_size: Option<f32>) -> Option<f32> {
    if !client.is_finite() || !scroll.is_finite() || scroll <= 0.0 || client >= scroll {
        return None;
    }
    let length = client * client / scroll;
    Some(match min_size {
        Some(min) => length.max(min),
        None => length,
    })
}

/// Content pixels per thumb pixel, `scroll / client`
pub fn scale_factor(client: f32, scroll: f32) -> Option<f32> {
    if !client.is_finite() || !scroll.is_finite() || client <= 0.0 {
        return None;
    }
    Some(scroll / client)
}

/// Position of a thumb's leading edge in container coordinates
///
/// The thumb lives inside the scrolled content, so the visible window's
/// own offset is added to the in-track offset.
pub fn track_position(offset: f32, client: f32, scroll: f32, length: f32) -> f32 {
    let range = scroll - client;
    if range <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    offset + offset / range * (client - length)
}
