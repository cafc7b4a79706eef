//! Thumb element styling helpers

use poc_platform::{ElementId, ScrollSurface};

use crate::config::ThumbOptions;
use crate::error::Result;

/// Format a pixel length for a style property
///
/// Non-finite values render as `0px`.
pub fn px(value: f32) -> String {
    if value.is_finite() {
        format!("{}px", value)
    } else {
        "0px".to_string()
    }
}

/// Initial style of every thumb: absolutely placed, collapsed at the origin
pub fn apply_base_style<S: ScrollSurface + ?Sized>(surface: &mut S, element: ElementId) -> Result<()> {
    for property in ["width", "height", "top", "left"] {
        surface.set_style(element, property, "0px")?;
    }
    surface.set_style(element, "position", "absolute")?;
    Ok(())
}

/// Apply configured styles verbatim, then append configured classes
pub fn apply_thumb_options<S: ScrollSurface + ?Sized>(
    surface: &mut S,
    element: ElementId,
    options: &ThumbOptions<'_>,
) -> Result<()> {
    for (property, value) in options.styles {
        surface.set_style(element, property, value)?;
    }
    for class in options.classes.names() {
        surface.add_class(element, class)?;
    }
    Ok(())
}
