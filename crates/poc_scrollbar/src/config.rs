//! Scrollbar configuration
//!
//! Every recognized option with its default. Option names follow the
//! camelCase spelling used by web hosts, so the same options parse from
//! JSON or TOML; unknown keys are ignored.
//!
//! # Example
//!
//! ```rust
//! use poc_platform::Axis;
//! use poc_scrollbar::ScrollbarOptions;
//!
//! let options = ScrollbarOptions::from_json(
//!     r#"{ "yElementClass": ["scrollbar", "vertical"], "yMinSize": 20, "whatever": 1 }"#,
//! )
//! .unwrap();
//! assert_eq!(options.thumb(Axis::Vertical).min_size, Some(20.0));
//!
//! let built = ScrollbarOptions::default()
//!     .element_class(Axis::Vertical, ["scrollbar", "vertical"])
//!     .min_size(Axis::Vertical, 20.0);
//! assert_eq!(built.thumb(Axis::Vertical).classes, options.thumb(Axis::Vertical).classes);
//! ```

use std::time::Duration;

use indexmap::IndexMap;
use poc_platform::Axis;
use serde::Deserialize;

use crate::error::{Result, ScrollbarError};

/// Default geometry check interval and debounce wait, in milliseconds
pub const DEFAULT_CHECK_INTERVAL_MS: f64 = 300.0;

/// CSS classes appended to a thumb element
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ClassList {
    /// A single class string (may hold several space-separated names)
    One(String),
    /// A list of class names
    Many(Vec<String>),
}

impl Default for ClassList {
    fn default() -> Self {
        ClassList::Many(Vec::new())
    }
}

impl ClassList {
    /// Individual class names
    pub fn names(&self) -> Vec<&str> {
        match self {
            ClassList::One(class) => class.split_whitespace().collect(),
            ClassList::Many(classes) => classes
                .iter()
                .flat_map(|class| class.split_whitespace())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names().is_empty()
    }
}

impl From<&str> for ClassList {
    fn from(class: &str) -> Self {
        ClassList::One(class.to_string())
    }
}

impl From<String> for ClassList {
    fn from(class: String) -> Self {
        ClassList::One(class)
    }
}

impl From<Vec<String>> for ClassList {
    fn from(classes: Vec<String>) -> Self {
        ClassList::Many(classes)
    }
}

impl<const N: usize> From<[&str; N]> for ClassList {
    fn from(classes: [&str; N]) -> Self {
        ClassList::Many(classes.iter().map(|c| c.to_string()).collect())
    }
}

/// Borrowed view of one axis's thumb options
#[derive(Clone, Copy, Debug)]
pub struct ThumbOptions<'a> {
    /// Inline styles applied verbatim
    pub styles: &'a IndexMap<String, String>,
    /// Classes appended to the element
    pub classes: &'a ClassList,
    /// Pixel floor for the computed thumb length
    pub min_size: Option<f32>,
}

/// Options recognized by [`Scrollbar`](crate::Scrollbar)
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrollbarOptions {
    /// Thumbs cannot be dragged
    pub disable_interaction_with_scrollbars: bool,
    /// Touch panning on the container does not scroll
    pub disable_touch_scrolling_on_container: bool,
    /// Use host mutation notifications (debounced) instead of polling
    pub use_mutation_observer: bool,
    /// Poll interval / debounce wait in milliseconds
    pub check_interval: f64,
    /// No horizontal thumb and no horizontal scrolling
    pub disable_x_scrolling: bool,
    /// No vertical thumb and no vertical scrolling
    pub disable_y_scrolling: bool,
    pub x_element_styles: IndexMap<String, String>,
    pub y_element_styles: IndexMap<String, String>,
    pub x_element_class: ClassList,
    pub y_element_class: ClassList,
    pub x_min_size: Option<f32>,
    pub y_min_size: Option<f32>,
    /// Fixed pixel distance per wheel notch, replacing unit conversion
    pub wheel_delta_size: Option<f32>,
}

impl Default for ScrollbarOptions {
    fn default() -> Self {
        Self {
            disable_interaction_with_scrollbars: false,
            disable_touch_scrolling_on_container: false,
            use_mutation_observer: false,
            check_interval: DEFAULT_CHECK_INTERVAL_MS,
            disable_x_scrolling: false,
            disable_y_scrolling: false,
            x_element_styles: IndexMap::new(),
            y_element_styles: IndexMap::new(),
            x_element_class: ClassList::default(),
            y_element_class: ClassList::default(),
            x_min_size: None,
            y_min_size: None,
            wheel_delta_size: None,
        }
    }
}

impl ScrollbarOptions {
    /// Parse options from a JSON object
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|err| ScrollbarError::Config(err.to_string()))
    }

    /// Parse options from a TOML table
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|err| ScrollbarError::Config(err.to_string()))
    }

    /// Replace values the scrollbar cannot use with their defaults
    pub fn sanitized(mut self) -> Self {
        if interval_duration(self.check_interval).is_none() {
            tracing::warn!(
                check_interval = self.check_interval,
                "invalid checkInterval, using default"
            );
            self.check_interval = DEFAULT_CHECK_INTERVAL_MS;
        }
        for (name, min_size) in [
            ("xMinSize", &mut self.x_min_size),
            ("yMinSize", &mut self.y_min_size),
        ] {
            if let Some(value) = *min_size {
                if !value.is_finite() || value < 0.0 {
                    tracing::warn!(option = name, value, "ignoring invalid thumb minimum size");
                    *min_size = None;
                }
            }
        }
        if let Some(size) = self.wheel_delta_size {
            if !size.is_finite() || size <= 0.0 {
                tracing::warn!(wheel_delta_size = size, "ignoring invalid wheelDeltaSize");
                self.wheel_delta_size = None;
            }
        }
        self
    }

    /// Poll interval / debounce wait
    pub fn check_interval_duration(&self) -> Duration {
        interval_duration(self.check_interval)
            .unwrap_or(Duration::from_millis(DEFAULT_CHECK_INTERVAL_MS as u64))
    }

    /// Whether scrolling along an axis is turned off
    pub fn axis_disabled(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.disable_x_scrolling,
            Axis::Vertical => self.disable_y_scrolling,
        }
    }

    /// Thumb options for an axis
    pub fn thumb(&self, axis: Axis) -> ThumbOptions<'_> {
        match axis {
            Axis::Horizontal => ThumbOptions {
                styles: &self.x_element_styles,
                classes: &self.x_element_class,
                min_size: self.x_min_size,
            },
            Axis::Vertical => ThumbOptions {
                styles: &self.y_element_styles,
                classes: &self.y_element_class,
                min_size: self.y_min_size,
            },
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Turn off thumb dragging
    pub fn disable_interaction_with_scrollbars(mut self) -> Self {
        self.disable_interaction_with_scrollbars = true;
        self
    }

    /// Turn off touch panning on the container
    pub fn disable_touch_scrolling_on_container(mut self) -> Self {
        self.disable_touch_scrolling_on_container = true;
        self
    }

    /// Choose mutation notifications over polling
    pub fn use_mutation_observer(mut self, enabled: bool) -> Self {
        self.use_mutation_observer = enabled;
        self
    }

    /// Set the poll interval / debounce wait in milliseconds
    pub fn check_interval_ms(mut self, ms: f64) -> Self {
        self.check_interval = ms;
        self
    }

    /// Turn off an axis entirely
    pub fn disable_axis(mut self, axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => self.disable_x_scrolling = true,
            Axis::Vertical => self.disable_y_scrolling = true,
        }
        self
    }

    /// Add an inline style to an axis's thumb
    pub fn element_style(
        mut self,
        axis: Axis,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let styles = match axis {
            Axis::Horizontal => &mut self.x_element_styles,
            Axis::Vertical => &mut self.y_element_styles,
        };
        styles.insert(property.into(), value.into());
        self
    }

    /// Set the classes of an axis's thumb
    pub fn element_class(mut self, axis: Axis, classes: impl Into<ClassList>) -> Self {
        match axis {
            Axis::Horizontal => self.x_element_class = classes.into(),
            Axis::Vertical => self.y_element_class = classes.into(),
        }
        self
    }

    /// Set the minimum thumb length along an axis
    pub fn min_size(mut self, axis: Axis, px: f32) -> Self {
        match axis {
            Axis::Horizontal => self.x_min_size = Some(px),
            Axis::Vertical => self.y_min_size = Some(px),
        }
        self
    }

    /// Scroll a fixed distance per wheel notch
    pub fn wheel_delta_size(mut self, px: f32) -> Self {
        self.wheel_delta_size = Some(px);
        self
    }
}

/// Milliseconds as a positive `Duration`, if representable
fn interval_duration(ms: f64) -> Option<Duration> {
    if ms.is_nan() || ms <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(ms / 1000.0).ok()
}
