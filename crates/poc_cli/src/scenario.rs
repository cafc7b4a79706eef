//! Scenario file handling
//!
//! A scenario describes a container, its content, scrollbar options and a
//! script of input steps:
//!
//! ```toml
//! [container]
//! width = 100
//! height = 100
//!
//! [content]
//! width = 200
//! height = 400
//!
//! [options]
//! yMinSize = 20
//!
//! [[step]]
//! kind = "wheel"
//! dy = 25
//!
//! [[step]]
//! kind = "drag"
//! axis = "y"
//! from = 10
//! to = 35
//! ```

use anyhow::{Context, Result};
use poc_platform::{Axis, DeltaMode};
use poc_scrollbar::ScrollbarOptions;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// One scripted action
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Wheel over the container
    Wheel {
        #[serde(default)]
        dx: f32,
        #[serde(default)]
        dy: f32,
        #[serde(default)]
        mode: DeltaMode,
        #[serde(default)]
        shift: bool,
    },
    /// Press a thumb at `from` along its axis, move to `to`, release
    Drag { axis: Axis, from: f32, to: f32 },
    /// Pan the container with one finger
    Touch {
        #[serde(default)]
        id: u64,
        from: [f32; 2],
        to: [f32; 2],
    },
    /// Set an offset directly
    Scroll { axis: Axis, value: f32 },
    /// Change the content size and report the mutation
    Resize {
        content_width: f32,
        content_height: f32,
    },
    /// Let time pass
    Tick { ms: u64 },
    /// Remove the container from the document
    Detach,
}

impl Step {
    /// Short human-readable description
    pub fn label(&self) -> String {
        match self {
            Step::Wheel { dx, dy, mode, shift } => {
                let shift = if *shift { " +shift" } else { "" };
                format!("wheel dx={dx} dy={dy} ({mode:?}){shift}")
            }
            Step::Drag { axis, from, to } => format!("drag {axis} thumb {from} -> {to}"),
            Step::Touch { id, from, to } => {
                format!("touch #{id} ({}, {}) -> ({}, {})", from[0], from[1], to[0], to[1])
            }
            Step::Scroll { axis, value } => format!("scroll {axis} to {value}"),
            Step::Resize {
                content_width,
                content_height,
            } => format!("resize content to {content_width}x{content_height}"),
            Step::Tick { ms } => format!("tick {ms}ms"),
            Step::Detach => "detach container".to_string(),
        }
    }
}

/// A parsed scenario file
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub container: Size,
    pub content: Size,
    #[serde(default)]
    pub options: ScrollbarOptions,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parse scenario TOML
    pub fn parse(source: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(source).context("Failed to parse scenario")?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load and parse a scenario file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    /// Reject sizes a container cannot have
    pub fn validate(&self) -> Result<()> {
        for (name, size) in [("container", self.container), ("content", self.content)] {
            check_length(name, "width", size.width)?;
            check_length(name, "height", size.height)?;
        }
        for (index, step) in self.steps.iter().enumerate() {
            if let Step::Resize {
                content_width,
                content_height,
            } = step
            {
                let name = format!("step {}", index + 1);
                check_length(&name, "content_width", *content_width)?;
                check_length(&name, "content_height", *content_height)?;
            }
        }
        Ok(())
    }
}

fn check_length(name: &str, field: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        anyhow::bail!("{name} {field} must be a non-negative number, got {value}");
    }
    Ok(())
}
