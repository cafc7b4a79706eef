//! Scenario replay against an in-memory container

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use poc_platform::{
    Axis, EventResponse, HeadlessSurface, InputContext, InputEvent, Modifiers, MouseButton,
    MouseEvent, TouchEvent, WheelEvent,
};
use poc_scrollbar::Scrollbar;
use tracing::{debug, warn};

use crate::scenario::{Scenario, Step};

/// State after one step
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub label: String,
    pub response: EventResponse,
    pub scroll_top: f32,
    pub scroll_left: f32,
    /// Inline styles of each thumb that still exists
    pub thumbs: Vec<(Axis, String)>,
    pub destroyed: bool,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n  scrollTop={} scrollLeft={}",
            self.label, self.scroll_top, self.scroll_left
        )?;
        if self.response.is_prevented() {
            write!(f, " (default prevented)")?;
        }
        if self.destroyed {
            write!(f, "\n  scrollbar destroyed")?;
        }
        for (axis, style) in &self.thumbs {
            write!(f, "\n  {axis} thumb: {style}")?;
        }
        Ok(())
    }
}

/// Replay every step of a scenario, returning the state after each
pub fn run(scenario: &Scenario) -> Result<Vec<Snapshot>> {
    let surface = HeadlessSurface::new(
        scenario.container.width,
        scenario.container.height,
        scenario.content.width,
        scenario.content.height,
    );
    let mut scrollbar = Scrollbar::new(surface, scenario.options.clone())?;

    let mut snapshots = vec![snapshot(&scrollbar, "initial".to_string(), EventResponse::Ignored)];
    for step in &scenario.steps {
        debug!(step = %step.label(), "applying step");
        let response = apply(&mut scrollbar, step);
        snapshots.push(snapshot(&scrollbar, step.label(), response));
    }
    Ok(snapshots)
}

fn apply(scrollbar: &mut Scrollbar<HeadlessSurface>, step: &Step) -> EventResponse {
    match *step {
        Step::Wheel {
            dx,
            dy,
            mode,
            shift,
        } => {
            let modifiers = if shift { Modifiers::SHIFT } else { Modifiers::default() };
            let wheel = WheelEvent::pixels(dx, dy)
                .with_mode(mode)
                .with_modifiers(modifiers);
            scrollbar.handle_input(&InputEvent::Wheel(wheel), InputContext::container())
        }
        Step::Drag { axis, from, to } => {
            let Some(thumb) = scrollbar.view().thumb_element(axis) else {
                warn!(%axis, "no thumb to drag");
                return EventResponse::Ignored;
            };
            let point = |along: f32| match axis {
                Axis::Horizontal => (along, 0.0),
                Axis::Vertical => (0.0, along),
            };
            let (x, y) = point(from);
            let press = MouseEvent::ButtonPressed {
                button: MouseButton::Left,
                x,
                y,
            };
            let pressed = scrollbar.handle_input(&InputEvent::Mouse(press), InputContext::element(thumb));
            let (x, y) = point(to);
            let moved = scrollbar.handle_input(
                &InputEvent::Mouse(MouseEvent::Moved { x, y }),
                InputContext::document(),
            );
            let release = MouseEvent::ButtonReleased {
                button: MouseButton::Left,
                x,
                y,
            };
            scrollbar.handle_input(&InputEvent::Mouse(release), InputContext::document());
            pressed.or(moved)
        }
        Step::Touch { id, from, to } => {
            let start = TouchEvent::Started {
                id,
                x: from[0],
                y: from[1],
            };
            scrollbar.handle_input(&InputEvent::Touch(start), InputContext::container());
            let moved = TouchEvent::Moved { id, x: to[0], y: to[1] };
            let response = scrollbar.handle_input(&InputEvent::Touch(moved), InputContext::document());
            scrollbar.handle_input(&InputEvent::Touch(TouchEvent::Ended { id }), InputContext::document());
            response
        }
        Step::Scroll { axis, value } => {
            scrollbar.set_offset(axis, value);
            EventResponse::Ignored
        }
        Step::Resize {
            content_width,
            content_height,
        } => {
            scrollbar.surface_mut().set_content_size(content_width, content_height);
            scrollbar.notify_mutation();
            EventResponse::Ignored
        }
        Step::Tick { ms } => {
            scrollbar.tick(Duration::from_millis(ms));
            EventResponse::Ignored
        }
        Step::Detach => {
            scrollbar.surface_mut().detach();
            EventResponse::Ignored
        }
    }
}

fn snapshot(scrollbar: &Scrollbar<HeadlessSurface>, label: String, response: EventResponse) -> Snapshot {
    let thumbs = Axis::ALL
        .into_iter()
        .filter_map(|axis| {
            let element = scrollbar.view().thumb_element(axis)?;
            let styles = scrollbar
                .surface()
                .element(element)?
                .styles
                .iter()
                .map(|(property, value)| format!("{property}: {value}"))
                .collect::<Vec<_>>()
                .join("; ");
            Some((axis, styles))
        })
        .collect();

    Snapshot {
        label,
        response,
        scroll_top: scrollbar.scroll_top(),
        scroll_left: scrollbar.scroll_left(),
        thumbs,
        destroyed: scrollbar.is_destroyed(),
    }
}
