use super::{hit, WidgetCx};
use crate::backend::Canvas;
use crate::color::Color;
use crate::config::defaults::SWITCH_SNAP_EPSILON;
use crate::context::{Callback, EventContext};
use crate::events::{Event, MouseButton};
use crate::layer::Layer;
use cgmath::{InnerSpace, Point2};
use core::fmt;
use tracing::debug;

/// An on/off toggle with a sliding knob.
///
/// `progress` eases toward 0 (off) or 1 (on) in [`update`](Switch::update), independently of
/// event handling.
pub struct Switch {
    on: bool,
    progress: f32,
    pub off_color: Color,
    pub on_color: Color,
    pub knob_color: Color,
    /// Parent-space position of the press in progress.
    press: Option<Point2<f32>>,
    on_toggle: Option<Callback<bool>>,
}

impl fmt::Debug for Switch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Switch")
            .field("on", &self.on)
            .field("progress", &self.progress)
            .finish()
    }
}

impl Switch {
    pub fn new(on: bool) -> Switch {
        Switch {
            on,
            progress: if on { 1. } else { 0. },
            off_color: Color::rgb8(80, 80, 80),
            on_color: Color::rgb8(52, 120, 246),
            knob_color: Color::WHITE,
            press: None,
            on_toggle: None,
        }
    }

    pub fn on_toggle<F: FnMut(&mut EventContext<'_>, bool) + 'static>(mut self, f: F) -> Switch {
        self.on_toggle = Some(Box::new(f));
        self
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Sets the state without calling the toggle callback. If `animated` is false, the knob
    /// jumps to its end position.
    pub fn set_on(&mut self, on: bool, animated: bool) {
        self.on = on;
        if !animated {
            self.progress = self.target();
        }
    }

    fn target(&self) -> f32 {
        if self.on {
            1.
        } else {
            0.
        }
    }

    pub(crate) fn update(&mut self, dt: f32, speed: f32) -> bool {
        let target = self.target();
        let diff = target - self.progress;
        if diff == 0. {
            return false;
        }
        if diff.abs() < SWITCH_SNAP_EPSILON {
            self.progress = target;
            return true;
        }
        let step = speed * dt.max(0.);
        self.progress = if diff > 0. {
            (self.progress + step).min(target)
        } else {
            (self.progress - step).max(target)
        };
        true
    }

    pub(crate) fn render(&self, layer: &Layer, canvas: &mut dyn Canvas) {
        let size = layer.size();
        let radius = size.y / 2.;
        let track = self.off_color.lerp(self.on_color, self.progress);
        canvas.fill_rect(layer.bounds.local(), radius, track);

        let knob_x = radius + (size.x - 2. * radius) * self.progress;
        canvas.fill_circle(Point2::new(knob_x, radius), radius - 2., self.knob_color);
    }

    pub(crate) fn handle_event(&mut self, layer: &Layer, event: &Event, cx: &mut WidgetCx) -> bool {
        match *event {
            Event::PointerPress {
                position,
                button: MouseButton::Left,
                ..
            } if hit(layer, position) => {
                self.press = cx.parent_position;
                true
            }
            Event::PointerRelease {
                button: MouseButton::Left,
                ..
            } => {
                let start = match self.press.take() {
                    Some(start) => start,
                    None => return false,
                };
                let end = cx.parent_position.unwrap_or(start);
                if (end - start).magnitude() <= cx.config.click_slop {
                    self.on = !self.on;
                    debug!(id = ?cx.id, on = self.on, "switch toggled");
                    let on = self.on;
                    cx.emit(&mut self.on_toggle, on);
                }
                true
            }
            _ => false,
        }
    }
}
