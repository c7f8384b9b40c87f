use super::{hit, WidgetCx};
use crate::backend::{Canvas, TextStyle};
use crate::color::Color;
use crate::context::{Callback, EventContext};
use crate::events::{Event, MouseButton};
use crate::layer::Layer;
use crate::rect::Rect;
use cgmath::Point2;
use core::fmt;
use tracing::debug;

const BOX_SIZE: f32 = 16.;
const LABEL_GAP: f32 = 8.;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckboxKind {
    /// Toggles on every click.
    Checkbox,
    /// Only ever checks itself; checking it unchecks the other radios of the same group.
    Radio { group: String },
}

/// A labelled checkbox or radio button.
///
/// A click requires both the press and the release to happen inside the bounds.
pub struct Checkbox {
    pub label: String,
    pub label_style: TextStyle,
    pub accent: Color,
    kind: CheckboxKind,
    checked: bool,
    pressed: bool,
    on_change: Option<Callback<bool>>,
}

impl fmt::Debug for Checkbox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Checkbox")
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("checked", &self.checked)
            .finish()
    }
}

impl Checkbox {
    pub fn new(label: impl Into<String>, checked: bool) -> Checkbox {
        Checkbox {
            label: label.into(),
            label_style: TextStyle::default(),
            accent: Color::rgb8(52, 120, 246),
            kind: CheckboxKind::Checkbox,
            checked,
            pressed: false,
            on_change: None,
        }
    }

    pub fn radio(label: impl Into<String>, group: impl Into<String>, checked: bool) -> Checkbox {
        Checkbox {
            kind: CheckboxKind::Radio {
                group: group.into(),
            },
            ..Checkbox::new(label, checked)
        }
    }

    pub fn on_change<F: FnMut(&mut EventContext<'_>, bool) + 'static>(mut self, f: F) -> Checkbox {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn kind(&self) -> &CheckboxKind {
        &self.kind
    }

    /// The radio group, if this is a radio button.
    pub fn group(&self) -> Option<&str> {
        match &self.kind {
            CheckboxKind::Radio { group } => Some(group),
            CheckboxKind::Checkbox => None,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Sets the state without calling the change callback or touching the radio group.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub(crate) fn render(&self, layer: &Layer, canvas: &mut dyn Canvas) {
        let mid = layer.size().y / 2.;
        let rect = Rect::from_xywh(0., mid - BOX_SIZE / 2., BOX_SIZE, BOX_SIZE);
        let center = rect.center();

        match self.kind {
            CheckboxKind::Checkbox => {
                canvas.stroke_rect(rect, 3., 1.5, self.label_style.color);
                if self.checked {
                    canvas.fill_rect(rect, 3., self.accent);
                    let s = BOX_SIZE;
                    let points = [
                        Point2::new(rect.origin.x + s * 0.25, rect.origin.y + s * 0.5),
                        Point2::new(rect.origin.x + s * 0.45, rect.origin.y + s * 0.7),
                        Point2::new(rect.origin.x + s * 0.75, rect.origin.y + s * 0.3),
                    ];
                    canvas.stroke_polyline(&points, 2., Color::WHITE);
                }
            }
            CheckboxKind::Radio { .. } => {
                canvas.stroke_rect(rect, BOX_SIZE / 2., 1.5, self.label_style.color);
                if self.checked {
                    canvas.fill_circle(center, BOX_SIZE / 4., self.accent);
                }
            }
        }

        canvas.text(
            Point2::new(BOX_SIZE + LABEL_GAP, mid),
            &self.label,
            &self.label_style,
        );
    }

    pub(crate) fn handle_event(&mut self, layer: &Layer, event: &Event, cx: &mut WidgetCx) -> bool {
        match *event {
            Event::PointerPress {
                position,
                button: MouseButton::Left,
                ..
            } if hit(layer, position) => {
                self.pressed = true;
                true
            }
            Event::PointerRelease {
                position,
                button: MouseButton::Left,
                ..
            } if self.pressed => {
                self.pressed = false;
                if hit(layer, position) {
                    self.click(cx);
                }
                true
            }
            _ => false,
        }
    }

    fn click(&mut self, cx: &mut WidgetCx) {
        match &self.kind {
            CheckboxKind::Checkbox => self.checked = !self.checked,
            CheckboxKind::Radio { group } => {
                if self.checked {
                    return;
                }
                self.checked = true;
                let group = group.clone();
                let id = cx.id;
                cx.commands
                    .push(move |ui| ui.tree.uncheck_radio_group(&group, id));
            }
        }
        debug!(id = ?cx.id, checked = self.checked, "checkbox changed");
        let checked = self.checked;
        cx.emit(&mut self.on_change, checked);
    }
}
