use super::{hit, WidgetCx};
use crate::backend::{Canvas, TextAlign, TextStyle};
use crate::color::Color;
use crate::context::{Callback, EventContext};
use crate::events::{Event, MouseButton};
use crate::layer::Layer;
use cgmath::Point2;
use core::fmt;

/// A push button. Clicks on press-release inside the bounds with the left button.
pub struct Button {
    pub text: String,
    pub text_style: TextStyle,
    pub color: Color,
    pub hover_color: Color,
    pub pressed_color: Color,
    hovered: bool,
    pressed: bool,
    on_click: Option<Callback<()>>,
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Button")
            .field("text", &self.text)
            .field("hovered", &self.hovered)
            .field("pressed", &self.pressed)
            .finish()
    }
}

impl Button {
    pub fn new(text: impl Into<String>) -> Button {
        Button {
            text: text.into(),
            text_style: TextStyle {
                align: TextAlign::Center,
                ..TextStyle::default()
            },
            color: Color::rgb8(64, 64, 64),
            hover_color: Color::rgb8(90, 90, 90),
            pressed_color: Color::rgb8(45, 45, 45),
            hovered: false,
            pressed: false,
            on_click: None,
        }
    }

    pub fn on_click<F: FnMut(&mut EventContext<'_>, ()) + 'static>(mut self, f: F) -> Button {
        self.on_click = Some(Box::new(f));
        self
    }

    pub fn set_on_click(&mut self, callback: Option<Callback<()>>) {
        self.on_click = callback;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub(crate) fn render(&self, layer: &Layer, canvas: &mut dyn Canvas) {
        let color = if self.pressed {
            self.pressed_color
        } else if self.hovered {
            self.hover_color
        } else {
            self.color
        };
        let size = layer.size();
        canvas.fill_rect(layer.bounds.local(), layer.corner_radius, color);
        canvas.text(Point2::new(size.x / 2., size.y / 2.), &self.text, &self.text_style);
    }

    pub(crate) fn handle_event(&mut self, layer: &Layer, event: &Event, cx: &mut WidgetCx) -> bool {
        match *event {
            Event::PointerMove { position } => {
                self.hovered = hit(layer, position);
                self.hovered
            }
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
                    cx.emit(&mut self.on_click, ());
                }
                true
            }
            _ => false,
        }
    }
}
