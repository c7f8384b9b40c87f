use crate::backend::{Canvas, TextAlign, TextBaseline, TextStyle};
use crate::color::Color;
use crate::layer::Layer;
use cgmath::Point2;

/// Static text, anchored within the layer according to the style's alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub style: TextStyle,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Label {
        Label {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    pub fn with_style(mut self, style: TextStyle) -> Label {
        self.style = style;
        self
    }

    pub fn with_color(mut self, color: Color) -> Label {
        self.style.color = color;
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub(crate) fn render(&self, layer: &Layer, canvas: &mut dyn Canvas) {
        if self.text.is_empty() {
            return;
        }
        canvas.text(anchor(layer, &self.style), &self.text, &self.style);
    }
}

/// The point text is anchored at, for the given alignment.
pub(crate) fn anchor(layer: &Layer, style: &TextStyle) -> Point2<f32> {
    let size = layer.size();
    let x = match style.align {
        TextAlign::Left => 0.,
        TextAlign::Center => size.x / 2.,
        TextAlign::Right => size.x,
    };
    let y = match style.baseline {
        TextBaseline::Top => 0.,
        TextBaseline::Middle => size.y / 2.,
        TextBaseline::Bottom => size.y,
    };
    Point2::new(x, y)
}
