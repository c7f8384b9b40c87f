use super::{hit, WidgetCx};
use crate::backend::{Canvas, TextStyle};
use crate::color::Color;
use crate::config::defaults::CARET_BLINK_PERIOD;
use crate::context::{Callback, EventContext};
use crate::events::{Event, KeyCode, MouseButton};
use crate::layer::Layer;
use cgmath::Point2;
use core::fmt;

const TEXT_PADDING: f32 = 6.;

/// A single-line text field.
///
/// Gains focus on a press inside and loses it on a press outside or Escape. While focused it
/// consumes typed characters and the editing keys; Enter submits.
pub struct TextInput {
    text: String,
    /// Caret position, in characters.
    caret: usize,
    focused: bool,
    blink: f32,
    pub placeholder: String,
    pub max_length: Option<usize>,
    pub text_style: TextStyle,
    pub focus_border: Color,
    on_change: Option<Callback<String>>,
    on_submit: Option<Callback<String>>,
    on_focus: Option<Callback<bool>>,
}

impl fmt::Debug for TextInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TextInput")
            .field("text", &self.text)
            .field("caret", &self.caret)
            .field("focused", &self.focused)
            .finish()
    }
}

impl TextInput {
    pub fn new(placeholder: impl Into<String>) -> TextInput {
        TextInput {
            text: String::new(),
            caret: 0,
            focused: false,
            blink: 0.,
            placeholder: placeholder.into(),
            max_length: None,
            text_style: TextStyle::default(),
            focus_border: Color::rgb8(52, 120, 246),
            on_change: None,
            on_submit: None,
            on_focus: None,
        }
    }

    pub fn max_length(mut self, max_length: usize) -> TextInput {
        self.max_length = Some(max_length);
        self
    }

    pub fn on_change<F: FnMut(&mut EventContext<'_>, String) + 'static>(mut self, f: F) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn on_submit<F: FnMut(&mut EventContext<'_>, String) + 'static>(mut self, f: F) -> Self {
        self.on_submit = Some(Box::new(f));
        self
    }

    pub fn on_focus<F: FnMut(&mut EventContext<'_>, bool) + 'static>(mut self, f: F) -> Self {
        self.on_focus = Some(Box::new(f));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Replaces the text (truncated to the maximum length) and moves the caret to the end.
    /// Doesn't call the change callback.
    pub fn set_text(&mut self, text: &str) {
        self.text = match self.max_length {
            Some(max) => text.chars().take(max).collect(),
            None => text.to_string(),
        };
        self.caret = self.char_count();
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub(crate) fn set_focused(&mut self, focused: bool, cx: &mut WidgetCx) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        self.blink = 0.;
        cx.emit(&mut self.on_focus, focused);
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of a character index.
    fn byte_index(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(index, _)| index)
    }

    fn changed(&mut self, cx: &mut WidgetCx) {
        self.blink = 0.;
        let text = self.text.clone();
        cx.emit(&mut self.on_change, text);
    }

    fn insert(&mut self, c: char, cx: &mut WidgetCx) {
        if c.is_control() {
            return;
        }
        if let Some(max) = self.max_length {
            if self.char_count() >= max {
                return;
            }
        }
        let index = self.byte_index(self.caret);
        self.text.insert(index, c);
        self.caret += 1;
        self.changed(cx);
    }

    fn edit(&mut self, key: KeyCode, cx: &mut WidgetCx) -> bool {
        match key {
            KeyCode::Backspace => {
                if self.caret > 0 {
                    self.caret -= 1;
                    let index = self.byte_index(self.caret);
                    self.text.remove(index);
                    self.changed(cx);
                }
            }
            KeyCode::Delete => {
                if self.caret < self.char_count() {
                    let index = self.byte_index(self.caret);
                    self.text.remove(index);
                    self.changed(cx);
                }
            }
            KeyCode::LeftArrow => self.caret = self.caret.saturating_sub(1),
            KeyCode::RightArrow => self.caret = (self.caret + 1).min(self.char_count()),
            KeyCode::Home => self.caret = 0,
            KeyCode::End => self.caret = self.char_count(),
            KeyCode::Return => {
                let text = self.text.clone();
                cx.emit(&mut self.on_submit, text);
            }
            KeyCode::Escape => self.set_focused(false, cx),
            _ => return false,
        }
        self.blink = 0.;
        true
    }

    pub(crate) fn update(&mut self, dt: f32) -> bool {
        if !self.focused {
            return false;
        }
        self.blink = (self.blink + dt.max(0.)) % CARET_BLINK_PERIOD;
        true
    }

    pub(crate) fn render(&self, layer: &Layer, canvas: &mut dyn Canvas) {
        let size = layer.size();
        let mid = size.y / 2.;

        if self.focused {
            canvas.stroke_rect(layer.bounds.local(), layer.corner_radius, 1.5, self.focus_border);
        }

        if self.text.is_empty() {
            let mut style = self.text_style;
            style.color.a *= 0.5;
            canvas.text(Point2::new(TEXT_PADDING, mid), &self.placeholder, &style);
        } else {
            canvas.text(Point2::new(TEXT_PADDING, mid), &self.text, &self.text_style);
        }

        if self.focused && self.blink < CARET_BLINK_PERIOD / 2. {
            let prefix = &self.text[..self.byte_index(self.caret)];
            let x = TEXT_PADDING + canvas.text_width(prefix, self.text_style.size);
            let half = self.text_style.size / 2.;
            canvas.stroke_polyline(
                &[Point2::new(x, mid - half), Point2::new(x, mid + half)],
                1.,
                self.text_style.color,
            );
        }
    }

    pub(crate) fn handle_event(&mut self, layer: &Layer, event: &Event, cx: &mut WidgetCx) -> bool {
        match *event {
            Event::PointerPress {
                position,
                button: MouseButton::Left,
                ..
            } => {
                if hit(layer, position) {
                    self.set_focused(true, cx);
                    self.caret = self.char_count();
                    true
                } else {
                    self.set_focused(false, cx);
                    false
                }
            }
            Event::Text(c) if self.focused => {
                self.insert(c, cx);
                true
            }
            Event::KeyPress { key, .. } if self.focused => self.edit(key, cx),
            _ => false,
        }
    }
}
