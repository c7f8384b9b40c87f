use super::{hit, WidgetCx};
use crate::backend::{Canvas, TextStyle};
use crate::color::Color;
use crate::config::defaults::{DROPDOWN_ITEM_HEIGHT, DROPDOWN_MAX_LIST_HEIGHT};
use crate::context::{Callback, EventContext};
use crate::events::{Event, KeyCode, MouseButton};
use crate::layer::Layer;
use crate::rect::Rect;
use cgmath::Point2;
use core::fmt;
use tracing::debug;

const TEXT_PADDING: f32 = 8.;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownItem {
    pub text: String,
    pub enabled: bool,
}

/// A selection list that opens below its header.
///
/// The open list lies outside the layer bounds; hit-testing accounts for it, but the dropdown
/// should be painted after the siblings it may overlap.
pub struct Dropdown {
    items: Vec<DropdownItem>,
    selected: Option<usize>,
    open: bool,
    hovered_item: Option<usize>,
    scroll: f32,
    pub placeholder: String,
    pub text_style: TextStyle,
    pub list_color: Color,
    pub highlight_color: Color,
    on_change: Option<Callback<(usize, String)>>,
}

impl fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Dropdown")
            .field("items", &self.items)
            .field("selected", &self.selected)
            .field("open", &self.open)
            .finish()
    }
}

impl Default for Dropdown {
    fn default() -> Self {
        Dropdown {
            items: Vec::new(),
            selected: None,
            open: false,
            hovered_item: None,
            scroll: 0.,
            placeholder: String::new(),
            text_style: TextStyle::default(),
            list_color: Color::rgb8(40, 40, 40),
            highlight_color: Color::rgb8(52, 120, 246),
            on_change: None,
        }
    }
}

impl Dropdown {
    pub fn new<I, S>(items: I) -> Dropdown
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dropdown = Dropdown::default();
        for item in items {
            dropdown.add_item(item);
        }
        dropdown
    }

    /// Selection-changed callback; gets the index and text of the chosen item.
    pub fn on_change<F>(mut self, f: F) -> Dropdown
    where
        F: FnMut(&mut EventContext<'_>, (usize, String)) + 'static,
    {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn items(&self) -> &[DropdownItem] {
        &self.items
    }

    pub fn add_item(&mut self, text: impl Into<String>) {
        self.items.push(DropdownItem {
            text: text.into(),
            enabled: true,
        });
    }

    pub fn set_item_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(item) = self.items.get_mut(index) {
            item.enabled = enabled;
        }
    }

    /// Removes an item. The selection keeps pointing at the same item, or is cleared if that
    /// item was removed.
    pub fn remove_item(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.items.remove(index);
        self.selected = match self.selected {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            selected => selected,
        };
        self.hovered_item = None;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
        self.hovered_item = None;
        self.scroll = 0.;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.items.get(index))
            .map(|item| item.text.as_str())
    }

    /// Sets the selection without calling the callback. Out-of-range indices clear it.
    pub fn set_selected(&mut self, index: Option<usize>) {
        self.selected = index.filter(|index| *index < self.items.len());
    }

    /// The list item under the pointer.
    pub fn hovered_item(&self) -> Option<usize> {
        self.hovered_item
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
        self.hovered_item = None;
    }

    fn content_height(&self) -> f32 {
        self.items.len() as f32 * DROPDOWN_ITEM_HEIGHT
    }

    fn max_scroll(&self) -> f32 {
        (self.content_height() - DROPDOWN_MAX_LIST_HEIGHT).max(0.)
    }

    /// The open list, in local coordinates.
    fn list_rect(&self, layer: &Layer) -> Rect {
        let size = layer.size();
        let height = self.content_height().min(DROPDOWN_MAX_LIST_HEIGHT);
        Rect::from_xywh(0., size.y, size.x, height)
    }

    fn item_at(&self, layer: &Layer, point: Point2<f32>) -> Option<usize> {
        let list = self.list_rect(layer);
        if !self.open || !list.contains(point) {
            return None;
        }
        let index = ((point.y - list.origin.y + self.scroll) / DROPDOWN_ITEM_HEIGHT).floor();
        if index < 0. {
            return None;
        }
        Some(index as usize).filter(|index| *index < self.items.len())
    }

    fn select(&mut self, index: usize, cx: &mut WidgetCx) {
        self.selected = Some(index);
        let text = self.items[index].text.clone();
        debug!(id = ?cx.id, index, text = %text, "dropdown selection changed");
        cx.emit(&mut self.on_change, (index, text));
    }

    pub(crate) fn render(&self, layer: &Layer, canvas: &mut dyn Canvas) {
        let size = layer.size();
        let mid = size.y / 2.;

        let header = self.selected_text().unwrap_or(&self.placeholder);
        canvas.text(Point2::new(TEXT_PADDING, mid), header, &self.text_style);

        // disclosure triangle
        let x = size.x - TEXT_PADDING - 8.;
        let arrow = if self.open {
            [
                Point2::new(x, mid + 2.),
                Point2::new(x + 4., mid - 2.),
                Point2::new(x + 8., mid + 2.),
            ]
        } else {
            [
                Point2::new(x, mid - 2.),
                Point2::new(x + 4., mid + 2.),
                Point2::new(x + 8., mid - 2.),
            ]
        };
        canvas.stroke_polyline(&arrow, 1.5, self.text_style.color);

        if !self.open || self.items.is_empty() {
            return;
        }

        let list = self.list_rect(layer);
        canvas.fill_rect(list, layer.corner_radius, self.list_color);
        let first = (self.scroll / DROPDOWN_ITEM_HEIGHT).floor() as usize;
        let last = ((self.scroll + list.size.y) / DROPDOWN_ITEM_HEIGHT).ceil() as usize;
        for (index, item) in self
            .items
            .iter()
            .enumerate()
            .take(last.min(self.items.len()))
            .skip(first)
        {
            let y = list.origin.y + index as f32 * DROPDOWN_ITEM_HEIGHT - self.scroll;
            if self.hovered_item == Some(index) && item.enabled {
                let row = Rect::from_xywh(0., y, size.x, DROPDOWN_ITEM_HEIGHT);
                canvas.fill_rect(row, 0., self.highlight_color);
            }
            let mut style = self.text_style;
            if !item.enabled {
                style.color.a *= 0.4;
            }
            canvas.text(
                Point2::new(TEXT_PADDING, y + DROPDOWN_ITEM_HEIGHT / 2.),
                &item.text,
                &style,
            );
        }
    }

    pub(crate) fn handle_event(&mut self, layer: &Layer, event: &Event, cx: &mut WidgetCx) -> bool {
        match *event {
            Event::PointerMove { position } => {
                self.hovered_item = self.item_at(layer, position);
                hit(layer, position) || self.hovered_item.is_some()
            }
            Event::PointerPress {
                position,
                button: MouseButton::Left,
                ..
            } => {
                if hit(layer, position) {
                    self.open = !self.open;
                    self.hovered_item = None;
                    return true;
                }
                if !self.open {
                    return false;
                }
                if self.list_rect(layer).contains(position) {
                    if let Some(index) = self.item_at(layer, position) {
                        if self.items[index].enabled {
                            self.select(index, cx);
                            self.close();
                        }
                    }
                    return true;
                }
                // outside: close without consuming
                self.close();
                false
            }
            Event::Scroll { position, delta } if self.open => {
                if !self.list_rect(layer).contains(position) {
                    return false;
                }
                self.scroll = (self.scroll - delta.y * DROPDOWN_ITEM_HEIGHT)
                    .max(0.)
                    .min(self.max_scroll());
                self.hovered_item = self.item_at(layer, position);
                true
            }
            Event::KeyPress {
                key: KeyCode::Escape,
                ..
            } if self.open => {
                self.close();
                true
            }
            _ => false,
        }
    }
}
