//! Widgets: the content of a component.
//!
//! Every component pairs a [`Layer`] (shared state) with one [`Widget`]. The widget set is closed;
//! render, update and event handling dispatch on the variant.
//!
//! Widgets receive positional events already mapped into their local coordinate system, so a
//! point is inside the widget iff it's inside `layer.bounds.local()`.

mod button;
mod checkbox;
mod dropdown;
mod label;
mod panel;
mod switch;
mod text_input;
mod texture;

pub use button::Button;
pub use checkbox::{Checkbox, CheckboxKind};
pub use dropdown::{Dropdown, DropdownItem};
pub use label::Label;
pub use panel::Panel;
pub use switch::Switch;
pub use text_input::TextInput;
pub use texture::{ScaleMode, Texture, TextureState};

use crate::backend::Canvas;
use crate::config::{AnimationConfig, InteractionConfig};
use crate::context::{Callback, Commands, EventContext};
use crate::events::Event;
use crate::layer::Layer;
use crate::tree::ComponentId;
use cgmath::Point2;

/// The content of a component.
#[derive(Debug)]
pub enum Widget {
    Panel(Panel),
    Label(Label),
    Button(Button),
    Texture(Texture),
    Switch(Switch),
    Checkbox(Checkbox),
    Dropdown(Dropdown),
    TextInput(TextInput),
}

/// What a widget gets while handling an event.
pub struct WidgetCx<'a> {
    pub id: ComponentId,
    pub commands: &'a mut Commands,
    pub config: &'a InteractionConfig,
    /// The event position in the parent's coordinate system, which (unlike the local position)
    /// doesn't move when the widget itself is moved by a callback.
    pub parent_position: Option<Point2<f32>>,
}

impl<'a> WidgetCx<'a> {
    /// Calls the callback, if set.
    pub(crate) fn emit<A>(&mut self, callback: &mut Option<Callback<A>>, arg: A) {
        if let Some(callback) = callback {
            let mut cx = EventContext {
                id: self.id,
                commands: &mut *self.commands,
            };
            callback(&mut cx, arg);
        }
    }
}

/// Returns true if the local point lies within the layer.
pub(crate) fn hit(layer: &Layer, point: Point2<f32>) -> bool {
    layer.bounds.local().contains(point)
}

impl Widget {
    /// Draws the content in local coordinates; the layer's overlay and decoration have already
    /// been applied.
    pub fn render(&self, layer: &Layer, canvas: &mut dyn Canvas) {
        match self {
            Widget::Panel(_) => (),
            Widget::Label(label) => label.render(layer, canvas),
            Widget::Button(button) => button.render(layer, canvas),
            Widget::Texture(texture) => texture.render(layer, canvas),
            Widget::Switch(switch) => switch.render(layer, canvas),
            Widget::Checkbox(checkbox) => checkbox.render(layer, canvas),
            Widget::Dropdown(dropdown) => dropdown.render(layer, canvas),
            Widget::TextInput(input) => input.render(layer, canvas),
        }
    }

    /// Advances widget-local animation state. Returns true while the widget still changes by
    /// itself.
    pub fn update(&mut self, dt: f32, config: &AnimationConfig) -> bool {
        match self {
            Widget::Switch(switch) => switch.update(dt, config.switch_speed),
            Widget::TextInput(input) => input.update(dt),
            _ => false,
        }
    }

    /// Handles an event in local coordinates. Returns true if the event was consumed.
    pub fn handle_event(&mut self, layer: &Layer, event: &Event, cx: &mut WidgetCx) -> bool {
        match self {
            Widget::Panel(_) | Widget::Label(_) => false,
            Widget::Button(button) => button.handle_event(layer, event, cx),
            Widget::Texture(texture) => texture.handle_event(layer, event, cx),
            Widget::Switch(switch) => switch.handle_event(layer, event, cx),
            Widget::Checkbox(checkbox) => checkbox.handle_event(layer, event, cx),
            Widget::Dropdown(dropdown) => dropdown.handle_event(layer, event, cx),
            Widget::TextInput(input) => input.handle_event(layer, event, cx),
        }
    }

    /// Whether the widget has transient state a press elsewhere should end.
    /// The hovered part of the widget, if hover changes how it's drawn. Single-part widgets
    /// report part 0.
    pub(crate) fn hover_state(&self) -> Option<usize> {
        match self {
            Widget::Button(button) if button.is_hovered() => Some(0),
            Widget::Dropdown(dropdown) => dropdown.hovered_item(),
            _ => None,
        }
    }

    pub(crate) fn is_dismissable(&self) -> bool {
        match self {
            Widget::Dropdown(dropdown) => dropdown.is_open(),
            Widget::TextInput(input) => input.is_focused(),
            _ => false,
        }
    }

    /// Ends transient state after a press that some other component consumed.
    pub(crate) fn dismiss(&mut self, cx: &mut WidgetCx) {
        match self {
            Widget::Dropdown(dropdown) => dropdown.close(),
            Widget::TextInput(input) => input.set_focused(false, cx),
            _ => (),
        }
    }
}

/// Typed access to a [`Widget`] variant.
pub trait WidgetKind: Sized {
    fn from_widget(widget: &Widget) -> Option<&Self>;
    fn from_widget_mut(widget: &mut Widget) -> Option<&mut Self>;
}

macro_rules! impl_widget_kind {
    ($($t:ident),+) => {
        $(
            impl WidgetKind for $t {
                fn from_widget(widget: &Widget) -> Option<&Self> {
                    match widget {
                        Widget::$t(w) => Some(w),
                        _ => None,
                    }
                }
                fn from_widget_mut(widget: &mut Widget) -> Option<&mut Self> {
                    match widget {
                        Widget::$t(w) => Some(w),
                        _ => None,
                    }
                }
            }

            impl From<$t> for Widget {
                fn from(widget: $t) -> Widget {
                    Widget::$t(widget)
                }
            }
        )+
    }
}
impl_widget_kind!(Panel, Label, Button, Texture, Switch, Checkbox, Dropdown, TextInput);
