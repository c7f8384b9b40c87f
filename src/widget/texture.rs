use super::{hit, WidgetCx};
use crate::backend::{Canvas, GpuContext, ImageHandle, TextAlign, TextStyle};
use crate::color::Color;
use crate::context::{Callback, EventContext};
use crate::events::{Event, KeyCode, Modifiers, MouseButton};
use crate::layer::Layer;
use crate::rect::Rect;
use crate::texture_cache::{LoadState, TextureCache};
use cgmath::{InnerSpace, Point2, Vector2};
use core::fmt;
use tracing::debug;

/// How the image is fitted into the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMode {
    /// Fill the bounds exactly.
    Stretch,
    /// Fit within the bounds, preserving the aspect ratio, centered.
    KeepAspect,
    /// Draw at pixel size, centered.
    OriginalSize,
}

/// Pointer interaction state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextureState {
    Idle,
    /// A button is down but the pointer hasn't moved past the drag threshold.
    Pressed {
        button: MouseButton,
        start: Point2<f32>,
    },
    Dragging {
        button: MouseButton,
        last: Point2<f32>,
    },
}

#[derive(Debug, Clone, Copy)]
struct LastPress {
    button: MouseButton,
    time: f64,
    position: Point2<f32>,
}

#[derive(Default)]
struct Callbacks {
    click: Option<Callback<MouseButton>>,
    double_click: Option<Callback<MouseButton>>,
    middle_click: Option<Callback<()>>,
    drag: Option<Callback<Vector2<f32>>>,
    drag_end: Option<Callback<()>>,
    scroll: Option<Callback<Vector2<f32>>>,
    drag_scroll: Option<Callback<Vector2<f32>>>,
    key: Option<Callback<(KeyCode, Modifiers)>>,
}

/// An image from the texture cache.
///
/// The widget only names a path; the tree acquires and releases the cache entry as the path
/// changes and copies the GPU handle in once it's available. Until then nothing is drawn, and
/// if loading fails a fallback text is shown instead.
///
/// Drag and drag-scroll deltas are measured in the parent's coordinate system, so moving the
/// component from a drag callback doesn't feed back into the deltas.
pub struct Texture {
    path: Option<String>,
    /// The path currently holding a cache reference.
    acquired: Option<String>,
    handle: Option<ImageHandle>,
    failed: bool,
    image_size: Option<(u32, u32)>,
    pub scale_mode: ScaleMode,
    /// Content alpha, multiplied with the layer opacity.
    pub alpha: f32,
    /// If set, the layer is resized to this height and the image's aspect ratio whenever a new
    /// image becomes available.
    pub auto_size: Option<f32>,
    pub fallback_text: String,
    state: TextureState,
    hovered: bool,
    last_press: Option<LastPress>,
    callbacks: Callbacks,
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Texture")
            .field("path", &self.path)
            .field("handle", &self.handle)
            .field("failed", &self.failed)
            .field("scale_mode", &self.scale_mode)
            .field("state", &self.state)
            .finish()
    }
}

impl Default for Texture {
    fn default() -> Self {
        Texture {
            path: None,
            acquired: None,
            handle: None,
            failed: false,
            image_size: None,
            scale_mode: ScaleMode::KeepAspect,
            alpha: 1.,
            auto_size: None,
            fallback_text: "LOAD FAIL".into(),
            state: TextureState::Idle,
            hovered: false,
            last_press: None,
            callbacks: Callbacks::default(),
        }
    }
}

macro_rules! callback_setter {
    ($($name:ident: $field:ident($arg:ty);)+) => {
        $(
            pub fn $name<F: FnMut(&mut EventContext<'_>, $arg) + 'static>(mut self, f: F) -> Self {
                self.callbacks.$field = Some(Box::new(f));
                self
            }
        )+
    }
}

impl Texture {
    pub fn new(path: Option<String>) -> Texture {
        Texture {
            path,
            ..Texture::default()
        }
    }

    callback_setter! {
        on_click: click(MouseButton);
        on_double_click: double_click(MouseButton);
        on_middle_click: middle_click(());
        on_drag: drag(Vector2<f32>);
        on_drag_end: drag_end(());
        on_scroll: scroll(Vector2<f32>);
        on_drag_scroll: drag_scroll(Vector2<f32>);
        on_key: key((KeyCode, Modifiers));
    }

    pub fn with_scale_mode(mut self, scale_mode: ScaleMode) -> Texture {
        self.scale_mode = scale_mode;
        self
    }

    pub fn with_auto_size(mut self, base_height: f32) -> Texture {
        self.auto_size = Some(base_height);
        self
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Changes the image. Takes effect on the next texture sync.
    pub fn set_path(&mut self, path: Option<String>) {
        self.path = path;
    }

    pub fn handle(&self) -> Option<ImageHandle> {
        self.handle
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image_size
    }

    pub fn state(&self) -> TextureState {
        self.state
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Brings the widget in line with the cache. Returns true if anything visible changed.
    pub(crate) fn sync(
        &mut self,
        layer: &mut Layer,
        cache: &TextureCache,
        gpu: &mut dyn GpuContext,
    ) -> bool {
        let mut changed = false;

        if self.acquired != self.path {
            if let Some(old) = self.acquired.take() {
                cache.release(&old, gpu);
            }
            if let Some(path) = &self.path {
                cache.acquire(path);
                cache.request_load(path);
            }
            self.acquired = self.path.clone();
            self.handle = None;
            self.failed = false;
            self.image_size = None;
            changed = true;
        }

        let path = match &self.path {
            Some(path) => path,
            None => return changed,
        };

        let handle = cache.handle(path);
        let failed = matches!(cache.state(path), Some(LoadState::Failed(_)));
        if handle != self.handle || failed != self.failed {
            self.handle = handle;
            self.failed = failed;
            self.image_size = cache.dimensions(path);
            changed = true;

            if let (Some(base_height), Some((width, height))) = (self.auto_size, self.image_size) {
                if height > 0 {
                    let aspect = width as f32 / height as f32;
                    layer.bounds.size = Vector2::new(base_height * aspect, base_height);
                }
            }
        }
        changed
    }

    /// Drops the cache reference.
    pub(crate) fn detach(&mut self, cache: &TextureCache, gpu: &mut dyn GpuContext) {
        if let Some(path) = self.acquired.take() {
            cache.release(&path, gpu);
        }
        self.handle = None;
    }

    /// Takes the acquired path, for release after the widget is gone.
    pub(crate) fn take_acquired(&mut self) -> Option<String> {
        self.handle = None;
        self.acquired.take()
    }

    /// Where the image goes, in local coordinates.
    pub fn dest_rect(&self, size: Vector2<f32>) -> Rect {
        let bounds = Rect::new(Point2::new(0., 0.), size);
        let (width, height) = match self.image_size {
            Some((w, h)) if w > 0 && h > 0 => (w as f32, h as f32),
            _ => return bounds,
        };
        let fitted = match self.scale_mode {
            ScaleMode::Stretch => return bounds,
            ScaleMode::KeepAspect => {
                let scale = (size.x / width).min(size.y / height);
                Vector2::new(width * scale, height * scale)
            }
            ScaleMode::OriginalSize => Vector2::new(width, height),
        };
        Rect::new(
            Point2::new((size.x - fitted.x) / 2., (size.y - fitted.y) / 2.),
            fitted,
        )
    }

    pub(crate) fn render(&self, layer: &Layer, canvas: &mut dyn Canvas) {
        if let Some(handle) = self.handle {
            let dest = self.dest_rect(layer.size());
            canvas.draw_image(handle, dest, layer.corner_radius, self.alpha);
        } else if self.failed {
            let size = layer.size();
            let style = TextStyle {
                color: Color::rgb8(255, 90, 90),
                align: TextAlign::Center,
                ..TextStyle::default()
            };
            canvas.text(Point2::new(size.x / 2., size.y / 2.), &self.fallback_text, &style);
        }
    }

    fn is_double_click(&self, button: MouseButton, time: f64, position: Point2<f32>, cx: &WidgetCx) -> bool {
        match self.last_press {
            Some(last) => {
                last.button == button
                    && time - last.time <= cx.config.double_click_time
                    && (position - last.position).magnitude() <= cx.config.double_click_distance
            }
            None => false,
        }
    }

    pub(crate) fn handle_event(&mut self, layer: &Layer, event: &Event, cx: &mut WidgetCx) -> bool {
        let parent = cx.parent_position;
        match *event {
            Event::PointerMove { position } => {
                self.hovered = hit(layer, position);
                let current = match parent {
                    Some(p) => p,
                    None => return self.hovered,
                };
                match self.state {
                    TextureState::Pressed { button, start } => {
                        if (current - start).magnitude() > cx.config.drag_threshold {
                            debug!(id = ?cx.id, ?button, "texture drag started");
                            self.state = TextureState::Dragging {
                                button,
                                last: current,
                            };
                            cx.emit(&mut self.callbacks.drag, current - start);
                        }
                        true
                    }
                    TextureState::Dragging { button, last } => {
                        self.state = TextureState::Dragging {
                            button,
                            last: current,
                        };
                        cx.emit(&mut self.callbacks.drag, current - last);
                        true
                    }
                    TextureState::Idle => self.hovered,
                }
            }
            Event::PointerPress {
                position,
                button,
                time,
            } if hit(layer, position) => {
                if button == MouseButton::Middle {
                    cx.emit(&mut self.callbacks.middle_click, ());
                    return true;
                }
                let start = parent.unwrap_or(position);
                if self.is_double_click(button, time, start, cx) {
                    debug!(id = ?cx.id, ?button, "texture double click");
                    self.last_press = None;
                    self.state = TextureState::Idle;
                    cx.emit(&mut self.callbacks.double_click, button);
                    return true;
                }
                self.last_press = Some(LastPress {
                    button,
                    time,
                    position: start,
                });
                self.state = TextureState::Pressed { button, start };
                true
            }
            Event::PointerRelease {
                position, button, ..
            } => match self.state {
                TextureState::Pressed { button: pressed, .. } if pressed == button => {
                    self.state = TextureState::Idle;
                    if hit(layer, position) {
                        cx.emit(&mut self.callbacks.click, button);
                    }
                    true
                }
                TextureState::Dragging { button: pressed, .. } if pressed == button => {
                    self.state = TextureState::Idle;
                    debug!(id = ?cx.id, "texture drag ended");
                    cx.emit(&mut self.callbacks.drag_end, ());
                    true
                }
                _ => false,
            },
            Event::Scroll { position, delta } if hit(layer, position) => {
                match self.state {
                    TextureState::Pressed { .. } => cx.emit(&mut self.callbacks.drag_scroll, delta),
                    _ => cx.emit(&mut self.callbacks.scroll, delta),
                }
                true
            }
            Event::KeyPress { key, modifiers } if self.hovered && self.callbacks.key.is_some() => {
                cx.emit(&mut self.callbacks.key, (key, modifiers));
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keep_aspect_fits_and_centers() {
        let texture = Texture {
            image_size: Some((200, 100)),
            ..Texture::default()
        };
        let dest = texture.dest_rect(Vector2::new(100., 100.));
        assert_eq!(dest, Rect::from_xywh(0., 25., 100., 50.));
    }

    #[test]
    fn original_size_is_centered() {
        let texture = Texture {
            image_size: Some((20, 10)),
            scale_mode: ScaleMode::OriginalSize,
            ..Texture::default()
        };
        let dest = texture.dest_rect(Vector2::new(100., 50.));
        assert_eq!(dest, Rect::from_xywh(40., 20., 20., 10.));
    }

    #[test]
    fn stretch_fills_bounds() {
        let texture = Texture {
            image_size: Some((20, 10)),
            scale_mode: ScaleMode::Stretch,
            ..Texture::default()
        };
        assert_eq!(
            texture.dest_rect(Vector2::new(100., 50.)),
            Rect::from_xywh(0., 0., 100., 50.)
        );
    }
}
