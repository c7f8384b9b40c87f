use crate::backend::{Canvas, GpuContext};
use crate::config::Config;
use crate::context::Ui;
use crate::events::{Event, KeyCode, Modifiers};
use crate::services::ImageDecoder;
use crate::texture_cache::TextureCache;
use cgmath::Vector2;
use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

type FileDropHandler = Box<dyn FnMut(&mut Ui, Vec<PathBuf>)>;
type KeyHandler = Box<dyn FnMut(&mut Ui, KeyCode, Modifiers)>;
type ResizeHandler = Box<dyn FnMut(&mut Ui, Vector2<f32>)>;

/// Connects a UI to the windowing layer.
///
/// The windowing layer pushes input through [`event_sender`](Host::event_sender) (from any
/// thread) and calls [`frame`](Host::frame) once per displayed frame on the thread owning the
/// graphics context.
pub struct Host {
    pub ui: Ui,
    event_sender: Sender<Event>,
    event_recv: Receiver<Event>,
    widgets_animating: bool,
    on_file_drop: Option<FileDropHandler>,
    on_unhandled_key: Option<KeyHandler>,
    on_resize: Option<ResizeHandler>,
}

impl Host {
    /// Creates a new Host with an empty UI of the given size.
    ///
    /// Must be called on the thread that owns the graphics context.
    pub fn new(size: Vector2<f32>, decoder: Arc<dyn ImageDecoder>, config: Config) -> Host {
        let (event_sender, event_recv) = channel::unbounded();

        Host {
            ui: Ui::new(size, TextureCache::new(decoder), config),
            event_sender,
            event_recv,
            widgets_animating: false,
            on_file_drop: None,
            on_unhandled_key: None,
            on_resize: None,
        }
    }

    /// Returns a sender for pushing raw input events.
    pub fn event_sender(&self) -> Sender<Event> {
        self.event_sender.clone()
    }

    /// Called with the dropped paths when files are dropped onto the window.
    pub fn on_file_drop<F: FnMut(&mut Ui, Vec<PathBuf>) + 'static>(&mut self, f: F) {
        self.on_file_drop = Some(Box::new(f));
    }

    /// Called for key presses that no component consumed.
    pub fn on_unhandled_key<F: FnMut(&mut Ui, KeyCode, Modifiers) + 'static>(&mut self, f: F) {
        self.on_unhandled_key = Some(Box::new(f));
    }

    /// Called after the framebuffer was resized.
    pub fn on_resize<F: FnMut(&mut Ui, Vector2<f32>) + 'static>(&mut self, f: F) {
        self.on_resize = Some(Box::new(f));
    }

    /// Receives all events from the event queue and dispatches them.
    pub fn poll(&mut self) {
        loop {
            match self.event_recv.try_recv() {
                Ok(event) => self.dispatch(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Dispatches a single event, falling back to the host callbacks.
    pub fn dispatch(&mut self, event: Event) {
        match event {
            Event::FileDrop(paths) => {
                debug!(count = paths.len(), "files dropped");
                if let Some(handler) = &mut self.on_file_drop {
                    handler(&mut self.ui, paths);
                    self.ui.apply_commands();
                }
            }
            event => {
                let consumed = self.ui.dispatch(&event);
                if let (false, Event::KeyPress { key, modifiers }) = (consumed, &event) {
                    if let Some(handler) = &mut self.on_unhandled_key {
                        handler(&mut self.ui, *key, *modifiers);
                        self.ui.apply_commands();
                    }
                }
            }
        }
    }

    /// Resizes the root panel to the new framebuffer size.
    pub fn resize(&mut self, size: Vector2<f32>) {
        self.ui.tree.resize(size);
        if let Some(handler) = &mut self.on_resize {
            handler(&mut self.ui, size);
            self.ui.apply_commands();
        }
    }

    /// Runs one frame: uploads decoded textures, syncs texture widgets with the cache, dispatches
    /// pending input, advances animations by `dt` seconds, updates widgets, lays out and renders.
    pub fn frame<B: Canvas + GpuContext>(&mut self, dt: f64, backend: &mut B) {
        let ui = &mut self.ui;
        ui.textures.drain_uploads(backend);
        ui.tree.sync_textures(&ui.textures, backend);

        self.poll();

        let ui = &mut self.ui;
        ui.tick(dt);
        self.widgets_animating = ui.tree.update(dt, &ui.config.animation);
        ui.tree.layout_all();
        ui.tree.render(backend);
        ui.tree.mark_clean();
    }

    /// Returns true if the next frame would look different from the last one.
    pub fn needs_redraw(&self) -> bool {
        self.ui.tree.is_dirty()
            || self.ui.animations.has_animations()
            || self.widgets_animating
            || self.ui.textures.pending_uploads() > 0
            || !self.event_recv.is_empty()
    }

    /// Releases every texture and frees all GPU images. The UI stays usable but empty of
    /// textures until the next sync.
    pub fn shutdown(&mut self, gpu: &mut dyn GpuContext) {
        let ui = &mut self.ui;
        ui.animations.remove_all();
        ui.tree.release_textures(&ui.textures, gpu);
        ui.textures.cleanup_all(gpu);
    }
}
