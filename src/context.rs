//! The UI state bundle and deferred commands.
//!
//! Widget callbacks run while the tree is being walked, so they can't mutate the tree, the
//! scheduler, or the texture cache directly. They queue [`Commands`] instead, which the [`Ui`]
//! applies once dispatch has returned.

use crate::animation::{easing, Animation, Easing, Scheduler};
use crate::config::Config;
use crate::events::Event;
use crate::layer::Layer;
use crate::texture_cache::TextureCache;
use crate::transform::ScaleOrigin;
use crate::tree::{ComponentId, ComponentTree};
use crate::widget::Widget;
use cgmath::{Point2, Vector2};
use core::fmt;
use core::mem;

/// A deferred operation on the UI.
pub type Command = Box<dyn FnOnce(&mut Ui)>;

/// A user callback attached to a widget.
pub type Callback<A> = Box<dyn FnMut(&mut EventContext<'_>, A)>;

/// A queue of deferred operations.
#[derive(Default)]
pub struct Commands {
    queue: Vec<Command>,
}

impl fmt::Debug for Commands {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Commands({} pending)", self.queue.len())
    }
}

impl Commands {
    pub fn new() -> Commands {
        Commands::default()
    }

    /// Queues an arbitrary operation.
    pub fn push<F: FnOnce(&mut Ui) + 'static>(&mut self, command: F) {
        self.queue.push(Box::new(command));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn take(&mut self) -> Vec<Command> {
        mem::take(&mut self.queue)
    }

    /// Queues a change to a component's shared state.
    pub fn update_layer<F: FnOnce(&mut Layer) + 'static>(&mut self, id: ComponentId, f: F) {
        self.push(move |ui| {
            if let Some(layer) = ui.tree.layer_mut(id) {
                f(layer);
            }
        });
    }

    /// Queues a change to a component's widget.
    pub fn update_widget<F: FnOnce(&mut Widget) + 'static>(&mut self, id: ComponentId, f: F) {
        self.push(move |ui| {
            if let Some(widget) = ui.tree.widget_mut(id) {
                f(widget);
            }
        });
    }

    /// Queues the removal of a component and its descendants.
    pub fn remove(&mut self, id: ComponentId) {
        self.push(move |ui| ui.remove(id));
    }

    pub fn animate(&mut self, animation: Animation) {
        self.push(move |ui| ui.animate(animation));
    }

    pub fn fade_to(&mut self, id: ComponentId, opacity: f32, duration: f64, easing: Easing) {
        self.push(move |ui| ui.fade_to(id, opacity, duration, easing));
    }

    pub fn move_to(&mut self, id: ComponentId, position: Point2<f32>, duration: f64, easing: Easing) {
        self.push(move |ui| ui.move_to(id, position, duration, easing));
    }

    pub fn scale_to(
        &mut self,
        id: ComponentId,
        scale: Vector2<f32>,
        origin: ScaleOrigin,
        duration: f64,
        easing: Easing,
    ) {
        self.push(move |ui| ui.scale_to(id, scale, origin, duration, easing));
    }

    pub fn rotate_by(&mut self, id: ComponentId, degrees: f32, duration: f64, easing: Easing) {
        self.push(move |ui| ui.rotate_by(id, degrees, duration, easing));
    }
}

/// Passed to widget callbacks.
pub struct EventContext<'a> {
    /// The component whose callback is running.
    pub id: ComponentId,
    pub commands: &'a mut Commands,
}

/// Everything a running UI consists of: the component tree and the services that act on it.
///
/// There are no global singletons; independent `Ui`s can coexist.
pub struct Ui {
    pub tree: ComponentTree,
    pub animations: Scheduler,
    pub textures: TextureCache,
    pub config: Config,
    commands: Commands,
}

impl fmt::Debug for Ui {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Ui")
            .field("tree", &self.tree)
            .field("animations", &self.animations)
            .field("commands", &self.commands)
            .finish()
    }
}

impl Ui {
    /// Creates a UI with an empty root panel of the given size.
    pub fn new(size: Vector2<f32>, textures: TextureCache, config: Config) -> Ui {
        Ui {
            tree: ComponentTree::new(size),
            animations: Scheduler::new(),
            textures,
            config,
            commands: Commands::new(),
        }
    }

    /// Dispatches an input event (in root coordinates) and applies the resulting commands.
    ///
    /// Returns true if a component consumed the event.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        let consumed = self
            .tree
            .dispatch(event, &mut self.commands, &self.config.interaction);
        self.apply_commands();
        consumed
    }

    /// Advances animations by `dt` seconds and applies commands queued by completion callbacks.
    pub fn tick(&mut self, dt: f64) {
        self.animations.tick(dt, &mut self.tree, &mut self.commands);
        self.apply_commands();
    }

    /// Queues a command to run on the next [`apply_commands`](Ui::apply_commands).
    pub fn defer<F: FnOnce(&mut Ui) + 'static>(&mut self, command: F) {
        self.commands.push(command);
    }

    /// Runs queued commands until none are left, including any queued by the commands
    /// themselves.
    pub fn apply_commands(&mut self) {
        loop {
            let batch = self.commands.take();
            if batch.is_empty() {
                break;
            }
            for command in batch {
                command(self);
            }
        }
    }

    /// Removes a component and its descendants, cancelling their animations.
    pub fn remove(&mut self, id: ComponentId) {
        for removed in self.tree.remove(id) {
            self.animations.remove_for_target(removed);
        }
    }

    pub fn animate(&mut self, animation: Animation) {
        self.animations.add(&self.tree, animation);
    }

    pub fn fade_to(&mut self, id: ComponentId, opacity: f32, duration: f64, easing: Easing) {
        self.animations
            .fade_to(&self.tree, id, opacity, duration, easing);
    }

    pub fn move_to(&mut self, id: ComponentId, position: Point2<f32>, duration: f64, easing: Easing) {
        self.animations
            .move_to(&self.tree, id, position, duration, easing);
    }

    pub fn scale_to(
        &mut self,
        id: ComponentId,
        scale: Vector2<f32>,
        origin: ScaleOrigin,
        duration: f64,
        easing: Easing,
    ) {
        self.animations
            .scale_to(&mut self.tree, id, scale, origin, duration, easing);
    }

    pub fn rotate_by(&mut self, id: ComponentId, degrees: f32, duration: f64, easing: Easing) {
        self.animations
            .rotate_by(&self.tree, id, degrees, duration, easing);
    }

    /// Fades a component to full opacity over the configured default duration.
    pub fn fade_in(&mut self, id: ComponentId) {
        let duration = self.config.animation.default_duration;
        self.fade_to(id, 1., duration, easing::ease_out);
    }

    /// Fades a component out over the configured default duration.
    pub fn fade_out(&mut self, id: ComponentId) {
        let duration = self.config.animation.default_duration;
        self.fade_to(id, 0., duration, easing::ease_in);
    }
}
