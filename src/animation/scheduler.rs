use super::easing::{self, Easing};
use crate::context::Commands;
use crate::layer::Layer;
use crate::transform::ScaleOrigin;
use crate::tree::{ComponentId, ComponentTree};
use cgmath::{Point2, Vector2, VectorSpace};
use core::fmt;
use tracing::{debug, warn};

/// Elapsed time within this distance of the total duration counts as finished.
const TIME_EPSILON: f64 = 1e-9;

/// What an animation drives. Informational; the update callback does the actual work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    Fade,
    Move,
    Scale,
    Rotate,
    Value,
}

/// How many times an animation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Once,
    Times(u32),
    Forever,
}

type UpdateFn = Box<dyn FnMut(&mut Layer, f32)>;
type CompleteFn = Box<dyn FnOnce(&mut Commands)>;

/// A time-driven interpolation between two values.
///
/// On every tick, the eased value between `from` and `to` is passed to the update callback along
/// with the target's layer. Once the last cycle ends, the completion callback runs and the
/// animation is removed.
pub struct Animation {
    kind: AnimationKind,
    duration: f64,
    easing: Easing,
    elapsed: f64,
    from: f32,
    to: f32,
    repeat: Repeat,
    ping_pong: bool,
    target: Option<ComponentId>,
    on_update: Option<UpdateFn>,
    on_complete: Option<CompleteFn>,
    finished: bool,
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Animation")
            .field("kind", &self.kind)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("repeat", &self.repeat)
            .field("ping_pong", &self.ping_pong)
            .field("target", &self.target)
            .field("finished", &self.finished)
            .finish()
    }
}

impl Animation {
    /// Creates a linear animation from 0 to 1 that runs once. `duration` is in seconds.
    pub fn new(kind: AnimationKind, duration: f64) -> Animation {
        Animation {
            kind,
            duration,
            easing: easing::linear,
            elapsed: 0.,
            from: 0.,
            to: 1.,
            repeat: Repeat::Once,
            ping_pong: false,
            target: None,
            on_update: None,
            on_complete: None,
            finished: false,
        }
    }

    /// An untargeted animation that does nothing but wait; attach follow-up work with
    /// [`on_complete`](Animation::on_complete).
    pub fn delay(duration: f64) -> Animation {
        Animation::new(AnimationKind::Value, duration)
    }

    pub fn target(mut self, target: ComponentId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn range(mut self, from: f32, to: f32) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// If true, every other cycle runs backwards.
    pub fn ping_pong(mut self, ping_pong: bool) -> Self {
        self.ping_pong = ping_pong;
        self
    }

    pub fn on_update<F: FnMut(&mut Layer, f32) + 'static>(mut self, f: F) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    pub fn on_complete<F: FnOnce(&mut Commands) + 'static>(mut self, f: F) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    pub fn target_id(&self) -> Option<ComponentId> {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn cycles(&self) -> f64 {
        match self.repeat {
            Repeat::Once => 1.,
            Repeat::Times(n) => f64::from(n.max(1)),
            Repeat::Forever => f64::INFINITY,
        }
    }

    /// Returns the linear progress in 0..=1 for the current elapsed time, and whether the
    /// animation is done.
    fn progress(&self) -> (f32, bool) {
        let cycles = self.cycles();
        if self.duration <= 0. || self.elapsed + TIME_EPSILON >= self.duration * cycles {
            let last_cycle_reversed = self.ping_pong && cycles.is_finite() && cycles % 2. == 0.;
            let end = if last_cycle_reversed { 0. } else { 1. };
            return (end, true);
        }

        let cycle = (self.elapsed / self.duration).floor();
        let t = ((self.elapsed - cycle * self.duration) / self.duration) as f32;
        if self.ping_pong && cycle % 2. == 1. {
            (1. - t, false)
        } else {
            (t, false)
        }
    }
}

/// Registry of running animations.
#[derive(Debug, Default)]
pub struct Scheduler {
    animations: Vec<Animation>,
}

impl Scheduler {
    pub fn new() -> Scheduler {
        Scheduler::default()
    }

    /// Registers an animation. An animation whose target isn't alive is dropped with a warning.
    pub fn add(&mut self, tree: &ComponentTree, animation: Animation) {
        if let Some(target) = animation.target {
            if !tree.contains(target) {
                warn!(?target, kind = ?animation.kind, "animation for a missing component ignored");
                return;
            }
        }
        debug!(target = ?animation.target, kind = ?animation.kind, duration = animation.duration, "animation added");
        self.animations.push(animation);
    }

    /// Cancels every animation targeting the component. Completion callbacks don't run.
    pub fn remove_for_target(&mut self, target: ComponentId) {
        self.animations.retain(|a| a.target != Some(target));
    }

    /// Cancels every animation. Completion callbacks don't run.
    pub fn remove_all(&mut self) {
        self.animations.clear();
    }

    pub fn has_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    pub fn has_animations_for(&self, target: ComponentId) -> bool {
        self.animations.iter().any(|a| a.target == Some(target))
    }

    /// Advances every animation by `dt` seconds.
    ///
    /// Completion callbacks get the command queue; their commands run after the tick. Finished
    /// animations, and animations whose target has disappeared, are pruned at the end.
    pub fn tick(&mut self, dt: f64, tree: &mut ComponentTree, commands: &mut Commands) {
        for animation in &mut self.animations {
            if animation.finished {
                continue;
            }

            let layer = match animation.target {
                Some(target) => match tree.layer_mut(target) {
                    Some(layer) => Some(layer),
                    None => {
                        debug!(?target, "animation target is gone");
                        animation.finished = true;
                        animation.on_complete = None;
                        continue;
                    }
                },
                None => None,
            };

            animation.elapsed += dt.max(0.);
            let (progress, done) = animation.progress();
            let eased = (animation.easing)(progress);
            let value = animation.from + (animation.to - animation.from) * eased;

            if let (Some(layer), Some(update)) = (layer, animation.on_update.as_mut()) {
                update(layer, value);
            }

            if done {
                debug!(target = ?animation.target, kind = ?animation.kind, "animation finished");
                animation.finished = true;
                if let Some(complete) = animation.on_complete.take() {
                    complete(commands);
                }
            }
        }

        self.animations.retain(|a| !a.finished);
    }

    /// Animates the component's opacity to `opacity`.
    pub fn fade_to(
        &mut self,
        tree: &ComponentTree,
        target: ComponentId,
        opacity: f32,
        duration: f64,
        easing: Easing,
    ) {
        let from = match tree.layer(target) {
            Some(layer) => layer.transform.opacity,
            None => {
                warn!(?target, "fade of a missing component ignored");
                return;
            }
        };
        self.remove_for_target(target);
        self.add(
            tree,
            Animation::new(AnimationKind::Fade, duration)
                .target(target)
                .range(from, opacity)
                .easing(easing)
                .on_update(|layer, value| layer.transform.opacity = value),
        );
    }

    /// Animates the component's effective position to `position` (in its parent's coordinates)
    /// through its offset.
    ///
    /// The path starts at the current effective position and tracks layout changes while running.
    pub fn move_to(
        &mut self,
        tree: &ComponentTree,
        target: ComponentId,
        position: Point2<f32>,
        duration: f64,
        easing: Easing,
    ) {
        let start = match tree.layer(target) {
            Some(layer) => layer.effective_origin(),
            None => {
                warn!(?target, "move of a missing component ignored");
                return;
            }
        };
        self.remove_for_target(target);
        self.add(
            tree,
            Animation::new(AnimationKind::Move, duration)
                .target(target)
                .easing(easing)
                .on_update(move |layer, t| {
                    let current = start + (position - start) * t;
                    layer.transform.offset = current - layer.bounds.origin;
                }),
        );
    }

    /// Animates the component's scale to `scale` about `origin`.
    ///
    /// Switching the origin moves the offset so the component doesn't jump.
    pub fn scale_to(
        &mut self,
        tree: &mut ComponentTree,
        target: ComponentId,
        scale: Vector2<f32>,
        origin: ScaleOrigin,
        duration: f64,
        easing: Easing,
    ) {
        let from = match tree.layer_mut(target) {
            Some(layer) => {
                let size = layer.size();
                layer.transform.set_scale_origin(origin, size);
                layer.transform.scale
            }
            None => {
                warn!(?target, "scale of a missing component ignored");
                return;
            }
        };
        self.remove_for_target(target);
        self.add(
            tree,
            Animation::new(AnimationKind::Scale, duration)
                .target(target)
                .easing(easing)
                .on_update(move |layer, t| layer.transform.scale = from.lerp(scale, t)),
        );
    }

    /// Rotates the component by `degrees` (positive is clockwise).
    pub fn rotate_by(
        &mut self,
        tree: &ComponentTree,
        target: ComponentId,
        degrees: f32,
        duration: f64,
        easing: Easing,
    ) {
        let from = match tree.layer(target) {
            Some(layer) => layer.transform.rotation,
            None => {
                warn!(?target, "rotation of a missing component ignored");
                return;
            }
        };
        self.remove_for_target(target);
        self.add(
            tree,
            Animation::new(AnimationKind::Rotate, duration)
                .target(target)
                .range(from, from + degrees.to_radians())
                .easing(easing)
                .on_update(|layer, value| layer.transform.rotation = value),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::Rect;
    use crate::widget::{Label, Widget};
    use std::cell::Cell;
    use std::rc::Rc;

    fn tree_with_label() -> (ComponentTree, ComponentId) {
        let mut tree = ComponentTree::new(Vector2::new(400., 300.));
        let root = tree.root();
        let id = tree
            .add_child(
                root,
                Layer::new(Rect::from_xywh(10., 20., 100., 40.)),
                Widget::Label(Label::new("hello")),
            )
            .unwrap();
        (tree, id)
    }

    fn opacity(tree: &ComponentTree, id: ComponentId) -> f32 {
        tree.layer(id).unwrap().transform.opacity
    }

    #[test]
    fn fade_converges_monotonically() {
        let (mut tree, id) = tree_with_label();
        let mut scheduler = Scheduler::new();
        let mut commands = Commands::new();
        let duration = 0.5;

        scheduler.fade_to(&tree, id, 0., duration, easing::linear);

        let mut previous = opacity(&tree, id);
        for _ in 0..10 {
            scheduler.tick(duration / 10., &mut tree, &mut commands);
            let current = opacity(&tree, id);
            assert!(current <= previous, "{} > {}", current, previous);
            previous = current;
        }

        assert_eq!(opacity(&tree, id), 0.);
        assert!(!scheduler.has_animations());
    }

    #[test]
    fn fade_in_rises_monotonically_with_easing() {
        let (mut tree, id) = tree_with_label();
        let mut scheduler = Scheduler::new();
        let mut commands = Commands::new();
        tree.layer_mut(id).unwrap().transform.opacity = 0.;

        scheduler.fade_to(&tree, id, 1., 0.4, easing::ease_in_out);

        let mut previous = opacity(&tree, id);
        for _ in 0..16 {
            scheduler.tick(0.025, &mut tree, &mut commands);
            let current = opacity(&tree, id);
            assert!(current >= previous, "{} < {}", current, previous);
            previous = current;
        }

        assert_eq!(opacity(&tree, id), 1.);
        assert!(!scheduler.has_animations());
    }

    #[test]
    fn helpers_cancel_previous_animations_for_target() {
        let (mut tree, id) = tree_with_label();
        let mut scheduler = Scheduler::new();
        let mut commands = Commands::new();

        scheduler.fade_to(&tree, id, 0., 1., easing::linear);
        scheduler.rotate_by(&tree, id, 90., 1., easing::linear);
        assert_eq!(scheduler.len(), 1);

        scheduler.tick(1., &mut tree, &mut commands);
        assert_eq!(opacity(&tree, id), 1.);
        let rotation = tree.layer(id).unwrap().transform.rotation;
        assert!((rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn missing_target_is_a_no_op() {
        let (mut tree, id) = tree_with_label();
        tree.remove(id);

        let mut scheduler = Scheduler::new();
        scheduler.fade_to(&tree, id, 0., 1., easing::linear);
        scheduler.add(&tree, Animation::new(AnimationKind::Value, 1.).target(id));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn animations_for_removed_targets_are_dropped() {
        let (mut tree, id) = tree_with_label();
        let mut scheduler = Scheduler::new();
        let mut commands = Commands::new();

        let completed = Rc::new(Cell::new(false));
        let flag = completed.clone();
        scheduler.add(
            &tree,
            Animation::new(AnimationKind::Fade, 1.)
                .target(id)
                .on_complete(move |_| flag.set(true)),
        );
        tree.remove(id);

        scheduler.tick(0.1, &mut tree, &mut commands);
        assert!(scheduler.is_empty());
        assert!(!completed.get());
    }

    #[test]
    fn move_to_starts_from_effective_position() {
        let (mut tree, id) = tree_with_label();
        tree.layer_mut(id).unwrap().transform.offset = Vector2::new(10., 0.);

        let mut scheduler = Scheduler::new();
        let mut commands = Commands::new();
        scheduler.move_to(&tree, id, Point2::new(120., 20.), 1., easing::linear);

        scheduler.tick(0.5, &mut tree, &mut commands);
        // from (20, 20) to (120, 20)
        assert_eq!(tree.layer(id).unwrap().effective_origin(), Point2::new(70., 20.));

        scheduler.tick(0.5, &mut tree, &mut commands);
        assert_eq!(tree.layer(id).unwrap().effective_origin(), Point2::new(120., 20.));
    }

    #[test]
    fn scale_to_about_center_keeps_center_fixed() {
        let (mut tree, id) = tree_with_label();
        tree.layer_mut(id).unwrap().transform.scale_origin = ScaleOrigin::TopLeft;

        let mut scheduler = Scheduler::new();
        let mut commands = Commands::new();
        scheduler.scale_to(
            &mut tree,
            id,
            Vector2::new(2., 2.),
            ScaleOrigin::Center,
            1.,
            easing::linear,
        );
        scheduler.tick(1., &mut tree, &mut commands);

        let layer = tree.layer(id).unwrap();
        assert_eq!(layer.transform.scale, Vector2::new(2., 2.));
        // center of the layout box still hits the local center
        let local = layer.to_local(Point2::new(60., 40.)).unwrap();
        assert_eq!(local, Point2::new(50., 20.));
    }

    #[test]
    fn ping_pong_repeats_return_to_start() {
        let (mut tree, id) = tree_with_label();
        let mut scheduler = Scheduler::new();
        let mut commands = Commands::new();

        scheduler.add(
            &tree,
            Animation::new(AnimationKind::Fade, 1.)
                .target(id)
                .range(1., 0.)
                .repeat(Repeat::Times(2))
                .ping_pong(true)
                .on_update(|layer, value| layer.transform.opacity = value),
        );

        scheduler.tick(0.5, &mut tree, &mut commands);
        assert_eq!(opacity(&tree, id), 0.5);
        scheduler.tick(0.75, &mut tree, &mut commands);
        assert_eq!(opacity(&tree, id), 0.25);
        scheduler.tick(0.75, &mut tree, &mut commands);
        assert_eq!(opacity(&tree, id), 1.);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn forever_keeps_running() {
        let mut tree = ComponentTree::new(Vector2::new(10., 10.));
        let mut scheduler = Scheduler::new();
        let mut commands = Commands::new();
        scheduler.add(&tree, Animation::new(AnimationKind::Value, 0.1).repeat(Repeat::Forever));

        for _ in 0..50 {
            scheduler.tick(0.1, &mut tree, &mut commands);
        }
        assert_eq!(scheduler.len(), 1);
        scheduler.remove_all();
        assert!(!scheduler.has_animations());
    }

    #[test]
    fn delay_queues_completion_commands() {
        let mut tree = ComponentTree::new(Vector2::new(10., 10.));
        let mut scheduler = Scheduler::new();
        let mut commands = Commands::new();

        scheduler.add(
            &tree,
            Animation::delay(0.2).on_complete(|commands| commands.push(|_| ())),
        );
        scheduler.tick(0.1, &mut tree, &mut commands);
        assert!(commands.is_empty());
        scheduler.tick(0.1, &mut tree, &mut commands);
        assert_eq!(commands.len(), 1);
        assert!(scheduler.is_empty());
    }
}
