//! The component tree.
//!
//! Components live in a generational arena. A [`ComponentId`] stays valid until its component is
//! removed; after that every lookup with it fails, even once the slot is reused.

use crate::backend::{Canvas, GpuContext};
use crate::config::{AnimationConfig, InteractionConfig};
use crate::context::Commands;
use crate::events::Event;
use crate::layer::Layer;
use crate::rect::Rect;
use crate::texture_cache::TextureCache;
use crate::widget::{Checkbox, Panel, Widget, WidgetCx, WidgetKind};
use cgmath::{Point2, Vector2};
use core::fmt;
use core::mem;
use tracing::warn;

/// A handle to a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId {
    index: u32,
    generation: u32,
}

/// A component: shared state plus widget content.
#[derive(Debug)]
pub struct Node {
    pub layer: Layer,
    pub widget: Widget,
    parent: Option<ComponentId>,
}

impl Node {
    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Dispatch bookkeeping.
struct Dispatch<'a> {
    commands: &'a mut Commands,
    config: &'a InteractionConfig,
    /// The first leaf that consumed the event.
    consumer: Option<ComponentId>,
}

/// A tree of components, rooted at a panel.
pub struct ComponentTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: ComponentId,
    dirty: bool,
    /// Texture paths of removed components, released on the next texture sync.
    pending_release: Vec<String>,
}

impl fmt::Debug for ComponentTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ComponentTree")
            .field("root", &self.root)
            .field("len", &self.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl ComponentTree {
    /// Creates a tree with an empty root panel covering `size`.
    pub fn new(size: Vector2<f32>) -> ComponentTree {
        let root = Node {
            layer: Layer::new(Rect::new(Point2::new(0., 0.), size)),
            widget: Widget::Panel(Panel::new()),
            parent: None,
        };
        ComponentTree {
            slots: vec![Slot {
                generation: 0,
                node: Some(root),
            }],
            free: Vec::new(),
            root: ComponentId {
                index: 0,
                generation: 0,
            },
            dirty: true,
            pending_release: Vec::new(),
        }
    }

    pub fn root(&self) -> ComponentId {
        self.root
    }

    /// Resizes the root panel.
    pub fn resize(&mut self, size: Vector2<f32>) {
        let root = self.root;
        if let Some(layer) = self.layer_mut(root) {
            layer.bounds.size = size;
        }
    }

    /// Number of live components, including the root.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the tree changed since the last [`mark_clean`](ComponentTree::mark_clean).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ComponentId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    /// Like `get_mut` but doesn't mark the tree dirty.
    fn node_mut(&mut self, id: ComponentId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Node> {
        if self.contains(id) {
            self.dirty = true;
        }
        self.node_mut(id)
    }

    pub fn layer(&self, id: ComponentId) -> Option<&Layer> {
        self.get(id).map(|node| &node.layer)
    }

    pub fn layer_mut(&mut self, id: ComponentId) -> Option<&mut Layer> {
        self.get_mut(id).map(|node| &mut node.layer)
    }

    pub fn widget(&self, id: ComponentId) -> Option<&Widget> {
        self.get(id).map(|node| &node.widget)
    }

    pub fn widget_mut(&mut self, id: ComponentId) -> Option<&mut Widget> {
        self.get_mut(id).map(|node| &mut node.widget)
    }

    /// Returns the widget if it is of type `W`.
    pub fn widget_as<W: WidgetKind>(&self, id: ComponentId) -> Option<&W> {
        self.widget(id).and_then(W::from_widget)
    }

    pub fn widget_as_mut<W: WidgetKind>(&mut self, id: ComponentId) -> Option<&mut W> {
        self.widget_mut(id).and_then(W::from_widget_mut)
    }

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// The children of a panel, in paint order. Empty for other widgets.
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        match self.widget(id) {
            Some(Widget::Panel(panel)) => panel.children(),
            _ => &[],
        }
    }

    /// Iterates over all live components, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &Node)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node.as_ref().map(|node| {
                let id = ComponentId {
                    index: index as u32,
                    generation: slot.generation,
                };
                (id, node)
            })
        })
    }

    /// Appends a component to a panel, on top of its existing children.
    ///
    /// Returns `None` (and logs a warning) if `parent` isn't a live panel.
    pub fn add_child(&mut self, parent: ComponentId, layer: Layer, widget: Widget) -> Option<ComponentId> {
        match self.widget(parent) {
            Some(Widget::Panel(_)) => (),
            _ => {
                warn!(?parent, "add_child: parent is not a live panel");
                return None;
            }
        }

        let node = Node {
            layer,
            widget,
            parent: Some(parent),
        };
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                ComponentId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                ComponentId {
                    index: self.slots.len() as u32 - 1,
                    generation: 0,
                }
            }
        };

        if let Some(Widget::Panel(panel)) = self.widget_mut(parent) {
            panel.children.push(id);
        }
        Some(id)
    }

    /// Removes a component and all of its descendants, returning the removed ids.
    ///
    /// The root can't be removed. Texture references held by removed components are released on
    /// the next [`sync_textures`](ComponentTree::sync_textures).
    pub fn remove(&mut self, id: ComponentId) -> Vec<ComponentId> {
        if id == self.root {
            warn!("the root component can't be removed");
            return Vec::new();
        }
        let parent = match self.get(id) {
            Some(node) => node.parent,
            None => {
                warn!(?id, "remove: no such component");
                return Vec::new();
            }
        };
        if let Some(Widget::Panel(panel)) = parent.and_then(|parent| self.widget_mut(parent)) {
            panel.children.retain(|child| *child != id);
        }

        let mut removed = Vec::new();
        self.remove_subtree(id, &mut removed);
        self.dirty = true;
        removed
    }

    fn remove_subtree(&mut self, id: ComponentId, removed: &mut Vec<ComponentId>) {
        let slot = &mut self.slots[id.index as usize];
        let mut node = match slot.node.take() {
            Some(node) => node,
            None => return,
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        removed.push(id);

        match &mut node.widget {
            Widget::Panel(panel) => {
                for child in mem::take(&mut panel.children) {
                    self.remove_subtree(child, removed);
                }
            }
            Widget::Texture(texture) => {
                if let Some(path) = texture.take_acquired() {
                    self.pending_release.push(path);
                }
            }
            _ => (),
        }
    }

    /// Dispatches an event given in root coordinates. Returns true if it was consumed.
    ///
    /// After a press, dropdowns and text inputs other than the one that consumed it are
    /// dismissed, so a press on any other component closes or blurs them.
    ///
    /// Pointer moves only mark the tree dirty when they change what a widget draws for hover.
    pub fn dispatch(&mut self, event: &Event, commands: &mut Commands, config: &InteractionConfig) -> bool {
        if !event.is_pointer_move() {
            self.dirty = true;
        }
        let mut dispatch = Dispatch {
            commands,
            config,
            consumer: None,
        };
        let root = self.root;
        let consumed = self.dispatch_node(root, event, &mut dispatch);

        if let Event::PointerPress { .. } = event {
            let dismissable: Vec<_> = self
                .iter()
                .filter(|(id, node)| Some(*id) != dispatch.consumer && node.widget.is_dismissable())
                .map(|(id, _)| id)
                .collect();
            for id in dismissable {
                if let Some(node) = self.node_mut(id) {
                    let mut cx = WidgetCx {
                        id,
                        commands: &mut *dispatch.commands,
                        config,
                        parent_position: None,
                    };
                    node.widget.dismiss(&mut cx);
                }
            }
        }

        consumed
    }

    /// `event` is in the coordinate system of the node's parent.
    fn dispatch_node(&mut self, id: ComponentId, event: &Event, dispatch: &mut Dispatch) -> bool {
        let (local, children) = {
            let node = match self.get(id) {
                Some(node) => node,
                None => return false,
            };
            let layer = &node.layer;
            if !layer.display || !layer.visible || !layer.enabled {
                return false;
            }
            let local = match event.map_position(|p| layer.to_local(p)) {
                Some(local) => local,
                None => return false,
            };
            let children = match &node.widget {
                Widget::Panel(panel) => Some(panel.children.clone()),
                _ => None,
            };
            (local, children)
        };

        let children = match children {
            Some(children) => children,
            None => {
                // leaf
                let node = match self.node_mut(id) {
                    Some(node) => node,
                    None => return false,
                };
                let mut cx = WidgetCx {
                    id,
                    commands: &mut *dispatch.commands,
                    config: dispatch.config,
                    parent_position: event.position(),
                };
                let hover = node.widget.hover_state();
                let consumed = node.widget.handle_event(&node.layer, &local, &mut cx);
                if node.widget.hover_state() != hover {
                    self.dirty = true;
                }
                if consumed && dispatch.consumer.is_none() {
                    dispatch.consumer = Some(id);
                }
                return consumed;
            }
        };

        let mut consumed = false;
        for child in children.into_iter().rev() {
            if local.is_pointer_move() {
                // hover is tracked everywhere
                consumed |= self.dispatch_node(child, &local, dispatch);
            } else if self.dispatch_node(child, &local, dispatch) {
                consumed = true;
                break;
            }
        }
        if consumed {
            return true;
        }

        match local {
            Event::PointerMove { position } | Event::PointerPress { position, .. } => self
                .layer(id)
                .map_or(false, |layer| layer.bounds.local().contains(position)),
            _ => false,
        }
    }

    /// Advances widget-local animation state. Returns true if any widget is still animating.
    pub fn update(&mut self, dt: f64, config: &AnimationConfig) -> bool {
        let mut animating = false;
        for slot in &mut self.slots {
            if let Some(node) = &mut slot.node {
                animating |= node.widget.update(dt as f32, config);
            }
        }
        if animating {
            self.dirty = true;
        }
        animating
    }

    /// Positions the children of every panel that has a layout.
    ///
    /// Children whose `display` flag is false are skipped and keep their position.
    pub fn layout_all(&mut self) {
        let root = self.root;
        self.layout_node(root);
    }

    fn layout_node(&mut self, id: ComponentId) {
        let (children, assignments) = {
            let node = match self.get(id) {
                Some(node) => node,
                None => return,
            };
            let panel = match &node.widget {
                Widget::Panel(panel) => panel,
                _ => return,
            };
            let assignments = panel.layout().map(|layout| {
                let participating: Vec<_> = panel
                    .children
                    .iter()
                    .filter_map(|child| self.layer(*child).map(|layer| (*child, layer)))
                    .filter(|(_, layer)| layer.display)
                    .map(|(child, layer)| (child, layer.size()))
                    .collect();
                let sizes: Vec<_> = participating.iter().map(|(_, size)| *size).collect();
                let positions = layout.layout(node.layer.size(), &sizes);
                participating
                    .into_iter()
                    .map(|(child, _)| child)
                    .zip(positions)
                    .collect::<Vec<_>>()
            });
            (panel.children.clone(), assignments)
        };

        for (child, position) in assignments.into_iter().flatten() {
            if let Some(node) = self.node_mut(child) {
                if node.layer.bounds.origin != position {
                    node.layer.bounds.origin = position;
                    self.dirty = true;
                }
            }
        }

        for child in children {
            self.layout_node(child);
        }
    }

    /// Renders the tree, back to front.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        self.render_node(self.root, canvas);
    }

    fn render_node(&self, id: ComponentId, canvas: &mut dyn Canvas) {
        let node = match self.get(id) {
            Some(node) => node,
            None => return,
        };
        if !node.layer.begin_render(canvas) {
            return;
        }
        node.layer.paint_decoration(canvas);
        node.widget.render(&node.layer, canvas);
        if let Widget::Panel(panel) = &node.widget {
            for child in &panel.children {
                self.render_node(*child, canvas);
            }
        }
        node.layer.end_render(canvas);
    }

    /// Releases texture references of removed components, and brings texture widgets in line
    /// with the cache: acquiring and requesting changed paths, and picking up finished uploads.
    ///
    /// Must run on the thread owning the graphics context.
    pub fn sync_textures(&mut self, cache: &TextureCache, gpu: &mut dyn GpuContext) {
        for path in mem::take(&mut self.pending_release) {
            cache.release(&path, gpu);
        }
        let mut changed = false;
        for slot in &mut self.slots {
            if let Some(Node {
                layer,
                widget: Widget::Texture(texture),
                ..
            }) = &mut slot.node
            {
                changed |= texture.sync(layer, cache, gpu);
            }
        }
        if changed {
            self.dirty = true;
        }
    }

    /// Releases every texture reference held by the tree.
    pub fn release_textures(&mut self, cache: &TextureCache, gpu: &mut dyn GpuContext) {
        for path in mem::take(&mut self.pending_release) {
            cache.release(&path, gpu);
        }
        for slot in &mut self.slots {
            if let Some(Node {
                widget: Widget::Texture(texture),
                ..
            }) = &mut slot.node
            {
                texture.detach(cache, gpu);
            }
        }
    }

    /// Unchecks every radio button of `group` except `except`.
    pub fn uncheck_radio_group(&mut self, group: &str, except: ComponentId) {
        let members: Vec<_> = self
            .iter()
            .filter(|(id, _)| *id != except)
            .filter(|(_, node)| {
                Checkbox::from_widget(&node.widget).and_then(Checkbox::group) == Some(group)
            })
            .map(|(id, _)| id)
            .collect();
        for id in members {
            if let Some(checkbox) = self.widget_as_mut::<Checkbox>(id) {
                checkbox.set_checked(false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MouseButton;
    use crate::layout::{CrossAlign, FlexLayout, MainAlign};
    use crate::test_support::{CanvasOp, RecordingCanvas};
    use crate::widget::{Button, Label};
    use std::cell::Cell;
    use std::rc::Rc;

    fn press(x: f32, y: f32) -> Event {
        Event::PointerPress {
            position: Point2::new(x, y),
            button: MouseButton::Left,
            time: 0.,
        }
    }

    fn release(x: f32, y: f32) -> Event {
        Event::PointerRelease {
            position: Point2::new(x, y),
            button: MouseButton::Left,
            time: 0.,
        }
    }

    fn counting_button(counter: &Rc<Cell<u32>>) -> Widget {
        let counter = counter.clone();
        Button::new("b")
            .on_click(move |_, ()| counter.set(counter.get() + 1))
            .into()
    }

    fn click(tree: &mut ComponentTree, x: f32, y: f32) -> bool {
        let mut commands = Commands::new();
        let config = InteractionConfig::default();
        let pressed = tree.dispatch(&press(x, y), &mut commands, &config);
        tree.dispatch(&release(x, y), &mut commands, &config);
        pressed
    }

    #[test]
    fn propagation_stops_at_first_consumer() {
        let mut tree = ComponentTree::new(Vector2::new(200., 200.));
        let root = tree.root();
        let below = Rc::new(Cell::new(0));
        let above = Rc::new(Cell::new(0));
        tree.add_child(root, Layer::new(Rect::from_xywh(0., 0., 100., 100.)), counting_button(&below));
        tree.add_child(root, Layer::new(Rect::from_xywh(50., 50., 100., 100.)), counting_button(&above));

        assert!(click(&mut tree, 75., 75.));
        assert_eq!((below.get(), above.get()), (0, 1));

        assert!(click(&mut tree, 25., 25.));
        assert_eq!((below.get(), above.get()), (1, 1));
    }

    #[test]
    fn pointer_moves_dirty_the_tree_only_on_hover_changes() {
        let mut tree = ComponentTree::new(Vector2::new(200., 200.));
        let root = tree.root();
        let mut commands = Commands::new();
        let config = InteractionConfig::default();
        tree.add_child(root, Layer::new(Rect::from_xywh(0., 0., 50., 50.)), Label::new("l").into());
        tree.add_child(
            root,
            Layer::new(Rect::from_xywh(100., 100., 50., 50.)),
            Button::new("b").into(),
        );
        let mut move_to = |tree: &mut ComponentTree, x: f32, y: f32| {
            tree.mark_clean();
            tree.dispatch(
                &Event::PointerMove {
                    position: Point2::new(x, y),
                },
                &mut commands,
                &config,
            );
            tree.is_dirty()
        };

        assert!(!move_to(&mut tree, 10., 10.));
        assert!(!move_to(&mut tree, 20., 30.));
        // entering and leaving the button changes its look
        assert!(move_to(&mut tree, 120., 120.));
        assert!(!move_to(&mut tree, 125., 125.));
        assert!(move_to(&mut tree, 180., 180.));

        tree.mark_clean();
        click(&mut tree, 5., 5.);
        assert!(tree.is_dirty());
    }

    #[test]
    fn hover_reaches_every_overlapping_node() {
        let mut tree = ComponentTree::new(Vector2::new(200., 200.));
        let root = tree.root();
        let a = tree
            .add_child(root, Layer::new(Rect::from_xywh(0., 0., 100., 100.)), Button::new("a").into())
            .unwrap();
        let b = tree
            .add_child(root, Layer::new(Rect::from_xywh(50., 50., 100., 100.)), Button::new("b").into())
            .unwrap();

        let mut commands = Commands::new();
        let event = Event::PointerMove {
            position: Point2::new(75., 75.),
        };
        assert!(tree.dispatch(&event, &mut commands, &InteractionConfig::default()));
        assert!(tree.widget_as::<Button>(a).unwrap().is_hovered());
        assert!(tree.widget_as::<Button>(b).unwrap().is_hovered());
    }

    #[test]
    fn dispatch_follows_nested_offsets() {
        for &(dx, dy) in &[(0., 0.), (20., 10.), (-20., -10.), (-35., 15.)] {
            let mut tree = ComponentTree::new(Vector2::new(400., 400.));
            let root = tree.root();
            let mut panel_layer = Layer::new(Rect::from_xywh(100., 100., 200., 200.));
            panel_layer.transform.offset = Vector2::new(dx, dy);
            let panel = tree.add_child(root, panel_layer, Panel::new().into()).unwrap();

            let clicks = Rc::new(Cell::new(0));
            let mut button_layer = Layer::new(Rect::from_xywh(10., 10., 50., 20.));
            button_layer.transform.offset = Vector2::new(dy, dx);
            tree.add_child(panel, button_layer, counting_button(&clicks));

            let origin = Point2::new(100. + dx + 10. + dy, 100. + dy + 10. + dx);
            click(&mut tree, origin.x + 1., origin.y + 1.);
            assert_eq!(clicks.get(), 1, "offset ({}, {})", dx, dy);

            click(&mut tree, origin.x - 1., origin.y - 1.);
            assert_eq!(clicks.get(), 1, "offset ({}, {})", dx, dy);

            // render applies the same translations
            let mut canvas = RecordingCanvas::default();
            tree.render(&mut canvas);
            let translations: Vec<_> = canvas
                .ops
                .iter()
                .filter_map(|op| match op {
                    CanvasOp::Translate(x, y) => Some((*x, *y)),
                    _ => None,
                })
                .collect();
            let total = translations
                .iter()
                .fold((0., 0.), |(ax, ay), (x, y)| (ax + x, ay + y));
            assert_eq!(total, (origin.x, origin.y));
        }
    }

    #[test]
    fn panels_consume_presses_within_their_bounds() {
        let mut tree = ComponentTree::new(Vector2::new(200., 200.));
        let root = tree.root();
        let clicks = Rc::new(Cell::new(0));
        tree.add_child(root, Layer::new(Rect::from_xywh(0., 0., 100., 100.)), counting_button(&clicks));
        tree.add_child(root, Layer::new(Rect::from_xywh(0., 0., 50., 50.)), Panel::new().into());

        // the panel on top blocks the button below it
        assert!(click(&mut tree, 25., 25.));
        assert_eq!(clicks.get(), 0);

        let mut commands = Commands::new();
        let key = Event::Text('x');
        assert!(!tree.dispatch(&key, &mut commands, &InteractionConfig::default()));
    }

    #[test]
    fn hidden_disabled_and_undisplayed_nodes_ignore_input() {
        for flag in 0..3 {
            let mut tree = ComponentTree::new(Vector2::new(200., 200.));
            let root = tree.root();
            let clicks = Rc::new(Cell::new(0));
            let id = tree
                .add_child(root, Layer::new(Rect::from_xywh(0., 0., 100., 100.)), counting_button(&clicks))
                .unwrap();
            let layer = tree.layer_mut(id).unwrap();
            match flag {
                0 => layer.visible = false,
                1 => layer.enabled = false,
                _ => layer.display = false,
            }
            click(&mut tree, 10., 10.);
            assert_eq!(clicks.get(), 0);
        }
    }

    #[test]
    fn layout_skips_undisplayed_children() {
        let mut tree = ComponentTree::new(Vector2::new(300., 100.));
        let root = tree.root();
        let row = tree
            .add_child(
                root,
                Layer::new(Rect::from_xywh(0., 0., 300., 100.)),
                Panel::with_layout(FlexLayout::row(MainAlign::SpaceBetween, CrossAlign::Start)).into(),
            )
            .unwrap();
        let ids: Vec<_> = (0..4)
            .map(|_| {
                tree.add_child(row, Layer::new(Rect::from_xywh(0., 0., 50., 10.)), Label::new("x").into())
                    .unwrap()
            })
            .collect();
        let hidden = tree.layer_mut(ids[1]).unwrap();
        hidden.display = false;
        hidden.bounds.origin = Point2::new(7., 7.);

        tree.layout_all();
        let xs: Vec<_> = ids.iter().map(|id| tree.layer(*id).unwrap().bounds.origin.x).collect();
        assert_eq!(xs, vec![0., 7., 125., 250.]);
    }

    #[test]
    fn invisible_subtrees_are_not_rendered() {
        let mut tree = ComponentTree::new(Vector2::new(100., 100.));
        let root = tree.root();
        let panel = tree
            .add_child(root, Layer::new(Rect::from_xywh(0., 0., 50., 50.)), Panel::new().into())
            .unwrap();
        tree.add_child(panel, Layer::new(Rect::from_xywh(0., 0., 50., 20.)), Label::new("inner").into());
        tree.add_child(root, Layer::new(Rect::from_xywh(0., 60., 50., 20.)), Label::new("outer").into());

        tree.layer_mut(panel).unwrap().transform.opacity = 0.;
        let mut canvas = RecordingCanvas::default();
        tree.render(&mut canvas);
        assert_eq!(canvas.texts(), vec!["outer"]);
    }

    #[test]
    fn removed_ids_stay_dead() {
        let mut tree = ComponentTree::new(Vector2::new(100., 100.));
        let root = tree.root();
        let panel = tree
            .add_child(root, Layer::default(), Panel::new().into())
            .unwrap();
        let child = tree
            .add_child(panel, Layer::default(), Label::new("a").into())
            .unwrap();

        let removed = tree.remove(panel);
        assert_eq!(removed, vec![panel, child]);
        assert!(!tree.contains(panel));
        assert!(!tree.contains(child));
        assert!(tree.children(root).is_empty());

        let reused = tree
            .add_child(root, Layer::default(), Label::new("b").into())
            .unwrap();
        assert_ne!(reused, panel);
        assert_ne!(reused, child);
        assert!(tree.layer(child).is_none());

        assert!(tree.remove(root).is_empty());
        assert!(tree.add_child(reused, Layer::default(), Label::new("c").into()).is_none());
    }
}
