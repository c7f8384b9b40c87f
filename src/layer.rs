use crate::backend::Canvas;
use crate::color::Color;
use crate::rect::Rect;
use crate::transform::{rotate, Transform};
use cgmath::{EuclideanSpace, Point2, Vector2};
use core::fmt;

/// State shared by every component: the layout box, the animation overlay, flags, and the
/// background/border decoration.
#[derive(Clone, PartialEq)]
pub struct Layer {
    /// Layout box, in the parent's coordinate system.
    pub bounds: Rect,

    /// Animation overlay.
    pub transform: Transform,

    /// Background color, with which the layer bounds will be filled--respecting the corner radius.
    pub background: Color,

    /// Corner radius.
    pub corner_radius: f32,

    /// Border (width, color).
    pub border: Option<(f32, Color)>,

    /// If false, the component isn't rendered.
    pub visible: bool,

    /// If false, the component doesn't react to input.
    pub enabled: bool,

    /// If false, the component takes no part in layout, rendering or input at all.
    pub display: bool,
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Layer")
            .field("bounds", &self.bounds)
            .field("transform", &self.transform)
            .field("visible", &self.visible)
            .field("enabled", &self.enabled)
            .field("display", &self.display)
            .finish()
    }
}

impl Default for Layer {
    fn default() -> Self {
        Layer {
            bounds: Rect::zero(),
            transform: Transform::default(),
            background: Color::TRANSPARENT,
            corner_radius: 0.,
            border: None,
            visible: true,
            enabled: true,
            display: true,
        }
    }
}

impl Layer {
    pub fn new(bounds: Rect) -> Layer {
        Layer {
            bounds,
            ..Layer::default()
        }
    }

    pub fn size(&self) -> Vector2<f32> {
        self.bounds.size
    }

    /// Layout position plus the animation offset.
    pub fn effective_origin(&self) -> Point2<f32> {
        self.bounds.origin + self.transform.offset
    }

    /// Returns the layout box moved by the animation offset.
    pub fn effective_bounds(&self) -> Rect {
        self.bounds.with_origin(self.effective_origin())
    }

    /// Maps a point from the parent's coordinate system into this component's local coordinate
    /// system, undoing the overlay in reverse order.
    ///
    /// Returns `None` if the component is scaled to nothing along an axis.
    pub fn to_local(&self, point: Point2<f32>) -> Option<Point2<f32>> {
        let t = &self.transform;
        if t.scale.x == 0. || t.scale.y == 0. {
            return None;
        }

        let size = self.bounds.size;
        let center = Point2::new(size.x / 2., size.y / 2.);
        let origin = t.scale_origin.point(size);

        let p = Point2::origin() + (point - self.effective_origin());
        let p = center + rotate(p - center, -t.rotation);
        Some(Point2::new(
            origin.x + (p.x - origin.x) / t.scale.x,
            origin.y + (p.y - origin.y) / t.scale.y,
        ))
    }

    /// Returns true if the point (in the parent's coordinate system) hits this component.
    pub fn contains(&self, point: Point2<f32>) -> bool {
        match self.to_local(point) {
            Some(local) => self.bounds.local().contains(local),
            None => false,
        }
    }

    /// Returns false if rendering would have no visible effect.
    pub fn is_drawable(&self) -> bool {
        self.display && self.visible && self.transform.opacity > 0.
    }

    /// Saves the canvas state and applies the overlay so that subsequent drawing happens in local
    /// coordinates. Returns false (and leaves the canvas untouched) if the layer isn't drawable;
    /// otherwise [`end_render`](Layer::end_render) must be called afterwards.
    pub fn begin_render(&self, canvas: &mut dyn Canvas) -> bool {
        if !self.is_drawable() {
            return false;
        }
        let t = &self.transform;
        let size = self.bounds.size;

        canvas.save();
        let origin = self.effective_origin();
        canvas.translate(origin.x, origin.y);

        if t.rotation != 0. {
            canvas.translate(size.x / 2., size.y / 2.);
            canvas.rotate(t.rotation);
            canvas.translate(-size.x / 2., -size.y / 2.);
        }

        if t.scale != Vector2::new(1., 1.) {
            let o = t.scale_origin.point(size);
            canvas.translate(o.x, o.y);
            canvas.scale(t.scale.x, t.scale.y);
            canvas.translate(-o.x, -o.y);
        }

        let alpha = canvas.global_alpha() * t.opacity.min(1.);
        canvas.set_global_alpha(alpha);
        true
    }

    pub fn end_render(&self, canvas: &mut dyn Canvas) {
        canvas.restore();
    }

    /// Fills the background and strokes the border, in local coordinates.
    pub fn paint_decoration(&self, canvas: &mut dyn Canvas) {
        let rect = self.bounds.local();
        if self.background.a > 0. {
            canvas.fill_rect(rect, self.corner_radius, self.background);
        }
        if let Some((width, color)) = self.border {
            if width > 0. {
                canvas.stroke_rect(rect, self.corner_radius, width, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CanvasOp, RecordingCanvas};
    use crate::transform::ScaleOrigin;

    fn layer_at(x: f32, y: f32) -> Layer {
        Layer::new(Rect::from_xywh(x, y, 40., 20.))
    }

    #[test]
    fn hit_test_follows_animation_offset() {
        for &(dx, dy) in &[(0., 0.), (15., 7.), (-30., -12.), (-5., 40.)] {
            let mut layer = layer_at(100., 50.);
            layer.transform.offset = Vector2::new(dx, dy);

            assert!(
                layer.contains(Point2::new(100. + dx + 1., 50. + dy + 1.)),
                "offset ({}, {}) should move the hit area",
                dx,
                dy
            );
            if dx >= 0. && dy >= 0. {
                assert!(!layer.contains(Point2::new(99., 49.)));
            }
            assert!(!layer.contains(Point2::new(100. + dx - 1., 50. + dy - 1.)));
        }
    }

    #[test]
    fn hit_test_respects_scale_about_center() {
        let mut layer = layer_at(0., 0.);
        layer.transform.scale = Vector2::new(0.5, 0.5);
        layer.transform.scale_origin = ScaleOrigin::Center;

        // scaled box spans (10, 5)..(30, 15)
        assert!(layer.contains(Point2::new(20., 10.)));
        assert!(layer.contains(Point2::new(11., 6.)));
        assert!(!layer.contains(Point2::new(5., 2.)));
        assert!(!layer.contains(Point2::new(35., 10.)));
    }

    #[test]
    fn hit_test_respects_rotation() {
        let mut layer = Layer::new(Rect::from_xywh(0., 0., 100., 10.));
        layer.transform.rotation = std::f32::consts::FRAC_PI_2;

        // a quarter turn about (50, 5) makes the box tall and thin
        assert!(layer.contains(Point2::new(50., 40.)));
        assert!(!layer.contains(Point2::new(90., 5.)));
    }

    #[test]
    fn zero_scale_hits_nothing() {
        let mut layer = layer_at(0., 0.);
        layer.transform.scale = Vector2::new(0., 1.);
        assert!(!layer.contains(Point2::new(20., 10.)));
    }

    #[test]
    fn render_applies_overlay_in_order() {
        let mut layer = layer_at(10., 20.);
        layer.transform.offset = Vector2::new(5., -5.);
        layer.transform.rotation = 1.;
        layer.transform.scale = Vector2::new(2., 2.);
        layer.transform.opacity = 0.5;

        let mut canvas = RecordingCanvas::default();
        assert!(layer.begin_render(&mut canvas));
        layer.end_render(&mut canvas);

        assert_eq!(
            canvas.ops,
            vec![
                CanvasOp::Save,
                CanvasOp::Translate(15., 15.),
                CanvasOp::Translate(20., 10.),
                CanvasOp::Rotate(1.),
                CanvasOp::Translate(-20., -10.),
                CanvasOp::Translate(20., 10.),
                CanvasOp::Scale(2., 2.),
                CanvasOp::Translate(-20., -10.),
                CanvasOp::GlobalAlpha(0.5),
                CanvasOp::Restore,
            ]
        );
    }

    #[test]
    fn invisible_or_transparent_layers_render_nothing() {
        let mut canvas = RecordingCanvas::default();

        let mut hidden = layer_at(0., 0.);
        hidden.visible = false;
        assert!(!hidden.begin_render(&mut canvas));

        let mut transparent = layer_at(0., 0.);
        transparent.transform.opacity = 0.;
        assert!(!transparent.begin_render(&mut canvas));

        assert!(canvas.ops.is_empty());
    }
}
