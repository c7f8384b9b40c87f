//! The animatable overlay applied on top of a component's layout box.

use cgmath::{Point2, Vector2, Zero};

/// The point that scaling is performed about, in the component's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleOrigin {
    TopLeft,
    Center,
}

impl ScaleOrigin {
    /// Resolves the origin for a component of the given size.
    pub fn point(self, size: Vector2<f32>) -> Point2<f32> {
        match self {
            ScaleOrigin::TopLeft => Point2::new(0., 0.),
            ScaleOrigin::Center => Point2::new(size.x / 2., size.y / 2.),
        }
    }
}

/// Animation overlay: translation, rotation about the center, scale about
/// [`scale_origin`](Transform::scale_origin) and opacity.
///
/// The overlay is always applied in that order, both when rendering and when hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Additive translation on top of the layout position.
    pub offset: Vector2<f32>,

    /// Rotation in radians, about the center of the layout box.
    pub rotation: f32,

    /// Scale factors.
    pub scale: Vector2<f32>,

    pub scale_origin: ScaleOrigin,

    /// Opacity between 0 and 1; multiplied with any content alpha and with the ancestors'
    /// opacity.
    pub opacity: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            offset: Vector2::zero(),
            rotation: 0.,
            scale: Vector2::new(1., 1.),
            scale_origin: ScaleOrigin::Center,
            opacity: 1.,
        }
    }
}

impl Transform {
    /// Changes the scale origin without moving the component on screen.
    ///
    /// The offset absorbs the difference between scaling about the old and the new origin. This
    /// is a no-op at scale 1.
    pub fn set_scale_origin(&mut self, origin: ScaleOrigin, size: Vector2<f32>) {
        if origin == self.scale_origin {
            return;
        }

        // (center - origin) * (1 - s), expressed after rotation
        let shift = |origin: ScaleOrigin| {
            let o = origin.point(size);
            Vector2::new(o.x * (1. - self.scale.x), o.y * (1. - self.scale.y))
        };
        let delta = shift(origin) - shift(self.scale_origin);
        self.offset -= rotate(delta, self.rotation);
        self.scale_origin = origin;
    }
}

/// Rotates a vector by the given angle (positive angles turn clockwise on a y-down screen).
pub fn rotate(v: Vector2<f32>, angle: f32) -> Vector2<f32> {
    if angle == 0. {
        return v;
    }
    let (sin, cos) = angle.sin_cos();
    Vector2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_quarter_turn() {
        let v = rotate(Vector2::new(1., 0.), std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.).abs() < 1e-6);
    }

    #[test]
    fn scale_origin_change_is_noop_at_unit_scale() {
        let mut transform = Transform {
            offset: Vector2::new(3., 4.),
            scale_origin: ScaleOrigin::TopLeft,
            ..Transform::default()
        };
        transform.set_scale_origin(ScaleOrigin::Center, Vector2::new(100., 50.));
        assert_eq!(transform.offset, Vector2::new(3., 4.));
        assert_eq!(transform.scale_origin, ScaleOrigin::Center);
    }

    #[test]
    fn scale_origin_change_compensates_offset() {
        let mut transform = Transform {
            scale: Vector2::new(2., 2.),
            scale_origin: ScaleOrigin::TopLeft,
            ..Transform::default()
        };
        transform.set_scale_origin(ScaleOrigin::Center, Vector2::new(100., 50.));
        // scaling about the center by 2 pushes the top left corner by (-50, -25); the offset
        // undoes that so the top left corner stays put
        assert_eq!(transform.offset, Vector2::new(50., 25.));
    }
}
