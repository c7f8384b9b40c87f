//! Rectangles.

use cgmath::{EuclideanSpace, Point2, Vector2, Zero};

/// A rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Rectangle origin.
    pub origin: Point2<f32>,

    /// Rectangle size.
    pub size: Vector2<f32>,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(origin: Point2<f32>, size: Vector2<f32>) -> Rect {
        Rect { origin, size }
    }

    /// Creates a new rectangle from its components.
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Rect {
        Rect {
            origin: Point2::new(x, y),
            size: Vector2::new(width, height),
        }
    }

    /// Returns a zero-sized rectangle at the origin.
    pub fn zero() -> Rect {
        Rect {
            origin: Point2::new(0., 0.),
            size: Vector2::zero(),
        }
    }

    /// Returns the center point.
    pub fn center(&self) -> Point2<f32> {
        self.origin + self.size / 2.
    }

    /// Returns true if the point is inside the rectangle. Edges count as inside.
    pub fn contains(&self, point: Point2<f32>) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x <= self.origin.x + self.size.x
            && point.y <= self.origin.y + self.size.y
    }

    /// Returns a new rectangle with the given origin.
    pub fn with_origin(&self, origin: Point2<f32>) -> Rect {
        Rect {
            origin,
            size: self.size,
        }
    }

    /// Returns the same rectangle moved to the origin; i.e. its own local bounds.
    pub fn local(&self) -> Rect {
        self.with_origin(Point2::origin())
    }
}

impl Default for Rect {
    fn default() -> Self {
        Rect::zero()
    }
}

#[test]
fn test_rect_contains_edges() {
    let rect = Rect::from_xywh(10., 20., 30., 40.);
    assert!(rect.contains(Point2::new(10., 20.)));
    assert!(rect.contains(Point2::new(40., 60.)));
    assert!(!rect.contains(Point2::new(9.9, 30.)));
    assert!(!rect.contains(Point2::new(20., 60.1)));
    assert_eq!(rect.center(), Point2::new(25., 40.));
}
