//! Flex-style layout.
//!
//! Layout only ever assigns positions: child sizes are inputs and are never changed.

use cgmath::{Point2, Vector2};
use core::fmt;

/// A layout delegate for a panel.
pub trait Layout: fmt::Debug {
    /// Computes the position of each child, in the container's local coordinate system.
    ///
    /// - `container`: the size of the container.
    /// - `children`: the sizes of the participating children, in paint order.
    ///
    /// Must return exactly one position per child and must be a pure function of its inputs.
    fn layout(&self, container: Vector2<f32>, children: &[Vector2<f32>]) -> Vec<Point2<f32>>;
}

/// Main axis of a flex layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Children are laid out left to right.
    Row,
    /// Children are laid out top to bottom.
    Column,
}

/// Distribution along the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAlign {
    Start,
    Center,
    End,
    /// Leftover space goes between children; none before the first or after the last.
    SpaceBetween,
    /// Leftover space is split evenly around every child, with half-gaps at the edges.
    SpaceAround,
}

/// Alignment along the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossAlign {
    Start,
    Center,
    End,
}

/// A single-line flex layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexLayout {
    pub direction: Direction,
    pub main_align: MainAlign,
    pub cross_align: CrossAlign,
    /// Gap between adjacent children.
    pub spacing: f32,
    /// Inset from every container edge.
    pub padding: f32,
}

impl FlexLayout {
    pub fn row(main_align: MainAlign, cross_align: CrossAlign) -> FlexLayout {
        FlexLayout {
            direction: Direction::Row,
            main_align,
            cross_align,
            spacing: 0.,
            padding: 0.,
        }
    }

    pub fn column(main_align: MainAlign, cross_align: CrossAlign) -> FlexLayout {
        FlexLayout {
            direction: Direction::Column,
            ..FlexLayout::row(main_align, cross_align)
        }
    }

    pub fn spacing(mut self, spacing: f32) -> FlexLayout {
        self.spacing = spacing;
        self
    }

    pub fn padding(mut self, padding: f32) -> FlexLayout {
        self.padding = padding;
        self
    }

    /// Splits a vector into (main, cross) components.
    fn axes(&self, v: Vector2<f32>) -> (f32, f32) {
        match self.direction {
            Direction::Row => (v.x, v.y),
            Direction::Column => (v.y, v.x),
        }
    }

    fn point(&self, main: f32, cross: f32) -> Point2<f32> {
        match self.direction {
            Direction::Row => Point2::new(main, cross),
            Direction::Column => Point2::new(cross, main),
        }
    }

    /// Returns (leading offset, gap between children) along the main axis.
    fn distribute(&self, remaining: f32, count: usize) -> (f32, f32) {
        let n = count as f32;
        match self.main_align {
            MainAlign::Start => (0., self.spacing),
            MainAlign::Center => (remaining / 2., self.spacing),
            MainAlign::End => (remaining, self.spacing),
            MainAlign::SpaceBetween if count > 1 => (0., self.spacing + remaining / (n - 1.)),
            MainAlign::SpaceBetween => (0., self.spacing),
            MainAlign::SpaceAround => {
                let extra = remaining / n;
                (extra / 2., self.spacing + extra)
            }
        }
    }

    fn cross_position(&self, available: f32, extent: f32) -> f32 {
        match self.cross_align {
            CrossAlign::Start => self.padding,
            CrossAlign::Center => self.padding + (available - extent) / 2.,
            CrossAlign::End => self.padding + available - extent,
        }
    }
}

impl Layout for FlexLayout {
    fn layout(&self, container: Vector2<f32>, children: &[Vector2<f32>]) -> Vec<Point2<f32>> {
        if children.is_empty() {
            return Vec::new();
        }

        let (container_main, container_cross) = self.axes(container);
        let available_main = container_main - 2. * self.padding;
        let available_cross = container_cross - 2. * self.padding;

        let total: f32 = children.iter().map(|size| self.axes(*size).0).sum();
        let remaining =
            available_main - (total + (children.len() - 1) as f32 * self.spacing);

        let (leading, gap) = self.distribute(remaining, children.len());

        let mut main = self.padding + leading;
        children
            .iter()
            .map(|size| {
                let (extent, cross_extent) = self.axes(*size);
                let pos = self.point(main, self.cross_position(available_cross, cross_extent));
                main += extent + gap;
                pos
            })
            .collect()
    }
}
