//! Traits for backends.
//!
//! The windowing layer owns the graphics context and exposes it to the runtime through these two
//! traits. Both must only be used on the thread that owns the context.

use crate::color::Color;
use crate::rect::Rect;
use cgmath::Point2;

/// A GPU-resident image, as created by [`GpuContext::create_image_rgba`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

/// Text drawing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            size: 14.,
            color: Color::WHITE,
            align: TextAlign::Left,
            baseline: TextBaseline::Middle,
        }
    }
}

/// A vector drawing surface with a transform stack, in the style of NanoVG.
///
/// `save` pushes the current transform and global alpha; `restore` pops them.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);

    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, x: f32, y: f32);

    /// Returns the current global alpha.
    fn global_alpha(&self) -> f32;

    /// Sets the global alpha (not multiplied with the previous value).
    fn set_global_alpha(&mut self, alpha: f32);

    fn fill_rect(&mut self, rect: Rect, corner_radius: f32, color: Color);
    fn stroke_rect(&mut self, rect: Rect, corner_radius: f32, width: f32, color: Color);
    fn fill_circle(&mut self, center: Point2<f32>, radius: f32, color: Color);
    fn stroke_polyline(&mut self, points: &[Point2<f32>], width: f32, color: Color);
    fn text(&mut self, anchor: Point2<f32>, text: &str, style: &TextStyle);

    /// Returns the advance width of the text at the given font size.
    fn text_width(&self, text: &str, size: f32) -> f32;

    /// Fills `dest` with the image, scaled to fit it exactly.
    fn draw_image(&mut self, image: ImageHandle, dest: Rect, corner_radius: f32, alpha: f32);
}

/// Image resource management on the graphics context.
pub trait GpuContext {
    /// Uploads RGBA8 pixels. Returns `None` if the context rejected the image.
    fn create_image_rgba(&mut self, width: u32, height: u32, pixels: &[u8]) -> Option<ImageHandle>;

    /// Frees an image.
    fn delete_image(&mut self, image: ImageHandle);
}
