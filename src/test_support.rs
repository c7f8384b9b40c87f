//! Test doubles for the backend and the decoding service.

use crate::backend::{Canvas, GpuContext, ImageHandle, TextStyle};
use crate::color::Color;
use crate::error::{Error, Result};
use crate::rect::Rect;
use crate::services::{DecodedImage, ImageDecoder};
use cgmath::Point2;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    Save,
    Restore,
    Translate(f32, f32),
    Rotate(f32),
    Scale(f32, f32),
    GlobalAlpha(f32),
    FillRect(Rect, Color),
    StrokeRect(Rect, Color),
    FillCircle(Point2<f32>, f32),
    Polyline(usize),
    Text(String),
    Image(ImageHandle, Rect, f32),
}

/// A canvas and GPU context that records what's done to it.
#[derive(Debug)]
pub struct RecordingCanvas {
    pub ops: Vec<CanvasOp>,
    alpha: f32,
    alpha_stack: Vec<f32>,
    next_image: u32,
    /// Live images and their sizes.
    pub images: HashMap<ImageHandle, (u32, u32)>,
    pub deleted: Vec<ImageHandle>,
    /// If true, every upload fails.
    pub reject_uploads: bool,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        RecordingCanvas {
            ops: Vec::new(),
            alpha: 1.,
            alpha_stack: Vec::new(),
            next_image: 1,
            images: HashMap::new(),
            deleted: Vec::new(),
            reject_uploads: false,
        }
    }
}

impl RecordingCanvas {
    /// A canvas whose GPU context refuses every upload.
    pub fn rejecting() -> Self {
        RecordingCanvas {
            reject_uploads: true,
            ..RecordingCanvas::default()
        }
    }

    /// All text drawn so far.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// All images drawn so far.
    pub fn drawn_images(&self) -> Vec<(ImageHandle, Rect, f32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Image(handle, dest, alpha) => Some((*handle, *dest, *alpha)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.alpha_stack.push(self.alpha);
        self.ops.push(CanvasOp::Save);
    }

    fn restore(&mut self) {
        if let Some(alpha) = self.alpha_stack.pop() {
            self.alpha = alpha;
        }
        self.ops.push(CanvasOp::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.ops.push(CanvasOp::Translate(x, y));
    }

    fn rotate(&mut self, radians: f32) {
        self.ops.push(CanvasOp::Rotate(radians));
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.ops.push(CanvasOp::Scale(x, y));
    }

    fn global_alpha(&self) -> f32 {
        self.alpha
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
        self.ops.push(CanvasOp::GlobalAlpha(alpha));
    }

    fn fill_rect(&mut self, rect: Rect, _: f32, color: Color) {
        self.ops.push(CanvasOp::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, _: f32, _: f32, color: Color) {
        self.ops.push(CanvasOp::StrokeRect(rect, color));
    }

    fn fill_circle(&mut self, center: Point2<f32>, radius: f32, _: Color) {
        self.ops.push(CanvasOp::FillCircle(center, radius));
    }

    fn stroke_polyline(&mut self, points: &[Point2<f32>], _: f32, _: Color) {
        self.ops.push(CanvasOp::Polyline(points.len()));
    }

    fn text(&mut self, _: Point2<f32>, text: &str, _: &TextStyle) {
        self.ops.push(CanvasOp::Text(text.to_string()));
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size / 2.
    }

    fn draw_image(&mut self, image: ImageHandle, dest: Rect, _: f32, alpha: f32) {
        self.ops.push(CanvasOp::Image(image, dest, alpha));
    }
}

impl GpuContext for RecordingCanvas {
    fn create_image_rgba(&mut self, width: u32, height: u32, pixels: &[u8]) -> Option<ImageHandle> {
        assert_eq!(pixels.len(), (width * height * 4) as usize);
        if self.reject_uploads {
            return None;
        }
        let handle = ImageHandle(self.next_image);
        self.next_image += 1;
        self.images.insert(handle, (width, height));
        Some(handle)
    }

    fn delete_image(&mut self, image: ImageHandle) {
        assert!(self.images.remove(&image).is_some(), "double free of {:?}", image);
        self.deleted.push(image);
    }
}

/// A decoder with canned results per path.
#[derive(Debug, Default)]
pub struct ScriptedDecoder {
    results: Mutex<HashMap<PathBuf, std::result::Result<(u32, u32), String>>>,
    calls: AtomicUsize,
}

impl ScriptedDecoder {
    pub fn new() -> ScriptedDecoder {
        ScriptedDecoder::default()
    }

    /// Decoding `path` yields a blank image of the given size.
    pub fn ok(self, path: &str, width: u32, height: u32) -> ScriptedDecoder {
        self.results.lock().insert(path.into(), Ok((width, height)));
        self
    }

    /// Decoding `path` fails with the reason.
    pub fn fail(self, path: &str, reason: &str) -> ScriptedDecoder {
        self.results.lock().insert(path.into(), Err(reason.to_string()));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageDecoder for ScriptedDecoder {
    fn decode(&self, path: &Path, channels: u8) -> Result<DecodedImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = self.results.lock().get(path).cloned();
        match result {
            Some(Ok((width, height))) => Ok(DecodedImage {
                width,
                height,
                channels,
                pixels: vec![0; (width * height * u32::from(channels)) as usize],
            }),
            Some(Err(reason)) => Err(Error::Decode {
                path: path.to_path_buf(),
                reason,
            }),
            None => Err(Error::Decode {
                path: path.to_path_buf(),
                reason: "no such file".into(),
            }),
        }
    }
}

/// Polls `condition` until it holds, panicking after a few seconds.
pub fn wait_until<F: FnMut() -> bool>(mut condition: F) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for condition");
        std::thread::sleep(Duration::from_millis(1));
    }
}
