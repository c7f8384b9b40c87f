//! Retained-mode UI runtime for an image viewer.
//!
//! A [`Host`] owns a [`Ui`]: a tree of components, an animation scheduler and a texture cache.
//! The windowing layer pushes input events and calls [`Host::frame`] with a backend implementing
//! [`Canvas`] and [`GpuContext`].

pub mod animation;
pub mod backend;
pub mod color;
pub mod config;
mod context;
mod error;
pub mod events;
mod host;
mod layer;
pub mod layout;
pub mod main_thread;
pub mod navigation;
mod rect;
pub mod services;
mod texture_cache;
mod transform;
mod tree;
pub mod widget;

#[cfg(test)]
mod test_support;

pub use backend::{Canvas, GpuContext, ImageHandle};
pub use config::Config;
pub use context::{Callback, Commands, EventContext, Ui};
pub use error::{Error, Result};
pub use host::Host;
pub use layer::Layer;
pub use rect::Rect;
pub use texture_cache::{LoadState, TextureCache};
pub use transform::{ScaleOrigin, Transform};
pub use tree::{ComponentId, ComponentTree, Node};
