//! Time-driven animation of component transforms.

pub mod easing;
mod scheduler;

pub use easing::Easing;
pub use scheduler::{Animation, AnimationKind, Repeat, Scheduler};
