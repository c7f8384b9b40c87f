//! Default values for every configuration setting.

// ==========================================================================
// Interaction
// ==========================================================================

/// Maximum time between two presses of the same button that still counts as a double click (in
/// seconds).
pub const DEFAULT_DOUBLE_CLICK_TIME: f64 = 0.3;

/// Maximum pointer travel between the two presses of a double click (in pixels).
pub const DEFAULT_DOUBLE_CLICK_DISTANCE: f32 = 4.0;

/// Pointer travel after a press beyond which a texture node starts dragging (in pixels).
pub const DEFAULT_DRAG_THRESHOLD: f32 = 3.0;

/// Pointer travel between press and release that still counts as a click on a switch (in pixels).
pub const DEFAULT_CLICK_SLOP: f32 = 5.0;

// ==========================================================================
// Animation
// ==========================================================================

/// Switch knob speed (progress units per second).
pub const DEFAULT_SWITCH_SPEED: f32 = 8.0;

/// Distance from the target below which the switch knob snaps.
pub const SWITCH_SNAP_EPSILON: f32 = 0.01;

/// Default duration for helper animations (in seconds).
pub const DEFAULT_ANIMATION_DURATION: f64 = 0.25;

// ==========================================================================
// Widgets
// ==========================================================================

/// Height of a single dropdown list item.
pub const DROPDOWN_ITEM_HEIGHT: f32 = 24.0;

/// Maximum height of an open dropdown list; longer lists scroll.
pub const DROPDOWN_MAX_LIST_HEIGHT: f32 = 200.0;

/// Caret blink period of a focused text input (in seconds).
pub const CARET_BLINK_PERIOD: f32 = 1.0;
