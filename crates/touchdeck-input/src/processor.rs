//! Events handed to the key and pointer processors.
//!
//! Positions are already converted to frame space by the input manager.

use touchdeck_types::{ButtonState, MouseButton, MouseButtons, PointerId, Position, TouchAction};

/// Pointer motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMotionEvent {
    pub position: Position,
    pub pointer_id: PointerId,
    pub xrel: i32,
    pub yrel: i32,
    /// Held buttons that are forwarded as clicks.
    pub buttons: MouseButtons,
}

/// Pointer button press or release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerClickEvent {
    pub position: Position,
    pub action: ButtonState,
    pub button: MouseButton,
    pub pointer_id: PointerId,
    /// Held buttons that are forwarded as clicks.
    pub buttons: MouseButtons,
}

/// Scroll, clamped to `-1.0..=1.0` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerScrollEvent {
    pub position: Position,
    pub hscroll: f32,
    pub vscroll: f32,
    pub buttons: MouseButtons,
}

/// A native touch contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerTouchEvent {
    pub position: Position,
    pub action: TouchAction,
    pub pointer_id: PointerId,
    pub pressure: f32,
}
