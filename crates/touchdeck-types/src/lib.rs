//! Shared types for touchdeck.
//!
//! This crate contains all types shared across the touchdeck workspace:
//! raw local input events, game-controller codes, frame geometry, display
//! orientation, and the logical remote-control commands.

pub mod controller;
pub mod event;
pub mod geometry;
pub mod message;
pub mod orientation;

pub use controller::{ButtonCode, ControllerAxis, ControllerButton, ControllerId};
pub use event::{
    ButtonState, ControllerAxisEvent, ControllerButtonEvent, ControllerDeviceEvent, FileDropEvent,
    InputEvent, KeyCode, KeyEvent, Modifiers, MouseButton, MouseButtonEvent, MouseButtons,
    MouseMotionEvent, MouseWheelEvent, TextInputEvent, TouchAction, TouchFingerEvent,
};
pub use geometry::{inverse_point, Point, Position, Rect, Size};
pub use message::{
    AckSequence, ControlMessage, ControllerDeviceChange, CopyKey, DeviceKey, MotionAction,
    PointerId, ScreenPowerMode,
};
pub use orientation::Orientation;
