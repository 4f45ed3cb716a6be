//! Gamepad-to-touchscreen mapping for touchdeck.
//!
//! A touchmap document declares where on the device screen each controller
//! input should touch: an optional walk control driven by the left stick,
//! discrete buttons, and skill-casting controls that are pressed by a button
//! and aimed with the right stick. [`Touchmap`] is the parsed, immutable table;
//! [`TouchmapEngine`] turns controller events into synthetic touches against it.

pub mod config;
pub mod engine;
pub mod error;

pub use config::{
    code_for_name, ControlKind, ControlMapping, Touchmap, TouchmapBuilder, WalkControl,
};
pub use engine::{SyntheticTouch, TouchmapEngine};
pub use error::TouchmapError;
