//! Input manager for touchdeck.
//!
//! Routes local keyboard, pointer, touch, file-drop and game-controller
//! events of a mirroring session: shortcuts, mouse bindings, the pinch/tilt
//! virtual finger, clipboard sync before paste, and touchmap translation of
//! controller input into synthetic touches.

pub mod bindings;
pub mod config;
pub mod controllers;
pub mod error;
pub mod manager;
pub mod paste;
pub mod shortcut;
pub mod vfinger;

pub use bindings::{MouseBinding, MouseBindings};
pub use config::Config;
pub use error::{CoreError, SlotError};
pub use manager::{Collaborators, InputManager};
pub use shortcut::{Shortcut, ShortcutAction, ShortcutMod};
