//! Input event types.
//!
//! Platform-agnostic representations of the raw events the local window
//! system delivers: keyboard, text, pointer, native touch, file drop, and
//! game-controller events.

use std::path::PathBuf;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::controller::{ControllerAxis, ControllerButton, ControllerId};

/// A raw local input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(KeyEvent),
    Text(TextInputEvent),
    MouseMotion(MouseMotionEvent),
    MouseButton(MouseButtonEvent),
    MouseWheel(MouseWheelEvent),
    Touch(TouchFingerEvent),
    FileDrop(FileDropEvent),
    ControllerAxis(ControllerAxisEvent),
    ControllerButton(ControllerButtonEvent),
    ControllerDevice(ControllerDeviceEvent),
}

/// Button/key state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonState {
    Pressed,
    Released,
}

impl ButtonState {
    #[must_use]
    pub fn is_pressed(self) -> bool {
        self == Self::Pressed
    }
}

bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Modifiers: u16 {
        const LSHIFT = 1 << 0;
        const RSHIFT = 1 << 1;
        const LCTRL = 1 << 2;
        const RCTRL = 1 << 3;
        const LALT = 1 << 4;
        const RALT = 1 << 5;
        const LSUPER = 1 << 6;
        const RSUPER = 1 << 7;
        const CAPS = 1 << 8;
        const NUM = 1 << 9;

        const SHIFT = Self::LSHIFT.bits() | Self::RSHIFT.bits();
        const CTRL = Self::LCTRL.bits() | Self::RCTRL.bits();
        const ALT = Self::LALT.bits() | Self::RALT.bits();
        const SUPER = Self::LSUPER.bits() | Self::RSUPER.bits();
    }
}

impl Modifiers {
    #[must_use]
    pub fn ctrl(self) -> bool {
        self.intersects(Self::CTRL)
    }

    #[must_use]
    pub fn shift(self) -> bool {
        self.intersects(Self::SHIFT)
    }
}

/// Keyboard key code (layout-dependent key symbol).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    // Letters
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF,
    KeyG,
    KeyH,
    KeyI,
    KeyJ,
    KeyK,
    KeyL,
    KeyM,
    KeyN,
    KeyO,
    KeyP,
    KeyQ,
    KeyR,
    KeyS,
    KeyT,
    KeyU,
    KeyV,
    KeyW,
    KeyX,
    KeyY,
    KeyZ,

    // Numbers
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Modifiers
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,

    // Navigation
    Enter,
    Escape,
    Backspace,
    Tab,
    Space,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    /// Fallback for keys without a dedicated variant. The value is the raw platform keysym.
    Unknown(u32),
}

impl KeyCode {
    /// The modifier flag this key sets while held, if it is a modifier key.
    #[must_use]
    pub fn modifier_flag(self) -> Option<Modifiers> {
        match self {
            Self::LeftShift => Some(Modifiers::LSHIFT),
            Self::RightShift => Some(Modifiers::RSHIFT),
            Self::LeftCtrl => Some(Modifiers::LCTRL),
            Self::RightCtrl => Some(Modifiers::RCTRL),
            Self::LeftAlt => Some(Modifiers::LALT),
            Self::RightAlt => Some(Modifiers::RALT),
            Self::LeftSuper => Some(Modifiers::LSUPER),
            Self::RightSuper => Some(Modifiers::RSUPER),
            _ => None,
        }
    }
}

/// Key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub keycode: KeyCode,
    /// Physical scancode, passed through to the key processor.
    pub scancode: u32,
    pub state: ButtonState,
    /// Modifier state at the time of the event.
    pub mods: Modifiers,
    /// OS auto-repeat.
    pub repeat: bool,
}

impl KeyEvent {
    #[must_use]
    pub fn new(keycode: KeyCode, state: ButtonState, mods: Modifiers) -> Self {
        Self {
            keycode,
            scancode: 0,
            state,
            mods,
            repeat: false,
        }
    }

    #[must_use]
    pub fn is_down(&self) -> bool {
        self.state.is_pressed()
    }
}

/// Committed text from the input method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInputEvent {
    pub text: String,
    /// Modifier state when the text was committed.
    pub mods: Modifiers,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
    /// Extra buttons beyond the standard five.
    Other(u8),
}

bitflags! {
    /// Set of held mouse buttons.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct MouseButtons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
        const X1 = 1 << 3;
        const X2 = 1 << 4;
    }
}

impl MouseButton {
    /// The button-state flag for this button; `Other` buttons have none.
    #[must_use]
    pub fn flag(self) -> MouseButtons {
        match self {
            Self::Left => MouseButtons::LEFT,
            Self::Right => MouseButtons::RIGHT,
            Self::Middle => MouseButtons::MIDDLE,
            Self::X1 => MouseButtons::X1,
            Self::X2 => MouseButtons::X2,
            Self::Other(_) => MouseButtons::empty(),
        }
    }
}

/// Pointer motion in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseMotionEvent {
    pub x: i32,
    pub y: i32,
    pub xrel: i32,
    pub yrel: i32,
    /// Buttons held during the motion.
    pub buttons: MouseButtons,
    /// Synthesized by the window system from a touch event.
    pub from_touch: bool,
}

/// Pointer button press or release in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    pub state: ButtonState,
    pub x: i32,
    pub y: i32,
    /// 1 for a single click, 2 for a double click, ...
    pub clicks: u8,
    /// Buttons held after this event.
    pub buttons: MouseButtons,
    /// Keyboard modifiers held during the click.
    pub mods: Modifiers,
    /// Synthesized by the window system from a touch event.
    pub from_touch: bool,
}

/// Scroll wheel, with the pointer location at the time of scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseWheelEvent {
    /// Precise horizontal scroll amount.
    pub x: f32,
    /// Precise vertical scroll amount.
    pub y: f32,
    pub mouse_x: i32,
    pub mouse_y: i32,
    pub buttons: MouseButtons,
}

/// Native touch action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchAction {
    Down,
    Move,
    Up,
}

/// A finger on a local touchscreen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchFingerEvent {
    pub action: TouchAction,
    pub finger_id: u64,
    /// Normalised to 0.0..=1.0 of the drawable width.
    pub x: f32,
    /// Normalised to 0.0..=1.0 of the drawable height.
    pub y: f32,
    pub pressure: f32,
}

/// A file dropped onto the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDropEvent {
    pub path: PathBuf,
}

/// Analog axis motion on a game controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerAxisEvent {
    pub controller: ControllerId,
    pub axis: ControllerAxis,
    pub value: i16,
}

/// Digital button transition on a game controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerButtonEvent {
    pub controller: ControllerId,
    pub button: ControllerButton,
    pub state: ButtonState,
}

/// Game controller plugged in or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerDeviceEvent {
    /// A controller appeared at this platform device index; it still has to be opened.
    Added { device_index: u32 },
    /// The controller with this instance id disappeared.
    Removed { controller: ControllerId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_groups() {
        let mods = Modifiers::RCTRL | Modifiers::LSHIFT;
        assert!(mods.ctrl());
        assert!(mods.shift());
        assert!(!mods.intersects(Modifiers::ALT));
        assert!(!Modifiers::CAPS.ctrl());
    }

    #[test]
    fn modifier_keys_have_flags() {
        assert_eq!(KeyCode::LeftCtrl.modifier_flag(), Some(Modifiers::LCTRL));
        assert_eq!(KeyCode::RightSuper.modifier_flag(), Some(Modifiers::RSUPER));
        assert_eq!(KeyCode::KeyA.modifier_flag(), None);
        assert_eq!(KeyCode::Unknown(0x4000_0000).modifier_flag(), None);
    }

    #[test]
    fn mouse_button_flags() {
        assert_eq!(MouseButton::Middle.flag(), MouseButtons::MIDDLE);
        assert!(MouseButton::Other(9).flag().is_empty());
    }

    #[test]
    fn key_event_serde_roundtrip() {
        let event = KeyEvent {
            keycode: KeyCode::KeyV,
            scancode: 25,
            state: ButtonState::Pressed,
            mods: Modifiers::LCTRL,
            repeat: false,
        };
        let json = serde_json::to_string(&event).unwrap();
        let decoded: KeyEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, decoded);
    }
}
