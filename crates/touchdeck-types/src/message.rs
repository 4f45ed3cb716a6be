//! Remote-control commands sent to the device.
//!
//! Only the logical fields are defined here; serialising them onto the wire is
//! the transport's job.

use serde::{Deserialize, Serialize};

use crate::controller::{ControllerAxis, ControllerButton, ControllerId};
use crate::event::{ButtonState, MouseButtons};
use crate::geometry::Position;

/// Identity of a pointer (finger) on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointerId(pub u64);

impl PointerId {
    /// The mouse, when secondary buttons are forwarded as clicks.
    pub const MOUSE: PointerId = PointerId(u64::MAX);
    /// The mouse acting as a plain finger.
    pub const GENERIC_FINGER: PointerId = PointerId(u64::MAX - 1);
    /// Pinch/rotate/tilt finger paired with [`PointerId::MOUSE`].
    pub const VIRTUAL_MOUSE: PointerId = PointerId(u64::MAX - 2);
    /// Pinch/rotate/tilt finger paired with [`PointerId::GENERIC_FINGER`].
    pub const VIRTUAL_FINGER: PointerId = PointerId(u64::MAX - 3);
    /// First id handed out to touchmap controls.
    pub const TOUCHMAP_BASE: PointerId = PointerId(100);
}

impl std::fmt::Display for PointerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlation number attached to a clipboard push.
///
/// The key processor waits for the device to acknowledge this sequence
/// before injecting the dependent paste keystroke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AckSequence(pub u64);

impl AckSequence {
    /// No acknowledgment requested.
    pub const NONE: AckSequence = AckSequence(0);

    #[must_use]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// Device keys that shortcuts and mouse bindings can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKey {
    Home,
    Back,
    AppSwitch,
    Menu,
    Power,
    VolumeUp,
    VolumeDown,
}

impl DeviceKey {
    /// Android keycode value.
    #[must_use]
    pub fn keycode(self) -> u32 {
        match self {
            Self::Home => 3,
            Self::Back => 4,
            Self::VolumeUp => 24,
            Self::VolumeDown => 25,
            Self::Power => 26,
            Self::Menu => 82,
            Self::AppSwitch => 187,
        }
    }
}

/// Touch action on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionAction {
    Down,
    Up,
    Move,
}

/// Which key the device should simulate before reading its clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CopyKey {
    None,
    Copy,
    Cut,
}

/// Device display power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenPowerMode {
    Off,
    Normal,
}

/// Controller hot-plug notification forwarded to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerDeviceChange {
    Added,
    Removed,
}

/// A remote-control command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControlMessage {
    InjectKeycode {
        action: ButtonState,
        keycode: DeviceKey,
        repeat: u32,
        metastate: u32,
    },

    InjectText {
        text: String,
    },

    InjectTouchEvent {
        action: MotionAction,
        pointer_id: PointerId,
        position: Position,
        pressure: f32,
        action_button: MouseButtons,
        buttons: MouseButtons,
    },

    /// Press BACK, or turn the screen on if it is off.
    BackOrScreenOn {
        action: ButtonState,
    },

    ExpandNotificationPanel,

    ExpandSettingsPanel,

    CollapsePanels,

    GetClipboard {
        copy_key: CopyKey,
    },

    SetClipboard {
        sequence: AckSequence,
        text: String,
        /// Paste on the device right after setting the clipboard.
        paste: bool,
    },

    SetScreenPowerMode {
        mode: ScreenPowerMode,
    },

    RotateDevice,

    OpenHardKeyboardSettings,

    InjectControllerAxis {
        controller: ControllerId,
        axis: ControllerAxis,
        value: i16,
    },

    InjectControllerButton {
        controller: ControllerId,
        button: ControllerButton,
        state: ButtonState,
    },

    InjectControllerDevice {
        controller: ControllerId,
        change: ControllerDeviceChange,
    },
}

impl ControlMessage {
    /// Key press on the device without repeat or meta state.
    #[must_use]
    pub fn keycode(keycode: DeviceKey, action: ButtonState) -> Self {
        Self::InjectKeycode {
            action,
            keycode,
            repeat: 0,
            metastate: 0,
        }
    }

    /// Human-readable command name for log lines.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InjectKeycode { .. } => "inject keycode",
            Self::InjectText { .. } => "inject text",
            Self::InjectTouchEvent { .. } => "inject touch event",
            Self::BackOrScreenOn { .. } => "press back or turn screen on",
            Self::ExpandNotificationPanel => "expand notification panel",
            Self::ExpandSettingsPanel => "expand settings panel",
            Self::CollapsePanels => "collapse panels",
            Self::GetClipboard { .. } => "get device clipboard",
            Self::SetClipboard { .. } => "set device clipboard",
            Self::SetScreenPowerMode { .. } => "set screen power mode",
            Self::RotateDevice => "rotate device",
            Self::OpenHardKeyboardSettings => "open hard keyboard settings",
            Self::InjectControllerAxis { .. } => "inject controller axis",
            Self::InjectControllerButton { .. } => "inject controller button",
            Self::InjectControllerDevice { .. } => "inject controller device",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};

    #[test]
    fn reserved_pointer_ids_are_distinct() {
        let ids = [
            PointerId::MOUSE,
            PointerId::GENERIC_FINGER,
            PointerId::VIRTUAL_MOUSE,
            PointerId::VIRTUAL_FINGER,
        ];
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
            assert!(*a > PointerId::TOUCHMAP_BASE);
        }
    }

    #[test]
    fn android_keycodes() {
        assert_eq!(DeviceKey::Home.keycode(), 3);
        assert_eq!(DeviceKey::Back.keycode(), 4);
        assert_eq!(DeviceKey::AppSwitch.keycode(), 187);
    }

    #[test]
    fn keycode_helper_zeroes_extras() {
        let msg = ControlMessage::keycode(DeviceKey::Menu, ButtonState::Released);
        assert_eq!(
            msg,
            ControlMessage::InjectKeycode {
                action: ButtonState::Released,
                keycode: DeviceKey::Menu,
                repeat: 0,
                metastate: 0,
            }
        );
        assert_eq!(msg.name(), "inject keycode");
    }

    #[test]
    fn touch_event_serializes() {
        let msg = ControlMessage::InjectTouchEvent {
            action: MotionAction::Down,
            pointer_id: PointerId(101),
            position: Position::new(Size::new(1080, 1920), Point::new(10, 10)),
            pressure: 1.0,
            action_button: MouseButtons::empty(),
            buttons: MouseButtons::empty(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        let decoded: ControlMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(msg, decoded);
    }

    #[test]
    fn ack_sequence_sentinel() {
        assert!(AckSequence::NONE.is_none());
        assert!(!AckSequence(1).is_none());
    }
}
