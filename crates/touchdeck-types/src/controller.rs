//! Game-controller identifiers and codes.

use serde::{Deserialize, Serialize};

/// Platform instance id of an opened game controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControllerId(pub u32);

impl std::fmt::Display for ControllerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Digital controller buttons, numbered like the usual game-controller layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerButton {
    A,
    B,
    X,
    Y,
    Back,
    Guide,
    Start,
    LeftStick,
    RightStick,
    LeftShoulder,
    RightShoulder,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    Misc1,
    Paddle1,
    Paddle2,
    Paddle3,
    Paddle4,
    Touchpad,
}

impl ControllerButton {
    /// Number of digital buttons; analog trigger codes start here.
    pub const COUNT: u8 = 21;

    /// Wire and touchmap code of this button.
    #[must_use]
    pub fn code(self) -> ButtonCode {
        ButtonCode(self as u8)
    }
}

/// Analog controller axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    TriggerLeft,
    TriggerRight,
}

impl ControllerAxis {
    /// Largest magnitude reported on any axis.
    pub const MAX_VALUE: i16 = i16::MAX;

    /// Wire code of this axis.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Touchmap code for an analog trigger treated as a digital button.
    ///
    /// Only the two trigger axes have one.
    #[must_use]
    pub fn trigger_code(self) -> Option<ButtonCode> {
        match self {
            Self::TriggerLeft | Self::TriggerRight => {
                Some(ButtonCode(ControllerButton::COUNT + self.code()))
            }
            _ => None,
        }
    }
}

/// Code identifying a touchmap control source: a digital button, or an analog
/// trigger mapped past the digital button range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ButtonCode(pub u8);

impl ButtonCode {
    /// Never produced by a controller; used for unrecognised mapping names.
    pub const INVALID: ButtonCode = ButtonCode(u8::MAX);

    #[must_use]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl std::fmt::Display for ButtonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "invalid")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_codes_follow_layout() {
        assert_eq!(ControllerButton::A.code(), ButtonCode(0));
        assert_eq!(ControllerButton::DpadRight.code(), ButtonCode(14));
        assert_eq!(ControllerButton::Touchpad.code(), ButtonCode(20));
    }

    #[test]
    fn triggers_map_past_buttons() {
        assert_eq!(ControllerAxis::TriggerLeft.trigger_code(), Some(ButtonCode(25)));
        assert_eq!(ControllerAxis::TriggerRight.trigger_code(), Some(ButtonCode(26)));
        assert_eq!(ControllerAxis::LeftX.trigger_code(), None);
    }

    #[test]
    fn invalid_code_display() {
        assert_eq!(ButtonCode::INVALID.to_string(), "invalid");
        assert_eq!(ButtonCode(9).to_string(), "9");
    }
}
