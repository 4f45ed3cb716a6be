//! What each mouse button does.

use serde::{Deserialize, Serialize};
use touchdeck_types::{MouseButton, MouseButtons};

/// Action bound to a mouse button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseBinding {
    /// Resolved per button when the session starts.
    #[default]
    Auto,
    /// Forward the click to the device as a touch or mouse click.
    Click,
    Back,
    Home,
    AppSwitch,
    ExpandNotificationPanel,
    Disabled,
}

/// Resolved bindings for the four secondary buttons. The left button always clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseBindings {
    pub right: MouseBinding,
    pub middle: MouseBinding,
    pub click4: MouseBinding,
    pub click5: MouseBinding,
}

impl Default for MouseBindings {
    fn default() -> Self {
        Self {
            right: MouseBinding::Back,
            middle: MouseBinding::Home,
            click4: MouseBinding::AppSwitch,
            click5: MouseBinding::ExpandNotificationPanel,
        }
    }
}

impl MouseBindings {
    /// Resolve configured bindings. `Auto` takes the per-button default, or
    /// `Click` for every button when all clicks are forwarded.
    pub fn resolve(
        right: MouseBinding,
        middle: MouseBinding,
        click4: MouseBinding,
        click5: MouseBinding,
        forward_all_clicks: bool,
    ) -> Self {
        if forward_all_clicks {
            return Self {
                right: MouseBinding::Click,
                middle: MouseBinding::Click,
                click4: MouseBinding::Click,
                click5: MouseBinding::Click,
            };
        }
        let defaults = Self::default();
        let pick = |configured, default| match configured {
            MouseBinding::Auto => default,
            other => other,
        };
        Self {
            right: pick(right, defaults.right),
            middle: pick(middle, defaults.middle),
            click4: pick(click4, defaults.click4),
            click5: pick(click5, defaults.click5),
        }
    }

    pub fn binding_for(&self, button: MouseButton) -> MouseBinding {
        match button {
            MouseButton::Left => MouseBinding::Click,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
            MouseButton::X1 => self.click4,
            MouseButton::X2 => self.click5,
            MouseButton::Other(_) => MouseBinding::Disabled,
        }
    }

    /// Whether any secondary button is forwarded as a click.
    pub fn has_secondary_click(&self) -> bool {
        [self.right, self.middle, self.click4, self.click5].contains(&MouseBinding::Click)
    }

    /// Keep only the held buttons whose clicks reach the device.
    pub fn forwarded(&self, held: MouseButtons) -> MouseButtons {
        let mut out = held & MouseButtons::LEFT;
        for (flag, binding) in [
            (MouseButtons::RIGHT, self.right),
            (MouseButtons::MIDDLE, self.middle),
            (MouseButtons::X1, self.click4),
            (MouseButtons::X2, self.click5),
        ] {
            if binding == MouseBinding::Click && held.contains(flag) {
                out |= flag;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_resolves_to_defaults() {
        let b = MouseBindings::resolve(
            MouseBinding::Auto,
            MouseBinding::Disabled,
            MouseBinding::Auto,
            MouseBinding::Click,
            false,
        );
        assert_eq!(b.right, MouseBinding::Back);
        assert_eq!(b.middle, MouseBinding::Disabled);
        assert_eq!(b.click4, MouseBinding::AppSwitch);
        assert_eq!(b.click5, MouseBinding::Click);
        assert!(b.has_secondary_click());
    }

    #[test]
    fn defaults_have_no_secondary_click() {
        assert!(!MouseBindings::default().has_secondary_click());
    }

    #[test]
    fn forward_all_clicks_overrides() {
        let b = MouseBindings::resolve(
            MouseBinding::Home,
            MouseBinding::Auto,
            MouseBinding::Auto,
            MouseBinding::Auto,
            true,
        );
        assert_eq!(b.binding_for(MouseButton::Right), MouseBinding::Click);
        assert_eq!(b.binding_for(MouseButton::X2), MouseBinding::Click);
    }

    #[test]
    fn extra_buttons_are_disabled() {
        let b = MouseBindings::default();
        assert_eq!(b.binding_for(MouseButton::Left), MouseBinding::Click);
        assert_eq!(b.binding_for(MouseButton::Other(8)), MouseBinding::Disabled);
    }

    #[test]
    fn forwarded_buttons_filter_bound_ones() {
        let mut b = MouseBindings::default();
        let held = MouseButtons::LEFT | MouseButtons::RIGHT | MouseButtons::MIDDLE;
        assert_eq!(b.forwarded(held), MouseButtons::LEFT);
        b.middle = MouseBinding::Click;
        assert_eq!(b.forwarded(held), MouseButtons::LEFT | MouseButtons::MIDDLE);
        assert!(b.forwarded(MouseButtons::RIGHT).is_empty());
    }
}
