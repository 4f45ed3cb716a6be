//! Pinch, rotate and tilt simulation from a single pointer.
//!
//! Holding Ctrl (pinch/rotate) or Shift (tilt), but not both, while pressing
//! the left button adds a second finger mirrored through the frame center.
//! Ctrl mirrors both axes; Shift mirrors the horizontal axis only. The mirror
//! axes are fixed at press time and kept until release.

use touchdeck_types::{inverse_point, Modifiers, MotionAction, Point, PointerId, Size};

/// Axes the virtual finger is mirrored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inversion {
    pub x: bool,
    pub y: bool,
}

impl Inversion {
    /// Derive the mirror axes from held modifiers. `None` unless exactly one
    /// of Ctrl and Shift is held.
    pub fn from_mods(mods: Modifiers) -> Option<Self> {
        let ctrl = mods.ctrl();
        let shift = mods.shift();
        (ctrl != shift).then_some(Self {
            x: ctrl || shift,
            y: ctrl,
        })
    }

    /// Mirror `point` within a frame of `size`.
    pub fn apply(self, point: Point, size: Size) -> Point {
        inverse_point(point, size, self.x, self.y)
    }
}

/// A pending change of the virtual finger, committed once its touch was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub action: MotionAction,
    pub inversion: Inversion,
}

/// The virtual finger. Idle or active; at most one exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct VirtualFinger {
    active: Option<Inversion>,
}

impl VirtualFinger {
    /// Mirror axes while active.
    pub fn active(&self) -> Option<Inversion> {
        self.active
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// What a left-button press or release would do.
    pub fn on_left_button(&self, pressed: bool, mods: Modifiers) -> Option<Transition> {
        match (pressed, self.active) {
            (true, None) => Inversion::from_mods(mods).map(|inversion| Transition {
                action: MotionAction::Down,
                inversion,
            }),
            (false, Some(inversion)) => Some(Transition {
                action: MotionAction::Up,
                inversion,
            }),
            _ => None,
        }
    }

    pub fn commit(&mut self, transition: Transition) {
        self.active = match transition.action {
            MotionAction::Down => Some(transition.inversion),
            MotionAction::Up | MotionAction::Move => None,
        };
    }
}

/// Finger id of the virtual finger, paired with the mouse pointer id in use.
pub fn finger_id(has_secondary_click: bool) -> PointerId {
    if has_secondary_click {
        PointerId::VIRTUAL_MOUSE
    } else {
        PointerId::VIRTUAL_FINGER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_modifier_activates() {
        assert_eq!(
            Inversion::from_mods(Modifiers::LCTRL),
            Some(Inversion { x: true, y: true })
        );
        assert_eq!(
            Inversion::from_mods(Modifiers::RSHIFT),
            Some(Inversion { x: true, y: false })
        );
        assert_eq!(Inversion::from_mods(Modifiers::LCTRL | Modifiers::LSHIFT), None);
        assert_eq!(Inversion::from_mods(Modifiers::empty()), None);
        assert_eq!(Inversion::from_mods(Modifiers::LALT), None);
    }

    #[test]
    fn press_then_release() {
        let mut vf = VirtualFinger::default();
        let down = vf.on_left_button(true, Modifiers::LCTRL).unwrap();
        assert_eq!(down.action, MotionAction::Down);
        assert!(!vf.is_active());
        vf.commit(down);
        assert!(vf.is_active());

        // a second press while active does nothing
        assert!(vf.on_left_button(true, Modifiers::LSHIFT).is_none());

        // release keeps the press-time axes even with modifiers gone
        let up = vf.on_left_button(false, Modifiers::empty()).unwrap();
        assert_eq!(up.action, MotionAction::Up);
        assert_eq!(up.inversion, Inversion { x: true, y: true });
        vf.commit(up);
        assert!(!vf.is_active());
    }

    #[test]
    fn release_while_idle_is_ignored() {
        let vf = VirtualFinger::default();
        assert!(vf.on_left_button(false, Modifiers::LCTRL).is_none());
    }

    #[test]
    fn uncommitted_press_stays_idle() {
        let vf = VirtualFinger::default();
        let _ = vf.on_left_button(true, Modifiers::LCTRL);
        assert!(!vf.is_active());
        assert!(vf.on_left_button(true, Modifiers::LCTRL).is_some());
    }

    #[test]
    fn mirror_through_center() {
        let size = Size::new(1080, 1920);
        let pinch = Inversion { x: true, y: true };
        assert_eq!(pinch.apply(Point::new(100, 200), size), Point::new(980, 1720));
        let tilt = Inversion { x: true, y: false };
        assert_eq!(tilt.apply(Point::new(100, 200), size), Point::new(980, 200));
    }

    #[test]
    fn finger_ids() {
        assert_eq!(finger_id(true), PointerId::VIRTUAL_MOUSE);
        assert_eq!(finger_id(false), PointerId::VIRTUAL_FINGER);
    }
}
