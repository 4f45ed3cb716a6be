//! Runtime side of a touchmap: turns controller events into synthetic touches.
//!
//! The [`Touchmap`] table is immutable; which contacts are held and where they
//! currently are lives next to it, indexed in parallel with its controls.
//!
//! Down and up transitions are only proposed by the event handlers. A contact
//! counts as held once the caller reports its down touch through
//! [`TouchmapEngine::commit`], and stays held until its up touch is committed.

use touchdeck_types::{ButtonCode, ControllerAxis, MotionAction, Point, PointerId};
use tracing::{debug, warn};

use crate::config::Touchmap;

/// Squared stick deflection, in screen pixels, below which the walk control
/// is released.
pub const WALK_DEAD_ZONE: i64 = 25;

/// A touch to inject on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticTouch {
    pub finger: PointerId,
    pub action: MotionAction,
    pub point: Point,
}

impl SyntheticTouch {
    fn new(finger: PointerId, action: MotionAction, point: Point) -> Self {
        Self {
            finger,
            action,
            point,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Contact {
    current: Point,
    down: bool,
}

/// A loaded touchmap together with its contact state.
#[derive(Debug)]
pub struct TouchmapEngine {
    map: Touchmap,
    walk: Contact,
    controls: Vec<Contact>,
}

/// `center + value * radius / max`, truncated toward zero.
fn deflect(center: i32, value: i16, radius: i32) -> i32 {
    let offset = i64::from(value) * i64::from(radius) / i64::from(ControllerAxis::MAX_VALUE);
    let target = i64::from(center) + offset;
    i32::try_from(target).unwrap_or(if target < 0 { i32::MIN } else { i32::MAX })
}

fn set_axis(point: &mut Point, horizontal: bool, center: Point, value: i16, radius: i32) {
    if horizontal {
        point.x = deflect(center.x, value, radius);
    } else {
        point.y = deflect(center.y, value, radius);
    }
}

impl TouchmapEngine {
    pub fn new(map: Touchmap) -> Self {
        let walk = Contact {
            current: map.walk().map(|w| w.center).unwrap_or_default(),
            down: false,
        };
        let controls = map
            .controls()
            .iter()
            .map(|c| Contact {
                current: c.center,
                down: false,
            })
            .collect();
        Self {
            map,
            walk,
            controls,
        }
    }

    pub fn touchmap(&self) -> &Touchmap {
        &self.map
    }

    /// Whether any synthetic contact is currently held.
    pub fn has_contacts(&self) -> bool {
        self.walk.down || self.controls.iter().any(|c| c.down)
    }

    /// A digital button (or trigger past its threshold) changed state.
    pub fn handle_button(&mut self, code: ButtonCode, pressed: bool) -> Vec<SyntheticTouch> {
        let Some((index, mapping)) = self.map.lookup(code) else {
            warn!(%code, "button not found in touchmap");
            return Vec::new();
        };

        match (pressed, self.controls[index].down) {
            (true, false) => {
                debug!(%code, finger = %mapping.finger, "touchmap control down");
                vec![SyntheticTouch::new(
                    mapping.finger,
                    MotionAction::Down,
                    mapping.center,
                )]
            }
            (false, true) => {
                debug!(%code, finger = %mapping.finger, "touchmap control up");
                vec![SyntheticTouch::new(
                    mapping.finger,
                    MotionAction::Up,
                    mapping.center,
                )]
            }
            _ => Vec::new(),
        }
    }

    /// An analog axis moved.
    pub fn handle_axis(&mut self, axis: ControllerAxis, value: i16) -> Vec<SyntheticTouch> {
        match axis {
            ControllerAxis::LeftX | ControllerAxis::LeftY => {
                self.walk(axis == ControllerAxis::LeftX, value)
            }
            ControllerAxis::RightX | ControllerAxis::RightY => {
                self.aim(axis == ControllerAxis::RightX, value)
            }
            ControllerAxis::TriggerLeft | ControllerAxis::TriggerRight => {
                let Some(code) = axis.trigger_code() else {
                    return Vec::new();
                };
                let level = i32::from(value) * 5 / i32::from(ControllerAxis::MAX_VALUE);
                self.handle_button(code, level != 0)
            }
        }
    }

    fn walk(&mut self, horizontal: bool, value: i16) -> Vec<SyntheticTouch> {
        let Some(walk) = self.map.walk().copied() else {
            return Vec::new();
        };
        let contact = &mut self.walk;
        set_axis(&mut contact.current, horizontal, walk.center, value, walk.radius);

        let dx = i64::from(contact.current.x) - i64::from(walk.center.x);
        let dy = i64::from(contact.current.y) - i64::from(walk.center.y);
        let distance = dx * dx + dy * dy;

        let mut touches = Vec::with_capacity(2);
        if distance < WALK_DEAD_ZONE {
            if contact.down {
                touches.push(SyntheticTouch::new(walk.finger, MotionAction::Up, walk.center));
            }
        } else {
            if !contact.down {
                touches.push(SyntheticTouch::new(
                    walk.finger,
                    MotionAction::Down,
                    contact.current,
                ));
            }
            touches.push(SyntheticTouch::new(
                walk.finger,
                MotionAction::Move,
                contact.current,
            ));
        }
        touches
    }

    fn aim(&mut self, horizontal: bool, value: i16) -> Vec<SyntheticTouch> {
        let mut touches = Vec::new();
        for (mapping, contact) in self.map.controls().iter().zip(self.controls.iter_mut()) {
            if !mapping.is_skill() || !contact.down {
                continue;
            }
            set_axis(
                &mut contact.current,
                horizontal,
                mapping.center,
                value,
                mapping.radius(),
            );
            touches.push(SyntheticTouch::new(
                mapping.finger,
                MotionAction::Move,
                contact.current,
            ));
        }
        touches
    }

    /// Record that `touch` reached the device.
    ///
    /// A committed down marks its contact held, a committed up releases it.
    /// Moves carry no transition.
    pub fn commit(&mut self, touch: &SyntheticTouch) {
        let held = match touch.action {
            MotionAction::Down => true,
            MotionAction::Up => false,
            MotionAction::Move => return,
        };
        let contact = if self.map.walk().is_some_and(|w| w.finger == touch.finger) {
            &mut self.walk
        } else if let Some(index) = self
            .map
            .controls()
            .iter()
            .position(|c| c.finger == touch.finger)
        {
            &mut self.controls[index]
        } else {
            return;
        };
        contact.down = held;
        if held {
            contact.current = touch.point;
        }
    }

    /// Lift every held contact.
    pub fn release_all(&mut self) -> Vec<SyntheticTouch> {
        let mut touches = Vec::new();
        if self.walk.down {
            if let Some(walk) = self.map.walk() {
                touches.push(SyntheticTouch::new(walk.finger, MotionAction::Up, walk.center));
            }
            self.walk.down = false;
        }
        for (mapping, contact) in self.map.controls().iter().zip(self.controls.iter_mut()) {
            if contact.down {
                contact.down = false;
                touches.push(SyntheticTouch::new(
                    mapping.finger,
                    MotionAction::Up,
                    mapping.center,
                ));
            }
        }
        touches
    }
}
