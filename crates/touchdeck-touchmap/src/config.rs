//! Touchmap documents and the sorted control table built from them.
//!
//! ```json
//! {
//!   "mappings": {
//!     "walk_control": { "center": { "x": 300, "y": 800 }, "radius": 150 },
//!     "button_mappings": [ { "touch": { "x": 1800, "y": 900 }, "button": "A" } ],
//!     "skill_casting": [ { "center": { "x": 1600, "y": 700 }, "radius": 120, "button": "RB" } ]
//!   }
//! }
//! ```
//!
//! Entries missing one of their fields are skipped. Button names that are not
//! recognised still produce a control, bound to [`ButtonCode::INVALID`], which
//! never matches a controller event.

use std::path::Path;

use serde::Deserialize;
use touchdeck_types::{ButtonCode, ControllerAxis, ControllerButton, Point, PointerId};
use tracing::{debug, info, warn};

use crate::error::TouchmapError;

/// Map a touchmap button name to its control code. Names are case-sensitive.
pub fn code_for_name(name: &str) -> ButtonCode {
    let button = match name {
        "A" => ControllerButton::A,
        "B" => ControllerButton::B,
        "X" => ControllerButton::X,
        "Y" => ControllerButton::Y,
        "BACK" | "SELECT" => ControllerButton::Back,
        "GUIDE" | "HOME" => ControllerButton::Guide,
        "START" => ControllerButton::Start,
        "LTHUMB" | "L3" => ControllerButton::LeftStick,
        "RTHUMB" | "R3" => ControllerButton::RightStick,
        "LB" | "L1" => ControllerButton::LeftShoulder,
        "RB" | "R1" => ControllerButton::RightShoulder,
        "UP" => ControllerButton::DpadUp,
        "DOWN" => ControllerButton::DpadDown,
        "LEFT" => ControllerButton::DpadLeft,
        "RIGHT" => ControllerButton::DpadRight,
        "MISC" => ControllerButton::Misc1,
        "PADDLE1" => ControllerButton::Paddle1,
        "PADDLE2" => ControllerButton::Paddle2,
        "PADDLE3" => ControllerButton::Paddle3,
        "PADDLE4" => ControllerButton::Paddle4,
        "TOUCHPAD" => ControllerButton::Touchpad,
        "LT" | "L2" => return trigger(ControllerAxis::TriggerLeft),
        "RT" | "R2" => return trigger(ControllerAxis::TriggerRight),
        _ => return ButtonCode::INVALID,
    };
    button.code()
}

fn trigger(axis: ControllerAxis) -> ButtonCode {
    axis.trigger_code().unwrap_or(ButtonCode::INVALID)
}

/// The virtual joystick driven by the left stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkControl {
    pub center: Point,
    pub radius: i32,
    pub finger: PointerId,
}

/// How a mapped control reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Tap at a fixed point while held.
    Button,
    /// Held like a button and aimed with the right stick within `radius`.
    Skill { radius: i32 },
}

/// A controller input bound to a touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlMapping {
    pub code: ButtonCode,
    pub center: Point,
    pub kind: ControlKind,
    pub finger: PointerId,
}

impl ControlMapping {
    pub fn is_skill(&self) -> bool {
        matches!(self.kind, ControlKind::Skill { .. })
    }

    pub fn radius(&self) -> i32 {
        match self.kind {
            ControlKind::Button => 0,
            ControlKind::Skill { radius } => radius,
        }
    }
}

/// A loaded touchmap. Controls are sorted by code and never reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Touchmap {
    walk: Option<WalkControl>,
    controls: Box<[ControlMapping]>,
}

impl Touchmap {
    /// Read and parse a touchmap document from disk.
    pub fn from_path(path: &Path) -> Result<Self, TouchmapError> {
        let json = std::fs::read_to_string(path).map_err(|source| TouchmapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let map = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            walk = map.walk.is_some(),
            controls = map.controls.len(),
            "loaded touchmap"
        );
        Ok(map)
    }

    /// Parse a touchmap document.
    pub fn from_json_str(json: &str) -> Result<Self, TouchmapError> {
        let doc: Document = serde_json::from_str(json)?;
        let mappings = doc.mappings.ok_or(TouchmapError::MissingMappings)?;
        debug!(
            buttons = mappings.button_mappings.len(),
            skills = mappings.skill_casting.len(),
            "parsing touchmap"
        );

        let mut builder = TouchmapBuilder::new();

        match mappings.walk_control {
            Some(WalkDoc {
                center: Some(center),
                radius: Some(radius),
            }) => {
                builder.walk_control(center.into(), radius);
            }
            Some(_) => warn!("walk control needs both center and radius, ignoring it"),
            None => {}
        }

        for (index, entry) in mappings.button_mappings.into_iter().enumerate() {
            if let (Some(touch), Some(name)) = (entry.touch, entry.button) {
                builder.button(lookup_name(&name), touch.into());
            } else {
                warn!(index, "button mapping needs touch and button, skipping it");
            }
        }

        for (index, entry) in mappings.skill_casting.into_iter().enumerate() {
            if let (Some(center), Some(radius), Some(name)) =
                (entry.center, entry.radius, entry.button)
            {
                builder.skill(lookup_name(&name), center.into(), radius);
            } else {
                warn!(
                    index,
                    "skill casting needs center, radius and button, skipping it"
                );
            }
        }

        Ok(builder.build())
    }

    pub fn walk(&self) -> Option<&WalkControl> {
        self.walk.as_ref()
    }

    /// All controls, in code order.
    pub fn controls(&self) -> &[ControlMapping] {
        &self.controls
    }

    /// Index and mapping of the first control bound to `code`.
    pub fn lookup(&self, code: ButtonCode) -> Option<(usize, &ControlMapping)> {
        if !code.is_valid() {
            return None;
        }
        let index = self.controls.partition_point(|c| c.code < code);
        self.controls
            .get(index)
            .filter(|c| c.code == code)
            .map(|c| (index, c))
    }
}

fn lookup_name(name: &str) -> ButtonCode {
    let code = code_for_name(name);
    if !code.is_valid() {
        warn!(button = name, "unknown touchmap button name, the control will never fire");
    }
    code
}

/// Assembles a [`Touchmap`], handing out finger ids in insertion order.
#[derive(Debug)]
pub struct TouchmapBuilder {
    walk: Option<WalkControl>,
    controls: Vec<ControlMapping>,
    next_finger: u64,
}

impl Default for TouchmapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchmapBuilder {
    pub fn new() -> Self {
        Self {
            walk: None,
            controls: Vec::new(),
            next_finger: PointerId::TOUCHMAP_BASE.0,
        }
    }

    fn take_finger(&mut self) -> PointerId {
        let finger = PointerId(self.next_finger);
        self.next_finger += 1;
        finger
    }

    /// Set the walk control. A second call replaces the first, with a new finger.
    pub fn walk_control(&mut self, center: Point, radius: i32) -> &mut Self {
        let finger = self.take_finger();
        self.walk = Some(WalkControl {
            center,
            radius,
            finger,
        });
        self
    }

    pub fn button(&mut self, code: ButtonCode, touch: Point) -> &mut Self {
        let finger = self.take_finger();
        self.controls.push(ControlMapping {
            code,
            center: touch,
            kind: ControlKind::Button,
            finger,
        });
        self
    }

    pub fn skill(&mut self, code: ButtonCode, center: Point, radius: i32) -> &mut Self {
        let finger = self.take_finger();
        self.controls.push(ControlMapping {
            code,
            center,
            kind: ControlKind::Skill { radius },
            finger,
        });
        self
    }

    /// Sort the controls by code and freeze the table.
    ///
    /// The sort is stable, so among controls sharing a code the one added
    /// first is the one [`Touchmap::lookup`] finds.
    pub fn build(&mut self) -> Touchmap {
        let mut controls = std::mem::take(&mut self.controls);
        controls.sort_by_key(|c| c.code);
        Touchmap {
            walk: self.walk.take(),
            controls: controls.into_boxed_slice(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Document {
    mappings: Option<MappingsDoc>,
}

#[derive(Debug, Deserialize)]
struct MappingsDoc {
    walk_control: Option<WalkDoc>,
    #[serde(default)]
    button_mappings: Vec<ButtonDoc>,
    #[serde(default)]
    skill_casting: Vec<SkillDoc>,
}

#[derive(Debug, Deserialize)]
struct PointDoc {
    x: i32,
    y: i32,
}

impl From<PointDoc> for Point {
    fn from(p: PointDoc) -> Self {
        Point::new(p.x, p.y)
    }
}

#[derive(Debug, Deserialize)]
struct WalkDoc {
    center: Option<PointDoc>,
    radius: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ButtonDoc {
    touch: Option<PointDoc>,
    button: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SkillDoc {
    center: Option<PointDoc>,
    radius: Option<i32>,
    button: Option<String>,
}
