//! Keyboard shortcut classification and the shortcut table.
//!
//! A key event is a shortcut when one of the configured shortcut modifiers is
//! held, or when the key itself is one of them (its release reports no
//! modifiers). Each shortcut key maps, depending on Shift, to a
//! [`ShortcutAction`] and the [`Guard`] conditions under which it runs.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use touchdeck_types::{CopyKey, DeviceKey, KeyCode, Modifiers, Orientation, ScreenPowerMode};

/// A modifier key usable as shortcut trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShortcutMod {
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,
}

impl ShortcutMod {
    pub fn flag(self) -> Modifiers {
        match self {
            Self::LeftCtrl => Modifiers::LCTRL,
            Self::RightCtrl => Modifiers::RCTRL,
            Self::LeftAlt => Modifiers::LALT,
            Self::RightAlt => Modifiers::RALT,
            Self::LeftSuper => Modifiers::LSUPER,
            Self::RightSuper => Modifiers::RSUPER,
        }
    }
}

/// Set of modifiers that trigger shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutMods(Modifiers);

impl ShortcutMods {
    /// Modifiers that can ever trigger shortcuts.
    const ELIGIBLE: Modifiers = Modifiers::CTRL.union(Modifiers::ALT).union(Modifiers::SUPER);

    pub fn new(mods: &[ShortcutMod]) -> Self {
        Self(
            mods.iter()
                .fold(Modifiers::empty(), |acc, m| acc | m.flag()),
        )
    }

    /// Whether `mods` holds at least one shortcut modifier.
    pub fn is_held(self, mods: Modifiers) -> bool {
        mods.intersects(Self::ELIGIBLE & self.0)
    }

    /// Whether `keycode` is itself one of the shortcut modifiers.
    pub fn is_shortcut_key(self, keycode: KeyCode) -> bool {
        keycode
            .modifier_flag()
            .is_some_and(|flag| Self::ELIGIBLE.contains(flag) && self.0.contains(flag))
    }

    pub fn is_shortcut(self, keycode: KeyCode, mods: Modifiers) -> bool {
        self.is_held(mods) || self.is_shortcut_key(keycode)
    }
}

/// Counts presses of the same key with the same modifiers in a row.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyRepeat {
    last: Option<(KeyCode, Modifiers)>,
    count: u32,
}

impl KeyRepeat {
    /// Record a (non-autorepeat) key press, returning the repeat count.
    pub fn record(&mut self, keycode: KeyCode, mods: Modifiers) -> u32 {
        if self.last == Some((keycode, mods)) {
            self.count = self.count.saturating_add(1);
        } else {
            self.last = Some((keycode, mods));
            self.count = 0;
        }
        self.count
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Press or release a device key along with the shortcut key.
    Key(DeviceKey),
    ScreenPower(ScreenPowerMode),
    /// `true` pauses the video, `false` resumes.
    Pause(bool),
    /// Compose a transform onto the display orientation.
    Orient(Orientation),
    CopyFromDevice(CopyKey),
    /// Paste the host clipboard. `as_text` injects it as typed text.
    Paste { as_text: bool },
    ToggleFullscreen,
    ResizeToFit,
    ResizeToPixelPerfect,
    ToggleFpsCounter,
    /// Notification panel on a first press, settings panel when pressed again.
    ExpandPanels,
    CollapsePanels,
    RotateDevice,
    OpenHardKeyboardSettings,
    LoadTouchmap,
    UnloadTouchmap,
}

impl std::fmt::Display for ShortcutAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(key) => write!(f, "press {key:?}"),
            Self::ScreenPower(ScreenPowerMode::Off) => write!(f, "turn device screen off"),
            Self::ScreenPower(ScreenPowerMode::Normal) => write!(f, "turn device screen on"),
            Self::Pause(true) => write!(f, "pause video"),
            Self::Pause(false) => write!(f, "resume video"),
            Self::Orient(o) => write!(f, "apply display orientation {o}"),
            Self::CopyFromDevice(CopyKey::Cut) => write!(f, "cut to host clipboard"),
            Self::CopyFromDevice(_) => write!(f, "copy to host clipboard"),
            Self::Paste { as_text: true } => write!(f, "type host clipboard as text"),
            Self::Paste { as_text: false } => write!(f, "paste host clipboard"),
            Self::ToggleFullscreen => write!(f, "toggle fullscreen"),
            Self::ResizeToFit => write!(f, "resize window to fit"),
            Self::ResizeToPixelPerfect => write!(f, "resize window to 1:1"),
            Self::ToggleFpsCounter => write!(f, "toggle FPS counter"),
            Self::ExpandPanels => write!(f, "expand notification panel (twice: settings)"),
            Self::CollapsePanels => write!(f, "collapse panels"),
            Self::RotateDevice => write!(f, "rotate device"),
            Self::OpenHardKeyboardSettings => write!(f, "open keyboard settings"),
            Self::LoadTouchmap => write!(f, "load touchmap"),
            Self::UnloadTouchmap => write!(f, "unload touchmap"),
        }
    }
}

bitflags! {
    /// Conditions a shortcut needs to run. The same flags describe the
    /// conditions a session currently meets.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Guard: u8 {
        /// Device control is enabled.
        const CONTROL = 1 << 0;
        const KEY_PROCESSOR = 1 << 1;
        /// The key processor is a HID keyboard.
        const HID = 1 << 2;
        /// Ignore OS auto-repeat.
        const NO_REPEAT = 1 << 3;
        /// Only fire on key press.
        const DOWN_ONLY = 1 << 4;
        const NOT_PAUSED = 1 << 5;
        /// A video stream is displayed.
        const VIDEO = 1 << 6;
    }
}

impl Guard {
    /// Whether every condition of this guard is among those that `met`.
    pub fn permits(self, met: Guard) -> bool {
        met.contains(self)
    }
}

/// A shortcut action with its guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub action: ShortcutAction,
    pub guard: Guard,
}

/// Keys that have a shortcut, in display order.
pub const SHORTCUT_KEYS: [KeyCode; 23] = [
    KeyCode::KeyH,
    KeyCode::KeyB,
    KeyCode::Backspace,
    KeyCode::KeyS,
    KeyCode::KeyM,
    KeyCode::KeyP,
    KeyCode::KeyO,
    KeyCode::KeyZ,
    KeyCode::ArrowDown,
    KeyCode::ArrowUp,
    KeyCode::ArrowLeft,
    KeyCode::ArrowRight,
    KeyCode::KeyC,
    KeyCode::KeyX,
    KeyCode::KeyV,
    KeyCode::KeyF,
    KeyCode::KeyW,
    KeyCode::KeyG,
    KeyCode::KeyI,
    KeyCode::KeyN,
    KeyCode::KeyR,
    KeyCode::KeyK,
    KeyCode::KeyT,
];

impl Shortcut {
    fn new(action: ShortcutAction, guard: Guard) -> Self {
        Self { action, guard }
    }

    /// The shortcut bound to `keycode`, with or without Shift.
    pub fn lookup(keycode: KeyCode, shift: bool) -> Option<Self> {
        use ShortcutAction as A;

        let device_key = Guard::KEY_PROCESSOR | Guard::NO_REPEAT | Guard::NOT_PAUSED;
        let device_cmd = Guard::CONTROL | Guard::NO_REPEAT | Guard::DOWN_ONLY | Guard::NOT_PAUSED;
        let window = Guard::VIDEO | Guard::NO_REPEAT | Guard::DOWN_ONLY;
        let clipboard =
            Guard::KEY_PROCESSOR | Guard::NO_REPEAT | Guard::DOWN_ONLY | Guard::NOT_PAUSED;

        let shortcut = match (keycode, shift) {
            (KeyCode::KeyH, false) => Self::new(A::Key(DeviceKey::Home), device_key),
            (KeyCode::KeyB | KeyCode::Backspace, false) => {
                Self::new(A::Key(DeviceKey::Back), device_key)
            }
            (KeyCode::KeyS, false) => Self::new(A::Key(DeviceKey::AppSwitch), device_key),
            (KeyCode::KeyM, false) => Self::new(A::Key(DeviceKey::Menu), device_key),
            (KeyCode::KeyP, false) => Self::new(A::Key(DeviceKey::Power), device_key),
            (KeyCode::KeyO, false) => Self::new(A::ScreenPower(ScreenPowerMode::Off), device_cmd),
            (KeyCode::KeyO, true) => {
                Self::new(A::ScreenPower(ScreenPowerMode::Normal), device_cmd)
            }
            (KeyCode::KeyZ, shift) => Self::new(A::Pause(!shift), window),
            // volume keys forward auto-repeat
            (KeyCode::ArrowDown, false) => Self::new(
                A::Key(DeviceKey::VolumeDown),
                Guard::KEY_PROCESSOR | Guard::NOT_PAUSED,
            ),
            (KeyCode::ArrowUp, false) => Self::new(
                A::Key(DeviceKey::VolumeUp),
                Guard::KEY_PROCESSOR | Guard::NOT_PAUSED,
            ),
            (KeyCode::ArrowDown | KeyCode::ArrowUp, true) => {
                Self::new(A::Orient(Orientation::Flip180), window)
            }
            (KeyCode::ArrowLeft, false) => Self::new(A::Orient(Orientation::Rotate270), window),
            (KeyCode::ArrowRight, false) => Self::new(A::Orient(Orientation::Rotate90), window),
            (KeyCode::ArrowLeft | KeyCode::ArrowRight, true) => {
                Self::new(A::Orient(Orientation::Flip0), window)
            }
            (KeyCode::KeyC, false) => Self::new(A::CopyFromDevice(CopyKey::Copy), clipboard),
            (KeyCode::KeyX, false) => Self::new(A::CopyFromDevice(CopyKey::Cut), clipboard),
            (KeyCode::KeyV, shift) => Self::new(A::Paste { as_text: shift }, clipboard),
            (KeyCode::KeyF, false) => Self::new(A::ToggleFullscreen, window),
            (KeyCode::KeyW, false) => Self::new(A::ResizeToFit, window),
            (KeyCode::KeyG, false) => Self::new(A::ResizeToPixelPerfect, window),
            (KeyCode::KeyI, false) => Self::new(A::ToggleFpsCounter, window),
            (KeyCode::KeyN, false) => Self::new(A::ExpandPanels, device_cmd),
            (KeyCode::KeyN, true) => Self::new(A::CollapsePanels, device_cmd),
            (KeyCode::KeyR, false) => Self::new(A::RotateDevice, device_cmd),
            (KeyCode::KeyK, false) => Self::new(
                A::OpenHardKeyboardSettings,
                device_cmd | Guard::KEY_PROCESSOR | Guard::HID,
            ),
            (KeyCode::KeyT, false) => {
                Self::new(A::LoadTouchmap, device_cmd | Guard::KEY_PROCESSOR)
            }
            (KeyCode::KeyT, true) => {
                Self::new(A::UnloadTouchmap, device_cmd | Guard::KEY_PROCESSOR)
            }
            _ => return None,
        };
        Some(shortcut)
    }

    /// Every bound `(key, shift, shortcut)` combination, in display order.
    pub fn table() -> Vec<(KeyCode, bool, Shortcut)> {
        SHORTCUT_KEYS
            .iter()
            .flat_map(|&key| {
                [false, true]
                    .into_iter()
                    .filter_map(move |shift| Self::lookup(key, shift).map(|s| (key, shift, s)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_keys() -> Vec<KeyCode> {
        use KeyCode::*;
        vec![
            KeyA, KeyB, KeyC, KeyH, KeyN, KeyT, KeyV, KeyZ, Digit1, F5, Enter, Escape, Backspace,
            ArrowUp, LeftShift, RightShift, LeftCtrl, RightCtrl, LeftAlt, RightAlt, LeftSuper,
            RightSuper, Unknown(0x1234),
        ]
    }

    fn all_mods() -> Vec<Modifiers> {
        let singles = [
            Modifiers::empty(),
            Modifiers::LSHIFT,
            Modifiers::RSHIFT,
            Modifiers::LCTRL,
            Modifiers::RCTRL,
            Modifiers::LALT,
            Modifiers::RALT,
            Modifiers::LSUPER,
            Modifiers::RSUPER,
            Modifiers::CAPS,
            Modifiers::NUM,
        ];
        let mut out = Vec::new();
        for a in singles {
            for b in singles {
                out.push(a | b);
            }
        }
        out
    }

    #[test]
    fn classification_exhaustive() {
        let configs = [
            vec![ShortcutMod::LeftAlt, ShortcutMod::LeftSuper],
            vec![ShortcutMod::RightCtrl],
            vec![],
        ];
        for config in configs {
            let set = ShortcutMods::new(&config);
            let mask = config.iter().fold(Modifiers::empty(), |acc, m| acc | m.flag());
            for key in all_keys() {
                for mods in all_mods() {
                    let by_mods = !(mods & mask).is_empty();
                    let by_key = key.modifier_flag().is_some_and(|f| mask.contains(f));
                    assert_eq!(
                        set.is_shortcut(key, mods),
                        by_mods || by_key,
                        "{key:?} {mods:?} {config:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn modifier_release_is_a_shortcut() {
        let set = ShortcutMods::new(&[ShortcutMod::LeftAlt]);
        assert!(set.is_shortcut(KeyCode::LeftAlt, Modifiers::empty()));
        assert!(!set.is_shortcut(KeyCode::RightAlt, Modifiers::empty()));
    }

    #[test]
    fn shift_caps_num_never_trigger() {
        let set = ShortcutMods::new(&[ShortcutMod::LeftCtrl]);
        assert!(!set.is_held(Modifiers::SHIFT | Modifiers::CAPS | Modifiers::NUM));
        assert!(set.is_held(Modifiers::LCTRL | Modifiers::SHIFT));
        assert!(!set.is_held(Modifiers::RCTRL));
    }

    #[test]
    fn key_repeat_counts_identical_presses() {
        let mut r = KeyRepeat::default();
        assert_eq!(r.record(KeyCode::KeyN, Modifiers::LALT), 0);
        assert_eq!(r.record(KeyCode::KeyN, Modifiers::LALT), 1);
        assert_eq!(r.record(KeyCode::KeyN, Modifiers::LALT), 2);
        assert_eq!(r.record(KeyCode::KeyN, Modifiers::LALT | Modifiers::LSHIFT), 0);
        assert_eq!(r.record(KeyCode::KeyN, Modifiers::LALT | Modifiers::LSHIFT), 1);
        assert_eq!(r.record(KeyCode::KeyM, Modifiers::LALT | Modifiers::LSHIFT), 0);
        assert_eq!(r.count(), 0);
    }

    #[test]
    fn shift_selects_variant() {
        assert_eq!(
            Shortcut::lookup(KeyCode::KeyO, true).unwrap().action,
            ShortcutAction::ScreenPower(ScreenPowerMode::Normal)
        );
        assert_eq!(
            Shortcut::lookup(KeyCode::KeyZ, false).unwrap().action,
            ShortcutAction::Pause(true)
        );
        assert_eq!(
            Shortcut::lookup(KeyCode::KeyT, true).unwrap().action,
            ShortcutAction::UnloadTouchmap
        );
        assert!(Shortcut::lookup(KeyCode::KeyH, true).is_none());
        assert!(Shortcut::lookup(KeyCode::KeyA, false).is_none());
    }

    #[test]
    fn volume_forwards_repeats_and_releases() {
        let s = Shortcut::lookup(KeyCode::ArrowUp, false).unwrap();
        // a repeated release of a key while unpaused
        let met = Guard::KEY_PROCESSOR | Guard::NOT_PAUSED;
        assert!(s.guard.permits(met));
    }

    #[test]
    fn guards() {
        let k = Shortcut::lookup(KeyCode::KeyK, false).unwrap();
        let mut met = Guard::CONTROL
            | Guard::KEY_PROCESSOR
            | Guard::DOWN_ONLY
            | Guard::NO_REPEAT
            | Guard::NOT_PAUSED;
        assert!(!k.guard.permits(met));
        met.insert(Guard::HID);
        assert!(k.guard.permits(met));
        met.remove(Guard::NOT_PAUSED);
        assert!(!k.guard.permits(met));

        let f = Shortcut::lookup(KeyCode::KeyF, false).unwrap();
        let met = Guard::VIDEO | Guard::DOWN_ONLY | Guard::NO_REPEAT | Guard::NOT_PAUSED;
        assert!(f.guard.permits(met));
        assert!(!f.guard.permits(met - Guard::NO_REPEAT));
    }

    #[test]
    fn table_lists_both_variants() {
        let table = Shortcut::table();
        assert!(table
            .iter()
            .any(|(k, shift, _)| *k == KeyCode::KeyN && *shift));
        assert!(table
            .iter()
            .any(|(k, shift, _)| *k == KeyCode::KeyN && !*shift));
        assert!(table.iter().all(|(k, _, _)| *k != KeyCode::KeyA));
    }
}
