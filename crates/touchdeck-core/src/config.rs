//! Session configuration loaded from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bindings::{MouseBinding, MouseBindings};
use crate::error::CoreError;
use crate::shortcut::ShortcutMod;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
    #[serde(default)]
    pub gamepad: GamepadConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Keyboard and mouse settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_shortcut_mods")]
    pub shortcut_mods: Vec<ShortcutMod>,
    /// Forward every mouse button as a click, overriding `mouse_bindings`.
    #[serde(default)]
    pub forward_all_clicks: bool,
    #[serde(default)]
    pub mouse_bindings: MouseBindingsConfig,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            shortcut_mods: default_shortcut_mods(),
            forward_all_clicks: false,
            mouse_bindings: MouseBindingsConfig::default(),
        }
    }
}

/// Bindings for the secondary mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseBindingsConfig {
    #[serde(default = "default_right")]
    pub right: MouseBinding,
    #[serde(default = "default_middle")]
    pub middle: MouseBinding,
    #[serde(default = "default_click4")]
    pub click4: MouseBinding,
    #[serde(default = "default_click5")]
    pub click5: MouseBinding,
}

impl Default for MouseBindingsConfig {
    fn default() -> Self {
        Self {
            right: default_right(),
            middle: default_middle(),
            click4: default_click4(),
            click5: default_click5(),
        }
    }
}

/// Clipboard settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardConfig {
    /// Push the host clipboard to the device before forwarding Ctrl+V.
    #[serde(default = "default_true")]
    pub autosync: bool,
    /// Paste by injecting the clipboard as typed text.
    #[serde(default)]
    pub legacy_paste: bool,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            autosync: true,
            legacy_paste: false,
        }
    }
}

/// Game controller settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamepadConfig {
    /// Forward raw controller events to the device.
    #[serde(default = "default_true")]
    pub forward: bool,
    /// Touchmap loaded at startup.
    #[serde(default)]
    pub touchmap: Option<PathBuf>,
}

impl Default for GamepadConfig {
    fn default() -> Self {
        Self {
            forward: true,
            touchmap: None,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Read configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("failed to read config: {e}")))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| CoreError::Config(format!("failed to parse config: {e}")))?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Read configuration from `path`, or the default location. A missing
    /// file gives the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, CoreError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path(),
        };
        if path.exists() {
            Self::load(&path)
        } else {
            info!("no config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// `<config dir>/touchdeck/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("touchdeck")
            .join("config.toml")
    }

    /// Mouse bindings with `Auto` and `forward_all_clicks` resolved.
    pub fn mouse_bindings(&self) -> MouseBindings {
        let b = &self.input.mouse_bindings;
        MouseBindings::resolve(
            b.right,
            b.middle,
            b.click4,
            b.click5,
            self.input.forward_all_clicks,
        )
    }

    pub fn to_toml(&self) -> Result<String, CoreError> {
        toml::to_string_pretty(self)
            .map_err(|e| CoreError::Config(format!("failed to serialize config: {e}")))
    }
}

fn default_shortcut_mods() -> Vec<ShortcutMod> {
    vec![ShortcutMod::LeftAlt, ShortcutMod::LeftSuper]
}

fn default_right() -> MouseBinding {
    MouseBinding::Back
}

fn default_middle() -> MouseBinding {
    MouseBinding::Home
}

fn default_click4() -> MouseBinding {
    MouseBinding::AppSwitch
}

fn default_click5() -> MouseBinding {
    MouseBinding::ExpandNotificationPanel
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_config_serializes() {
        let toml_str = Config::default().to_toml().unwrap();
        assert!(toml_str.contains("autosync = true"));
        assert!(toml_str.contains("right = \"Back\""));
        let back: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(back, Config::default());
    }

    #[test]
    fn parse_example_config() {
        let toml_str = r#"
[input]
shortcut_mods = ["RightCtrl"]
forward_all_clicks = false

[input.mouse_bindings]
right = "Click"
middle = "Disabled"

[clipboard]
autosync = false
legacy_paste = true

[gamepad]
forward = true
touchmap = "/tmp/map.json"

[log]
level = "debug"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.input.shortcut_mods, vec![ShortcutMod::RightCtrl]);
        assert_eq!(config.input.mouse_bindings.right, MouseBinding::Click);
        assert_eq!(config.input.mouse_bindings.click4, MouseBinding::AppSwitch);
        assert!(!config.clipboard.autosync);
        assert!(config.clipboard.legacy_paste);
        assert_eq!(config.gamepad.touchmap, Some(PathBuf::from("/tmp/map.json")));
        assert_eq!(config.log.level, "debug");
        assert!(config.mouse_bindings().has_secondary_click());
    }

    #[test]
    fn empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.mouse_bindings().has_secondary_click());
    }

    #[test]
    fn forward_all_clicks_resolves_bindings() {
        let config: Config = toml::from_str("[input]\nforward_all_clicks = true\n").unwrap();
        let b = config.mouse_bindings();
        assert_eq!(b.right, MouseBinding::Click);
        assert_eq!(b.click5, MouseBinding::Click);
    }

    #[test]
    fn load_from_disk_and_missing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[log]\nlevel = \"trace\"\n").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.log.level, "trace");

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.toml");
        assert!(Config::load(&missing).is_err());
        assert_eq!(
            Config::load_or_default(Some(&missing)).unwrap(),
            Config::default()
        );
    }

    #[test]
    fn malformed_config_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[input]\nshortcut_mods = [\"Hyper\"]\n").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(CoreError::Config(_))
        ));
    }
}
