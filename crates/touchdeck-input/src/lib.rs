//! Collaborator contracts for the touchdeck input core.
//!
//! This crate defines the traits the input manager talks to: the outbound
//! [`ControlChannel`], the [`KeyProcessor`] and [`PointerProcessor`] that turn
//! local events into device events, the [`Screen`] that renders the device,
//! the [`FilePusher`], the [`FilePicker`] dialog and the [`ControllerHost`]
//! owning game-controller handles. Recording mocks live behind the `mock`
//! feature; a native file dialog behind the `rfd` feature.

use std::path::{Path, PathBuf};

use touchdeck_types::{
    AckSequence, ControlMessage, ControllerId, KeyEvent, Orientation, Point, Rect, Size,
    TextInputEvent,
};

pub mod channel;
pub mod error;
pub mod processor;

#[cfg(feature = "mock")]
pub mod mock;

#[cfg(feature = "rfd")]
pub mod picker;

pub use error::InputError;
pub use processor::{PointerClickEvent, PointerMotionEvent, PointerScrollEvent, PointerTouchEvent};

/// Non-blocking, thread-safe queue of commands for the transport thread.
pub trait ControlChannel {
    /// Enqueue a command. Never blocks; fails when the queue cannot take it.
    fn push(&self, msg: ControlMessage) -> Result<(), InputError>;
}

/// What a key processor can do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyProcessorCaps {
    /// Committed text can be injected.
    pub supports_text: bool,
    /// The processor can defer a keystroke until a clipboard ack arrives.
    pub async_paste: bool,
    /// The processor emulates a physical (HID) keyboard.
    pub hid: bool,
}

/// Converts local keyboard events to device events.
pub trait KeyProcessor {
    fn capabilities(&self) -> KeyProcessorCaps;

    /// Process a key event. When `ack_to_wait` is not [`AckSequence::NONE`]
    /// the injection must wait for the device to acknowledge that sequence.
    fn process_key(&mut self, event: &KeyEvent, ack_to_wait: AckSequence);

    /// Process committed text. Only called when `supports_text` is set.
    fn process_text(&mut self, event: &TextInputEvent);
}

/// What a pointer processor can do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerProcessorCaps {
    /// Only relative motion is sent; no absolute positions exist.
    pub relative_mode: bool,
    pub supports_touch: bool,
    pub supports_scroll: bool,
}

/// Converts local pointer events to device events.
pub trait PointerProcessor {
    fn capabilities(&self) -> PointerProcessorCaps;

    fn process_motion(&mut self, event: &PointerMotionEvent);

    fn process_click(&mut self, event: &PointerClickEvent);

    /// Only called when `supports_scroll` is set.
    fn process_scroll(&mut self, event: &PointerScrollEvent);

    /// Only called when `supports_touch` is set.
    fn process_touch(&mut self, event: &PointerTouchEvent);
}

/// The window rendering the device frame.
pub trait Screen {
    fn is_paused(&self) -> bool;

    /// Whether a video stream is displayed.
    fn has_video(&self) -> bool;

    /// Size of the device frame.
    fn frame_size(&self) -> Size;

    /// Where the frame is drawn inside the window, in drawable pixels.
    fn content_rect(&self) -> Rect;

    /// Size of the window's drawable area in pixels.
    fn drawable_size(&self) -> Size;

    fn window_to_frame(&self, x: i32, y: i32) -> Point;

    fn drawable_to_frame(&self, x: i32, y: i32) -> Point;

    /// Scale window coordinates to drawable coordinates.
    fn hidpi_scale(&self, x: i32, y: i32) -> (i32, i32);

    fn orientation(&self) -> Orientation;

    fn set_orientation(&mut self, orientation: Orientation);

    fn set_paused(&mut self, paused: bool);

    fn toggle_fullscreen(&mut self);

    fn resize_to_fit(&mut self);

    fn resize_to_pixel_perfect(&mut self);

    fn toggle_fps_counter(&mut self);
}

/// How a dropped file is sent to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileAction {
    InstallApk,
    PushFile,
}

impl FileAction {
    /// `.apk` files are installed, anything else is pushed.
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        if path.extension().is_some_and(|ext| ext == "apk") {
            Self::InstallApk
        } else {
            Self::PushFile
        }
    }
}

/// Queues file transfers to the device.
pub trait FilePusher {
    fn request(&mut self, action: FileAction, path: PathBuf) -> Result<(), InputError>;
}

/// Blocking native "open file" dialog.
pub trait FilePicker {
    /// Ask the user for a touchmap document. `None` when cancelled.
    fn pick_touchmap(&mut self) -> Option<PathBuf>;
}

/// Owns the platform game-controller handles.
pub trait ControllerHost {
    /// Open the controller at `device_index`, returning its instance id.
    fn open(&mut self, device_index: u32) -> Option<ControllerId>;

    /// Close a previously opened controller.
    fn close(&mut self, controller: ControllerId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apk_is_installed() {
        assert_eq!(
            FileAction::for_path(Path::new("/tmp/app-release.apk")),
            FileAction::InstallApk
        );
    }

    #[test]
    fn other_files_are_pushed() {
        assert_eq!(
            FileAction::for_path(Path::new("/tmp/photo.jpg")),
            FileAction::PushFile
        );
        assert_eq!(
            FileAction::for_path(Path::new("/tmp/app.APK")),
            FileAction::PushFile
        );
        assert_eq!(
            FileAction::for_path(Path::new("/tmp/archive.apk.zip")),
            FileAction::PushFile
        );
        assert_eq!(FileAction::for_path(Path::new("README")), FileAction::PushFile);
    }
}
