//! The input manager: routes every local input event of a session.
//!
//! Keyboard events are either shortcuts handled locally or forwarded to the
//! key processor. Mouse buttons go through the mouse bindings, then to the
//! pointer processor and the virtual finger. Controller events are forwarded
//! raw or translated through the loaded touchmap.

use std::path::Path;

use touchdeck_clipboard::ClipboardProvider;
use touchdeck_input::{
    ControlChannel, ControllerHost, FileAction, FilePicker, FilePusher, KeyProcessor,
    PointerClickEvent, PointerMotionEvent, PointerProcessor, PointerScrollEvent,
    PointerTouchEvent, Screen,
};
use touchdeck_touchmap::{SyntheticTouch, Touchmap, TouchmapEngine, TouchmapError};
use touchdeck_types::{
    AckSequence, ButtonState, ControlMessage, ControllerAxisEvent, ControllerButtonEvent,
    ControllerDeviceChange, ControllerDeviceEvent, DeviceKey, FileDropEvent, InputEvent, KeyCode,
    KeyEvent, MotionAction, MouseButton, MouseButtonEvent, MouseButtons, MouseMotionEvent,
    MouseWheelEvent, Point, PointerId, Position, TextInputEvent, TouchFingerEvent,
};
use tracing::{debug, error, info, warn};

use crate::bindings::{MouseBinding, MouseBindings};
use crate::config::Config;
use crate::controllers::ControllerSlots;
use crate::error::CoreError;
use crate::paste::{ClipboardSync, CtrlV};
use crate::shortcut::{Guard, KeyRepeat, Shortcut, ShortcutAction, ShortcutMods};
use crate::vfinger::{self, VirtualFinger};

/// Everything the input manager talks to.
///
/// Without a control channel the session is view-only: no processors may be
/// attached, and only local window shortcuts work.
pub struct Collaborators {
    pub screen: Box<dyn Screen>,
    pub channel: Option<Box<dyn ControlChannel>>,
    pub key_processor: Option<Box<dyn KeyProcessor>>,
    pub pointer_processor: Option<Box<dyn PointerProcessor>>,
    pub file_pusher: Option<Box<dyn FilePusher>>,
    pub file_picker: Option<Box<dyn FilePicker>>,
    pub clipboard: Option<Box<dyn ClipboardProvider>>,
    pub controllers: Option<Box<dyn ControllerHost>>,
}

impl Collaborators {
    pub fn new(screen: Box<dyn Screen>) -> Self {
        Self {
            screen,
            channel: None,
            key_processor: None,
            pointer_processor: None,
            file_pusher: None,
            file_picker: None,
            clipboard: None,
            controllers: None,
        }
    }

    #[must_use]
    pub fn with_channel(mut self, channel: Box<dyn ControlChannel>) -> Self {
        self.channel = Some(channel);
        self
    }

    #[must_use]
    pub fn with_key_processor(mut self, kp: Box<dyn KeyProcessor>) -> Self {
        self.key_processor = Some(kp);
        self
    }

    #[must_use]
    pub fn with_pointer_processor(mut self, mp: Box<dyn PointerProcessor>) -> Self {
        self.pointer_processor = Some(mp);
        self
    }

    #[must_use]
    pub fn with_file_pusher(mut self, fp: Box<dyn FilePusher>) -> Self {
        self.file_pusher = Some(fp);
        self
    }

    #[must_use]
    pub fn with_file_picker(mut self, picker: Box<dyn FilePicker>) -> Self {
        self.file_picker = Some(picker);
        self
    }

    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardProvider>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    #[must_use]
    pub fn with_controllers(mut self, host: Box<dyn ControllerHost>) -> Self {
        self.controllers = Some(host);
        self
    }
}

/// Per-session input routing state.
pub struct InputManager {
    screen: Box<dyn Screen>,
    channel: Option<Box<dyn ControlChannel>>,
    kp: Option<Box<dyn KeyProcessor>>,
    mp: Option<Box<dyn PointerProcessor>>,
    file_pusher: Option<Box<dyn FilePusher>>,
    file_picker: Option<Box<dyn FilePicker>>,
    clipboard: Option<Box<dyn ClipboardProvider>>,
    controller_host: Option<Box<dyn ControllerHost>>,

    shortcut_mods: ShortcutMods,
    mouse_bindings: MouseBindings,
    has_secondary_click: bool,
    forward_controllers: bool,

    key_repeat: KeyRepeat,
    clipboard_sync: ClipboardSync,
    vfinger: VirtualFinger,
    touchmap: Option<TouchmapEngine>,
    controllers: ControllerSlots,
}

impl InputManager {
    /// Set up a session. A touchmap named in the configuration is loaded
    /// now; if that fails the session starts without one.
    pub fn new(config: &Config, collaborators: Collaborators) -> Result<Self, CoreError> {
        let Collaborators {
            screen,
            channel,
            key_processor,
            pointer_processor,
            file_pusher,
            file_picker,
            clipboard,
            controllers,
        } = collaborators;

        if channel.is_none() && (key_processor.is_some() || pointer_processor.is_some()) {
            return Err(CoreError::Config(
                "key and pointer processors need a control channel".to_string(),
            ));
        }

        let mouse_bindings = config.mouse_bindings();
        let mut manager = Self {
            screen,
            channel,
            kp: key_processor,
            mp: pointer_processor,
            file_pusher,
            file_picker,
            clipboard,
            controller_host: controllers,
            shortcut_mods: ShortcutMods::new(&config.input.shortcut_mods),
            mouse_bindings,
            has_secondary_click: mouse_bindings.has_secondary_click(),
            forward_controllers: config.gamepad.forward,
            key_repeat: KeyRepeat::default(),
            clipboard_sync: ClipboardSync::new(
                config.clipboard.autosync,
                config.clipboard.legacy_paste,
            ),
            vfinger: VirtualFinger::default(),
            touchmap: None,
            controllers: ControllerSlots::new(),
        };

        if let Some(path) = &config.gamepad.touchmap {
            // failure is logged by load_touchmap
            let _ = manager.load_touchmap(path);
        }

        info!(
            control = manager.channel.is_some(),
            secondary_click = manager.has_secondary_click,
            forward_controllers = manager.forward_controllers,
            "input manager ready"
        );
        Ok(manager)
    }

    /// Route one local input event.
    pub fn handle_event(&mut self, event: &InputEvent) {
        let control = self.channel.is_some();
        let paused = self.screen.is_paused();
        match event {
            InputEvent::Text(e) => {
                if self.kp.is_some() && !paused {
                    self.process_text(e);
                }
            }
            // some key events act locally, so they are processed even
            // without control
            InputEvent::Key(e) => self.process_key(e),
            InputEvent::MouseMotion(e) => {
                if self.mp.is_some() && !paused {
                    self.process_mouse_motion(e);
                }
            }
            InputEvent::MouseWheel(e) => {
                if self.mp.is_some() && !paused {
                    self.process_mouse_wheel(e);
                }
            }
            InputEvent::MouseButton(e) => self.process_mouse_button(e),
            InputEvent::Touch(e) => {
                if self.mp.is_some() && !paused {
                    self.process_touch(e);
                }
            }
            InputEvent::FileDrop(e) => {
                if control {
                    self.process_file(e);
                }
            }
            InputEvent::ControllerAxis(e) => {
                if control {
                    self.process_controller_axis(*e);
                }
            }
            InputEvent::ControllerButton(e) => {
                if control {
                    self.process_controller_button(*e);
                }
            }
            InputEvent::ControllerDevice(e) => {
                if control {
                    self.process_controller_device(*e);
                }
            }
        }
    }

    /// Whether raw controller events are forwarded to the device.
    pub fn forwards_controllers(&self) -> bool {
        self.forward_controllers
    }

    pub fn touchmap(&self) -> Option<&Touchmap> {
        self.touchmap.as_ref().map(TouchmapEngine::touchmap)
    }

    pub fn virtual_finger_active(&self) -> bool {
        self.vfinger.is_active()
    }

    /// Sequence the next acknowledged clipboard push will carry.
    pub fn next_clipboard_sequence(&self) -> AckSequence {
        self.clipboard_sync.next_sequence()
    }

    pub fn open_controllers(&self) -> usize {
        self.controllers.len()
    }

    /// Replace the active touchmap with the one at `path`.
    ///
    /// On failure the current touchmap and forwarding mode are kept.
    pub fn load_touchmap(&mut self, path: &Path) -> Result<(), TouchmapError> {
        let map = match Touchmap::from_path(path) {
            Ok(map) => map,
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to parse touchmap");
                return Err(e);
            }
        };
        self.release_touchmap_contacts();
        self.touchmap = Some(TouchmapEngine::new(map));
        self.forward_controllers = false;
        Ok(())
    }

    /// Drop the active touchmap and forward controllers raw again.
    pub fn unload_touchmap(&mut self) {
        self.release_touchmap_contacts();
        if self.touchmap.take().is_some() {
            info!("touchmap unloaded");
        }
        self.forward_controllers = true;
    }

    fn release_touchmap_contacts(&mut self) {
        let touches = match self.touchmap.as_mut() {
            Some(engine) => engine.release_all(),
            None => return,
        };
        self.send_touches(&touches);
    }

    fn pick_touchmap(&mut self) {
        let Some(picker) = self.file_picker.as_mut() else {
            warn!("no file picker available, cannot load a touchmap");
            return;
        };
        let Some(path) = picker.pick_touchmap() else {
            info!("touchmap selection cancelled");
            return;
        };
        info!(path = %path.display(), "selected touchmap");
        let _ = self.load_touchmap(&path);
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Queue a command, logging failures. Returns whether it was queued.
    fn push(&self, msg: ControlMessage) -> bool {
        let Some(channel) = self.channel.as_deref() else {
            return false;
        };
        let name = msg.name();
        match channel.push(msg) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "could not request '{name}'");
                false
            }
        }
    }

    fn send_keycode(&self, key: DeviceKey, action: ButtonState) {
        self.push(ControlMessage::keycode(key, action));
    }

    fn simulate_touch(&self, finger: PointerId, action: MotionAction, point: Point) -> bool {
        let up = action == MotionAction::Up;
        debug!(%finger, x = point.x, y = point.y, up, "simulate touch");
        self.push(ControlMessage::InjectTouchEvent {
            action,
            pointer_id: finger,
            position: Position::new(self.screen.frame_size(), point),
            pressure: if up { 0.0 } else { 1.0 },
            action_button: MouseButtons::empty(),
            buttons: MouseButtons::empty(),
        })
    }

    /// Inject touchmap touches, committing each one that was queued.
    ///
    /// Once a touch of a finger is lost the rest of that finger's touches are
    /// skipped, so the device never sees a move for a contact it never saw go
    /// down.
    fn send_touches(&mut self, touches: &[SyntheticTouch]) {
        let mut lost: Vec<PointerId> = Vec::new();
        for t in touches {
            if lost.contains(&t.finger) {
                continue;
            }
            if !self.simulate_touch(t.finger, t.action, t.point) {
                lost.push(t.finger);
                continue;
            }
            if let Some(engine) = self.touchmap.as_mut() {
                engine.commit(t);
            }
        }
    }

    fn pointer_id(&self) -> PointerId {
        if self.has_secondary_click {
            PointerId::MOUSE
        } else {
            PointerId::GENERIC_FINGER
        }
    }

    // -----------------------------------------------------------------------
    // Keyboard
    // -----------------------------------------------------------------------

    fn process_text(&mut self, event: &TextInputEvent) {
        let Some(kp) = self.kp.as_mut() else {
            return;
        };
        if !kp.capabilities().supports_text {
            return;
        }
        // a shortcut must never produce text
        if self.shortcut_mods.is_held(event.mods) {
            return;
        }
        kp.process_text(event);
    }

    fn process_key(&mut self, event: &KeyEvent) {
        let paused = self.screen.is_paused();
        let down = event.is_down();
        let shift = event.mods.shift();

        if down && !event.repeat {
            self.key_repeat.record(event.keycode, event.mods);
        }

        if self.shortcut_mods.is_shortcut(event.keycode, event.mods) {
            self.run_shortcut(event);
            return;
        }

        if self.kp.is_none() || paused {
            return;
        }

        let mut ack_to_wait = AckSequence::NONE;
        let is_ctrl_v =
            event.mods.ctrl() && !shift && event.keycode == KeyCode::KeyV && down && !event.repeat;
        if is_ctrl_v {
            let async_paste = self
                .kp
                .as_ref()
                .is_some_and(|kp| kp.capabilities().async_paste);
            let Some(channel) = self.channel.as_deref() else {
                return;
            };
            match self
                .clipboard_sync
                .before_ctrl_v(self.clipboard.as_deref_mut(), channel, async_paste)
            {
                CtrlV::Forward(ack) => ack_to_wait = ack,
                CtrlV::Consumed => return,
            }
        }

        if let Some(kp) = self.kp.as_mut() {
            kp.process_key(event, ack_to_wait);
        }
    }

    fn run_shortcut(&mut self, event: &KeyEvent) {
        let Some(shortcut) = Shortcut::lookup(event.keycode, event.mods.shift()) else {
            return;
        };
        let mut met = Guard::empty();
        met.set(Guard::CONTROL, self.channel.is_some());
        met.set(Guard::KEY_PROCESSOR, self.kp.is_some());
        met.set(
            Guard::HID,
            self.kp.as_ref().is_some_and(|kp| kp.capabilities().hid),
        );
        met.set(Guard::NO_REPEAT, !event.repeat);
        met.set(Guard::DOWN_ONLY, event.is_down());
        met.set(Guard::NOT_PAUSED, !self.screen.is_paused());
        met.set(Guard::VIDEO, self.screen.has_video());
        if !shortcut.guard.permits(met) {
            debug!(keycode = ?event.keycode, action = %shortcut.action, "shortcut not permitted");
            return;
        }
        debug!(action = %shortcut.action, "shortcut");

        match shortcut.action {
            ShortcutAction::Key(key) => self.send_keycode(key, event.state),
            ShortcutAction::ScreenPower(mode) => {
                self.push(ControlMessage::SetScreenPowerMode { mode });
            }
            ShortcutAction::Pause(paused) => self.screen.set_paused(paused),
            ShortcutAction::Orient(transform) => {
                let orientation = self.screen.orientation().apply(transform);
                self.screen.set_orientation(orientation);
            }
            ShortcutAction::CopyFromDevice(copy_key) => {
                self.push(ControlMessage::GetClipboard { copy_key });
            }
            ShortcutAction::Paste { as_text } => {
                if let Some(channel) = self.channel.as_deref() {
                    self.clipboard_sync.paste_shortcut(
                        self.clipboard.as_deref_mut(),
                        channel,
                        as_text,
                    );
                }
            }
            ShortcutAction::ToggleFullscreen => self.screen.toggle_fullscreen(),
            ShortcutAction::ResizeToFit => self.screen.resize_to_fit(),
            ShortcutAction::ResizeToPixelPerfect => self.screen.resize_to_pixel_perfect(),
            ShortcutAction::ToggleFpsCounter => self.screen.toggle_fps_counter(),
            ShortcutAction::ExpandPanels => {
                if self.key_repeat.count() == 0 {
                    self.push(ControlMessage::ExpandNotificationPanel);
                } else {
                    self.push(ControlMessage::ExpandSettingsPanel);
                }
            }
            ShortcutAction::CollapsePanels => {
                self.push(ControlMessage::CollapsePanels);
            }
            ShortcutAction::RotateDevice => {
                self.push(ControlMessage::RotateDevice);
            }
            ShortcutAction::OpenHardKeyboardSettings => {
                self.push(ControlMessage::OpenHardKeyboardSettings);
            }
            ShortcutAction::LoadTouchmap => self.pick_touchmap(),
            ShortcutAction::UnloadTouchmap => self.unload_touchmap(),
        }
    }

    // -----------------------------------------------------------------------
    // Pointer
    // -----------------------------------------------------------------------

    /// Frame position of a window point; zero in relative mode.
    fn position(&self, x: i32, y: i32, relative: bool) -> Position {
        if relative {
            return Position::default();
        }
        Position::new(self.screen.frame_size(), self.screen.window_to_frame(x, y))
    }

    fn process_mouse_motion(&mut self, event: &MouseMotionEvent) {
        if event.from_touch {
            // duplicate of a touch event
            return;
        }
        let Some(mp) = self.mp.as_ref() else {
            return;
        };
        let relative = mp.capabilities().relative_mode;
        let motion = PointerMotionEvent {
            position: self.position(event.x, event.y, relative),
            pointer_id: self.pointer_id(),
            xrel: event.xrel,
            yrel: event.yrel,
            buttons: self.mouse_bindings.forwarded(event.buttons),
        };
        if let Some(mp) = self.mp.as_mut() {
            mp.process_motion(&motion);
        }

        debug_assert!(!relative || !self.vfinger.is_active());
        if let Some(inversion) = self.vfinger.active() {
            let mouse = self.screen.window_to_frame(event.x, event.y);
            let point = inversion.apply(mouse, self.screen.frame_size());
            self.simulate_touch(
                vfinger::finger_id(self.has_secondary_click),
                MotionAction::Move,
                point,
            );
        }
    }

    fn process_mouse_button(&mut self, event: &MouseButtonEvent) {
        if event.from_touch {
            // duplicate of a touch event
            return;
        }

        let control = self.channel.is_some();
        let paused = self.screen.is_paused();
        let down = event.state.is_pressed();

        if control && !paused && self.apply_mouse_binding(event) {
            return;
        }

        // double-click on the borders resizes the window to fit the frame
        let relative = self
            .mp
            .as_ref()
            .is_some_and(|mp| mp.capabilities().relative_mode);
        if self.screen.has_video()
            && !relative
            && event.button == MouseButton::Left
            && event.clicks == 2
        {
            let (x, y) = self.screen.hidpi_scale(event.x, event.y);
            if !self.screen.content_rect().contains(x, y) {
                if down {
                    self.screen.resize_to_fit();
                }
                return;
            }
        }

        if self.mp.is_none() || paused {
            return;
        }

        let click = PointerClickEvent {
            position: self.position(event.x, event.y, relative),
            action: event.state,
            button: event.button,
            pointer_id: self.pointer_id(),
            buttons: self.mouse_bindings.forwarded(event.buttons),
        };
        debug!(
            x = event.x,
            y = event.y,
            pointer = %click.pointer_id,
            frame_x = click.position.point.x,
            frame_y = click.position.point.y,
            "mouse click"
        );
        if let Some(mp) = self.mp.as_mut() {
            mp.process_click(&click);
        }

        if relative {
            debug_assert!(!self.vfinger.is_active());
            return;
        }
        if event.button == MouseButton::Left {
            self.update_virtual_finger(event);
        }
    }

    /// Run the device action bound to the button, if any. Returns whether the
    /// event was consumed.
    fn apply_mouse_binding(&mut self, event: &MouseButtonEvent) -> bool {
        match self.mouse_bindings.binding_for(event.button) {
            MouseBinding::Click | MouseBinding::Auto => return false,
            MouseBinding::Disabled => {}
            MouseBinding::Back => {
                if self.kp.is_some() {
                    self.push(ControlMessage::BackOrScreenOn {
                        action: event.state,
                    });
                }
            }
            MouseBinding::Home => {
                if self.kp.is_some() {
                    self.send_keycode(DeviceKey::Home, event.state);
                }
            }
            MouseBinding::AppSwitch => {
                if self.kp.is_some() {
                    self.send_keycode(DeviceKey::AppSwitch, event.state);
                }
            }
            MouseBinding::ExpandNotificationPanel => {
                if event.state.is_pressed() {
                    if event.clicks < 2 {
                        self.push(ControlMessage::ExpandNotificationPanel);
                    } else {
                        self.push(ControlMessage::ExpandSettingsPanel);
                    }
                }
            }
        }
        true
    }

    fn update_virtual_finger(&mut self, event: &MouseButtonEvent) {
        let down = event.state.is_pressed();
        let Some(transition) = self.vfinger.on_left_button(down, event.mods) else {
            return;
        };
        let mouse = self.screen.window_to_frame(event.x, event.y);
        let point = transition
            .inversion
            .apply(mouse, self.screen.frame_size());
        if self.simulate_touch(
            vfinger::finger_id(self.has_secondary_click),
            transition.action,
            point,
        ) {
            self.vfinger.commit(transition);
        }
    }

    fn process_mouse_wheel(&mut self, event: &MouseWheelEvent) {
        let Some(mp) = self.mp.as_ref() else {
            return;
        };
        let caps = mp.capabilities();
        if !caps.supports_scroll {
            return;
        }
        let scroll = PointerScrollEvent {
            position: self.position(event.mouse_x, event.mouse_y, caps.relative_mode),
            hscroll: event.x.clamp(-1.0, 1.0),
            vscroll: event.y.clamp(-1.0, 1.0),
            buttons: self.mouse_bindings.forwarded(event.buttons),
        };
        if let Some(mp) = self.mp.as_mut() {
            mp.process_scroll(&scroll);
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn process_touch(&mut self, event: &TouchFingerEvent) {
        let Some(mp) = self.mp.as_ref() else {
            return;
        };
        if !mp.capabilities().supports_touch {
            return;
        }
        // normalized coordinates, scaled to drawable pixels
        let drawable = self.screen.drawable_size();
        let x = (event.x * drawable.width as f32) as i32;
        let y = (event.y * drawable.height as f32) as i32;

        let touch = PointerTouchEvent {
            position: Position::new(
                self.screen.frame_size(),
                self.screen.drawable_to_frame(x, y),
            ),
            action: event.action,
            pointer_id: PointerId(event.finger_id),
            pressure: event.pressure,
        };
        if let Some(mp) = self.mp.as_mut() {
            mp.process_touch(&touch);
        }
    }

    // -----------------------------------------------------------------------
    // Files
    // -----------------------------------------------------------------------

    fn process_file(&mut self, event: &FileDropEvent) {
        let Some(pusher) = self.file_pusher.as_mut() else {
            warn!(path = %event.path.display(), "no file pusher, dropped file ignored");
            return;
        };
        let action = FileAction::for_path(&event.path);
        debug!(path = %event.path.display(), ?action, "file dropped");
        if let Err(e) = pusher.request(action, event.path.clone()) {
            warn!(error = %e, path = %event.path.display(), "could not request file transfer");
        }
    }

    // -----------------------------------------------------------------------
    // Game controllers
    // -----------------------------------------------------------------------

    fn process_controller_axis(&mut self, event: ControllerAxisEvent) {
        debug!(
            controller = %event.controller,
            axis = ?event.axis,
            value = event.value,
            "controller axis"
        );
        if self.forward_controllers {
            self.push(ControlMessage::InjectControllerAxis {
                controller: event.controller,
                axis: event.axis,
                value: event.value,
            });
        } else if let Some(engine) = self.touchmap.as_mut() {
            let touches = engine.handle_axis(event.axis, event.value);
            self.send_touches(&touches);
        }
    }

    fn process_controller_button(&mut self, event: ControllerButtonEvent) {
        debug!(
            controller = %event.controller,
            button = ?event.button,
            state = ?event.state,
            "controller button"
        );
        if self.forward_controllers {
            self.push(ControlMessage::InjectControllerButton {
                controller: event.controller,
                button: event.button,
                state: event.state,
            });
        } else if let Some(engine) = self.touchmap.as_mut() {
            let touches = engine.handle_button(event.button.code(), event.state.is_pressed());
            self.send_touches(&touches);
        }
    }

    fn process_controller_device(&mut self, event: ControllerDeviceEvent) {
        let (controller, change) = match event {
            ControllerDeviceEvent::Added { device_index } => {
                if self.controllers.is_full() {
                    warn!(device_index, "controller limit reached");
                    return;
                }
                let Some(host) = self.controller_host.as_mut() else {
                    warn!(device_index, "no controller host, cannot open controller");
                    return;
                };
                let Some(id) = host.open(device_index) else {
                    warn!(device_index, "could not open game controller");
                    return;
                };
                if let Err(e) = self.controllers.insert(id) {
                    warn!(error = %e, controller = %id, "could not track controller");
                    host.close(id);
                    return;
                }
                info!(controller = %id, "game controller added");
                (id, ControllerDeviceChange::Added)
            }
            ControllerDeviceEvent::Removed { controller } => {
                if !self.controllers.contains(controller) {
                    warn!(%controller, "unknown game controller removed");
                    return;
                }
                if let Some(host) = self.controller_host.as_mut() {
                    host.close(controller);
                }
                if let Err(e) = self.controllers.remove(controller) {
                    warn!(error = %e, "could not free game controller slot");
                    return;
                }
                info!(%controller, "game controller removed");
                (controller, ControllerDeviceChange::Removed)
            }
        };
        self.push(ControlMessage::InjectControllerDevice { controller, change });
    }
}

impl Drop for InputManager {
    fn drop(&mut self) {
        self.release_touchmap_contacts();
    }
}

#[cfg(test)]
mod tests {
    use touchdeck_input::mock::{MockChannel, MockScreen};
    use touchdeck_input::{mock::MockKeyProcessor, KeyProcessorCaps};
    use touchdeck_types::{Modifiers, Size};

    use super::*;

    #[test]
    fn processors_need_a_channel() {
        let collab = Collaborators::new(Box::new(MockScreen::new(Size::new(100, 200))))
            .with_key_processor(Box::new(MockKeyProcessor::new(KeyProcessorCaps::default())));
        let err = InputManager::new(&Config::default(), collab).err();
        assert!(matches!(err, Some(CoreError::Config(_))));
    }

    #[test]
    fn view_only_session_handles_window_shortcuts() {
        let screen = MockScreen::new(Size::new(100, 200));
        let handle = screen.handle();
        let mut im =
            InputManager::new(&Config::default(), Collaborators::new(Box::new(screen))).unwrap();

        im.handle_event(&InputEvent::Key(KeyEvent::new(
            KeyCode::KeyF,
            ButtonState::Pressed,
            Modifiers::LALT,
        )));
        assert_eq!(handle.snapshot().fullscreen_toggles, 1);
    }

    #[test]
    fn pointer_id_follows_secondary_click() {
        let channel = MockChannel::new();
        let mut config = Config::default();
        let collab = Collaborators::new(Box::new(MockScreen::new(Size::new(100, 200))))
            .with_channel(Box::new(channel.clone()));
        let im = InputManager::new(&config, collab).unwrap();
        assert_eq!(im.pointer_id(), PointerId::GENERIC_FINGER);

        config.input.forward_all_clicks = true;
        let collab = Collaborators::new(Box::new(MockScreen::new(Size::new(100, 200))))
            .with_channel(Box::new(channel));
        let im = InputManager::new(&config, collab).unwrap();
        assert_eq!(im.pointer_id(), PointerId::MOUSE);
    }
}
