//! Recording mock collaborators for testing.
//!
//! Each mock shares its state with a clonable handle so tests can keep
//! observing after the mock itself has been moved into the input manager.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use touchdeck_types::{
    AckSequence, ControlMessage, ControllerId, KeyEvent, Orientation, Point, Rect, Size,
    TextInputEvent,
};

use crate::error::InputError;
use crate::{
    ControlChannel, ControllerHost, FileAction, FilePicker, FilePusher, KeyProcessor,
    KeyProcessorCaps, PointerClickEvent, PointerMotionEvent, PointerProcessor,
    PointerProcessorCaps, PointerScrollEvent, PointerTouchEvent, Screen,
};

// ---------------------------------------------------------------------------
// MockChannel
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MockChannelState {
    pushed: Vec<ControlMessage>,
    failing: bool,
}

/// Control channel that records every accepted command.
///
/// Can be switched into a failing mode to simulate a full queue.
#[derive(Debug, Clone, Default)]
pub struct MockChannel {
    state: Arc<Mutex<MockChannelState>>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent pushes fail with [`InputError::QueueFull`].
    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().failing = failing;
    }

    /// Snapshot of all accepted commands.
    pub fn messages(&self) -> Vec<ControlMessage> {
        self.state.lock().unwrap().pushed.clone()
    }

    /// Take all accepted commands, leaving the record empty.
    pub fn drain(&self) -> Vec<ControlMessage> {
        std::mem::take(&mut self.state.lock().unwrap().pushed)
    }
}

impl ControlChannel for MockChannel {
    fn push(&self, msg: ControlMessage) -> Result<(), InputError> {
        let mut state = self.state.lock().unwrap();
        if state.failing {
            return Err(InputError::QueueFull);
        }
        state.pushed.push(msg);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockKeyProcessor
// ---------------------------------------------------------------------------

/// What the key processor received.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyCall {
    Key { event: KeyEvent, ack: AckSequence },
    Text(TextInputEvent),
}

#[derive(Debug, Default)]
struct MockKeyState {
    calls: Vec<KeyCall>,
}

/// Key processor that records its calls.
pub struct MockKeyProcessor {
    caps: KeyProcessorCaps,
    state: Arc<Mutex<MockKeyState>>,
}

impl MockKeyProcessor {
    pub fn new(caps: KeyProcessorCaps) -> Self {
        Self {
            caps,
            state: Arc::new(Mutex::new(MockKeyState::default())),
        }
    }

    pub fn handle(&self) -> MockKeyHandle {
        MockKeyHandle {
            state: Arc::clone(&self.state),
        }
    }
}

/// Clonable observer handle for [`MockKeyProcessor`].
#[derive(Clone)]
pub struct MockKeyHandle {
    state: Arc<Mutex<MockKeyState>>,
}

impl MockKeyHandle {
    pub fn calls(&self) -> Vec<KeyCall> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl KeyProcessor for MockKeyProcessor {
    fn capabilities(&self) -> KeyProcessorCaps {
        self.caps
    }

    fn process_key(&mut self, event: &KeyEvent, ack_to_wait: AckSequence) {
        self.state.lock().unwrap().calls.push(KeyCall::Key {
            event: *event,
            ack: ack_to_wait,
        });
    }

    fn process_text(&mut self, event: &TextInputEvent) {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(KeyCall::Text(event.clone()));
    }
}

// ---------------------------------------------------------------------------
// MockPointerProcessor
// ---------------------------------------------------------------------------

/// What the pointer processor received.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerCall {
    Motion(PointerMotionEvent),
    Click(PointerClickEvent),
    Scroll(PointerScrollEvent),
    Touch(PointerTouchEvent),
}

#[derive(Debug, Default)]
struct MockPointerState {
    calls: Vec<PointerCall>,
}

/// Pointer processor that records its calls.
pub struct MockPointerProcessor {
    caps: PointerProcessorCaps,
    state: Arc<Mutex<MockPointerState>>,
}

impl MockPointerProcessor {
    pub fn new(caps: PointerProcessorCaps) -> Self {
        Self {
            caps,
            state: Arc::new(Mutex::new(MockPointerState::default())),
        }
    }

    pub fn handle(&self) -> MockPointerHandle {
        MockPointerHandle {
            state: Arc::clone(&self.state),
        }
    }
}

/// Clonable observer handle for [`MockPointerProcessor`].
#[derive(Clone)]
pub struct MockPointerHandle {
    state: Arc<Mutex<MockPointerState>>,
}

impl MockPointerHandle {
    pub fn calls(&self) -> Vec<PointerCall> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl PointerProcessor for MockPointerProcessor {
    fn capabilities(&self) -> PointerProcessorCaps {
        self.caps
    }

    fn process_motion(&mut self, event: &PointerMotionEvent) {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(PointerCall::Motion(*event));
    }

    fn process_click(&mut self, event: &PointerClickEvent) {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(PointerCall::Click(*event));
    }

    fn process_scroll(&mut self, event: &PointerScrollEvent) {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(PointerCall::Scroll(*event));
    }

    fn process_touch(&mut self, event: &PointerTouchEvent) {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(PointerCall::Touch(*event));
    }
}

// ---------------------------------------------------------------------------
// MockScreen
// ---------------------------------------------------------------------------

/// Shared state for observing what happened to [`MockScreen`].
#[derive(Debug, Clone, PartialEq)]
pub struct MockScreenState {
    pub paused: bool,
    pub has_video: bool,
    pub frame_size: Size,
    pub content_rect: Rect,
    pub drawable_size: Size,
    /// Drawable pixels per window pixel.
    pub hidpi_factor: i32,
    pub orientation: Orientation,
    pub fullscreen_toggles: u32,
    pub resize_to_fit_calls: u32,
    pub pixel_perfect_calls: u32,
    pub fps_counter_toggles: u32,
}

/// Screen whose content fills the whole window at a 1:1 scale by default.
pub struct MockScreen {
    state: Arc<Mutex<MockScreenState>>,
}

impl MockScreen {
    pub fn new(frame_size: Size) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockScreenState {
                paused: false,
                has_video: true,
                frame_size,
                content_rect: Rect::new(0, 0, frame_size.width, frame_size.height),
                drawable_size: frame_size,
                hidpi_factor: 1,
                orientation: Orientation::default(),
                fullscreen_toggles: 0,
                resize_to_fit_calls: 0,
                pixel_perfect_calls: 0,
                fps_counter_toggles: 0,
            })),
        }
    }

    pub fn handle(&self) -> MockScreenHandle {
        MockScreenHandle {
            state: Arc::clone(&self.state),
        }
    }
}

/// Clonable observer handle for [`MockScreen`].
#[derive(Clone)]
pub struct MockScreenHandle {
    state: Arc<Mutex<MockScreenState>>,
}

impl MockScreenHandle {
    pub fn snapshot(&self) -> MockScreenState {
        self.state.lock().unwrap().clone()
    }

    /// Draw the frame inside `rect` of a window whose drawable area is `drawable`.
    pub fn set_layout(&self, rect: Rect, drawable: Size) {
        let mut state = self.state.lock().unwrap();
        state.content_rect = rect;
        state.drawable_size = drawable;
    }

    pub fn set_has_video(&self, has_video: bool) {
        self.state.lock().unwrap().has_video = has_video;
    }

    pub fn set_hidpi_factor(&self, factor: i32) {
        self.state.lock().unwrap().hidpi_factor = factor;
    }
}

fn scale(value: i32, offset: i32, from: u32, to: u32) -> i32 {
    if from == 0 {
        return value;
    }
    let scaled = (i64::from(value) - i64::from(offset)) * i64::from(to) / i64::from(from);
    i32::try_from(scaled).unwrap_or(if scaled < 0 { i32::MIN } else { i32::MAX })
}

impl Screen for MockScreen {
    fn is_paused(&self) -> bool {
        self.state.lock().unwrap().paused
    }

    fn has_video(&self) -> bool {
        self.state.lock().unwrap().has_video
    }

    fn frame_size(&self) -> Size {
        self.state.lock().unwrap().frame_size
    }

    fn content_rect(&self) -> Rect {
        self.state.lock().unwrap().content_rect
    }

    fn drawable_size(&self) -> Size {
        self.state.lock().unwrap().drawable_size
    }

    fn window_to_frame(&self, x: i32, y: i32) -> Point {
        let (x, y) = self.hidpi_scale(x, y);
        self.drawable_to_frame(x, y)
    }

    fn drawable_to_frame(&self, x: i32, y: i32) -> Point {
        let state = self.state.lock().unwrap();
        let rect = state.content_rect;
        let frame = state.frame_size;
        Point::new(
            scale(x, rect.x, rect.width, frame.width),
            scale(y, rect.y, rect.height, frame.height),
        )
    }

    fn hidpi_scale(&self, x: i32, y: i32) -> (i32, i32) {
        let factor = self.state.lock().unwrap().hidpi_factor;
        (x.saturating_mul(factor), y.saturating_mul(factor))
    }

    fn orientation(&self) -> Orientation {
        self.state.lock().unwrap().orientation
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        self.state.lock().unwrap().orientation = orientation;
    }

    fn set_paused(&mut self, paused: bool) {
        self.state.lock().unwrap().paused = paused;
    }

    fn toggle_fullscreen(&mut self) {
        self.state.lock().unwrap().fullscreen_toggles += 1;
    }

    fn resize_to_fit(&mut self) {
        self.state.lock().unwrap().resize_to_fit_calls += 1;
    }

    fn resize_to_pixel_perfect(&mut self) {
        self.state.lock().unwrap().pixel_perfect_calls += 1;
    }

    fn toggle_fps_counter(&mut self) {
        self.state.lock().unwrap().fps_counter_toggles += 1;
    }
}

// ---------------------------------------------------------------------------
// MockFilePusher
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MockFilePusherState {
    requests: Vec<(FileAction, PathBuf)>,
    failing: bool,
}

/// File pusher that records requests.
pub struct MockFilePusher {
    state: Arc<Mutex<MockFilePusherState>>,
}

impl Default for MockFilePusher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFilePusher {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockFilePusherState::default())),
        }
    }

    pub fn handle(&self) -> MockFilePusherHandle {
        MockFilePusherHandle {
            state: Arc::clone(&self.state),
        }
    }
}

/// Clonable observer handle for [`MockFilePusher`].
#[derive(Clone)]
pub struct MockFilePusherHandle {
    state: Arc<Mutex<MockFilePusherState>>,
}

impl MockFilePusherHandle {
    pub fn requests(&self) -> Vec<(FileAction, PathBuf)> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().failing = failing;
    }
}

impl FilePusher for MockFilePusher {
    fn request(&mut self, action: FileAction, path: PathBuf) -> Result<(), InputError> {
        let mut state = self.state.lock().unwrap();
        if state.failing {
            return Err(InputError::FileRequest(path.display().to_string()));
        }
        state.requests.push((action, path));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockFilePicker
// ---------------------------------------------------------------------------

/// File picker returning queued answers; `None` once the queue is empty.
#[derive(Debug, Clone, Default)]
pub struct MockFilePicker {
    answers: Arc<Mutex<VecDeque<Option<PathBuf>>>>,
}

impl MockFilePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next dialog. `None` simulates a cancel.
    pub fn push_answer(&self, answer: Option<PathBuf>) {
        self.answers.lock().unwrap().push_back(answer);
    }

    /// Answers not consumed yet.
    pub fn pending(&self) -> usize {
        self.answers.lock().unwrap().len()
    }
}

impl FilePicker for MockFilePicker {
    fn pick_touchmap(&mut self) -> Option<PathBuf> {
        self.answers.lock().unwrap().pop_front().flatten()
    }
}

// ---------------------------------------------------------------------------
// MockControllerHost
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MockControllerHostState {
    open: Vec<ControllerId>,
    closed: Vec<ControllerId>,
    refuse: bool,
}

/// Controller host that opens device index `n` as instance id `n + 1`.
pub struct MockControllerHost {
    state: Arc<Mutex<MockControllerHostState>>,
}

impl Default for MockControllerHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockControllerHost {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockControllerHostState::default())),
        }
    }

    pub fn handle(&self) -> MockControllerHostHandle {
        MockControllerHostHandle {
            state: Arc::clone(&self.state),
        }
    }
}

/// Clonable observer handle for [`MockControllerHost`].
#[derive(Clone)]
pub struct MockControllerHostHandle {
    state: Arc<Mutex<MockControllerHostState>>,
}

impl MockControllerHostHandle {
    /// Currently open controllers.
    pub fn open(&self) -> Vec<ControllerId> {
        self.state.lock().unwrap().open.clone()
    }

    pub fn closed(&self) -> Vec<ControllerId> {
        self.state.lock().unwrap().closed.clone()
    }

    /// Make subsequent opens fail.
    pub fn set_refuse(&self, refuse: bool) {
        self.state.lock().unwrap().refuse = refuse;
    }
}

impl ControllerHost for MockControllerHost {
    fn open(&mut self, device_index: u32) -> Option<ControllerId> {
        let mut state = self.state.lock().unwrap();
        if state.refuse {
            return None;
        }
        let id = ControllerId(device_index + 1);
        state.open.push(id);
        Some(id)
    }

    fn close(&mut self, controller: ControllerId) {
        let mut state = self.state.lock().unwrap();
        state.open.retain(|c| *c != controller);
        state.closed.push(controller);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_screen_maps_letterboxed_content() {
        let screen = MockScreen::new(Size::new(1000, 2000));
        let handle = screen.handle();
        handle.set_layout(Rect::new(100, 0, 500, 1000), Size::new(700, 1000));
        assert_eq!(screen.drawable_to_frame(100, 0), Point::new(0, 0));
        assert_eq!(screen.drawable_to_frame(350, 500), Point::new(500, 1000));
        assert_eq!(screen.drawable_to_frame(0, 0), Point::new(-200, 0));
    }

    #[test]
    fn mock_channel_failing_mode() {
        let channel = MockChannel::new();
        channel.push(ControlMessage::RotateDevice).unwrap();
        channel.set_failing(true);
        assert!(channel.push(ControlMessage::RotateDevice).is_err());
        assert_eq!(channel.messages(), vec![ControlMessage::RotateDevice]);
    }

    #[test]
    fn mock_picker_answers_in_order() {
        let mut picker = MockFilePicker::new();
        picker.push_answer(None);
        picker.push_answer(Some(PathBuf::from("/tmp/a.json")));
        assert_eq!(picker.pick_touchmap(), None);
        assert_eq!(picker.pick_touchmap(), Some(PathBuf::from("/tmp/a.json")));
        assert_eq!(picker.pick_touchmap(), None);
    }
}
