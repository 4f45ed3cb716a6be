//! Host-to-device clipboard synchronisation around paste keystrokes.
//!
//! Before a Ctrl+V reaches the device, the host clipboard is pushed to the
//! device. When the key processor can defer keystrokes, the push carries a
//! sequence number and the Ctrl+V is held back until the device acknowledges
//! it; otherwise no acknowledgment is requested.

use touchdeck_clipboard::{ClipboardError, ClipboardProvider, SequenceCounter};
use touchdeck_input::ControlChannel;
use touchdeck_types::{AckSequence, ControlMessage};
use tracing::{debug, warn};

/// What to do with a Ctrl+V after synchronisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtrlV {
    /// Forward it, waiting for this acknowledgment first.
    Forward(AckSequence),
    /// Do not forward it.
    Consumed,
}

/// Clipboard behaviour of a session and its sequence counter.
#[derive(Debug)]
pub struct ClipboardSync {
    counter: SequenceCounter,
    autosync: bool,
    legacy_paste: bool,
}

fn read_text(
    clipboard: Option<&mut (dyn ClipboardProvider + 'static)>,
) -> Result<String, ClipboardError> {
    let clipboard = clipboard.ok_or(ClipboardError::Unavailable)?;
    let text = clipboard.get_text()?;
    if text.is_empty() {
        return Err(ClipboardError::Empty);
    }
    Ok(text)
}

impl ClipboardSync {
    pub fn new(autosync: bool, legacy_paste: bool) -> Self {
        Self {
            counter: SequenceCounter::new(),
            autosync,
            legacy_paste,
        }
    }

    /// The sequence the next acknowledged push will carry.
    pub fn next_sequence(&self) -> AckSequence {
        self.counter.peek()
    }

    /// Synchronise the clipboard ahead of an unshifted Ctrl+V press.
    pub fn before_ctrl_v(
        &mut self,
        clipboard: Option<&mut (dyn ClipboardProvider + 'static)>,
        channel: &dyn ControlChannel,
        async_paste: bool,
    ) -> CtrlV {
        if !self.autosync {
            return CtrlV::Forward(AckSequence::NONE);
        }
        if self.legacy_paste {
            inject_text(clipboard, channel);
            return CtrlV::Consumed;
        }

        let sequence = if async_paste {
            self.counter.peek()
        } else {
            AckSequence::NONE
        };
        if !set_device_clipboard(clipboard, channel, false, sequence) {
            warn!("clipboard could not be synchronized, Ctrl+V not injected");
            return CtrlV::Consumed;
        }
        if sequence.is_none() {
            return CtrlV::Forward(AckSequence::NONE);
        }
        self.counter.advance();
        debug!(sequence = sequence.0, "Ctrl+V waits for clipboard ack");
        CtrlV::Forward(sequence)
    }

    /// The paste shortcut: type the clipboard, or set it on the device and paste there.
    pub fn paste_shortcut(
        &self,
        clipboard: Option<&mut (dyn ClipboardProvider + 'static)>,
        channel: &dyn ControlChannel,
        as_text: bool,
    ) {
        if as_text || self.legacy_paste {
            inject_text(clipboard, channel);
        } else {
            set_device_clipboard(clipboard, channel, true, AckSequence::NONE);
        }
    }
}

fn inject_text(
    clipboard: Option<&mut (dyn ClipboardProvider + 'static)>,
    channel: &dyn ControlChannel,
) {
    let text = match read_text(clipboard) {
        Ok(text) => text,
        Err(ClipboardError::Empty) => return,
        Err(e) => {
            warn!(error = %e, "could not get clipboard text");
            return;
        }
    };
    if let Err(e) = channel.push(ControlMessage::InjectText { text }) {
        warn!(error = %e, "could not request 'paste clipboard'");
    }
}

fn set_device_clipboard(
    clipboard: Option<&mut (dyn ClipboardProvider + 'static)>,
    channel: &dyn ControlChannel,
    paste: bool,
    sequence: AckSequence,
) -> bool {
    let text = match read_text(clipboard) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "could not get clipboard text");
            return false;
        }
    };
    let msg = ControlMessage::SetClipboard {
        sequence,
        text,
        paste,
    };
    if let Err(e) = channel.push(msg) {
        warn!(error = %e, "could not request 'set device clipboard'");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use touchdeck_clipboard::mock::MockClipboard;
    use touchdeck_input::mock::MockChannel;

    use super::*;

    fn sync_with(
        sync: &mut ClipboardSync,
        clipboard: &mut MockClipboard,
        channel: &MockChannel,
        async_paste: bool,
    ) -> CtrlV {
        sync.before_ctrl_v(Some(clipboard), channel, async_paste)
    }

    #[test]
    fn async_paste_uses_and_advances_sequence() {
        let mut sync = ClipboardSync::new(true, false);
        let mut clipboard = MockClipboard::with_text("hello");
        let channel = MockChannel::new();

        assert_eq!(
            sync_with(&mut sync, &mut clipboard, &channel, true),
            CtrlV::Forward(AckSequence(1))
        );
        assert_eq!(
            sync_with(&mut sync, &mut clipboard, &channel, true),
            CtrlV::Forward(AckSequence(2))
        );
        assert_eq!(sync.next_sequence(), AckSequence(3));
        assert_eq!(
            channel.messages()[1],
            ControlMessage::SetClipboard {
                sequence: AckSequence(2),
                text: "hello".to_string(),
                paste: false,
            }
        );
    }

    #[test]
    fn sync_paste_never_advances() {
        let mut sync = ClipboardSync::new(true, false);
        let mut clipboard = MockClipboard::with_text("hello");
        let channel = MockChannel::new();
        for _ in 0..3 {
            assert_eq!(
                sync_with(&mut sync, &mut clipboard, &channel, false),
                CtrlV::Forward(AckSequence::NONE)
            );
        }
        assert_eq!(sync.next_sequence(), AckSequence(1));
        assert_eq!(channel.messages().len(), 3);
    }

    #[test]
    fn failed_push_consumes_and_keeps_sequence() {
        let mut sync = ClipboardSync::new(true, false);
        let mut clipboard = MockClipboard::with_text("hello");
        let channel = MockChannel::new();
        channel.set_failing(true);
        assert_eq!(
            sync_with(&mut sync, &mut clipboard, &channel, true),
            CtrlV::Consumed
        );
        assert_eq!(sync.next_sequence(), AckSequence(1));
    }

    #[test]
    fn unreadable_clipboard_consumes() {
        let mut sync = ClipboardSync::new(true, false);
        let mut clipboard = MockClipboard::new();
        let channel = MockChannel::new();
        assert_eq!(
            sync_with(&mut sync, &mut clipboard, &channel, true),
            CtrlV::Consumed
        );
        assert!(sync.before_ctrl_v(None, &channel, true) == CtrlV::Consumed);
        assert!(channel.messages().is_empty());
    }

    #[test]
    fn autosync_off_forwards_untouched() {
        let mut sync = ClipboardSync::new(false, false);
        let mut clipboard = MockClipboard::with_text("hello");
        let channel = MockChannel::new();
        assert_eq!(
            sync_with(&mut sync, &mut clipboard, &channel, true),
            CtrlV::Forward(AckSequence::NONE)
        );
        assert!(channel.messages().is_empty());
    }

    #[test]
    fn legacy_paste_injects_text() {
        let mut sync = ClipboardSync::new(true, true);
        let mut clipboard = MockClipboard::with_text("hello");
        let channel = MockChannel::new();
        assert_eq!(
            sync_with(&mut sync, &mut clipboard, &channel, true),
            CtrlV::Consumed
        );
        assert_eq!(
            channel.messages(),
            vec![ControlMessage::InjectText {
                text: "hello".to_string()
            }]
        );
        assert_eq!(sync.next_sequence(), AckSequence(1));
    }

    #[test]
    fn paste_shortcut_variants() {
        let sync = ClipboardSync::new(true, false);
        let mut clipboard = MockClipboard::with_text("hi");
        let channel = MockChannel::new();

        sync.paste_shortcut(Some(&mut clipboard), &channel, false);
        sync.paste_shortcut(Some(&mut clipboard), &channel, true);
        clipboard.set_text(Some(""));
        sync.paste_shortcut(Some(&mut clipboard), &channel, true);

        assert_eq!(
            channel.messages(),
            vec![
                ControlMessage::SetClipboard {
                    sequence: AckSequence::NONE,
                    text: "hi".to_string(),
                    paste: true,
                },
                ControlMessage::InjectText {
                    text: "hi".to_string()
                },
            ]
        );
    }
}
