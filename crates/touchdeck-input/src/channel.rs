//! [`ControlChannel`] over tokio channels.
//!
//! The transport thread owns the receiving half; the input core only ever
//! uses the non-blocking send paths.

use tokio::sync::mpsc::{self, error::TrySendError};
use touchdeck_types::ControlMessage;

use crate::{ControlChannel, InputError};

impl ControlChannel for mpsc::Sender<ControlMessage> {
    fn push(&self, msg: ControlMessage) -> Result<(), InputError> {
        self.try_send(msg).map_err(|e| match e {
            TrySendError::Full(_) => InputError::QueueFull,
            TrySendError::Closed(_) => InputError::Disconnected,
        })
    }
}

impl ControlChannel for mpsc::UnboundedSender<ControlMessage> {
    fn push(&self, msg: ControlMessage) -> Result<(), InputError> {
        self.send(msg).map_err(|_| InputError::Disconnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_push_reports_full_queue() {
        let (tx, mut rx) = mpsc::channel(1);
        tx.push(ControlMessage::RotateDevice).unwrap();
        let err = tx.push(ControlMessage::CollapsePanels).unwrap_err();
        assert!(matches!(err, InputError::QueueFull));
        assert_eq!(rx.try_recv().unwrap(), ControlMessage::RotateDevice);
    }

    #[test]
    fn bounded_push_reports_closed_receiver() {
        let (tx, rx) = mpsc::channel(4);
        drop(rx);
        let err = tx.push(ControlMessage::RotateDevice).unwrap_err();
        assert!(matches!(err, InputError::Disconnected));
    }

    #[test]
    fn unbounded_push() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.push(ControlMessage::ExpandSettingsPanel).unwrap();
        assert_eq!(rx.try_recv().unwrap(), ControlMessage::ExpandSettingsPanel);
        drop(rx);
        assert!(tx.push(ControlMessage::ExpandSettingsPanel).is_err());
    }
}
