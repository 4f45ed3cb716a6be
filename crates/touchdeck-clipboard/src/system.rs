//! System clipboard through `arboard`.

use tracing::debug;

use crate::{ClipboardError, ClipboardProvider};

/// The host's system clipboard.
pub struct ArboardClipboard {
    inner: arboard::Clipboard,
}

impl ArboardClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner = arboard::Clipboard::new().map_err(map_err)?;
        Ok(Self { inner })
    }
}

impl ClipboardProvider for ArboardClipboard {
    fn get_text(&mut self) -> Result<String, ClipboardError> {
        let text = self.inner.get_text().map_err(map_err)?;
        if text.is_empty() {
            return Err(ClipboardError::Empty);
        }
        debug!(len = text.len(), "read host clipboard");
        Ok(text)
    }
}

fn map_err(e: arboard::Error) -> ClipboardError {
    match e {
        arboard::Error::ContentNotAvailable => ClipboardError::Empty,
        arboard::Error::ClipboardNotSupported => ClipboardError::Unavailable,
        arboard::Error::ClipboardOccupied => ClipboardError::AccessDenied,
        other => ClipboardError::Other(anyhow::Error::new(other)),
    }
}
