//! In-memory clipboard for testing.

use std::sync::{Arc, Mutex};

use crate::{ClipboardError, ClipboardProvider};

/// Clipboard whose content tests set directly. Clones share the content.
#[derive(Debug, Clone, Default)]
pub struct MockClipboard {
    content: Arc<Mutex<Option<String>>>,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let clipboard = Self::new();
        clipboard.set_text(Some(text));
        clipboard
    }

    /// Replace the content; `None` makes reads fail.
    pub fn set_text(&self, text: Option<&str>) {
        *self.content.lock().unwrap() = text.map(str::to_owned);
    }
}

impl ClipboardProvider for MockClipboard {
    fn get_text(&mut self) -> Result<String, ClipboardError> {
        self.content
            .lock()
            .unwrap()
            .clone()
            .ok_or(ClipboardError::AccessDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_content() {
        let clipboard = MockClipboard::new();
        let mut reader = clipboard.clone();
        assert!(reader.get_text().is_err());
        clipboard.set_text(Some("hello"));
        assert_eq!(reader.get_text().unwrap(), "hello");
    }
}
