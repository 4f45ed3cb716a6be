//! Native file dialog backed by `rfd`.

use std::path::PathBuf;

use tracing::debug;

use crate::FilePicker;

/// Opens the platform "open file" dialog, filtered to JSON documents.
#[derive(Debug, Default)]
pub struct NativeFilePicker;

impl NativeFilePicker {
    pub fn new() -> Self {
        Self
    }
}

impl FilePicker for NativeFilePicker {
    fn pick_touchmap(&mut self) -> Option<PathBuf> {
        let picked = rfd::FileDialog::new()
            .set_title("Open Touch Map File")
            .add_filter("JSON file", &["json"])
            .add_filter("All files", &["*"])
            .pick_file();
        debug!(path = ?picked, "file dialog closed");
        picked
    }
}
