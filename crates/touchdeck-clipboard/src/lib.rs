//! Host clipboard access for touchdeck.
//!
//! Defines the [`ClipboardProvider`] trait the input core reads the local
//! clipboard through, and the [`SequenceCounter`] numbering clipboard pushes
//! so a dependent paste can wait for the device's acknowledgment.

pub mod error;
pub mod sequence;

#[cfg(feature = "arboard")]
pub mod system;

#[cfg(feature = "mock")]
pub mod mock;

pub use error::ClipboardError;
pub use sequence::SequenceCounter;

/// Platform clipboard access.
///
/// Reads are synchronous and expected to be short-lived.
pub trait ClipboardProvider {
    /// Current clipboard text. [`ClipboardError::Empty`] when there is none.
    fn get_text(&mut self) -> Result<String, ClipboardError>;
}
