//! Input manager errors.

use thiserror::Error;
use touchdeck_types::ControllerId;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Game-controller slot table errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("controller limit reached")]
    CapacityExceeded,

    #[error("controller {0} is not open")]
    NotFound(ControllerId),
}
