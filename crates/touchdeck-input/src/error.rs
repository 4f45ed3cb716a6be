//! Collaborator errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("command queue is full")]
    QueueFull,

    #[error("command channel disconnected")]
    Disconnected,

    #[error("file transfer request rejected: {0}")]
    FileRequest(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
