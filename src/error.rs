//! Error types for queue operations

use thiserror::Error;

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;

/// Queue errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// An allocation for `what` (the sentinel, a node or a payload) of
    /// `bytes` bytes failed. The queue is left as it was before the call.
    #[error("failed to allocate {bytes} bytes for {what}")]
    AllocFailed { what: &'static str, bytes: usize },

    #[error("queue is empty")]
    Empty,
}
