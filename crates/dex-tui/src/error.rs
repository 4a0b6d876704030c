//! Error types for the dex-tui crate.

use std::io;

/// Errors that can occur in the TUI.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TuiError {
    /// Terminal I/O error.
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// The event channel closed while the loop was still running.
    #[error("event channel closed unexpectedly")]
    ChannelClosed,

    /// Invalid TUI configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl TuiError {
    /// Creates a new configuration error.
    #[inline]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns `true` if the error leaves the terminal usable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
