//! Event types for the TUI event loop.
//!
//! Events come from three places:
//!
//! - **Terminal**: key presses, mouse events, resizes
//! - **Background tasks**: catalog load progress and detail fetch results,
//!   injected through [`Tui::event_sender`](crate::Tui::event_sender)
//! - **Timer**: tick and render signals

use crossterm::event::{KeyEvent, MouseEvent};
use dex_client::{DetailReport, LoadUpdate, StageFailure};
use dex_core::PokemonId;

/// Events that can be processed by the TUI.
#[derive(Debug)]
#[non_exhaustive]
pub enum Event {
    /// A key press event from the terminal.
    Key(KeyEvent),

    /// A mouse event from the terminal.
    Mouse(MouseEvent),

    /// Terminal window was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Progress or completion of the catalog load.
    Catalog(LoadUpdate),

    /// A detail fetch finished.
    DetailLoaded {
        /// Entry that was requested.
        id: PokemonId,
        /// Pipeline outcome.
        result: Result<Box<DetailReport>, StageFailure>,
    },

    /// Periodic tick, used to expire status messages.
    Tick,

    /// Signal to render a new frame.
    Render,

    /// Focus gained by the terminal window.
    FocusGained,

    /// Focus lost by the terminal window.
    FocusLost,
}

impl Event {
    /// Returns `true` if this is a key event.
    #[inline]
    #[must_use]
    pub const fn is_key(&self) -> bool {
        matches!(self, Self::Key(_))
    }

    /// Returns `true` if this event came from a background task.
    #[inline]
    #[must_use]
    pub const fn is_background(&self) -> bool {
        matches!(self, Self::Catalog(_) | Self::DetailLoaded { .. })
    }

    /// Returns `true` if this is a tick event.
    #[inline]
    #[must_use]
    pub const fn is_tick(&self) -> bool {
        matches!(self, Self::Tick)
    }

    /// Returns the key event if this is a Key variant.
    #[inline]
    #[must_use]
    pub const fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key(key) => Some(key),
            _ => None,
        }
    }
}
