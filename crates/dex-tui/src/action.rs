//! User actions for the TUI.
//!
//! Input events are turned into [`Action`]s by [`App::handle_key`], and
//! every state change goes through [`App::update`].
//!
//! ```text
//! Key Event → App::handle_key → Action → App::update
//! ```
//!
//! [`App::handle_key`]: crate::App::handle_key
//! [`App::update`]: crate::App::update

use dex_core::Route;

/// User-initiated actions in the TUI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Action {
    // =========================================================================
    // Selection
    // =========================================================================
    /// Move selection to the next item.
    NextItem,

    /// Move selection to the previous item.
    PreviousItem,

    /// Move selection to the first item.
    FirstItem,

    /// Move selection to the last item.
    LastItem,

    /// Move selection down by one page.
    PageDown,

    /// Move selection up by one page.
    PageUp,

    /// Select a specific item by index.
    SelectItem(usize),

    // =========================================================================
    // Routing
    // =========================================================================
    /// Switch to a view.
    Navigate(Route),

    /// Return to the previous view.
    Back,

    /// Open the detail view for the selected entry.
    OpenSelected,

    // =========================================================================
    // Search
    // =========================================================================
    /// Open the search input.
    EnterSearchMode,

    /// Close the search input without committing.
    ExitSearchMode,

    /// Update the live search term.
    SetSearchTerm(String),

    /// Commit the live search term.
    CommitSearch,

    // =========================================================================
    // Filtering
    // =========================================================================
    /// Advance the catalog filter (All → each type → Legendary → All).
    CycleFilter,

    /// Start editing the favorites name filter.
    EnterFilterMode,

    /// Stop editing the favorites name filter.
    ExitFilterMode,

    /// Update the favorites name filter.
    SetFavoritesFilter(String),

    /// Clear the favorites name filter.
    ClearFilter,

    // =========================================================================
    // Data
    // =========================================================================
    /// Toggle the favorite flag of the selected or displayed entry.
    ToggleFavorite,

    /// Retry the failed catalog load or detail fetch.
    Retry,

    // =========================================================================
    // UI State
    // =========================================================================
    /// Toggle the help panel.
    ToggleHelp,

    /// Hide the help panel.
    HideHelp,

    /// Show a status message.
    ShowStatus(String),

    /// Clear the status message.
    ClearStatus,

    // =========================================================================
    // Application Control
    // =========================================================================
    /// Quit the application.
    Quit,

    /// Render the UI.
    Render,

    /// Tick (periodic update).
    Tick,

    /// No operation.
    #[default]
    None,
}

impl Action {
    /// Returns `true` if this action requires a re-render.
    #[must_use]
    pub const fn needs_render(&self) -> bool {
        !matches!(self, Self::None | Self::Tick)
    }

    /// Returns `true` if this action moves the selection.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NextItem
                | Self::PreviousItem
                | Self::FirstItem
                | Self::LastItem
                | Self::PageDown
                | Self::PageUp
                | Self::SelectItem(_)
        )
    }

    /// Returns `true` if this action changes the current view.
    #[must_use]
    pub const fn is_routing(&self) -> bool {
        matches!(self, Self::Navigate(_) | Self::Back | Self::OpenSelected)
    }
}
