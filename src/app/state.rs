//! Application state definitions
//!
//! State types for the viewer: the mode enum and the aggregate AppState.
//! Everything here is plain owned data; the event loop is single-threaded,
//! so no locking is involved anywhere.

use crate::scrolling::ScrollState;

/// Application operating modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    /// Scrolling the page
    Viewing,
    /// Newsletter modal is open
    Modal,
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    /// Scroll state for the page body
    pub scroll: ScrollState,
    /// Status message for user feedback
    pub status_message: String,
    /// Whether the help overlay is visible
    pub help_visible: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Viewing,
            scroll: ScrollState::new(0, 0),
            status_message: "Welcome to statdeck".to_string(),
            help_visible: false,
        }
    }
}
